//! Tour reservations ("clients" in the back office).

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::domain::occupancy::{RoomCounts, Roster};
use crate::domain::pricing::balance;
use crate::domain::types::{
    BookingStatus, ClientId, ContactEmail, ContactName, Folio, Money, Notes, PhoneNumber,
    ProviderId, SeatNumber, TourId,
};

/// Person responsible for a reservation.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct Contact {
    pub name: ContactName,
    pub email: ContactEmail,
    pub phone: Option<PhoneNumber>,
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct Client {
    pub id: ClientId,
    pub folio: Folio,
    pub tour_id: TourId,
    pub contact: Contact,
    pub roster: Roster,
    pub rooms: RoomCounts,
    pub total: Money,
    pub paid: Money,
    pub status: BookingStatus,
    pub notes: Option<Notes>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Client {
    pub fn balance(&self) -> Money {
        balance(self.total, self.paid)
    }
}

/// A priced, seated reservation ready to be stored.
#[derive(Clone, Debug, PartialEq)]
pub struct NewClient {
    pub tour_id: TourId,
    pub folio: Folio,
    pub contact: Contact,
    pub roster: Roster,
    pub rooms: RoomCounts,
    pub total: Money,
    pub status: BookingStatus,
    pub notes: Option<Notes>,
    pub seats: Vec<SeatNumber>,
    pub extras: Vec<ProviderId>,
}

/// Replacement data from the back-office client editor.
#[derive(Clone, Debug, PartialEq)]
pub struct UpdateClient {
    pub contact: Contact,
    pub roster: Roster,
    pub rooms: RoomCounts,
    pub total: Money,
    pub notes: Option<Notes>,
    pub seats: Vec<SeatNumber>,
    pub extras: Vec<ProviderId>,
}
