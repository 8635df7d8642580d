//! Reservations on bus-only departures.

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::domain::client::Contact;
use crate::domain::occupancy::Roster;
use crate::domain::pricing::balance;
use crate::domain::types::{
    BookingStatus, Folio, Money, Notes, PassengerId, ScheduleId, SeatNumber,
};

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct BusPassenger {
    pub id: PassengerId,
    pub folio: Folio,
    pub schedule_id: ScheduleId,
    pub contact: Contact,
    pub roster: Roster,
    pub total: Money,
    pub paid: Money,
    pub status: BookingStatus,
    pub notes: Option<Notes>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl BusPassenger {
    pub fn balance(&self) -> Money {
        balance(self.total, self.paid)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct NewBusPassenger {
    pub schedule_id: ScheduleId,
    pub folio: Folio,
    pub contact: Contact,
    pub roster: Roster,
    pub total: Money,
    pub status: BookingStatus,
    pub notes: Option<Notes>,
    pub seats: Vec<SeatNumber>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct UpdateBusPassenger {
    pub contact: Contact,
    pub roster: Roster,
    pub total: Money,
    pub notes: Option<Notes>,
    pub seats: Vec<SeatNumber>,
}
