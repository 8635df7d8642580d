//! Back-office forms for editing tour reservations.

use serde::Deserialize;
use validator::Validate;

use crate::domain::client::Contact;
use crate::domain::occupancy::{RoomCounts, Roster};
use crate::domain::types::{BookingStatus, Money, Notes, ProviderId, SeatNumber};
use crate::forms::{
    FormError, contact_from_parts, notes_from, parse_amount, parse_seat_list, providers_from_ids,
    roster_from_counts,
};

#[derive(Debug, Deserialize, Validate)]
/// Form data for updating an existing client.
pub struct ClientForm {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    pub phone: Option<String>,
    #[validate(range(min = 1, max = 60))]
    pub adults: u32,
    #[serde(default)]
    #[validate(range(max = 60))]
    pub children: u32,
    /// All three room counts left at zero requests the automatic split.
    #[serde(default)]
    #[validate(range(max = 60))]
    pub rooms_double: u32,
    #[serde(default)]
    #[validate(range(max = 60))]
    pub rooms_triple: u32,
    #[serde(default)]
    #[validate(range(max = 60))]
    pub rooms_quad: u32,
    /// Comma separated seat numbers.
    #[serde(default)]
    pub seats: String,
    #[serde(default)]
    pub extras: Vec<i32>,
    #[validate(length(max = 2000))]
    pub notes: Option<String>,
}

pub struct ClientPayload {
    pub contact: Contact,
    pub roster: Roster,
    pub rooms: Option<RoomCounts>,
    pub seats: Vec<SeatNumber>,
    pub extras: Vec<ProviderId>,
    pub notes: Option<Notes>,
}

impl TryFrom<ClientForm> for ClientPayload {
    type Error = FormError;

    fn try_from(form: ClientForm) -> Result<Self, Self::Error> {
        form.validate()?;
        let rooms = RoomCounts::checked(form.rooms_double, form.rooms_triple, form.rooms_quad)
            .map_err(|e| FormError::InvalidRoster(e.to_string()))?;
        Ok(Self {
            contact: contact_from_parts(&form.name, &form.email, form.phone.as_deref())?,
            roster: roster_from_counts(form.adults, form.children)?,
            rooms: (rooms.rooms() > 0).then_some(rooms),
            seats: parse_seat_list(&form.seats)?,
            extras: providers_from_ids(&form.extras)?,
            notes: notes_from(form.notes.as_deref()),
        })
    }
}

#[derive(Debug, Deserialize)]
/// A payment received for a reservation, as a decimal amount.
pub struct PaymentForm {
    pub amount: String,
}

impl TryFrom<PaymentForm> for Money {
    type Error = FormError;

    fn try_from(form: PaymentForm) -> Result<Self, Self::Error> {
        let amount = parse_amount(&form.amount)?;
        if amount == Money::ZERO {
            return Err(FormError::InvalidAmount(form.amount));
        }
        Ok(amount)
    }
}

#[derive(Debug, Deserialize)]
pub struct StatusForm {
    pub status: String,
}

impl TryFrom<StatusForm> for BookingStatus {
    type Error = FormError;

    fn try_from(form: StatusForm) -> Result<Self, Self::Error> {
        form.status.parse().map_err(|_| FormError::InvalidStatus)
    }
}
