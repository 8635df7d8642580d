//! Request bodies of the public booking API.

use serde::Deserialize;
use validator::Validate;

use crate::domain::client::Contact;
use crate::domain::occupancy::Roster;
use crate::domain::types::{Notes, ProviderId, SeatNumber};
use crate::forms::{
    FormError, contact_from_parts, notes_from, providers_from_ids, roster_from_counts,
    seats_from_ids,
};

/// Travellers and add-ons to price without booking.
#[derive(Debug, Deserialize, Validate)]
pub struct TourQuoteForm {
    #[validate(range(min = 1, max = 60))]
    pub adults: u32,
    #[serde(default)]
    #[validate(range(max = 60))]
    pub children: u32,
    #[serde(default)]
    pub extras: Vec<i32>,
}

pub struct TourQuotePayload {
    pub roster: Roster,
    pub extras: Vec<ProviderId>,
}

impl TryFrom<TourQuoteForm> for TourQuotePayload {
    type Error = FormError;

    fn try_from(form: TourQuoteForm) -> Result<Self, Self::Error> {
        form.validate()?;
        Ok(Self {
            roster: roster_from_counts(form.adults, form.children)?,
            extras: providers_from_ids(&form.extras)?,
        })
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct TourBookingForm {
    #[validate(range(min = 1, max = 60))]
    pub adults: u32,
    #[serde(default)]
    #[validate(range(max = 60))]
    pub children: u32,
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    pub phone: Option<String>,
    #[validate(length(max = 2000))]
    pub notes: Option<String>,
    /// Chosen seats; empty lets the agency assign them.
    #[serde(default)]
    pub seats: Vec<i32>,
    #[serde(default)]
    pub extras: Vec<i32>,
}

pub struct TourBookingPayload {
    pub roster: Roster,
    pub contact: Contact,
    pub notes: Option<Notes>,
    pub seats: Vec<SeatNumber>,
    pub extras: Vec<ProviderId>,
}

impl TryFrom<TourBookingForm> for TourBookingPayload {
    type Error = FormError;

    fn try_from(form: TourBookingForm) -> Result<Self, Self::Error> {
        form.validate()?;
        Ok(Self {
            roster: roster_from_counts(form.adults, form.children)?,
            contact: contact_from_parts(&form.name, &form.email, form.phone.as_deref())?,
            notes: notes_from(form.notes.as_deref()),
            seats: seats_from_ids(&form.seats)?,
            extras: providers_from_ids(&form.extras)?,
        })
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct BusQuoteForm {
    #[validate(range(min = 1, max = 60))]
    pub adults: u32,
    #[serde(default)]
    #[validate(range(max = 60))]
    pub children: u32,
}

impl TryFrom<BusQuoteForm> for Roster {
    type Error = FormError;

    fn try_from(form: BusQuoteForm) -> Result<Self, Self::Error> {
        form.validate()?;
        roster_from_counts(form.adults, form.children)
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct BusBookingForm {
    #[validate(range(min = 1, max = 60))]
    pub adults: u32,
    #[serde(default)]
    #[validate(range(max = 60))]
    pub children: u32,
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    pub phone: Option<String>,
    #[validate(length(max = 2000))]
    pub notes: Option<String>,
    #[serde(default)]
    pub seats: Vec<i32>,
}

pub struct BusBookingPayload {
    pub roster: Roster,
    pub contact: Contact,
    pub notes: Option<Notes>,
    pub seats: Vec<SeatNumber>,
}

impl TryFrom<BusBookingForm> for BusBookingPayload {
    type Error = FormError;

    fn try_from(form: BusBookingForm) -> Result<Self, Self::Error> {
        form.validate()?;
        Ok(Self {
            roster: roster_from_counts(form.adults, form.children)?,
            contact: contact_from_parts(&form.name, &form.email, form.phone.as_deref())?,
            notes: notes_from(form.notes.as_deref()),
            seats: seats_from_ids(&form.seats)?,
        })
    }
}
