//! Back-office form for editing bus-only reservations.

use serde::Deserialize;
use validator::Validate;

use crate::domain::client::Contact;
use crate::domain::occupancy::Roster;
use crate::domain::types::{Notes, SeatNumber};
use crate::forms::{FormError, contact_from_parts, notes_from, parse_seat_list, roster_from_counts};

#[derive(Debug, Deserialize, Validate)]
pub struct PassengerForm {
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
    #[serde(default)]
    pub seats: String,
    #[validate(length(max = 2000))]
    pub notes: Option<String>,
}

pub struct PassengerPayload {
    pub contact: Contact,
    pub roster: Roster,
    pub seats: Vec<SeatNumber>,
    pub notes: Option<Notes>,
}

impl TryFrom<PassengerForm> for PassengerPayload {
    type Error = FormError;

    fn try_from(form: PassengerForm) -> Result<Self, Self::Error> {
        form.validate()?;
        Ok(Self {
            contact: contact_from_parts(&form.name, &form.email, form.phone.as_deref())?,
            roster: roster_from_counts(form.adults, form.children)?,
            seats: parse_seat_list(&form.seats)?,
            notes: notes_from(form.notes.as_deref()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn passenger_form_to_payload() {
        let form = PassengerForm {
            name: "Rosa".to_string(),
            email: "rosa@example.com".to_string(),
            phone: Some("+52 55 1234 5678".to_string()),
            adults: 1,
            children: 1,
            seats: "9 10".to_string(),
            notes: Some("<b>aisle</b>".to_string()),
        };
        let payload = PassengerPayload::try_from(form).unwrap();
        assert_eq!(payload.seats.len(), 2);
        assert_eq!(
            payload.contact.phone.as_ref().map(|p| p.as_str()),
            Some("+525512345678")
        );
        assert_eq!(payload.notes.as_ref().map(Notes::as_str), Some("<b>aisle</b>"));
    }

    #[test]
    fn passenger_form_bounds_children() {
        let form = PassengerForm {
            name: "Rosa".to_string(),
            email: "rosa@example.com".to_string(),
            phone: None,
            adults: 1,
            children: u32::MAX,
            seats: String::new(),
            notes: None,
        };
        assert!(matches!(
            PassengerPayload::try_from(form),
            Err(FormError::Validation(_))
        ));
    }
}
