//! Form definitions backing the public API and the back office.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use thiserror::Error;
use validator::ValidationErrors;

use crate::domain::client::Contact;
use crate::domain::occupancy::Roster;
use crate::domain::types::{
    ContactEmail, ContactName, Money, Notes, PhoneNumber, ProviderId, SeatNumber,
};

pub mod booking;
pub mod catalog;
pub mod clients;
pub mod passengers;
pub mod settings;

#[derive(Debug, Error)]
/// Errors that can occur when processing form data.
pub enum FormError {
    #[error("validation errors: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("invalid email address")]
    InvalidEmail,

    #[error("invalid name")]
    InvalidName,

    #[error("invalid phone number")]
    InvalidPhoneNumber,

    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    #[error("invalid seat number: {0}")]
    InvalidSeat(String),

    #[error("invalid identifier")]
    InvalidId,

    #[error("invalid date: {0}")]
    InvalidDate(String),

    #[error("invalid travellers: {0}")]
    InvalidRoster(String),

    #[error("invalid seat layout: {0}")]
    InvalidLayout(String),

    #[error("invalid status")]
    InvalidStatus,

    #[error("{0}")]
    InvalidValue(String),
}

/// Parses a decimal amount such as `1250`, `1250.5` or `1,250.50` into cents.
pub fn parse_amount(value: &str) -> Result<Money, FormError> {
    let invalid = || FormError::InvalidAmount(value.to_string());
    let cleaned = value.trim().replace(',', "");
    if cleaned.is_empty() {
        return Ok(Money::ZERO);
    }

    let amount = Decimal::from_str_exact(&cleaned).map_err(|_| invalid())?;
    if amount.is_sign_negative() || amount.scale() > 2 {
        return Err(invalid());
    }
    let cents = amount
        .checked_mul(Decimal::ONE_HUNDRED)
        .and_then(|cents| cents.to_i64())
        .ok_or_else(invalid)?;
    Money::from_cents(cents).map_err(|_| invalid())
}

/// Parses a list such as `"3, 4 7"` into seat numbers.
pub fn parse_seat_list(value: &str) -> Result<Vec<SeatNumber>, FormError> {
    value
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|part| !part.is_empty())
        .map(|part| {
            part.parse::<i32>()
                .ok()
                .and_then(|n| SeatNumber::new(n).ok())
                .ok_or_else(|| FormError::InvalidSeat(part.to_string()))
        })
        .collect()
}

/// Inverse of [`parse_seat_list`] used to prefill the editors.
pub fn format_seat_list(seats: &[SeatNumber]) -> String {
    seats
        .iter()
        .map(SeatNumber::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn seats_from_ids(seats: &[i32]) -> Result<Vec<SeatNumber>, FormError> {
    seats
        .iter()
        .map(|&n| SeatNumber::new(n).map_err(|_| FormError::InvalidSeat(n.to_string())))
        .collect()
}

pub fn providers_from_ids(ids: &[i32]) -> Result<Vec<ProviderId>, FormError> {
    let mut providers = ids
        .iter()
        .map(|&id| ProviderId::new(id).map_err(|_| FormError::InvalidId))
        .collect::<Result<Vec<_>, _>>()?;
    providers.sort_unstable();
    providers.dedup();
    Ok(providers)
}

pub fn roster_from_counts(adults: u32, children: u32) -> Result<Roster, FormError> {
    Roster::new(adults, children).map_err(|e| FormError::InvalidRoster(e.to_string()))
}

pub fn contact_from_parts(
    name: &str,
    email: &str,
    phone: Option<&str>,
) -> Result<Contact, FormError> {
    Ok(Contact {
        name: ContactName::new(name.trim()).map_err(|_| FormError::InvalidName)?,
        email: ContactEmail::new(email).map_err(|_| FormError::InvalidEmail)?,
        phone: phone
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(PhoneNumber::new)
            .transpose()
            .map_err(|_| FormError::InvalidPhoneNumber)?,
    })
}

pub fn notes_from(value: Option<&str>) -> Option<Notes> {
    value.and_then(|v| Notes::new(v).ok())
}

/// HTML checkboxes post a value only when checked.
pub fn checkbox(value: &Option<String>) -> bool {
    value
        .as_deref()
        .is_some_and(|v| matches!(v, "on" | "true" | "1"))
}
