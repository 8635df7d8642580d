//! Diesel models mirroring the booking tables.

use crate::domain::occupancy::Roster;
use crate::domain::types::TypeConstraintError;

pub mod agency_settings;
pub mod bus;
pub mod bus_passenger;
pub mod bus_route;
pub mod client;
pub mod config;
pub mod hotel;
pub mod provider;
pub mod seat_assignment;
pub mod tour;

/// Reads a non-negative counter column.
pub(crate) fn count_from_db(value: i32) -> Result<u32, TypeConstraintError> {
    u32::try_from(value).map_err(|_| TypeConstraintError::InvalidValue(format!("count {value}")))
}

/// Writes a counter to an `Integer` column, saturating on overflow.
pub(crate) fn count_to_db(value: u32) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}

/// Rebuilds a roster from its stored counters.
pub(crate) fn roster_from_db(adults: i32, children: i32) -> Result<Roster, TypeConstraintError> {
    Roster::new(count_from_db(adults)?, count_from_db(children)?)
        .map_err(|e| TypeConstraintError::InvalidValue(e.to_string()))
}
