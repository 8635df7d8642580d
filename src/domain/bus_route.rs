//! Bus-only travel: routes between two places and their scheduled departures.

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::domain::pricing::BusFare;
use crate::domain::types::{BusId, PlaceName, RouteId, ScheduleId, TypeConstraintError};

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct BusRoute {
    pub id: RouteId,
    pub origin: PlaceName,
    pub destination: PlaceName,
    pub fare: BusFare,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NewBusRoute {
    pub origin: PlaceName,
    pub destination: PlaceName,
    pub fare: BusFare,
}

impl NewBusRoute {
    pub fn try_new(
        origin: PlaceName,
        destination: PlaceName,
        fare: BusFare,
    ) -> Result<Self, TypeConstraintError> {
        if origin.eq_ignore_ascii_case(&destination) {
            return Err(TypeConstraintError::InvalidValue(
                "origin and destination must differ".to_string(),
            ));
        }
        Ok(Self {
            origin,
            destination,
            fare,
        })
    }
}

/// A departure of a route with a specific bus.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct BusSchedule {
    pub id: ScheduleId,
    pub route_id: RouteId,
    pub bus_id: BusId,
    pub departure: NaiveDateTime,
    pub active: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NewBusSchedule {
    pub route_id: RouteId,
    pub bus_id: BusId,
    pub departure: NaiveDateTime,
    pub active: bool,
}
