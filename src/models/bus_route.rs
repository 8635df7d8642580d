use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::bus_route::{
    BusRoute as DomainBusRoute, BusSchedule as DomainBusSchedule,
    NewBusRoute as DomainNewBusRoute, NewBusSchedule as DomainNewBusSchedule,
};
use crate::domain::pricing::BusFare;
use crate::domain::types::{BusId, Money, PlaceName, RouteId, ScheduleId, TypeConstraintError};

#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::bus_routes)]
pub struct BusRoute {
    pub id: i32,
    pub origin: String,
    pub destination: String,
    pub fare_adult: i64,
    pub fare_child: i64,
}

#[derive(Insertable, AsChangeset)]
#[diesel(table_name = crate::schema::bus_routes)]
pub struct NewBusRoute<'a> {
    pub origin: &'a str,
    pub destination: &'a str,
    pub fare_adult: i64,
    pub fare_child: i64,
}

#[derive(Debug, Clone, Identifiable, Queryable, Associations)]
#[diesel(table_name = crate::schema::bus_schedules)]
#[diesel(belongs_to(BusRoute, foreign_key = route_id))]
pub struct BusSchedule {
    pub id: i32,
    pub route_id: i32,
    pub bus_id: i32,
    pub departure: NaiveDateTime,
    pub active: bool,
}

#[derive(Insertable, AsChangeset)]
#[diesel(table_name = crate::schema::bus_schedules)]
pub struct NewBusSchedule {
    pub route_id: i32,
    pub bus_id: i32,
    pub departure: NaiveDateTime,
    pub active: bool,
}

impl TryFrom<BusRoute> for DomainBusRoute {
    type Error = TypeConstraintError;

    fn try_from(route: BusRoute) -> Result<Self, Self::Error> {
        Ok(Self {
            id: RouteId::new(route.id)?,
            origin: PlaceName::new(route.origin)?,
            destination: PlaceName::new(route.destination)?,
            fare: BusFare {
                adult: Money::from_cents(route.fare_adult)?,
                child: Money::from_cents(route.fare_child)?,
            },
        })
    }
}

impl<'a> From<&'a DomainNewBusRoute> for NewBusRoute<'a> {
    fn from(route: &'a DomainNewBusRoute) -> Self {
        Self {
            origin: route.origin.as_str(),
            destination: route.destination.as_str(),
            fare_adult: route.fare.adult.cents(),
            fare_child: route.fare.child.cents(),
        }
    }
}

impl TryFrom<BusSchedule> for DomainBusSchedule {
    type Error = TypeConstraintError;

    fn try_from(schedule: BusSchedule) -> Result<Self, Self::Error> {
        Ok(Self {
            id: ScheduleId::new(schedule.id)?,
            route_id: RouteId::new(schedule.route_id)?,
            bus_id: BusId::new(schedule.bus_id)?,
            departure: schedule.departure,
            active: schedule.active,
        })
    }
}

impl From<&DomainNewBusSchedule> for NewBusSchedule {
    fn from(schedule: &DomainNewBusSchedule) -> Self {
        Self {
            route_id: schedule.route_id.get(),
            bus_id: schedule.bus_id.get(),
            departure: schedule.departure,
            active: schedule.active,
        }
    }
}
