//! Diesel models for buses and their seat layouts.

use diesel::prelude::*;

use crate::domain::bus::{Bus as DomainBus, NewBus as DomainNewBus};
use crate::domain::seat_map::SeatLayout;
use crate::domain::types::{BusId, BusName, TypeConstraintError};

#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::buses)]
pub struct Bus {
    pub id: i32,
    pub name: String,
    pub plate: Option<String>,
    pub capacity: i32,
    /// JSON array of layout rows.
    pub seat_layout: String,
}

#[derive(Insertable, AsChangeset)]
#[diesel(table_name = crate::schema::buses)]
#[diesel(treat_none_as_null = true)]
pub struct NewBus<'a> {
    pub name: &'a str,
    pub plate: Option<&'a str>,
    pub capacity: i32,
    pub seat_layout: String,
}

impl TryFrom<Bus> for DomainBus {
    type Error = TypeConstraintError;

    fn try_from(bus: Bus) -> Result<Self, Self::Error> {
        let layout = SeatLayout::from_json(&bus.seat_layout)
            .map_err(|e| TypeConstraintError::InvalidValue(e.to_string()))?;
        if i32::from(layout.capacity()) != bus.capacity {
            return Err(TypeConstraintError::InvalidValue(format!(
                "bus {} capacity {} differs from layout",
                bus.id, bus.capacity
            )));
        }
        Ok(Self {
            id: BusId::new(bus.id)?,
            name: BusName::new(bus.name)?,
            plate: bus.plate,
            layout,
        })
    }
}

impl<'a> From<&'a DomainNewBus> for NewBus<'a> {
    fn from(bus: &'a DomainNewBus) -> Self {
        Self {
            name: bus.name.as_str(),
            plate: bus.plate.as_deref(),
            capacity: i32::from(bus.capacity()),
            seat_layout: bus.layout.to_json(),
        }
    }
}
