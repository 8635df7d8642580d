use diesel::prelude::*;

use crate::domain::hotel::{Hotel as DomainHotel, NewHotel as DomainNewHotel};
use crate::domain::pricing::NightlyRoomCosts;
use crate::domain::types::{HotelId, HotelName, Money, PlaceName, TypeConstraintError};

#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::hotels)]
pub struct Hotel {
    pub id: i32,
    pub name: String,
    pub city: String,
    pub cost_double: i64,
    pub cost_triple: i64,
    pub cost_quad: i64,
}

#[derive(Insertable, AsChangeset)]
#[diesel(table_name = crate::schema::hotels)]
pub struct NewHotel<'a> {
    pub name: &'a str,
    pub city: &'a str,
    pub cost_double: i64,
    pub cost_triple: i64,
    pub cost_quad: i64,
}

impl TryFrom<Hotel> for DomainHotel {
    type Error = TypeConstraintError;

    fn try_from(hotel: Hotel) -> Result<Self, Self::Error> {
        Ok(Self {
            id: HotelId::new(hotel.id)?,
            name: HotelName::new(hotel.name)?,
            city: PlaceName::new(hotel.city)?,
            costs: NightlyRoomCosts {
                double: Money::from_cents(hotel.cost_double)?,
                triple: Money::from_cents(hotel.cost_triple)?,
                quad: Money::from_cents(hotel.cost_quad)?,
            },
        })
    }
}

impl<'a> From<&'a DomainNewHotel> for NewHotel<'a> {
    fn from(hotel: &'a DomainNewHotel) -> Self {
        Self {
            name: hotel.name.as_str(),
            city: hotel.city.as_str(),
            cost_double: hotel.costs.double.cents(),
            cost_triple: hotel.costs.triple.cents(),
            cost_quad: hotel.costs.quad.cents(),
        }
    }
}
