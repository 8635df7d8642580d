use serde::Serialize;

use crate::domain::pricing::NightlyRoomCosts;
use crate::domain::types::{HotelId, HotelName, PlaceName};

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct Hotel {
    pub id: HotelId,
    pub name: HotelName,
    pub city: PlaceName,
    pub costs: NightlyRoomCosts,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NewHotel {
    pub name: HotelName,
    pub city: PlaceName,
    pub costs: NightlyRoomCosts,
}
