use serde::Serialize;

use crate::domain::bus::Bus;
use crate::domain::bus_route::{BusRoute, BusSchedule};
use crate::domain::hotel::Hotel;
use crate::domain::occupancy::RoomAssignment;
use crate::domain::pricing::PriceQuote;
use crate::domain::provider::Provider;
use crate::domain::tour::Tour;
use crate::pagination::Paginated;

#[derive(Debug, Default)]
pub struct ToursQuery {
    pub search: Option<String>,
    pub page: Option<usize>,
}

#[derive(Debug)]
pub struct ToursPageData {
    pub tours: Paginated<Tour>,
    pub buses: Vec<Bus>,
    pub search_query: Option<String>,
}

#[derive(Debug)]
pub struct TourPageData {
    pub tour: Tour,
    pub buses: Vec<Bus>,
    pub hotels: Vec<Hotel>,
}

/// Bus with its layout rendered one row per line for the editor.
#[derive(Debug, Serialize)]
pub struct BusRow {
    pub bus: Bus,
    pub capacity: u16,
    pub layout_text: String,
}

impl From<Bus> for BusRow {
    fn from(bus: Bus) -> Self {
        let layout_text = Vec::<String>::from(bus.layout.clone()).join("\n");
        Self {
            capacity: bus.layout.capacity(),
            bus,
            layout_text,
        }
    }
}

#[derive(Debug)]
pub struct BusesPageData {
    pub buses: Vec<BusRow>,
}

#[derive(Debug)]
pub struct HotelsPageData {
    pub hotels: Vec<Hotel>,
}

#[derive(Debug)]
pub struct ProvidersPageData {
    pub providers: Vec<Provider>,
}

#[derive(Debug)]
pub struct RoutesPageData {
    pub routes: Vec<BusRoute>,
    pub schedules: Vec<(BusSchedule, BusRoute)>,
    pub buses: Vec<Bus>,
}

/// Lodging cost estimate shown in the hotel quote panel.
#[derive(Debug, Serialize)]
pub struct HotelQuoteData {
    pub hotel: Hotel,
    pub nights: u32,
    pub rooms: Vec<RoomAssignment>,
    pub quote: PriceQuote,
}
