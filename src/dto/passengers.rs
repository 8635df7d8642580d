use crate::domain::bus_passenger::BusPassenger;
use crate::domain::bus_route::{BusRoute, BusSchedule};
use crate::domain::types::{Money, SeatNumber};
use crate::dto::booking::SeatMapView;
use crate::pagination::Paginated;

#[derive(Debug, Default)]
pub struct PassengersQuery {
    pub search: Option<String>,
    pub page: Option<usize>,
}

#[derive(Debug)]
pub struct PassengersPageData {
    pub schedule: BusSchedule,
    pub route: BusRoute,
    pub passengers: Paginated<BusPassenger>,
    pub search_query: Option<String>,
    pub seats_available: usize,
}

#[derive(Debug)]
pub struct PassengerPageData {
    pub passenger: BusPassenger,
    pub schedule: BusSchedule,
    pub route: BusRoute,
    pub seats: Vec<SeatNumber>,
    pub seat_map: SeatMapView,
    pub deposit: Money,
    pub currency: String,
}
