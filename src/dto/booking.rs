//! Payloads of the public booking API.

use serde::Serialize;

use crate::domain::bus_route::{BusRoute, BusSchedule};
use crate::domain::occupancy::RoomAssignment;
use crate::domain::pricing::PriceQuote;
use crate::domain::provider::Provider;
use crate::domain::seat_map::{SeatMap, SeatView};
use crate::domain::tour::Tour;
use crate::domain::types::{BookingStatus, Folio, Money, SeatNumber};

/// Seat grid of one tour or departure as rendered by the site.
#[derive(Debug, Serialize)]
pub struct SeatMapView {
    pub capacity: u16,
    pub available: usize,
    pub rows: Vec<Vec<SeatView>>,
}

impl From<&SeatMap> for SeatMapView {
    fn from(map: &SeatMap) -> Self {
        Self {
            capacity: map.capacity(),
            available: map.available_count(),
            rows: map.view(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ToursResponse {
    pub total: usize,
    pub page: usize,
    pub tours: Vec<Tour>,
}

/// Everything the booking page needs for one tour.
#[derive(Debug, Serialize)]
pub struct TourBookingData {
    pub tour: Tour,
    pub nights: u32,
    /// `None` while no bus is assigned to the tour.
    pub seat_map: Option<SeatMapView>,
    pub extras: Vec<Provider>,
    pub currency: String,
    pub deposit_percent: u8,
}

#[derive(Debug, Serialize)]
pub struct ScheduleSummary {
    pub schedule: BusSchedule,
    pub route: BusRoute,
    pub available: usize,
}

#[derive(Debug, Serialize)]
pub struct BusBookingData {
    pub schedule: BusSchedule,
    pub route: BusRoute,
    pub seat_map: SeatMapView,
    pub currency: String,
    pub deposit_percent: u8,
}

#[derive(Debug, Serialize)]
pub struct QuoteResponse {
    /// Empty for bus-only trips.
    pub rooms: Vec<RoomAssignment>,
    pub quote: PriceQuote,
    pub deposit: Money,
    pub currency: String,
}

/// Returned to the customer after a successful reservation.
#[derive(Debug, Serialize)]
pub struct BookingConfirmation {
    pub folio: Folio,
    pub status: BookingStatus,
    pub seats: Vec<SeatNumber>,
    pub rooms: Vec<RoomAssignment>,
    pub total: Money,
    pub deposit: Money,
    pub balance: Money,
    pub currency: String,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TripKind {
    Tour,
    Bus,
}

/// Public view of a reservation found by folio.
#[derive(Debug, Serialize)]
pub struct BookingLookup {
    pub kind: TripKind,
    pub folio: Folio,
    pub trip: String,
    pub status: BookingStatus,
    pub travellers: u32,
    pub seats: Vec<SeatNumber>,
    pub total: Money,
    pub paid: Money,
    pub balance: Money,
    pub currency: String,
}
