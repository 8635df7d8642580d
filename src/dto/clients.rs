use serde::Serialize;

use crate::domain::client::Client;
use crate::domain::occupancy::RoomAssignment;
use crate::domain::provider::Provider;
use crate::domain::tour::Tour;
use crate::domain::types::{Money, ProviderId, SeatNumber};
use crate::dto::booking::SeatMapView;
use crate::pagination::Paginated;

/// Query parameters of the clients listing.
#[derive(Debug, Default)]
pub struct ClientsQuery {
    pub status: Option<String>,
    pub search: Option<String>,
    pub page: Option<usize>,
}

/// Data required to render the clients of one tour.
#[derive(Debug)]
pub struct ClientsPageData {
    pub tour: Tour,
    pub clients: Paginated<Client>,
    pub search_query: Option<String>,
    pub status_filter: Option<String>,
    pub seats_available: Option<usize>,
}

/// Data required to render the client editor.
#[derive(Debug)]
pub struct ClientPageData {
    pub client: Client,
    pub tour: Tour,
    pub seats: Vec<SeatNumber>,
    pub seat_map: Option<SeatMapView>,
    pub rooms: Vec<RoomAssignment>,
    pub extras: Vec<Provider>,
    pub selected_extras: Vec<ProviderId>,
    pub deposit: Money,
    pub currency: String,
}

/// Serializable manifest row exported as CSV.
#[derive(Debug, Serialize)]
pub struct ManifestRow {
    pub folio: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub adults: u32,
    pub children: u32,
    pub seats: String,
    pub status: String,
    pub total: String,
    pub paid: String,
    pub balance: String,
}
