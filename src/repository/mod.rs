use crate::db::{DbConnection, DbPool, get_connection};
use crate::domain::agency_settings::AgencySettings;
use crate::domain::bus::{Bus, NewBus};
use crate::domain::bus_passenger::{BusPassenger, NewBusPassenger, UpdateBusPassenger};
use crate::domain::bus_route::{BusRoute, BusSchedule, NewBusRoute, NewBusSchedule};
use crate::domain::client::{Client, NewClient, UpdateClient};
use crate::domain::hotel::{Hotel, NewHotel};
use crate::domain::provider::{NewProvider, Provider};
use crate::domain::tour::{NewTour, Tour};
use crate::domain::types::{
    BookingStatus, BusId, ClientId, Folio, HotelId, Money, PassengerId, ProviderId, RouteId,
    ScheduleId, SeatNumber, TourId,
};
use crate::repository::errors::RepositoryResult;

pub mod agency_settings;
pub mod bus;
pub mod bus_passenger;
pub mod bus_route;
pub mod client;
pub mod errors;
pub mod hotel;
#[cfg(feature = "test-mocks")]
pub mod mock;
pub mod provider;
pub mod tour;

/// Diesel-backed implementation of every repository trait.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool,
}

impl DieselRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(get_connection(&self.pool)?)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pagination {
    pub page: usize,
    pub per_page: usize,
}

impl Pagination {
    fn limit(&self) -> i64 {
        i64::try_from(self.per_page).unwrap_or(i64::MAX)
    }

    fn offset(&self) -> i64 {
        let skipped = self.page.max(1).saturating_sub(1).saturating_mul(self.per_page);
        i64::try_from(skipped).unwrap_or(i64::MAX)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TourListQuery {
    pub published_only: bool,
    pub search: Option<String>,
    pub pagination: Option<Pagination>,
}

impl TourListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn published(mut self) -> Self {
        self.published_only = true;
        self
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientListQuery {
    pub tour_id: TourId,
    pub status: Option<BookingStatus>,
    pub search: Option<String>,
    pub pagination: Option<Pagination>,
}

impl ClientListQuery {
    pub fn new(tour_id: TourId) -> Self {
        Self {
            tour_id,
            status: None,
            search: None,
            pagination: None,
        }
    }

    pub fn status(mut self, status: BookingStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PassengerListQuery {
    pub schedule_id: ScheduleId,
    pub search: Option<String>,
    pub pagination: Option<Pagination>,
}

impl PassengerListQuery {
    pub fn new(schedule_id: ScheduleId) -> Self {
        Self {
            schedule_id,
            search: None,
            pagination: None,
        }
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}

pub trait TourReader {
    fn get_tour_by_id(&self, id: TourId) -> RepositoryResult<Option<Tour>>;
    fn list_tours(&self, query: TourListQuery) -> RepositoryResult<(usize, Vec<Tour>)>;
}

pub trait TourWriter {
    fn create_tour(&self, new_tour: &NewTour) -> RepositoryResult<Tour>;
    fn update_tour(&self, id: TourId, tour: &NewTour) -> RepositoryResult<Tour>;
}

pub trait BusReader {
    fn get_bus_by_id(&self, id: BusId) -> RepositoryResult<Option<Bus>>;
    fn list_buses(&self) -> RepositoryResult<Vec<Bus>>;
    /// Highest seat number currently assigned on any trip using the bus.
    fn max_assigned_seat(&self, id: BusId) -> RepositoryResult<Option<SeatNumber>>;
}

pub trait BusWriter {
    fn create_bus(&self, new_bus: &NewBus) -> RepositoryResult<Bus>;
    fn update_bus(&self, id: BusId, bus: &NewBus) -> RepositoryResult<Bus>;
}

pub trait HotelReader {
    fn get_hotel_by_id(&self, id: HotelId) -> RepositoryResult<Option<Hotel>>;
    fn list_hotels(&self) -> RepositoryResult<Vec<Hotel>>;
}

pub trait HotelWriter {
    fn create_hotel(&self, new_hotel: &NewHotel) -> RepositoryResult<Hotel>;
    fn update_hotel(&self, id: HotelId, hotel: &NewHotel) -> RepositoryResult<Hotel>;
}

pub trait ProviderReader {
    fn get_provider_by_id(&self, id: ProviderId) -> RepositoryResult<Option<Provider>>;
    fn list_providers(&self, active_only: bool) -> RepositoryResult<Vec<Provider>>;
    fn list_providers_by_ids(&self, ids: &[ProviderId]) -> RepositoryResult<Vec<Provider>>;
}

pub trait ProviderWriter {
    fn create_provider(&self, new_provider: &NewProvider) -> RepositoryResult<Provider>;
    fn update_provider(&self, id: ProviderId, provider: &NewProvider)
    -> RepositoryResult<Provider>;
}

pub trait RouteReader {
    fn get_route_by_id(&self, id: RouteId) -> RepositoryResult<Option<BusRoute>>;
    fn list_routes(&self) -> RepositoryResult<Vec<BusRoute>>;
    fn get_schedule_by_id(&self, id: ScheduleId) -> RepositoryResult<Option<BusSchedule>>;
    /// Departures ordered by time, each with its route.
    fn list_schedules(&self, active_only: bool)
    -> RepositoryResult<Vec<(BusSchedule, BusRoute)>>;
}

pub trait RouteWriter {
    fn create_route(&self, new_route: &NewBusRoute) -> RepositoryResult<BusRoute>;
    fn update_route(&self, id: RouteId, route: &NewBusRoute) -> RepositoryResult<BusRoute>;
    fn create_schedule(&self, new_schedule: &NewBusSchedule) -> RepositoryResult<BusSchedule>;
    fn update_schedule(
        &self,
        id: ScheduleId,
        schedule: &NewBusSchedule,
    ) -> RepositoryResult<BusSchedule>;
}

pub trait ClientReader {
    fn get_client_by_id(&self, id: ClientId) -> RepositoryResult<Option<Client>>;
    fn get_client_by_folio(&self, folio: &Folio) -> RepositoryResult<Option<Client>>;
    fn list_clients(&self, query: ClientListQuery) -> RepositoryResult<(usize, Vec<Client>)>;
    fn list_client_seats(&self, id: ClientId) -> RepositoryResult<Vec<SeatNumber>>;
    fn list_client_extras(&self, id: ClientId) -> RepositoryResult<Vec<ProviderId>>;
    fn list_occupied_tour_seats(&self, tour_id: TourId) -> RepositoryResult<Vec<SeatNumber>>;
}

pub trait ClientWriter {
    /// Stores the client, its seats and its extras atomically.
    fn create_client(&self, new_client: &NewClient) -> RepositoryResult<Client>;
    /// Replaces the client's data, seats and extras atomically.
    fn update_client(&self, id: ClientId, updates: &UpdateClient) -> RepositoryResult<Client>;
    fn record_client_payment(&self, id: ClientId, amount: Money) -> RepositoryResult<Client>;
    /// Cancelling also releases the client's seats.
    fn set_client_status(&self, id: ClientId, status: BookingStatus)
    -> RepositoryResult<Client>;
}

pub trait PassengerReader {
    fn get_passenger_by_id(&self, id: PassengerId) -> RepositoryResult<Option<BusPassenger>>;
    fn get_passenger_by_folio(&self, folio: &Folio) -> RepositoryResult<Option<BusPassenger>>;
    fn list_passengers(
        &self,
        query: PassengerListQuery,
    ) -> RepositoryResult<(usize, Vec<BusPassenger>)>;
    fn list_passenger_seats(&self, id: PassengerId) -> RepositoryResult<Vec<SeatNumber>>;
    fn list_occupied_bus_seats(&self, schedule_id: ScheduleId)
    -> RepositoryResult<Vec<SeatNumber>>;
}

pub trait PassengerWriter {
    fn create_passenger(&self, new_passenger: &NewBusPassenger)
    -> RepositoryResult<BusPassenger>;
    fn update_passenger(
        &self,
        id: PassengerId,
        updates: &UpdateBusPassenger,
    ) -> RepositoryResult<BusPassenger>;
    fn record_passenger_payment(
        &self,
        id: PassengerId,
        amount: Money,
    ) -> RepositoryResult<BusPassenger>;
    fn set_passenger_status(
        &self,
        id: PassengerId,
        status: BookingStatus,
    ) -> RepositoryResult<BusPassenger>;
}

pub trait SettingsReader {
    fn get_agency_settings(&self) -> RepositoryResult<AgencySettings>;
}

pub trait SettingsWriter {
    fn save_agency_settings(&self, settings: &AgencySettings) -> RepositoryResult<AgencySettings>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pagination_window() {
        let pagination = Pagination {
            page: 3,
            per_page: 20,
        };
        assert_eq!(pagination.limit(), 20);
        assert_eq!(pagination.offset(), 40);

        let first = Pagination {
            page: 0,
            per_page: 20,
        };
        assert_eq!(first.offset(), 0);
    }

    #[test]
    fn client_query_builder() {
        let tour_id = TourId::new(7).unwrap();
        let query = ClientListQuery::new(tour_id)
            .status(BookingStatus::Confirmed)
            .search("ana")
            .paginate(2, 10);
        assert_eq!(query.tour_id, tour_id);
        assert_eq!(query.status, Some(BookingStatus::Confirmed));
        assert_eq!(query.search.as_deref(), Some("ana"));
        assert_eq!(
            query.pagination,
            Some(Pagination {
                page: 2,
                per_page: 10
            })
        );
    }
}
