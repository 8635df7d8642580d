//! Mock repository implementations for isolating services in tests.

use mockall::mock;

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
use crate::repository::{
    BusReader, BusWriter, ClientListQuery, ClientReader, ClientWriter, HotelReader, HotelWriter,
    PassengerListQuery, PassengerReader, PassengerWriter, ProviderReader, ProviderWriter,
    RouteReader, RouteWriter, SettingsReader, SettingsWriter, TourListQuery, TourReader,
    TourWriter,
};

mock! {
    pub Repository {}

    impl TourReader for Repository {
        fn get_tour_by_id(&self, id: TourId) -> RepositoryResult<Option<Tour>>;
        fn list_tours(&self, query: TourListQuery) -> RepositoryResult<(usize, Vec<Tour>)>;
    }

    impl TourWriter for Repository {
        fn create_tour(&self, new_tour: &NewTour) -> RepositoryResult<Tour>;
        fn update_tour(&self, id: TourId, tour: &NewTour) -> RepositoryResult<Tour>;
    }

    impl BusReader for Repository {
        fn get_bus_by_id(&self, id: BusId) -> RepositoryResult<Option<Bus>>;
        fn list_buses(&self) -> RepositoryResult<Vec<Bus>>;
        fn max_assigned_seat(&self, id: BusId) -> RepositoryResult<Option<SeatNumber>>;
    }

    impl BusWriter for Repository {
        fn create_bus(&self, new_bus: &NewBus) -> RepositoryResult<Bus>;
        fn update_bus(&self, id: BusId, bus: &NewBus) -> RepositoryResult<Bus>;
    }

    impl HotelReader for Repository {
        fn get_hotel_by_id(&self, id: HotelId) -> RepositoryResult<Option<Hotel>>;
        fn list_hotels(&self) -> RepositoryResult<Vec<Hotel>>;
    }

    impl HotelWriter for Repository {
        fn create_hotel(&self, new_hotel: &NewHotel) -> RepositoryResult<Hotel>;
        fn update_hotel(&self, id: HotelId, hotel: &NewHotel) -> RepositoryResult<Hotel>;
    }

    impl ProviderReader for Repository {
        fn get_provider_by_id(&self, id: ProviderId) -> RepositoryResult<Option<Provider>>;
        fn list_providers(&self, active_only: bool) -> RepositoryResult<Vec<Provider>>;
        fn list_providers_by_ids(&self, ids: &[ProviderId]) -> RepositoryResult<Vec<Provider>>;
    }

    impl ProviderWriter for Repository {
        fn create_provider(&self, new_provider: &NewProvider) -> RepositoryResult<Provider>;
        fn update_provider(
            &self,
            id: ProviderId,
            provider: &NewProvider,
        ) -> RepositoryResult<Provider>;
    }

    impl RouteReader for Repository {
        fn get_route_by_id(&self, id: RouteId) -> RepositoryResult<Option<BusRoute>>;
        fn list_routes(&self) -> RepositoryResult<Vec<BusRoute>>;
        fn get_schedule_by_id(&self, id: ScheduleId) -> RepositoryResult<Option<BusSchedule>>;
        fn list_schedules(
            &self,
            active_only: bool,
        ) -> RepositoryResult<Vec<(BusSchedule, BusRoute)>>;
    }

    impl RouteWriter for Repository {
        fn create_route(&self, new_route: &NewBusRoute) -> RepositoryResult<BusRoute>;
        fn update_route(&self, id: RouteId, route: &NewBusRoute) -> RepositoryResult<BusRoute>;
        fn create_schedule(&self, new_schedule: &NewBusSchedule) -> RepositoryResult<BusSchedule>;
        fn update_schedule(
            &self,
            id: ScheduleId,
            schedule: &NewBusSchedule,
        ) -> RepositoryResult<BusSchedule>;
    }

    impl ClientReader for Repository {
        fn get_client_by_id(&self, id: ClientId) -> RepositoryResult<Option<Client>>;
        fn get_client_by_folio(&self, folio: &Folio) -> RepositoryResult<Option<Client>>;
        fn list_clients(&self, query: ClientListQuery) -> RepositoryResult<(usize, Vec<Client>)>;
        fn list_client_seats(&self, id: ClientId) -> RepositoryResult<Vec<SeatNumber>>;
        fn list_client_extras(&self, id: ClientId) -> RepositoryResult<Vec<ProviderId>>;
        fn list_occupied_tour_seats(&self, tour_id: TourId) -> RepositoryResult<Vec<SeatNumber>>;
    }

    impl ClientWriter for Repository {
        fn create_client(&self, new_client: &NewClient) -> RepositoryResult<Client>;
        fn update_client(&self, id: ClientId, updates: &UpdateClient) -> RepositoryResult<Client>;
        fn record_client_payment(&self, id: ClientId, amount: Money) -> RepositoryResult<Client>;
        fn set_client_status(
            &self,
            id: ClientId,
            status: BookingStatus,
        ) -> RepositoryResult<Client>;
    }

    impl PassengerReader for Repository {
        fn get_passenger_by_id(&self, id: PassengerId) -> RepositoryResult<Option<BusPassenger>>;
        fn get_passenger_by_folio(&self, folio: &Folio) -> RepositoryResult<Option<BusPassenger>>;
        fn list_passengers(
            &self,
            query: PassengerListQuery,
        ) -> RepositoryResult<(usize, Vec<BusPassenger>)>;
        fn list_passenger_seats(&self, id: PassengerId) -> RepositoryResult<Vec<SeatNumber>>;
        fn list_occupied_bus_seats(
            &self,
            schedule_id: ScheduleId,
        ) -> RepositoryResult<Vec<SeatNumber>>;
    }

    impl PassengerWriter for Repository {
        fn create_passenger(
            &self,
            new_passenger: &NewBusPassenger,
        ) -> RepositoryResult<BusPassenger>;
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

    impl SettingsReader for Repository {
        fn get_agency_settings(&self) -> RepositoryResult<AgencySettings>;
    }

    impl SettingsWriter for Repository {
        fn save_agency_settings(
            &self,
            settings: &AgencySettings,
        ) -> RepositoryResult<AgencySettings>;
    }
}
