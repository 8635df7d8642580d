//! Back-office catalog: tours, buses, hotels, add-ons, routes and departures.

use crate::SERVICE_ADMIN_ROLE;
use crate::auth::{AuthenticatedUser, ensure_role};
use crate::domain::bus::{Bus, NewBus};
use crate::domain::bus_route::{BusRoute, BusSchedule, NewBusRoute, NewBusSchedule};
use crate::domain::hotel::{Hotel, NewHotel};
use crate::domain::occupancy::RoomSplit;
use crate::domain::pricing::quote_hotel;
use crate::domain::provider::{NewProvider, Provider};
use crate::domain::tour::{NewTour, Tour};
use crate::domain::types::{BusId, HotelId, ProviderId, RouteId, ScheduleId, SeatNumber};
use crate::dto::catalog::{
    BusRow, BusesPageData, HotelQuoteData, HotelsPageData, ProvidersPageData, RoutesPageData,
    TourPageData, ToursPageData, ToursQuery,
};
use crate::forms::catalog::{
    BusForm, HotelForm, HotelQuoteForm, HotelQuotePayload, ProviderForm, RouteForm,
    ScheduleForm, TourForm,
};
use crate::pagination::{DEFAULT_ITEMS_PER_PAGE, Paginated};
use crate::repository::{
    BusReader, BusWriter, ClientReader, HotelReader, HotelWriter, PassengerReader,
    ProviderReader, ProviderWriter, RouteReader, RouteWriter, TourListQuery, TourReader,
    TourWriter,
};
use crate::services::booking::get_tour;
use crate::services::bus_booking::get_schedule;
use crate::services::{ServiceError, ServiceResult, normalize_search};

fn existing_bus<R>(repo: &R, bus_id: BusId) -> ServiceResult<Bus>
where
    R: BusReader + ?Sized,
{
    repo.get_bus_by_id(bus_id)?
        .ok_or_else(|| ServiceError::Form(format!("Bus {bus_id} does not exist")))
}

/// Refuses moving assigned seats onto a bus that lacks them.
fn ensure_seats_fit(bus: Option<&Bus>, highest: Option<SeatNumber>) -> ServiceResult<()> {
    match (bus, highest) {
        (_, None) => Ok(()),
        (None, Some(_)) => Err(ServiceError::Form(
            "Seats are already assigned; a bus is required".to_string(),
        )),
        (Some(bus), Some(seat)) if !bus.layout.contains(seat) => Err(ServiceError::Form(
            format!("Seat {seat} is assigned but {} has only {} seats", bus.name, bus.capacity()),
        )),
        _ => Ok(()),
    }
}

pub fn list_tours<R>(
    repo: &R,
    user: &AuthenticatedUser,
    query: ToursQuery,
) -> ServiceResult<ToursPageData>
where
    R: TourReader + BusReader + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;

    let page = query.page.unwrap_or(1).max(1);
    let mut list_query = TourListQuery::new().paginate(page, DEFAULT_ITEMS_PER_PAGE);
    let search_query = normalize_search(query.search);
    if let Some(term) = &search_query {
        list_query = list_query.search(term.clone());
    }

    let (total, tours) = repo.list_tours(list_query).map_err(|err| {
        log::error!("Failed to list tours: {err}");
        err
    })?;
    let buses = repo.list_buses()?;

    Ok(ToursPageData {
        tours: Paginated::new(tours, page, total),
        buses,
        search_query,
    })
}

pub fn load_tour<R>(repo: &R, user: &AuthenticatedUser, tour_id: i32) -> ServiceResult<TourPageData>
where
    R: TourReader + BusReader + HotelReader + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;

    let tour = get_tour(repo, tour_id)?;
    let buses = repo.list_buses()?;
    let hotels = repo.list_hotels()?;

    Ok(TourPageData {
        tour,
        buses,
        hotels,
    })
}

pub fn create_tour<R>(repo: &R, user: &AuthenticatedUser, form: TourForm) -> ServiceResult<Tour>
where
    R: BusReader + TourWriter + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;

    let new_tour = NewTour::try_from(form)?;
    if let Some(bus_id) = new_tour.bus_id {
        existing_bus(repo, bus_id)?;
    }

    let tour = repo.create_tour(&new_tour).map_err(|err| {
        log::error!("Failed to create tour: {err}");
        err
    })?;
    log::info!("Created tour {} ({})", tour.id, tour.name);

    Ok(tour)
}

/// Saves a tour. Changing its bus is refused while seats are assigned that
/// the new bus does not have.
pub fn update_tour<R>(
    repo: &R,
    user: &AuthenticatedUser,
    tour_id: i32,
    form: TourForm,
) -> ServiceResult<Tour>
where
    R: TourReader + TourWriter + BusReader + ClientReader + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;

    let new_tour = NewTour::try_from(form)?;
    let tour = get_tour(repo, tour_id)?;
    let bus = new_tour
        .bus_id
        .map(|bus_id| existing_bus(repo, bus_id))
        .transpose()?;
    if new_tour.bus_id != tour.bus_id {
        let highest = repo.list_occupied_tour_seats(tour.id)?.into_iter().max();
        ensure_seats_fit(bus.as_ref(), highest)?;
    }

    let updated = repo.update_tour(tour.id, &new_tour).map_err(|err| {
        log::error!("Failed to update tour {}: {err}", tour.id);
        err
    })?;

    Ok(updated)
}

pub fn list_buses<R>(repo: &R, user: &AuthenticatedUser) -> ServiceResult<BusesPageData>
where
    R: BusReader + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;

    let buses = repo
        .list_buses()
        .map_err(|err| {
            log::error!("Failed to list buses: {err}");
            err
        })?
        .into_iter()
        .map(BusRow::from)
        .collect();

    Ok(BusesPageData { buses })
}

pub fn create_bus<R>(repo: &R, user: &AuthenticatedUser, form: BusForm) -> ServiceResult<Bus>
where
    R: BusWriter + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;

    let new_bus = NewBus::try_from(form)?;
    let bus = repo.create_bus(&new_bus).map_err(|err| {
        log::error!("Failed to create bus: {err}");
        err
    })?;

    Ok(bus)
}

/// Saves a bus. A new layout must still contain every assigned seat.
pub fn update_bus<R>(
    repo: &R,
    user: &AuthenticatedUser,
    bus_id: i32,
    form: BusForm,
) -> ServiceResult<Bus>
where
    R: BusReader + BusWriter + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;

    let new_bus = NewBus::try_from(form)?;
    let bus_id = BusId::new(bus_id).map_err(|_| ServiceError::NotFound)?;
    let current = repo.get_bus_by_id(bus_id)?.ok_or(ServiceError::NotFound)?;
    if let Some(seat) = repo.max_assigned_seat(bus_id)? {
        if !new_bus.layout.contains(seat) {
            return Err(ServiceError::Form(format!(
                "Seat {seat} of {} is assigned; the new layout has only {} seats",
                current.name,
                new_bus.capacity()
            )));
        }
    }

    let updated = repo.update_bus(bus_id, &new_bus).map_err(|err| {
        log::error!("Failed to update bus {bus_id}: {err}");
        err
    })?;

    Ok(updated)
}

pub fn list_hotels<R>(repo: &R, user: &AuthenticatedUser) -> ServiceResult<HotelsPageData>
where
    R: HotelReader + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;

    let hotels = repo.list_hotels().map_err(|err| {
        log::error!("Failed to list hotels: {err}");
        err
    })?;

    Ok(HotelsPageData { hotels })
}

pub fn create_hotel<R>(repo: &R, user: &AuthenticatedUser, form: HotelForm) -> ServiceResult<Hotel>
where
    R: HotelWriter + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;

    let new_hotel = NewHotel::try_from(form)?;
    let hotel = repo.create_hotel(&new_hotel).map_err(|err| {
        log::error!("Failed to create hotel: {err}");
        err
    })?;

    Ok(hotel)
}

pub fn update_hotel<R>(
    repo: &R,
    user: &AuthenticatedUser,
    hotel_id: i32,
    form: HotelForm,
) -> ServiceResult<Hotel>
where
    R: HotelWriter + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;

    let new_hotel = NewHotel::try_from(form)?;
    let hotel_id = HotelId::new(hotel_id).map_err(|_| ServiceError::NotFound)?;
    let hotel = repo.update_hotel(hotel_id, &new_hotel).map_err(|err| {
        log::error!("Failed to update hotel {hotel_id}: {err}");
        err
    })?;

    Ok(hotel)
}

/// Agency cost of lodging a party, using the operator's room choice when
/// given and the automatic split otherwise.
pub fn hotel_quote<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: HotelQuoteForm,
) -> ServiceResult<HotelQuoteData>
where
    R: HotelReader + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;

    let payload = HotelQuotePayload::try_from(form)?;
    let hotel = repo
        .get_hotel_by_id(payload.hotel_id)?
        .ok_or(ServiceError::NotFound)?;
    let split = match payload.rooms {
        Some(counts) => RoomSplit::manual(payload.roster, counts)?,
        None => RoomSplit::auto(payload.roster)?,
    };
    let quote = quote_hotel(&hotel.costs, split.counts(), payload.nights)?;

    Ok(HotelQuoteData {
        hotel,
        nights: payload.nights,
        rooms: split.rooms().to_vec(),
        quote,
    })
}

pub fn list_providers<R>(repo: &R, user: &AuthenticatedUser) -> ServiceResult<ProvidersPageData>
where
    R: ProviderReader + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;

    let providers = repo.list_providers(false).map_err(|err| {
        log::error!("Failed to list providers: {err}");
        err
    })?;

    Ok(ProvidersPageData { providers })
}

pub fn create_provider<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: ProviderForm,
) -> ServiceResult<Provider>
where
    R: ProviderWriter + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;

    let new_provider = NewProvider::try_from(form)?;
    let provider = repo.create_provider(&new_provider).map_err(|err| {
        log::error!("Failed to create provider: {err}");
        err
    })?;

    Ok(provider)
}

pub fn update_provider<R>(
    repo: &R,
    user: &AuthenticatedUser,
    provider_id: i32,
    form: ProviderForm,
) -> ServiceResult<Provider>
where
    R: ProviderWriter + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;

    let new_provider = NewProvider::try_from(form)?;
    let provider_id = ProviderId::new(provider_id).map_err(|_| ServiceError::NotFound)?;
    let provider = repo
        .update_provider(provider_id, &new_provider)
        .map_err(|err| {
            log::error!("Failed to update provider {provider_id}: {err}");
            err
        })?;

    Ok(provider)
}

pub fn load_routes<R>(repo: &R, user: &AuthenticatedUser) -> ServiceResult<RoutesPageData>
where
    R: RouteReader + BusReader + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;

    let routes = repo.list_routes().map_err(|err| {
        log::error!("Failed to list routes: {err}");
        err
    })?;
    let schedules = repo.list_schedules(false)?;
    let buses = repo.list_buses()?;

    Ok(RoutesPageData {
        routes,
        schedules,
        buses,
    })
}

pub fn create_route<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: RouteForm,
) -> ServiceResult<BusRoute>
where
    R: RouteWriter + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;

    let new_route = NewBusRoute::try_from(form)?;
    let route = repo.create_route(&new_route).map_err(|err| {
        log::error!("Failed to create route: {err}");
        err
    })?;

    Ok(route)
}

pub fn update_route<R>(
    repo: &R,
    user: &AuthenticatedUser,
    route_id: i32,
    form: RouteForm,
) -> ServiceResult<BusRoute>
where
    R: RouteWriter + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;

    let new_route = NewBusRoute::try_from(form)?;
    let route_id = RouteId::new(route_id).map_err(|_| ServiceError::NotFound)?;
    let route = repo.update_route(route_id, &new_route).map_err(|err| {
        log::error!("Failed to update route {route_id}: {err}");
        err
    })?;

    Ok(route)
}

fn checked_schedule<R>(repo: &R, form: ScheduleForm) -> ServiceResult<(NewBusSchedule, Bus)>
where
    R: RouteReader + BusReader + ?Sized,
{
    let new_schedule = NewBusSchedule::try_from(form)?;
    if repo.get_route_by_id(new_schedule.route_id)?.is_none() {
        return Err(ServiceError::Form(format!(
            "Route {} does not exist",
            new_schedule.route_id
        )));
    }
    let bus = existing_bus(repo, new_schedule.bus_id)?;
    Ok((new_schedule, bus))
}

pub fn create_schedule<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: ScheduleForm,
) -> ServiceResult<BusSchedule>
where
    R: RouteReader + RouteWriter + BusReader + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;

    let (new_schedule, _) = checked_schedule(repo, form)?;
    let schedule = repo.create_schedule(&new_schedule).map_err(|err| {
        log::error!("Failed to create schedule: {err}");
        err
    })?;

    Ok(schedule)
}

pub fn update_schedule<R>(
    repo: &R,
    user: &AuthenticatedUser,
    schedule_id: i32,
    form: ScheduleForm,
) -> ServiceResult<BusSchedule>
where
    R: RouteReader + RouteWriter + BusReader + PassengerReader + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;

    let (current, _) = get_schedule(repo, schedule_id)?;
    let (new_schedule, bus) = checked_schedule(repo, form)?;
    if new_schedule.bus_id != current.bus_id {
        let highest = repo.list_occupied_bus_seats(current.id)?.into_iter().max();
        ensure_seats_fit(Some(&bus), highest)?;
    }

    let schedule_id: ScheduleId = current.id;
    let schedule = repo
        .update_schedule(schedule_id, &new_schedule)
        .map_err(|err| {
            log::error!("Failed to update schedule {schedule_id}: {err}");
            err
        })?;

    Ok(schedule)
}

#[cfg(all(test, feature = "test-mocks"))]
mod tests {
    use super::*;
    use crate::domain::pricing::NightlyRoomCosts;
    use crate::domain::seat_map::SeatLayout;
    use crate::domain::types::{BusName, HotelName, PlaceName};
    use crate::repository::mock::MockRepository;
    use crate::services::booking::tests::{money, sample_bus, sample_tour, seats};
    use crate::services::bus_booking::tests::{sample_route, sample_schedule};

    fn admin_user() -> AuthenticatedUser {
        AuthenticatedUser {
            sub: "1".to_string(),
            email: "admin@example.com".to_string(),
            name: "Admin".to_string(),
            roles: vec![SERVICE_ADMIN_ROLE.to_string()],
            exp: 0,
        }
    }

    fn small_bus() -> Bus {
        Bus {
            id: BusId::new(2).unwrap(),
            name: BusName::new("Van").unwrap(),
            plate: None,
            layout: SeatLayout::parse(&["SS_S", "SS_S"]).unwrap(),
        }
    }

    fn bus_form(capacity: u16) -> BusForm {
        BusForm {
            name: "Unidad 1".to_string(),
            plate: None,
            capacity,
            layout: String::new(),
        }
    }

    fn tour_form(bus_id: &str) -> TourForm {
        TourForm {
            name: "Huasteca".to_string(),
            destination: "Xilitla".to_string(),
            description: None,
            departure_date: "2026-11-20".to_string(),
            return_date: "2026-11-23".to_string(),
            bus_id: Some(bus_id.to_string()),
            rate_double: "4000".to_string(),
            rate_triple: "3500".to_string(),
            rate_quad: "3000".to_string(),
            rate_child: "2000".to_string(),
            published: Some("on".to_string()),
        }
    }

    #[test]
    fn shrinking_a_bus_below_assigned_seats_is_refused() {
        let mut repo = MockRepository::new();
        repo.expect_get_bus_by_id()
            .returning(|_| Ok(Some(sample_bus())));
        repo.expect_max_assigned_seat()
            .returning(|_| Ok(Some(SeatNumber::new(11).unwrap())));
        repo.expect_update_bus().times(0);

        let result = update_bus(&repo, &admin_user(), 1, bus_form(8));

        assert!(matches!(result, Err(ServiceError::Form(_))));
    }

    #[test]
    fn growing_a_bus_is_allowed() {
        let mut repo = MockRepository::new();
        repo.expect_get_bus_by_id()
            .returning(|_| Ok(Some(sample_bus())));
        repo.expect_max_assigned_seat()
            .returning(|_| Ok(Some(SeatNumber::new(11).unwrap())));
        repo.expect_update_bus()
            .withf(|_, bus| bus.capacity() == 44)
            .times(1)
            .returning(|_, _| Ok(sample_bus()));

        assert!(update_bus(&repo, &admin_user(), 1, bus_form(44)).is_ok());
    }

    #[test]
    fn moving_a_tour_to_a_smaller_bus_is_refused() {
        let mut repo = MockRepository::new();
        repo.expect_get_tour_by_id()
            .returning(|_| Ok(Some(sample_tour())));
        repo.expect_get_bus_by_id()
            .returning(|_| Ok(Some(small_bus())));
        repo.expect_list_occupied_tour_seats()
            .returning(|_| Ok(seats(&[2, 9])));
        repo.expect_update_tour().times(0);

        let result = update_tour(&repo, &admin_user(), 1, tour_form("2"));

        assert!(matches!(result, Err(ServiceError::Form(_))));
    }

    #[test]
    fn moving_a_departure_to_a_smaller_bus_is_refused() {
        let mut repo = MockRepository::new();
        repo.expect_get_schedule_by_id()
            .returning(|_| Ok(Some(sample_schedule(true))));
        repo.expect_get_route_by_id()
            .returning(|_| Ok(Some(sample_route())));
        repo.expect_get_bus_by_id()
            .returning(|_| Ok(Some(small_bus())));
        repo.expect_list_occupied_bus_seats()
            .returning(|_| Ok(seats(&[12])));
        repo.expect_update_schedule().times(0);

        let form = ScheduleForm {
            route_id: 2,
            bus_id: 2,
            departure: "2026-12-01T07:30".to_string(),
            active: Some("on".to_string()),
        };
        let result = update_schedule(&repo, &admin_user(), 3, form);

        assert!(matches!(result, Err(ServiceError::Form(_))));
    }

    #[test]
    fn tour_with_unknown_bus_is_refused() {
        let mut repo = MockRepository::new();
        repo.expect_get_bus_by_id().returning(|_| Ok(None));
        repo.expect_create_tour().times(0);

        let result = create_tour(&repo, &admin_user(), tour_form("9"));

        assert!(matches!(result, Err(ServiceError::Form(_))));
    }

    #[test]
    fn hotel_quote_multiplies_rooms_by_nights() {
        let mut repo = MockRepository::new();
        repo.expect_get_hotel_by_id().returning(|_| {
            Ok(Some(Hotel {
                id: HotelId::new(1).unwrap(),
                name: HotelName::new("Posada").unwrap(),
                city: PlaceName::new("Xilitla").unwrap(),
                costs: NightlyRoomCosts {
                    double: money(900),
                    triple: money(1100),
                    quad: money(1300),
                },
            }))
        });

        let form = HotelQuoteForm {
            hotel_id: 1,
            adults: 4,
            children: 2,
            nights: 3,
            rooms_double: 0,
            rooms_triple: 0,
            rooms_quad: 0,
        };
        let data = hotel_quote(&repo, &admin_user(), form).unwrap();

        // Six people: a quad and a double.
        assert_eq!(data.rooms.len(), 2);
        assert_eq!(data.quote.total, money((1300 + 900) * 3));
    }
}
