//! Back-office management of bus-only reservations.

use crate::SERVICE_ADMIN_ROLE;
use crate::auth::{AuthenticatedUser, ensure_role};
use crate::domain::bus_passenger::{BusPassenger, UpdateBusPassenger};
use crate::domain::pricing::{deposit, quote_bus};
use crate::domain::types::{BookingStatus, Money, PassengerId};
use crate::dto::booking::SeatMapView;
use crate::dto::passengers::{PassengerPageData, PassengersPageData, PassengersQuery};
use crate::forms::clients::{PaymentForm, StatusForm};
use crate::forms::passengers::{PassengerForm, PassengerPayload};
use crate::pagination::{DEFAULT_ITEMS_PER_PAGE, Paginated};
use crate::repository::{
    BusReader, PassengerListQuery, PassengerReader, PassengerWriter, RouteReader, SettingsReader,
};
use crate::services::bus_booking::{get_schedule, schedule_seat_map};
use crate::services::{ServiceError, ServiceResult, normalize_search};

fn get_passenger<R>(repo: &R, passenger_id: i32) -> ServiceResult<BusPassenger>
where
    R: PassengerReader + ?Sized,
{
    let passenger_id = PassengerId::new(passenger_id).map_err(|_| ServiceError::NotFound)?;
    repo.get_passenger_by_id(passenger_id)?
        .ok_or(ServiceError::NotFound)
}

pub fn list_passengers<R>(
    repo: &R,
    user: &AuthenticatedUser,
    schedule_id: i32,
    query: PassengersQuery,
) -> ServiceResult<PassengersPageData>
where
    R: RouteReader + BusReader + PassengerReader + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;

    let (schedule, route) = get_schedule(repo, schedule_id)?;
    let page = query.page.unwrap_or(1).max(1);
    let mut list_query =
        PassengerListQuery::new(schedule.id).paginate(page, DEFAULT_ITEMS_PER_PAGE);
    let search_query = normalize_search(query.search);
    if let Some(term) = &search_query {
        list_query = list_query.search(term.clone());
    }

    let (total, passengers) = repo.list_passengers(list_query).map_err(|err| {
        log::error!("Failed to list passengers of schedule {}: {err}", schedule.id);
        err
    })?;
    let seats_available = schedule_seat_map(repo, &schedule, &[])?.available_count();

    Ok(PassengersPageData {
        schedule,
        route,
        passengers: Paginated::new(passengers, page, total),
        search_query,
        seats_available,
    })
}

pub fn load_passenger<R>(
    repo: &R,
    user: &AuthenticatedUser,
    passenger_id: i32,
) -> ServiceResult<PassengerPageData>
where
    R: RouteReader + BusReader + PassengerReader + SettingsReader + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;

    let passenger = get_passenger(repo, passenger_id)?;
    let (schedule, route) = get_schedule(repo, passenger.schedule_id.get())?;
    let seats = repo.list_passenger_seats(passenger.id)?;
    let seat_map = schedule_seat_map(repo, &schedule, &[])?;
    let settings = repo.get_agency_settings()?;

    Ok(PassengerPageData {
        deposit: deposit(passenger.total, settings.deposit_percent),
        passenger,
        schedule,
        route,
        seats,
        seat_map: SeatMapView::from(&seat_map),
        currency: settings.currency,
    })
}

/// Same seat rules as the tour client editor.
pub fn update_passenger<R>(
    repo: &R,
    user: &AuthenticatedUser,
    passenger_id: i32,
    form: PassengerForm,
) -> ServiceResult<BusPassenger>
where
    R: RouteReader + BusReader + PassengerReader + PassengerWriter + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;

    let payload = PassengerPayload::try_from(form)?;
    let passenger = get_passenger(repo, passenger_id)?;
    if passenger.status == BookingStatus::Cancelled {
        return Err(ServiceError::Form(
            "Cancelled reservations cannot be edited".to_string(),
        ));
    }
    let (schedule, route) = get_schedule(repo, passenger.schedule_id.get())?;

    let own_seats = repo.list_passenger_seats(passenger.id)?;
    let seat_map = schedule_seat_map(repo, &schedule, &own_seats)?;
    let party = payload.roster.total();
    let seats = if payload.seats.is_empty() && own_seats.len() == party as usize {
        own_seats
    } else if payload.seats.is_empty() {
        seat_map.allocate(party)?
    } else {
        seat_map.validate_selection(&payload.seats, party)?
    };

    let quote = quote_bus(&route.fare, payload.roster)?;
    let updates = UpdateBusPassenger {
        contact: payload.contact,
        roster: payload.roster,
        total: quote.total,
        notes: payload.notes,
        seats,
    };

    let updated = repo
        .update_passenger(passenger.id, &updates)
        .map_err(|err| {
            log::error!("Failed to update passenger {}: {err}", passenger.id);
            err
        })?;

    Ok(updated)
}

pub fn record_passenger_payment<R>(
    repo: &R,
    user: &AuthenticatedUser,
    passenger_id: i32,
    form: PaymentForm,
) -> ServiceResult<BusPassenger>
where
    R: PassengerReader + PassengerWriter + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;

    let amount = Money::try_from(form)?;
    let passenger = get_passenger(repo, passenger_id)?;
    if passenger.status == BookingStatus::Cancelled {
        return Err(ServiceError::Form(
            "Payments cannot be recorded on a cancelled reservation".to_string(),
        ));
    }

    let updated = repo
        .record_passenger_payment(passenger.id, amount)
        .map_err(|err| {
            log::error!("Failed to record payment for passenger {}: {err}", passenger.id);
            err
        })?;

    log::info!("Recorded payment of {amount} for folio {}", updated.folio);

    Ok(updated)
}

pub fn change_passenger_status<R>(
    repo: &R,
    user: &AuthenticatedUser,
    passenger_id: i32,
    form: StatusForm,
) -> ServiceResult<BusPassenger>
where
    R: PassengerReader + PassengerWriter + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;

    let status = BookingStatus::try_from(form)?;
    let passenger = get_passenger(repo, passenger_id)?;
    if passenger.status == status {
        return Ok(passenger);
    }
    if passenger.status == BookingStatus::Cancelled {
        return Err(ServiceError::Form(
            "A cancelled reservation cannot be reinstated".to_string(),
        ));
    }

    let updated = repo
        .set_passenger_status(passenger.id, status)
        .map_err(|err| {
            log::error!("Failed to change status of passenger {}: {err}", passenger.id);
            err
        })?;

    Ok(updated)
}

#[cfg(all(test, feature = "test-mocks"))]
mod tests {
    use super::*;
    use crate::domain::bus_passenger::NewBusPassenger;
    use crate::domain::occupancy::Roster;
    use crate::domain::types::{Folio, ScheduleId};
    use crate::repository::mock::MockRepository;
    use crate::services::booking::tests::{money, sample_bus, sample_contact, seats};
    use crate::services::bus_booking::tests::{sample_passenger, sample_route, sample_schedule};

    fn admin_user() -> AuthenticatedUser {
        AuthenticatedUser {
            sub: "1".to_string(),
            email: "admin@example.com".to_string(),
            name: "Admin".to_string(),
            roles: vec![SERVICE_ADMIN_ROLE.to_string()],
            exp: 0,
        }
    }

    fn existing_passenger(status: BookingStatus) -> BusPassenger {
        sample_passenger(&NewBusPassenger {
            schedule_id: ScheduleId::new(3).unwrap(),
            folio: Folio::new(),
            contact: sample_contact(),
            roster: Roster::new(1, 0).unwrap(),
            total: money(600),
            status,
            notes: None,
            seats: seats(&[4]),
        })
    }

    fn editor_repo(status: BookingStatus) -> MockRepository {
        let mut repo = MockRepository::new();
        repo.expect_get_passenger_by_id()
            .returning(move |_| Ok(Some(existing_passenger(status))));
        repo.expect_get_schedule_by_id()
            .returning(|_| Ok(Some(sample_schedule(true))));
        repo.expect_get_route_by_id()
            .returning(|_| Ok(Some(sample_route())));
        repo.expect_get_bus_by_id()
            .returning(|_| Ok(Some(sample_bus())));
        repo.expect_list_passenger_seats()
            .returning(|_| Ok(seats(&[4])));
        repo.expect_list_occupied_bus_seats()
            .returning(|_| Ok(seats(&[1, 2, 4])));
        repo
    }

    fn passenger_form(adults: u32, children: u32, seats: &str) -> PassengerForm {
        PassengerForm {
            name: "Ana".to_string(),
            email: "ana@example.com".to_string(),
            phone: None,
            adults,
            children,
            seats: seats.to_string(),
            notes: None,
        }
    }

    #[test]
    fn growing_party_gets_new_seats_and_price() {
        let mut repo = editor_repo(BookingStatus::Pending);
        repo.expect_update_passenger()
            .withf(|_, updates| {
                // Own seat 4 is free again, so 3 and 4 form the first block.
                updates.seats == seats(&[3, 4]) && updates.total == money(600 + 450)
            })
            .times(1)
            .returning(|_, _| Ok(existing_passenger(BookingStatus::Pending)));

        let result = update_passenger(&repo, &admin_user(), 11, passenger_form(1, 1, ""));

        assert!(result.is_ok());
    }

    #[test]
    fn cancelled_passenger_cannot_pay() {
        let mut repo = editor_repo(BookingStatus::Cancelled);
        repo.expect_record_passenger_payment().times(0);

        let result = record_passenger_payment(
            &repo,
            &admin_user(),
            11,
            PaymentForm {
                amount: "100".to_string(),
            },
        );

        assert!(matches!(result, Err(ServiceError::Form(_))));
    }
}
