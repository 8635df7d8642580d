//! Back-office management of tour reservations.

use crate::SERVICE_ADMIN_ROLE;
use crate::auth::{AuthenticatedUser, ensure_role};
use crate::domain::client::{Client, UpdateClient};
use crate::domain::occupancy::RoomSplit;
use crate::domain::pricing::{deposit, quote_tour};
use crate::domain::tour::Tour;
use crate::domain::types::{BookingStatus, ClientId, Money};
use crate::dto::booking::SeatMapView;
use crate::dto::clients::{ClientPageData, ClientsPageData, ClientsQuery, ManifestRow};
use crate::forms::clients::{ClientForm, ClientPayload, PaymentForm, StatusForm};
use crate::forms::format_seat_list;
use crate::pagination::{DEFAULT_ITEMS_PER_PAGE, Paginated};
use crate::repository::{
    BusReader, ClientListQuery, ClientReader, ClientWriter, ProviderReader, SettingsReader,
    TourReader,
};
use crate::services::booking::{get_tour, selected_extras, tour_seat_map};
use crate::services::{ServiceError, ServiceResult, normalize_search};

fn get_client<R>(repo: &R, client_id: i32) -> ServiceResult<Client>
where
    R: ClientReader + ?Sized,
{
    let client_id = ClientId::new(client_id).map_err(|_| ServiceError::NotFound)?;
    repo.get_client_by_id(client_id)?
        .ok_or(ServiceError::NotFound)
}

fn parse_status_filter(status: Option<String>) -> ServiceResult<Option<BookingStatus>> {
    normalize_search(status)
        .map(|s| {
            s.parse()
                .map_err(|_| ServiceError::Form(format!("Unknown status: {s}")))
        })
        .transpose()
}

/// Loads one page of a tour's reservations.
pub fn list_clients<R>(
    repo: &R,
    user: &AuthenticatedUser,
    tour_id: i32,
    query: ClientsQuery,
) -> ServiceResult<ClientsPageData>
where
    R: TourReader + BusReader + ClientReader + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;

    let tour = get_tour(repo, tour_id)?;
    let page = query.page.unwrap_or(1).max(1);
    let mut list_query = ClientListQuery::new(tour.id).paginate(page, DEFAULT_ITEMS_PER_PAGE);

    let status = parse_status_filter(query.status)?;
    if let Some(status) = status {
        list_query = list_query.status(status);
    }
    let search_query = normalize_search(query.search);
    if let Some(term) = &search_query {
        list_query = list_query.search(term.clone());
    }

    let (total, clients) = repo.list_clients(list_query).map_err(|err| {
        log::error!("Failed to list clients of tour {}: {err}", tour.id);
        err
    })?;
    let seats_available = tour_seat_map(repo, &tour, &[])?.map(|map| map.available_count());

    Ok(ClientsPageData {
        tour,
        clients: Paginated::new(clients, page, total),
        search_query,
        status_filter: status.map(|s| s.as_str().to_string()),
        seats_available,
    })
}

/// Loads a reservation with its seats, rooms and add-ons for the editor.
pub fn load_client<R>(
    repo: &R,
    user: &AuthenticatedUser,
    client_id: i32,
) -> ServiceResult<ClientPageData>
where
    R: TourReader + BusReader + ClientReader + ProviderReader + SettingsReader + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;

    let client = get_client(repo, client_id)?;
    let tour = get_tour(repo, client.tour_id.get())?;
    let seats = repo.list_client_seats(client.id)?;
    let seat_map = tour_seat_map(repo, &tour, &[])?;
    let rooms = RoomSplit::manual(client.roster, client.rooms)
        .map(|split| split.rooms().to_vec())
        .unwrap_or_default();
    let extras = repo.list_providers(false)?;
    let selected_extras = repo.list_client_extras(client.id)?;
    let settings = repo.get_agency_settings()?;

    Ok(ClientPageData {
        deposit: deposit(client.total, settings.deposit_percent),
        client,
        tour,
        seats,
        seat_map: seat_map.as_ref().map(SeatMapView::from),
        rooms,
        extras,
        selected_extras,
        currency: settings.currency,
    })
}

/// Replaces contact data, travellers, rooms, seats and add-ons, then reprices.
///
/// The client's own seats count as free while the new selection is checked.
/// An empty selection keeps the current seats when the party size did not
/// change and assigns new ones otherwise.
pub fn update_client<R>(
    repo: &R,
    user: &AuthenticatedUser,
    client_id: i32,
    form: ClientForm,
) -> ServiceResult<Client>
where
    R: TourReader + BusReader + ClientReader + ClientWriter + ProviderReader + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;

    let payload = ClientPayload::try_from(form)?;
    let client = get_client(repo, client_id)?;
    if client.status == BookingStatus::Cancelled {
        return Err(ServiceError::Form(
            "Cancelled reservations cannot be edited".to_string(),
        ));
    }
    let tour = get_tour(repo, client.tour_id.get())?;

    let own_seats = repo.list_client_seats(client.id)?;
    let party = payload.roster.total();
    let seats = match tour_seat_map(repo, &tour, &own_seats)? {
        Some(_) if payload.seats.is_empty() && own_seats.len() == party as usize => own_seats,
        Some(map) if payload.seats.is_empty() => map.allocate(party)?,
        Some(map) => map.validate_selection(&payload.seats, party)?,
        None if payload.seats.is_empty() => Vec::new(),
        None => {
            return Err(ServiceError::Form(
                "This tour has no bus to assign seats on".to_string(),
            ));
        }
    };

    let split = match payload.rooms {
        Some(counts) => RoomSplit::manual(payload.roster, counts)?,
        None => RoomSplit::auto(payload.roster)?,
    };
    let extras = selected_extras(repo, &payload.extras, false)?;
    let extra_prices: Vec<_> = extras.iter().map(|p| p.as_extra()).collect();
    let quote = quote_tour(&tour.rates, &split, &extra_prices)?;

    let updates = UpdateClient {
        contact: payload.contact,
        roster: payload.roster,
        rooms: split.counts(),
        total: quote.total,
        notes: payload.notes,
        seats,
        extras: payload.extras,
    };

    let updated = repo.update_client(client.id, &updates).map_err(|err| {
        log::error!("Failed to update client {}: {err}", client.id);
        err
    })?;

    Ok(updated)
}

pub fn record_payment<R>(
    repo: &R,
    user: &AuthenticatedUser,
    client_id: i32,
    form: PaymentForm,
) -> ServiceResult<Client>
where
    R: ClientReader + ClientWriter + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;

    let amount = Money::try_from(form)?;
    let client = get_client(repo, client_id)?;
    if client.status == BookingStatus::Cancelled {
        return Err(ServiceError::Form(
            "Payments cannot be recorded on a cancelled reservation".to_string(),
        ));
    }

    let updated = repo
        .record_client_payment(client.id, amount)
        .map_err(|err| {
            log::error!("Failed to record payment for client {}: {err}", client.id);
            err
        })?;

    log::info!("Recorded payment of {amount} for folio {}", updated.folio);

    Ok(updated)
}

/// Moves a reservation through its lifecycle. Cancelling releases its
/// seats, so a cancelled reservation is final.
pub fn change_status<R>(
    repo: &R,
    user: &AuthenticatedUser,
    client_id: i32,
    form: StatusForm,
) -> ServiceResult<Client>
where
    R: ClientReader + ClientWriter + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;

    let status = BookingStatus::try_from(form)?;
    let client = get_client(repo, client_id)?;
    if client.status == status {
        return Ok(client);
    }
    if client.status == BookingStatus::Cancelled {
        return Err(ServiceError::Form(
            "A cancelled reservation cannot be reinstated".to_string(),
        ));
    }

    let updated = repo.set_client_status(client.id, status).map_err(|err| {
        log::error!("Failed to change status of client {}: {err}", client.id);
        err
    })?;

    Ok(updated)
}

/// Passenger manifest of a tour as CSV, cancelled reservations left out.
pub fn export_manifest<R>(
    repo: &R,
    user: &AuthenticatedUser,
    tour_id: i32,
) -> ServiceResult<(Tour, String)>
where
    R: TourReader + ClientReader + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;

    let tour = get_tour(repo, tour_id)?;
    let (_, clients) = repo
        .list_clients(ClientListQuery::new(tour.id))
        .map_err(|err| {
            log::error!("Failed to load manifest of tour {}: {err}", tour.id);
            err
        })?;

    let mut writer = csv::Writer::from_writer(Vec::new());
    for client in clients.iter().filter(|c| c.status.holds_seats()) {
        let seats = repo.list_client_seats(client.id)?;
        writer
            .serialize(ManifestRow {
                folio: client.folio.to_string(),
                name: client.contact.name.to_string(),
                email: client.contact.email.to_string(),
                phone: client
                    .contact
                    .phone
                    .as_ref()
                    .map(|p| p.to_string())
                    .unwrap_or_default(),
                adults: client.roster.adults(),
                children: client.roster.children(),
                seats: format_seat_list(&seats),
                status: client.status.to_string(),
                total: client.total.to_string(),
                paid: client.paid.to_string(),
                balance: client.balance().to_string(),
            })
            .map_err(|e| ServiceError::Internal(e.to_string()))?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| ServiceError::Internal(e.to_string()))?;
    let csv = String::from_utf8(bytes).map_err(|e| ServiceError::Internal(e.to_string()))?;

    Ok((tour, csv))
}

#[cfg(all(test, feature = "test-mocks"))]
mod tests {
    use super::*;
    use crate::domain::client::NewClient;
    use crate::domain::occupancy::{RoomCounts, Roster};
    use crate::domain::types::{Folio, TourId};
    use crate::repository::mock::MockRepository;
    use crate::services::booking::tests::{
        money, sample_bus, sample_client, sample_contact, sample_tour, seats,
    };

    fn admin_user() -> AuthenticatedUser {
        AuthenticatedUser {
            sub: "1".to_string(),
            email: "admin@example.com".to_string(),
            name: "Admin".to_string(),
            roles: vec![SERVICE_ADMIN_ROLE.to_string()],
            exp: 0,
        }
    }

    fn agent_user() -> AuthenticatedUser {
        AuthenticatedUser {
            sub: "2".to_string(),
            email: "agent@example.com".to_string(),
            name: "Agent".to_string(),
            roles: vec!["agency".to_string()],
            exp: 0,
        }
    }

    fn existing_client(status: BookingStatus) -> Client {
        let mut client = sample_client(&NewClient {
            tour_id: TourId::new(1).unwrap(),
            folio: Folio::new(),
            contact: sample_contact(),
            roster: Roster::new(2, 0).unwrap(),
            rooms: RoomCounts::new(1, 0, 0),
            total: money(8000),
            status,
            notes: None,
            seats: seats(&[5, 6]),
            extras: vec![],
        });
        client.paid = money(1000);
        client
    }

    fn client_form(adults: u32, seats: &str) -> ClientForm {
        ClientForm {
            name: "Ana".to_string(),
            email: "ana@example.com".to_string(),
            phone: None,
            adults,
            children: 0,
            rooms_double: 0,
            rooms_triple: 0,
            rooms_quad: 0,
            seats: seats.to_string(),
            extras: vec![],
            notes: None,
        }
    }

    fn editor_repo(status: BookingStatus, occupied: Vec<i32>) -> MockRepository {
        let mut repo = MockRepository::new();
        repo.expect_get_client_by_id()
            .returning(move |_| Ok(Some(existing_client(status))));
        repo.expect_get_tour_by_id()
            .returning(|_| Ok(Some(sample_tour())));
        repo.expect_get_bus_by_id()
            .returning(|_| Ok(Some(sample_bus())));
        repo.expect_list_client_seats()
            .returning(|_| Ok(seats(&[5, 6])));
        repo.expect_list_occupied_tour_seats()
            .returning(move |_| Ok(seats(&occupied)));
        repo
    }

    #[test]
    fn listing_requires_admin_role() {
        let mut repo = MockRepository::new();
        repo.expect_list_clients().times(0);

        let result = list_clients(&repo, &agent_user(), 1, ClientsQuery::default());

        assert!(matches!(result, Err(ServiceError::Unauthorized)));
    }

    #[test]
    fn own_seats_can_be_kept_and_extended() {
        let mut repo = editor_repo(BookingStatus::Confirmed, vec![1, 5, 6]);
        repo.expect_update_client()
            .withf(|_, updates| {
                updates.seats == seats(&[5, 6, 7]) && updates.rooms == RoomCounts::new(0, 1, 0)
            })
            .times(1)
            .returning(|_, _| Ok(existing_client(BookingStatus::Confirmed)));

        let result = update_client(&repo, &admin_user(), 7, client_form(3, "5, 6, 7"));

        assert!(result.is_ok());
    }

    #[test]
    fn empty_selection_keeps_current_seats() {
        let mut repo = editor_repo(BookingStatus::Pending, vec![5, 6]);
        repo.expect_update_client()
            .withf(|_, updates| updates.seats == seats(&[5, 6]) && updates.total == money(8000))
            .times(1)
            .returning(|_, _| Ok(existing_client(BookingStatus::Pending)));

        let result = update_client(&repo, &admin_user(), 7, client_form(2, ""));

        assert!(result.is_ok());
    }

    #[test]
    fn seats_of_other_clients_are_refused() {
        let mut repo = editor_repo(BookingStatus::Pending, vec![1, 5, 6]);
        repo.expect_update_client().times(0);

        let result = update_client(&repo, &admin_user(), 7, client_form(2, "1, 5"));

        assert!(matches!(result, Err(ServiceError::SeatTaken)));
    }

    #[test]
    fn manual_rooms_must_hold_the_party() {
        let mut repo = editor_repo(BookingStatus::Pending, vec![5, 6]);
        repo.expect_update_client().times(0);
        let mut form = client_form(3, "");
        form.rooms_double = 1;

        let result = update_client(&repo, &admin_user(), 7, form);

        assert!(matches!(result, Err(ServiceError::Form(_))));
    }

    #[test]
    fn cancelled_reservations_stay_cancelled() {
        let mut repo = editor_repo(BookingStatus::Cancelled, vec![]);
        repo.expect_set_client_status().times(0);

        let result = change_status(
            &repo,
            &admin_user(),
            7,
            StatusForm {
                status: "confirmed".to_string(),
            },
        );

        assert!(matches!(result, Err(ServiceError::Form(_))));
    }

    #[test]
    fn cancelling_goes_through_the_repository() {
        let mut repo = editor_repo(BookingStatus::Pending, vec![5, 6]);
        repo.expect_set_client_status()
            .withf(|_, status| *status == BookingStatus::Cancelled)
            .times(1)
            .returning(|_, _| Ok(existing_client(BookingStatus::Cancelled)));

        let client = change_status(
            &repo,
            &admin_user(),
            7,
            StatusForm {
                status: "cancelled".to_string(),
            },
        )
        .unwrap();

        assert_eq!(client.status, BookingStatus::Cancelled);
    }

    #[test]
    fn payments_are_added() {
        let mut repo = editor_repo(BookingStatus::Pending, vec![]);
        repo.expect_record_client_payment()
            .withf(|_, amount| *amount == money(500))
            .times(1)
            .returning(|_, _| Ok(existing_client(BookingStatus::Pending)));

        let result = record_payment(
            &repo,
            &admin_user(),
            7,
            PaymentForm {
                amount: "500".to_string(),
            },
        );

        assert!(result.is_ok());
    }

    #[test]
    fn manifest_skips_cancelled_reservations() {
        let mut repo = editor_repo(BookingStatus::Pending, vec![]);
        repo.expect_list_clients().returning(|_| {
            Ok((
                2,
                vec![
                    existing_client(BookingStatus::Confirmed),
                    existing_client(BookingStatus::Cancelled),
                ],
            ))
        });

        let (_, csv) = export_manifest(&repo, &admin_user(), 1).unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("folio,name,email"));
        assert!(lines[1].contains("5 6"));
        assert!(lines[1].contains("8000.00,1000.00,7000.00"));
    }
}
