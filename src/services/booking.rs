//! Public tour booking: seat map, quotes and reservations.

use crate::domain::client::NewClient;
use crate::domain::occupancy::RoomSplit;
use crate::domain::pricing::{Extra, balance, deposit, quote_tour};
use crate::domain::provider::Provider;
use crate::domain::seat_map::SeatMap;
use crate::domain::tour::Tour;
use crate::domain::types::{BookingStatus, Folio, ProviderId, SeatNumber, TourId};
use crate::dto::booking::{
    BookingConfirmation, BookingLookup, QuoteResponse, SeatMapView, TourBookingData,
    ToursResponse, TripKind,
};
use crate::dto::catalog::ToursQuery;
use crate::forms::booking::{
    TourBookingForm, TourBookingPayload, TourQuoteForm, TourQuotePayload,
};
use crate::pagination::DEFAULT_ITEMS_PER_PAGE;
use crate::repository::{
    BusReader, ClientReader, ClientWriter, PassengerReader, ProviderReader, RouteReader,
    SettingsReader, TourListQuery, TourReader,
};
use crate::services::{ServiceError, ServiceResult, normalize_search};

/// Published tours for the public catalog, newest departures last.
pub fn list_published_tours<R>(repo: &R, query: ToursQuery) -> ServiceResult<ToursResponse>
where
    R: TourReader + ?Sized,
{
    let page = query.page.unwrap_or(1).max(1);
    let mut list_query = TourListQuery::new()
        .published()
        .paginate(page, DEFAULT_ITEMS_PER_PAGE);
    if let Some(term) = normalize_search(query.search) {
        list_query = list_query.search(term);
    }

    let (total, tours) = repo.list_tours(list_query).map_err(|err| {
        log::error!("Failed to list published tours: {err}");
        err
    })?;

    Ok(ToursResponse { total, page, tours })
}

pub(crate) fn get_tour<R>(repo: &R, tour_id: i32) -> ServiceResult<Tour>
where
    R: TourReader + ?Sized,
{
    let tour_id = TourId::new(tour_id).map_err(|_| ServiceError::NotFound)?;
    repo.get_tour_by_id(tour_id)?.ok_or(ServiceError::NotFound)
}

fn published_tour<R>(repo: &R, tour_id: i32) -> ServiceResult<Tour>
where
    R: TourReader + ?Sized,
{
    let tour = get_tour(repo, tour_id)?;
    if !tour.published {
        return Err(ServiceError::NotFound);
    }
    Ok(tour)
}

/// Seat map of a tour's bus; `released` seats are shown as free.
///
/// Returns `None` while the tour has no bus.
pub(crate) fn tour_seat_map<R>(
    repo: &R,
    tour: &Tour,
    released: &[SeatNumber],
) -> ServiceResult<Option<SeatMap>>
where
    R: BusReader + ClientReader + ?Sized,
{
    let Some(bus_id) = tour.bus_id else {
        return Ok(None);
    };
    let bus = repo.get_bus_by_id(bus_id)?.ok_or_else(|| {
        log::error!("Tour {} references missing bus {bus_id}", tour.id);
        ServiceError::Internal(format!("bus {bus_id} not found"))
    })?;
    let occupied = repo
        .list_occupied_tour_seats(tour.id)?
        .into_iter()
        .filter(|seat| !released.contains(seat));
    Ok(Some(SeatMap::new(bus.layout, occupied)))
}

/// Loads the chosen add-ons, rejecting unknown ones and, for the public
/// site, inactive ones.
pub(crate) fn selected_extras<R>(
    repo: &R,
    ids: &[ProviderId],
    active_only: bool,
) -> ServiceResult<Vec<Provider>>
where
    R: ProviderReader + ?Sized,
{
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    let providers = repo.list_providers_by_ids(ids)?;
    if providers.len() != ids.len() || (active_only && providers.iter().any(|p| !p.active)) {
        return Err(ServiceError::Form(
            "An unknown or unavailable add-on was selected".to_string(),
        ));
    }
    Ok(providers)
}

fn as_extras(providers: &[Provider]) -> Vec<Extra> {
    providers.iter().map(Provider::as_extra).collect()
}

/// Tour, seat map and add-ons for the booking page.
pub fn load_tour_booking<R>(repo: &R, tour_id: i32) -> ServiceResult<TourBookingData>
where
    R: TourReader + BusReader + ClientReader + ProviderReader + SettingsReader + ?Sized,
{
    let tour = published_tour(repo, tour_id)?;
    let seat_map = tour_seat_map(repo, &tour, &[])?;
    let extras = repo.list_providers(true)?;
    let settings = repo.get_agency_settings()?;

    Ok(TourBookingData {
        nights: tour.nights(),
        seat_map: seat_map.as_ref().map(SeatMapView::from),
        tour,
        extras,
        currency: settings.currency,
        deposit_percent: settings.deposit_percent.get(),
    })
}

/// Prices a party without reserving anything.
pub fn quote_tour_booking<R>(
    repo: &R,
    tour_id: i32,
    form: TourQuoteForm,
) -> ServiceResult<QuoteResponse>
where
    R: TourReader + ProviderReader + SettingsReader + ?Sized,
{
    let payload = TourQuotePayload::try_from(form)?;
    let tour = published_tour(repo, tour_id)?;
    let split = RoomSplit::auto(payload.roster)?;
    let extras = selected_extras(repo, &payload.extras, true)?;
    let quote = quote_tour(&tour.rates, &split, &as_extras(&extras))?;
    let settings = repo.get_agency_settings()?;

    Ok(QuoteResponse {
        rooms: split.rooms().to_vec(),
        deposit: deposit(quote.total, settings.deposit_percent),
        quote,
        currency: settings.currency,
    })
}

/// Reserves seats on a tour.
///
/// Without a seat selection the seats are assigned automatically. The client
/// row and its seats are written in one transaction; a seat taken by a
/// concurrent booking surfaces as [`ServiceError::SeatTaken`].
pub fn book_tour<R>(
    repo: &R,
    tour_id: i32,
    form: TourBookingForm,
) -> ServiceResult<BookingConfirmation>
where
    R: TourReader
        + BusReader
        + ClientReader
        + ClientWriter
        + ProviderReader
        + SettingsReader
        + ?Sized,
{
    let payload = TourBookingPayload::try_from(form)?;
    let tour = published_tour(repo, tour_id)?;
    let Some(seat_map) = tour_seat_map(repo, &tour, &[])? else {
        return Err(ServiceError::Form(
            "Seats are not on sale for this tour yet".to_string(),
        ));
    };

    let party = payload.roster.total();
    let seats = if payload.seats.is_empty() {
        seat_map.allocate(party)?
    } else {
        seat_map.validate_selection(&payload.seats, party)?
    };

    let split = RoomSplit::auto(payload.roster)?;
    let extras = selected_extras(repo, &payload.extras, true)?;
    let quote = quote_tour(&tour.rates, &split, &as_extras(&extras))?;
    let settings = repo.get_agency_settings()?;

    let new_client = NewClient {
        tour_id: tour.id,
        folio: Folio::new(),
        contact: payload.contact,
        roster: payload.roster,
        rooms: split.counts(),
        total: quote.total,
        status: BookingStatus::Pending,
        notes: payload.notes,
        seats: seats.clone(),
        extras: payload.extras,
    };

    let client = repo.create_client(&new_client).map_err(|err| {
        log::error!("Failed to book tour {}: {err}", tour.id);
        err
    })?;

    log::info!(
        "Tour {} booked under folio {} ({} travellers)",
        tour.id,
        client.folio,
        party
    );

    Ok(BookingConfirmation {
        folio: client.folio,
        status: client.status,
        seats,
        rooms: split.rooms().to_vec(),
        total: client.total,
        deposit: deposit(client.total, settings.deposit_percent),
        balance: client.balance(),
        currency: settings.currency,
    })
}

/// Finds a tour or bus reservation by the folio handed to the customer.
pub fn lookup_booking<R>(repo: &R, folio: &str) -> ServiceResult<BookingLookup>
where
    R: TourReader + ClientReader + PassengerReader + RouteReader + SettingsReader + ?Sized,
{
    let folio: Folio = folio.parse().map_err(|_| ServiceError::NotFound)?;
    let currency = repo.get_agency_settings()?.currency;

    if let Some(client) = repo.get_client_by_folio(&folio)? {
        let trip = repo
            .get_tour_by_id(client.tour_id)?
            .map(|tour| tour.name.into_inner())
            .unwrap_or_default();
        let seats = repo.list_client_seats(client.id)?;
        return Ok(BookingLookup {
            kind: TripKind::Tour,
            folio,
            trip,
            status: client.status,
            travellers: client.roster.total(),
            seats,
            total: client.total,
            paid: client.paid,
            balance: balance(client.total, client.paid),
            currency,
        });
    }

    if let Some(passenger) = repo.get_passenger_by_folio(&folio)? {
        let trip = match repo.get_schedule_by_id(passenger.schedule_id)? {
            Some(schedule) => repo
                .get_route_by_id(schedule.route_id)?
                .map(|route| {
                    format!(
                        "{} - {}, {}",
                        route.origin,
                        route.destination,
                        schedule.departure.format("%Y-%m-%d %H:%M")
                    )
                })
                .unwrap_or_default(),
            None => String::new(),
        };
        let seats = repo.list_passenger_seats(passenger.id)?;
        return Ok(BookingLookup {
            kind: TripKind::Bus,
            folio,
            trip,
            status: passenger.status,
            travellers: passenger.roster.total(),
            seats,
            total: passenger.total,
            paid: passenger.paid,
            balance: passenger.balance(),
            currency,
        });
    }

    Err(ServiceError::NotFound)
}
