//! Public booking of bus-only departures.

use crate::domain::bus_passenger::NewBusPassenger;
use crate::domain::bus_route::{BusRoute, BusSchedule};
use crate::domain::occupancy::Roster;
use crate::domain::pricing::{deposit, quote_bus};
use crate::domain::seat_map::SeatMap;
use crate::domain::types::{BookingStatus, Folio, ScheduleId, SeatNumber};
use crate::dto::booking::{
    BookingConfirmation, BusBookingData, QuoteResponse, ScheduleSummary, SeatMapView,
};
use crate::forms::booking::{BusBookingForm, BusBookingPayload, BusQuoteForm};
use crate::repository::{BusReader, PassengerReader, PassengerWriter, RouteReader, SettingsReader};
use crate::services::{ServiceError, ServiceResult};

pub(crate) fn get_schedule<R>(repo: &R, schedule_id: i32) -> ServiceResult<(BusSchedule, BusRoute)>
where
    R: RouteReader + ?Sized,
{
    let schedule_id = ScheduleId::new(schedule_id).map_err(|_| ServiceError::NotFound)?;
    let schedule = repo
        .get_schedule_by_id(schedule_id)?
        .ok_or(ServiceError::NotFound)?;
    let route = repo
        .get_route_by_id(schedule.route_id)?
        .ok_or(ServiceError::NotFound)?;
    Ok((schedule, route))
}

fn active_schedule<R>(repo: &R, schedule_id: i32) -> ServiceResult<(BusSchedule, BusRoute)>
where
    R: RouteReader + ?Sized,
{
    let (schedule, route) = get_schedule(repo, schedule_id)?;
    if !schedule.active {
        return Err(ServiceError::NotFound);
    }
    Ok((schedule, route))
}

/// Seat map of a departure; `released` seats are shown as free.
pub(crate) fn schedule_seat_map<R>(
    repo: &R,
    schedule: &BusSchedule,
    released: &[SeatNumber],
) -> ServiceResult<SeatMap>
where
    R: BusReader + PassengerReader + ?Sized,
{
    let bus = repo.get_bus_by_id(schedule.bus_id)?.ok_or_else(|| {
        log::error!(
            "Schedule {} references missing bus {}",
            schedule.id,
            schedule.bus_id
        );
        ServiceError::Internal(format!("bus {} not found", schedule.bus_id))
    })?;
    let occupied = repo
        .list_occupied_bus_seats(schedule.id)?
        .into_iter()
        .filter(|seat| !released.contains(seat));
    Ok(SeatMap::new(bus.layout, occupied))
}

/// Active departures with the number of free seats on each.
pub fn list_schedules<R>(repo: &R) -> ServiceResult<Vec<ScheduleSummary>>
where
    R: RouteReader + BusReader + PassengerReader + ?Sized,
{
    let schedules = repo.list_schedules(true).map_err(|err| {
        log::error!("Failed to list schedules: {err}");
        err
    })?;

    schedules
        .into_iter()
        .map(|(schedule, route)| {
            let available = schedule_seat_map(repo, &schedule, &[])?.available_count();
            Ok(ScheduleSummary {
                schedule,
                route,
                available,
            })
        })
        .collect()
}

pub fn load_bus_booking<R>(repo: &R, schedule_id: i32) -> ServiceResult<BusBookingData>
where
    R: RouteReader + BusReader + PassengerReader + SettingsReader + ?Sized,
{
    let (schedule, route) = active_schedule(repo, schedule_id)?;
    let seat_map = schedule_seat_map(repo, &schedule, &[])?;
    let settings = repo.get_agency_settings()?;

    Ok(BusBookingData {
        seat_map: SeatMapView::from(&seat_map),
        schedule,
        route,
        currency: settings.currency,
        deposit_percent: settings.deposit_percent.get(),
    })
}

pub fn quote_bus_booking<R>(
    repo: &R,
    schedule_id: i32,
    form: BusQuoteForm,
) -> ServiceResult<QuoteResponse>
where
    R: RouteReader + SettingsReader + ?Sized,
{
    let roster = Roster::try_from(form)?;
    let (_, route) = active_schedule(repo, schedule_id)?;
    let quote = quote_bus(&route.fare, roster)?;
    let settings = repo.get_agency_settings()?;

    Ok(QuoteResponse {
        rooms: Vec::new(),
        deposit: deposit(quote.total, settings.deposit_percent),
        quote,
        currency: settings.currency,
    })
}

/// Reserves seats on a departure, assigning them when none were chosen.
pub fn book_bus_trip<R>(
    repo: &R,
    schedule_id: i32,
    form: BusBookingForm,
) -> ServiceResult<BookingConfirmation>
where
    R: RouteReader + BusReader + PassengerReader + PassengerWriter + SettingsReader + ?Sized,
{
    let payload = BusBookingPayload::try_from(form)?;
    let (schedule, route) = active_schedule(repo, schedule_id)?;
    let seat_map = schedule_seat_map(repo, &schedule, &[])?;

    let party = payload.roster.total();
    let seats = if payload.seats.is_empty() {
        seat_map.allocate(party)?
    } else {
        seat_map.validate_selection(&payload.seats, party)?
    };

    let quote = quote_bus(&route.fare, payload.roster)?;
    let settings = repo.get_agency_settings()?;

    let new_passenger = NewBusPassenger {
        schedule_id: schedule.id,
        folio: Folio::new(),
        contact: payload.contact,
        roster: payload.roster,
        total: quote.total,
        status: BookingStatus::Pending,
        notes: payload.notes,
        seats: seats.clone(),
    };

    let passenger = repo.create_passenger(&new_passenger).map_err(|err| {
        log::error!("Failed to book schedule {}: {err}", schedule.id);
        err
    })?;

    log::info!(
        "Schedule {} booked under folio {} ({} travellers)",
        schedule.id,
        passenger.folio,
        party
    );

    Ok(BookingConfirmation {
        folio: passenger.folio,
        status: passenger.status,
        seats,
        rooms: Vec::new(),
        total: passenger.total,
        deposit: deposit(passenger.total, settings.deposit_percent),
        balance: passenger.balance(),
        currency: settings.currency,
    })
}
