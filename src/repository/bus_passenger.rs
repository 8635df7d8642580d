use chrono::Utc;
use diesel::prelude::*;
use diesel::sqlite::{Sqlite, SqliteConnection};

use crate::domain::bus_passenger::{BusPassenger, NewBusPassenger, UpdateBusPassenger};
use crate::domain::types::{BookingStatus, Folio, Money, PassengerId, ScheduleId, SeatNumber};
use crate::models::bus_passenger::{
    BusPassenger as DbBusPassenger, NewBusPassenger as DbNewBusPassenger,
    UpdateBusPassenger as DbUpdateBusPassenger,
};
use crate::models::seat_assignment::NewBusSeatAssignment;
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{DieselRepository, PassengerListQuery, PassengerReader, PassengerWriter};
use crate::schema::{bus_passengers, bus_seat_assignments};

fn filtered(query: &PassengerListQuery) -> bus_passengers::BoxedQuery<'_, Sqlite> {
    let mut items = bus_passengers::table
        .filter(bus_passengers::schedule_id.eq(query.schedule_id.get()))
        .into_boxed();
    if let Some(term) = &query.search {
        let pattern = format!("%{term}%");
        items = items.filter(
            bus_passengers::name
                .like(pattern.clone())
                .or(bus_passengers::email.like(pattern.clone()))
                .or(bus_passengers::folio.like(pattern)),
        );
    }
    items
}

fn insert_seats(
    conn: &mut SqliteConnection,
    schedule_id: i32,
    passenger_id: i32,
    seats: &[SeatNumber],
) -> RepositoryResult<()> {
    if seats.is_empty() {
        return Ok(());
    }
    let rows: Vec<NewBusSeatAssignment> = seats
        .iter()
        .map(|seat| NewBusSeatAssignment {
            schedule_id,
            seat_number: i32::from(*seat),
            passenger_id,
        })
        .collect();
    diesel::insert_into(bus_seat_assignments::table)
        .values(&rows)
        .execute(conn)
        .map_err(RepositoryError::from_seat_insert)?;
    Ok(())
}

fn release_seats(conn: &mut SqliteConnection, passenger_id: i32) -> RepositoryResult<()> {
    diesel::delete(
        bus_seat_assignments::table.filter(bus_seat_assignments::passenger_id.eq(passenger_id)),
    )
    .execute(conn)?;
    Ok(())
}

fn load_seats(
    conn: &mut SqliteConnection,
    query: bus_seat_assignments::BoxedQuery<'_, Sqlite>,
) -> RepositoryResult<Vec<SeatNumber>> {
    let seats = query
        .order(bus_seat_assignments::seat_number.asc())
        .select(bus_seat_assignments::seat_number)
        .load::<i32>(conn)?
        .into_iter()
        .map(SeatNumber::new)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(seats)
}

impl PassengerReader for DieselRepository {
    fn get_passenger_by_id(&self, id: PassengerId) -> RepositoryResult<Option<BusPassenger>> {
        let mut conn = self.conn()?;
        let passenger = bus_passengers::table
            .find(id.get())
            .first::<DbBusPassenger>(&mut conn)
            .optional()?;

        Ok(passenger.map(BusPassenger::try_from).transpose()?)
    }

    fn get_passenger_by_folio(&self, folio: &Folio) -> RepositoryResult<Option<BusPassenger>> {
        let mut conn = self.conn()?;
        let passenger = bus_passengers::table
            .filter(bus_passengers::folio.eq(folio.to_string()))
            .first::<DbBusPassenger>(&mut conn)
            .optional()?;

        Ok(passenger.map(BusPassenger::try_from).transpose()?)
    }

    fn list_passengers(
        &self,
        query: PassengerListQuery,
    ) -> RepositoryResult<(usize, Vec<BusPassenger>)> {
        let mut conn = self.conn()?;

        let total: i64 = filtered(&query).count().get_result(&mut conn)?;

        let mut items = filtered(&query).order(bus_passengers::id.asc());
        if let Some(pagination) = &query.pagination {
            items = items.limit(pagination.limit()).offset(pagination.offset());
        }
        let passengers = items
            .load::<DbBusPassenger>(&mut conn)?
            .into_iter()
            .map(BusPassenger::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok((usize::try_from(total).unwrap_or_default(), passengers))
    }

    fn list_passenger_seats(&self, id: PassengerId) -> RepositoryResult<Vec<SeatNumber>> {
        let mut conn = self.conn()?;
        load_seats(
            &mut conn,
            bus_seat_assignments::table
                .filter(bus_seat_assignments::passenger_id.eq(id.get()))
                .into_boxed(),
        )
    }

    fn list_occupied_bus_seats(
        &self,
        schedule_id: ScheduleId,
    ) -> RepositoryResult<Vec<SeatNumber>> {
        let mut conn = self.conn()?;
        load_seats(
            &mut conn,
            bus_seat_assignments::table
                .filter(bus_seat_assignments::schedule_id.eq(schedule_id.get()))
                .into_boxed(),
        )
    }
}

impl PassengerWriter for DieselRepository {
    fn create_passenger(
        &self,
        new_passenger: &NewBusPassenger,
    ) -> RepositoryResult<BusPassenger> {
        let mut conn = self.conn()?;
        conn.transaction::<_, RepositoryError, _>(|conn| {
            let created = diesel::insert_into(bus_passengers::table)
                .values(DbNewBusPassenger::from(new_passenger))
                .get_result::<DbBusPassenger>(conn)?;

            insert_seats(conn, created.schedule_id, created.id, &new_passenger.seats)?;

            Ok(BusPassenger::try_from(created)?)
        })
    }

    fn update_passenger(
        &self,
        id: PassengerId,
        updates: &UpdateBusPassenger,
    ) -> RepositoryResult<BusPassenger> {
        let mut conn = self.conn()?;
        conn.transaction::<_, RepositoryError, _>(|conn| {
            let updated = diesel::update(bus_passengers::table.find(id.get()))
                .set(DbUpdateBusPassenger::new(updates, Utc::now().naive_utc()))
                .get_result::<DbBusPassenger>(conn)?;

            release_seats(conn, updated.id)?;
            insert_seats(conn, updated.schedule_id, updated.id, &updates.seats)?;

            Ok(BusPassenger::try_from(updated)?)
        })
    }

    fn record_passenger_payment(
        &self,
        id: PassengerId,
        amount: Money,
    ) -> RepositoryResult<BusPassenger> {
        let mut conn = self.conn()?;
        let updated = diesel::update(bus_passengers::table.find(id.get()))
            .set((
                bus_passengers::paid.eq(bus_passengers::paid + amount.cents()),
                bus_passengers::updated_at.eq(Utc::now().naive_utc()),
            ))
            .get_result::<DbBusPassenger>(&mut conn)?;

        Ok(updated.try_into()?)
    }

    fn set_passenger_status(
        &self,
        id: PassengerId,
        status: BookingStatus,
    ) -> RepositoryResult<BusPassenger> {
        let mut conn = self.conn()?;
        conn.transaction::<_, RepositoryError, _>(|conn| {
            let updated = diesel::update(bus_passengers::table.find(id.get()))
                .set((
                    bus_passengers::status.eq(status.as_str()),
                    bus_passengers::updated_at.eq(Utc::now().naive_utc()),
                ))
                .get_result::<DbBusPassenger>(conn)?;

            if !status.holds_seats() {
                release_seats(conn, updated.id)?;
            }

            Ok(BusPassenger::try_from(updated)?)
        })
    }
}
