use chrono::Utc;
use diesel::prelude::*;
use diesel::sqlite::{Sqlite, SqliteConnection};

use crate::domain::client::{Client, NewClient, UpdateClient};
use crate::domain::types::{
    BookingStatus, ClientId, Folio, Money, ProviderId, SeatNumber, TourId,
};
use crate::models::client::{
    Client as DbClient, NewClient as DbNewClient, UpdateClient as DbUpdateClient,
};
use crate::models::provider::ClientProvider;
use crate::models::seat_assignment::NewTourSeatAssignment;
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{ClientListQuery, ClientReader, ClientWriter, DieselRepository};
use crate::schema::{client_providers, clients, tour_seat_assignments};

fn filtered(query: &ClientListQuery) -> clients::BoxedQuery<'_, Sqlite> {
    let mut items = clients::table
        .filter(clients::tour_id.eq(query.tour_id.get()))
        .into_boxed();
    if let Some(status) = query.status {
        items = items.filter(clients::status.eq(status.as_str()));
    }
    if let Some(term) = &query.search {
        let pattern = format!("%{term}%");
        items = items.filter(
            clients::name
                .like(pattern.clone())
                .or(clients::email.like(pattern.clone()))
                .or(clients::folio.like(pattern)),
        );
    }
    items
}

fn insert_seats(
    conn: &mut SqliteConnection,
    tour_id: TourId,
    client_id: i32,
    seats: &[SeatNumber],
) -> RepositoryResult<()> {
    if seats.is_empty() {
        return Ok(());
    }
    let rows: Vec<NewTourSeatAssignment> = seats
        .iter()
        .map(|seat| NewTourSeatAssignment {
            tour_id: tour_id.get(),
            seat_number: i32::from(*seat),
            client_id,
        })
        .collect();
    diesel::insert_into(tour_seat_assignments::table)
        .values(&rows)
        .execute(conn)
        .map_err(RepositoryError::from_seat_insert)?;
    Ok(())
}

fn insert_extras(
    conn: &mut SqliteConnection,
    client_id: i32,
    extras: &[ProviderId],
) -> RepositoryResult<()> {
    if extras.is_empty() {
        return Ok(());
    }
    let rows: Vec<ClientProvider> = extras
        .iter()
        .map(|provider| ClientProvider {
            client_id,
            provider_id: provider.get(),
        })
        .collect();
    diesel::insert_into(client_providers::table)
        .values(&rows)
        .execute(conn)?;
    Ok(())
}

impl ClientReader for DieselRepository {
    fn get_client_by_id(&self, id: ClientId) -> RepositoryResult<Option<Client>> {
        let mut conn = self.conn()?;
        let client = clients::table
            .find(id.get())
            .first::<DbClient>(&mut conn)
            .optional()?;

        Ok(client.map(Client::try_from).transpose()?)
    }

    fn get_client_by_folio(&self, folio: &Folio) -> RepositoryResult<Option<Client>> {
        let mut conn = self.conn()?;
        let client = clients::table
            .filter(clients::folio.eq(folio.to_string()))
            .first::<DbClient>(&mut conn)
            .optional()?;

        Ok(client.map(Client::try_from).transpose()?)
    }

    fn list_clients(&self, query: ClientListQuery) -> RepositoryResult<(usize, Vec<Client>)> {
        let mut conn = self.conn()?;

        let total: i64 = filtered(&query).count().get_result(&mut conn)?;

        let mut items = filtered(&query).order(clients::id.asc());
        if let Some(pagination) = &query.pagination {
            items = items.limit(pagination.limit()).offset(pagination.offset());
        }
        let clients = items
            .load::<DbClient>(&mut conn)?
            .into_iter()
            .map(Client::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok((usize::try_from(total).unwrap_or_default(), clients))
    }

    fn list_client_seats(&self, id: ClientId) -> RepositoryResult<Vec<SeatNumber>> {
        let mut conn = self.conn()?;
        let seats = tour_seat_assignments::table
            .filter(tour_seat_assignments::client_id.eq(id.get()))
            .order(tour_seat_assignments::seat_number.asc())
            .select(tour_seat_assignments::seat_number)
            .load::<i32>(&mut conn)?
            .into_iter()
            .map(SeatNumber::new)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(seats)
    }

    fn list_client_extras(&self, id: ClientId) -> RepositoryResult<Vec<ProviderId>> {
        let mut conn = self.conn()?;
        let extras = client_providers::table
            .filter(client_providers::client_id.eq(id.get()))
            .order(client_providers::provider_id.asc())
            .select(client_providers::provider_id)
            .load::<i32>(&mut conn)?
            .into_iter()
            .map(ProviderId::new)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(extras)
    }

    fn list_occupied_tour_seats(&self, tour_id: TourId) -> RepositoryResult<Vec<SeatNumber>> {
        let mut conn = self.conn()?;
        let seats = tour_seat_assignments::table
            .filter(tour_seat_assignments::tour_id.eq(tour_id.get()))
            .order(tour_seat_assignments::seat_number.asc())
            .select(tour_seat_assignments::seat_number)
            .load::<i32>(&mut conn)?
            .into_iter()
            .map(SeatNumber::new)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(seats)
    }
}

impl ClientWriter for DieselRepository {
    fn create_client(&self, new_client: &NewClient) -> RepositoryResult<Client> {
        let mut conn = self.conn()?;
        conn.transaction::<_, RepositoryError, _>(|conn| {
            let created = diesel::insert_into(clients::table)
                .values(DbNewClient::from(new_client))
                .get_result::<DbClient>(conn)?;

            insert_seats(conn, new_client.tour_id, created.id, &new_client.seats)?;
            insert_extras(conn, created.id, &new_client.extras)?;

            Ok(Client::try_from(created)?)
        })
    }

    fn update_client(&self, id: ClientId, updates: &UpdateClient) -> RepositoryResult<Client> {
        let mut conn = self.conn()?;
        conn.transaction::<_, RepositoryError, _>(|conn| {
            let updated = diesel::update(clients::table.find(id.get()))
                .set(DbUpdateClient::new(updates, Utc::now().naive_utc()))
                .get_result::<DbClient>(conn)?;
            let tour_id = TourId::new(updated.tour_id)?;

            diesel::delete(
                tour_seat_assignments::table
                    .filter(tour_seat_assignments::client_id.eq(id.get())),
            )
            .execute(conn)?;
            insert_seats(conn, tour_id, updated.id, &updates.seats)?;

            diesel::delete(
                client_providers::table.filter(client_providers::client_id.eq(id.get())),
            )
            .execute(conn)?;
            insert_extras(conn, updated.id, &updates.extras)?;

            Ok(Client::try_from(updated)?)
        })
    }

    fn record_client_payment(&self, id: ClientId, amount: Money) -> RepositoryResult<Client> {
        let mut conn = self.conn()?;
        let updated = diesel::update(clients::table.find(id.get()))
            .set((
                clients::paid.eq(clients::paid + amount.cents()),
                clients::updated_at.eq(Utc::now().naive_utc()),
            ))
            .get_result::<DbClient>(&mut conn)?;

        Ok(updated.try_into()?)
    }

    fn set_client_status(
        &self,
        id: ClientId,
        status: BookingStatus,
    ) -> RepositoryResult<Client> {
        let mut conn = self.conn()?;
        conn.transaction::<_, RepositoryError, _>(|conn| {
            let updated = diesel::update(clients::table.find(id.get()))
                .set((
                    clients::status.eq(status.as_str()),
                    clients::updated_at.eq(Utc::now().naive_utc()),
                ))
                .get_result::<DbClient>(conn)?;

            if !status.holds_seats() {
                diesel::delete(
                    tour_seat_assignments::table
                        .filter(tour_seat_assignments::client_id.eq(id.get())),
                )
                .execute(conn)?;
            }

            Ok(Client::try_from(updated)?)
        })
    }
}
