use chrono::Utc;
use diesel::prelude::*;
use diesel::sqlite::Sqlite;

use crate::domain::tour::{NewTour, Tour};
use crate::domain::types::TourId;
use crate::models::tour::{NewTour as DbNewTour, Tour as DbTour};
use crate::repository::errors::RepositoryResult;
use crate::repository::{DieselRepository, TourListQuery, TourReader, TourWriter};
use crate::schema::tours;

fn filtered(query: &TourListQuery) -> tours::BoxedQuery<'_, Sqlite> {
    let mut items = tours::table.into_boxed();
    if query.published_only {
        items = items.filter(tours::published.eq(true));
    }
    if let Some(term) = &query.search {
        let pattern = format!("%{term}%");
        items = items.filter(
            tours::name
                .like(pattern.clone())
                .or(tours::destination.like(pattern)),
        );
    }
    items
}

impl TourReader for DieselRepository {
    fn get_tour_by_id(&self, id: TourId) -> RepositoryResult<Option<Tour>> {
        let mut conn = self.conn()?;
        let tour = tours::table
            .find(id.get())
            .first::<DbTour>(&mut conn)
            .optional()?;

        Ok(tour.map(Tour::try_from).transpose()?)
    }

    fn list_tours(&self, query: TourListQuery) -> RepositoryResult<(usize, Vec<Tour>)> {
        let mut conn = self.conn()?;

        let total: i64 = filtered(&query).count().get_result(&mut conn)?;

        let mut items = filtered(&query).order((tours::departure_date.asc(), tours::id.asc()));
        if let Some(pagination) = &query.pagination {
            items = items.limit(pagination.limit()).offset(pagination.offset());
        }
        let tours = items
            .load::<DbTour>(&mut conn)?
            .into_iter()
            .map(Tour::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok((usize::try_from(total).unwrap_or_default(), tours))
    }
}

impl TourWriter for DieselRepository {
    fn create_tour(&self, new_tour: &NewTour) -> RepositoryResult<Tour> {
        let mut conn = self.conn()?;
        let created = diesel::insert_into(tours::table)
            .values(DbNewTour::from(new_tour))
            .get_result::<DbTour>(&mut conn)?;

        Ok(created.try_into()?)
    }

    fn update_tour(&self, id: TourId, tour: &NewTour) -> RepositoryResult<Tour> {
        let mut conn = self.conn()?;
        let updated = diesel::update(tours::table.find(id.get()))
            .set((
                DbNewTour::from(tour),
                tours::updated_at.eq(Utc::now().naive_utc()),
            ))
            .get_result::<DbTour>(&mut conn)?;

        Ok(updated.try_into()?)
    }
}
