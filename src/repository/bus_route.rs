use diesel::prelude::*;

use crate::domain::bus_route::{BusRoute, BusSchedule, NewBusRoute, NewBusSchedule};
use crate::domain::types::{RouteId, ScheduleId};
use crate::models::bus_route::{
    BusRoute as DbBusRoute, BusSchedule as DbBusSchedule, NewBusRoute as DbNewBusRoute,
    NewBusSchedule as DbNewBusSchedule,
};
use crate::repository::errors::RepositoryResult;
use crate::repository::{DieselRepository, RouteReader, RouteWriter};
use crate::schema::{bus_routes, bus_schedules};

impl RouteReader for DieselRepository {
    fn get_route_by_id(&self, id: RouteId) -> RepositoryResult<Option<BusRoute>> {
        let mut conn = self.conn()?;
        let route = bus_routes::table
            .find(id.get())
            .first::<DbBusRoute>(&mut conn)
            .optional()?;

        Ok(route.map(BusRoute::try_from).transpose()?)
    }

    fn list_routes(&self) -> RepositoryResult<Vec<BusRoute>> {
        let mut conn = self.conn()?;
        let routes = bus_routes::table
            .order((bus_routes::origin.asc(), bus_routes::destination.asc()))
            .load::<DbBusRoute>(&mut conn)?
            .into_iter()
            .map(BusRoute::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(routes)
    }

    fn get_schedule_by_id(&self, id: ScheduleId) -> RepositoryResult<Option<BusSchedule>> {
        let mut conn = self.conn()?;
        let schedule = bus_schedules::table
            .find(id.get())
            .first::<DbBusSchedule>(&mut conn)
            .optional()?;

        Ok(schedule.map(BusSchedule::try_from).transpose()?)
    }

    fn list_schedules(
        &self,
        active_only: bool,
    ) -> RepositoryResult<Vec<(BusSchedule, BusRoute)>> {
        let mut conn = self.conn()?;
        let mut query = bus_schedules::table
            .inner_join(bus_routes::table)
            .order((bus_schedules::departure.asc(), bus_schedules::id.asc()))
            .into_boxed();
        if active_only {
            query = query.filter(bus_schedules::active.eq(true));
        }
        let rows = query.load::<(DbBusSchedule, DbBusRoute)>(&mut conn)?;

        let mut schedules = Vec::with_capacity(rows.len());
        for (schedule, route) in rows {
            schedules.push((BusSchedule::try_from(schedule)?, BusRoute::try_from(route)?));
        }
        Ok(schedules)
    }
}

impl RouteWriter for DieselRepository {
    fn create_route(&self, new_route: &NewBusRoute) -> RepositoryResult<BusRoute> {
        let mut conn = self.conn()?;
        let created = diesel::insert_into(bus_routes::table)
            .values(DbNewBusRoute::from(new_route))
            .get_result::<DbBusRoute>(&mut conn)?;

        Ok(created.try_into()?)
    }

    fn update_route(&self, id: RouteId, route: &NewBusRoute) -> RepositoryResult<BusRoute> {
        let mut conn = self.conn()?;
        let updated = diesel::update(bus_routes::table.find(id.get()))
            .set(DbNewBusRoute::from(route))
            .get_result::<DbBusRoute>(&mut conn)?;

        Ok(updated.try_into()?)
    }

    fn create_schedule(&self, new_schedule: &NewBusSchedule) -> RepositoryResult<BusSchedule> {
        let mut conn = self.conn()?;
        let created = diesel::insert_into(bus_schedules::table)
            .values(DbNewBusSchedule::from(new_schedule))
            .get_result::<DbBusSchedule>(&mut conn)?;

        Ok(created.try_into()?)
    }

    fn update_schedule(
        &self,
        id: ScheduleId,
        schedule: &NewBusSchedule,
    ) -> RepositoryResult<BusSchedule> {
        let mut conn = self.conn()?;
        let updated = diesel::update(bus_schedules::table.find(id.get()))
            .set(DbNewBusSchedule::from(schedule))
            .get_result::<DbBusSchedule>(&mut conn)?;

        Ok(updated.try_into()?)
    }
}
