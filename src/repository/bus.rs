use diesel::dsl::max;
use diesel::prelude::*;

use crate::domain::bus::{Bus, NewBus};
use crate::domain::types::{BusId, SeatNumber};
use crate::models::bus::{Bus as DbBus, NewBus as DbNewBus};
use crate::repository::errors::RepositoryResult;
use crate::repository::{BusReader, BusWriter, DieselRepository};
use crate::schema::{bus_schedules, bus_seat_assignments, buses, tour_seat_assignments, tours};

impl BusReader for DieselRepository {
    fn get_bus_by_id(&self, id: BusId) -> RepositoryResult<Option<Bus>> {
        let mut conn = self.conn()?;
        let bus = buses::table
            .find(id.get())
            .first::<DbBus>(&mut conn)
            .optional()?;

        Ok(bus.map(Bus::try_from).transpose()?)
    }

    fn list_buses(&self) -> RepositoryResult<Vec<Bus>> {
        let mut conn = self.conn()?;
        let buses = buses::table
            .order(buses::name.asc())
            .load::<DbBus>(&mut conn)?
            .into_iter()
            .map(Bus::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(buses)
    }

    fn max_assigned_seat(&self, id: BusId) -> RepositoryResult<Option<SeatNumber>> {
        let mut conn = self.conn()?;

        let on_tours: Option<i32> = tour_seat_assignments::table
            .inner_join(tours::table)
            .filter(tours::bus_id.eq(id.get()))
            .select(max(tour_seat_assignments::seat_number))
            .first(&mut conn)?;

        let on_schedules: Option<i32> = bus_seat_assignments::table
            .inner_join(bus_schedules::table)
            .filter(bus_schedules::bus_id.eq(id.get()))
            .select(max(bus_seat_assignments::seat_number))
            .first(&mut conn)?;

        Ok(on_tours
            .max(on_schedules)
            .map(SeatNumber::new)
            .transpose()?)
    }
}

impl BusWriter for DieselRepository {
    fn create_bus(&self, new_bus: &NewBus) -> RepositoryResult<Bus> {
        let mut conn = self.conn()?;
        let created = diesel::insert_into(buses::table)
            .values(DbNewBus::from(new_bus))
            .get_result::<DbBus>(&mut conn)?;

        Ok(created.try_into()?)
    }

    fn update_bus(&self, id: BusId, bus: &NewBus) -> RepositoryResult<Bus> {
        let mut conn = self.conn()?;
        let updated = diesel::update(buses::table.find(id.get()))
            .set(DbNewBus::from(bus))
            .get_result::<DbBus>(&mut conn)?;

        Ok(updated.try_into()?)
    }
}
