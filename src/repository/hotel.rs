use diesel::prelude::*;

use crate::domain::hotel::{Hotel, NewHotel};
use crate::domain::types::HotelId;
use crate::models::hotel::{Hotel as DbHotel, NewHotel as DbNewHotel};
use crate::repository::errors::RepositoryResult;
use crate::repository::{DieselRepository, HotelReader, HotelWriter};
use crate::schema::hotels;

impl HotelReader for DieselRepository {
    fn get_hotel_by_id(&self, id: HotelId) -> RepositoryResult<Option<Hotel>> {
        let mut conn = self.conn()?;
        let hotel = hotels::table
            .find(id.get())
            .first::<DbHotel>(&mut conn)
            .optional()?;

        Ok(hotel.map(Hotel::try_from).transpose()?)
    }

    fn list_hotels(&self) -> RepositoryResult<Vec<Hotel>> {
        let mut conn = self.conn()?;
        let hotels = hotels::table
            .order((hotels::city.asc(), hotels::name.asc()))
            .load::<DbHotel>(&mut conn)?
            .into_iter()
            .map(Hotel::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(hotels)
    }
}

impl HotelWriter for DieselRepository {
    fn create_hotel(&self, new_hotel: &NewHotel) -> RepositoryResult<Hotel> {
        let mut conn = self.conn()?;
        let created = diesel::insert_into(hotels::table)
            .values(DbNewHotel::from(new_hotel))
            .get_result::<DbHotel>(&mut conn)?;

        Ok(created.try_into()?)
    }

    fn update_hotel(&self, id: HotelId, hotel: &NewHotel) -> RepositoryResult<Hotel> {
        let mut conn = self.conn()?;
        let updated = diesel::update(hotels::table.find(id.get()))
            .set(DbNewHotel::from(hotel))
            .get_result::<DbHotel>(&mut conn)?;

        Ok(updated.try_into()?)
    }
}
