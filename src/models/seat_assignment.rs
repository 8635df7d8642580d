//! Rows reserving a seat on a tour or on a bus departure.
//!
//! Both tables carry a unique index on (trip, seat_number); a concurrent
//! booking of the same seat fails on insert.

use diesel::prelude::*;

#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::tour_seat_assignments)]
pub struct TourSeatAssignment {
    pub id: i32,
    pub tour_id: i32,
    pub seat_number: i32,
    pub client_id: i32,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::tour_seat_assignments)]
pub struct NewTourSeatAssignment {
    pub tour_id: i32,
    pub seat_number: i32,
    pub client_id: i32,
}

#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::bus_seat_assignments)]
pub struct BusSeatAssignment {
    pub id: i32,
    pub schedule_id: i32,
    pub seat_number: i32,
    pub passenger_id: i32,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::bus_seat_assignments)]
pub struct NewBusSeatAssignment {
    pub schedule_id: i32,
    pub seat_number: i32,
    pub passenger_id: i32,
}
