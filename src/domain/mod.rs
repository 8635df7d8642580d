//! Domain entities and the seat / occupancy / pricing engine.

pub mod agency_settings;
pub mod bus;
pub mod bus_passenger;
pub mod bus_route;
pub mod client;
pub mod hotel;
pub mod occupancy;
pub mod pricing;
pub mod provider;
pub mod seat_map;
pub mod tour;
pub mod types;
