//! DTO modules that bridge services with templates and the JSON API.

pub mod booking;
pub mod catalog;
pub mod clients;
pub mod passengers;
pub mod settings;
