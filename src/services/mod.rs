pub mod booking;
pub mod bus_booking;
pub mod catalog;
pub mod clients;
pub mod errors;
pub mod passengers;
pub mod settings;

pub use errors::{ServiceError, ServiceResult};

/// Trims a free-form search box, treating blank input as no search.
pub(crate) fn normalize_search(search: Option<String>) -> Option<String> {
    search
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}
