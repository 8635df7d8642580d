use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::domain::pricing::TourRates;
use crate::domain::types::{BusId, PlaceName, TourId, TourName, TypeConstraintError};

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct Tour {
    pub id: TourId,
    pub name: TourName,
    pub destination: PlaceName,
    pub description: Option<String>,
    pub departure_date: NaiveDate,
    pub return_date: NaiveDate,
    /// Bus whose layout backs the seat map of this tour.
    pub bus_id: Option<BusId>,
    pub rates: TourRates,
    /// Only published tours are offered on the public site.
    pub published: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Tour {
    /// Nights of lodging between departure and return.
    pub fn nights(&self) -> u32 {
        nights_between(self.departure_date, self.return_date)
    }
}

fn nights_between(departure: NaiveDate, return_date: NaiveDate) -> u32 {
    u32::try_from((return_date - departure).num_days()).unwrap_or_default()
}

/// Data needed to create or fully update a tour.
#[derive(Clone, Debug, PartialEq)]
pub struct NewTour {
    pub name: TourName,
    pub destination: PlaceName,
    pub description: Option<String>,
    pub departure_date: NaiveDate,
    pub return_date: NaiveDate,
    pub bus_id: Option<BusId>,
    pub rates: TourRates,
    pub published: bool,
}

impl NewTour {
    #[allow(clippy::too_many_arguments)]
    pub fn try_new(
        name: TourName,
        destination: PlaceName,
        description: Option<String>,
        departure_date: NaiveDate,
        return_date: NaiveDate,
        bus_id: Option<BusId>,
        rates: TourRates,
        published: bool,
    ) -> Result<Self, TypeConstraintError> {
        if return_date < departure_date {
            return Err(TypeConstraintError::InvalidValue(
                "return date precedes departure".to_string(),
            ));
        }
        Ok(Self {
            name,
            destination,
            description: description
                .map(|s| ammonia::clean(s.trim()))
                .filter(|s| !s.is_empty()),
            departure_date,
            return_date,
            bus_id,
            rates,
            published,
        })
    }

    pub fn nights(&self) -> u32 {
        nights_between(self.departure_date, self.return_date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn return_must_follow_departure() {
        let result = NewTour::try_new(
            TourName::new("Chiapas").unwrap(),
            PlaceName::new("San Cristobal").unwrap(),
            None,
            date(2026, 5, 10),
            date(2026, 5, 8),
            None,
            TourRates::default(),
            false,
        );
        assert!(result.is_err());
    }

    #[test]
    fn nights_and_description_cleanup() {
        let tour = NewTour::try_new(
            TourName::new("Chiapas").unwrap(),
            PlaceName::new("San Cristobal").unwrap(),
            Some("  <b>Canyon</b> trip ".to_string()),
            date(2026, 5, 10),
            date(2026, 5, 14),
            None,
            TourRates::default(),
            true,
        )
        .unwrap();
        assert_eq!(tour.nights(), 4);
        assert_eq!(tour.description.as_deref(), Some("<b>Canyon</b> trip"));
    }
}
