//! Diesel models for tours.

use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;

use crate::domain::pricing::TourRates;
use crate::domain::tour::{NewTour as DomainNewTour, Tour as DomainTour};
use crate::domain::types::{BusId, Money, PlaceName, TourId, TourName, TypeConstraintError};

#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::tours)]
/// Diesel model for [`crate::domain::tour::Tour`].
pub struct Tour {
    pub id: i32,
    pub name: String,
    pub destination: String,
    pub description: Option<String>,
    pub departure_date: NaiveDate,
    pub return_date: NaiveDate,
    pub bus_id: Option<i32>,
    pub price_double: i64,
    pub price_triple: i64,
    pub price_quad: i64,
    pub price_child: i64,
    pub published: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable, AsChangeset)]
#[diesel(table_name = crate::schema::tours)]
#[diesel(treat_none_as_null = true)]
/// Insertable and updatable form of [`Tour`].
pub struct NewTour<'a> {
    pub name: &'a str,
    pub destination: &'a str,
    pub description: Option<&'a str>,
    pub departure_date: NaiveDate,
    pub return_date: NaiveDate,
    pub bus_id: Option<i32>,
    pub price_double: i64,
    pub price_triple: i64,
    pub price_quad: i64,
    pub price_child: i64,
    pub published: bool,
}

impl TryFrom<Tour> for DomainTour {
    type Error = TypeConstraintError;

    fn try_from(tour: Tour) -> Result<Self, Self::Error> {
        Ok(Self {
            id: TourId::new(tour.id)?,
            name: TourName::new(tour.name)?,
            destination: PlaceName::new(tour.destination)?,
            description: tour.description,
            departure_date: tour.departure_date,
            return_date: tour.return_date,
            bus_id: tour.bus_id.map(BusId::new).transpose()?,
            rates: TourRates {
                double: Money::from_cents(tour.price_double)?,
                triple: Money::from_cents(tour.price_triple)?,
                quad: Money::from_cents(tour.price_quad)?,
                child: Money::from_cents(tour.price_child)?,
            },
            published: tour.published,
            created_at: tour.created_at,
            updated_at: tour.updated_at,
        })
    }
}

impl<'a> From<&'a DomainNewTour> for NewTour<'a> {
    fn from(tour: &'a DomainNewTour) -> Self {
        Self {
            name: tour.name.as_str(),
            destination: tour.destination.as_str(),
            description: tour.description.as_deref(),
            departure_date: tour.departure_date,
            return_date: tour.return_date,
            bus_id: tour.bus_id.map(BusId::get),
            price_double: tour.rates.double.cents(),
            price_triple: tour.rates.triple.cents(),
            price_quad: tour.rates.quad.cents(),
            price_child: tour.rates.child.cents(),
            published: tour.published,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn db_tour() -> Tour {
        let now = Utc::now().naive_utc();
        Tour {
            id: 3,
            name: "Huasteca".to_string(),
            destination: "Xilitla".to_string(),
            description: None,
            departure_date: NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
            return_date: NaiveDate::from_ymd_opt(2026, 3, 4).unwrap(),
            bus_id: Some(2),
            price_double: 500_000,
            price_triple: 450_000,
            price_quad: 400_000,
            price_child: 200_000,
            published: true,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn tour_into_domain() {
        let domain = DomainTour::try_from(db_tour()).expect("valid tour");
        assert_eq!(domain.id.get(), 3);
        assert_eq!(domain.bus_id.map(BusId::get), Some(2));
        assert_eq!(domain.rates.quad.cents(), 400_000);
        assert_eq!(domain.nights(), 3);
    }

    #[test]
    fn negative_price_is_rejected() {
        let mut tour = db_tour();
        tour.price_child = -1;
        assert_eq!(
            DomainTour::try_from(tour),
            Err(TypeConstraintError::NegativeAmount)
        );
    }
}
