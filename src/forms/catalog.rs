//! Back-office forms for the tour, fleet, lodging and add-on catalog.

use chrono::{NaiveDate, NaiveDateTime};
use serde::Deserialize;
use validator::Validate;

use crate::domain::bus::NewBus;
use crate::domain::bus_route::{NewBusRoute, NewBusSchedule};
use crate::domain::hotel::NewHotel;
use crate::domain::occupancy::{RoomCounts, Roster};
use crate::domain::pricing::{BusFare, NightlyRoomCosts, TourRates};
use crate::domain::provider::NewProvider;
use crate::domain::seat_map::SeatLayout;
use crate::domain::tour::NewTour;
use crate::domain::types::{
    BusId, BusName, HotelId, HotelName, PlaceName, ProviderName, RouteId, TourName,
};
use crate::forms::{FormError, checkbox, parse_amount, roster_from_counts};

const DATE_FORMAT: &str = "%Y-%m-%d";
/// Format posted by `<input type="datetime-local">`.
const DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M";

fn parse_date(value: &str) -> Result<NaiveDate, FormError> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT)
        .map_err(|_| FormError::InvalidDate(value.to_string()))
}

fn parse_datetime(value: &str) -> Result<NaiveDateTime, FormError> {
    let value = value.trim();
    NaiveDateTime::parse_from_str(value, DATETIME_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S"))
        .map_err(|_| FormError::InvalidDate(value.to_string()))
}

/// Select boxes post an empty string for "none".
fn optional_bus(value: Option<&str>) -> Result<Option<BusId>, FormError> {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        None => Ok(None),
        Some(v) => {
            let id: i32 = v.parse().map_err(|_| FormError::InvalidId)?;
            BusId::new(id).map(Some).map_err(|_| FormError::InvalidId)
        }
    }
}

fn place(value: &str) -> Result<PlaceName, FormError> {
    PlaceName::new(value.trim()).map_err(|_| FormError::InvalidValue("place is required".into()))
}

#[derive(Debug, Deserialize, Validate)]
pub struct TourForm {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(length(min = 1, max = 200))]
    pub destination: String,
    pub description: Option<String>,
    pub departure_date: String,
    pub return_date: String,
    pub bus_id: Option<String>,
    pub rate_double: String,
    pub rate_triple: String,
    pub rate_quad: String,
    pub rate_child: String,
    pub published: Option<String>,
}

impl TryFrom<TourForm> for NewTour {
    type Error = FormError;

    fn try_from(form: TourForm) -> Result<Self, Self::Error> {
        form.validate()?;
        let rates = TourRates {
            double: parse_amount(&form.rate_double)?,
            triple: parse_amount(&form.rate_triple)?,
            quad: parse_amount(&form.rate_quad)?,
            child: parse_amount(&form.rate_child)?,
        };
        NewTour::try_new(
            TourName::new(form.name.trim()).map_err(|_| FormError::InvalidName)?,
            place(&form.destination)?,
            form.description,
            parse_date(&form.departure_date)?,
            parse_date(&form.return_date)?,
            optional_bus(form.bus_id.as_deref())?,
            rates,
            checkbox(&form.published),
        )
        .map_err(|e| FormError::InvalidValue(e.to_string()))
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct BusForm {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    pub plate: Option<String>,
    #[validate(range(min = 1, max = 120))]
    pub capacity: u16,
    /// One row of cell codes per line; empty uses the standard layout.
    #[serde(default)]
    pub layout: String,
}

impl TryFrom<BusForm> for NewBus {
    type Error = FormError;

    fn try_from(form: BusForm) -> Result<Self, Self::Error> {
        form.validate()?;
        let rows: Vec<&str> = form.layout.lines().collect();
        let layout = if rows.iter().all(|row| row.trim().is_empty()) {
            None
        } else {
            Some(
                SeatLayout::parse(&rows).map_err(|e| FormError::InvalidLayout(e.to_string()))?,
            )
        };
        NewBus::try_new(
            BusName::new(form.name.trim()).map_err(|_| FormError::InvalidName)?,
            form.plate,
            form.capacity,
            layout,
        )
        .map_err(|e| FormError::InvalidLayout(e.to_string()))
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct HotelForm {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(length(min = 1, max = 200))]
    pub city: String,
    pub cost_double: String,
    pub cost_triple: String,
    pub cost_quad: String,
}

impl TryFrom<HotelForm> for NewHotel {
    type Error = FormError;

    fn try_from(form: HotelForm) -> Result<Self, Self::Error> {
        form.validate()?;
        Ok(NewHotel {
            name: HotelName::new(form.name.trim()).map_err(|_| FormError::InvalidName)?,
            city: place(&form.city)?,
            costs: NightlyRoomCosts {
                double: parse_amount(&form.cost_double)?,
                triple: parse_amount(&form.cost_triple)?,
                quad: parse_amount(&form.cost_quad)?,
            },
        })
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct ProviderForm {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    pub description: Option<String>,
    pub price_per_person: String,
    pub active: Option<String>,
}

impl TryFrom<ProviderForm> for NewProvider {
    type Error = FormError;

    fn try_from(form: ProviderForm) -> Result<Self, Self::Error> {
        form.validate()?;
        Ok(NewProvider::new(
            ProviderName::new(form.name.trim()).map_err(|_| FormError::InvalidName)?,
            form.description,
            parse_amount(&form.price_per_person)?,
            checkbox(&form.active),
        ))
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct RouteForm {
    #[validate(length(min = 1, max = 200))]
    pub origin: String,
    #[validate(length(min = 1, max = 200))]
    pub destination: String,
    pub fare_adult: String,
    pub fare_child: String,
}

impl TryFrom<RouteForm> for NewBusRoute {
    type Error = FormError;

    fn try_from(form: RouteForm) -> Result<Self, Self::Error> {
        form.validate()?;
        let fare = BusFare {
            adult: parse_amount(&form.fare_adult)?,
            child: parse_amount(&form.fare_child)?,
        };
        NewBusRoute::try_new(place(&form.origin)?, place(&form.destination)?, fare)
            .map_err(|e| FormError::InvalidValue(e.to_string()))
    }
}

#[derive(Debug, Deserialize)]
pub struct ScheduleForm {
    pub route_id: i32,
    pub bus_id: i32,
    pub departure: String,
    pub active: Option<String>,
}

impl TryFrom<ScheduleForm> for NewBusSchedule {
    type Error = FormError;

    fn try_from(form: ScheduleForm) -> Result<Self, Self::Error> {
        Ok(NewBusSchedule {
            route_id: RouteId::new(form.route_id).map_err(|_| FormError::InvalidId)?,
            bus_id: BusId::new(form.bus_id).map_err(|_| FormError::InvalidId)?,
            departure: parse_datetime(&form.departure)?,
            active: checkbox(&form.active),
        })
    }
}

/// Lodging cost estimate for a party in one hotel.
#[derive(Debug, Deserialize, Validate)]
pub struct HotelQuoteForm {
    pub hotel_id: i32,
    #[validate(range(min = 1, max = 60))]
    pub adults: u32,
    #[serde(default)]
    #[validate(range(max = 60))]
    pub children: u32,
    #[validate(range(min = 1, max = 60))]
    pub nights: u32,
    #[serde(default)]
    #[validate(range(max = 60))]
    pub rooms_double: u32,
    #[serde(default)]
    #[validate(range(max = 60))]
    pub rooms_triple: u32,
    #[serde(default)]
    #[validate(range(max = 60))]
    pub rooms_quad: u32,
}

pub struct HotelQuotePayload {
    pub hotel_id: HotelId,
    pub roster: Roster,
    pub nights: u32,
    pub rooms: Option<RoomCounts>,
}

impl TryFrom<HotelQuoteForm> for HotelQuotePayload {
    type Error = FormError;

    fn try_from(form: HotelQuoteForm) -> Result<Self, Self::Error> {
        form.validate()?;
        let rooms = RoomCounts::checked(form.rooms_double, form.rooms_triple, form.rooms_quad)
            .map_err(|e| FormError::InvalidRoster(e.to_string()))?;
        Ok(Self {
            hotel_id: HotelId::new(form.hotel_id).map_err(|_| FormError::InvalidId)?,
            roster: roster_from_counts(form.adults, form.children)?,
            nights: form.nights,
            rooms: (rooms.rooms() > 0).then_some(rooms),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tour_form() -> TourForm {
        TourForm {
            name: "Barrancas del Cobre".to_string(),
            destination: "Creel".to_string(),
            description: None,
            departure_date: "2026-07-01".to_string(),
            return_date: "2026-07-05".to_string(),
            bus_id: Some("".to_string()),
            rate_double: "8,500".to_string(),
            rate_triple: "7900".to_string(),
            rate_quad: "7400.50".to_string(),
            rate_child: "5000".to_string(),
            published: Some("on".to_string()),
        }
    }

    #[test]
    fn tour_form_to_domain() {
        let tour = NewTour::try_from(tour_form()).unwrap();
        assert_eq!(tour.nights(), 4);
        assert!(tour.bus_id.is_none());
        assert!(tour.published);
        assert_eq!(tour.rates.double.cents(), 850_000);
        assert_eq!(tour.rates.quad.cents(), 740_050);
    }

    #[test]
    fn tour_form_rejects_bad_dates() {
        let mut form = tour_form();
        form.return_date = "2026-06-30".to_string();
        assert!(matches!(
            NewTour::try_from(form),
            Err(FormError::InvalidValue(_))
        ));

        let mut form = tour_form();
        form.departure_date = "01/07/2026".to_string();
        assert!(matches!(
            NewTour::try_from(form),
            Err(FormError::InvalidDate(_))
        ));
    }

    #[test]
    fn bus_form_with_and_without_layout() {
        let standard = NewBus::try_from(BusForm {
            name: "Unidad 7".to_string(),
            plate: None,
            capacity: 40,
            layout: "  \n".to_string(),
        })
        .unwrap();
        assert_eq!(standard.capacity(), 40);

        let custom = NewBus::try_from(BusForm {
            name: "Van".to_string(),
            plate: None,
            capacity: 6,
            layout: "D_P\nSS_S\nSS_S\n".to_string(),
        })
        .unwrap();
        assert_eq!(custom.capacity(), 6);

        let mismatch = NewBus::try_from(BusForm {
            name: "Van".to_string(),
            plate: None,
            capacity: 10,
            layout: "SS_S".to_string(),
        });
        assert!(matches!(mismatch, Err(FormError::InvalidLayout(_))));
    }

    #[test]
    fn schedule_form_parses_datetime_local() {
        let schedule = NewBusSchedule::try_from(ScheduleForm {
            route_id: 1,
            bus_id: 2,
            departure: "2026-08-01T07:30".to_string(),
            active: None,
        })
        .unwrap();
        assert_eq!(schedule.departure.to_string(), "2026-08-01 07:30:00");
        assert!(!schedule.active);
    }

    #[test]
    fn hotel_quote_form_keeps_manual_rooms() {
        let payload = HotelQuotePayload::try_from(HotelQuoteForm {
            hotel_id: 3,
            adults: 4,
            children: 1,
            nights: 2,
            rooms_double: 1,
            rooms_triple: 1,
            rooms_quad: 0,
        })
        .unwrap();
        assert_eq!(payload.rooms, Some(RoomCounts::new(1, 1, 0)));
        assert_eq!(payload.roster.total(), 5);
    }

    #[test]
    fn hotel_quote_form_bounds_counts() {
        let form = || HotelQuoteForm {
            hotel_id: 3,
            adults: 2,
            children: 0,
            nights: 2,
            rooms_double: 0,
            rooms_triple: 0,
            rooms_quad: 0,
        };
        let mut huge_rooms = form();
        huge_rooms.rooms_quad = u32::MAX;
        assert!(matches!(
            HotelQuotePayload::try_from(huge_rooms),
            Err(FormError::Validation(_))
        ));
        let mut huge_party = form();
        huge_party.children = u32::MAX;
        assert!(matches!(
            HotelQuotePayload::try_from(huge_party),
            Err(FormError::Validation(_))
        ));
    }
}
