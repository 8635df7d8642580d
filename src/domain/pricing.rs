//! Price quotes derived from tour, bus and hotel rate tables.
//!
//! All amounts are integer cents. A quote is a list of lines whose amounts
//! always add up to the quote total.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::occupancy::{RoomCounts, RoomKind, RoomSplit, Roster};
use crate::domain::types::{Money, Percent};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PricingError {
    #[error("price calculation overflowed")]
    Overflow,
}

/// Per-person tour prices by room occupancy.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TourRates {
    pub double: Money,
    pub triple: Money,
    pub quad: Money,
    pub child: Money,
}

impl TourRates {
    pub fn adult_rate(&self, kind: RoomKind) -> Money {
        match kind {
            RoomKind::Double => self.double,
            RoomKind::Triple => self.triple,
            RoomKind::Quad => self.quad,
        }
    }
}

/// Per-person fares of a bus route.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusFare {
    pub adult: Money,
    pub child: Money,
}

/// Nightly hotel cost of a whole room by kind.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NightlyRoomCosts {
    pub double: Money,
    pub triple: Money,
    pub quad: Money,
}

impl NightlyRoomCosts {
    pub fn room_cost(&self, kind: RoomKind) -> Money {
        match kind {
            RoomKind::Double => self.double,
            RoomKind::Triple => self.triple,
            RoomKind::Quad => self.quad,
        }
    }
}

/// Add-on service charged per traveller.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Extra {
    pub name: String,
    pub price_per_person: Money,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "detail", rename_all = "snake_case")]
pub enum QuoteItem {
    Adult(RoomKind),
    Child,
    Extra(String),
    AdultFare,
    ChildFare,
    Room(RoomKind),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct QuoteLine {
    pub item: QuoteItem,
    pub quantity: u32,
    pub unit_price: Money,
    pub amount: Money,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct PriceQuote {
    pub lines: Vec<QuoteLine>,
    pub total: Money,
}

impl PriceQuote {
    fn push(&mut self, item: QuoteItem, quantity: u32, unit_price: Money) -> Result<(), PricingError> {
        if quantity == 0 {
            return Ok(());
        }
        let amount = unit_price
            .checked_mul(quantity)
            .ok_or(PricingError::Overflow)?;
        self.total = self.total.checked_add(amount).ok_or(PricingError::Overflow)?;
        self.lines.push(QuoteLine {
            item,
            quantity,
            unit_price,
            amount,
        });
        Ok(())
    }
}

const ROOM_KINDS: [RoomKind; 3] = [RoomKind::Double, RoomKind::Triple, RoomKind::Quad];

/// Tour price: adults pay their room's rate, children the child rate, and
/// every traveller pays each selected extra.
pub fn quote_tour(
    rates: &TourRates,
    split: &RoomSplit,
    extras: &[Extra],
) -> Result<PriceQuote, PricingError> {
    let mut quote = PriceQuote::default();
    for kind in ROOM_KINDS {
        quote.push(QuoteItem::Adult(kind), split.adults_in(kind), rates.adult_rate(kind))?;
    }
    let roster = split.roster();
    quote.push(QuoteItem::Child, roster.children(), rates.child)?;
    for extra in extras {
        quote.push(
            QuoteItem::Extra(extra.name.clone()),
            roster.total(),
            extra.price_per_person,
        )?;
    }
    Ok(quote)
}

/// Bus-only trip price.
pub fn quote_bus(fare: &BusFare, roster: Roster) -> Result<PriceQuote, PricingError> {
    let mut quote = PriceQuote::default();
    quote.push(QuoteItem::AdultFare, roster.adults(), fare.adult)?;
    quote.push(QuoteItem::ChildFare, roster.children(), fare.child)?;
    Ok(quote)
}

/// Agency cost of lodging the given rooms for `nights` nights.
pub fn quote_hotel(
    costs: &NightlyRoomCosts,
    counts: RoomCounts,
    nights: u32,
) -> Result<PriceQuote, PricingError> {
    let mut quote = PriceQuote::default();
    for kind in ROOM_KINDS {
        let rooms = match kind {
            RoomKind::Double => counts.doubles,
            RoomKind::Triple => counts.triples,
            RoomKind::Quad => counts.quads,
        };
        let room_nights = rooms.checked_mul(nights).ok_or(PricingError::Overflow)?;
        quote.push(QuoteItem::Room(kind), room_nights, costs.room_cost(kind))?;
    }
    Ok(quote)
}

/// Minimum deposit, rounded up to the cent.
pub fn deposit(total: Money, percent: Percent) -> Money {
    let total = u128::try_from(total.cents()).unwrap_or_default();
    let cents = (total * u128::from(percent.get())).div_ceil(100);
    Money::from_cents(i64::try_from(cents).unwrap_or(i64::MAX)).unwrap_or(Money::ZERO)
}

/// Outstanding amount after payments.
pub fn balance(total: Money, paid: Money) -> Money {
    total.saturating_sub(paid)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn money(cents: i64) -> Money {
        Money::from_cents(cents).unwrap()
    }

    fn rates() -> TourRates {
        TourRates {
            double: money(500_000),
            triple: money(450_000),
            quad: money(400_000),
            child: money(250_000),
        }
    }

    #[test]
    fn couple_pays_double_rate() {
        let split = RoomSplit::auto(Roster::new(2, 0).unwrap()).unwrap();
        let quote = quote_tour(&rates(), &split, &[]).unwrap();
        assert_eq!(quote.lines.len(), 1);
        assert_eq!(quote.lines[0].item, QuoteItem::Adult(RoomKind::Double));
        assert_eq!(quote.total, money(1_000_000));
    }

    #[test]
    fn family_pays_quad_and_child_rates_plus_extras() {
        let split = RoomSplit::auto(Roster::new(2, 2).unwrap()).unwrap();
        let extras = vec![Extra {
            name: "Museum tickets".to_string(),
            price_per_person: money(15_000),
        }];
        let quote = quote_tour(&rates(), &split, &extras).unwrap();
        // 2 * 4000 + 2 * 2500 + 4 * 150
        assert_eq!(quote.total, money(1_360_000));
        let sum: i64 = quote.lines.iter().map(|line| line.amount.cents()).sum();
        assert_eq!(sum, quote.total.cents());
    }

    #[test]
    fn mixed_rooms_are_priced_per_room_kind() {
        let split = RoomSplit::auto(Roster::new(5, 0).unwrap()).unwrap();
        let quote = quote_tour(&rates(), &split, &[]).unwrap();
        assert_eq!(quote.total, money(3 * 450_000 + 2 * 500_000));
    }

    #[test]
    fn bus_fare_by_age() {
        let fare = BusFare {
            adult: money(80_000),
            child: money(40_000),
        };
        let quote = quote_bus(&fare, Roster::new(2, 1).unwrap()).unwrap();
        assert_eq!(quote.total, money(200_000));
        assert_eq!(quote.lines.len(), 2);
    }

    #[test]
    fn hotel_quote_multiplies_nights() {
        let costs = NightlyRoomCosts {
            double: money(120_000),
            triple: money(150_000),
            quad: money(180_000),
        };
        let quote = quote_hotel(&costs, RoomCounts::new(1, 1, 0), 3).unwrap();
        assert_eq!(quote.total, money(3 * 120_000 + 3 * 150_000));
    }

    #[test]
    fn overflow_is_reported() {
        let rates = TourRates {
            double: money(i64::MAX),
            ..TourRates::default()
        };
        let split = RoomSplit::auto(Roster::new(2, 0).unwrap()).unwrap();
        assert_eq!(quote_tour(&rates, &split, &[]), Err(PricingError::Overflow));
    }

    #[test]
    fn deposit_rounds_up() {
        let percent = Percent::new(30).unwrap();
        assert_eq!(deposit(money(1_001), percent), money(301));
        assert_eq!(deposit(money(0), percent), Money::ZERO);
    }

    #[test]
    fn balance_never_negative() {
        assert_eq!(balance(money(500), money(200)), money(300));
        assert_eq!(balance(money(500), money(900)), Money::ZERO);
    }
}
