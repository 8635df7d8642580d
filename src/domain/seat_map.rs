//! Bus seat layouts and per-departure seat maps.
//!
//! A layout is a grid of cells. Seat cells are numbered `1..=capacity` in
//! row-major order, left to right, skipping every non-seat cell, so the same
//! layout always yields the same numbering.

use std::collections::{BTreeSet, HashSet};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::types::SeatNumber;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SeatMapError {
    #[error("seat layout has no seats")]
    EmptyLayout,
    #[error("seat layout has too many seats")]
    TooManySeats,
    #[error("unknown layout cell code '{0}'")]
    InvalidCode(char),
    #[error("invalid seat layout: {0}")]
    InvalidJson(String),
    #[error("bus capacity {declared} does not match the {layout} seats of its layout")]
    CapacityMismatch { declared: u16, layout: u16 },
    #[error("party is empty")]
    EmptyParty,
    #[error("{selected} seats selected for {expected} people")]
    CountMismatch { expected: u32, selected: usize },
    #[error("seat {0} selected twice")]
    DuplicateSeat(SeatNumber),
    #[error("seat {0} does not exist on this bus")]
    UnknownSeat(SeatNumber),
    #[error("seat {0} is already taken")]
    SeatOccupied(SeatNumber),
    #[error("only {available} seats left, {requested} requested")]
    NotEnoughSeats { requested: u32, available: usize },
}

/// Single cell of a bus layout grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeatCell {
    Seat,
    Aisle,
    Driver,
    Door,
    Empty,
}

impl SeatCell {
    pub const fn code(self) -> char {
        match self {
            SeatCell::Seat => 'S',
            SeatCell::Aisle => '_',
            SeatCell::Driver => 'D',
            SeatCell::Door => 'P',
            SeatCell::Empty => '.',
        }
    }

    pub fn from_code(code: char) -> Result<Self, SeatMapError> {
        match code {
            'S' => Ok(SeatCell::Seat),
            '_' => Ok(SeatCell::Aisle),
            'D' => Ok(SeatCell::Driver),
            'P' => Ok(SeatCell::Door),
            '.' => Ok(SeatCell::Empty),
            other => Err(SeatMapError::InvalidCode(other)),
        }
    }
}

/// Grid describing where the seats of a bus are.
///
/// Stored as a JSON array of row strings, one code character per cell.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct SeatLayout {
    rows: Vec<Vec<SeatCell>>,
    capacity: u16,
}

impl SeatLayout {
    pub fn new(rows: Vec<Vec<SeatCell>>) -> Result<Self, SeatMapError> {
        let seats = rows
            .iter()
            .flatten()
            .filter(|cell| **cell == SeatCell::Seat)
            .count();
        if seats == 0 {
            return Err(SeatMapError::EmptyLayout);
        }
        let capacity = u16::try_from(seats).map_err(|_| SeatMapError::TooManySeats)?;
        Ok(Self { rows, capacity })
    }

    /// Parses rows written with the single-letter cell codes.
    pub fn parse<S: AsRef<str>>(rows: &[S]) -> Result<Self, SeatMapError> {
        let rows = rows
            .iter()
            .map(|row| row.as_ref().trim())
            .filter(|row| !row.is_empty())
            .map(|row| row.chars().map(SeatCell::from_code).collect())
            .collect::<Result<Vec<Vec<SeatCell>>, SeatMapError>>()?;
        Self::new(rows)
    }

    pub fn from_json(value: &str) -> Result<Self, SeatMapError> {
        serde_json::from_str(value).map_err(|e| SeatMapError::InvalidJson(e.to_string()))
    }

    pub fn to_json(&self) -> String {
        serde_json::Value::from(self.row_codes()).to_string()
    }

    /// Default 2+2 coach layout: a driver/door row followed by seat rows.
    pub fn standard(capacity: u16) -> Result<Self, SeatMapError> {
        if capacity == 0 {
            return Err(SeatMapError::EmptyLayout);
        }
        let mut rows = vec![vec![
            SeatCell::Driver,
            SeatCell::Empty,
            SeatCell::Aisle,
            SeatCell::Empty,
            SeatCell::Door,
        ]];
        let mut remaining = capacity;
        while remaining > 0 {
            let mut row = Vec::with_capacity(5);
            for position in 0..5 {
                if position == 2 {
                    row.push(SeatCell::Aisle);
                } else if remaining > 0 {
                    row.push(SeatCell::Seat);
                    remaining -= 1;
                } else {
                    row.push(SeatCell::Empty);
                }
            }
            rows.push(row);
        }
        Self::new(rows)
    }

    pub fn capacity(&self) -> u16 {
        self.capacity
    }

    pub fn rows(&self) -> &[Vec<SeatCell>] {
        &self.rows
    }

    /// Fails when a bus declares a capacity different from its layout.
    pub fn ensure_capacity(&self, declared: u16) -> Result<(), SeatMapError> {
        if declared == self.capacity {
            Ok(())
        } else {
            Err(SeatMapError::CapacityMismatch {
                declared,
                layout: self.capacity,
            })
        }
    }

    pub fn contains(&self, seat: SeatNumber) -> bool {
        seat.get() <= self.capacity
    }

    fn row_codes(&self) -> Vec<String> {
        self.rows
            .iter()
            .map(|row| row.iter().map(|cell| cell.code()).collect())
            .collect()
    }
}

impl TryFrom<Vec<String>> for SeatLayout {
    type Error = SeatMapError;

    fn try_from(rows: Vec<String>) -> Result<Self, Self::Error> {
        Self::parse(rows.as_slice())
    }
}

impl From<SeatLayout> for Vec<String> {
    fn from(layout: SeatLayout) -> Self {
        layout.row_codes()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SeatState {
    Available,
    Occupied,
}

/// Renderable cell of a seat map.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SeatView {
    pub cell: SeatCell,
    pub number: Option<SeatNumber>,
    pub state: Option<SeatState>,
}

/// Occupancy of one layout for one tour or departure.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SeatMap {
    layout: SeatLayout,
    occupied: BTreeSet<SeatNumber>,
}

impl SeatMap {
    /// Seats outside the layout are ignored.
    pub fn new(layout: SeatLayout, occupied: impl IntoIterator<Item = SeatNumber>) -> Self {
        let occupied = occupied
            .into_iter()
            .filter(|seat| layout.contains(*seat))
            .collect();
        Self { layout, occupied }
    }

    pub fn layout(&self) -> &SeatLayout {
        &self.layout
    }

    pub fn capacity(&self) -> u16 {
        self.layout.capacity()
    }

    pub fn state(&self, seat: SeatNumber) -> Option<SeatState> {
        if !self.layout.contains(seat) {
            None
        } else if self.occupied.contains(&seat) {
            Some(SeatState::Occupied)
        } else {
            Some(SeatState::Available)
        }
    }

    pub fn available(&self) -> impl Iterator<Item = SeatNumber> + '_ {
        (1..=self.layout.capacity())
            .filter_map(|n| SeatNumber::new(i32::from(n)).ok())
            .filter(|seat| !self.occupied.contains(seat))
    }

    pub fn available_count(&self) -> usize {
        usize::from(self.layout.capacity()) - self.occupied.len()
    }

    /// Checks a hand-picked selection for a party and returns it sorted.
    pub fn validate_selection(
        &self,
        selected: &[SeatNumber],
        party_size: u32,
    ) -> Result<Vec<SeatNumber>, SeatMapError> {
        if party_size == 0 {
            return Err(SeatMapError::EmptyParty);
        }
        if selected.len() != party_size as usize {
            return Err(SeatMapError::CountMismatch {
                expected: party_size,
                selected: selected.len(),
            });
        }

        let mut seen = HashSet::with_capacity(selected.len());
        for seat in selected {
            if !seen.insert(*seat) {
                return Err(SeatMapError::DuplicateSeat(*seat));
            }
            match self.state(*seat) {
                None => return Err(SeatMapError::UnknownSeat(*seat)),
                Some(SeatState::Occupied) => return Err(SeatMapError::SeatOccupied(*seat)),
                Some(SeatState::Available) => {}
            }
        }

        let mut seats = selected.to_vec();
        seats.sort_unstable();
        Ok(seats)
    }

    /// Picks seats for a party: the first block of consecutive free seats,
    /// otherwise the lowest-numbered free seats.
    pub fn allocate(&self, party_size: u32) -> Result<Vec<SeatNumber>, SeatMapError> {
        if party_size == 0 {
            return Err(SeatMapError::EmptyParty);
        }
        let available: Vec<SeatNumber> = self.available().collect();
        let wanted = party_size as usize;
        if available.len() < wanted {
            return Err(SeatMapError::NotEnoughSeats {
                requested: party_size,
                available: available.len(),
            });
        }

        let block = available.windows(wanted).find(|window| {
            let first = window[0].get();
            window
                .iter()
                .enumerate()
                .all(|(offset, seat)| usize::from(seat.get() - first) == offset)
        });

        Ok(match block {
            Some(window) => window.to_vec(),
            None => available[..wanted].to_vec(),
        })
    }

    /// Layout grid annotated with seat numbers and their state.
    pub fn view(&self) -> Vec<Vec<SeatView>> {
        let mut next: u16 = 0;
        self.layout
            .rows()
            .iter()
            .map(|row| {
                row.iter()
                    .map(|cell| {
                        if *cell == SeatCell::Seat {
                            next += 1;
                            let number = SeatNumber::new(i32::from(next)).ok();
                            SeatView {
                                cell: *cell,
                                number,
                                state: number.and_then(|seat| self.state(seat)),
                            }
                        } else {
                            SeatView {
                                cell: *cell,
                                number: None,
                                state: None,
                            }
                        }
                    })
                    .collect()
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seat(n: i32) -> SeatNumber {
        SeatNumber::new(n).unwrap()
    }

    fn seats(numbers: &[i32]) -> Vec<SeatNumber> {
        numbers.iter().map(|n| seat(*n)).collect()
    }

    #[test]
    fn standard_layout_numbers_every_seat() {
        let layout = SeatLayout::standard(10).unwrap();
        assert_eq!(layout.capacity(), 10);
        assert_eq!(layout.rows().len(), 4);
        assert_eq!(layout.rows()[0][0], SeatCell::Driver);
        assert!(SeatLayout::standard(0).is_err());
    }

    #[test]
    fn layout_json_keeps_grid() {
        let layout = SeatLayout::parse(&["D._.P", "SS_SS", "SS_.."]).unwrap();
        assert_eq!(layout.capacity(), 6);
        let json = layout.to_json();
        assert_eq!(json, r#"["D._.P","SS_SS","SS_.."]"#);
        assert_eq!(SeatLayout::from_json(&json).unwrap(), layout);
    }

    #[test]
    fn layout_rejects_unknown_codes_and_empty_grids() {
        assert_eq!(
            SeatLayout::parse(&["SSX"]),
            Err(SeatMapError::InvalidCode('X'))
        );
        assert_eq!(SeatLayout::parse(&["D_P"]), Err(SeatMapError::EmptyLayout));
        assert!(matches!(
            SeatLayout::from_json("not json"),
            Err(SeatMapError::InvalidJson(_))
        ));
    }

    #[test]
    fn capacity_must_match_layout() {
        let layout = SeatLayout::standard(40).unwrap();
        assert!(layout.ensure_capacity(40).is_ok());
        assert_eq!(
            layout.ensure_capacity(42),
            Err(SeatMapError::CapacityMismatch {
                declared: 42,
                layout: 40
            })
        );
    }

    #[test]
    fn view_numbers_seats_row_major() {
        let layout = SeatLayout::parse(&["S_S", "SS."]).unwrap();
        let map = SeatMap::new(layout, seats(&[2]));
        let view = map.view();
        assert_eq!(view[0][0].number, Some(seat(1)));
        assert_eq!(view[0][1].number, None);
        assert_eq!(view[0][2].number, Some(seat(2)));
        assert_eq!(view[0][2].state, Some(SeatState::Occupied));
        assert_eq!(view[1][1].number, Some(seat(4)));
        assert_eq!(view[1][2].cell, SeatCell::Empty);
    }

    #[test]
    fn selection_must_match_party_size() {
        let map = SeatMap::new(SeatLayout::standard(8).unwrap(), []);
        assert_eq!(
            map.validate_selection(&seats(&[1, 2]), 3),
            Err(SeatMapError::CountMismatch {
                expected: 3,
                selected: 2
            })
        );
        assert_eq!(
            map.validate_selection(&[], 0),
            Err(SeatMapError::EmptyParty)
        );
    }

    #[test]
    fn selection_rejects_taken_unknown_and_duplicate_seats() {
        let map = SeatMap::new(SeatLayout::standard(8).unwrap(), seats(&[3]));
        assert_eq!(
            map.validate_selection(&seats(&[3, 4]), 2),
            Err(SeatMapError::SeatOccupied(seat(3)))
        );
        assert_eq!(
            map.validate_selection(&seats(&[9, 4]), 2),
            Err(SeatMapError::UnknownSeat(seat(9)))
        );
        assert_eq!(
            map.validate_selection(&seats(&[4, 4]), 2),
            Err(SeatMapError::DuplicateSeat(seat(4)))
        );
        assert_eq!(
            map.validate_selection(&seats(&[5, 1]), 2),
            Ok(seats(&[1, 5]))
        );
    }

    #[test]
    fn allocation_prefers_consecutive_block() {
        let map = SeatMap::new(SeatLayout::standard(8).unwrap(), seats(&[2, 5]));
        assert_eq!(map.allocate(2).unwrap(), seats(&[3, 4]));
        assert_eq!(map.allocate(3).unwrap(), seats(&[6, 7, 8]));
    }

    #[test]
    fn allocation_falls_back_to_lowest_free_seats() {
        let map = SeatMap::new(SeatLayout::standard(6).unwrap(), seats(&[2, 4, 6]));
        assert_eq!(map.allocate(3).unwrap(), seats(&[1, 3, 5]));
    }

    #[test]
    fn allocation_is_exclusive_and_deterministic() {
        let map = SeatMap::new(SeatLayout::standard(12).unwrap(), seats(&[1, 7, 8]));
        let first = map.allocate(4).unwrap();
        assert_eq!(first, map.allocate(4).unwrap());
        assert!(first.iter().all(|s| map.state(*s) == Some(SeatState::Available)));
        let unique: HashSet<_> = first.iter().collect();
        assert_eq!(unique.len(), first.len());
    }

    #[test]
    fn allocation_fails_when_bus_is_full() {
        let map = SeatMap::new(SeatLayout::standard(4).unwrap(), seats(&[1, 2, 3]));
        assert_eq!(map.available_count(), 1);
        assert_eq!(
            map.allocate(2),
            Err(SeatMapError::NotEnoughSeats {
                requested: 2,
                available: 1
            })
        );
    }

    #[test]
    fn occupied_seats_outside_layout_are_ignored() {
        let map = SeatMap::new(SeatLayout::standard(4).unwrap(), seats(&[10]));
        assert_eq!(map.available_count(), 4);
    }
}
