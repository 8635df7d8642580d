//! Lodging occupancy: splitting a party into double, triple and quad rooms.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum OccupancyError {
    #[error("a reservation needs at least one adult")]
    NoAdults,
    #[error("at least one room is required")]
    NoRooms,
    #[error("rooms hold {capacity} people but the party has {people}")]
    InsufficientCapacity { capacity: u32, people: u32 },
    #[error("{rooms} rooms for {people} people leaves a room empty")]
    TooManyRooms { rooms: u32, people: u32 },
    #[error("{rooms} rooms need an adult each but only {adults} adults travel")]
    NotEnoughAdults { rooms: u32, adults: u32 },
    #[error("party or room counts are too large")]
    TooLarge,
}

/// Adults and children travelling on one reservation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roster {
    adults: u32,
    children: u32,
}

impl Roster {
    pub fn new(adults: u32, children: u32) -> Result<Self, OccupancyError> {
        if adults == 0 {
            return Err(OccupancyError::NoAdults);
        }
        adults.checked_add(children).ok_or(OccupancyError::TooLarge)?;
        Ok(Self { adults, children })
    }

    pub const fn adults(&self) -> u32 {
        self.adults
    }

    pub const fn children(&self) -> u32 {
        self.children
    }

    pub const fn total(&self) -> u32 {
        self.adults.saturating_add(self.children)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoomKind {
    Double,
    Triple,
    Quad,
}

impl RoomKind {
    pub const fn capacity(self) -> u32 {
        match self {
            RoomKind::Double => 2,
            RoomKind::Triple => 3,
            RoomKind::Quad => 4,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            RoomKind::Double => "double",
            RoomKind::Triple => "triple",
            RoomKind::Quad => "quad",
        }
    }
}

/// Number of rooms of each kind.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomCounts {
    pub doubles: u32,
    pub triples: u32,
    pub quads: u32,
}

impl RoomCounts {
    pub const fn new(doubles: u32, triples: u32, quads: u32) -> Self {
        Self {
            doubles,
            triples,
            quads,
        }
    }

    /// Counts whose room and bed totals fit in a `u32`.
    pub fn checked(doubles: u32, triples: u32, quads: u32) -> Result<Self, OccupancyError> {
        let counts = Self::new(doubles, triples, quads);
        counts.checked_rooms().ok_or(OccupancyError::TooLarge)?;
        counts.checked_capacity().ok_or(OccupancyError::TooLarge)?;
        Ok(counts)
    }

    fn checked_rooms(&self) -> Option<u32> {
        self.doubles
            .checked_add(self.triples)?
            .checked_add(self.quads)
    }

    fn checked_capacity(&self) -> Option<u32> {
        self.doubles
            .checked_mul(2)?
            .checked_add(self.triples.checked_mul(3)?)?
            .checked_add(self.quads.checked_mul(4)?)
    }

    pub fn rooms(&self) -> u32 {
        self.checked_rooms().unwrap_or(u32::MAX)
    }

    pub fn capacity(&self) -> u32 {
        self.checked_capacity().unwrap_or(u32::MAX)
    }

    /// Fewest rooms for `people`, preferring larger rooms.
    pub fn for_people(people: u32) -> Self {
        let mut counts = Self::new(0, 0, people / 4);
        match people % 4 {
            3 => counts.triples += 1,
            2 => counts.doubles += 1,
            1 if counts.quads > 0 => {
                // 4 + 1 does not fit a room, 3 + 2 does
                counts.quads -= 1;
                counts.triples += 1;
                counts.doubles += 1;
            }
            1 => counts.doubles += 1,
            _ => {}
        }
        counts
    }

    fn kinds(&self) -> impl Iterator<Item = RoomKind> {
        std::iter::repeat_n(RoomKind::Quad, self.quads as usize)
            .chain(std::iter::repeat_n(RoomKind::Triple, self.triples as usize))
            .chain(std::iter::repeat_n(RoomKind::Double, self.doubles as usize))
    }
}

/// Occupants placed in one room.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct RoomAssignment {
    pub kind: RoomKind,
    pub adults: u32,
    pub children: u32,
}

impl RoomAssignment {
    pub const fn occupants(&self) -> u32 {
        self.adults + self.children
    }
}

/// A roster distributed over rooms.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RoomSplit {
    roster: Roster,
    counts: RoomCounts,
    rooms: Vec<RoomAssignment>,
}

impl RoomSplit {
    /// Splits the roster into the fewest rooms.
    pub fn auto(roster: Roster) -> Result<Self, OccupancyError> {
        Self::place(roster, RoomCounts::for_people(roster.total()))
    }

    /// Uses room counts chosen by an operator.
    pub fn manual(roster: Roster, counts: RoomCounts) -> Result<Self, OccupancyError> {
        let people = roster.total();
        let counts = RoomCounts::checked(counts.doubles, counts.triples, counts.quads)?;
        if counts.rooms() == 0 {
            return Err(OccupancyError::NoRooms);
        }
        if counts.capacity() < people {
            return Err(OccupancyError::InsufficientCapacity {
                capacity: counts.capacity(),
                people,
            });
        }
        if counts.rooms() > people {
            return Err(OccupancyError::TooManyRooms {
                rooms: counts.rooms(),
                people,
            });
        }
        Self::place(roster, counts)
    }

    // Largest rooms first; one adult per room before anyone else is placed.
    fn place(roster: Roster, counts: RoomCounts) -> Result<Self, OccupancyError> {
        if counts.rooms() > roster.adults() {
            return Err(OccupancyError::NotEnoughAdults {
                rooms: counts.rooms(),
                adults: roster.adults(),
            });
        }

        let mut rooms: Vec<RoomAssignment> = counts
            .kinds()
            .map(|kind| RoomAssignment {
                kind,
                adults: 1,
                children: 0,
            })
            .collect();

        let mut adults = roster.adults() - counts.rooms();
        let mut children = roster.children();
        for room in &mut rooms {
            let free = room.kind.capacity() - room.occupants();
            let placed = free.min(adults);
            room.adults += placed;
            adults -= placed;

            let free = room.kind.capacity() - room.occupants();
            let placed = free.min(children);
            room.children += placed;
            children -= placed;
        }

        if adults > 0 || children > 0 {
            return Err(OccupancyError::InsufficientCapacity {
                capacity: counts.capacity(),
                people: roster.total(),
            });
        }

        Ok(Self {
            roster,
            counts,
            rooms,
        })
    }

    pub fn roster(&self) -> Roster {
        self.roster
    }

    pub fn counts(&self) -> RoomCounts {
        self.counts
    }

    pub fn rooms(&self) -> &[RoomAssignment] {
        &self.rooms
    }

    /// Adults sleeping in rooms of the given kind.
    pub fn adults_in(&self, kind: RoomKind) -> u32 {
        self.rooms
            .iter()
            .filter(|room| room.kind == kind)
            .map(|room| room.adults)
            .sum()
    }

    pub fn occupants(&self) -> u32 {
        self.rooms.iter().map(RoomAssignment::occupants).sum()
    }
}
