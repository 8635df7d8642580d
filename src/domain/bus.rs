use serde::Serialize;

use crate::domain::seat_map::{SeatLayout, SeatMapError};
use crate::domain::types::{BusId, BusName};

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct Bus {
    pub id: BusId,
    pub name: BusName,
    pub plate: Option<String>,
    pub layout: SeatLayout,
}

impl Bus {
    pub fn capacity(&self) -> u16 {
        self.layout.capacity()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct NewBus {
    pub name: BusName,
    pub plate: Option<String>,
    pub layout: SeatLayout,
}

impl NewBus {
    /// Without an explicit layout the standard coach layout for `capacity`
    /// is used; with one, its seat count must equal `capacity`.
    pub fn try_new(
        name: BusName,
        plate: Option<String>,
        capacity: u16,
        layout: Option<SeatLayout>,
    ) -> Result<Self, SeatMapError> {
        let layout = match layout {
            Some(layout) => {
                layout.ensure_capacity(capacity)?;
                layout
            }
            None => SeatLayout::standard(capacity)?,
        };
        Ok(Self {
            name,
            plate: plate
                .map(|s| s.trim().to_uppercase())
                .filter(|s| !s.is_empty()),
            layout,
        })
    }

    pub fn capacity(&self) -> u16 {
        self.layout.capacity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_layout_from_capacity() {
        let bus = NewBus::try_new(BusName::new("Irizar").unwrap(), Some(" abc-12 ".into()), 44, None)
            .unwrap();
        assert_eq!(bus.capacity(), 44);
        assert_eq!(bus.plate.as_deref(), Some("ABC-12"));
    }

    #[test]
    fn explicit_layout_must_match_capacity() {
        let layout = SeatLayout::parse(&["SS_SS"]).unwrap();
        let result = NewBus::try_new(BusName::new("Van").unwrap(), None, 12, Some(layout));
        assert_eq!(
            result,
            Err(SeatMapError::CapacityMismatch {
                declared: 12,
                layout: 4
            })
        );
    }
}
