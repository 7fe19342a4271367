//! Position state owned by the position engine.

use serde::{Deserialize, Serialize};

use super::Direction;

/// Side of an open position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PositionSide {
    Long,
    Short,
}

impl PositionSide {
    /// Get the opposite side.
    pub fn opposite(&self) -> Self {
        match self {
            PositionSide::Long => PositionSide::Short,
            PositionSide::Short => PositionSide::Long,
        }
    }

    /// Convert an actionable direction into a side.
    pub fn from_direction(direction: Direction) -> Option<Self> {
        match direction {
            Direction::Long => Some(PositionSide::Long),
            Direction::Short => Some(PositionSide::Short),
            Direction::Neutral => None,
        }
    }
}

impl std::fmt::Display for PositionSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PositionSide::Long => write!(f, "LONG"),
            PositionSide::Short => write!(f, "SHORT"),
        }
    }
}

/// State of the position machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PositionState {
    #[default]
    Flat,
    Long,
    Short,
}

/// A position in a single instrument.
///
/// The value is exclusively owned by one strategy instance and mutated only
/// through these methods. Size is either zero or one full allocation; there
/// is no partial sizing and no pyramiding.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub state: PositionState,
    /// Entry price of the open position; 0.0 while flat
    pub entry_price: f64,
    /// 0.0 while flat, 1.0 (full allocation) while positioned
    pub size: f64,
}

impl Position {
    /// Create a flat position.
    pub fn flat() -> Self {
        Self {
            state: PositionState::Flat,
            entry_price: 0.0,
            size: 0.0,
        }
    }

    #[inline]
    pub fn is_flat(&self) -> bool {
        self.state == PositionState::Flat
    }

    #[inline]
    pub fn is_long(&self) -> bool {
        self.state == PositionState::Long
    }

    #[inline]
    pub fn is_short(&self) -> bool {
        self.state == PositionState::Short
    }

    /// Side of the open position, None while flat.
    pub fn side(&self) -> Option<PositionSide> {
        match self.state {
            PositionState::Flat => None,
            PositionState::Long => Some(PositionSide::Long),
            PositionState::Short => Some(PositionSide::Short),
        }
    }

    /// Open a full position. Only legal from Flat.
    pub fn open(&mut self, side: PositionSide, entry_price: f64) {
        debug_assert!(self.is_flat(), "re-entry is only possible from flat");
        self.state = match side {
            PositionSide::Long => PositionState::Long,
            PositionSide::Short => PositionState::Short,
        };
        self.entry_price = entry_price;
        self.size = 1.0;
    }

    /// Overwrite the entry price with the broker's execution price.
    pub fn set_entry_price(&mut self, price: f64) {
        if !self.is_flat() {
            self.entry_price = price;
        }
    }

    /// Flatten the position, returning the side that was closed.
    pub fn flatten(&mut self) -> Option<PositionSide> {
        let side = self.side();
        self.state = PositionState::Flat;
        self.entry_price = 0.0;
        self.size = 0.0;
        side
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::flat()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_close_cycle() {
        let mut position = Position::flat();
        assert!(position.is_flat());
        assert!(position.side().is_none());

        position.open(PositionSide::Long, 100.0);
        assert!(position.is_long());
        assert_eq!(position.entry_price, 100.0);
        assert_eq!(position.size, 1.0);

        let closed = position.flatten();
        assert_eq!(closed, Some(PositionSide::Long));
        assert!(position.is_flat());
        assert_eq!(position.size, 0.0);
    }

    #[test]
    fn test_fill_overrides_entry_price() {
        let mut position = Position::flat();
        position.open(PositionSide::Short, 100.0);
        position.set_entry_price(99.5);
        assert_eq!(position.entry_price, 99.5);
    }

    #[test]
    fn test_side_from_direction() {
        assert_eq!(
            PositionSide::from_direction(Direction::Long),
            Some(PositionSide::Long)
        );
        assert_eq!(PositionSide::from_direction(Direction::Neutral), None);
    }
}
