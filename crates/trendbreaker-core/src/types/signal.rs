//! Signal and pivot types produced by the indicator pipeline.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Per-bar trading direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Long,
    Short,
    #[default]
    Neutral,
}

impl Direction {
    /// Check if this is an actionable (non-neutral) direction.
    #[inline]
    pub fn is_actionable(&self) -> bool {
        !matches!(self, Direction::Neutral)
    }

    /// Get the opposite direction. Neutral has no opposite.
    pub fn opposite(&self) -> Self {
        match self {
            Direction::Long => Direction::Short,
            Direction::Short => Direction::Long,
            Direction::Neutral => Direction::Neutral,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Long => write!(f, "LONG"),
            Direction::Short => write!(f, "SHORT"),
            Direction::Neutral => write!(f, "NEUTRAL"),
        }
    }
}

/// Pivot classification of a single bar.
///
/// Both flags stay false until `pivot_window_len` bars exist on each side
/// of the bar; a bar inside the confirmation lag is never a pivot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PivotFlags {
    /// High is the maximum of the symmetric window
    pub is_peak: bool,
    /// Low is the minimum of the symmetric window
    pub is_trough: bool,
}

impl PivotFlags {
    /// Check whether the bar is a pivot of either kind.
    #[inline]
    pub fn is_pivot(&self) -> bool {
        self.is_peak || self.is_trough
    }
}

/// Per-bar output of the signal generator.
///
/// `line_value` is the projected trend-line value of the candidate that
/// fired; `None` whenever no breakout fired. Absence is encoded with
/// `Option`, never with a NaN or sentinel price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    pub direction: Direction,
    pub line_value: Option<f64>,
}

impl Signal {
    /// A neutral signal with no line.
    pub fn neutral() -> Self {
        Self {
            direction: Direction::Neutral,
            line_value: None,
        }
    }

    /// A breakout signal in the given direction at the projected line value.
    pub fn breakout(direction: Direction, line_value: f64) -> Self {
        Self {
            direction,
            line_value: Some(line_value),
        }
    }
}

impl Default for Signal {
    fn default() -> Self {
        Self::neutral()
    }
}

/// One row of the per-bar diagnostics stream handed to reporting.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SignalSample {
    pub timestamp: i64,
    pub is_peak: bool,
    pub is_trough: bool,
    pub line_value: Option<f64>,
    pub direction: Direction,
}
