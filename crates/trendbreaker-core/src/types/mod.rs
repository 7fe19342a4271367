//! Core data types for the trend-breaker system.

mod ohlcv;
mod order;
mod position;
mod signal;
mod timeframe;

pub use ohlcv::{Bar, BarSeries};
pub use order::{ExitReason, Fill, IntentAction, OrderIntent, TargetExposure};
pub use position::{Position, PositionSide, PositionState};
pub use signal::{Direction, PivotFlags, Signal, SignalSample};
pub use timeframe::Timeframe;
