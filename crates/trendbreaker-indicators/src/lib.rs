//! Pivot detection and trend-line breakout signals.
//!
//! This crate implements the signal half of the trend-breaker pipeline:
//! - Sliding-window extrema over price columns (monotonic deque, O(n))
//! - Pivot classification of bars into peaks and troughs
//! - Trend-line fitting through consecutive qualifying pivots
//! - The per-bar breakout signal generator with mutual exclusion

pub mod extrema;
pub mod pivot;
pub mod pivot_line;
pub mod trend_line;

pub use pivot::PivotDetector;
pub use pivot_line::PivotLine;
pub use trend_line::TrendLine;
