//! Indicator trait definitions.

use crate::error::SignalError;
use crate::types::BarSeries;

/// Trait for indicators computed over a bar series.
///
/// Pivot and trend-line logic needs the full OHLC of each bar, so the
/// input is the series itself rather than a single price column.
pub trait SeriesIndicator: Send + Sync {
    /// The per-bar output type of the indicator.
    type Output;

    /// Calculate one output value per bar of the series.
    ///
    /// Bars inside the warm-up period produce the output type's neutral
    /// value rather than being omitted, so the result always has the same
    /// length as the series.
    fn calculate(&self, series: &BarSeries) -> Vec<Self::Output>;

    /// Number of bars required before the indicator produces signals.
    fn warmup(&self) -> usize;

    /// Get the name of the indicator.
    fn name(&self) -> &str;

    /// Validate that the series holds enough bars.
    fn validate_series(&self, series: &BarSeries) -> Result<(), SignalError> {
        if series.len() < self.warmup() {
            return Err(SignalError::InsufficientData {
                required: self.warmup(),
                available: series.len(),
            });
        }
        Ok(())
    }
}
