//! Trend lines through consecutive qualifying pivots.

use trendbreaker_core::types::PivotFlags;

/// A two-point trend line projected to an evaluation bar.
///
/// Recomputed fresh for every bar; nothing here persists across bars.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrendLine {
    /// Index of the older anchor pivot
    pub anchor_old: usize,
    /// Index of the newer anchor pivot
    pub anchor_new: usize,
    /// Price change per bar along the line
    pub slope: f64,
    /// Line value extrapolated to the evaluation bar
    pub projected: f64,
}

impl TrendLine {
    /// Fit a resistance line through peak pivots and project it to `target`.
    ///
    /// The newer anchor is the most recent confirmable peak; the older one
    /// is the most recent earlier peak with a strictly higher high. Either
    /// anchor missing means no line this bar.
    pub fn resistance(
        highs: &[f64],
        flags: &[PivotFlags],
        confirm_start: usize,
        confirm_end: usize,
        target: usize,
    ) -> Option<Self> {
        Self::fit(
            highs,
            flags,
            confirm_start,
            confirm_end,
            target,
            |f| f.is_peak,
            |older, newer| older > newer,
        )
    }

    /// Fit a support line through trough pivots; mirror of `resistance`.
    pub fn support(
        lows: &[f64],
        flags: &[PivotFlags],
        confirm_start: usize,
        confirm_end: usize,
        target: usize,
    ) -> Option<Self> {
        Self::fit(
            lows,
            flags,
            confirm_start,
            confirm_end,
            target,
            |f| f.is_trough,
            |older, newer| older < newer,
        )
    }

    fn fit(
        prices: &[f64],
        flags: &[PivotFlags],
        confirm_start: usize,
        confirm_end: usize,
        target: usize,
        is_anchor: fn(&PivotFlags) -> bool,
        qualifies: fn(f64, f64) -> bool,
    ) -> Option<Self> {
        if confirm_end >= prices.len() || confirm_end < confirm_start {
            return None;
        }

        let anchor_new = (confirm_start..=confirm_end)
            .rev()
            .find(|&i| is_anchor(&flags[i]))?;
        let anchor_old = (confirm_start..anchor_new)
            .rev()
            .find(|&i| is_anchor(&flags[i]) && qualifies(prices[i], prices[anchor_new]))?;

        // anchor_old < anchor_new strictly, so the denominator is never zero.
        let slope = (prices[anchor_new] - prices[anchor_old]) / (anchor_new - anchor_old) as f64;
        let projected = prices[anchor_new] + slope * (target - anchor_new) as f64;

        Some(Self {
            anchor_old,
            anchor_new,
            slope,
            projected,
        })
    }
}
