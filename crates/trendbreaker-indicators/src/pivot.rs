//! Pivot classification of bars.

use trendbreaker_core::traits::SeriesIndicator;
use trendbreaker_core::types::{BarSeries, PivotFlags};

use crate::extrema::{rolling_max, rolling_min};

/// Classifies each bar as peak pivot, trough pivot, or neither.
///
/// A bar is a peak when its high is the maximum of the symmetric window of
/// radius `window` around it, and a trough when its low is the window
/// minimum. Bars with fewer than `window` neighbours on either side are
/// never pivots; ties are all flagged, there is no single-winner rule.
#[derive(Debug, Clone)]
pub struct PivotDetector {
    window: usize,
}

impl PivotDetector {
    /// Create a detector with the given window radius.
    pub fn new(window: usize) -> Self {
        assert!(window > 0, "pivot window must be greater than 0");
        Self { window }
    }

    /// The window radius.
    pub fn window(&self) -> usize {
        self.window
    }

    /// Classify every index of the given price columns.
    ///
    /// The result always has one entry per bar; entries inside the edge
    /// regions stay at their default (non-pivot) value.
    pub fn detect(&self, highs: &[f64], lows: &[f64]) -> Vec<PivotFlags> {
        let n = highs.len().min(lows.len());
        let mut flags = vec![PivotFlags::default(); n];

        let span = 2 * self.window + 1;
        if n < span {
            return flags;
        }

        // Window extreme for the span starting at j covers bars [j, j+span).
        // Bar i sits at the centre of the span starting at i - window.
        let max_by_start = rolling_max(&highs[..n], span);
        let min_by_start = rolling_min(&lows[..n], span);

        for i in self.window..n - self.window {
            let start = i - self.window;
            flags[i].is_peak = highs[i] == max_by_start[start];
            flags[i].is_trough = lows[i] == min_by_start[start];
        }

        flags
    }
}

impl SeriesIndicator for PivotDetector {
    type Output = PivotFlags;

    fn calculate(&self, series: &BarSeries) -> Vec<PivotFlags> {
        self.detect(&series.highs(), &series.lows())
    }

    fn warmup(&self) -> usize {
        2 * self.window + 1
    }

    fn name(&self) -> &str {
        "pivot"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detect(window: usize, highs: &[f64], lows: &[f64]) -> Vec<PivotFlags> {
        PivotDetector::new(window).detect(highs, lows)
    }

    #[test]
    fn test_peak_and_trough_detection() {
        let highs = vec![10.0, 11.0, 15.0, 11.0, 10.0, 9.0, 10.0];
        let lows = vec![8.0, 9.0, 13.0, 9.0, 8.0, 5.0, 8.0];

        let flags = detect(2, &highs, &lows);

        assert!(flags[2].is_peak);
        assert!(!flags[2].is_trough);
        assert!(!flags[3].is_peak);
        // Trough at 5 is within the trailing edge for window 2 with 7 bars:
        // it needs bars up to index 7, which do not exist.
        assert!(!flags[5].is_trough);
    }

    #[test]
    fn test_symmetry_against_naive_scan() {
        let highs: Vec<f64> = (0..120)
            .map(|i| 100.0 + (i as f64 * 0.35).sin() * 8.0)
            .collect();
        let lows: Vec<f64> = highs.iter().map(|h| h - 3.0).collect();
        let w = 4;

        let flags = detect(w, &highs, &lows);

        for i in 0..highs.len() {
            if i < w || i + w >= highs.len() {
                assert!(!flags[i].is_peak && !flags[i].is_trough, "edge bar {}", i);
                continue;
            }
            let win_max = highs[i - w..=i + w]
                .iter()
                .cloned()
                .fold(f64::NEG_INFINITY, f64::max);
            let win_min = lows[i - w..=i + w]
                .iter()
                .cloned()
                .fold(f64::INFINITY, f64::min);
            assert_eq!(flags[i].is_peak, highs[i] == win_max, "peak at {}", i);
            assert_eq!(flags[i].is_trough, lows[i] == win_min, "trough at {}", i);
        }
    }

    #[test]
    fn test_confirmation_lag() {
        // No bar within `window` of the series end may be flagged, no
        // matter how extreme its price.
        let mut highs = vec![10.0; 20];
        let mut lows = vec![9.0; 20];
        highs[18] = 50.0;
        lows[19] = 1.0;

        let flags = detect(3, &highs, &lows);
        assert!(!flags[18].is_peak);
        assert!(!flags[19].is_trough);
    }

    #[test]
    fn test_ties_all_flagged() {
        let highs = vec![10.0, 12.0, 11.0, 12.0, 10.0, 9.0, 9.5];
        let lows = vec![9.0, 10.0, 10.0, 10.0, 9.0, 8.5, 9.0];

        let flags = detect(1, &highs, &lows);
        assert!(flags[1].is_peak);
        assert!(flags[3].is_peak);
    }

    #[test]
    fn test_degenerate_flat_data_does_not_crash() {
        let highs = vec![10.0; 9];
        let lows = vec![10.0; 9];

        let flags = detect(2, &highs, &lows);
        // Every interior bar ties for both extremes; both flags set, and
        // nothing panics.
        assert!(flags[4].is_peak && flags[4].is_trough);
    }

    #[test]
    fn test_short_series_all_false() {
        let flags = detect(5, &[10.0, 11.0, 12.0], &[9.0, 10.0, 11.0]);
        assert!(flags.iter().all(|f| !f.is_pivot()));
    }
}
