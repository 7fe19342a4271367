//! The pivot-line breakout signal generator.

use trendbreaker_core::traits::SeriesIndicator;
use trendbreaker_core::types::{BarSeries, Direction, PivotFlags, Signal, SignalSample};

use crate::pivot::PivotDetector;
use crate::trend_line::TrendLine;

/// Generates a per-bar breakout direction from pivot trend lines.
///
/// Each bar `t` is evaluated over the trailing history window of
/// `window * history_multiple` bars ending at `t`. The trailing `window`
/// bars of that window are the confirmation lag and carry no usable pivots.
///
/// A long breakout needs a descending resistance line through peak pivots
/// with the bar opening below and closing above its projection; a short
/// breakout mirrors this with an ascending support line through troughs.
/// If both would fire on one bar the signal is suppressed to neutral.
#[derive(Debug, Clone)]
pub struct PivotLine {
    window: usize,
    history_multiple: usize,
}

impl PivotLine {
    /// Create a generator from the pivot window radius and the history
    /// window length expressed as a multiple of it.
    pub fn new(window: usize, history_multiple: usize) -> Self {
        assert!(window > 0, "pivot window must be greater than 0");
        assert!(history_multiple > 0, "history multiple must be greater than 0");
        Self {
            window,
            history_multiple,
        }
    }

    /// Length of the trailing history window in bars.
    pub fn history_len(&self) -> usize {
        self.window * self.history_multiple
    }

    /// Evaluate the signal for the single bar `t` of the series.
    ///
    /// This is the streaming path: only the trailing window plus the pivot
    /// context ahead of it is scanned, so per-bar cost is bounded by the
    /// window length regardless of how long the series has grown.
    pub fn signal_at(&self, series: &BarSeries, t: usize) -> Signal {
        let len = self.history_len();
        if t >= series.len() || t + 1 < len || t < self.window {
            return Signal::neutral();
        }

        let confirm_start = t + 1 - len;
        let ctx_start = confirm_start.saturating_sub(self.window);
        let bars = &series.bars()[ctx_start..=t];

        let opens: Vec<f64> = bars.iter().map(|b| b.open).collect();
        let highs: Vec<f64> = bars.iter().map(|b| b.high).collect();
        let lows: Vec<f64> = bars.iter().map(|b| b.low).collect();
        let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();

        let flags = PivotDetector::new(self.window).detect(&highs, &lows);
        self.evaluate(&opens, &highs, &lows, &closes, &flags, t - ctx_start)
    }

    /// Per-bar diagnostics rows for the full series: pivot flags, line
    /// value, and direction, as consumed by the reporting collaborator.
    pub fn samples(&self, series: &BarSeries) -> Vec<SignalSample> {
        let flags = PivotDetector::new(self.window).calculate(series);
        let signals = self.calculate(series);

        series
            .iter()
            .zip(flags.iter().zip(signals.iter()))
            .map(|(bar, (flag, signal))| SignalSample {
                timestamp: bar.timestamp,
                is_peak: flag.is_peak,
                is_trough: flag.is_trough,
                line_value: signal.line_value,
                direction: signal.direction,
            })
            .collect()
    }

    /// Core evaluation over pre-extracted columns and pivot flags.
    ///
    /// Scans only the confirmable range `[t+1-len, t-window]`, so pivot
    /// flags computed over the full series never leak future data into the
    /// decision for bar `t`.
    fn evaluate(
        &self,
        opens: &[f64],
        highs: &[f64],
        lows: &[f64],
        closes: &[f64],
        flags: &[PivotFlags],
        t: usize,
    ) -> Signal {
        let len = self.history_len();
        if t + 1 < len || t < self.window {
            return Signal::neutral();
        }
        let confirm_start = t + 1 - len;
        let confirm_end = t - self.window;

        let long = TrendLine::resistance(highs, flags, confirm_start, confirm_end, t)
            .filter(|line| {
                line.slope < 0.0 && opens[t] < line.projected && line.projected < closes[t]
            });
        let short = TrendLine::support(lows, flags, confirm_start, confirm_end, t)
            .filter(|line| {
                line.slope > 0.0 && closes[t] < line.projected && line.projected < opens[t]
            });

        resolve_directions(
            long.map(|line| line.projected),
            short.map(|line| line.projected),
        )
    }
}

/// Combine the two breakout candidates into one per-bar signal.
///
/// Simultaneous long and short breakouts suppress each other to neutral
/// rather than racing; a lone candidate carries its projected line value.
fn resolve_directions(long: Option<f64>, short: Option<f64>) -> Signal {
    match (long, short) {
        (Some(_), Some(_)) => Signal::neutral(),
        (Some(projected), None) => Signal::breakout(Direction::Long, projected),
        (None, Some(projected)) => Signal::breakout(Direction::Short, projected),
        (None, None) => Signal::neutral(),
    }
}

impl SeriesIndicator for PivotLine {
    type Output = Signal;

    fn calculate(&self, series: &BarSeries) -> Vec<Signal> {
        let opens = series.opens();
        let highs = series.highs();
        let lows = series.lows();
        let closes = series.closes();
        let flags = PivotDetector::new(self.window).detect(&highs, &lows);

        (0..series.len())
            .map(|t| self.evaluate(&opens, &highs, &lows, &closes, &flags, t))
            .collect()
    }

    fn warmup(&self) -> usize {
        self.history_len()
    }

    fn name(&self) -> &str {
        "pivot_line"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trendbreaker_core::types::{Bar, Timeframe};

    fn series_from_ohlc(rows: &[(f64, f64, f64, f64)]) -> BarSeries {
        let mut series = BarSeries::new("TEST".to_string(), Timeframe::Hour1);
        for (i, &(open, high, low, close)) in rows.iter().enumerate() {
            series
                .push(Bar::new(i as i64 * 3_600_000, open, high, low, close, 1000.0))
                .unwrap();
        }
        series
    }

    /// Fifteen bars with peak pivots at 2 (high 110) and 8 (high 105) and a
    /// breakout bar at 14 opening below and closing above the projected
    /// resistance of 100.
    fn descending_resistance_series() -> BarSeries {
        let highs = [
            100.0, 101.0, 110.0, 101.0, 100.0, 99.0, 98.0, 99.0, 105.0, 99.0, 98.0, 97.0, 96.0,
            95.0, 104.0,
        ];
        let lows = [
            95.0, 96.0, 99.0, 96.0, 95.0, 94.0, 93.0, 94.0, 99.0, 94.0, 93.0, 92.0, 91.0, 90.0,
            96.0,
        ];

        let rows: Vec<(f64, f64, f64, f64)> = highs
            .iter()
            .zip(lows.iter())
            .enumerate()
            .map(|(i, (&high, &low))| {
                if i == 14 {
                    // The breakout bar straddles the projected line value.
                    (98.0, high, low, 103.0)
                } else {
                    let mid = (high + low) / 2.0;
                    (mid, high, low, mid)
                }
            })
            .collect();
        series_from_ohlc(&rows)
    }

    #[test]
    fn test_warmup_is_all_neutral() {
        // Window 2, multiple 3: six bars of history are required. With
        // fewer, every bar is neutral and carries no line.
        let line = PivotLine::new(2, 3);
        let rows: Vec<(f64, f64, f64, f64)> = (0..5)
            .map(|i| {
                let p = 100.0 + i as f64;
                (p, p + 1.0, p - 1.0, p)
            })
            .collect();
        let series = series_from_ohlc(&rows);

        for signal in line.calculate(&series) {
            assert_eq!(signal.direction, Direction::Neutral);
            assert!(signal.line_value.is_none());
        }
    }

    #[test]
    fn test_forced_long_breakout() {
        let line = PivotLine::new(2, 7);
        let series = descending_resistance_series();

        let signals = line.calculate(&series);
        let last = signals[14];

        // slope = (105 - 110) / (8 - 2), projected to 14 gives 100 exactly.
        assert_eq!(last.direction, Direction::Long);
        let value = last.line_value.unwrap();
        assert!((value - 100.0).abs() < 1e-9, "line value {}", value);

        // The bar before the breakout does not straddle the line.
        assert_eq!(signals[13].direction, Direction::Neutral);
    }

    #[test]
    fn test_streaming_matches_batch() {
        let line = PivotLine::new(2, 7);
        let series = descending_resistance_series();

        let batch = line.calculate(&series);
        for t in 0..series.len() {
            assert_eq!(line.signal_at(&series, t), batch[t], "bar {}", t);
        }
    }

    #[test]
    fn test_recalculation_is_deterministic() {
        let line = PivotLine::new(2, 7);
        let series = descending_resistance_series();

        assert_eq!(line.calculate(&series), line.calculate(&series));
    }

    #[test]
    fn test_no_signal_stream_nan() {
        let line = PivotLine::new(2, 7);
        let series = descending_resistance_series();

        for signal in line.calculate(&series) {
            if let Some(value) = signal.line_value {
                assert!(value.is_finite());
            }
        }
    }

    #[test]
    fn test_simultaneous_candidates_suppress_to_neutral() {
        // A single bar cannot open both below the resistance and above the
        // support projection, so the suppression rule is exercised at the
        // combination step directly.
        let signal = resolve_directions(Some(100.0), Some(99.0));
        assert_eq!(signal.direction, Direction::Neutral);
        assert!(signal.line_value.is_none());
    }

    #[test]
    fn test_lone_candidates_pass_through() {
        assert_eq!(
            resolve_directions(Some(100.0), None),
            Signal::breakout(Direction::Long, 100.0)
        );
        assert_eq!(
            resolve_directions(None, Some(99.0)),
            Signal::breakout(Direction::Short, 99.0)
        );
        assert_eq!(resolve_directions(None, None), Signal::neutral());
    }

    #[test]
    fn test_samples_align_with_series() {
        let line = PivotLine::new(2, 7);
        let series = descending_resistance_series();

        let samples = line.samples(&series);
        assert_eq!(samples.len(), series.len());
        assert!(samples[2].is_peak);
        assert!(samples[8].is_peak);
        assert!(samples[6].is_trough);
        assert_eq!(samples[14].direction, Direction::Long);
        assert_eq!(samples[14].timestamp, series.get(14).unwrap().timestamp);
    }

    #[test]
    fn test_rising_peaks_have_no_resistance_pair() {
        // The older anchor must sit strictly above the newer one; with
        // peaks rising over time no pair qualifies and the bar stays
        // neutral even though its open and close straddle both highs.
        let highs = [
            100.0, 101.0, 104.0, 101.0, 100.0, 99.0, 98.0, 99.0, 110.0, 99.0, 98.0, 97.0, 96.0,
            95.0, 104.0,
        ];
        let lows = [
            95.0, 96.0, 99.0, 96.0, 95.0, 94.0, 93.0, 94.0, 99.0, 94.0, 93.0, 92.0, 91.0, 90.0,
            90.0,
        ];
        let rows: Vec<(f64, f64, f64, f64)> = highs
            .iter()
            .zip(lows.iter())
            .enumerate()
            .map(|(i, (&high, &low))| {
                if i == 14 {
                    (95.0, high, low, 103.0)
                } else {
                    let mid = (high + low) / 2.0;
                    (mid, high, low, mid)
                }
            })
            .collect();

        let line = PivotLine::new(2, 7);
        let signals = line.calculate(&series_from_ohlc(&rows));
        assert_eq!(signals[14].direction, Direction::Neutral);
    }
}
