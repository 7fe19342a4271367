//! Trend-breaker strategy.
//!
//! Consumes the pivot-line breakout signal and runs the Flat/Long/Short
//! position machine: entries on breakout direction while flat, exits on
//! take-profit, stop-loss, or signal reversal while positioned.

use serde::{Deserialize, Serialize};
use tracing::debug;
use trendbreaker_core::{
    error::StrategyError,
    traits::{Strategy, StrategyConfig, StrategyState},
    types::{
        Bar, BarSeries, Direction, ExitReason, Fill, OrderIntent, Position, PositionSide, Signal,
    },
};
use trendbreaker_indicators::PivotLine;
use uuid::Uuid;

/// Configuration for the trend-breaker strategy.
///
/// These four parameters are the entire tunable surface of the signal and
/// position logic. Defaults are the hand-fitted values for hourly data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendBreakerConfig {
    /// Symbols to trade
    pub symbols: Vec<String>,
    /// Pivot window radius in bars
    pub pivot_window_len: usize,
    /// History window length as a multiple of the pivot window
    pub history_multiple: usize,
    /// Take-profit distance as a fraction of the entry price
    pub fixed_tp: f64,
    /// Stop-loss distance as a multiple of the take-profit distance
    pub fixed_sl_multiple: f64,
}

impl Default for TrendBreakerConfig {
    fn default() -> Self {
        Self {
            symbols: vec![],
            pivot_window_len: 12,
            history_multiple: 30,
            fixed_tp: 0.08,
            fixed_sl_multiple: 0.15,
        }
    }
}

impl StrategyConfig for TrendBreakerConfig {
    fn validate(&self) -> Result<(), StrategyError> {
        if self.pivot_window_len == 0 {
            return Err(StrategyError::InvalidConfig(
                "Pivot window length must be greater than 0".into(),
            ));
        }
        if self.history_multiple == 0 {
            return Err(StrategyError::InvalidConfig(
                "History multiple must be greater than 0".into(),
            ));
        }
        if !(self.fixed_tp > 0.0 && self.fixed_tp.is_finite()) {
            return Err(StrategyError::InvalidConfig(
                "Take-profit fraction must be a positive finite number".into(),
            ));
        }
        if !(self.fixed_sl_multiple > 0.0 && self.fixed_sl_multiple.is_finite()) {
            return Err(StrategyError::InvalidConfig(
                "Stop-loss multiple must be a positive finite number".into(),
            ));
        }
        if self.symbols.is_empty() {
            return Err(StrategyError::InvalidConfig(
                "At least one symbol required".into(),
            ));
        }
        Ok(())
    }
}

/// Exit cause for an open position against the current bar, or None.
///
/// Conditions are checked in fixed priority order and short-circuit: a bar
/// satisfying several exits still closes the position exactly once, with
/// the highest-priority cause.
fn exit_reason(
    side: PositionSide,
    entry_price: f64,
    bar: &Bar,
    direction: Direction,
    fixed_tp: f64,
    fixed_sl_multiple: f64,
) -> Option<ExitReason> {
    let sl = fixed_tp * fixed_sl_multiple;
    match side {
        PositionSide::Long => {
            if bar.high >= entry_price * (1.0 + fixed_tp) {
                Some(ExitReason::TakeProfit)
            } else if bar.low <= entry_price * (1.0 - sl) {
                Some(ExitReason::StopLoss)
            } else if direction == Direction::Short {
                Some(ExitReason::Reversal)
            } else {
                None
            }
        }
        PositionSide::Short => {
            if bar.low <= entry_price * (1.0 - fixed_tp) {
                Some(ExitReason::TakeProfit)
            } else if bar.high >= entry_price * (1.0 + sl) {
                Some(ExitReason::StopLoss)
            } else if direction == Direction::Long {
                Some(ExitReason::Reversal)
            } else {
                None
            }
        }
    }
}

/// Trend-breaker strategy: pivot-line breakouts with fixed TP/SL exits.
pub struct TrendBreakerStrategy {
    config: TrendBreakerConfig,
    line: PivotLine,
    position: Position,
    /// Open intent still waiting for its fill to pin the entry price
    pending_open: Option<Uuid>,
    last_signal: Signal,
    bars_processed: usize,
    signals_generated: usize,
}

impl TrendBreakerStrategy {
    /// Create a new trend-breaker strategy.
    ///
    /// The configuration is validated here, before any bar is processed;
    /// invalid parameters are rejected, never clamped.
    pub fn new(config: TrendBreakerConfig) -> Result<Self, StrategyError> {
        config.validate()?;
        let line = PivotLine::new(config.pivot_window_len, config.history_multiple);
        Ok(Self {
            config,
            line,
            position: Position::flat(),
            pending_open: None,
            last_signal: Signal::neutral(),
            bars_processed: 0,
            signals_generated: 0,
        })
    }

    /// The position as the strategy currently sees it.
    pub fn position(&self) -> &Position {
        &self.position
    }

    /// The signal evaluated for the most recent bar.
    pub fn last_signal(&self) -> Signal {
        self.last_signal
    }

    fn evaluate_exits(&mut self, bar: &Bar, direction: Direction) -> Option<OrderIntent> {
        let side = self.position.side()?;
        let reason = exit_reason(
            side,
            self.position.entry_price,
            bar,
            direction,
            self.config.fixed_tp,
            self.config.fixed_sl_multiple,
        )?;

        self.position.flatten();
        self.pending_open = None;
        debug!(side = %side, reason = %reason, price = bar.close, "closing position");
        Some(OrderIntent::close(bar.timestamp, side, bar.close, reason))
    }
}

impl Strategy for TrendBreakerStrategy {
    fn name(&self) -> &str {
        "Trend Breaker"
    }

    fn description(&self) -> &str {
        "Trades breakouts of trend lines fitted through pivot points"
    }

    fn on_bar(&mut self, series: &BarSeries) -> Option<OrderIntent> {
        self.bars_processed += 1;
        let bar = *series.last()?;
        let t = series.len() - 1;

        let signal = self.line.signal_at(series, t);
        self.last_signal = signal;
        if signal.direction.is_actionable() {
            self.signals_generated += 1;
        }

        // Transitions are decided against the position as it stood at the
        // start of the bar: a bar that closes a position never re-enters
        // on it, and a fresh entry is never TP/SL-checked on its own bar.
        if self.position.is_flat() {
            let side = PositionSide::from_direction(signal.direction)?;
            self.position.open(side, bar.close);
            let intent = OrderIntent::open(bar.timestamp, side, bar.close);
            self.pending_open = Some(intent.id);
            debug!(side = %side, price = bar.close, "opening position");
            Some(intent)
        } else {
            self.evaluate_exits(&bar, signal.direction)
        }
    }

    fn on_fill(&mut self, fill: &Fill) {
        if self.pending_open == Some(fill.intent_id) {
            self.position.set_entry_price(fill.price);
            self.pending_open = None;
        }
    }

    fn reset(&mut self) {
        self.position = Position::flat();
        self.pending_open = None;
        self.last_signal = Signal::neutral();
        self.bars_processed = 0;
        self.signals_generated = 0;
    }

    fn state(&self) -> StrategyState {
        let direction = match self.last_signal.direction {
            Direction::Long => 1.0,
            Direction::Short => -1.0,
            Direction::Neutral => 0.0,
        };
        StrategyState {
            name: self.name().to_string(),
            is_warmed_up: self.bars_processed >= self.warmup_period(),
            bars_processed: self.bars_processed,
            signals_generated: self.signals_generated,
            indicators: [
                ("direction".to_string(), direction),
                (
                    "line_value".to_string(),
                    self.last_signal.line_value.unwrap_or(0.0),
                ),
                ("entry_price".to_string(), self.position.entry_price),
            ]
            .into_iter()
            .collect(),
            custom: serde_json::json!({
                "pivot_window_len": self.config.pivot_window_len,
                "history_multiple": self.config.history_multiple,
                "fixed_tp": self.config.fixed_tp,
                "fixed_sl_multiple": self.config.fixed_sl_multiple,
                "position": self.position.state,
            }),
        }
    }

    fn warmup_period(&self) -> usize {
        self.line.history_len()
    }

    fn symbols(&self) -> &[String] {
        &self.config.symbols
    }
}
