//! Strategy trait definitions.

use crate::error::StrategyError;
use crate::types::{BarSeries, Fill, OrderIntent};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Configuration trait for strategies.
pub trait StrategyConfig: Send + Sync + Clone + 'static {
    /// Validate the configuration.
    ///
    /// Invalid parameters are rejected here, before any bar is processed;
    /// they are never silently clamped.
    fn validate(&self) -> Result<(), StrategyError>;
}

/// State of a strategy for monitoring and serialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrategyState {
    /// Strategy name
    pub name: String,
    /// Whether the strategy has processed enough bars to generate signals
    pub is_warmed_up: bool,
    /// Number of bars processed
    pub bars_processed: usize,
    /// Number of actionable signals generated
    pub signals_generated: usize,
    /// Current indicator values
    pub indicators: HashMap<String, f64>,
    /// Custom strategy-specific state
    pub custom: serde_json::Value,
}

impl Default for StrategyState {
    fn default() -> Self {
        Self {
            name: String::new(),
            is_warmed_up: false,
            bars_processed: 0,
            signals_generated: 0,
            indicators: HashMap::new(),
            custom: serde_json::Value::Null,
        }
    }
}

/// Core strategy trait.
///
/// Strategies receive the bar series after each append and emit at most one
/// order intent per bar. The position state machine lives inside the
/// strategy; the caller only routes intents to a broker and fills back.
pub trait Strategy: Send + Sync {
    /// Get the unique name of this strategy.
    fn name(&self) -> &str;

    /// Process the newest bar of the series.
    ///
    /// # Arguments
    /// * `series` - The bar series; the last bar is the one being evaluated
    ///
    /// # Returns
    /// * `Some(OrderIntent)` if a position transition should happen
    /// * `None` if the bar requires no action
    fn on_bar(&mut self, series: &BarSeries) -> Option<OrderIntent>;

    /// Called when the broker fills an intent.
    ///
    /// Strategies use this to adopt the actual execution price.
    fn on_fill(&mut self, _fill: &Fill) {}

    /// Reset the strategy state.
    ///
    /// This is called before backtesting to ensure a clean state.
    fn reset(&mut self);

    /// Get the current strategy state for monitoring.
    fn state(&self) -> StrategyState;

    /// Get the warmup period (number of bars needed before generating signals).
    fn warmup_period(&self) -> usize;

    /// Get the symbols this strategy trades.
    fn symbols(&self) -> &[String];

    /// Check if the strategy is warmed up (has enough data).
    fn is_warmed_up(&self, bars_available: usize) -> bool {
        bars_available >= self.warmup_period()
    }

    /// Get a description of the strategy.
    fn description(&self) -> &str {
        ""
    }
}
