//! Trading strategy implementations.
//!
//! This crate provides the trend-breaker strategy: a position state
//! machine over the pivot-line breakout signal, with fixed take-profit,
//! fixed stop-loss, and signal-reversal exits.

mod registry;
mod trend_breaker;

pub use registry::{StrategyInfo, StrategyRegistry};
pub use trend_breaker::{TrendBreakerConfig, TrendBreakerStrategy};
