//! Core types and traits for the trend-breaker system.
//!
//! This crate provides the foundational building blocks including:
//! - Market data types (Bar, BarSeries)
//! - Signal and pivot types produced by the indicator pipeline
//! - Order intents and the position state machine
//! - Core traits for strategies, indicators, brokers, and data sources

pub mod types;
pub mod traits;
pub mod error;

pub use error::{TrendBreakerError, TrendBreakerResult};
pub use types::*;
pub use traits::*;
