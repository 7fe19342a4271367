//! Error types for the trend-breaker system.

use thiserror::Error;

/// Top-level system error.
#[derive(Error, Debug)]
pub enum TrendBreakerError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Strategy error: {0}")]
    Strategy(#[from] StrategyError),

    #[error("Data error: {0}")]
    Data(#[from] DataError),

    #[error("Signal error: {0}")]
    Signal(#[from] SignalError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Strategy-specific errors.
#[derive(Error, Debug)]
pub enum StrategyError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Insufficient data: need {required} bars, have {available}")]
    InsufficientData { required: usize, available: usize },

    #[error("Strategy not found: {0}")]
    NotFound(String),

    #[error("Strategy error: {0}")]
    Internal(String),
}

/// Data feed and ingestion errors.
#[derive(Error, Debug)]
pub enum DataError {
    #[error("No data available for the requested range")]
    NoDataAvailable,

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Non-monotonic timestamp at bar {index}: {prev} followed by {next}")]
    NonMonotonicTimestamp { index: usize, prev: i64, next: i64 },

    #[error("Inverted bar at index {index}: high {high} below low {low}")]
    InvertedBar { index: usize, high: f64, low: f64 },

    #[error("Data source error: {0}")]
    Internal(String),
}

/// Signal pipeline errors.
#[derive(Error, Debug)]
pub enum SignalError {
    #[error("Insufficient data: need {required} bars, have {available}")]
    InsufficientData { required: usize, available: usize },

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Result type alias for trend-breaker operations.
pub type TrendBreakerResult<T> = Result<T, TrendBreakerError>;
