//! Core traits for the trend-breaker system.

mod broker;
mod data_source;
mod indicator;
mod strategy;

pub use broker::Broker;
pub use data_source::DataSource;
pub use indicator::SeriesIndicator;
pub use strategy::{Strategy, StrategyConfig, StrategyState};
