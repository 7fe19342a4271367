//! Data source trait definitions.

use crate::error::DataError;
use crate::types::{Bar, Timeframe};
use async_trait::async_trait;

/// Trait for historical data sources.
#[async_trait]
pub trait DataSource: Send + Sync {
    /// Load all bars the source holds for a symbol.
    ///
    /// # Returns
    /// A vector of bars ordered from oldest to newest
    async fn load_all(&self, symbol: &str, timeframe: Timeframe) -> Result<Vec<Bar>, DataError>;

    /// Get the data source name.
    fn name(&self) -> &str;
}
