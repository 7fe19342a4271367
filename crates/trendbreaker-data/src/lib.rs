//! Data sources for the trend-breaker system.

mod csv_source;
mod finam;

pub use csv_source::CsvDataSource;
pub use finam::FinamCsvSource;

use tracing::debug;
use trendbreaker_core::error::DataError;
use trendbreaker_core::traits::DataSource;
use trendbreaker_core::types::{Bar, Timeframe};

/// Load bars from a CSV file, auto-selecting the Finam layout when the
/// header carries its bracketed column names.
pub async fn load_csv(
    path: &str,
    symbol: &str,
    timeframe: Timeframe,
) -> Result<Vec<Bar>, DataError> {
    let bars = if finam::is_finam_layout(path)? {
        let source = FinamCsvSource::new(path)?;
        source.load_all(symbol, timeframe).await?
    } else {
        let source = CsvDataSource::new(path)?;
        source.load_all(symbol, timeframe).await?
    };
    debug!(path, bars = bars.len(), "loaded csv data");
    Ok(bars)
}
