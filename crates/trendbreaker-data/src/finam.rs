//! Finam-format CSV data source.
//!
//! Finam exports carry a bracketed header and fixed column positions:
//! `<TICKER>,<PER>,<DATE>,<TIME>,<OPEN>,<HIGH>,<LOW>,<CLOSE>,<VOL>` with
//! the date as `%Y%m%d` and the time as `%H%M%S`. Columns are addressed by
//! position, matching the exported layout rather than header names.

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};
use csv::ReaderBuilder;
use std::io::BufRead;
use std::path::Path;
use trendbreaker_core::error::DataError;
use trendbreaker_core::traits::DataSource;
use trendbreaker_core::types::{Bar, Timeframe};

const COL_DATE: usize = 2;
const COL_TIME: usize = 3;
const COL_OPEN: usize = 4;
const COL_HIGH: usize = 5;
const COL_LOW: usize = 6;
const COL_CLOSE: usize = 7;
const COL_VOLUME: usize = 8;

/// Data source for Finam hourly/daily exports.
pub struct FinamCsvSource {
    path: String,
}

impl FinamCsvSource {
    /// Create a new Finam CSV data source.
    pub fn new(path: &str) -> Result<Self, DataError> {
        if !Path::new(path).exists() {
            return Err(DataError::NoDataAvailable);
        }
        Ok(Self {
            path: path.to_string(),
        })
    }

    fn load_from_path(&self, path: &str) -> Result<Vec<Bar>, DataError> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .from_path(path)
            .map_err(|e| DataError::ParseError(e.to_string()))?;

        let mut bars = Vec::new();

        for (row, result) in reader.records().enumerate() {
            let record = result.map_err(|e| DataError::ParseError(e.to_string()))?;

            let field = |col: usize| {
                record.get(col).ok_or_else(|| {
                    DataError::ParseError(format!("row {}: missing column {}", row + 1, col))
                })
            };
            let price = |col: usize| -> Result<f64, DataError> {
                field(col)?.parse::<f64>().map_err(|e| {
                    DataError::ParseError(format!("row {}: column {}: {}", row + 1, col, e))
                })
            };

            let timestamp = parse_finam_datetime(field(COL_DATE)?, field(COL_TIME)?)
                .map_err(|e| DataError::ParseError(format!("row {}: {}", row + 1, e)))?;

            bars.push(Bar::new(
                timestamp,
                price(COL_OPEN)?,
                price(COL_HIGH)?,
                price(COL_LOW)?,
                price(COL_CLOSE)?,
                price(COL_VOLUME)?,
            ));
        }

        Ok(bars)
    }
}

#[async_trait]
impl DataSource for FinamCsvSource {
    async fn load_all(&self, _symbol: &str, _timeframe: Timeframe) -> Result<Vec<Bar>, DataError> {
        self.load_from_path(&self.path)
    }

    fn name(&self) -> &str {
        "finam-csv"
    }
}

/// Combine the `%Y%m%d` date and `%H%M%S` time columns into Unix millis.
fn parse_finam_datetime(date: &str, time: &str) -> Result<i64, String> {
    let date = NaiveDate::parse_from_str(date.trim(), "%Y%m%d")
        .map_err(|e| format!("bad date {:?}: {}", date, e))?;
    let time = NaiveTime::parse_from_str(time.trim(), "%H%M%S")
        .map_err(|e| format!("bad time {:?}: {}", time, e))?;
    Ok(date.and_time(time).and_utc().timestamp_millis())
}

/// Check whether the file's header line is the bracketed Finam layout.
pub(crate) fn is_finam_layout(path: &str) -> Result<bool, DataError> {
    let file = std::fs::File::open(path).map_err(|_| DataError::NoDataAvailable)?;
    let mut header = String::new();
    std::io::BufReader::new(file)
        .read_line(&mut header)
        .map_err(|e| DataError::ParseError(e.to_string()))?;
    Ok(header.contains("<DATE>") && header.contains("<CLOSE>"))
}
