//! Signals command: dump the per-bar diagnostics stream.
//!
//! Emits one CSV row per bar with the pivot flags, the projected line
//! value of a fired breakout, and the direction. This is the stream the
//! reporting side consumes for plots and statistics.

use anyhow::{Context, Result};
use std::path::Path;
use std::str::FromStr;
use tracing::info;
use trendbreaker_core::types::{BarSeries, Direction, Timeframe};
use trendbreaker_data::load_csv;
use trendbreaker_indicators::PivotLine;

use crate::cli::SignalsArgs;
use crate::cli::commands::backtest::load_settings;

pub async fn run(args: SignalsArgs, config_path: &Path) -> Result<()> {
    let settings = load_settings(config_path)?;

    let pivot_window = args.pivot_window.unwrap_or(settings.strategy.pivot_window_len);
    let history_multiple = args
        .history_multiple
        .unwrap_or(settings.strategy.history_multiple);
    anyhow::ensure!(pivot_window > 0, "Pivot window must be greater than 0");
    anyhow::ensure!(history_multiple > 0, "History multiple must be greater than 0");

    let timeframe = Timeframe::from_str(&args.timeframe).map_err(anyhow::Error::msg)?;
    let bars = load_csv(
        args.data.to_str().context("Non-UTF8 data path")?,
        &args.symbol,
        timeframe,
    )
    .await?;

    let mut series = BarSeries::new(args.symbol.clone(), timeframe);
    series.extend(bars).context("Malformed bar history")?;
    info!("Loaded {} bars for {}", series.len(), args.symbol);

    let line = PivotLine::new(pivot_window, history_multiple);
    let samples = line.samples(&series);

    let mut out = String::from("timestamp,is_peak,is_trough,line_value,direction\n");
    for sample in &samples {
        let line_value = sample
            .line_value
            .map(|v| v.to_string())
            .unwrap_or_default();
        let direction = match sample.direction {
            Direction::Long => 1,
            Direction::Short => -1,
            Direction::Neutral => 0,
        };
        out.push_str(&format!(
            "{},{},{},{},{}\n",
            sample.timestamp, sample.is_peak, sample.is_trough, line_value, direction
        ));
    }

    match &args.save {
        Some(path) => {
            std::fs::write(path, out)?;
            info!("Signals saved to {:?}", path);
        }
        None => print!("{}", out),
    }

    Ok(())
}
