//! Backtest command implementation.

use anyhow::{Context, Result};
use rust_decimal::Decimal;
use std::path::Path;
use std::str::FromStr;
use tracing::info;
use trendbreaker_backtest::{BacktestConfig, BacktestEngine};
use trendbreaker_config::AppConfig;
use trendbreaker_core::types::Timeframe;
use trendbreaker_data::load_csv;
use trendbreaker_strategies::StrategyRegistry;

use crate::cli::BacktestArgs;

pub async fn run(args: BacktestArgs, config_path: &Path) -> Result<()> {
    let settings = load_settings(config_path)?;

    info!("Starting backtest for strategy: {}", args.strategy);

    // Per-run flags override the config file's strategy defaults.
    let strategy_config = serde_json::json!({
        "symbols": [],
        "pivot_window_len": args.pivot_window.unwrap_or(settings.strategy.pivot_window_len),
        "history_multiple": args.history_multiple.unwrap_or(settings.strategy.history_multiple),
        "fixed_tp": args.tp.unwrap_or(settings.strategy.fixed_tp),
        "fixed_sl_multiple": args.sl_multiple.unwrap_or(settings.strategy.fixed_sl_multiple),
    });

    let registry = StrategyRegistry::new();
    let mut strategy = registry
        .create(&args.strategy, strategy_config, vec![args.symbol.clone()])
        .context("Failed to create strategy")?;

    // Load data
    if !args.data.exists() {
        anyhow::bail!(
            "Data file '{}' does not exist. Provide a CSV file (e.g. --data ./data/sber_hourly.csv)",
            args.data.display()
        );
    }
    let timeframe = Timeframe::from_str(&args.timeframe).map_err(anyhow::Error::msg)?;
    let bars = load_csv(
        args.data.to_str().context("Non-UTF8 data path")?,
        &args.symbol,
        timeframe,
    )
    .await?;
    info!("Loaded {} bars for {}", bars.len(), args.symbol);

    // Create backtest config
    let initial_capital = match args.capital {
        Some(capital) => Decimal::try_from(capital).context("Invalid capital")?,
        None => settings.backtest.default_capital,
    };
    let commission_rate = match args.commission {
        Some(rate) => Decimal::try_from(rate).context("Invalid commission")?,
        None => settings.backtest.commission_rate,
    };
    let backtest_config = BacktestConfig {
        initial_capital,
        commission_rate,
    };

    // Run backtest
    let engine = BacktestEngine::new(backtest_config);
    let report = engine.run(strategy.as_mut(), bars)?;

    // Output results
    match args.output.as_str() {
        "json" => {
            let json = report.to_json()?;
            println!("{}", json);
        }
        _ => {
            println!("{}", report.summary());
        }
    }

    // Save if requested
    if let Some(save_path) = &args.save {
        let json = report.to_json()?;
        std::fs::write(save_path, json)?;
        info!("Results saved to {:?}", save_path);
    }

    Ok(())
}

/// Read the config file when it exists, otherwise fall back to defaults so
/// a bare checkout can still run.
pub(crate) fn load_settings(config_path: &Path) -> Result<AppConfig> {
    if config_path.exists() {
        trendbreaker_config::load_config(config_path)
            .with_context(|| format!("Failed to load config {:?}", config_path))
    } else {
        Ok(AppConfig::default())
    }
}
