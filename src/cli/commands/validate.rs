//! Validate configuration command.

use anyhow::Result;
use std::path::Path;
use trendbreaker_config::load_config;

pub async fn run(config_path: &Path) -> Result<()> {
    println!("Validating configuration: {:?}", config_path);

    match load_config(config_path) {
        Ok(config) => {
            println!("Configuration is valid!");
            println!();
            println!("App: {}", config.app.name);
            println!("Environment: {}", config.app.environment);
            println!("Log level: {}", config.logging.level);
            println!("Pivot window: {}", config.strategy.pivot_window_len);
            println!("History multiple: {}", config.strategy.history_multiple);
            println!("Take-profit: {}", config.strategy.fixed_tp);
            println!("Stop-loss multiple: {}", config.strategy.fixed_sl_multiple);
            println!("Default capital: {}", config.backtest.default_capital);
            println!("Commission rate: {}", config.backtest.commission_rate);
        }
        Err(e) => {
            println!("Configuration error: {}", e);
            return Err(e.into());
        }
    }

    Ok(())
}
