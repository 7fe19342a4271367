//! Configuration structures.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub app: AppSettings,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub strategy: StrategySettings,
    #[serde(default)]
    pub backtest: BacktestSettings,
}

/// General app settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    pub name: String,
    pub environment: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            name: "trendbreaker".to_string(),
            environment: "development".to_string(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
    pub file: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
            file: None,
        }
    }
}

/// Default strategy parameters.
///
/// The hand-fitted values for hourly data; the CLI can override each one
/// per run, and the strategy itself re-validates whatever it receives.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrategySettings {
    pub pivot_window_len: usize,
    pub history_multiple: usize,
    pub fixed_tp: f64,
    pub fixed_sl_multiple: f64,
}

impl Default for StrategySettings {
    fn default() -> Self {
        Self {
            pivot_window_len: 12,
            history_multiple: 30,
            fixed_tp: 0.08,
            fixed_sl_multiple: 0.15,
        }
    }
}

/// Backtest settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BacktestSettings {
    pub default_capital: Decimal,
    pub commission_rate: Decimal,
}

impl Default for BacktestSettings {
    fn default() -> Self {
        use rust_decimal_macros::dec;
        Self {
            default_capital: dec!(1000),
            commission_rate: dec!(0.0004),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_fitted_parameters() {
        let settings = StrategySettings::default();
        assert_eq!(settings.pivot_window_len, 12);
        assert_eq!(settings.history_multiple, 30);
        assert!((settings.fixed_tp - 0.08).abs() < 1e-12);
        assert!((settings.fixed_sl_multiple - 0.15).abs() < 1e-12);
    }

    #[test]
    fn test_toml_round_trip() {
        let config = AppConfig::default();
        let text = toml::to_string(&config).unwrap();
        let parsed: AppConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed.strategy.pivot_window_len, 12);
        assert_eq!(parsed.logging.level, "info");
    }
}
