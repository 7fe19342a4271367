//! CLI definitions.

pub mod commands;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "trendbreaker")]
#[command(author, version, about = "Pivot trend-line breakout trading system")]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: PathBuf,

    /// Log level
    #[arg(short, long, default_value = "info")]
    pub log_level: LogLevel,

    /// Enable JSON log format
    #[arg(long)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Clone, ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run a backtest over a CSV bar history
    Backtest(BacktestArgs),
    /// Dump the per-bar pivot/signal diagnostics stream
    Signals(SignalsArgs),
    /// List available strategies
    Strategies,
    /// Validate configuration
    ValidateConfig,
}

#[derive(clap::Args)]
pub struct BacktestArgs {
    /// Strategy to backtest
    #[arg(short, long, default_value = "trend_breaker")]
    pub strategy: String,

    /// Symbol label for the data file
    #[arg(short = 'S', long, default_value = "DATA")]
    pub symbol: String,

    /// Data file (CSV, generic or Finam layout)
    #[arg(long)]
    pub data: PathBuf,

    /// Initial capital (falls back to the config file)
    #[arg(long)]
    pub capital: Option<f64>,

    /// Commission as a fraction of traded notional
    #[arg(long)]
    pub commission: Option<f64>,

    /// Pivot window radius in bars
    #[arg(long)]
    pub pivot_window: Option<usize>,

    /// History window as a multiple of the pivot window
    #[arg(long)]
    pub history_multiple: Option<usize>,

    /// Take-profit fraction
    #[arg(long)]
    pub tp: Option<f64>,

    /// Stop-loss as a multiple of the take-profit
    #[arg(long)]
    pub sl_multiple: Option<f64>,

    /// Timeframe of the bars
    #[arg(short, long, default_value = "1h")]
    pub timeframe: String,

    /// Output format (text, json)
    #[arg(long, default_value = "text")]
    pub output: String,

    /// Save results to file
    #[arg(long)]
    pub save: Option<PathBuf>,
}

#[derive(clap::Args)]
pub struct SignalsArgs {
    /// Symbol label for the data file
    #[arg(short = 'S', long, default_value = "DATA")]
    pub symbol: String,

    /// Data file (CSV, generic or Finam layout)
    #[arg(long)]
    pub data: PathBuf,

    /// Pivot window radius in bars
    #[arg(long)]
    pub pivot_window: Option<usize>,

    /// History window as a multiple of the pivot window
    #[arg(long)]
    pub history_multiple: Option<usize>,

    /// Timeframe of the bars
    #[arg(short, long, default_value = "1h")]
    pub timeframe: String,

    /// Save the CSV stream to a file instead of stdout
    #[arg(long)]
    pub save: Option<PathBuf>,
}
