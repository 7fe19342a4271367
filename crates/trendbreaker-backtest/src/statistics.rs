//! Backtest statistics.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use trendbreaker_core::types::{ExitReason, IntentAction, PositionSide};

/// Record of a single executed intent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TradeRecord {
    pub symbol: String,
    pub action: IntentAction,
    pub side: PositionSide,
    pub quantity: Decimal,
    pub price: Decimal,
    pub timestamp: DateTime<Utc>,
    /// Cause of a close; None for entries
    pub exit_reason: Option<ExitReason>,
    /// Gross profit of the round trip, set on the closing record
    pub pnl: Option<Decimal>,
}

/// Backtest statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BacktestStats {
    /// Initial capital
    pub initial_capital: Decimal,
    /// Final equity
    pub final_equity: Decimal,
    /// Total return percentage
    pub total_return_pct: Decimal,
    /// Maximum drawdown percentage
    pub max_drawdown_pct: Decimal,
    /// Stability of the equity curve (signed R² of a linear fit to the
    /// cumulative log returns); None when fewer than two returns exist
    pub stability: Option<f64>,
    /// Total number of executed intents
    pub total_trades: usize,
    /// Number of winning round trips
    pub winning_trades: usize,
    /// Number of losing round trips
    pub losing_trades: usize,
    /// Win rate percentage over closed round trips
    pub win_rate_pct: Decimal,
    /// Average profit per winning round trip
    pub avg_win: Decimal,
    /// Average loss per losing round trip
    pub avg_loss: Decimal,
    /// Profit factor (gross profit / gross loss)
    pub profit_factor: Decimal,
    /// Number of bars processed
    pub bars_processed: usize,
    /// Equity curve
    pub equity_curve: Vec<(i64, Decimal)>,
    /// All executed intents
    pub trades: Vec<TradeRecord>,
    /// Peak equity (for drawdown)
    peak_equity: Decimal,
    /// Per-bar returns for the stability calculation
    returns: Vec<f64>,
}

impl BacktestStats {
    /// Create new stats tracker.
    pub fn new(initial_capital: Decimal) -> Self {
        Self {
            initial_capital,
            final_equity: initial_capital,
            total_return_pct: Decimal::ZERO,
            max_drawdown_pct: Decimal::ZERO,
            stability: None,
            total_trades: 0,
            winning_trades: 0,
            losing_trades: 0,
            win_rate_pct: Decimal::ZERO,
            avg_win: Decimal::ZERO,
            avg_loss: Decimal::ZERO,
            profit_factor: Decimal::ZERO,
            bars_processed: 0,
            equity_curve: Vec::new(),
            trades: Vec::new(),
            peak_equity: initial_capital,
            returns: Vec::new(),
        }
    }

    /// Record equity at a timestamp.
    pub fn record_equity(&mut self, timestamp: i64, equity: Decimal) {
        if let Some((_, prev_equity)) = self.equity_curve.last() {
            if *prev_equity > Decimal::ZERO {
                let ret = ((equity - *prev_equity) / *prev_equity)
                    .to_string()
                    .parse::<f64>()
                    .unwrap_or(0.0);
                self.returns.push(ret);
            }
        }

        self.equity_curve.push((timestamp, equity));

        if equity > self.peak_equity {
            self.peak_equity = equity;
        }

        if self.peak_equity > Decimal::ZERO {
            let drawdown = (self.peak_equity - equity) / self.peak_equity * dec!(100);
            if drawdown > self.max_drawdown_pct {
                self.max_drawdown_pct = drawdown;
            }
        }

        self.bars_processed += 1;
    }

    /// Add a trade record.
    pub fn add_trade(&mut self, trade: TradeRecord) {
        self.trades.push(trade);
        self.total_trades += 1;
    }

    /// Calculate final statistics.
    pub fn finalize(&mut self) {
        if let Some((_, equity)) = self.equity_curve.last() {
            self.final_equity = *equity;
        }

        if self.initial_capital > Decimal::ZERO {
            self.total_return_pct =
                (self.final_equity - self.initial_capital) / self.initial_capital * dec!(100);
        }

        self.stability = stability_of_returns(&self.returns);

        let mut total_profit = Decimal::ZERO;
        let mut total_loss = Decimal::ZERO;
        let mut closed = 0usize;

        for trade in &self.trades {
            if let Some(pnl) = trade.pnl {
                closed += 1;
                if pnl > Decimal::ZERO {
                    self.winning_trades += 1;
                    total_profit += pnl;
                } else if pnl < Decimal::ZERO {
                    self.losing_trades += 1;
                    total_loss += pnl.abs();
                }
            }
        }

        if closed > 0 {
            self.win_rate_pct = Decimal::from(self.winning_trades * 100) / Decimal::from(closed);
        }

        if self.winning_trades > 0 {
            self.avg_win = total_profit / Decimal::from(self.winning_trades);
        }
        if self.losing_trades > 0 {
            self.avg_loss = total_loss / Decimal::from(self.losing_trades);
        }

        if total_loss > Decimal::ZERO {
            self.profit_factor = total_profit / total_loss;
        }
    }
}

/// Stability of a return series: signed R² of a linear fit to the
/// cumulative log returns.
///
/// The sign follows the curve's endpoints, so a smoothly losing run scores
/// close to -1. A pure function of its input; nothing is accumulated on
/// any instance between runs. Returns None for fewer than two usable
/// returns rather than propagating a NaN.
pub fn stability_of_returns(returns: &[f64]) -> Option<f64> {
    let clean: Vec<f64> = returns.iter().copied().filter(|r| r.is_finite()).collect();
    if clean.len() < 2 {
        return None;
    }

    let mut cum = Vec::with_capacity(clean.len());
    let mut acc = 0.0_f64;
    for r in &clean {
        acc += r.ln_1p();
        cum.push(acc);
    }

    // Pearson correlation between the bar index and the cumulative curve.
    let n = cum.len() as f64;
    let mean_x = (n - 1.0) / 2.0;
    let mean_y = cum.iter().sum::<f64>() / n;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (i, &y) in cum.iter().enumerate() {
        let dx = i as f64 - mean_x;
        let dy = y - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    if var_x == 0.0 || var_y == 0.0 {
        return Some(0.0);
    }

    let r = cov / (var_x * var_y).sqrt();
    let r_squared = r * r;

    if cum[0] < cum[cum.len() - 1] {
        Some(r_squared)
    } else {
        Some(-r_squared)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stability_of_steady_growth() {
        // Constant positive returns give a perfectly linear cumulative log
        // curve: stability 1.
        let returns = vec![0.01; 50];
        let stability = stability_of_returns(&returns).unwrap();
        assert!((stability - 1.0).abs() < 1e-9, "stability {}", stability);
    }

    #[test]
    fn test_stability_of_steady_decline_is_negative() {
        let returns = vec![-0.01; 50];
        let stability = stability_of_returns(&returns).unwrap();
        assert!((stability + 1.0).abs() < 1e-9, "stability {}", stability);
    }

    #[test]
    fn test_stability_needs_two_returns() {
        assert!(stability_of_returns(&[]).is_none());
        assert!(stability_of_returns(&[0.01]).is_none());
        // NaNs are dropped before the length check.
        assert!(stability_of_returns(&[f64::NAN, 0.01]).is_none());
    }

    #[test]
    fn test_stability_of_flat_curve() {
        assert_eq!(stability_of_returns(&[0.0; 10]), Some(0.0));
    }

    #[test]
    fn test_stability_noise_scores_below_trend() {
        let trend: Vec<f64> = (0..100).map(|_| 0.005).collect();
        let noise: Vec<f64> = (0..100)
            .map(|i| if i % 2 == 0 { 0.05 } else { -0.045 })
            .collect();

        let trend_score = stability_of_returns(&trend).unwrap();
        let noise_score = stability_of_returns(&noise).unwrap();
        assert!(trend_score > noise_score);
    }

    #[test]
    fn test_drawdown_tracking() {
        let mut stats = BacktestStats::new(dec!(1000));
        stats.record_equity(1, dec!(1000));
        stats.record_equity(2, dec!(1100));
        stats.record_equity(3, dec!(990));
        stats.record_equity(4, dec!(1050));

        // Peak 1100, trough 990: 10% drawdown
        assert!((stats.max_drawdown_pct - dec!(10)).abs() < dec!(0.01));
        assert_eq!(stats.bars_processed, 4);
    }

    #[test]
    fn test_finalize_trade_statistics() {
        let mut stats = BacktestStats::new(dec!(1000));
        stats.record_equity(1, dec!(1000));
        stats.record_equity(2, dec!(1060));

        let closing = |pnl: Decimal| TradeRecord {
            symbol: "TEST".to_string(),
            action: IntentAction::Close,
            side: PositionSide::Long,
            quantity: dec!(1),
            price: dec!(100),
            timestamp: DateTime::from_timestamp(0, 0).unwrap(),
            exit_reason: Some(ExitReason::TakeProfit),
            pnl: Some(pnl),
        };

        stats.add_trade(closing(dec!(80)));
        stats.add_trade(closing(dec!(-20)));
        stats.finalize();

        assert_eq!(stats.total_trades, 2);
        assert_eq!(stats.winning_trades, 1);
        assert_eq!(stats.losing_trades, 1);
        assert_eq!(stats.win_rate_pct, dec!(50));
        assert_eq!(stats.avg_win, dec!(80));
        assert_eq!(stats.avg_loss, dec!(20));
        assert_eq!(stats.profit_factor, dec!(4));
        assert_eq!(stats.total_return_pct, dec!(6));
    }
}
