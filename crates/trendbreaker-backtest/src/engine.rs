//! Backtesting engine.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use trendbreaker_core::traits::{Broker, Strategy};
use trendbreaker_core::types::{Bar, BarSeries, IntentAction, PositionSide, Timeframe};
use trendbreaker_core::TrendBreakerResult;

use crate::fill::InstantFill;
use crate::report::BacktestReport;
use crate::statistics::{BacktestStats, TradeRecord};

/// Backtest configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BacktestConfig {
    /// Initial capital
    pub initial_capital: Decimal,
    /// Commission as a fraction of traded notional
    pub commission_rate: Decimal,
}

impl Default for BacktestConfig {
    fn default() -> Self {
        Self {
            initial_capital: dec!(1000),
            commission_rate: dec!(0.0004),
        }
    }
}

/// Backtesting engine.
///
/// Replays a bar history through a strategy, executes its order intents
/// with instant full-size fills at the decision bar's close, and tracks
/// equity and trade statistics. The replay is a plain synchronous loop:
/// the strategy itself is a pure function of the bar history, so the whole
/// run is deterministic for a given input and configuration.
pub struct BacktestEngine {
    config: BacktestConfig,
}

impl BacktestEngine {
    /// Create a new backtest engine.
    pub fn new(config: BacktestConfig) -> Self {
        Self { config }
    }

    /// Run a backtest over a single bar history.
    pub fn run(
        &self,
        strategy: &mut dyn Strategy,
        bars: Vec<Bar>,
    ) -> TrendBreakerResult<BacktestReport> {
        let symbol = strategy
            .symbols()
            .first()
            .cloned()
            .unwrap_or_else(|| "DATA".to_string());

        strategy.reset();
        let mut broker = InstantFill;
        let mut series = BarSeries::new(symbol.clone(), Timeframe::default());
        let mut stats = BacktestStats::new(self.config.initial_capital);

        let mut cash = self.config.initial_capital;
        // Signed quantity: positive long, negative short, zero flat.
        let mut quantity = Decimal::ZERO;
        let mut entry_price = Decimal::ZERO;

        info!(
            symbol = %symbol,
            bars = bars.len(),
            strategy = strategy.name(),
            "starting backtest"
        );

        for bar in bars {
            series.push(bar)?;

            if let Some(intent) = strategy.on_bar(&series) {
                let fill = broker.execute(&intent, &bar);
                strategy.on_fill(&fill);

                let price = Decimal::try_from(fill.price).unwrap_or_default();
                let timestamp = DateTime::from_timestamp_millis(fill.timestamp)
                    .unwrap_or_else(|| DateTime::<Utc>::from_timestamp(0, 0).unwrap());

                match intent.action {
                    IntentAction::Open => {
                        // Full allocation: the entire equity goes into the
                        // position, long or short.
                        let size = if price > Decimal::ZERO {
                            cash / price
                        } else {
                            Decimal::ZERO
                        };
                        quantity = match intent.side {
                            PositionSide::Long => size,
                            PositionSide::Short => -size,
                        };
                        entry_price = price;
                        cash -= quantity * price;
                        cash -= size * price * self.config.commission_rate;

                        debug!(side = %intent.side, %price, %size, "opened position");
                        stats.add_trade(TradeRecord {
                            symbol: symbol.clone(),
                            action: IntentAction::Open,
                            side: intent.side,
                            quantity: size,
                            price,
                            timestamp,
                            exit_reason: None,
                            pnl: None,
                        });
                    }
                    IntentAction::Close => {
                        let size = quantity.abs();
                        let pnl = (price - entry_price) * quantity;
                        cash += quantity * price;
                        cash -= size * price * self.config.commission_rate;
                        quantity = Decimal::ZERO;
                        entry_price = Decimal::ZERO;

                        debug!(
                            side = %intent.side,
                            reason = ?intent.exit_reason,
                            %price,
                            %pnl,
                            "closed position"
                        );
                        stats.add_trade(TradeRecord {
                            symbol: symbol.clone(),
                            action: IntentAction::Close,
                            side: intent.side,
                            quantity: size,
                            price,
                            timestamp,
                            exit_reason: intent.exit_reason,
                            pnl: Some(pnl),
                        });
                    }
                }
            }

            let close = Decimal::try_from(bar.close).unwrap_or_default();
            stats.record_equity(bar.timestamp, cash + quantity * close);
        }

        stats.finalize();
        info!(
            final_equity = %stats.final_equity,
            trades = stats.total_trades,
            "backtest finished"
        );

        Ok(BacktestReport {
            config: self.config.clone(),
            stats,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trendbreaker_core::types::ExitReason;
    use trendbreaker_strategies::{TrendBreakerConfig, TrendBreakerStrategy};

    /// Bars with a forced long breakout on bar 5 (entry 103) followed by a
    /// take-profit bar, for pivot window 1 and history multiple 5.
    fn breakout_bars() -> Vec<Bar> {
        let rows = [
            (99.5, 100.0, 99.0, 99.5),
            (105.0, 110.0, 100.0, 105.0),
            (99.5, 100.0, 99.0, 99.5),
            (102.5, 105.0, 100.0, 102.5),
            (99.5, 100.0, 99.0, 99.5),
            (98.0, 104.0, 96.0, 103.0),
            (103.0, 112.0, 102.0, 111.5),
        ];
        rows.iter()
            .enumerate()
            .map(|(i, &(open, high, low, close))| {
                Bar::new(i as i64 * 3_600_000, open, high, low, close, 1000.0)
            })
            .collect()
    }

    fn test_strategy() -> TrendBreakerStrategy {
        TrendBreakerStrategy::new(TrendBreakerConfig {
            symbols: vec!["TEST".to_string()],
            pivot_window_len: 1,
            history_multiple: 5,
            fixed_tp: 0.08,
            fixed_sl_multiple: 0.15,
        })
        .unwrap()
    }

    #[test]
    fn test_round_trip_backtest() {
        let engine = BacktestEngine::new(BacktestConfig {
            initial_capital: dec!(1000),
            commission_rate: Decimal::ZERO,
        });
        let mut strategy = test_strategy();

        let report = engine.run(&mut strategy, breakout_bars()).unwrap();
        let stats = &report.stats;

        assert_eq!(stats.bars_processed, 7);
        assert_eq!(stats.total_trades, 2);
        assert_eq!(stats.trades[0].action, IntentAction::Open);
        assert_eq!(stats.trades[1].action, IntentAction::Close);
        assert_eq!(stats.trades[1].exit_reason, Some(ExitReason::TakeProfit));

        // Entry at 103, exit at 111.5 with full allocation and no
        // commission: equity scales by the price ratio.
        let expected = dec!(1000) * dec!(111.5) / dec!(103);
        assert!((stats.final_equity - expected).abs() < dec!(0.01));
        assert_eq!(stats.winning_trades, 1);
    }

    #[test]
    fn test_commission_reduces_equity() {
        let engine = BacktestEngine::new(BacktestConfig {
            initial_capital: dec!(1000),
            commission_rate: dec!(0.0004),
        });
        let mut strategy = test_strategy();
        let with_commission = engine.run(&mut strategy, breakout_bars()).unwrap();

        let engine = BacktestEngine::new(BacktestConfig {
            initial_capital: dec!(1000),
            commission_rate: Decimal::ZERO,
        });
        let mut strategy = test_strategy();
        let without = engine.run(&mut strategy, breakout_bars()).unwrap();

        assert!(with_commission.stats.final_equity < without.stats.final_equity);
    }

    #[test]
    fn test_backtest_is_deterministic() {
        let engine = BacktestEngine::new(BacktestConfig::default());

        let mut strategy = test_strategy();
        let first = engine.run(&mut strategy, breakout_bars()).unwrap();
        let second = engine.run(&mut strategy, breakout_bars()).unwrap();

        assert_eq!(first.stats.total_trades, second.stats.total_trades);
        assert_eq!(first.stats.final_equity, second.stats.final_equity);
        assert_eq!(first.stats.equity_curve, second.stats.equity_curve);
    }

    #[test]
    fn test_malformed_bars_abort_the_run() {
        let engine = BacktestEngine::new(BacktestConfig::default());
        let mut strategy = test_strategy();

        let mut bars = breakout_bars();
        bars[3].timestamp = bars[2].timestamp; // duplicate timestamp

        assert!(engine.run(&mut strategy, bars).is_err());
    }

    #[test]
    fn test_short_history_stays_flat() {
        let engine = BacktestEngine::new(BacktestConfig::default());
        let mut strategy = test_strategy();

        let bars: Vec<Bar> = breakout_bars().into_iter().take(4).collect();
        let report = engine.run(&mut strategy, bars).unwrap();

        assert_eq!(report.stats.total_trades, 0);
        assert_eq!(report.stats.final_equity, report.stats.initial_capital);
    }
}
