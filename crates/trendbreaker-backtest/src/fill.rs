//! Instant market-fill broker for backtests.

use trendbreaker_core::traits::Broker;
use trendbreaker_core::types::{Bar, Fill, OrderIntent};

/// Fills every intent instantly and in full at the decision bar's close.
///
/// This is the execution model the signal engine assumes: no slippage, no
/// partial fills, no queueing across bars.
#[derive(Debug, Default)]
pub struct InstantFill;

impl Broker for InstantFill {
    fn execute(&mut self, intent: &OrderIntent, bar: &Bar) -> Fill {
        Fill {
            intent_id: intent.id,
            price: bar.close,
            timestamp: bar.timestamp,
        }
    }

    fn name(&self) -> &str {
        "instant-fill"
    }
}
