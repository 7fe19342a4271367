//! Order intents emitted by the position engine.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::PositionSide;

/// Whether the intent opens or closes exposure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IntentAction {
    Open,
    Close,
}

impl std::fmt::Display for IntentAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IntentAction::Open => write!(f, "OPEN"),
            IntentAction::Close => write!(f, "CLOSE"),
        }
    }
}

/// Target exposure after the intent executes. There is no partial sizing:
/// a position is either the full allocation or flat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetExposure {
    Full,
    Zero,
}

/// Why a close intent was issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExitReason {
    TakeProfit,
    StopLoss,
    Reversal,
}

impl std::fmt::Display for ExitReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExitReason::TakeProfit => write!(f, "TP"),
            ExitReason::StopLoss => write!(f, "SL"),
            ExitReason::Reversal => write!(f, "REVERSE"),
        }
    }
}

/// A single order intent delivered to the broker collaborator.
///
/// The engine never computes fill prices, commission, or equity; it states
/// the desired transition and lets the broker resolve execution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderIntent {
    /// Unique intent ID
    pub id: Uuid,
    /// Timestamp of the decision bar (milliseconds)
    pub timestamp: i64,
    /// Open or close
    pub action: IntentAction,
    /// Side of the position being opened or closed
    pub side: PositionSide,
    /// Exposure after execution
    pub target_exposure: TargetExposure,
    /// Close price of the decision bar, the assumed execution price
    pub reference_price: f64,
    /// Cause of a close intent; None for entries
    pub exit_reason: Option<ExitReason>,
}

impl OrderIntent {
    /// Create an intent opening a full position.
    pub fn open(timestamp: i64, side: PositionSide, reference_price: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp,
            action: IntentAction::Open,
            side,
            target_exposure: TargetExposure::Full,
            reference_price,
            exit_reason: None,
        }
    }

    /// Create an intent flattening an existing position.
    pub fn close(
        timestamp: i64,
        side: PositionSide,
        reference_price: f64,
        reason: ExitReason,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp,
            action: IntentAction::Close,
            side,
            target_exposure: TargetExposure::Zero,
            reference_price,
            exit_reason: Some(reason),
        }
    }
}

/// Execution report returned by the broker for one intent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Fill {
    /// Intent this fill answers
    pub intent_id: Uuid,
    /// Execution price
    pub price: f64,
    /// Execution timestamp (milliseconds)
    pub timestamp: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_intent() {
        let intent = OrderIntent::open(1000, PositionSide::Long, 101.5);
        assert_eq!(intent.action, IntentAction::Open);
        assert_eq!(intent.target_exposure, TargetExposure::Full);
        assert!(intent.exit_reason.is_none());
    }

    #[test]
    fn test_close_intent() {
        let intent = OrderIntent::close(2000, PositionSide::Short, 99.0, ExitReason::StopLoss);
        assert_eq!(intent.action, IntentAction::Close);
        assert_eq!(intent.target_exposure, TargetExposure::Zero);
        assert_eq!(intent.exit_reason, Some(ExitReason::StopLoss));
    }
}
