//! Engine error types.
//!
//! All validation errors surface before the simulation loop starts; once a
//! run is in flight the only remaining runtime conditions (warm-up not
//! complete, insufficient cash or shares for a fill) are normal skips.

use crate::rule::TradeAction;

/// Top-level error type for the backtesting engine.
#[derive(Debug, Clone, thiserror::Error)]
pub enum EngineError {
    #[error("invalid configuration for {parameter}: {reason}")]
    InvalidConfiguration { parameter: String, reason: String },

    #[error("invalid {action} rule at index {index} ({kind}): {reason}")]
    InvalidRule {
        index: usize,
        action: TradeAction,
        kind: String,
        reason: String,
    },

    #[error("insufficient data for {indicator}: have {bars} bars, need {minimum}")]
    InsufficientData {
        indicator: String,
        bars: usize,
        minimum: usize,
    },
}
