//! Error types for the simulator core.

use thiserror::Error;

use crate::domain::Screen;

/// A flow action that was rejected. The controller state is untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FlowError {
    #[error("{action} is not available on the {screen} screen")]
    NotAvailable { action: &'static str, screen: Screen },
    #[error("select a currency pair first")]
    NoPairSelected,
    #[error("select a timeframe first")]
    NoTimeframeSelected,
    #[error("next signal available in {remaining}s")]
    CooldownActive { remaining: u32 },
}

/// Errors from parsing user-supplied values and loading configuration.
#[derive(Debug, Error)]
pub enum SimError {
    #[error("invalid timeframe {0:?}: expected <seconds>s, e.g. 10s")]
    InvalidTimeframe(String),
    #[error("unknown currency pair {0:?}")]
    UnknownPair(String),
    #[error("config error: {0}")]
    Config(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
