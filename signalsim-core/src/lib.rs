//! SignalSim Core: a simulated trading-signal flow on virtual time.
//!
//! Nothing here predicts anything. The crate models:
//! - A four-screen flow (pairs → timeframe → analysis → signal)
//! - A scripted analysis progress bar
//! - A biased-coin signal generator behind a seedable random source
//! - Decorative ambient counters and animations
//! - A virtual-time scheduler that owns every timer, so tests can step time exactly

pub mod ambient;
pub mod analysis;
pub mod catalog;
pub mod clock;
pub mod config;
pub mod domain;
pub mod error;
pub mod flow;
pub mod present;
pub mod rng;
pub mod session;
pub mod signal;
pub mod timer;

pub use config::{FlowVariant, SimConfig, Timings};
pub use domain::{CurrencyPair, Direction, Screen, Selection, Signal, Timeframe};
pub use error::{FlowError, SimError};
pub use session::{Session, TimerKey};
