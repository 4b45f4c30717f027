//! Shared fixtures for unit tests.

use chrono::{TimeZone, Utc};
use signalsim_core::clock::SessionClock;
use signalsim_core::{FlowVariant, Session, SimConfig};

use crate::app::AppState;

pub fn session_with(variant: FlowVariant) -> Session {
    let config = SimConfig {
        seed: Some(42),
        flow: variant,
        ..SimConfig::default()
    };
    let origin = Utc.with_ymd_and_hms(2024, 6, 3, 9, 15, 0).unwrap();
    Session::new(config, SessionClock::utc(origin))
}

pub fn app_with(variant: FlowVariant) -> AppState {
    AppState::new(session_with(variant))
}
