//! Signal simulator TUI: four screens walking from pair selection to a
//! randomly drawn "signal", with ambient header counters.
//!
//! Everything shown is simulated. Nothing here reads market data.

pub mod app;
pub mod input;
pub mod logging;
pub mod theme;
pub mod ui;

pub use app::AppState;
pub use input::handle_key;

#[cfg(test)]
mod test_helpers;
