//! Application state, owned by the main thread.
//!
//! Wraps the core [`Session`] with cursor positions, the status line and the
//! help overlay. Every user action goes through here so rejected transitions
//! land in the status bar instead of being silently dropped.

use signalsim_core::catalog::{CURRENCY_PAIRS, TIMEFRAMES};
use signalsim_core::{FlowError, FlowVariant, Screen, Session};
use tracing::debug;

/// Status message severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Warning,
}

/// Which overlay (if any) is shown on top.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay {
    None,
    Help,
}

pub struct AppState {
    pub session: Session,
    pub running: bool,
    pub pair_cursor: usize,
    pub timeframe_cursor: usize,
    pub overlay: Overlay,
    pub status_message: Option<(String, StatusLevel)>,
}

impl AppState {
    pub fn new(mut session: Session) -> Self {
        session.mount();
        Self {
            session,
            running: true,
            pair_cursor: 0,
            timeframe_cursor: 0,
            overlay: Overlay::None,
            status_message: None,
        }
    }

    pub fn screen(&self) -> Screen {
        self.session.screen()
    }

    pub fn quit(&mut self) {
        self.session.unmount();
        self.running = false;
    }

    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Info));
    }

    pub fn set_warning(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Warning));
    }

    // ── Cursor ──────────────────────────────────────────────────────

    pub fn cursor_up(&mut self) {
        match self.screen() {
            Screen::Pairs => self.pair_cursor = self.pair_cursor.saturating_sub(1),
            Screen::Timeframe => self.timeframe_cursor = self.timeframe_cursor.saturating_sub(1),
            _ => {}
        }
    }

    pub fn cursor_down(&mut self) {
        match self.screen() {
            Screen::Pairs => {
                self.pair_cursor = (self.pair_cursor + 1).min(CURRENCY_PAIRS.len() - 1);
            }
            Screen::Timeframe => {
                self.timeframe_cursor = (self.timeframe_cursor + 1).min(TIMEFRAMES.len() - 1);
            }
            _ => {}
        }
    }

    // ── Actions ─────────────────────────────────────────────────────

    /// Enter: pick the highlighted row on list screens.
    pub fn choose(&mut self) {
        let result = match self.screen() {
            Screen::Pairs => self.session.select_pair(CURRENCY_PAIRS[self.pair_cursor]),
            Screen::Timeframe => {
                let option = TIMEFRAMES[self.timeframe_cursor];
                self.session.select_timeframe(option.timeframe)
            }
            Screen::Signal => self.session.start_analysis(),
            Screen::Analysis => Ok(()),
        };
        self.report(result);
    }

    /// The manual variant's confirm buttons: "select time frame" and "generate".
    pub fn confirm(&mut self) {
        let manual = self.session.flow().variant() == FlowVariant::Manual;
        let result = match self.screen() {
            Screen::Pairs => self.session.proceed_to_timeframe(),
            Screen::Timeframe if manual => self.session.start_analysis(),
            Screen::Signal => self.session.start_analysis(),
            Screen::Timeframe | Screen::Analysis => Ok(()),
        };
        self.report(result);
    }

    pub fn new_signal(&mut self) {
        let result = self.session.start_analysis();
        self.report(result);
    }

    pub fn back(&mut self) {
        let result = self.session.back();
        self.report(result);
        if self.screen() == Screen::Pairs {
            self.timeframe_cursor = 0;
        }
    }

    pub fn change_pair(&mut self) {
        let result = self.session.back_to_pairs();
        self.report(result);
        self.timeframe_cursor = 0;
    }

    /// Advance the session by real elapsed time.
    pub fn tick(&mut self, elapsed_ms: u64) {
        let before = self.screen();
        self.session.advance(elapsed_ms);
        if before != Screen::Signal && self.screen() == Screen::Signal {
            if let Some(signal) = self.session.signal() {
                let msg = format!(
                    "Simulated signal: {} at {}% (random draw)",
                    signal.direction.action_label(),
                    signal.confidence
                );
                self.set_status(msg);
            }
        }
    }

    /// Hint line for the current screen and flow variant.
    pub fn hints(&self) -> &'static str {
        let manual = self.session.flow().variant() == FlowVariant::Manual;
        match (self.screen(), manual) {
            (Screen::Pairs, false) => "↑↓ move  Enter select  ? help  q quit",
            (Screen::Pairs, true) => "↑↓ move  Enter select  c continue  ? help  q quit",
            (Screen::Timeframe, false) => "↑↓ move  Enter select  Esc back  q quit",
            (Screen::Timeframe, true) => "↑↓ move  Enter select  c generate  Esc back  q quit",
            (Screen::Analysis, _) => "Esc cancel  q quit",
            (Screen::Signal, _) => "n new signal  p change pair  Esc back  q quit",
        }
    }

    fn report(&mut self, result: Result<(), FlowError>) {
        match result {
            Ok(()) => {
                if matches!(&self.status_message, Some((_, StatusLevel::Warning))) {
                    self.status_message = None;
                }
            }
            Err(err) => {
                debug!(%err, "ui action rejected");
                self.set_warning(err.to_string());
            }
        }
    }
}
