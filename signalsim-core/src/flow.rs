//! Screen controller: the four-screen state machine.
//!
//! ```text
//! pairs ──select_pair──▶ timeframe ──select_timeframe──▶ analysis ──(100%)──▶ signal
//!   ▲                        ▲                              │                   │
//!   └──────back_to_pairs─────┴───────back_to_timeframe──────┴───────────────────┘
//!                                     signal ──start_analysis (cooldown clear)──▶ analysis
//! ```
//!
//! The signal stage carries its [`Signal`], so the signal screen cannot be
//! entered without one. Every action either applies fully or returns a
//! [`FlowError`] and changes nothing.

use tracing::debug;

use crate::analysis::{AnalysisEvent, AnalysisRun, Phase};
use crate::config::{FlowVariant, Timings};
use crate::domain::{CurrencyPair, Screen, Selection, Signal, Timeframe};
use crate::error::FlowError;
use crate::rng::UniformSource;
use crate::session::TimerKey;
use crate::signal::Cooldown;
use crate::timer::{Scheduler, TimerId};

#[derive(Debug)]
pub enum Stage {
    Pairs,
    Timeframe,
    Analysis(AnalysisRun),
    Signal(Signal),
}

impl Stage {
    pub fn screen(&self) -> Screen {
        match self {
            Stage::Pairs => Screen::Pairs,
            Stage::Timeframe => Screen::Timeframe,
            Stage::Analysis(_) => Screen::Analysis,
            Stage::Signal(_) => Screen::Signal,
        }
    }
}

#[derive(Debug)]
pub struct FlowController {
    variant: FlowVariant,
    timings: Timings,
    stage: Stage,
    selection: Selection,
    cooldown: Cooldown,
    auto_advance: Option<TimerId>,
    /// Number of analyses started so far.
    cycles: u64,
}

impl FlowController {
    pub fn new(variant: FlowVariant, timings: Timings) -> Self {
        Self {
            variant,
            timings,
            stage: Stage::Pairs,
            selection: Selection::default(),
            cooldown: Cooldown::new(),
            auto_advance: None,
            cycles: 0,
        }
    }

    pub fn variant(&self) -> FlowVariant {
        self.variant
    }

    pub fn screen(&self) -> Screen {
        self.stage.screen()
    }

    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn analysis(&self) -> Option<&AnalysisRun> {
        match &self.stage {
            Stage::Analysis(run) => Some(run),
            _ => None,
        }
    }

    pub fn signal(&self) -> Option<&Signal> {
        match &self.stage {
            Stage::Signal(signal) => Some(signal),
            _ => None,
        }
    }

    pub fn cooldown(&self) -> &Cooldown {
        &self.cooldown
    }

    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    pub fn auto_advance_pending(&self) -> bool {
        self.auto_advance.is_some()
    }

    // ── Actions ─────────────────────────────────────────────────────

    pub fn select_pair(
        &mut self,
        sched: &mut Scheduler<TimerKey>,
        pair: CurrencyPair,
    ) -> Result<(), FlowError> {
        self.require(Screen::Pairs, "select pair")?;
        self.selection.pair = Some(pair);
        debug!(pair = pair.symbol, "pair selected");
        if self.variant == FlowVariant::Auto {
            self.enter(sched, Stage::Timeframe);
        }
        Ok(())
    }

    /// Manual-variant confirm button on the pairs screen.
    pub fn proceed_to_timeframe(&mut self, sched: &mut Scheduler<TimerKey>) -> Result<(), FlowError> {
        self.require(Screen::Pairs, "select time frame")?;
        if self.variant != FlowVariant::Manual {
            return Err(self.not_available("select time frame"));
        }
        if self.selection.pair.is_none() {
            return Err(FlowError::NoPairSelected);
        }
        self.enter(sched, Stage::Timeframe);
        Ok(())
    }

    pub fn select_timeframe(
        &mut self,
        sched: &mut Scheduler<TimerKey>,
        timeframe: Timeframe,
    ) -> Result<(), FlowError> {
        self.require(Screen::Timeframe, "select timeframe")?;
        self.selection.timeframe = Some(timeframe);
        debug!(%timeframe, "timeframe selected");
        if self.variant == FlowVariant::Auto {
            sched.cancel_slot(&mut self.auto_advance);
            self.auto_advance = Some(sched.once(TimerKey::AutoAdvance, self.timings.auto_advance_ms));
        }
        Ok(())
    }

    /// "Generate" on the timeframe screen (manual variant) or "new signal"
    /// on the signal screen (both variants). The auto variant leaves the
    /// timeframe screen only through its auto-advance timer.
    pub fn start_analysis(&mut self, sched: &mut Scheduler<TimerKey>) -> Result<(), FlowError> {
        if self.variant == FlowVariant::Auto && self.screen() == Screen::Timeframe {
            return Err(self.not_available("start analysis"));
        }
        self.begin_analysis(sched)
    }

    fn begin_analysis(&mut self, sched: &mut Scheduler<TimerKey>) -> Result<(), FlowError> {
        match self.screen() {
            Screen::Timeframe => {
                if self.selection.pair.is_none() {
                    return Err(FlowError::NoPairSelected);
                }
                if self.selection.timeframe.is_none() {
                    return Err(FlowError::NoTimeframeSelected);
                }
            }
            Screen::Signal => {}
            _ => return Err(self.not_available("start analysis")),
        }
        if self.cooldown.is_armed() {
            return Err(FlowError::CooldownActive {
                remaining: self.cooldown.remaining(),
            });
        }
        let run = AnalysisRun::start(sched, self.timings.analysis_tick_ms, self.timings.settle_ms);
        self.cycles += 1;
        self.enter(sched, Stage::Analysis(run));
        Ok(())
    }

    pub fn back_to_pairs(&mut self, sched: &mut Scheduler<TimerKey>) -> Result<(), FlowError> {
        self.selection = Selection::default();
        self.enter(sched, Stage::Pairs);
        Ok(())
    }

    pub fn back_to_timeframe(&mut self, sched: &mut Scheduler<TimerKey>) -> Result<(), FlowError> {
        match self.screen() {
            Screen::Analysis | Screen::Signal => {
                self.selection.timeframe = None;
                self.enter(sched, Stage::Timeframe);
                Ok(())
            }
            _ => Err(self.not_available("back to timeframe")),
        }
    }

    /// The "back" arrow: one screen up the flow.
    pub fn back(&mut self, sched: &mut Scheduler<TimerKey>) -> Result<(), FlowError> {
        match self.screen() {
            Screen::Pairs => Err(self.not_available("back")),
            Screen::Timeframe => self.back_to_pairs(sched),
            Screen::Analysis | Screen::Signal => self.back_to_timeframe(sched),
        }
    }

    // ── Timer dispatch ──────────────────────────────────────────────

    pub fn on_auto_advance(&mut self, sched: &mut Scheduler<TimerKey>) {
        self.auto_advance = None;
        if self.screen() != Screen::Timeframe {
            return;
        }
        if let Err(err) = self.begin_analysis(sched) {
            debug!(%err, "auto-advance deferred");
        }
    }

    pub fn on_analysis_tick<S: UniformSource + ?Sized>(
        &mut self,
        sched: &mut Scheduler<TimerKey>,
        source: &mut S,
    ) -> AnalysisEvent {
        match &mut self.stage {
            Stage::Analysis(run) => run.on_tick(sched, source),
            _ => AnalysisEvent::Ignored,
        }
    }

    pub fn on_analysis_settle(&mut self) -> AnalysisEvent {
        match &mut self.stage {
            Stage::Analysis(run) => run.on_settle(),
            _ => AnalysisEvent::Ignored,
        }
    }

    /// Show a freshly generated signal. Only accepted once the current run
    /// has completed; arms the cooldown in the auto variant.
    pub fn present_signal(
        &mut self,
        sched: &mut Scheduler<TimerKey>,
        signal: Signal,
    ) -> Result<(), FlowError> {
        match &self.stage {
            Stage::Analysis(run) if run.phase() == Phase::Complete => {}
            _ => return Err(self.not_available("present signal")),
        }
        self.enter(sched, Stage::Signal(signal));
        if self.variant == FlowVariant::Auto {
            let seconds = self.selection.timeframe.map_or(0, Timeframe::seconds);
            self.cooldown.arm(sched, seconds);
        }
        Ok(())
    }

    pub fn on_cooldown_tick(&mut self, sched: &mut Scheduler<TimerKey>) {
        self.cooldown.on_tick(sched);
        // A timeframe picked while cooling down advances once it clears.
        if !self.cooldown.is_armed()
            && self.variant == FlowVariant::Auto
            && self.screen() == Screen::Timeframe
            && self.selection.timeframe.is_some()
            && self.auto_advance.is_none()
        {
            self.auto_advance = Some(sched.once(TimerKey::AutoAdvance, self.timings.auto_advance_ms));
        }
    }

    /// Cancel every timer this controller owns.
    pub fn teardown(&mut self, sched: &mut Scheduler<TimerKey>) {
        sched.cancel_slot(&mut self.auto_advance);
        self.cooldown.disarm(sched);
        if let Stage::Analysis(run) = &mut self.stage {
            run.cancel(sched);
        }
    }

    // ── Internals ───────────────────────────────────────────────────

    /// Swap stages, tearing down whatever the old stage owned.
    fn enter(&mut self, sched: &mut Scheduler<TimerKey>, next: Stage) {
        let from = self.screen();
        sched.cancel_slot(&mut self.auto_advance);
        if let Stage::Analysis(run) = &mut self.stage {
            run.cancel(sched);
        }
        self.stage = next;
        debug!(%from, to = %self.screen(), "screen transition");
    }

    fn require(&self, screen: Screen, action: &'static str) -> Result<(), FlowError> {
        if self.screen() == screen {
            Ok(())
        } else {
            Err(self.not_available(action))
        }
    }

    fn not_available(&self, action: &'static str) -> FlowError {
        FlowError::NotAvailable {
            action,
            screen: self.screen(),
        }
    }
}
