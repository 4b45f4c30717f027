//! Session: the composition root that owns every timer.
//!
//! The host (TUI loop, CLI, tests) calls the action methods on user input and
//! [`Session::advance`] as time passes. `advance` pops due timers one at a
//! time and routes each to its owner, so timers armed by a handler fire in the
//! same call when they fall inside the window.

use rand::rngs::StdRng;
use tracing::debug;

use crate::ambient::{AmbientMetrics, AmbientTimer};
use crate::analysis::AnalysisEvent;
use crate::clock::SessionClock;
use crate::config::SimConfig;
use crate::domain::{CurrencyPair, Screen, Signal, Timeframe};
use crate::error::FlowError;
use crate::flow::FlowController;
use crate::present::{AnimatedCounter, ArrowPulse, ChartAnimation, CounterSlot};
use crate::rng::{RngHierarchy, Stream};
use crate::signal;
use crate::timer::{Millis, Scheduler};

/// How many screen visits [`Session::trace`] keeps.
pub const TRACE_LIMIT: usize = 64;

/// Tag for every timer in a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerKey {
    AnalysisTick,
    AnalysisSettle,
    AutoAdvance,
    Cooldown,
    Ambient(AmbientTimer),
    CounterFrame(CounterSlot),
    ChartDash,
    ArrowPulse,
}

pub struct Session {
    config: SimConfig,
    clock: SessionClock,
    sched: Scheduler<TimerKey>,
    rngs: RngHierarchy,
    ambient_rng: StdRng,
    cycle_rngs: CycleRngs,
    flow: FlowController,
    ambient: AmbientMetrics,
    user_counter: AnimatedCounter,
    data_counter: AnimatedCounter,
    chart: ChartAnimation,
    pulse: ArrowPulse,
    last_screen: Screen,
    mounted: bool,
    /// Most recent screens visited, oldest first, at most [`TRACE_LIMIT`].
    trace: Vec<Screen>,
}

impl Session {
    pub fn new(config: SimConfig, clock: SessionClock) -> Self {
        let rngs = match config.seed {
            Some(seed) => RngHierarchy::new(seed),
            None => RngHierarchy::from_entropy(),
        };
        let t = config.timings;
        Self {
            ambient_rng: rngs.rng_for(Stream::Ambient, 0),
            cycle_rngs: CycleRngs::derive(&rngs, 0),
            rngs,
            clock,
            sched: Scheduler::new(),
            flow: FlowController::new(config.flow, t),
            ambient: AmbientMetrics::new(&clock),
            user_counter: AnimatedCounter::new(CounterSlot::UserCount, t.counter_duration_ms, t.frame_ms),
            data_counter: AnimatedCounter::new(CounterSlot::DataPoints, t.counter_duration_ms, t.frame_ms),
            chart: ChartAnimation::default(),
            pulse: ArrowPulse::default(),
            last_screen: Screen::Pairs,
            mounted: false,
            trace: vec![Screen::Pairs],
            config,
        }
    }

    /// Start ambient timers and the header counter.
    pub fn mount(&mut self) {
        if self.mounted {
            return;
        }
        self.mounted = true;
        self.ambient.start(&mut self.sched);
        self.user_counter
            .set_target(&mut self.sched, u64::from(self.ambient.user_count()));
        debug!(seed = self.rngs.master_seed(), "session mounted");
    }

    /// Cancel every timer. Safe to call repeatedly.
    pub fn unmount(&mut self) {
        self.flow.teardown(&mut self.sched);
        self.ambient.stop(&mut self.sched);
        self.user_counter.stop(&mut self.sched);
        self.data_counter.stop(&mut self.sched);
        self.chart.stop(&mut self.sched);
        self.pulse.stop(&mut self.sched);
        if self.mounted {
            debug!(now = self.sched.now(), "session unmounted");
        }
        self.mounted = false;
    }

    /// Move virtual time forward by `ms`, firing everything that comes due.
    pub fn advance(&mut self, ms: Millis) {
        let until = self.sched.now().saturating_add(ms);
        while let Some(fired) = self.sched.pop_due(until) {
            self.dispatch(fired.key);
        }
    }

    /// Advance in `step` increments until `done` holds or `limit` ms pass.
    /// Returns whether `done` was reached.
    pub fn advance_until(&mut self, step: Millis, limit: Millis, mut done: impl FnMut(&Session) -> bool) -> bool {
        let deadline = self.sched.now().saturating_add(limit);
        while !done(self) {
            if self.sched.now() >= deadline {
                return false;
            }
            self.advance(step.min(deadline - self.sched.now()));
        }
        true
    }

    // ── Actions ─────────────────────────────────────────────────────

    pub fn select_pair(&mut self, pair: CurrencyPair) -> Result<(), FlowError> {
        let r = self.flow.select_pair(&mut self.sched, pair);
        self.after_action(r)
    }

    pub fn proceed_to_timeframe(&mut self) -> Result<(), FlowError> {
        let r = self.flow.proceed_to_timeframe(&mut self.sched);
        self.after_action(r)
    }

    pub fn select_timeframe(&mut self, timeframe: Timeframe) -> Result<(), FlowError> {
        let r = self.flow.select_timeframe(&mut self.sched, timeframe);
        self.after_action(r)
    }

    pub fn start_analysis(&mut self) -> Result<(), FlowError> {
        let r = self.flow.start_analysis(&mut self.sched);
        self.after_action(r)
    }

    pub fn back_to_pairs(&mut self) -> Result<(), FlowError> {
        let r = self.flow.back_to_pairs(&mut self.sched);
        self.after_action(r)
    }

    pub fn back_to_timeframe(&mut self) -> Result<(), FlowError> {
        let r = self.flow.back_to_timeframe(&mut self.sched);
        self.after_action(r)
    }

    pub fn back(&mut self) -> Result<(), FlowError> {
        let r = self.flow.back(&mut self.sched);
        self.after_action(r)
    }

    // ── Read access ─────────────────────────────────────────────────

    pub fn flow(&self) -> &FlowController {
        &self.flow
    }

    pub fn screen(&self) -> Screen {
        self.flow.screen()
    }

    pub fn signal(&self) -> Option<&Signal> {
        self.flow.signal()
    }

    pub fn ambient(&self) -> &AmbientMetrics {
        &self.ambient
    }

    pub fn user_counter(&self) -> &AnimatedCounter {
        &self.user_counter
    }

    pub fn data_counter(&self) -> &AnimatedCounter {
        &self.data_counter
    }

    pub fn chart(&self) -> &ChartAnimation {
        &self.chart
    }

    pub fn pulse(&self) -> &ArrowPulse {
        &self.pulse
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn seed(&self) -> u64 {
        self.rngs.master_seed()
    }

    pub fn now(&self) -> Millis {
        self.sched.now()
    }

    pub fn clock(&self) -> &SessionClock {
        &self.clock
    }

    pub fn live_timers(&self) -> usize {
        self.sched.len()
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn trace(&self) -> &[Screen] {
        &self.trace
    }

    // ── Internals ───────────────────────────────────────────────────

    fn after_action(&mut self, result: Result<(), FlowError>) -> Result<(), FlowError> {
        match &result {
            Ok(()) => self.sync_screen(),
            Err(err) => debug!(%err, screen = %self.screen(), "action rejected"),
        }
        result
    }

    fn dispatch(&mut self, key: TimerKey) {
        match key {
            TimerKey::AnalysisTick => {
                self.refresh_cycle_rngs();
                self.flow
                    .on_analysis_tick(&mut self.sched, &mut self.cycle_rngs.analysis);
            }
            TimerKey::AnalysisSettle => {
                if self.flow.on_analysis_settle() == AnalysisEvent::Completed {
                    self.refresh_cycle_rngs();
                    let timestamp = self.clock.at(self.sched.now());
                    let generated = signal::generate(&mut self.cycle_rngs.signal, timestamp);
                    if let Err(err) = self.flow.present_signal(&mut self.sched, generated) {
                        debug!(%err, "signal dropped");
                    }
                }
            }
            TimerKey::AutoAdvance => self.flow.on_auto_advance(&mut self.sched),
            TimerKey::Cooldown => self.flow.on_cooldown_tick(&mut self.sched),
            TimerKey::Ambient(which) => {
                let now = self.sched.now();
                self.ambient
                    .on_timer(which, &mut self.ambient_rng, &self.clock, now);
                match which {
                    AmbientTimer::UserCount => self
                        .user_counter
                        .set_target(&mut self.sched, u64::from(self.ambient.user_count())),
                    AmbientTimer::DataPoints if self.screen() == Screen::Analysis => self
                        .data_counter
                        .set_target(&mut self.sched, u64::from(self.ambient.data_points())),
                    _ => {}
                }
            }
            TimerKey::CounterFrame(CounterSlot::UserCount) => self.user_counter.on_frame(&mut self.sched),
            TimerKey::CounterFrame(CounterSlot::DataPoints) => self.data_counter.on_frame(&mut self.sched),
            TimerKey::ChartDash => self.chart.on_tick(),
            TimerKey::ArrowPulse => self.pulse.on_tick(),
        }
        self.sync_screen();
    }

    /// Mount and unmount per-screen animations when the screen changes.
    fn sync_screen(&mut self) {
        let screen = self.screen();
        if screen == self.last_screen {
            return;
        }
        match self.last_screen {
            Screen::Analysis => self.data_counter.stop(&mut self.sched),
            Screen::Signal => {
                self.chart.stop(&mut self.sched);
                self.pulse.stop(&mut self.sched);
            }
            _ => {}
        }
        match screen {
            Screen::Analysis => {
                // Re-entering restarts the count from zero.
                self.data_counter.stop(&mut self.sched);
                self.data_counter = AnimatedCounter::new(
                    CounterSlot::DataPoints,
                    self.config.timings.counter_duration_ms,
                    self.config.timings.frame_ms,
                );
                self.data_counter
                    .set_target(&mut self.sched, u64::from(self.ambient.data_points()));
            }
            Screen::Signal => {
                self.chart.start(&mut self.sched);
                self.pulse.start(&mut self.sched);
            }
            _ => {}
        }
        self.last_screen = screen;
        if self.trace.len() >= TRACE_LIMIT {
            self.trace.remove(0);
        }
        self.trace.push(screen);
    }

    /// Each analysis cycle draws from its own pair of generators, so cycle N
    /// is reproducible from the seed regardless of what ran before it.
    fn refresh_cycle_rngs(&mut self) {
        let cycle = self.flow.cycles();
        if self.cycle_rngs.cycle != cycle {
            self.cycle_rngs = CycleRngs::derive(&self.rngs, cycle);
        }
    }
}

struct CycleRngs {
    cycle: u64,
    analysis: StdRng,
    signal: StdRng,
}

impl CycleRngs {
    fn derive(rngs: &RngHierarchy, cycle: u64) -> Self {
        Self {
            cycle,
            analysis: rngs.rng_for(Stream::Analysis, cycle),
            signal: rngs.rng_for(Stream::Signal, cycle),
        }
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.unmount();
    }
}
