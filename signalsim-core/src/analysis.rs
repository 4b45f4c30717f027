//! Scripted analysis progress.
//!
//! Lifecycle: `Running` (tick timer live) → `Settling` (settle timer live) →
//! `Complete`. The simulator owns both timers and cancels whichever is live
//! when torn down.

use tracing::debug;

use crate::catalog::ANALYSIS_MESSAGES;
use crate::rng::UniformSource;
use crate::session::TimerKey;
use crate::timer::{Millis, Scheduler, TimerId};

pub const PROGRESS_MAX: f64 = 100.0;
const STEP_MIN: f64 = 10.0;
const STEP_SPAN: f64 = 15.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Running,
    Settling,
    Complete,
    Cancelled,
}

/// What a dispatched timer did to the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisEvent {
    Progressed,
    /// Progress hit 100; the settle delay is now running.
    Filled,
    /// Settle delay elapsed; the caller should generate the signal.
    Completed,
    Ignored,
}

#[derive(Debug)]
pub struct AnalysisRun {
    progress: f64,
    ticks: usize,
    phase: Phase,
    settle_ms: Millis,
    tick_timer: Option<TimerId>,
    settle_timer: Option<TimerId>,
}

impl AnalysisRun {
    /// Reset progress to zero and start ticking.
    pub fn start(sched: &mut Scheduler<TimerKey>, tick_ms: Millis, settle_ms: Millis) -> Self {
        let tick_timer = Some(sched.every(TimerKey::AnalysisTick, tick_ms));
        debug!(tick_ms, settle_ms, "analysis started");
        Self {
            progress: 0.0,
            ticks: 0,
            phase: Phase::Running,
            settle_ms,
            tick_timer,
            settle_timer: None,
        }
    }

    pub fn on_tick<S: UniformSource + ?Sized>(
        &mut self,
        sched: &mut Scheduler<TimerKey>,
        source: &mut S,
    ) -> AnalysisEvent {
        if self.phase != Phase::Running {
            return AnalysisEvent::Ignored;
        }
        let step = STEP_MIN + source.next_unit() * STEP_SPAN;
        self.progress = (self.progress + step).min(PROGRESS_MAX);
        self.ticks += 1;

        if self.progress >= PROGRESS_MAX {
            sched.cancel_slot(&mut self.tick_timer);
            self.settle_timer = Some(sched.once(TimerKey::AnalysisSettle, self.settle_ms));
            self.phase = Phase::Settling;
            debug!(ticks = self.ticks, "analysis filled");
            return AnalysisEvent::Filled;
        }
        AnalysisEvent::Progressed
    }

    pub fn on_settle(&mut self) -> AnalysisEvent {
        if self.phase != Phase::Settling {
            return AnalysisEvent::Ignored;
        }
        self.settle_timer = None;
        self.phase = Phase::Complete;
        AnalysisEvent::Completed
    }

    /// Tear down. Safe to call in any phase, any number of times.
    pub fn cancel(&mut self, sched: &mut Scheduler<TimerKey>) {
        sched.cancel_slot(&mut self.tick_timer);
        sched.cancel_slot(&mut self.settle_timer);
        if matches!(self.phase, Phase::Running | Phase::Settling) {
            self.phase = Phase::Cancelled;
            debug!(progress = self.progress, "analysis cancelled");
        }
    }

    /// Percentage in `[0, 100]`.
    pub fn progress(&self) -> f64 {
        self.progress
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn ticks(&self) -> usize {
        self.ticks
    }

    /// Index into [`ANALYSIS_MESSAGES`]. The first tick keeps the first
    /// message; later ticks advance one entry each and hold on the last.
    pub fn message_index(&self) -> usize {
        self.ticks.saturating_sub(1).min(ANALYSIS_MESSAGES.len() - 1)
    }

    pub fn message(&self) -> &'static str {
        ANALYSIS_MESSAGES[self.message_index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::ScriptedSource;

    fn run_to_end(src: &mut ScriptedSource) -> (AnalysisRun, Vec<(AnalysisEvent, Millis)>) {
        let mut sched = Scheduler::new();
        let mut run = AnalysisRun::start(&mut sched, 600, 800);
        let mut events = Vec::new();
        while let Some(f) = sched.pop_due(60_000) {
            let ev = match f.key {
                TimerKey::AnalysisTick => run.on_tick(&mut sched, src),
                TimerKey::AnalysisSettle => run.on_settle(),
                other => panic!("unexpected timer {other:?}"),
            };
            events.push((ev, f.at));
        }
        assert!(sched.is_empty());
        (run, events)
    }

    #[test]
    fn minimum_steps_take_ten_ticks() {
        let mut src = ScriptedSource::new(vec![0.0]);
        let (run, events) = run_to_end(&mut src);
        assert_eq!(run.ticks(), 10);
        assert_eq!(run.progress(), 100.0);
        assert_eq!(events[9], (AnalysisEvent::Filled, 6000));
        assert_eq!(events[10], (AnalysisEvent::Completed, 6800));
        assert_eq!(run.phase(), Phase::Complete);
    }

    #[test]
    fn large_steps_overshoot_and_clamp() {
        // 17.5 per tick: 105 after six ticks, clamped to exactly 100.
        let mut src = ScriptedSource::new(vec![0.5]);
        let (run, events) = run_to_end(&mut src);
        assert_eq!(run.ticks(), 6);
        assert_eq!(run.progress(), 100.0);
        assert_eq!(events.last().copied(), Some((AnalysisEvent::Completed, 4400)));
    }

    #[test]
    fn messages_advance_then_hold() {
        let mut sched = Scheduler::new();
        let mut run = AnalysisRun::start(&mut sched, 600, 800);
        let mut src = ScriptedSource::new(vec![0.0]);
        assert_eq!(run.message_index(), 0);
        run.on_tick(&mut sched, &mut src);
        assert_eq!(run.message_index(), 0);
        run.on_tick(&mut sched, &mut src);
        assert_eq!(run.message_index(), 1);
        for _ in 0..8 {
            run.on_tick(&mut sched, &mut src);
        }
        assert_eq!(run.message_index(), ANALYSIS_MESSAGES.len() - 1);
        assert_eq!(run.message(), "Signal generation complete");
    }

    #[test]
    fn cancel_clears_timers_and_is_idempotent() {
        let mut sched = Scheduler::new();
        let mut run = AnalysisRun::start(&mut sched, 600, 800);
        assert_eq!(sched.len(), 1);
        run.cancel(&mut sched);
        run.cancel(&mut sched);
        assert!(sched.is_empty());
        assert_eq!(run.phase(), Phase::Cancelled);
        let mut src = ScriptedSource::new(vec![0.5]);
        assert_eq!(run.on_tick(&mut sched, &mut src), AnalysisEvent::Ignored);
        assert_eq!(run.on_settle(), AnalysisEvent::Ignored);
    }

    #[test]
    fn cancel_during_settle_drops_settle_timer() {
        let mut sched = Scheduler::new();
        let mut run = AnalysisRun::start(&mut sched, 600, 800);
        let mut src = ScriptedSource::new(vec![0.5]);
        for _ in 0..6 {
            run.on_tick(&mut sched, &mut src);
        }
        assert_eq!(run.phase(), Phase::Settling);
        assert_eq!(sched.len(), 1);
        run.cancel(&mut sched);
        assert!(sched.is_empty());
    }
}
