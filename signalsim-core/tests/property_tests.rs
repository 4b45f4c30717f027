//! Property tests for the simulator invariants.
//!
//! 1. Every generated signal is in range
//! 2. Ambient counters never leave their clamps
//! 3. Analysis progress is non-decreasing and ends at exactly 100
//! 4. Counter easing is monotonic and hits both endpoints

use chrono::{DateTime, Utc};
use proptest::prelude::*;
use signalsim_core::analysis::{AnalysisEvent, AnalysisRun};
use signalsim_core::ambient::{AmbientMetrics, AmbientTimer, DATA_POINTS_RANGE, USER_COUNT_RANGE};
use signalsim_core::clock::SessionClock;
use signalsim_core::present::counter::value_at;
use signalsim_core::rng::{RngHierarchy, ScriptedSource, Stream};
use signalsim_core::signal::generate;
use signalsim_core::timer::Scheduler;
use signalsim_core::TimerKey;

fn arb_units() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(0.0..1.0_f64, 1..64)
}

proptest! {
    #[test]
    fn signals_always_in_range(seed in any::<u64>(), cycle in 0u64..1000) {
        let mut rng = RngHierarchy::new(seed).rng_for(Stream::Signal, cycle);
        let s = generate(&mut rng, DateTime::<Utc>::UNIX_EPOCH);
        prop_assert!((85..=96).contains(&s.confidence));
        prop_assert!((3..=4).contains(&s.strength));
    }

    #[test]
    fn scripted_signals_always_in_range(units in arb_units()) {
        let mut src = ScriptedSource::new(units);
        for _ in 0..20 {
            let s = generate(&mut src, DateTime::<Utc>::UNIX_EPOCH);
            prop_assert!((85..=96).contains(&s.confidence));
            prop_assert!((3..=4).contains(&s.strength));
        }
    }

    #[test]
    fn ambient_counters_stay_clamped(units in arb_units(), steps in 1usize..500) {
        let clock = SessionClock::utc(DateTime::<Utc>::UNIX_EPOCH);
        let mut m = AmbientMetrics::new(&clock);
        let mut src = ScriptedSource::new(units);
        for i in 0..steps {
            let which = if i % 2 == 0 { AmbientTimer::UserCount } else { AmbientTimer::DataPoints };
            m.on_timer(which, &mut src, &clock, 0);
            prop_assert!((USER_COUNT_RANGE.0..=USER_COUNT_RANGE.1).contains(&m.user_count()));
            prop_assert!((DATA_POINTS_RANGE.0..=DATA_POINTS_RANGE.1).contains(&m.data_points()));
        }
    }

    #[test]
    fn progress_monotonic_and_exact(units in arb_units()) {
        let mut sched: Scheduler<TimerKey> = Scheduler::new();
        let mut run = AnalysisRun::start(&mut sched, 600, 800);
        let mut src = ScriptedSource::new(units);
        let mut last = run.progress();
        let mut completed = false;
        while let Some(f) = sched.pop_due(u64::MAX) {
            let ev = match f.key {
                TimerKey::AnalysisTick => run.on_tick(&mut sched, &mut src),
                TimerKey::AnalysisSettle => run.on_settle(),
                _ => AnalysisEvent::Ignored,
            };
            prop_assert!(run.progress() >= last);
            last = run.progress();
            if ev == AnalysisEvent::Completed {
                prop_assert_eq!(run.progress(), 100.0);
                completed = true;
            }
        }
        prop_assert!(completed);
        // at least 10 per tick, at most 25
        prop_assert!((4..=10).contains(&run.ticks()));
    }

    #[test]
    fn easing_is_monotonic(target in 0u64..1_000_000, duration in 1u64..5000) {
        prop_assert_eq!(value_at(target, duration, 0), 0);
        prop_assert_eq!(value_at(target, duration, duration), target);
        let mut last = 0;
        for t in (0..=duration).step_by((duration as usize / 50).max(1)) {
            let v = value_at(target, duration, t);
            prop_assert!(v >= last && v <= target);
            last = v;
        }
    }
}
