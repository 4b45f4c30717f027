//! Signal generation and the post-signal cooldown.
//!
//! There is no model here. The direction is a biased coin (`u > 0.4`, so
//! P(up) = 0.6) and the confidence and strength are uniform integer draws.

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::domain::{Direction, Signal};
use crate::rng::UniformSource;
use crate::session::TimerKey;
use crate::timer::{Scheduler, TimerId};

pub const UP_THRESHOLD: f64 = 0.4;
pub const CONFIDENCE_MIN: u8 = 85;
/// Number of distinct confidence values: `[85, 96]`.
pub const CONFIDENCE_SPAN: u8 = 12;
pub const STRENGTH_MIN: u8 = 3;
pub const STRENGTH_SPAN: u8 = 2;

/// Draw one signal. Consumes exactly three unit values: direction, confidence, strength.
pub fn generate<S: UniformSource + ?Sized>(source: &mut S, timestamp: DateTime<Utc>) -> Signal {
    let direction = if source.next_unit() > UP_THRESHOLD {
        Direction::Up
    } else {
        Direction::Down
    };
    let confidence = CONFIDENCE_MIN + scaled(source.next_unit(), CONFIDENCE_SPAN);
    let strength = STRENGTH_MIN + scaled(source.next_unit(), STRENGTH_SPAN);
    let signal = Signal {
        direction,
        confidence,
        strength,
        timestamp,
    };
    info!(%direction, confidence, strength, "signal generated");
    signal
}

/// `floor(u * span)`, guarded so `u` at or above 1.0 cannot escape the range.
fn scaled(u: f64, span: u8) -> u8 {
    let v = (u * f64::from(span)).floor();
    (v.max(0.0) as u8).min(span - 1)
}

/// Countdown gating the next signal request. Decrements once per second.
#[derive(Debug, Default)]
pub struct Cooldown {
    remaining: u32,
    timer: Option<TimerId>,
}

impl Cooldown {
    pub const TICK_MS: u64 = 1000;

    pub fn new() -> Self {
        Self::default()
    }

    /// Arm for `seconds`, replacing any countdown in flight. Zero leaves it disarmed.
    pub fn arm(&mut self, sched: &mut Scheduler<TimerKey>, seconds: u32) {
        self.disarm(sched);
        if seconds == 0 {
            return;
        }
        self.remaining = seconds;
        self.timer = Some(sched.every(TimerKey::Cooldown, Self::TICK_MS));
        debug!(seconds, "cooldown armed");
    }

    /// One elapsed second. Disarms itself on reaching zero.
    pub fn on_tick(&mut self, sched: &mut Scheduler<TimerKey>) {
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            sched.cancel_slot(&mut self.timer);
            debug!("cooldown elapsed");
        }
    }

    pub fn disarm(&mut self, sched: &mut Scheduler<TimerKey>) {
        sched.cancel_slot(&mut self.timer);
        self.remaining = 0;
    }

    pub fn is_armed(&self) -> bool {
        self.remaining > 0
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::{RngHierarchy, ScriptedSource, Stream};

    fn ts() -> DateTime<Utc> {
        DateTime::<Utc>::UNIX_EPOCH
    }

    #[test]
    fn threshold_is_strict() {
        let mut src = ScriptedSource::new(vec![0.4, 0.0, 0.0]);
        assert_eq!(generate(&mut src, ts()).direction, Direction::Down);
        let mut src = ScriptedSource::new(vec![0.400_001, 0.0, 0.0]);
        assert_eq!(generate(&mut src, ts()).direction, Direction::Up);
    }

    #[test]
    fn extremes_map_to_range_ends() {
        let mut low = ScriptedSource::new(vec![0.0, 0.0, 0.0]);
        let s = generate(&mut low, ts());
        assert_eq!((s.confidence, s.strength), (85, 3));

        let mut high = ScriptedSource::new(vec![0.999_999, 0.999_999, 0.999_999]);
        let s = generate(&mut high, ts());
        assert_eq!((s.direction, s.confidence, s.strength), (Direction::Up, 96, 4));
    }

    #[test]
    fn scaled_clamps_out_of_range_input() {
        assert_eq!(scaled(1.0, 12), 11);
        assert_eq!(scaled(-0.5, 2), 0);
    }

    #[test]
    fn direction_share_is_near_sixty_percent() {
        let mut rng = RngHierarchy::new(2024).rng_for(Stream::Signal, 0);
        let n = 20_000;
        let ups = (0..n)
            .filter(|_| generate(&mut rng, ts()).direction.is_up())
            .count();
        let share = ups as f64 / n as f64;
        // sd = sqrt(0.6 * 0.4 / 20000) ~ 0.0035; allow ~5 sd
        assert!((share - 0.6).abs() < 0.018, "up share {share}");
    }

    #[test]
    fn cooldown_counts_down_and_disarms() {
        let mut sched = Scheduler::new();
        let mut cd = Cooldown::new();
        cd.arm(&mut sched, 3);
        assert!(cd.is_armed());
        let mut ticks = 0;
        while let Some(f) = sched.pop_due(10_000) {
            assert_eq!(f.key, TimerKey::Cooldown);
            cd.on_tick(&mut sched);
            ticks += 1;
        }
        assert_eq!(ticks, 3);
        assert!(!cd.is_armed());
        assert!(sched.is_empty());
    }

    #[test]
    fn arming_zero_stays_disarmed() {
        let mut sched = Scheduler::new();
        let mut cd = Cooldown::new();
        cd.arm(&mut sched, 0);
        assert!(!cd.is_armed());
        assert!(sched.is_empty());
    }

    #[test]
    fn rearm_replaces_previous_timer() {
        let mut sched = Scheduler::new();
        let mut cd = Cooldown::new();
        cd.arm(&mut sched, 5);
        cd.arm(&mut sched, 2);
        assert_eq!(sched.len(), 1);
        assert_eq!(cd.remaining(), 2);
    }
}
