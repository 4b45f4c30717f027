//! Eased numeric counter.

use crate::session::TimerKey;
use crate::timer::{Millis, Scheduler, TimerId};

/// Which on-screen counter a frame timer belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CounterSlot {
    UserCount,
    DataPoints,
}

/// Quartic ease-out: fast start, gentle landing.
pub fn ease_out_quart(progress: f64) -> f64 {
    let p = progress.clamp(0.0, 1.0);
    1.0 - (1.0 - p).powi(4)
}

/// Value shown `elapsed` ms into an animation from 0 to `target`.
pub fn value_at(target: u64, duration: Millis, elapsed: Millis) -> u64 {
    if duration == 0 || elapsed >= duration {
        return target;
    }
    let progress = elapsed as f64 / duration as f64;
    ((ease_out_quart(progress) * target as f64).floor() as u64).min(target)
}

/// Counts from 0 up to its target every time the target changes.
#[derive(Debug)]
pub struct AnimatedCounter {
    slot: CounterSlot,
    target: u64,
    display: u64,
    duration: Millis,
    frame_ms: Millis,
    started_at: Millis,
    frame: Option<TimerId>,
}

impl AnimatedCounter {
    pub fn new(slot: CounterSlot, duration: Millis, frame_ms: Millis) -> Self {
        Self {
            slot,
            target: 0,
            display: 0,
            duration,
            frame_ms,
            started_at: 0,
            frame: None,
        }
    }

    /// Restart the animation toward `target`. An unchanged target is a no-op;
    /// a changed one drops the in-flight frame timer first.
    pub fn set_target(&mut self, sched: &mut Scheduler<TimerKey>, target: u64) {
        if target == self.target && (self.frame.is_some() || self.display == target) {
            return;
        }
        sched.cancel_slot(&mut self.frame);
        self.target = target;
        self.display = 0;
        self.started_at = sched.now();
        self.frame = Some(sched.every(TimerKey::CounterFrame(self.slot), self.frame_ms));
    }

    pub fn on_frame(&mut self, sched: &mut Scheduler<TimerKey>) {
        let elapsed = sched.now().saturating_sub(self.started_at);
        self.display = value_at(self.target, self.duration, elapsed);
        if elapsed >= self.duration {
            sched.cancel_slot(&mut self.frame);
        }
    }

    pub fn stop(&mut self, sched: &mut Scheduler<TimerKey>) {
        sched.cancel_slot(&mut self.frame);
    }

    pub fn display(&self) -> u64 {
        self.display
    }

    pub fn target(&self) -> u64 {
        self.target
    }

    pub fn is_animating(&self) -> bool {
        self.frame.is_some()
    }
}

/// `15847` → `15,847`.
pub fn format_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
