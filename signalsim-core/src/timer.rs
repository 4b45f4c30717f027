//! Virtual-time timer scheduler.
//!
//! Timers are keyed by an owner-defined tag and addressed by a [`TimerId`]
//! handle. The scheduler never calls back into its owners: the host pops due
//! timers one at a time and dispatches them, which lets a handler arm new
//! timers that still fire within the same [`Scheduler::pop_due`] sweep.
//!
//! Time is plain milliseconds since the scheduler was created. Tests advance
//! it in exact steps; the TUI advances it by real elapsed time.

use std::collections::BTreeMap;

/// Milliseconds of virtual time.
pub type Millis = u64;

/// Handle to a scheduled timer. Cancelling it more than once is a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Repeat {
    Once,
    Every(Millis),
}

#[derive(Debug, Clone)]
struct Entry<K> {
    key: K,
    due: Millis,
    repeat: Repeat,
}

/// A timer that came due.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fired<K> {
    pub id: TimerId,
    pub key: K,
    /// Virtual time at which it fired.
    pub at: Millis,
}

/// Single-threaded timer wheel over virtual time.
#[derive(Debug, Clone)]
pub struct Scheduler<K> {
    now: Millis,
    next_id: u64,
    timers: BTreeMap<TimerId, Entry<K>>,
}

impl<K: Copy> Default for Scheduler<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Copy> Scheduler<K> {
    pub fn new() -> Self {
        Self {
            now: 0,
            next_id: 0,
            timers: BTreeMap::new(),
        }
    }

    pub fn now(&self) -> Millis {
        self.now
    }

    /// Number of live timers.
    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }

    pub fn is_active(&self, id: TimerId) -> bool {
        self.timers.contains_key(&id)
    }

    /// Fire once, `delay` ms from now.
    pub fn once(&mut self, key: K, delay: Millis) -> TimerId {
        self.insert(key, delay, Repeat::Once)
    }

    /// Fire every `period` ms, first at `now + period`.
    pub fn every(&mut self, key: K, period: Millis) -> TimerId {
        assert!(period > 0, "interval period must be non-zero");
        self.insert(key, period, Repeat::Every(period))
    }

    /// Cancel a timer. Returns whether it was still live.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        self.timers.remove(&id).is_some()
    }

    /// Cancel through an optional handle slot, clearing it.
    pub fn cancel_slot(&mut self, slot: &mut Option<TimerId>) {
        if let Some(id) = slot.take() {
            self.cancel(id);
        }
    }

    /// Pop the earliest timer due at or before `until`, moving the clock to its
    /// due time. Ties fire in scheduling order. Intervals are re-armed before
    /// being returned, so the handler may cancel them.
    ///
    /// When nothing is due, the clock moves to `until` and `None` is returned.
    pub fn pop_due(&mut self, until: Millis) -> Option<Fired<K>> {
        let next = self
            .timers
            .iter()
            .map(|(id, e)| (e.due, *id))
            .min();
        let (due, id) = match next {
            Some((due, id)) if due <= until => (due, id),
            _ => {
                self.now = self.now.max(until);
                return None;
            }
        };
        self.now = self.now.max(due);
        let entry = self.timers.get_mut(&id)?;
        let fired = Fired {
            id,
            key: entry.key,
            at: due,
        };
        match entry.repeat {
            Repeat::Every(period) => entry.due = due + period,
            Repeat::Once => {
                self.timers.remove(&id);
            }
        }
        Some(fired)
    }

    fn insert(&mut self, key: K, delay: Millis, repeat: Repeat) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.timers.insert(
            id,
            Entry {
                key,
                due: self.now + delay,
                repeat,
            },
        );
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(s: &mut Scheduler<&'static str>, until: Millis) -> Vec<(&'static str, Millis)> {
        let mut out = Vec::new();
        while let Some(f) = s.pop_due(until) {
            out.push((f.key, f.at));
        }
        out
    }

    #[test]
    fn once_fires_exactly_once() {
        let mut s = Scheduler::new();
        s.once("a", 100);
        assert!(drain(&mut s, 99).is_empty());
        assert_eq!(s.now(), 99);
        assert_eq!(drain(&mut s, 1000), vec![("a", 100)]);
        assert!(s.is_empty());
        assert_eq!(s.now(), 1000);
    }

    #[test]
    fn interval_fires_per_period() {
        let mut s = Scheduler::new();
        s.every("tick", 600);
        let fired = drain(&mut s, 2000);
        assert_eq!(fired, vec![("tick", 600), ("tick", 1200), ("tick", 1800)]);
        assert_eq!(s.len(), 1);
    }

    #[test]
    fn ties_fire_in_scheduling_order() {
        let mut s = Scheduler::new();
        s.once("first", 50);
        s.once("second", 50);
        assert_eq!(drain(&mut s, 50), vec![("first", 50), ("second", 50)]);
    }

    #[test]
    fn cancel_is_idempotent() {
        let mut s: Scheduler<&str> = Scheduler::new();
        let id = s.every("x", 10);
        assert!(s.cancel(id));
        assert!(!s.cancel(id));
        assert!(drain(&mut s, 100).is_empty());

        let mut slot = Some(s.once("y", 5));
        s.cancel_slot(&mut slot);
        s.cancel_slot(&mut slot);
        assert!(slot.is_none());
        assert!(s.is_empty());
    }

    #[test]
    fn handler_armed_timer_fires_in_same_sweep() {
        let mut s = Scheduler::new();
        s.once("tick", 600);
        let first = s.pop_due(2000).unwrap();
        assert_eq!(first.at, 600);
        s.once("settle", 800);
        let second = s.pop_due(2000).unwrap();
        assert_eq!((second.key, second.at), ("settle", 1400));
        assert!(s.pop_due(2000).is_none());
    }

    #[test]
    fn cancelling_interval_inside_handler_stops_it() {
        let mut s = Scheduler::new();
        let id = s.every("tick", 100);
        let f = s.pop_due(1000).unwrap();
        s.cancel(f.id);
        assert_eq!(f.id, id);
        assert!(s.pop_due(1000).is_none());
    }
}
