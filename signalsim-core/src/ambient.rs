//! Decorative ambient counters.
//!
//! Five fields, each driven by its own interval. None of them read or write
//! the flow state; they only exist to make the screen look busy.

use crate::catalog::CURRENCY_PAIRS;
use crate::clock::SessionClock;
use crate::rng::UniformSource;
use crate::session::TimerKey;
use crate::timer::{Millis, Scheduler, TimerId};

pub const USER_COUNT_RANGE: (u32, u32) = (1200, 1300);
pub const DATA_POINTS_RANGE: (u32, u32) = (15_000, 20_000);
const INITIAL_USER_COUNT: u32 = 1247;
const INITIAL_DATA_POINTS: u32 = 15_847;
const INITIAL_ANALYZING: &str = "EUR/USD (127 users)";
/// Countdown start, in tenths of a second.
const COUNTDOWN_START: u32 = 32;

/// The five ambient timers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AmbientTimer {
    UserCount,
    Analyzing,
    Countdown,
    DataPoints,
    Clock,
}

impl AmbientTimer {
    pub const ALL: [AmbientTimer; 5] = [
        AmbientTimer::UserCount,
        AmbientTimer::Analyzing,
        AmbientTimer::Countdown,
        AmbientTimer::DataPoints,
        AmbientTimer::Clock,
    ];

    pub fn period(self) -> Millis {
        match self {
            AmbientTimer::UserCount => 5_000,
            AmbientTimer::Analyzing => 8_000,
            AmbientTimer::Countdown => 100,
            AmbientTimer::DataPoints => 2_000,
            AmbientTimer::Clock => 1_000,
        }
    }
}

#[derive(Debug)]
pub struct AmbientMetrics {
    user_count: u32,
    currently_analyzing: String,
    countdown_tenths: u32,
    data_points: u32,
    last_update: String,
    timers: Vec<TimerId>,
}

impl AmbientMetrics {
    pub fn new(clock: &SessionClock) -> Self {
        Self {
            user_count: INITIAL_USER_COUNT,
            currently_analyzing: INITIAL_ANALYZING.to_string(),
            countdown_tenths: COUNTDOWN_START,
            data_points: INITIAL_DATA_POINTS,
            last_update: clock.hms(0),
            timers: Vec::new(),
        }
    }

    /// Arm all five intervals. Restarting first cancels the old set.
    pub fn start(&mut self, sched: &mut Scheduler<TimerKey>) {
        self.stop(sched);
        self.timers = AmbientTimer::ALL
            .iter()
            .map(|t| sched.every(TimerKey::Ambient(*t), t.period()))
            .collect();
    }

    pub fn stop(&mut self, sched: &mut Scheduler<TimerKey>) {
        for id in self.timers.drain(..) {
            sched.cancel(id);
        }
    }

    pub fn is_running(&self) -> bool {
        !self.timers.is_empty()
    }

    pub fn on_timer<S: UniformSource + ?Sized>(
        &mut self,
        which: AmbientTimer,
        source: &mut S,
        clock: &SessionClock,
        now: Millis,
    ) {
        match which {
            AmbientTimer::UserCount => {
                let delta = draw_int(source, 10) - 4;
                self.user_count = apply_delta(self.user_count, delta, USER_COUNT_RANGE);
            }
            AmbientTimer::Analyzing => {
                let idx = draw_int(source, CURRENCY_PAIRS.len() as i64) as usize;
                let users = draw_int(source, 200) + 50;
                let pair = CURRENCY_PAIRS[idx.min(CURRENCY_PAIRS.len() - 1)].symbol;
                self.currently_analyzing = format!("{pair} ({users} users)");
            }
            AmbientTimer::Countdown => {
                self.countdown_tenths = match self.countdown_tenths.saturating_sub(1) {
                    0 => COUNTDOWN_START,
                    n => n,
                };
            }
            AmbientTimer::DataPoints => {
                let delta = draw_int(source, 1000) - 500;
                self.data_points = apply_delta(self.data_points, delta, DATA_POINTS_RANGE);
            }
            AmbientTimer::Clock => {
                self.last_update = clock.hms(now);
            }
        }
    }

    pub fn user_count(&self) -> u32 {
        self.user_count
    }

    pub fn currently_analyzing(&self) -> &str {
        &self.currently_analyzing
    }

    /// Seconds remaining on the decorative countdown, one decimal.
    pub fn countdown(&self) -> String {
        format!("{}.{}", self.countdown_tenths / 10, self.countdown_tenths % 10)
    }

    pub fn data_points(&self) -> u32 {
        self.data_points
    }

    pub fn last_update(&self) -> &str {
        &self.last_update
    }
}

/// `floor(u * n)` as a signed integer in `[0, n)`.
fn draw_int<S: UniformSource + ?Sized>(source: &mut S, n: i64) -> i64 {
    ((source.next_unit() * n as f64).floor() as i64).clamp(0, n - 1)
}

fn apply_delta(value: u32, delta: i64, (lo, hi): (u32, u32)) -> u32 {
    (i64::from(value) + delta).clamp(i64::from(lo), i64::from(hi)) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::ScriptedSource;
    use chrono::{TimeZone, Utc};

    fn clock() -> SessionClock {
        SessionClock::utc(Utc.with_ymd_and_hms(2024, 1, 1, 9, 30, 0).unwrap())
    }

    #[test]
    fn initial_values() {
        let m = AmbientMetrics::new(&clock());
        assert_eq!(m.user_count(), 1247);
        assert_eq!(m.data_points(), 15_847);
        assert_eq!(m.currently_analyzing(), "EUR/USD (127 users)");
        assert_eq!(m.countdown(), "3.2");
        assert_eq!(m.last_update(), "09:30:00");
    }

    #[test]
    fn user_count_delta_bounds() {
        let c = clock();
        let mut m = AmbientMetrics::new(&c);
        m.on_timer(AmbientTimer::UserCount, &mut ScriptedSource::new(vec![0.0]), &c, 0);
        assert_eq!(m.user_count(), 1243);
        m.on_timer(AmbientTimer::UserCount, &mut ScriptedSource::new(vec![0.999]), &c, 0);
        assert_eq!(m.user_count(), 1248);
    }

    #[test]
    fn user_count_clamps_at_ceiling() {
        let c = clock();
        let mut m = AmbientMetrics::new(&c);
        let mut up = ScriptedSource::new(vec![0.999]);
        for _ in 0..100 {
            m.on_timer(AmbientTimer::UserCount, &mut up, &c, 0);
        }
        assert_eq!(m.user_count(), 1300);
    }

    #[test]
    fn data_points_clamp_at_floor() {
        let c = clock();
        let mut m = AmbientMetrics::new(&c);
        let mut down = ScriptedSource::new(vec![0.0]);
        for _ in 0..10 {
            m.on_timer(AmbientTimer::DataPoints, &mut down, &c, 0);
        }
        assert_eq!(m.data_points(), 15_000);
    }

    #[test]
    fn analyzing_label_format() {
        let c = clock();
        let mut m = AmbientMetrics::new(&c);
        // pair index floor(0.5 * 4) = 2, users floor(0.25 * 200) + 50 = 100
        m.on_timer(AmbientTimer::Analyzing, &mut ScriptedSource::new(vec![0.5, 0.25]), &c, 0);
        assert_eq!(m.currently_analyzing(), "USD/JPY (100 users)");
    }

    #[test]
    fn countdown_wraps_before_zero() {
        let c = clock();
        let mut m = AmbientMetrics::new(&c);
        let mut src = ScriptedSource::new(vec![0.0]);
        for _ in 0..31 {
            m.on_timer(AmbientTimer::Countdown, &mut src, &c, 0);
        }
        assert_eq!(m.countdown(), "0.1");
        m.on_timer(AmbientTimer::Countdown, &mut src, &c, 0);
        assert_eq!(m.countdown(), "3.2");
    }

    #[test]
    fn clock_tracks_virtual_time() {
        let c = clock();
        let mut m = AmbientMetrics::new(&c);
        m.on_timer(AmbientTimer::Clock, &mut ScriptedSource::new(vec![0.0]), &c, 61_000);
        assert_eq!(m.last_update(), "09:31:01");
    }

    #[test]
    fn start_stop_owns_five_timers() {
        let c = clock();
        let mut sched = Scheduler::new();
        let mut m = AmbientMetrics::new(&c);
        m.start(&mut sched);
        assert_eq!(sched.len(), 5);
        m.start(&mut sched);
        assert_eq!(sched.len(), 5);
        m.stop(&mut sched);
        m.stop(&mut sched);
        assert!(sched.is_empty());
        assert!(!m.is_running());
    }
}
