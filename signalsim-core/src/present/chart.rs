//! Directional chart glyph and its two looping animations.

use crate::domain::Direction;
use crate::session::TimerKey;
use crate::timer::{Millis, Scheduler, TimerId};

pub const CHART_WIDTH: f64 = 120.0;
pub const CHART_HEIGHT: f64 = 80.0;
const SEGMENTS: usize = 12;
const MARGIN: f64 = 10.0;

/// Static trend line for a direction. Same input, same shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartGlyph {
    pub direction: Direction,
    pub animated: bool,
}

impl ChartGlyph {
    pub fn new(direction: Direction, animated: bool) -> Self {
        Self {
            direction,
            animated,
        }
    }

    /// 13 points across a 120x80 box, y growing downward. Rising for `Up`,
    /// falling for `Down`, with a fixed wobble, clamped inside the margins.
    pub fn points(&self) -> Vec<(f64, f64)> {
        (0..=SEGMENTS)
            .map(|i| {
                let t = i as f64 / SEGMENTS as f64;
                let x = t * CHART_WIDTH;
                let base = match self.direction {
                    Direction::Up => CHART_HEIGHT - t * CHART_HEIGHT * 0.7,
                    Direction::Down => 20.0 + t * CHART_HEIGHT * 0.7,
                };
                let fi = i as f64;
                let wobble = (fi * 0.8).sin() * 8.0 + (fi * 1.2).cos() * 5.0;
                let y = (base + wobble).clamp(MARGIN, CHART_HEIGHT - MARGIN);
                (x, y)
            })
            .collect()
    }

    /// Arrow head at the right edge, as a polyline.
    pub fn arrow_tip(&self) -> [(f64, f64); 3] {
        match self.direction {
            Direction::Up => [(105.0, 15.0), (120.0, 25.0), (105.0, 45.0)],
            Direction::Down => [(105.0, 65.0), (120.0, 55.0), (105.0, 35.0)],
        }
    }

    /// Glyph character for compact layouts.
    pub fn arrow_char(&self) -> char {
        match self.direction {
            Direction::Up => '↗',
            Direction::Down => '↙',
        }
    }
}

/// Marching-dash offset, advanced by 2 (mod 100) every 50 ms.
#[derive(Debug, Default)]
pub struct ChartAnimation {
    offset: u32,
    timer: Option<TimerId>,
}

impl ChartAnimation {
    pub const PERIOD_MS: Millis = 50;

    pub fn start(&mut self, sched: &mut Scheduler<TimerKey>) {
        sched.cancel_slot(&mut self.timer);
        self.offset = 0;
        self.timer = Some(sched.every(TimerKey::ChartDash, Self::PERIOD_MS));
    }

    pub fn on_tick(&mut self) {
        self.offset = (self.offset + 2) % 100;
    }

    pub fn stop(&mut self, sched: &mut Scheduler<TimerKey>) {
        sched.cancel_slot(&mut self.timer);
    }

    pub fn offset(&self) -> u32 {
        self.offset
    }

    /// Whether the stroke is drawn at `distance` along the path: 5 on, 3 off,
    /// shifted by the current offset.
    pub fn dash_visible(&self, distance: u32) -> bool {
        (distance + self.offset) % 8 < 5
    }
}

/// Scale toggling between 1.0 and 1.2 every 800 ms.
#[derive(Debug, Default)]
pub struct ArrowPulse {
    enlarged: bool,
    timer: Option<TimerId>,
}

impl ArrowPulse {
    pub const PERIOD_MS: Millis = 800;

    pub fn start(&mut self, sched: &mut Scheduler<TimerKey>) {
        sched.cancel_slot(&mut self.timer);
        self.enlarged = false;
        self.timer = Some(sched.every(TimerKey::ArrowPulse, Self::PERIOD_MS));
    }

    pub fn on_tick(&mut self) {
        self.enlarged = !self.enlarged;
    }

    pub fn stop(&mut self, sched: &mut Scheduler<TimerKey>) {
        sched.cancel_slot(&mut self.timer);
        self.enlarged = false;
    }

    pub fn scale(&self) -> f64 {
        if self.enlarged {
            1.2
        } else {
            1.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn up_chart_rises_down_chart_falls() {
        let up = ChartGlyph::new(Direction::Up, false).points();
        let down = ChartGlyph::new(Direction::Down, false).points();
        assert_eq!(up.len(), 13);
        // y grows downward: a rising line ends with a smaller y
        assert!(up.last().unwrap().1 < up.first().unwrap().1);
        assert!(down.last().unwrap().1 > down.first().unwrap().1);
    }

    #[test]
    fn points_stay_inside_margins() {
        for dir in [Direction::Up, Direction::Down] {
            for (x, y) in ChartGlyph::new(dir, true).points() {
                assert!((0.0..=CHART_WIDTH).contains(&x));
                assert!((MARGIN..=CHART_HEIGHT - MARGIN).contains(&y));
            }
        }
    }

    #[test]
    fn shape_is_pure() {
        let a = ChartGlyph::new(Direction::Down, true);
        assert_eq!(a.points(), a.points());
        assert_eq!(a.arrow_char(), '↙');
    }

    #[test]
    fn dash_offset_wraps() {
        let mut anim = ChartAnimation::default();
        for _ in 0..50 {
            anim.on_tick();
        }
        assert_eq!(anim.offset(), 0);
        anim.on_tick();
        assert_eq!(anim.offset(), 2);
    }

    #[test]
    fn animations_own_single_timer() {
        let mut sched = Scheduler::new();
        let mut anim = ChartAnimation::default();
        let mut pulse = ArrowPulse::default();
        anim.start(&mut sched);
        anim.start(&mut sched);
        pulse.start(&mut sched);
        assert_eq!(sched.len(), 2);
        pulse.on_tick();
        assert_eq!(pulse.scale(), 1.2);
        anim.stop(&mut sched);
        pulse.stop(&mut sched);
        assert!(sched.is_empty());
        assert_eq!(pulse.scale(), 1.0);
    }
}
