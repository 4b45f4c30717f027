//! Presentation models: pure functions of their inputs plus, for the animated
//! ones, a timer-driven phase. Nothing here touches flow state.

pub mod chart;
pub mod counter;
pub mod flags;
pub mod strength;

pub use chart::{ArrowPulse, ChartAnimation, ChartGlyph};
pub use counter::{format_thousands, AnimatedCounter, CounterSlot};
pub use flags::{flag_badge, flag_pair, FlagBadge, Rgb};
pub use strength::StrengthBar;
