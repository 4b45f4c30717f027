//! Domain types: screens, selections, signals, pairs and timeframes.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::SimError;

/// One of the four mutually exclusive views in the flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Screen {
    Pairs,
    Timeframe,
    Analysis,
    Signal,
}

impl Screen {
    pub fn label(self) -> &'static str {
        match self {
            Screen::Pairs => "pairs",
            Screen::Timeframe => "timeframe",
            Screen::Analysis => "analysis",
            Screen::Signal => "signal",
        }
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Trade direction of a generated signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    pub fn is_up(self) -> bool {
        matches!(self, Direction::Up)
    }

    /// Order-ticket wording shown on the signal screen.
    pub fn action_label(self) -> &'static str {
        match self {
            Direction::Up => "BUY (LONG)",
            Direction::Down => "SELL (SHORT)",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Up => f.write_str("up"),
            Direction::Down => f.write_str("down"),
        }
    }
}

/// A generated signal. Immutable once created; replaced wholesale by the next one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signal {
    pub direction: Direction,
    /// Percentage in `[85, 96]`.
    pub confidence: u8,
    /// Rating in `{3, 4}` out of [`Signal::MAX_STRENGTH`].
    pub strength: u8,
    pub timestamp: DateTime<Utc>,
}

impl Signal {
    pub const MAX_STRENGTH: u8 = 5;
}

/// A currency pair from the fixed catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct CurrencyPair {
    pub symbol: &'static str,
    pub name: &'static str,
    /// Country codes for the base and quote currency flags.
    pub flags: [&'static str; 2],
    /// Static decorative change label, e.g. `+0.24%`.
    pub change: &'static str,
    pub positive: bool,
    pub tags: &'static [&'static str],
}

impl fmt::Display for CurrencyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol)
    }
}

/// Signal timeframe; the numeric part doubles as the cooldown in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Timeframe {
    seconds: u32,
}

impl Timeframe {
    pub const fn from_secs(seconds: u32) -> Self {
        Self { seconds }
    }

    pub fn seconds(self) -> u32 {
        self.seconds
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}s", self.seconds)
    }
}

impl FromStr for Timeframe {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s
            .trim()
            .strip_suffix('s')
            .ok_or_else(|| SimError::InvalidTimeframe(s.to_string()))?;
        match digits.parse::<u32>() {
            Ok(seconds) if seconds > 0 => Ok(Self { seconds }),
            _ => Err(SimError::InvalidTimeframe(s.to_string())),
        }
    }
}

impl TryFrom<String> for Timeframe {
    type Error = SimError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Timeframe> for String {
    fn from(tf: Timeframe) -> Self {
        tf.to_string()
    }
}

/// The user's choices for the current cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Selection {
    pub pair: Option<CurrencyPair>,
    pub timeframe: Option<Timeframe>,
}
