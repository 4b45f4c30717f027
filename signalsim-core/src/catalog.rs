//! Fixed catalogs: currency pairs, timeframes and analysis status messages.

use crate::domain::{CurrencyPair, Timeframe};
use crate::error::SimError;

pub const CURRENCY_PAIRS: [CurrencyPair; 4] = [
    CurrencyPair {
        symbol: "EUR/USD",
        name: "Euro / US Dollar",
        flags: ["EU", "US"],
        change: "+0.24%",
        positive: true,
        tags: &["HOT", "OTC"],
    },
    CurrencyPair {
        symbol: "GBP/USD",
        name: "British Pound / US Dollar",
        flags: ["GB", "US"],
        change: "-0.18%",
        positive: false,
        tags: &["HOT", "OTC"],
    },
    CurrencyPair {
        symbol: "USD/JPY",
        name: "US Dollar / Japanese Yen",
        flags: ["US", "JP"],
        change: "+0.12%",
        positive: true,
        tags: &["OTC"],
    },
    CurrencyPair {
        symbol: "AUD/USD",
        name: "Australian Dollar / US Dollar",
        flags: ["AU", "US"],
        change: "-0.08%",
        positive: false,
        tags: &["OTC"],
    },
];

/// A selectable timeframe with its display text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeframeOption {
    pub timeframe: Timeframe,
    pub label: &'static str,
    pub description: &'static str,
}

pub const TIMEFRAMES: [TimeframeOption; 4] = [
    TimeframeOption {
        timeframe: Timeframe::from_secs(5),
        label: "5 SECONDS",
        description: "Shortest cycle",
    },
    TimeframeOption {
        timeframe: Timeframe::from_secs(10),
        label: "10 SECONDS",
        description: "Quick cycle",
    },
    TimeframeOption {
        timeframe: Timeframe::from_secs(15),
        label: "15 SECONDS",
        description: "Balanced cycle",
    },
    TimeframeOption {
        timeframe: Timeframe::from_secs(30),
        label: "30 SECONDS",
        description: "Longest cycle",
    },
];

/// Scripted status lines shown while the progress bar fills.
pub const ANALYSIS_MESSAGES: [&str; 7] = [
    "Loading pair profile...",
    "Sampling simulated ticks...",
    "Scanning volatility pattern...",
    "Mixing random weights...",
    "Evaluating trend momentum...",
    "Rolling the biased coin...",
    "Signal generation complete",
];

/// Look up a pair by symbol, case-insensitively.
pub fn find_pair(symbol: &str) -> Result<CurrencyPair, SimError> {
    CURRENCY_PAIRS
        .iter()
        .find(|p| p.symbol.eq_ignore_ascii_case(symbol.trim()))
        .copied()
        .ok_or_else(|| SimError::UnknownPair(symbol.to_string()))
}

/// Parse a timeframe and require it to be one of the catalog entries.
pub fn find_timeframe(value: &str) -> Result<Timeframe, SimError> {
    let tf: Timeframe = value.parse()?;
    TIMEFRAMES
        .iter()
        .map(|o| o.timeframe)
        .find(|t| *t == tf)
        .ok_or_else(|| SimError::InvalidTimeframe(value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn find_pair_is_case_insensitive() {
        assert_eq!(find_pair("eur/usd").unwrap().symbol, "EUR/USD");
        assert!(matches!(find_pair("BTC/USD"), Err(SimError::UnknownPair(_))));
    }

    #[test]
    fn find_timeframe_requires_catalog_entry() {
        assert_eq!(find_timeframe("15s").unwrap().seconds(), 15);
        assert!(find_timeframe("45s").is_err());
        assert!(find_timeframe("fast").is_err());
    }

    #[test]
    fn last_message_marks_completion() {
        assert_eq!(ANALYSIS_MESSAGES.last().copied(), Some("Signal generation complete"));
    }
}
