//! Maps virtual milliseconds onto wall-clock timestamps.

use chrono::{DateTime, Duration, FixedOffset, Local, Offset, Utc};

use crate::timer::Millis;

#[derive(Debug, Clone, Copy)]
pub struct SessionClock {
    origin: DateTime<Utc>,
    offset: FixedOffset,
}

impl SessionClock {
    pub fn new(origin: DateTime<Utc>, offset: FixedOffset) -> Self {
        Self { origin, offset }
    }

    /// Anchored at the current instant in the machine's local zone.
    pub fn local_now() -> Self {
        let now = Local::now();
        Self::new(now.with_timezone(&Utc), now.offset().fix())
    }

    /// Anchored at `origin`, displayed in UTC.
    pub fn utc(origin: DateTime<Utc>) -> Self {
        Self::new(origin, Utc.fix())
    }

    pub fn at(&self, elapsed: Millis) -> DateTime<Utc> {
        let ms = i64::try_from(elapsed).unwrap_or(i64::MAX);
        self.origin + Duration::milliseconds(ms)
    }

    /// 24-hour `HH:MM:SS` in the clock's display offset.
    pub fn hms(&self, elapsed: Millis) -> String {
        self.hms_of(self.at(elapsed))
    }

    pub fn hms_of(&self, instant: DateTime<Utc>) -> String {
        instant.with_timezone(&self.offset).format("%H:%M:%S").to_string()
    }
}
