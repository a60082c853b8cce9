//! Shared test doubles for unit tests.

use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;

/// Clock pinned to a single instant.
pub struct FixedClock(DateTime<Utc>);

impl FixedClock {
    /// Pin the clock to `now`.
    pub fn new(now: DateTime<Utc>) -> Self {
        Self(now)
    }

    /// The arbitrary instant [`Default`] pins to.
    pub fn default_instant() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 1, 8, 0, 0)
            .single()
            .expect("valid timestamp")
    }
}

impl Default for FixedClock {
    fn default() -> Self {
        Self::new(Self::default_instant())
    }
}

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.0.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}
