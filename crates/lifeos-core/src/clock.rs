//! # Clock
//!
//! Source of "now" for the services. Calendar days are UTC days.

use chrono::{DateTime, NaiveDate, Utc};

/// Where the current time comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Clock {
    /// Wall-clock time.
    #[default]
    System,
    /// A frozen instant (tests, replays).
    Fixed(DateTime<Utc>),
}

impl Clock {
    /// Freeze the clock at midday UTC on `date`.
    #[must_use]
    pub fn fixed_on(date: NaiveDate) -> Self {
        let noon = date.and_hms_opt(12, 0, 0).unwrap_or_default();
        Clock::Fixed(noon.and_utc())
    }

    /// Current instant.
    #[must_use]
    pub fn now(&self) -> DateTime<Utc> {
        match self {
            Clock::System => Utc::now(),
            Clock::Fixed(at) => *at,
        }
    }

    /// Current calendar day.
    #[must_use]
    pub fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}
