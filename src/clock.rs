//! Injectable source of the current local time.
//!
//! Ledger and engine operations take `now` as a parameter. Long-lived callers
//! such as the HTTP layer obtain it from a [`Clock`] so that weekend and
//! calendar-day rules stay deterministic under test.

use std::sync::RwLock;

use chrono::{Duration, Local, NaiveDateTime};

/// A source of local wall-clock time.
pub trait Clock: Send + Sync {
    /// The current local time.
    fn now(&self) -> NaiveDateTime;
}

/// Reads the host's local time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// A clock that only moves when told to.
///
/// # Example
///
/// ```
/// use payroll_engine::clock::{Clock, FixedClock};
/// use chrono::{Duration, NaiveDate};
///
/// let monday = NaiveDate::from_ymd_opt(2025, 6, 2).unwrap().and_hms_opt(8, 0, 0).unwrap();
/// let clock = FixedClock::new(monday);
/// clock.advance(Duration::hours(9));
/// assert_eq!(clock.now().to_string(), "2025-06-02 17:00:00");
/// ```
#[derive(Debug)]
pub struct FixedClock {
    now: RwLock<NaiveDateTime>,
}

impl FixedClock {
    /// Creates a clock stopped at `now`.
    pub fn new(now: NaiveDateTime) -> Self {
        Self {
            now: RwLock::new(now),
        }
    }

    /// Moves the clock to `now`.
    pub fn set(&self, now: NaiveDateTime) {
        let mut guard = self.now.write().unwrap_or_else(|e| e.into_inner());
        *guard = now;
    }

    /// Moves the clock forward by `by`.
    pub fn advance(&self, by: Duration) {
        let mut guard = self.now.write().unwrap_or_else(|e| e.into_inner());
        *guard += by;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        *self.now.read().unwrap_or_else(|e| e.into_inner())
    }
}
