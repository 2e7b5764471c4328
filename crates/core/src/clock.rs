//! Injected time source.
//!
//! Anything that depends on "today" or "now" reads it through [`Clock`] so tests
//! can pin an arbitrary local instant instead of depending on execution time.

use std::sync::{Arc, PoisonError, RwLock};

use chrono::{Duration, Local, NaiveDate, NaiveDateTime};

/// Source of local wall-clock time (no timezone attached).
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;

    /// Local calendar date of [`Clock::now`].
    fn today(&self) -> NaiveDate {
        self.now().date()
    }
}

impl<C> Clock for Arc<C>
where
    C: Clock + ?Sized,
{
    fn now(&self) -> NaiveDateTime {
        (**self).now()
    }
}

/// Process wall clock in the local timezone.
#[derive(Debug, Default, Copy, Clone)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Manually driven clock for tests and replays.
#[derive(Debug)]
pub struct FixedClock {
    now: RwLock<NaiveDateTime>,
}

impl FixedClock {
    pub fn new(now: NaiveDateTime) -> Self {
        Self {
            now: RwLock::new(now),
        }
    }

    pub fn set(&self, now: NaiveDateTime) {
        *self.now.write().unwrap_or_else(PoisonError::into_inner) = now;
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.write().unwrap_or_else(PoisonError::into_inner);
        *now += by;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        *self.now.read().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 10)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    #[test]
    fn fixed_clock_reports_pinned_instant() {
        let clock = FixedClock::new(at(0, 0, 30));
        assert_eq!(clock.now(), at(0, 0, 30));
        assert_eq!(clock.today(), NaiveDate::from_ymd_opt(2024, 3, 10).unwrap());
    }

    #[test]
    fn fixed_clock_can_be_moved() {
        let clock = FixedClock::new(at(23, 59, 59));
        clock.advance(Duration::seconds(2));
        assert_eq!(clock.today(), NaiveDate::from_ymd_opt(2024, 3, 11).unwrap());

        clock.set(at(8, 0, 0));
        assert_eq!(clock.now(), at(8, 0, 0));
    }

    #[test]
    fn arc_clock_forwards() {
        let clock = Arc::new(FixedClock::new(at(12, 0, 0)));
        let shared: Arc<dyn Clock> = clock.clone();
        assert_eq!(shared.now(), at(12, 0, 0));
    }
}
