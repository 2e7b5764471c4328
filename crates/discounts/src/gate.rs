//! Daily time-window gate.
//!
//! A periodic scheduler may fire every few seconds; the gate keeps the discount
//! from running outside a short window each day. It does not make a run
//! idempotent: two calls inside the same window both pass.

use chrono::{NaiveDateTime, NaiveTime};

use shelfwise_core::{DomainError, DomainResult};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct TimeWindowGate {
    start: NaiveTime,
    end: NaiveTime,
}

impl TimeWindowGate {
    /// Window between `start` and `end` (exclusive on both ends) of each local day.
    pub fn new(start: NaiveTime, end: NaiveTime) -> DomainResult<Self> {
        if start >= end {
            return Err(DomainError::validation(format!(
                "gate window start {start} must be before end {end}"
            )));
        }
        Ok(Self { start, end })
    }

    /// 00:00:00 to 00:01:00 local time.
    pub fn midnight() -> Self {
        Self {
            start: NaiveTime::default(),
            end: NaiveTime::from_hms_opt(0, 1, 0).unwrap_or_default(),
        }
    }

    pub fn start(&self) -> NaiveTime {
        self.start
    }

    pub fn end(&self) -> NaiveTime {
        self.end
    }

    /// `today@start < now < today@end`.
    pub fn is_open(&self, now: NaiveDateTime) -> bool {
        let today = now.date();
        today.and_time(self.start) < now && now < today.and_time(self.end)
    }
}

impl Default for TimeWindowGate {
    fn default() -> Self {
        Self::midnight()
    }
}
