//! Expiry lookahead.

use core::fmt;

use chrono::{Days, NaiveDate};

use shelfwise_core::{DomainError, DomainResult, ValueObject};

/// How many days ahead of today a product counts as "near expiry".
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LookaheadDays(u32);

impl LookaheadDays {
    pub fn new(days: i64) -> DomainResult<Self> {
        if days < 0 {
            return Err(DomainError::validation(format!(
                "lookahead days must not be negative, got {days}"
            )));
        }
        u32::try_from(days)
            .map(Self)
            .map_err(|_| DomainError::validation(format!("lookahead days too large: {days}")))
    }

    pub const fn days(self) -> u32 {
        self.0
    }

    /// First date that is *not* near expiry: `today + days`.
    ///
    /// `None` when the sum runs past the last representable date, in which case
    /// every product is within the horizon.
    pub fn horizon(self, today: NaiveDate) -> Option<NaiveDate> {
        today.checked_add_days(Days::new(u64::from(self.0)))
    }
}

impl ValueObject for LookaheadDays {}

impl TryFrom<i64> for LookaheadDays {
    type Error = DomainError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for LookaheadDays {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}d", self.0)
    }
}
