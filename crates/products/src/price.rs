//! Money and discount value objects.

use core::fmt;

use serde::{Deserialize, Serialize};

use shelfwise_core::{DomainError, DomainResult, ValueObject};

/// Price in the smallest currency unit (e.g. cents).
///
/// Unsigned, so a price can never go negative.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PriceCents(u64);

impl PriceCents {
    pub const fn new(cents: u64) -> Self {
        Self(cents)
    }

    pub const fn cents(self) -> u64 {
        self.0
    }

    /// `price - floor(price * percent / 100)`.
    ///
    /// Split into quotient and remainder by 100 so the product never overflows:
    /// `floor(p * d / 100) == (p / 100) * d + floor((p % 100) * d / 100)`.
    pub fn discounted(self, percent: DiscountPercent) -> Self {
        let p = self.0;
        let d = u64::from(percent.value());
        let reduction = (p / 100) * d + (p % 100) * d / 100;
        Self(p - reduction)
    }
}

impl ValueObject for PriceCents {}

impl From<u64> for PriceCents {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl fmt::Display for PriceCents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

/// Whole-number discount percentage in `0..=100`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct DiscountPercent(u8);

impl DiscountPercent {
    pub const MAX: u8 = 100;

    pub fn new(value: i64) -> DomainResult<Self> {
        u8::try_from(value)
            .ok()
            .filter(|v| *v <= Self::MAX)
            .map(Self)
            .ok_or_else(|| {
                DomainError::validation(format!("discount percent must be within 0..=100, got {value}"))
            })
    }

    pub const fn value(self) -> u8 {
        self.0
    }
}

impl ValueObject for DiscountPercent {}

impl TryFrom<i64> for DiscountPercent {
    type Error = DomainError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<DiscountPercent> for u8 {
    fn from(value: DiscountPercent) -> Self {
        value.0
    }
}

impl fmt::Display for DiscountPercent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}
