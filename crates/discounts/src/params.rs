use shelfwise_core::DomainResult;
use shelfwise_products::{DiscountPercent, LookaheadDays};

/// Validated inputs of one discount run.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct DiscountParams {
    pub days_ahead: LookaheadDays,
    pub percent: DiscountPercent,
}

impl DiscountParams {
    /// Validate raw caller input: `days_ahead >= 0`, `percent` in `0..=100`.
    pub fn new(days_ahead: i64, percent: i64) -> DomainResult<Self> {
        Ok(Self {
            days_ahead: LookaheadDays::new(days_ahead)?,
            percent: DiscountPercent::new(percent)?,
        })
    }
}
