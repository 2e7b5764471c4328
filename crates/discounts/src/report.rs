use shelfwise_core::ProductId;

use crate::error::PersistenceError;
use crate::params::DiscountParams;
use crate::ports::DiscountSource;

/// What a single discount invocation did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiscountOutcome {
    /// Outside the daily window; nothing was read or written.
    GateClosed,
    /// The run ledger shows this source was already discounted today.
    AlreadyApplied,
    /// Candidates were discounted and write-back was attempted for each.
    Applied(DiscountReport),
}

impl DiscountOutcome {
    pub fn report(&self) -> Option<&DiscountReport> {
        match self {
            DiscountOutcome::Applied(report) => Some(report),
            _ => None,
        }
    }
}

/// Write-back result of one applied run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscountReport {
    pub source: DiscountSource,
    pub params: DiscountParams,
    /// Number of near-expiry products selected from the source.
    pub candidates: usize,
    /// Ids persisted successfully, in write order.
    pub updated: Vec<ProductId>,
    pub failed: Vec<FailedUpdate>,
}

impl DiscountReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }

    /// At least one discount was persisted, or there was nothing to persist.
    ///
    /// A run where every write failed changed nothing and may be retried.
    pub fn counts_as_run(&self) -> bool {
        !self.updated.is_empty() || self.failed.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedUpdate {
    pub product_id: ProductId,
    pub error: PersistenceError,
}
