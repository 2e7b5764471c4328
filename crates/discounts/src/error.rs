use thiserror::Error;

use shelfwise_core::{DomainError, ProductId};

/// Failure reported by a catalog, cart or ledger adapter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PersistenceError {
    #[error("product not found: {0}")]
    NotFound(ProductId),
    #[error("storage error: {0}")]
    Storage(String),
}

impl PersistenceError {
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }
}

/// Error returned by a discount run as a whole.
///
/// Per-product write failures are not errors of the run; they are collected in
/// the run report instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiscountError {
    /// Rejected before any read or write happened.
    #[error("invalid discount input: {0}")]
    InvalidInput(#[from] DomainError),

    /// The product source could not be read.
    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}
