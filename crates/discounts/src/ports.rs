//! Collaborator interfaces consumed by the discount core.

use std::sync::Arc;

use chrono::NaiveDate;

use shelfwise_products::ProductSnapshot;

use crate::error::PersistenceError;

/// Owner of product records: full read plus single-item replace.
pub trait ProductCatalog: Send + Sync {
    fn get_all_products(&self) -> Result<Vec<ProductSnapshot>, PersistenceError>;

    /// Replace the stored product that has the snapshot's id.
    fn update_product(&self, snapshot: ProductSnapshot) -> Result<(), PersistenceError>;
}

/// Read-only view of the active cart.
///
/// Cart items are catalog products; writes go through [`ProductCatalog`].
pub trait CartStore: Send + Sync {
    fn get_cart_items(&self) -> Result<Vec<ProductSnapshot>, PersistenceError>;
}

/// Which product pool a discount run reads from.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum DiscountSource {
    Catalog,
    Cart,
}

impl DiscountSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiscountSource::Catalog => "catalog",
            DiscountSource::Cart => "cart",
        }
    }
}

impl core::fmt::Display for DiscountSource {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Remembers the local date each source was last discounted on.
///
/// Optional: without a ledger, repeated runs inside the gate window compound.
pub trait DiscountRunLedger: Send + Sync {
    fn last_applied(&self, source: DiscountSource) -> Result<Option<NaiveDate>, PersistenceError>;
    fn mark_applied(&self, source: DiscountSource, date: NaiveDate) -> Result<(), PersistenceError>;
}

impl<T> ProductCatalog for Arc<T>
where
    T: ProductCatalog + ?Sized,
{
    fn get_all_products(&self) -> Result<Vec<ProductSnapshot>, PersistenceError> {
        (**self).get_all_products()
    }

    fn update_product(&self, snapshot: ProductSnapshot) -> Result<(), PersistenceError> {
        (**self).update_product(snapshot)
    }
}

impl<T> CartStore for Arc<T>
where
    T: CartStore + ?Sized,
{
    fn get_cart_items(&self) -> Result<Vec<ProductSnapshot>, PersistenceError> {
        (**self).get_cart_items()
    }
}

impl<T> DiscountRunLedger for Arc<T>
where
    T: DiscountRunLedger + ?Sized,
{
    fn last_applied(&self, source: DiscountSource) -> Result<Option<NaiveDate>, PersistenceError> {
        (**self).last_applied(source)
    }

    fn mark_applied(&self, source: DiscountSource, date: NaiveDate) -> Result<(), PersistenceError> {
        (**self).mark_applied(source, date)
    }
}
