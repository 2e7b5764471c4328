//! Seed data for the in-memory stores.
//!
//! ```json
//! {
//!   "products": [
//!     {"id": "0190...", "sku": "MILK-1L", "name": "Milk", "price": 199, "expiry_date": "2024-06-12"}
//!   ],
//!   "cart": ["0190..."]
//! }
//! ```

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use shelfwise_core::ProductId;
use shelfwise_discounts::{PersistenceError, ProductCatalog};
use shelfwise_products::ProductSnapshot;

use crate::cart::InMemoryCartStore;
use crate::catalog::InMemoryProductCatalog;

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("failed to read seed file: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed seed data: {0}")]
    Parse(#[from] serde_json::Error),
    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SeedData {
    #[serde(default)]
    pub products: Vec<ProductSnapshot>,
    #[serde(default)]
    pub cart: Vec<ProductId>,
}

impl SeedData {
    pub fn from_json(json: &str) -> Result<Self, SeedError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self, SeedError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Populate the stores. Cart entries must name seeded products.
    pub fn install<P: ProductCatalog>(
        &self,
        catalog: &InMemoryProductCatalog,
        cart: &InMemoryCartStore<P>,
    ) -> Result<(), SeedError> {
        for product in &self.products {
            catalog.upsert(product.clone())?;
        }
        for id in &self.cart {
            if catalog.get(*id).is_none() {
                return Err(PersistenceError::NotFound(*id).into());
            }
            cart.add(*id)?;
        }
        Ok(())
    }
}
