//! In-memory cart referencing catalog products by id.

use std::sync::RwLock;

use tracing::warn;

use shelfwise_core::{Entity, ProductId};
use shelfwise_discounts::{CartStore, PersistenceError, ProductCatalog};
use shelfwise_products::ProductSnapshot;

/// Cart holding product ids only; item contents always come from the catalog,
/// so a cart item and its catalog record can never diverge.
#[derive(Debug)]
pub struct InMemoryCartStore<P> {
    catalog: P,
    items: RwLock<Vec<ProductId>>,
}

impl<P: ProductCatalog> InMemoryCartStore<P> {
    pub fn new(catalog: P) -> Self {
        Self {
            catalog,
            items: RwLock::new(Vec::new()),
        }
    }

    pub fn add(&self, id: ProductId) -> Result<(), PersistenceError> {
        let mut items = self.items.write().map_err(|_| poisoned())?;
        if !items.contains(&id) {
            items.push(id);
        }
        Ok(())
    }

    pub fn remove(&self, id: ProductId) -> Result<bool, PersistenceError> {
        let mut items = self.items.write().map_err(|_| poisoned())?;
        let before = items.len();
        items.retain(|item| *item != id);
        Ok(items.len() != before)
    }

    pub fn clear(&self) -> Result<(), PersistenceError> {
        self.items.write().map_err(|_| poisoned())?.clear();
        Ok(())
    }

    pub fn item_ids(&self) -> Vec<ProductId> {
        self.items.read().map(|items| items.clone()).unwrap_or_default()
    }
}

impl<P: ProductCatalog> CartStore for InMemoryCartStore<P> {
    fn get_cart_items(&self) -> Result<Vec<ProductSnapshot>, PersistenceError> {
        let ids = self.items.read().map_err(|_| poisoned())?.clone();
        let products = self.catalog.get_all_products()?;

        let mut resolved = Vec::with_capacity(ids.len());
        for id in ids {
            match products.iter().find(|p| *p.id() == id) {
                Some(product) => resolved.push(product.clone()),
                None => warn!(product_id = %id, "cart references product missing from catalog"),
            }
        }
        Ok(resolved)
    }
}

fn poisoned() -> PersistenceError {
    PersistenceError::storage("cart lock poisoned")
}
