//! In-memory product catalog for tests/dev.

use std::sync::{Arc, RwLock};

use shelfwise_core::{Entity, ProductId};
use shelfwise_discounts::{PersistenceError, ProductCatalog};
use shelfwise_products::ProductSnapshot;

/// Catalog keeping products in insertion order.
#[derive(Debug, Default)]
pub struct InMemoryProductCatalog {
    products: RwLock<Vec<ProductSnapshot>>,
}

impl InMemoryProductCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn arc() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Catalog holding `products`; a later entry replaces an earlier one with the same id.
    pub fn with_products(products: impl IntoIterator<Item = ProductSnapshot>) -> Self {
        let mut stored: Vec<ProductSnapshot> = Vec::new();
        for product in products {
            match stored.iter_mut().find(|p| p.id() == product.id()) {
                Some(slot) => *slot = product,
                None => stored.push(product),
            }
        }
        Self {
            products: RwLock::new(stored),
        }
    }

    /// Insert a product, or replace the one with the same id in place.
    pub fn upsert(&self, product: ProductSnapshot) -> Result<(), PersistenceError> {
        let mut products = self.products.write().map_err(|_| poisoned())?;
        match products.iter_mut().find(|p| p.id() == product.id()) {
            Some(slot) => *slot = product,
            None => products.push(product),
        }
        Ok(())
    }

    pub fn get(&self, id: ProductId) -> Option<ProductSnapshot> {
        let products = self.products.read().ok()?;
        products.iter().find(|p| p.id_typed() == id).cloned()
    }

    pub fn len(&self) -> usize {
        self.products.read().map(|p| p.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ProductCatalog for InMemoryProductCatalog {
    fn get_all_products(&self) -> Result<Vec<ProductSnapshot>, PersistenceError> {
        let products = self.products.read().map_err(|_| poisoned())?;
        Ok(products.clone())
    }

    fn update_product(&self, snapshot: ProductSnapshot) -> Result<(), PersistenceError> {
        let mut products = self.products.write().map_err(|_| poisoned())?;
        let slot = products
            .iter_mut()
            .find(|p| p.id() == snapshot.id())
            .ok_or(PersistenceError::NotFound(snapshot.id_typed()))?;
        *slot = snapshot;
        Ok(())
    }
}

fn poisoned() -> PersistenceError {
    PersistenceError::storage("catalog lock poisoned")
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use shelfwise_products::PriceCents;

    use super::*;

    fn product(sku: &str, price: u64) -> ProductSnapshot {
        ProductSnapshot::new(
            ProductId::new(),
            sku,
            sku,
            PriceCents::new(price),
            NaiveDate::from_ymd_opt(2024, 6, 12).unwrap(),
        )
    }

    #[test]
    fn lists_in_insertion_order() {
        let a = product("A", 100);
        let b = product("B", 200);
        let catalog = InMemoryProductCatalog::with_products([a.clone(), b.clone()]);

        assert_eq!(catalog.get_all_products().unwrap(), vec![a, b]);
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn update_replaces_in_place() {
        let a = product("A", 100);
        let b = product("B", 200);
        let catalog = InMemoryProductCatalog::with_products([a.clone(), b.clone()]);

        catalog.update_product(a.with_price(PriceCents::new(90))).unwrap();

        let all = catalog.get_all_products().unwrap();
        assert_eq!(all[0].price(), PriceCents::new(90));
        assert_eq!(all[1], b);
    }

    #[test]
    fn update_of_unknown_product_fails() {
        let catalog = InMemoryProductCatalog::new();
        let stray = product("X", 1);

        let err = catalog.update_product(stray.clone()).unwrap_err();
        assert_eq!(err, PersistenceError::NotFound(stray.id_typed()));
        assert!(catalog.is_empty());
    }

    #[test]
    fn with_products_keeps_last_duplicate_in_first_position() {
        let a = product("A", 100);
        let b = product("B", 200);
        let catalog = InMemoryProductCatalog::with_products([a.clone(), b.clone(), a.with_price(PriceCents::new(7))]);

        let all = catalog.get_all_products().unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].price(), PriceCents::new(7));
        assert_eq!(all[1], b);
    }

    #[test]
    fn upsert_does_not_duplicate() {
        let a = product("A", 100);
        let catalog = InMemoryProductCatalog::new();
        catalog.upsert(a.clone()).unwrap();
        catalog.upsert(a.with_price(PriceCents::new(5))).unwrap();

        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get(a.id_typed()).unwrap().price(), PriceCents::new(5));
    }
}
