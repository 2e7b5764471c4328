use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use shelfwise_core::{Entity, ProductId};

use crate::expiry::LookaheadDays;
use crate::price::{DiscountPercent, PriceCents};

/// Immutable read view of a catalog product at a point in time.
///
/// Snapshots are never mutated in place: price changes produce a new snapshot
/// with the same id, which is then handed back to the catalog for persistence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductSnapshot {
    id: ProductId,
    sku: String,
    name: String,
    price: PriceCents,
    expiry_date: NaiveDate,
}

impl ProductSnapshot {
    pub fn new(
        id: ProductId,
        sku: impl Into<String>,
        name: impl Into<String>,
        price: PriceCents,
        expiry_date: NaiveDate,
    ) -> Self {
        Self {
            id,
            sku: sku.into(),
            name: name.into(),
            price,
            expiry_date,
        }
    }

    pub fn id_typed(&self) -> ProductId {
        self.id
    }

    pub fn sku(&self) -> &str {
        &self.sku
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> PriceCents {
        self.price
    }

    pub fn expiry_date(&self) -> NaiveDate {
        self.expiry_date
    }

    /// Copy of this snapshot with a replaced price.
    pub fn with_price(&self, price: PriceCents) -> Self {
        Self {
            price,
            ..self.clone()
        }
    }

    /// Copy of this snapshot with `percent` taken off the price.
    pub fn discounted(&self, percent: DiscountPercent) -> Self {
        self.with_price(self.price.discounted(percent))
    }

    /// Expires strictly before `today + days`.
    pub fn is_near_expiry(&self, days: LookaheadDays, today: NaiveDate) -> bool {
        match days.horizon(today) {
            Some(horizon) => self.expiry_date < horizon,
            None => true,
        }
    }

    /// Expires strictly before `today`.
    pub fn is_expired(&self, today: NaiveDate) -> bool {
        self.expiry_date < today
    }
}

impl Entity for ProductSnapshot {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
