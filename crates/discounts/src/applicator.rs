//! Near-expiry discount runs over the catalog or the cart.

use std::sync::Arc;

use tracing::{debug, error, info, warn};

use shelfwise_core::{Clock, Entity};
use shelfwise_products::ProductSnapshot;

use crate::error::DiscountError;
use crate::filter;
use crate::gate::TimeWindowGate;
use crate::params::DiscountParams;
use crate::ports::{CartStore, DiscountRunLedger, DiscountSource, ProductCatalog};
use crate::report::{DiscountOutcome, DiscountReport, FailedUpdate};

/// Applies a percentage discount to products nearing expiry.
///
/// One algorithm, two sources: [`apply_to_catalog`](Self::apply_to_catalog)
/// reads every catalog product, [`apply_to_cart`](Self::apply_to_cart) reads the
/// cart. Both write back through the catalog, one product at a time, in the
/// order the source returned them. Nothing is retained between calls.
pub struct DiscountApplicator<P, S> {
    catalog: P,
    cart: S,
    clock: Arc<dyn Clock>,
    gate: TimeWindowGate,
    ledger: Option<Arc<dyn DiscountRunLedger>>,
}

impl<P, S> DiscountApplicator<P, S>
where
    P: ProductCatalog,
    S: CartStore,
{
    pub fn new(catalog: P, cart: S, clock: Arc<dyn Clock>) -> Self {
        Self {
            catalog,
            cart,
            clock,
            gate: TimeWindowGate::midnight(),
            ledger: None,
        }
    }

    pub fn with_gate(mut self, gate: TimeWindowGate) -> Self {
        self.gate = gate;
        self
    }

    /// Skip a source once it has been discounted on the current local date.
    pub fn with_run_ledger(mut self, ledger: Arc<dyn DiscountRunLedger>) -> Self {
        self.ledger = Some(ledger);
        self
    }

    pub fn gate(&self) -> &TimeWindowGate {
        &self.gate
    }

    /// Discount near-expiry catalog products.
    pub fn apply_to_catalog(&self, days: i64, discount_percent: i64) -> Result<DiscountOutcome, DiscountError> {
        self.apply(DiscountSource::Catalog, days, discount_percent)
    }

    /// Discount near-expiry products currently in the cart.
    pub fn apply_to_cart(&self, days: i64, discount_percent: i64) -> Result<DiscountOutcome, DiscountError> {
        self.apply(DiscountSource::Cart, days, discount_percent)
    }

    pub fn apply_to(
        &self,
        source: DiscountSource,
        days: i64,
        discount_percent: i64,
    ) -> Result<DiscountOutcome, DiscountError> {
        self.apply(source, days, discount_percent)
    }

    pub fn near_expiry_in_catalog(&self, days: i64) -> Result<Vec<ProductSnapshot>, DiscountError> {
        self.near_expiry(DiscountSource::Catalog, days)
    }

    pub fn near_expiry_in_cart(&self, days: i64) -> Result<Vec<ProductSnapshot>, DiscountError> {
        self.near_expiry(DiscountSource::Cart, days)
    }

    pub fn expired_in_catalog(&self) -> Result<Vec<ProductSnapshot>, DiscountError> {
        Ok(filter::expired(self.fetch(DiscountSource::Catalog)?, self.clock.as_ref()))
    }

    pub fn expired_in_cart(&self) -> Result<Vec<ProductSnapshot>, DiscountError> {
        Ok(filter::expired(self.fetch(DiscountSource::Cart)?, self.clock.as_ref()))
    }

    fn near_expiry(&self, source: DiscountSource, days: i64) -> Result<Vec<ProductSnapshot>, DiscountError> {
        let days = shelfwise_products::LookaheadDays::new(days)?;
        Ok(filter::near_expiry(self.fetch(source)?, days, self.clock.as_ref()))
    }

    fn fetch(&self, source: DiscountSource) -> Result<Vec<ProductSnapshot>, DiscountError> {
        let products = match source {
            DiscountSource::Catalog => self.catalog.get_all_products()?,
            DiscountSource::Cart => self.cart.get_cart_items()?,
        };
        Ok(products)
    }

    fn apply(&self, source: DiscountSource, days: i64, discount_percent: i64) -> Result<DiscountOutcome, DiscountError> {
        let params = DiscountParams::new(days, discount_percent)?;

        let now = self.clock.now();
        if !self.gate.is_open(now) {
            debug!(source = %source, now = %now, "discount gate closed");
            return Ok(DiscountOutcome::GateClosed);
        }

        let run_date = now.date();
        if let Some(ledger) = &self.ledger {
            if ledger.last_applied(source)? == Some(run_date) {
                info!(source = %source, date = %run_date, "discount already applied today");
                return Ok(DiscountOutcome::AlreadyApplied);
            }
        }

        let candidates = filter::near_expiry(self.fetch(source)?, params.days_ahead, self.clock.as_ref());
        let discounted: Vec<ProductSnapshot> = candidates
            .iter()
            .map(|product| product.discounted(params.percent))
            .collect();

        let report = self.write_back(source, params, discounted);

        if let Some(ledger) = &self.ledger {
            if report.counts_as_run() {
                if let Err(e) = ledger.mark_applied(source, run_date) {
                    warn!(source = %source, error = %e, "failed to record discount run");
                }
            } else {
                warn!(source = %source, failed = report.failed.len(), "no discount persisted, run left open for retry");
            }
        }

        info!(
            source = %source,
            days_ahead = params.days_ahead.days(),
            percent = params.percent.value(),
            candidates = report.candidates,
            updated = report.updated.len(),
            failed = report.failed.len(),
            "discount run finished"
        );

        Ok(DiscountOutcome::Applied(report))
    }

    /// Persist each snapshot independently; a failed write does not stop the rest.
    fn write_back(&self, source: DiscountSource, params: DiscountParams, discounted: Vec<ProductSnapshot>) -> DiscountReport {
        let mut report = DiscountReport {
            source,
            params,
            candidates: discounted.len(),
            updated: Vec::with_capacity(discounted.len()),
            failed: Vec::new(),
        };

        for snapshot in discounted {
            let product_id = *snapshot.id();
            let price = snapshot.price();
            match self.catalog.update_product(snapshot) {
                Ok(()) => {
                    debug!(source = %source, product_id = %product_id, price = price.cents(), "discounted price persisted");
                    report.updated.push(product_id);
                }
                Err(e) => {
                    error!(source = %source, product_id = %product_id, error = %e, "failed to persist discounted price");
                    report.failed.push(FailedUpdate { product_id, error: e });
                }
            }
        }

        report
    }
}
