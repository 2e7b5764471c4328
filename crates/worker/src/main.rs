use std::sync::Arc;

use anyhow::Context;

use shelfwise_core::SystemClock;
use shelfwise_discounts::DiscountApplicator;
use shelfwise_infra::{
    DiscountRunner, InMemoryCartStore, InMemoryProductCatalog, InMemoryRunLedger, SeedData, WorkerConfig,
};

fn main() -> anyhow::Result<()> {
    shelfwise_observability::init();

    let config = WorkerConfig::from_env().context("invalid worker configuration")?;

    let catalog = InMemoryProductCatalog::arc();
    let cart = InMemoryCartStore::new(catalog.clone());

    match &config.seed_file {
        Some(path) => {
            let seed = SeedData::load(path).with_context(|| format!("failed to load seed file {}", path.display()))?;
            seed.install(&catalog, &cart).context("failed to install seed data")?;
            tracing::info!(products = seed.products.len(), cart_items = seed.cart.len(), "seed data loaded");
        }
        None => tracing::warn!("SHELFWISE_SEED_FILE not set; starting with an empty catalog"),
    }

    let mut applicator = DiscountApplicator::new(catalog, cart, Arc::new(SystemClock));
    if config.idempotent {
        applicator = applicator.with_run_ledger(Arc::new(InMemoryRunLedger::new()));
    }

    let handle = DiscountRunner::new(applicator)
        .spawn(config)
        .context("failed to spawn discount runner")?;

    handle.wait();
    Ok(())
}
