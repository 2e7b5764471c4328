//! Benchmarks for a full discount run over the in-memory catalog.

use std::sync::Arc;

use chrono::{Duration, NaiveDate};
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};

use shelfwise_core::{FixedClock, ProductId};
use shelfwise_discounts::DiscountApplicator;
use shelfwise_infra::{InMemoryCartStore, InMemoryProductCatalog};
use shelfwise_products::{PriceCents, ProductSnapshot};

fn catalog_of(size: usize) -> Arc<InMemoryProductCatalog> {
    let today = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap_or_default();
    Arc::new(InMemoryProductCatalog::with_products((0..size).map(|i| {
        ProductSnapshot::new(
            ProductId::new(),
            format!("SKU-{i}"),
            "Bench product",
            PriceCents::new(1_000 + i as u64),
            today + Duration::days((i % 14) as i64),
        )
    })))
}

fn bench_apply_to_catalog(c: &mut Criterion) {
    let mut group = c.benchmark_group("apply_to_catalog");
    let midnight = NaiveDate::from_ymd_opt(2024, 6, 10)
        .and_then(|d| d.and_hms_opt(0, 0, 30))
        .unwrap_or_default();

    for size in [100usize, 1_000, 10_000] {
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            b.iter_batched(
                || {
                    let catalog = catalog_of(size);
                    let cart = InMemoryCartStore::new(catalog.clone());
                    DiscountApplicator::new(catalog, cart, Arc::new(FixedClock::new(midnight)))
                },
                |applicator| applicator.apply_to_catalog(7, 15),
                criterion::BatchSize::LargeInput,
            );
        });
    }

    group.finish();
}

criterion_group!(benches, bench_apply_to_catalog);
criterion_main!(benches);
