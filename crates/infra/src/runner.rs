//! Periodic discount runner.
//!
//! Wakes up every `poll_interval` and invokes the applicator for each configured
//! source. The applicator's gate decides whether anything actually happens, so
//! the poll interval only needs to be shorter than the gate window.

use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Instant;

use tracing::{debug, error, info, warn};

use shelfwise_discounts::{
    CartStore, DiscountApplicator, DiscountError, DiscountOutcome, DiscountSource, ProductCatalog,
};

use crate::config::WorkerConfig;

/// Runner statistics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunnerStats {
    pub ticks: u64,
    pub runs_applied: u64,
    pub gate_closed: u64,
    pub already_applied: u64,
    pub products_updated: u64,
    pub write_failures: u64,
    pub errors: u64,
    pub uptime_secs: u64,
}

impl RunnerStats {
    fn record(&mut self, result: &Result<DiscountOutcome, DiscountError>) {
        match result {
            Ok(DiscountOutcome::GateClosed) => self.gate_closed += 1,
            Ok(DiscountOutcome::AlreadyApplied) => self.already_applied += 1,
            Ok(DiscountOutcome::Applied(report)) => {
                self.runs_applied += 1;
                self.products_updated += report.updated.len() as u64;
                self.write_failures += report.failed.len() as u64;
            }
            Err(_) => self.errors += 1,
        }
    }
}

/// Handle to control a running runner.
#[derive(Debug)]
pub struct DiscountRunnerHandle {
    shutdown: mpsc::Sender<()>,
    join: Option<thread::JoinHandle<()>>,
    stats: Arc<Mutex<RunnerStats>>,
}

impl DiscountRunnerHandle {
    /// Request shutdown and wait for the current tick to finish.
    pub fn shutdown(mut self) {
        let _ = self.shutdown.send(());
        if let Some(j) = self.join.take() {
            let _ = j.join();
        }
    }

    /// Block until the runner thread exits.
    pub fn wait(mut self) {
        if let Some(j) = self.join.take() {
            let _ = j.join();
        }
    }

    pub fn stats(&self) -> RunnerStats {
        self.stats.lock().map(|s| s.clone()).unwrap_or_default()
    }
}

/// Drives a [`DiscountApplicator`] on a fixed interval.
pub struct DiscountRunner<P, S> {
    applicator: DiscountApplicator<P, S>,
}

impl<P, S> DiscountRunner<P, S>
where
    P: ProductCatalog + 'static,
    S: CartStore + 'static,
{
    pub fn new(applicator: DiscountApplicator<P, S>) -> Self {
        Self { applicator }
    }

    /// Run every configured source once, in order.
    pub fn run_once(&self, config: &WorkerConfig) -> Vec<(DiscountSource, Result<DiscountOutcome, DiscountError>)> {
        config
            .sources
            .iter()
            .map(|&source| {
                let result = self
                    .applicator
                    .apply_to(source, config.days_ahead, config.discount_percent);
                match &result {
                    Ok(DiscountOutcome::Applied(report)) if !report.is_complete() => {
                        warn!(runner = %config.name, source = %source, failed = report.failed.len(), "discount run left products unpriced");
                    }
                    Ok(outcome) => {
                        debug!(runner = %config.name, source = %source, outcome = %outcome_kind(outcome), "tick");
                    }
                    Err(e) => {
                        error!(runner = %config.name, source = %source, error = %e, "discount run failed");
                    }
                }
                (source, result)
            })
            .collect()
    }

    /// Spawn the runner in a background thread.
    pub fn spawn(self, config: WorkerConfig) -> std::io::Result<DiscountRunnerHandle> {
        let (shutdown_tx, shutdown_rx) = mpsc::channel::<()>();
        let stats = Arc::new(Mutex::new(RunnerStats::default()));
        let stats_clone = stats.clone();

        let join = thread::Builder::new()
            .name(config.name.clone())
            .spawn(move || runner_loop(self, config, shutdown_rx, stats_clone))?;

        Ok(DiscountRunnerHandle {
            shutdown: shutdown_tx,
            join: Some(join),
            stats,
        })
    }
}

fn outcome_kind(outcome: &DiscountOutcome) -> &'static str {
    match outcome {
        DiscountOutcome::GateClosed => "gate_closed",
        DiscountOutcome::AlreadyApplied => "already_applied",
        DiscountOutcome::Applied(_) => "applied",
    }
}

fn runner_loop<P, S>(
    runner: DiscountRunner<P, S>,
    config: WorkerConfig,
    shutdown_rx: mpsc::Receiver<()>,
    stats: Arc<Mutex<RunnerStats>>,
) where
    P: ProductCatalog + 'static,
    S: CartStore + 'static,
{
    info!(
        runner = %config.name,
        poll_interval_ms = config.poll_interval.as_millis() as u64,
        days_ahead = config.days_ahead,
        percent = config.discount_percent,
        "discount runner started"
    );
    let start_time = Instant::now();

    loop {
        let results = runner.run_once(&config);

        if let Ok(mut s) = stats.lock() {
            s.ticks += 1;
            s.uptime_secs = start_time.elapsed().as_secs();
            for (_, result) in &results {
                s.record(result);
            }
        }

        match shutdown_rx.recv_timeout(config.poll_interval) {
            Err(RecvTimeoutError::Timeout) => continue,
            Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
        }
    }

    info!(runner = %config.name, "discount runner stopped");
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use chrono::{NaiveDate, NaiveDateTime};

    use shelfwise_core::{FixedClock, ProductId};
    use shelfwise_products::{PriceCents, ProductSnapshot};

    use super::*;
    use crate::cart::InMemoryCartStore;
    use crate::catalog::InMemoryProductCatalog;

    fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, 10)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    fn setup(
        now: NaiveDateTime,
    ) -> (
        Arc<InMemoryProductCatalog>,
        DiscountRunner<Arc<InMemoryProductCatalog>, InMemoryCartStore<Arc<InMemoryProductCatalog>>>,
        ProductId,
    ) {
        let product = ProductSnapshot::new(
            ProductId::new(),
            "CHEESE",
            "Cheddar",
            PriceCents::new(1000),
            NaiveDate::from_ymd_opt(2024, 6, 11).unwrap(),
        );
        let id = product.id_typed();
        let catalog = Arc::new(InMemoryProductCatalog::with_products([product]));
        let cart = InMemoryCartStore::new(catalog.clone());
        let applicator = DiscountApplicator::new(catalog.clone(), cart, Arc::new(FixedClock::new(now)));
        (catalog, DiscountRunner::new(applicator), id)
    }

    #[test]
    fn run_once_visits_sources_in_order() {
        let (_, runner, _) = setup(at(8, 0, 0));
        let config = WorkerConfig::default().with_sources(vec![DiscountSource::Cart, DiscountSource::Catalog]);

        let results = runner.run_once(&config);

        let sources: Vec<DiscountSource> = results.iter().map(|(s, _)| *s).collect();
        assert_eq!(sources, vec![DiscountSource::Cart, DiscountSource::Catalog]);
        assert!(results.iter().all(|(_, r)| matches!(r, Ok(DiscountOutcome::GateClosed))));
    }

    #[test]
    fn run_once_inside_window_discounts_catalog() {
        let (catalog, runner, id) = setup(at(0, 0, 20));
        let config = WorkerConfig::default()
            .with_discount(3, 20)
            .with_sources(vec![DiscountSource::Catalog]);

        runner.run_once(&config);

        assert_eq!(catalog.get(id).unwrap().price(), PriceCents::new(800));
    }

    #[test]
    fn spawned_runner_ticks_until_shutdown() {
        let (catalog, runner, id) = setup(at(12, 0, 0));
        let config = WorkerConfig::default()
            .with_name("test-runner")
            .with_poll_interval(Duration::from_millis(10));

        let handle = runner.spawn(config).unwrap();
        std::thread::sleep(Duration::from_millis(60));
        let stats = handle.stats();
        handle.shutdown();

        assert!(stats.ticks >= 1);
        assert_eq!(stats.runs_applied, 0);
        assert_eq!(stats.gate_closed, stats.ticks * 2);
        assert_eq!(catalog.get(id).unwrap().price(), PriceCents::new(1000));
    }

    #[test]
    fn stats_count_outcomes() {
        let (_, runner, _) = setup(at(0, 0, 10));
        let config = WorkerConfig::default().with_discount(3, 10);
        let mut stats = RunnerStats::default();

        for (_, result) in runner.run_once(&config) {
            stats.record(&result);
        }

        // Catalog and cart both applied; only the catalog had the product.
        assert_eq!(stats.runs_applied, 2);
        assert_eq!(stats.products_updated, 1);
        assert_eq!(stats.write_failures, 0);
    }
}
