//! Infrastructure layer: in-memory stores, configuration, seed loading and the
//! periodic discount runner.

pub mod cart;
pub mod catalog;
pub mod config;
pub mod ledger;
pub mod runner;
pub mod seed;


pub use cart::InMemoryCartStore;
pub use catalog::InMemoryProductCatalog;
pub use config::{ConfigError, WorkerConfig};
pub use ledger::InMemoryRunLedger;
pub use runner::{DiscountRunner, DiscountRunnerHandle, RunnerStats};
pub use seed::{SeedData, SeedError};
