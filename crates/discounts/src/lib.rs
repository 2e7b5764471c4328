//! `shelfwise-discounts`
//!
//! **Responsibility:** decide when near-expiry discounts run, which products
//! qualify, and how discounted prices are written back.
//!
//! Storage, cart sessions and scheduling are collaborators reached through the
//! traits in [`ports`]; this crate performs no IO of its own.

pub mod applicator;
pub mod error;
pub mod filter;
pub mod gate;
pub mod params;
pub mod ports;
pub mod report;

pub use applicator::DiscountApplicator;
pub use error::{DiscountError, PersistenceError};
pub use gate::TimeWindowGate;
pub use params::DiscountParams;
pub use ports::{CartStore, DiscountRunLedger, DiscountSource, ProductCatalog};
pub use report::{DiscountOutcome, DiscountReport, FailedUpdate};
