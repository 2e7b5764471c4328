//! Products module: the product snapshot and the pricing/expiry rules applied to it.
//!
//! Pure deterministic logic (no IO, no storage). "Today" is always passed in by
//! the caller so these rules never read the wall clock themselves.

pub mod expiry;
pub mod price;
pub mod product;

pub use expiry::LookaheadDays;
pub use price::{DiscountPercent, PriceCents};
pub use product::ProductSnapshot;
