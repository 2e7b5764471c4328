//! Expiry filters over a product source.
//!
//! Each call reads "today" from the clock, so a filter run straddling midnight
//! sees the date at the moment it was invoked. Input order is preserved.

use shelfwise_core::Clock;
use shelfwise_products::{LookaheadDays, ProductSnapshot};

/// Products expiring strictly before `today + days`.
pub fn near_expiry<C>(products: Vec<ProductSnapshot>, days: LookaheadDays, clock: &C) -> Vec<ProductSnapshot>
where
    C: Clock + ?Sized,
{
    let today = clock.today();
    products
        .into_iter()
        .filter(|p| p.is_near_expiry(days, today))
        .collect()
}

/// Products whose expiry date is already in the past.
///
/// Not used by either discount operation; exposed as a query only.
pub fn expired<C>(products: Vec<ProductSnapshot>, clock: &C) -> Vec<ProductSnapshot>
where
    C: Clock + ?Sized,
{
    let today = clock.today();
    products.into_iter().filter(|p| p.is_expired(today)).collect()
}
