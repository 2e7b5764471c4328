//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value**. To "modify" one,
/// build a new one (e.g. `PriceCents::discounted` returns a fresh price rather
/// than mutating in place).
///
/// ```ignore
/// #[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// struct PriceCents(u64);
///
/// impl ValueObject for PriceCents {}
///
/// assert_eq!(PriceCents(1000), PriceCents(1000));
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
