#[cfg(not(feature = "std"))]
use alloc::collections::BTreeMap;
#[cfg(feature = "std")]
use std::collections::HashMap;

#[cfg(feature = "std")]
pub(crate) type KindMap<K, V> = HashMap<K, V>;
#[cfg(not(feature = "std"))]
pub(crate) type KindMap<K, V> = BTreeMap<K, V>;

/// A tag identifying which recycle bucket (and factory) a cell belongs to.
///
/// Blanket-implemented; with `std` kinds are hashed, without it they are ordered.
#[cfg(feature = "std")]
pub trait CellKind: Copy + core::fmt::Debug + core::hash::Hash + Eq {}
#[cfg(feature = "std")]
impl<K: Copy + core::fmt::Debug + core::hash::Hash + Eq> CellKind for K {}

#[cfg(not(feature = "std"))]
pub trait CellKind: Copy + core::fmt::Debug + Ord {}
#[cfg(not(feature = "std"))]
impl<K: Copy + core::fmt::Debug + Ord> CellKind for K {}

/// A materialized visual item.
///
/// The engine never renders cells. It only needs to know which bucket a cell is recycled
/// into and how long it is along the scroll axis after the populate callback has run.
pub trait Cell {
    type Kind: CellKind;

    fn kind(&self) -> Self::Kind;

    /// Measured size along the scroll axis.
    fn extent(&self) -> u32;
}
