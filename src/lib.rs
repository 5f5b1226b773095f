#![doc = include_str!("../README.md")]
#![cfg_attr(not(feature = "std"), no_std)]
#![deny(missing_docs)]

mod arena;
mod list;
pub mod ordered_map;

extern crate alloc;

#[cfg(feature = "std")]
type RandomState = std::hash::RandomState;
#[cfg(not(feature = "std"))]
type RandomState = hashbrown::DefaultHashBuilder;

/// A hash map that remembers the order in which keys were first inserted.
///
/// This is the main type alias using the default hasher. For custom hashers,
/// use [`ordered_map::OrderedMap`] directly.
///
/// # Examples
///
/// ```
/// use ordered_map::OrderedMap;
///
/// let mut map = OrderedMap::new();
/// map.insert("b", 1);
/// map.insert("a", 2);
///
/// // Insertion order, not key order
/// let entries: Vec<_> = map.iter().collect();
/// assert_eq!(entries, [(&"b", &1), (&"a", &2)]);
/// ```
pub type OrderedMap<K, V> = crate::ordered_map::OrderedMap<K, V, RandomState>;
use core::num::NonZeroU32;

pub use ordered_map::IntoIter;
pub use ordered_map::Iter;
pub use ordered_map::Keys;
pub use ordered_map::Values;

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
/// Handle of a node slot in the arena backing the insertion order list.
///
/// Non-generational: once a node is freed its handle may be handed out again
/// for a later insertion.
pub(crate) struct Ptr(NonZeroU32);

impl core::fmt::Debug for Ptr {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "Ptr({})", self.0.get() - 1)
    }
}

impl Ptr {
    /// Largest slot index a handle can address.
    pub(crate) const MAX_INDEX: usize = (u32::MAX - 1) as usize;

    pub(crate) fn unchecked_from(index: usize) -> Self {
        debug_assert!(
            index <= Self::MAX_INDEX,
            "Index too large to fit in Ptr: {index}"
        );
        match NonZeroU32::new((index as u32).saturating_add(1)) {
            Some(raw) => Ptr(raw),
            None => unreachable!("saturating_add(1) is never zero"),
        }
    }

    pub(crate) fn unchecked_get(self) -> usize {
        self.0.get() as usize - 1
    }
}
