use core::fmt;
use core::iter::FusedIterator;

use crate::Ptr;
use crate::ordered_map::OrderedMap;

/// An iterator over the entries of an `OrderedMap`, in insertion order.
///
/// This struct is created by the [`iter`] method on [`OrderedMap`]. See its
/// documentation for more.
///
/// The iterator walks the order list with its own cursor and resolves each
/// visited key's value through the map's index when it is reached.
///
/// [`iter`]: OrderedMap::iter
///
/// # Examples
///
/// ```
/// use ordered_map::OrderedMap;
///
/// let mut map = OrderedMap::new();
/// map.insert("a", 1);
/// map.insert("b", 2);
///
/// for (key, value) in map.iter() {
///     println!("{}: {}", key, value);
/// }
/// ```
pub struct Iter<'a, K, V, S> {
    pub(crate) map: &'a OrderedMap<K, V, S>,
    pub(crate) forward: Option<Ptr>,
    pub(crate) reverse: Option<Ptr>,
    pub(crate) remaining: usize,
}

impl<K, V, S> Clone for Iter<'_, K, V, S> {
    fn clone(&self) -> Self {
        Iter {
            map: self.map,
            forward: self.forward,
            reverse: self.reverse,
            remaining: self.remaining,
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug, S> fmt::Debug for Iter<'_, K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<'a, K, V, S> Iterator for Iter<'a, K, V, S> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let ptr = self.forward?;
        self.forward = self.map.order.next(ptr);
        self.remaining -= 1;

        Some(self.map.pair_at(ptr))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V, S> DoubleEndedIterator for Iter<'_, K, V, S> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let ptr = self.reverse?;
        self.reverse = self.map.order.prev(ptr);
        self.remaining -= 1;

        Some(self.map.pair_at(ptr))
    }
}

impl<K, V, S> ExactSizeIterator for Iter<'_, K, V, S> {}

impl<K, V, S> FusedIterator for Iter<'_, K, V, S> {}

/// An iterator over the keys of an `OrderedMap`, in insertion order.
///
/// This struct is created by the [`keys`] method on [`OrderedMap`].
///
/// [`keys`]: OrderedMap::keys
pub struct Keys<'a, K, V, S> {
    pub(crate) iter: Iter<'a, K, V, S>,
}

impl<'a, K, V, S> Iterator for Keys<'a, K, V, S> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.iter.next().map(|(k, _)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

impl<K, V, S> DoubleEndedIterator for Keys<'_, K, V, S> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.iter.next_back().map(|(k, _)| k)
    }
}

impl<K, V, S> ExactSizeIterator for Keys<'_, K, V, S> {}

impl<K, V, S> FusedIterator for Keys<'_, K, V, S> {}

/// An iterator over the values of an `OrderedMap`, in insertion order of
/// their keys.
///
/// This struct is created by the [`values`] method on [`OrderedMap`].
///
/// [`values`]: OrderedMap::values
///
/// # Examples
///
/// ```
/// use ordered_map::OrderedMap;
///
/// let mut map = OrderedMap::new();
/// map.insert("b", 2);
/// map.insert("a", 1);
///
/// let total: i32 = map.values().sum();
/// assert_eq!(total, 3);
/// assert_eq!(map.values().collect::<Vec<_>>(), [&2, &1]);
/// ```
pub struct Values<'a, K, V, S> {
    pub(crate) iter: Iter<'a, K, V, S>,
}

impl<'a, K, V, S> Iterator for Values<'a, K, V, S> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.iter.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

impl<K, V, S> DoubleEndedIterator for Values<'_, K, V, S> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.iter.next_back().map(|(_, v)| v)
    }
}

impl<K, V, S> ExactSizeIterator for Values<'_, K, V, S> {}

impl<K, V, S> FusedIterator for Values<'_, K, V, S> {}

/// An owning iterator over the entries of an `OrderedMap`, in insertion
/// order.
///
/// This struct is created by the [`into_iter`] method on [`OrderedMap`]
/// (provided by the [`IntoIterator`] trait). Entries are detached from the
/// front or back of the order as they are yielded.
///
/// [`into_iter`]: IntoIterator::into_iter
/// [`IntoIterator`]: core::iter::IntoIterator
///
/// # Examples
///
/// ```
/// use ordered_map::OrderedMap;
///
/// let mut map = OrderedMap::new();
/// map.insert("a", 1);
/// map.insert("b", 2);
///
/// let entries: Vec<_> = map.into_iter().collect();
/// assert_eq!(entries, [("a", 1), ("b", 2)]);
/// ```
pub struct IntoIter<K, V, S> {
    pub(crate) map: OrderedMap<K, V, S>,
}

impl<K: fmt::Debug, V: fmt::Debug, S> fmt::Debug for IntoIter<K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.map.iter()).finish()
    }
}

impl<K, V, S> Iterator for IntoIter<K, V, S> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        self.map.remove_head()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.map.len(), Some(self.map.len()))
    }
}

impl<K, V, S> DoubleEndedIterator for IntoIter<K, V, S> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.map.remove_tail()
    }
}

impl<K, V, S> ExactSizeIterator for IntoIter<K, V, S> {}

impl<K, V, S> FusedIterator for IntoIter<K, V, S> {}
