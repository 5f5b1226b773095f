//! Insertion-ordered hash map implementation.
//!
//! This module provides the core [`OrderedMap`] type and its iterators. The
//! map pairs a hash index with a doubly linked list of keys so that lookups,
//! updates and removals stay O(1) while iteration follows the order in which
//! keys were first inserted.
//!
//! # Examples
//!
//! ```
//! use ordered_map::ordered_map::OrderedMap;
//!
//! let mut map = OrderedMap::new();
//! map.insert("first", 1);
//! map.insert("second", 2);
//! map.insert("first", 10);
//!
//! // Updating "first" did not move it
//! let entries: Vec<_> = map.iter().collect();
//! assert_eq!(entries, [(&"first", &10), (&"second", &2)]);
//! ```

use core::borrow::Borrow;
use core::fmt;
use core::hash::BuildHasher;
use core::hash::Hash;
use core::ops::Index;

use hashbrown::HashTable;
use hashbrown::hash_table;
use tracing::debug;

use crate::Ptr;
use crate::RandomState;
use crate::list::OrderList;

mod iter;

pub use iter::IntoIter;
pub use iter::Iter;
pub use iter::Keys;
pub use iter::Values;

#[cold]
#[inline(never)]
fn missing_entry() -> ! {
    panic!("Order list node has no matching index entry");
}

#[cold]
#[inline(never)]
fn missing_key() -> ! {
    panic!("Key not found in OrderedMap");
}

/// A key's stored value plus the handle of its node in the order list.
#[derive(Debug, Clone)]
pub(crate) struct IndexEntry<V> {
    pub(crate) value: V,
    pub(crate) position: Ptr,
}

/// A hash map that iterates in the order keys were first inserted.
///
/// Keys live in an arena-backed doubly linked list; the hash index stores
/// each value together with the handle of its key's node. Updating the value
/// of an existing key never changes its position. Removing a key unlinks its
/// node in O(1).
///
/// The generic parameters are:
/// - `K`: Key type, must implement `Hash + Eq` for lookups
/// - `V`: Value type, unconstrained
/// - `S`: Hash builder type, defaults to the standard hasher
///
/// The map is not internally synchronized. Share it across threads behind a
/// lock that covers every operation, iteration included.
///
/// # Examples
///
/// ```
/// use ordered_map::ordered_map::OrderedMap;
///
/// let mut map = OrderedMap::new();
/// map.insert("cherry", 8);
/// map.insert("apple", 5);
/// map.insert("banana", 3);
///
/// for (key, value) in map.iter() {
///     println!("{}: {}", key, value);
/// }
/// // Prints: cherry: 8, apple: 5, banana: 3
/// ```
#[derive(Clone)]
pub struct OrderedMap<K, V, S = RandomState> {
    table: HashTable<IndexEntry<V>>,
    order: OrderList<K>,
    hasher: S,
}

impl<K, V> OrderedMap<K, V> {
    /// Creates an empty map.
    ///
    /// The map does not allocate until the first key is inserted.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_map::OrderedMap;
    ///
    /// let mut map: OrderedMap<&str, i32> = OrderedMap::new();
    /// assert!(map.is_empty());
    /// map.insert("key", 42);
    /// assert!(!map.is_empty());
    /// ```
    pub fn new() -> Self {
        Self::with_hasher(RandomState::default())
    }

    /// Creates an empty map able to hold at least `capacity` entries without
    /// reallocating.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_map::OrderedMap;
    ///
    /// let map: OrderedMap<&str, i32> = OrderedMap::with_capacity(10);
    /// assert_eq!(map.len(), 0);
    /// ```
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_hasher(capacity, RandomState::default())
    }
}

impl<K, V, S: Default> Default for OrderedMap<K, V, S> {
    fn default() -> Self {
        Self::with_hasher(S::default())
    }
}

impl<K, V, S> OrderedMap<K, V, S> {
    /// Creates an empty map which will use `hasher` to hash keys.
    ///
    /// # Examples
    ///
    /// ```
    /// # use hashbrown::DefaultHashBuilder as RandomState;
    /// use ordered_map::ordered_map::OrderedMap;
    ///
    /// let mut map: OrderedMap<&str, i32, _> = OrderedMap::with_hasher(RandomState::default());
    /// map.insert("key", 42);
    /// assert_eq!(map.get("key"), Some(&42));
    /// ```
    pub fn with_hasher(hasher: S) -> Self {
        OrderedMap {
            table: HashTable::new(),
            order: OrderList::new(),
            hasher,
        }
    }

    /// Creates an empty map with room for `capacity` entries which will use
    /// `hasher` to hash keys.
    pub fn with_capacity_and_hasher(capacity: usize, hasher: S) -> Self {
        OrderedMap {
            table: HashTable::with_capacity(capacity),
            order: OrderList::with_capacity(capacity),
            hasher,
        }
    }

    /// Returns a reference to the map's hash builder.
    pub fn hasher(&self) -> &S {
        &self.hasher
    }

    /// Returns the number of entries in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_map::OrderedMap;
    ///
    /// let mut a = OrderedMap::new();
    /// assert_eq!(a.len(), 0);
    /// a.insert(1, "a");
    /// assert_eq!(a.len(), 1);
    /// ```
    pub fn len(&self) -> usize {
        debug_assert_eq!(self.table.len(), self.order.len());
        self.table.len()
    }

    /// Returns `true` if the map contains no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the number of entries the map can hold without reallocating
    /// its index.
    pub fn capacity(&self) -> usize {
        self.table.capacity()
    }

    /// Removes every entry, keeping the allocated memory for reuse.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_map::OrderedMap;
    ///
    /// let mut a = OrderedMap::new();
    /// a.insert(1, "a");
    /// a.clear();
    /// assert!(a.is_empty());
    /// ```
    pub fn clear(&mut self) {
        debug!(len = self.len(), "clearing map");
        self.table.clear();
        self.order.clear();
    }

    /// Reserves room for at least `additional` more entries.
    pub fn reserve(&mut self, additional: usize) {
        let order = &self.order;
        self.table
            .reserve(additional, |entry| order.node(entry.position).hash);
        self.order.reserve(additional);
    }

    /// Shrinks the index and the node storage as much as possible.
    ///
    /// Node slots freed by removals in the middle of the order stay allocated
    /// until they are reused by later insertions.
    pub fn shrink_to_fit(&mut self) {
        debug!(len = self.len(), "shrinking map");
        let order = &self.order;
        self.table
            .shrink_to_fit(|entry| order.node(entry.position).hash);
        self.order.shrink_to_fit();
    }

    /// Returns an iterator over the entries of the map, in insertion order.
    ///
    /// The iterator element type is `(&'a K, &'a V)`. Each value is looked up
    /// through the index at the moment its key is visited. Any number of
    /// iterators may walk the map at once; the map cannot be mutated while
    /// one is alive.
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
    /// let mut iter = map.iter();
    /// assert_eq!(iter.next(), Some((&"a", &1)));
    /// assert_eq!(iter.next(), Some((&"b", &2)));
    /// assert_eq!(iter.next(), None);
    /// ```
    pub fn iter(&self) -> Iter<'_, K, V, S> {
        Iter {
            map: self,
            forward: self.order.head(),
            reverse: self.order.tail(),
            remaining: self.len(),
        }
    }

    /// Returns an iterator over the keys of the map, in insertion order.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_map::OrderedMap;
    ///
    /// let map: OrderedMap<_, _> = [("z", 1), ("y", 2)].into_iter().collect();
    /// let keys: Vec<_> = map.keys().copied().collect();
    /// assert_eq!(keys, ["z", "y"]);
    /// ```
    pub fn keys(&self) -> Keys<'_, K, V, S> {
        Keys { iter: self.iter() }
    }

    /// Returns an iterator over the values of the map, in insertion order of
    /// their keys.
    pub fn values(&self) -> Values<'_, K, V, S> {
        Values { iter: self.iter() }
    }

    /// Returns the earliest inserted entry still present.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_map::OrderedMap;
    ///
    /// let mut map = OrderedMap::new();
    /// assert_eq!(map.head(), None);
    /// map.insert("a", 1);
    /// map.insert("b", 2);
    /// assert_eq!(map.head(), Some((&"a", &1)));
    /// assert_eq!(map.tail(), Some((&"b", &2)));
    /// ```
    pub fn head(&self) -> Option<(&K, &V)> {
        self.order.head().map(|ptr| self.pair_at(ptr))
    }

    /// Returns the most recently inserted entry still present.
    pub fn tail(&self) -> Option<(&K, &V)> {
        self.order.tail().map(|ptr| self.pair_at(ptr))
    }

    /// Removes and returns the earliest inserted entry.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_map::OrderedMap;
    ///
    /// let mut map = OrderedMap::new();
    /// map.insert("a", 1);
    /// map.insert("b", 2);
    /// assert_eq!(map.remove_head(), Some(("a", 1)));
    /// assert_eq!(map.remove_tail(), Some(("b", 2)));
    /// assert_eq!(map.remove_head(), None);
    /// ```
    pub fn remove_head(&mut self) -> Option<(K, V)> {
        let ptr = self.order.head()?;
        Some(self.remove_at(ptr))
    }

    /// Removes and returns the most recently inserted entry.
    pub fn remove_tail(&mut self) -> Option<(K, V)> {
        let ptr = self.order.tail()?;
        Some(self.remove_at(ptr))
    }

    /// Keeps only the entries for which `f` returns `true`, visiting them in
    /// insertion order. Surviving entries keep their relative order.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_map::OrderedMap;
    ///
    /// let mut map: OrderedMap<i32, i32> = (0..8).map(|i| (i, i * 10)).collect();
    /// map.retain(|&k, v| {
    ///     *v += 1;
    ///     k % 2 == 0
    /// });
    /// let entries: Vec<_> = map.into_iter().collect();
    /// assert_eq!(entries, [(0, 1), (2, 21), (4, 41), (6, 61)]);
    /// ```
    pub fn retain<F>(&mut self, mut f: F)
    where
        F: FnMut(&K, &mut V) -> bool,
    {
        let mut cursor = self.order.head();
        while let Some(ptr) = cursor {
            cursor = self.order.next(ptr);

            let node = self.order.node(ptr);
            let Ok(mut entry) = self.table.find_entry(node.hash, |e| e.position == ptr) else {
                missing_entry();
            };
            if !f(&node.key, &mut entry.get_mut().value) {
                entry.remove();
                self.order.unlink(ptr);
            }
        }
    }

    fn entry_at(&self, ptr: Ptr) -> &IndexEntry<V> {
        let hash = self.order.node(ptr).hash;
        match self.table.find(hash, |e| e.position == ptr) {
            Some(entry) => entry,
            None => missing_entry(),
        }
    }

    fn pair_at(&self, ptr: Ptr) -> (&K, &V) {
        (&self.order.node(ptr).key, &self.entry_at(ptr).value)
    }

    fn remove_at(&mut self, ptr: Ptr) -> (K, V) {
        let hash = self.order.node(ptr).hash;
        let Ok(entry) = self.table.find_entry(hash, |e| e.position == ptr) else {
            missing_entry();
        };
        let (IndexEntry { value, .. }, _) = entry.remove();
        let node = self.order.unlink(ptr);
        (node.key, value)
    }
}

impl<K: Hash + Eq, V, S: BuildHasher> OrderedMap<K, V, S> {
    fn find<Q>(&self, key: &Q) -> Option<&IndexEntry<V>>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let order = &self.order;
        self.table.find(self.hasher.hash_one(key), |e| {
            let stored: &Q = order.node(e.position).key.borrow();
            stored == key
        })
    }

    /// Returns a reference to the value stored for `key`.
    ///
    /// The key may be any borrowed form of the map's key type, but `Hash` and
    /// `Eq` on the borrowed form must match those for the key type. A missing
    /// key is reported as `None` and has no side effects.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_map::OrderedMap;
    ///
    /// let mut map = OrderedMap::new();
    /// map.insert(1, "a");
    /// assert_eq!(map.get(&1), Some(&"a"));
    /// assert_eq!(map.get(&2), None);
    /// ```
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.find(key).map(|entry| &entry.value)
    }

    /// Returns the stored key and value for `key`.
    pub fn get_key_value<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.find(key)
            .map(|entry| (&self.order.node(entry.position).key, &entry.value))
    }

    /// Returns a mutable reference to the value stored for `key`.
    ///
    /// Writing through the reference does not change the key's position.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_map::OrderedMap;
    ///
    /// let mut map = OrderedMap::new();
    /// map.insert(1, "a");
    /// if let Some(x) = map.get_mut(&1) {
    ///     *x = "b";
    /// }
    /// assert_eq!(map.get(&1), Some(&"b"));
    /// ```
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let order = &self.order;
        self.table
            .find_mut(self.hasher.hash_one(key), |e| {
                let stored: &Q = order.node(e.position).key.borrow();
                stored == key
            })
            .map(|entry| &mut entry.value)
    }

    /// Returns `true` if the map holds a value for `key`.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.find(key).is_some()
    }

    /// Inserts a key-value pair into the map.
    ///
    /// If the key is new it is appended after every existing key and `None`
    /// is returned. If the key is already present its value is replaced in
    /// place, its position is left untouched, and the old value is returned.
    /// The stored key is not replaced.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_map::OrderedMap;
    ///
    /// let mut map = OrderedMap::new();
    /// assert_eq!(map.insert(37, "a"), None);
    /// assert_eq!(map.insert(12, "b"), None);
    /// assert_eq!(map.insert(37, "c"), Some("a"));
    ///
    /// let keys: Vec<_> = map.keys().copied().collect();
    /// assert_eq!(keys, [37, 12]);
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        let hash = self.hasher.hash_one(&key);
        let order = &self.order;
        let entry = self.table.entry(
            hash,
            |e| order.node(e.position).key == key,
            |e| order.node(e.position).hash,
        );

        match entry {
            hash_table::Entry::Occupied(mut occupied) => {
                Some(core::mem::replace(&mut occupied.get_mut().value, value))
            }
            hash_table::Entry::Vacant(vacant) => {
                let position = self.order.push_tail(key, hash);
                vacant.insert(IndexEntry { value, position });
                None
            }
        }
    }

    /// Removes `key` from the map, returning its value if it was present.
    ///
    /// The entry's node is unlinked directly through the handle stored in
    /// the index; no list traversal takes place.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_map::OrderedMap;
    ///
    /// let mut map = OrderedMap::new();
    /// map.insert(1, "a");
    /// assert_eq!(map.remove(&1), Some("a"));
    /// assert_eq!(map.remove(&1), None);
    /// ```
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.remove_entry(key).map(|(_, value)| value)
    }

    /// Removes `key` from the map, returning the stored key and value if it
    /// was present.
    pub fn remove_entry<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let hash = self.hasher.hash_one(key);
        let order = &self.order;
        let entry = self
            .table
            .find_entry(hash, |e| {
                let stored: &Q = order.node(e.position).key.borrow();
                stored == key
            })
            .ok()?;

        let (IndexEntry { value, position }, _) = entry.remove();
        let node = self.order.unlink(position);
        Some((node.key, value))
    }
}

impl<K: fmt::Debug, V: fmt::Debug, S> fmt::Debug for OrderedMap<K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// Two maps are equal when they hold equal entries in the same order.
impl<K, V, S> PartialEq for OrderedMap<K, V, S>
where
    K: PartialEq,
    V: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<K: Eq, V: Eq, S> Eq for OrderedMap<K, V, S> {}

impl<K, V, S> FromIterator<(K, V)> for OrderedMap<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher + Default,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::default();
        map.extend(iter);
        map
    }
}

impl<K, V, S> Extend<(K, V)> for OrderedMap<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        self.reserve(iter.size_hint().0);
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<'a, K, V, S> Extend<(&'a K, &'a V)> for OrderedMap<K, V, S>
where
    K: Hash + Eq + Clone,
    V: Clone,
    S: BuildHasher,
{
    fn extend<I: IntoIterator<Item = (&'a K, &'a V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key.clone(), value.clone());
        }
    }
}

impl<K, Q, V, S> Index<&Q> for OrderedMap<K, V, S>
where
    K: Hash + Eq + Borrow<Q>,
    Q: Hash + Eq + ?Sized,
    S: BuildHasher,
{
    type Output = V;

    /// Returns the value stored for `key`.
    ///
    /// # Panics
    ///
    /// Panics if the key is not present.
    fn index(&self, key: &Q) -> &V {
        match self.get(key) {
            Some(value) => value,
            None => missing_key(),
        }
    }
}

impl<'a, K, V, S> IntoIterator for &'a OrderedMap<K, V, S> {
    type IntoIter = Iter<'a, K, V, S>;
    type Item = (&'a K, &'a V);

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, V, S> IntoIterator for OrderedMap<K, V, S> {
    type IntoIter = IntoIter<K, V, S>;
    type Item = (K, V);

    fn into_iter(self) -> Self::IntoIter {
        IntoIter { map: self }
    }
}

#[cfg(test)]
impl<K, V, S> OrderedMap<K, V, S> {
    /// Walks the list in both directions and checks it against the index.
    fn assert_invariants(&self) {
        let mut count = 0;
        let mut prev = None;
        let mut cursor = self.order.head();
        while let Some(ptr) = cursor {
            let node = self.order.node(ptr);
            assert_eq!(node.prev, prev, "prev link out of sync at {ptr:?}");
            assert_eq!(self.entry_at(ptr).position, ptr);
            prev = Some(ptr);
            cursor = node.next;
            count += 1;
        }
        assert_eq!(self.order.tail(), prev);
        assert_eq!(count, self.table.len());
        assert_eq!(count, self.order.len());

        for entry in self.table.iter() {
            assert!(self.order.contains(entry.position));
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::format;
    use alloc::string::String;
    use alloc::string::ToString;
    use alloc::vec;
    use alloc::vec::Vec;

    use super::*;

    fn keys_of<K: Clone, V, S>(map: &OrderedMap<K, V, S>) -> Vec<K> {
        map.keys().cloned().collect()
    }

    #[test]
    fn test_new_and_default() {
        let map: crate::OrderedMap<i32, Vec<i32>> = crate::OrderedMap::default();
        assert!(map.is_empty());
        assert_eq!(map.len(), 0);
        assert_eq!(map.head(), None);
        assert_eq!(map.tail(), None);
        map.assert_invariants();
    }

    #[test]
    fn test_insert_new_keys_appends() {
        let mut map = crate::OrderedMap::new();
        assert_eq!(map.insert(3, "c"), None);
        assert_eq!(map.insert(1, "a"), None);
        assert_eq!(map.insert(2, "b"), None);

        assert_eq!(map.len(), 3);
        assert_eq!(keys_of(&map), [3, 1, 2]);
        map.assert_invariants();
    }

    #[test]
    fn test_overwrite_keeps_position() {
        let mut map = crate::OrderedMap::new();
        map.insert("x", 1);
        map.insert("y", 2);
        map.insert("z", 3);

        assert_eq!(map.insert("x", 10), Some(1));
        assert_eq!(map.insert("y", 20), Some(2));
        assert_eq!(map.insert("x", 100), Some(10));

        assert_eq!(map.len(), 3);
        let entries: Vec<_> = map.iter().collect();
        assert_eq!(entries, [(&"x", &100), (&"y", &20), (&"z", &3)]);
        map.assert_invariants();
    }

    #[test]
    fn test_get_operations() {
        let mut map = crate::OrderedMap::new();
        map.insert("a".to_string(), 1);

        assert_eq!(map.get("a"), Some(&1));
        assert_eq!(map.get("b"), None);
        assert_eq!(map.get_key_value("a"), Some((&"a".to_string(), &1)));
        assert!(map.contains_key("a"));
        assert!(!map.contains_key("b"));

        *map.get_mut("a").unwrap() += 41;
        assert_eq!(map["a"], 42);
        assert_eq!(map.get_mut("b"), None);
    }

    #[test]
    fn test_remove_by_key() {
        let mut map = crate::OrderedMap::new();
        map.insert(1, vec![1]);
        map.insert(2, vec![2]);
        map.insert(3, vec![3]);

        assert_eq!(map.remove(&2), Some(vec![2]));
        assert_eq!(map.len(), 2);
        assert!(!map.contains_key(&2));
        assert_eq!(keys_of(&map), [1, 3]);
        map.assert_invariants();

        assert_eq!(map.remove(&2), None);
        assert_eq!(map.len(), 2);

        assert_eq!(map.remove_entry(&1), Some((1, vec![1])));
        assert_eq!(map.head(), map.tail());
        map.assert_invariants();

        assert_eq!(map.remove(&3), Some(vec![3]));
        assert!(map.is_empty());
        assert_eq!(map.head(), None);
        map.assert_invariants();
    }

    #[test]
    fn test_remove_missing_has_no_effect() {
        let mut map: crate::OrderedMap<&str, i32> = crate::OrderedMap::new();
        assert_eq!(map.remove("empty"), None);
        assert_eq!(map.get("empty"), None);

        map.insert("a", 1);
        assert_eq!(map.remove("missing"), None);
        assert_eq!(map.len(), 1);
        map.assert_invariants();
    }

    #[test]
    fn test_reinsert_after_remove_goes_to_tail() {
        let mut map = crate::OrderedMap::new();
        map.insert('a', 1);
        map.insert('b', 2);
        map.insert('c', 3);

        map.remove(&'a');
        map.insert('a', 4);

        assert_eq!(keys_of(&map), ['b', 'c', 'a']);
        assert_eq!(map.get(&'a'), Some(&4));
        map.assert_invariants();
    }

    #[test]
    fn test_remove_head_and_tail() {
        let mut map = crate::OrderedMap::new();
        for i in 1..=4 {
            map.insert(i, i * 10);
        }

        assert_eq!(map.remove_head(), Some((1, 10)));
        assert_eq!(map.remove_tail(), Some((4, 40)));
        assert_eq!(map.head(), Some((&2, &20)));
        assert_eq!(map.tail(), Some((&3, &30)));
        map.assert_invariants();

        assert_eq!(map.remove_tail(), Some((3, 30)));
        assert_eq!(map.remove_tail(), Some((2, 20)));
        assert_eq!(map.remove_tail(), None);
        assert_eq!(map.remove_head(), None);
        map.assert_invariants();
    }

    #[test]
    fn test_clear() {
        let mut map = crate::OrderedMap::new();
        map.insert(1, vec![1]);
        map.insert(2, vec![2]);

        map.clear();

        assert!(map.is_empty());
        assert_eq!(map.head(), None);
        assert_eq!(map.iter().count(), 0);
        map.assert_invariants();

        map.insert(3, vec![3]);
        assert_eq!(keys_of(&map), [3]);
        map.assert_invariants();
    }

    #[test]
    fn test_retain() {
        let mut map: crate::OrderedMap<i32, String> =
            (1..=6).map(|i| (i, format!("v{i}"))).collect();

        map.retain(|k, v| {
            v.push('!');
            k % 3 != 0
        });

        let entries: Vec<_> = map.iter().map(|(k, v)| (*k, v.as_str())).collect();
        assert_eq!(entries, [(1, "v1!"), (2, "v2!"), (4, "v4!"), (5, "v5!")]);
        map.assert_invariants();

        map.retain(|_, _| false);
        assert!(map.is_empty());
        map.assert_invariants();
    }

    #[test]
    fn test_iter_double_ended() {
        let mut map = crate::OrderedMap::new();
        for i in 1..=5 {
            map.insert(i, i);
        }

        let mut iter = map.iter();
        assert_eq!(iter.len(), 5);
        assert_eq!(iter.next(), Some((&1, &1)));
        assert_eq!(iter.next_back(), Some((&5, &5)));
        assert_eq!(iter.next(), Some((&2, &2)));
        assert_eq!(iter.next_back(), Some((&4, &4)));
        assert_eq!(iter.len(), 1);
        assert_eq!(iter.next(), Some((&3, &3)));
        assert_eq!(iter.next_back(), None);
        assert_eq!(iter.next(), None);

        let reversed: Vec<_> = map.keys().rev().copied().collect();
        assert_eq!(reversed, [5, 4, 3, 2, 1]);
    }

    #[test]
    fn test_independent_iterators() {
        let map: crate::OrderedMap<_, _> = [("a", 1), ("b", 2), ("c", 3)].into_iter().collect();

        let mut first = map.iter();
        let mut second = map.iter();
        assert_eq!(first.next(), Some((&"a", &1)));
        assert_eq!(first.next(), Some((&"b", &2)));
        assert_eq!(second.next(), Some((&"a", &1)));
        assert_eq!(first.next(), Some((&"c", &3)));
        assert_eq!(first.next(), None);
        assert_eq!(second.next(), Some((&"b", &2)));
    }

    #[test]
    fn test_empty_iteration() {
        let map: crate::OrderedMap<i32, Vec<i32>> = crate::OrderedMap::default();

        assert_eq!(map.iter().next(), None);
        assert_eq!(map.iter().rev().count(), 0);
        assert_eq!(map.values().count(), 0);

        let empty_map: crate::OrderedMap<i32, Vec<i32>> = crate::OrderedMap::default();
        assert_eq!(empty_map.into_iter().count(), 0);
    }

    #[test]
    fn test_into_iter() {
        let mut map = crate::OrderedMap::new();
        for i in 1..=4 {
            map.insert(i, i.to_string());
        }
        map.remove(&2);

        let mut iter = map.into_iter();
        assert_eq!(iter.len(), 3);
        assert_eq!(iter.next(), Some((1, "1".to_string())));
        assert_eq!(iter.next_back(), Some((4, "4".to_string())));
        assert_eq!(iter.next(), Some((3, "3".to_string())));
        assert_eq!(iter.next(), None);
    }

    #[test]
    fn test_slot_reuse_keeps_order() {
        let mut map = crate::OrderedMap::new();
        for i in 0..10 {
            map.insert(i, i);
        }
        for i in (0..10).step_by(2) {
            map.remove(&i);
        }
        for i in 10..15 {
            map.insert(i, i);
        }

        assert_eq!(keys_of(&map), [1, 3, 5, 7, 9, 10, 11, 12, 13, 14]);
        map.assert_invariants();
    }

    #[test]
    fn test_growth_rehash_keeps_index() {
        let mut map = crate::OrderedMap::new();
        for i in 0..1000 {
            map.insert(i, i * 2);
        }
        for i in 0..1000 {
            assert_eq!(map.get(&i), Some(&(i * 2)));
        }
        map.shrink_to_fit();
        for i in 0..1000 {
            assert_eq!(map.get(&i), Some(&(i * 2)));
        }
        map.assert_invariants();
    }

    #[test]
    fn test_clone_is_independent() {
        let mut map = crate::OrderedMap::new();
        map.insert("a", 1);
        map.insert("b", 2);

        let mut cloned = map.clone();
        cloned.insert("c", 3);
        cloned.remove("a");

        assert_eq!(keys_of(&map), ["a", "b"]);
        assert_eq!(keys_of(&cloned), ["b", "c"]);
        cloned.assert_invariants();
    }

    #[test]
    fn test_equality_is_order_sensitive() {
        let a: crate::OrderedMap<_, _> = [(1, 'a'), (2, 'b')].into_iter().collect();
        let b: crate::OrderedMap<_, _> = [(1, 'a'), (2, 'b')].into_iter().collect();
        let c: crate::OrderedMap<_, _> = [(2, 'b'), (1, 'a')].into_iter().collect();

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_extend_borrowed() {
        let source: crate::OrderedMap<_, _> = [(1, 'a'), (2, 'b')].into_iter().collect();
        let mut map = crate::OrderedMap::new();
        map.insert(2, 'z');
        map.extend(&source);

        let entries: Vec<_> = map.iter().map(|(k, v)| (*k, *v)).collect();
        assert_eq!(entries, [(2, 'b'), (1, 'a')]);
    }

    #[test]
    fn test_debug_format() {
        let mut map = crate::OrderedMap::new();
        map.insert("b", 2);
        map.insert("a", 1);
        assert_eq!(format!("{map:?}"), r#"{"b": 2, "a": 1}"#);
    }

    #[test]
    #[should_panic(expected = "Key not found in OrderedMap")]
    fn test_index_missing_key() {
        let map: crate::OrderedMap<i32, i32> = crate::OrderedMap::new();
        let _value: &i32 = &map[&1];
    }
}
