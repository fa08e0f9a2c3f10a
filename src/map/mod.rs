//! Ordered map based on a mutable red-black tree.
//!
//! This module provides [`RbTreeMap`], an ordered map whose nodes live in an
//! index arena, together with its entry API and iterators.
//!
//! # Overview
//!
//! - O(log N) get
//! - O(log N) insert
//! - O(log N) remove
//! - O(log N) first/last
//! - O(log N + k) range queries where k is the number of results
//! - O(1) len and `is_empty`
//!
//! # Examples
//!
//! ```rust
//! use redblack::RbTreeMap;
//!
//! let mut map = RbTreeMap::new();
//! map.insert(3, "three");
//! map.insert(1, "one");
//! map.insert(2, "two");
//!
//! // Entries are always in sorted order
//! let keys: Vec<&i32> = map.keys().collect();
//! assert_eq!(keys, vec![&1, &2, &3]);
//!
//! // Range queries
//! let range: Vec<(&i32, &&str)> = map.range(1..3).collect();
//! assert_eq!(range, vec![(&1, &"one"), (&2, &"two")]);
//! ```

mod drain;
mod entry;
mod iter;

pub use drain::DrainFilter;
pub use entry::{Entry, OccupiedEntry, VacantEntry};
pub use iter::{
    IntoIter, IntoKeys, IntoValues, Iter, IterMut, Keys, Range, RangeMut, Values, ValuesMut,
};

pub(crate) use drain::DrainCursor;

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Index, IndexMut, RangeBounds};

use crate::error::{InvariantViolation, OccupiedError};
use crate::tree::{RawTree, Search};

// =============================================================================
// RbTreeMap Definition
// =============================================================================

/// An ordered map based on a red-black tree.
///
/// Keys are kept in ascending order according to their [`Ord`]
/// implementation. Mutations happen in place; nodes are stored in an arena
/// and linked by index, so the map contains no `unsafe` code.
///
/// # Time Complexity
///
/// | Operation      | Complexity    |
/// |----------------|---------------|
/// | `new`          | O(1)          |
/// | `get`          | O(log N)      |
/// | `insert`       | O(log N)      |
/// | `remove`       | O(log N)      |
/// | `entry`        | O(log N)      |
/// | `range`        | O(log N + k)  |
/// | `iter`         | O(N) total    |
/// | `len`          | O(1)          |
///
/// # Examples
///
/// ```rust
/// use redblack::RbTreeMap;
///
/// let mut scores = RbTreeMap::new();
/// scores.insert("bob", 7);
/// scores.insert("alice", 9);
/// *scores.entry("bob").or_insert(0) += 1;
///
/// assert_eq!(scores.get("bob"), Some(&8));
/// assert_eq!(scores.first_key_value(), Some((&"alice", &9)));
/// ```
#[derive(Clone)]
pub struct RbTreeMap<K, V> {
    tree: RawTree<K, V>,
}

static_assertions::assert_impl_all!(RbTreeMap<i32, String>: Send, Sync);
static_assertions::assert_not_impl_any!(RbTreeMap<std::rc::Rc<i32>, i32>: Send, Sync);

impl<K, V> RbTreeMap<K, V> {
    /// Creates a new empty map.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use redblack::RbTreeMap;
    ///
    /// let map: RbTreeMap<i32, String> = RbTreeMap::new();
    /// assert!(map.is_empty());
    /// ```
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            tree: RawTree::new(),
        }
    }

    /// Creates an empty map with room for `capacity` entries before the
    /// node arena reallocates.
    #[inline]
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            tree: RawTree::with_capacity(capacity),
        }
    }

    /// Returns the number of entries in the map.
    ///
    /// # Complexity
    ///
    /// O(1)
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    /// Returns `true` if the map contains no entries.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Removes every entry.
    pub fn clear(&mut self) {
        self.tree.clear();
    }

    // =========================================================================
    // First and Last
    // =========================================================================

    /// Returns the entry with the smallest key.
    ///
    /// # Complexity
    ///
    /// O(log N)
    ///
    /// # Examples
    ///
    /// ```rust
    /// use redblack::RbTreeMap;
    ///
    /// let map = RbTreeMap::from([(2, 'b'), (1, 'a')]);
    /// assert_eq!(map.first_key_value(), Some((&1, &'a')));
    /// ```
    #[must_use]
    pub fn first_key_value(&self) -> Option<(&K, &V)> {
        self.tree.first().map(|node| self.tree.key_value(node))
    }

    /// Returns the entry with the largest key.
    ///
    /// # Complexity
    ///
    /// O(log N)
    #[must_use]
    pub fn last_key_value(&self) -> Option<(&K, &V)> {
        self.tree.last().map(|node| self.tree.key_value(node))
    }

    /// Returns an occupied entry for the smallest key, for in-place
    /// manipulation.
    pub fn first_entry(&mut self) -> Option<OccupiedEntry<'_, K, V>> {
        let node = self.tree.first()?;
        Some(OccupiedEntry::new(node, &mut self.tree))
    }

    /// Returns an occupied entry for the largest key.
    pub fn last_entry(&mut self) -> Option<OccupiedEntry<'_, K, V>> {
        let node = self.tree.last()?;
        Some(OccupiedEntry::new(node, &mut self.tree))
    }

    /// Removes and returns the entry with the smallest key.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use redblack::RbTreeMap;
    ///
    /// let mut map = RbTreeMap::from([(1, "a"), (2, "b")]);
    /// assert_eq!(map.pop_first(), Some((1, "a")));
    /// assert_eq!(map.pop_first(), Some((2, "b")));
    /// assert_eq!(map.pop_first(), None);
    /// ```
    pub fn pop_first(&mut self) -> Option<(K, V)> {
        self.first_entry().map(OccupiedEntry::remove_entry)
    }

    /// Removes and returns the entry with the largest key.
    pub fn pop_last(&mut self) -> Option<(K, V)> {
        self.last_entry().map(OccupiedEntry::remove_entry)
    }

    // =========================================================================
    // Iteration
    // =========================================================================

    /// Returns an iterator over the entries in ascending key order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use redblack::RbTreeMap;
    ///
    /// let map = RbTreeMap::from([(3, "c"), (1, "a"), (2, "b")]);
    /// let entries: Vec<(&i32, &&str)> = map.iter().collect();
    /// assert_eq!(entries, vec![(&1, &"a"), (&2, &"b"), (&3, &"c")]);
    ///
    /// let reversed: Vec<&i32> = map.iter().rev().map(|(key, _)| key).collect();
    /// assert_eq!(reversed, vec![&3, &2, &1]);
    /// ```
    #[must_use]
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(&self.tree)
    }

    /// Returns an iterator over the entries with mutable access to the
    /// values.
    ///
    /// # Complexity
    ///
    /// O(C) to build, where C is the node arena's capacity (at least N and
    /// at most the largest length the map has reached since it was last
    /// cleared); each step is then O(1).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use redblack::RbTreeMap;
    ///
    /// let mut map = RbTreeMap::from([(1, 10), (2, 20)]);
    /// for (_, value) in map.iter_mut() {
    ///     *value += 1;
    /// }
    /// assert_eq!(map[&2], 21);
    /// ```
    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        let order = self.tree.in_order();
        IterMut::new(self.tree.entries_mut(&order))
    }

    /// Returns an iterator over the keys in ascending order.
    #[must_use]
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys::new(self.iter())
    }

    /// Returns an iterator over the values in key order.
    #[must_use]
    pub fn values(&self) -> Values<'_, K, V> {
        Values::new(self.iter())
    }

    /// Returns an iterator over mutable references to the values in key
    /// order.
    pub fn values_mut(&mut self) -> ValuesMut<'_, K, V> {
        ValuesMut::new(self.iter_mut())
    }

    /// Consumes the map and yields its keys in ascending order.
    #[must_use]
    pub fn into_keys(self) -> IntoKeys<K, V> {
        IntoKeys::new(self.into_iter())
    }

    /// Consumes the map and yields its values in key order.
    #[must_use]
    pub fn into_values(self) -> IntoValues<K, V> {
        IntoValues::new(self.into_iter())
    }

    // =========================================================================
    // Drain Filter
    // =========================================================================

    /// Creates an iterator that removes and yields every entry for which
    /// `predicate` returns `true`, in ascending key order.
    ///
    /// The predicate may modify the values of entries it keeps. If the
    /// iterator is dropped before it is exhausted, the remaining entries are
    /// still filtered.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use redblack::RbTreeMap;
    ///
    /// let mut map: RbTreeMap<i32, i32> = (0..8).map(|key| (key, key * 10)).collect();
    /// let evens: Vec<(i32, i32)> = map.drain_filter(|key, _| key % 2 == 0).collect();
    ///
    /// assert_eq!(evens, vec![(0, 0), (2, 20), (4, 40), (6, 60)]);
    /// assert_eq!(map.keys().copied().collect::<Vec<_>>(), vec![1, 3, 5, 7]);
    /// ```
    pub fn drain_filter<F>(&mut self, predicate: F) -> DrainFilter<'_, K, V, F>
    where
        F: FnMut(&K, &mut V) -> bool,
    {
        DrainFilter::new(self.drain_cursor(), predicate)
    }

    /// Keeps only the entries for which `predicate` returns `true`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use redblack::RbTreeMap;
    ///
    /// let mut map: RbTreeMap<i32, i32> = (0..8).map(|key| (key, key)).collect();
    /// map.retain(|&key, value| {
    ///     *value *= 2;
    ///     key > 4
    /// });
    /// assert_eq!(map.into_iter().collect::<Vec<_>>(), vec![(5, 10), (6, 12), (7, 14)]);
    /// ```
    pub fn retain<F>(&mut self, mut predicate: F)
    where
        F: FnMut(&K, &mut V) -> bool,
    {
        self.drain_filter(|key, value| !predicate(key, value)).for_each(drop);
    }

    pub(crate) fn drain_cursor(&mut self) -> DrainCursor<'_, K, V> {
        DrainCursor::new(&mut self.tree)
    }
}

impl<K: Ord, V> RbTreeMap<K, V> {
    // =========================================================================
    // Lookup
    // =========================================================================

    /// Returns a reference to the value for `key`.
    ///
    /// The key may be any borrowed form of the map's key type, but the
    /// ordering on the borrowed form must match the ordering on the key type.
    ///
    /// # Complexity
    ///
    /// O(log N)
    ///
    /// # Examples
    ///
    /// ```rust
    /// use redblack::RbTreeMap;
    ///
    /// let mut map = RbTreeMap::new();
    /// map.insert("hello".to_string(), 42);
    ///
    /// // Can use &str to look up String keys
    /// assert_eq!(map.get("hello"), Some(&42));
    /// assert_eq!(map.get("world"), None);
    /// ```
    #[must_use]
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.get_key_value(key).map(|(_, value)| value)
    }

    /// Returns the stored key and its value.
    #[must_use]
    pub fn get_key_value<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.tree.find(key).map(|node| self.tree.key_value(node))
    }

    /// Returns a mutable reference to the value for `key`.
    ///
    /// # Complexity
    ///
    /// O(log N)
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let node = self.tree.find(key)?;
        Some(self.tree.value_mut(node))
    }

    /// Returns `true` if the map contains a value for `key`.
    #[must_use]
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.tree.find(key).is_some()
    }

    // =========================================================================
    // Insertion and Removal
    // =========================================================================

    /// Inserts a key-value pair into the map.
    ///
    /// If the key was already present its value is replaced and the old value
    /// returned; the stored key is left untouched.
    ///
    /// # Complexity
    ///
    /// O(log N)
    ///
    /// # Examples
    ///
    /// ```rust
    /// use redblack::RbTreeMap;
    ///
    /// let mut map = RbTreeMap::new();
    /// assert_eq!(map.insert(37, "a"), None);
    /// assert_eq!(map.insert(37, "b"), Some("a"));
    /// assert_eq!(map[&37], "b");
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        match self.entry(key) {
            Entry::Occupied(mut entry) => Some(entry.insert(value)),
            Entry::Vacant(entry) => {
                entry.insert(value);
                None
            }
        }
    }

    /// Inserts a key-value pair only if the key is absent.
    ///
    /// # Errors
    ///
    /// Returns an [`OccupiedError`] holding the existing entry and the
    /// rejected value when the key is already present; the map is unchanged.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use redblack::RbTreeMap;
    ///
    /// let mut map = RbTreeMap::new();
    /// assert_eq!(*map.try_insert(1, "a").unwrap(), "a");
    /// assert!(map.try_insert(1, "b").is_err());
    /// assert_eq!(map[&1], "a");
    /// ```
    pub fn try_insert(&mut self, key: K, value: V) -> Result<&mut V, OccupiedError<'_, K, V>> {
        match self.entry(key) {
            Entry::Occupied(entry) => Err(OccupiedError { entry, value }),
            Entry::Vacant(entry) => Ok(entry.insert(value)),
        }
    }

    /// Removes `key` and returns its value.
    ///
    /// # Complexity
    ///
    /// O(log N)
    ///
    /// # Examples
    ///
    /// ```rust
    /// use redblack::RbTreeMap;
    ///
    /// let mut map = RbTreeMap::from([(1, "a")]);
    /// assert_eq!(map.remove(&1), Some("a"));
    /// assert_eq!(map.remove(&1), None);
    /// ```
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.remove_entry(key).map(|(_, value)| value)
    }

    /// Removes `key` and returns the stored key with its value.
    pub fn remove_entry<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let node = self.tree.find(key)?;
        Some(self.tree.remove_node(node))
    }

    /// Gets the entry for `key` for in-place manipulation.
    ///
    /// The descent happens once; the returned handle inserts or updates
    /// without searching again.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use redblack::RbTreeMap;
    ///
    /// let mut counts: RbTreeMap<char, usize> = RbTreeMap::new();
    /// for character in "abracadabra".chars() {
    ///     *counts.entry(character).or_insert(0) += 1;
    /// }
    /// assert_eq!(counts[&'a'], 5);
    /// assert_eq!(counts[&'r'], 2);
    /// ```
    pub fn entry(&mut self, key: K) -> Entry<'_, K, V> {
        match self.tree.search(&key) {
            Search::Found(node) => Entry::Occupied(OccupiedEntry::new(node, &mut self.tree)),
            Search::Vacant(attach) => Entry::Vacant(VacantEntry::new(key, attach, &mut self.tree)),
        }
    }

    /// Moves every entry of `other` into `self`, leaving `other` empty.
    ///
    /// Values from `other` replace the values of equal keys in `self`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use redblack::RbTreeMap;
    ///
    /// let mut left = RbTreeMap::from([(1, "a"), (2, "b")]);
    /// let mut right = RbTreeMap::from([(2, "B"), (3, "C")]);
    /// left.append(&mut right);
    ///
    /// assert!(right.is_empty());
    /// assert_eq!(left.into_iter().collect::<Vec<_>>(), vec![(1, "a"), (2, "B"), (3, "C")]);
    /// ```
    pub fn append(&mut self, other: &mut Self) {
        if self.is_empty() {
            std::mem::swap(self, other);
            return;
        }
        self.extend(std::mem::take(other));
    }

    // =========================================================================
    // Range Queries
    // =========================================================================

    /// Returns an iterator over the entries whose keys fall inside `range`.
    ///
    /// Each bound may be inclusive, exclusive or unbounded. A range whose
    /// start lies after its end yields nothing.
    ///
    /// # Complexity
    ///
    /// O(log N) to build, O(k) to consume where k is the number of results.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use redblack::RbTreeMap;
    /// use std::ops::Bound;
    ///
    /// let map: RbTreeMap<i32, char> = (1..=9).zip('a'..).collect();
    ///
    /// let keys: Vec<&i32> = map.range(3..6).map(|(key, _)| key).collect();
    /// assert_eq!(keys, vec![&3, &4, &5]);
    ///
    /// let keys: Vec<&i32> = map
    ///     .range((Bound::Excluded(7), Bound::Unbounded))
    ///     .map(|(key, _)| key)
    ///     .collect();
    /// assert_eq!(keys, vec![&8, &9]);
    ///
    /// #[allow(clippy::reversed_empty_ranges)]
    /// let inverted = map.range(6..3);
    /// assert_eq!(inverted.count(), 0);
    /// ```
    #[must_use]
    pub fn range<Q, R>(&self, range: R) -> Range<'_, K, V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
        R: RangeBounds<Q>,
    {
        Range::new(&self.tree, self.tree.range_ends::<Q, R>(&range))
    }

    /// Returns an iterator over the entries inside `range` with mutable
    /// access to the values.
    ///
    /// # Complexity
    ///
    /// O(log N + C) to build, where C is the node arena's capacity, like
    /// [`iter_mut`](Self::iter_mut); each step is then O(1).
    pub fn range_mut<Q, R>(&mut self, range: R) -> RangeMut<'_, K, V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
        R: RangeBounds<Q>,
    {
        let ends = self.tree.range_ends::<Q, R>(&range);
        let order: Vec<_> = Range::node_ids(&self.tree, ends).collect();
        RangeMut::new(self.tree.entries_mut(&order))
    }

    // =========================================================================
    // Diagnostics
    // =========================================================================

    /// Checks every red-black invariant and the key order.
    ///
    /// # Errors
    ///
    /// Returns the first [`InvariantViolation`] found. A map built through
    /// this API with a consistent [`Ord`] implementation always validates.
    ///
    /// # Complexity
    ///
    /// O(N)
    pub fn validate(&self) -> Result<(), InvariantViolation> {
        self.tree.validate()
    }
}

impl<K: Ord> RbTreeMap<K, ()> {
    /// Stores `key`, handing back the equal key it displaced.
    pub(crate) fn replace_key(&mut self, key: K) -> Option<K> {
        match self.tree.search(&key) {
            Search::Found(node) => Some(self.tree.replace_key(node, key)),
            Search::Vacant(attach) => {
                self.tree.insert_at(attach, key, ());
                None
            }
        }
    }
}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<K, V> Default for RbTreeMap<K, V> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for RbTreeMap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

impl<K: Ord, V, const N: usize> From<[(K, V); N]> for RbTreeMap<K, V> {
    fn from(entries: [(K, V); N]) -> Self {
        let mut map = Self::with_capacity(N);
        map.extend(entries);
        map
    }
}

impl<K: Ord, V> Extend<(K, V)> for RbTreeMap<K, V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<'a, K: Ord + Copy, V: Copy> Extend<(&'a K, &'a V)> for RbTreeMap<K, V> {
    fn extend<I: IntoIterator<Item = (&'a K, &'a V)>>(&mut self, iter: I) {
        self.extend(iter.into_iter().map(|(&key, &value)| (key, value)));
    }
}

impl<K, V> IntoIterator for RbTreeMap<K, V> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    fn into_iter(self) -> Self::IntoIter {
        let order = self.tree.in_order();
        IntoIter::new(self.tree, order)
    }
}

impl<'a, K, V> IntoIterator for &'a RbTreeMap<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, K, V> IntoIterator for &'a mut RbTreeMap<K, V> {
    type Item = (&'a K, &'a mut V);
    type IntoIter = IterMut<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<K, Q, V> Index<&Q> for RbTreeMap<K, V>
where
    K: Borrow<Q> + Ord,
    Q: Ord + ?Sized,
{
    type Output = V;

    /// # Panics
    ///
    /// Panics if the key is not present in the map.
    fn index(&self, key: &Q) -> &V {
        self.get(key).unwrap_or_else(|| panic!("no entry found for key"))
    }
}

impl<K, Q, V> IndexMut<&Q> for RbTreeMap<K, V>
where
    K: Borrow<Q> + Ord,
    Q: Ord + ?Sized,
{
    /// # Panics
    ///
    /// Panics if the key is not present in the map.
    fn index_mut(&mut self, key: &Q) -> &mut V {
        self.get_mut(key).unwrap_or_else(|| panic!("no entry found for key"))
    }
}

impl<K: PartialEq, V: PartialEq> PartialEq for RbTreeMap<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<K: Eq, V: Eq> Eq for RbTreeMap<K, V> {}

impl<K: PartialOrd, V: PartialOrd> PartialOrd for RbTreeMap<K, V> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.iter().partial_cmp(other.iter())
    }
}

impl<K: Ord, V: Ord> Ord for RbTreeMap<K, V> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.iter().cmp(other.iter())
    }
}

/// Hashes the length first, then each entry in key order, so equal maps
/// hash equally regardless of insertion order.
impl<K: Hash, V: Hash> Hash for RbTreeMap<K, V> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.len().hash(state);
        for (key, value) in self {
            key.hash(state);
            value.hash(state);
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for RbTreeMap<K, V> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_map().entries(self.iter()).finish()
    }
}

impl<K: fmt::Display, V: fmt::Display> fmt::Display for RbTreeMap<K, V> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{{")?;
        let mut first = true;
        for (key, value) in self {
            if first {
                first = false;
            } else {
                write!(formatter, ", ")?;
            }
            write!(formatter, "{key}: {value}")?;
        }
        write!(formatter, "}}")
    }
}

// =============================================================================
// Serde Support
// =============================================================================

#[cfg(feature = "serde")]
impl<K, V> serde::Serialize for RbTreeMap<K, V>
where
    K: serde::Serialize,
    V: serde::Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (key, value) in self {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

#[cfg(feature = "serde")]
struct RbTreeMapVisitor<K, V> {
    marker: std::marker::PhantomData<fn() -> RbTreeMap<K, V>>,
}

#[cfg(feature = "serde")]
impl<K, V> RbTreeMapVisitor<K, V> {
    const fn new() -> Self {
        Self {
            marker: std::marker::PhantomData,
        }
    }
}

#[cfg(feature = "serde")]
impl<'de, K, V> serde::de::Visitor<'de> for RbTreeMapVisitor<K, V>
where
    K: serde::Deserialize<'de> + Ord,
    V: serde::Deserialize<'de>,
{
    type Value = RbTreeMap<K, V>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a map")
    }

    fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: serde::de::MapAccess<'de>,
    {
        let mut map = RbTreeMap::new();
        while let Some((key, value)) = access.next_entry()? {
            map.insert(key, value);
        }
        Ok(map)
    }
}

#[cfg(feature = "serde")]
impl<'de, K, V> serde::Deserialize<'de> for RbTreeMap<K, V>
where
    K: serde::Deserialize<'de> + Ord,
    V: serde::Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_map(RbTreeMapVisitor::new())
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    // =========================================================================
    // Display Tests
    // =========================================================================

    #[rstest]
    fn test_display_empty_map() {
        let map: RbTreeMap<i32, String> = RbTreeMap::new();
        assert_eq!(format!("{map}"), "{}");
    }

    #[rstest]
    fn test_display_multiple_entries_sorted() {
        let map = RbTreeMap::from([
            (3, "three".to_string()),
            (1, "one".to_string()),
            (2, "two".to_string()),
        ]);
        assert_eq!(format!("{map}"), "{1: one, 2: two, 3: three}");
    }

    #[rstest]
    fn test_debug_uses_map_notation() {
        let map = RbTreeMap::from([(2, 'b'), (1, 'a')]);
        assert_eq!(format!("{map:?}"), "{1: 'a', 2: 'b'}");
    }

    // =========================================================================
    // Structural Tests
    // =========================================================================

    #[rstest]
    fn test_insert_keeps_stored_key() {
        let mut map: RbTreeMap<String, i32> = RbTreeMap::new();
        let original = "key".to_string();
        let pointer = original.as_ptr();
        map.insert(original, 1);
        map.insert("key".to_string(), 2);
        let Some((stored, value)) = map.get_key_value("key") else {
            panic!("key is present")
        };
        assert_eq!(stored.as_ptr(), pointer);
        assert_eq!(*value, 2);
    }

    #[rstest]
    fn test_append_into_empty_swaps() {
        let mut left: RbTreeMap<i32, i32> = RbTreeMap::new();
        let mut right = RbTreeMap::from([(1, 1), (2, 2)]);
        left.append(&mut right);
        assert_eq!(left.len(), 2);
        assert!(right.is_empty());
        assert!(left.validate().is_ok());
    }

    #[rstest]
    fn test_replace_key_reports_displaced_key() {
        let mut map: RbTreeMap<i32, ()> = RbTreeMap::new();
        assert_eq!(map.replace_key(4), None);
        assert_eq!(map.replace_key(4), Some(4));
        assert_eq!(map.len(), 1);
    }

    #[rstest]
    fn test_many_removals_keep_tree_valid() {
        let mut map: RbTreeMap<u32, u32> = (0..256).map(|key| (key * 7 % 256, key)).collect();
        for key in (0..256).filter(|key| key % 3 != 0) {
            assert!(map.remove(&key).is_some());
            assert_eq!(map.validate(), Ok(()));
        }
        assert_eq!(map.len(), 86);
    }

    #[rstest]
    fn test_mutable_iteration_over_sparse_arena() {
        let mut map: RbTreeMap<u32, u32> = (0..200).map(|key| (key, key)).collect();
        map.retain(|key, _| key % 50 == 0 || (100..105).contains(key));
        for (_, value) in map.range_mut(100..103) {
            *value += 1000;
        }
        for value in map.values_mut().rev().take(1) {
            *value = 0;
        }
        let entries: Vec<(u32, u32)> = map.iter().map(|(key, value)| (*key, *value)).collect();
        assert_eq!(
            entries,
            vec![
                (0, 0),
                (50, 50),
                (100, 1100),
                (101, 1101),
                (102, 1102),
                (103, 103),
                (104, 104),
                (150, 0)
            ]
        );
        assert_eq!(map.validate(), Ok(()));
    }
}
