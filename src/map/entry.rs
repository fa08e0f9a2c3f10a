//! Entry API for [`RbTreeMap`](super::RbTreeMap).
//!
//! An entry is produced by one descent. It borrows the map mutably, so the
//! position it records cannot be invalidated before it is used.

use std::fmt;

use crate::tree::{AttachPoint, NodeId, RawTree};

// =============================================================================
// Entry
// =============================================================================

/// A view into a single key of a map, which is either vacant or occupied.
///
/// Created by [`RbTreeMap::entry`](super::RbTreeMap::entry).
pub enum Entry<'a, K, V> {
    /// The key is absent.
    Vacant(VacantEntry<'a, K, V>),
    /// The key is present.
    Occupied(OccupiedEntry<'a, K, V>),
}

impl<'a, K, V> Entry<'a, K, V> {
    /// Returns the key of this entry.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use redblack::RbTreeMap;
    ///
    /// let mut map: RbTreeMap<&str, i32> = RbTreeMap::new();
    /// assert_eq!(map.entry("poneyland").key(), &"poneyland");
    /// ```
    #[must_use]
    pub fn key(&self) -> &K {
        match self {
            Self::Vacant(entry) => entry.key(),
            Self::Occupied(entry) => entry.key(),
        }
    }

    /// Inserts `default` if the entry is vacant and returns a mutable
    /// reference to the value.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use redblack::RbTreeMap;
    ///
    /// let mut map: RbTreeMap<&str, u32> = RbTreeMap::new();
    /// *map.entry("poneyland").or_insert(10) *= 2;
    /// *map.entry("poneyland").or_insert(10) *= 2;
    /// assert_eq!(map["poneyland"], 40);
    /// ```
    pub fn or_insert(self, default: V) -> &'a mut V {
        match self {
            Self::Vacant(entry) => entry.insert(default),
            Self::Occupied(entry) => entry.into_mut(),
        }
    }

    /// Inserts the result of `default` if the entry is vacant.
    ///
    /// `default` is only called for vacant entries.
    pub fn or_insert_with<F: FnOnce() -> V>(self, default: F) -> &'a mut V {
        match self {
            Self::Vacant(entry) => entry.insert(default()),
            Self::Occupied(entry) => entry.into_mut(),
        }
    }

    /// Inserts the result of `default`, which receives the key, if the entry
    /// is vacant.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use redblack::RbTreeMap;
    ///
    /// let mut map: RbTreeMap<&str, usize> = RbTreeMap::new();
    /// map.entry("poneyland").or_insert_with_key(|key| key.len());
    /// assert_eq!(map["poneyland"], 9);
    /// ```
    pub fn or_insert_with_key<F: FnOnce(&K) -> V>(self, default: F) -> &'a mut V {
        match self {
            Self::Vacant(entry) => {
                let value = default(entry.key());
                entry.insert(value)
            }
            Self::Occupied(entry) => entry.into_mut(),
        }
    }

    /// Runs `function` on the value of an occupied entry, then hands the
    /// entry back for further chaining.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use redblack::RbTreeMap;
    ///
    /// let mut map: RbTreeMap<&str, u32> = RbTreeMap::new();
    /// map.entry("poneyland").and_modify(|value| *value += 1).or_insert(42);
    /// assert_eq!(map["poneyland"], 42);
    /// map.entry("poneyland").and_modify(|value| *value += 1).or_insert(42);
    /// assert_eq!(map["poneyland"], 43);
    /// ```
    #[must_use]
    pub fn and_modify<F: FnOnce(&mut V)>(self, function: F) -> Self {
        match self {
            Self::Occupied(mut entry) => {
                function(entry.get_mut());
                Self::Occupied(entry)
            }
            vacant @ Self::Vacant(_) => vacant,
        }
    }
}

impl<'a, K, V: Default> Entry<'a, K, V> {
    /// Inserts `V::default()` if the entry is vacant.
    pub fn or_default(self) -> &'a mut V {
        self.or_insert_with(V::default)
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for Entry<'_, K, V> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Vacant(entry) => formatter.debug_tuple("Entry").field(entry).finish(),
            Self::Occupied(entry) => formatter.debug_tuple("Entry").field(entry).finish(),
        }
    }
}

// =============================================================================
// VacantEntry
// =============================================================================

/// A view into a vacant key, holding the key and the position where its
/// node will be attached.
pub struct VacantEntry<'a, K, V> {
    key: K,
    attach: Option<AttachPoint>,
    tree: &'a mut RawTree<K, V>,
}

impl<'a, K, V> VacantEntry<'a, K, V> {
    pub(super) const fn new(
        key: K,
        attach: Option<AttachPoint>,
        tree: &'a mut RawTree<K, V>,
    ) -> Self {
        Self { key, attach, tree }
    }

    /// Returns the key that would be inserted.
    #[must_use]
    pub const fn key(&self) -> &K {
        &self.key
    }

    /// Takes the key back without inserting anything.
    #[must_use]
    pub fn into_key(self) -> K {
        self.key
    }

    /// Inserts `value` under the entry's key and returns a mutable reference
    /// to it.
    ///
    /// # Complexity
    ///
    /// O(log N) for rebalancing; no second descent.
    pub fn insert(self, value: V) -> &'a mut V {
        let Self { key, attach, tree } = self;
        let node = tree.insert_at(attach, key, value);
        tree.value_mut(node)
    }
}

impl<K: fmt::Debug, V> fmt::Debug for VacantEntry<'_, K, V> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_tuple("VacantEntry")
            .field(self.key())
            .finish()
    }
}

// =============================================================================
// OccupiedEntry
// =============================================================================

/// A view into an occupied key.
pub struct OccupiedEntry<'a, K, V> {
    node: NodeId,
    tree: &'a mut RawTree<K, V>,
}

impl<'a, K, V> OccupiedEntry<'a, K, V> {
    pub(super) const fn new(node: NodeId, tree: &'a mut RawTree<K, V>) -> Self {
        Self { node, tree }
    }

    /// Returns the stored key.
    #[must_use]
    pub fn key(&self) -> &K {
        self.tree.key(self.node)
    }

    /// Returns a reference to the value.
    #[must_use]
    pub fn get(&self) -> &V {
        self.tree.key_value(self.node).1
    }

    /// Returns a mutable reference to the value, bound to the entry.
    ///
    /// Use [`into_mut`](Self::into_mut) for a reference that outlives the
    /// entry.
    pub fn get_mut(&mut self) -> &mut V {
        self.tree.value_mut(self.node)
    }

    /// Converts the entry into a mutable reference to its value.
    #[must_use]
    pub fn into_mut(self) -> &'a mut V {
        let Self { node, tree } = self;
        tree.value_mut(node)
    }

    /// Replaces the value and returns the old one. The key is unchanged.
    pub fn insert(&mut self, value: V) -> V {
        std::mem::replace(self.get_mut(), value)
    }

    /// Removes the entry and returns its value.
    pub fn remove(self) -> V {
        self.remove_entry().1
    }

    /// Removes the entry and returns the stored key with its value.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use redblack::{Entry, RbTreeMap};
    ///
    /// let mut map = RbTreeMap::from([("poneyland", 12)]);
    /// if let Entry::Occupied(entry) = map.entry("poneyland") {
    ///     assert_eq!(entry.remove_entry(), ("poneyland", 12));
    /// }
    /// assert!(map.is_empty());
    /// ```
    pub fn remove_entry(self) -> (K, V) {
        self.tree.remove_node(self.node)
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for OccupiedEntry<'_, K, V> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("OccupiedEntry")
            .field("key", self.key())
            .field("value", self.get())
            .finish()
    }
}
