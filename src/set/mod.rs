//! Ordered set based on a mutable red-black tree.
//!
//! [`RbTreeSet`] is an [`RbTreeMap`] with unit values. On top of the map's
//! operations it offers lazy set algebra over two sets: [`union`],
//! [`intersection`], [`difference`] and [`symmetric_difference`] merge the
//! two ascending sequences in O(n + m).
//!
//! [`union`]: RbTreeSet::union
//! [`intersection`]: RbTreeSet::intersection
//! [`difference`]: RbTreeSet::difference
//! [`symmetric_difference`]: RbTreeSet::symmetric_difference
//!
//! # Examples
//!
//! ```rust
//! use redblack::RbTreeSet;
//!
//! let odd = RbTreeSet::from([1, 3, 5, 7]);
//! let middle = RbTreeSet::from([3, 4, 5]);
//!
//! let union: Vec<i32> = odd.union(&middle).copied().collect();
//! assert_eq!(union, vec![1, 3, 4, 5, 7]);
//!
//! let intersection: Vec<i32> = odd.intersection(&middle).copied().collect();
//! assert_eq!(intersection, vec![3, 5]);
//!
//! let difference: Vec<i32> = odd.difference(&middle).copied().collect();
//! assert_eq!(difference, vec![1, 7]);
//! ```

mod iter;
mod merge;

pub use iter::{DrainFilter, IntoIter, Iter, Range};
pub use merge::{Difference, Intersection, SymmetricDifference, Union};

use std::borrow::Borrow;
use std::fmt;
use std::ops::{BitAnd, BitOr, BitXor, RangeBounds, Sub};

use crate::error::InvariantViolation;
use crate::map::RbTreeMap;

// =============================================================================
// RbTreeSet Definition
// =============================================================================

/// An ordered set based on a red-black tree.
///
/// # Time Complexity
///
/// | Operation        | Complexity    |
/// |------------------|---------------|
/// | `contains`       | O(log N)      |
/// | `insert`         | O(log N)      |
/// | `remove`         | O(log N)      |
/// | `range`          | O(log N + k)  |
/// | `union` etc.     | O(N + M)      |
///
/// # Examples
///
/// ```rust
/// use redblack::RbTreeSet;
///
/// let mut set = RbTreeSet::new();
/// assert!(set.insert(2));
/// assert!(set.insert(1));
/// assert!(!set.insert(2));
///
/// assert!(set.contains(&1));
/// assert_eq!(set.iter().copied().collect::<Vec<_>>(), vec![1, 2]);
/// ```
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RbTreeSet<T> {
    map: RbTreeMap<T, ()>,
}

static_assertions::assert_impl_all!(RbTreeSet<String>: Send, Sync);
static_assertions::assert_not_impl_any!(RbTreeSet<std::rc::Rc<i32>>: Send, Sync);

impl<T> RbTreeSet<T> {
    /// Creates a new empty set.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            map: RbTreeMap::new(),
        }
    }

    /// Creates an empty set with room for `capacity` elements before the
    /// node arena reallocates.
    #[inline]
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            map: RbTreeMap::with_capacity(capacity),
        }
    }

    /// Returns the number of elements.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns `true` if the set has no elements.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Removes every element.
    pub fn clear(&mut self) {
        self.map.clear();
    }

    /// Returns the smallest element.
    #[must_use]
    pub fn first(&self) -> Option<&T> {
        self.map.first_key_value().map(|(value, ())| value)
    }

    /// Returns the largest element.
    #[must_use]
    pub fn last(&self) -> Option<&T> {
        self.map.last_key_value().map(|(value, ())| value)
    }

    /// Removes and returns the smallest element.
    pub fn pop_first(&mut self) -> Option<T> {
        self.map.pop_first().map(|(value, ())| value)
    }

    /// Removes and returns the largest element.
    pub fn pop_last(&mut self) -> Option<T> {
        self.map.pop_last().map(|(value, ())| value)
    }

    /// Returns an iterator over the elements in ascending order.
    #[must_use]
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self.map.keys())
    }

    /// Keeps only the elements for which `predicate` returns `true`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use redblack::RbTreeSet;
    ///
    /// let mut set: RbTreeSet<i32> = (1..=6).collect();
    /// set.retain(|value| value % 3 == 0);
    /// assert_eq!(set.into_iter().collect::<Vec<_>>(), vec![3, 6]);
    /// ```
    pub fn retain<F>(&mut self, mut predicate: F)
    where
        F: FnMut(&T) -> bool,
    {
        self.map.retain(|value, _| predicate(value));
    }

    /// Creates an iterator that removes and yields every element for which
    /// `predicate` returns `true`, in ascending order.
    ///
    /// Dropping the iterator early still removes the remaining matches.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use redblack::RbTreeSet;
    ///
    /// let mut set: RbTreeSet<i32> = (0..8).collect();
    /// let evens: Vec<i32> = set.drain_filter(|value| value % 2 == 0).collect();
    /// assert_eq!(evens, vec![0, 2, 4, 6]);
    /// assert_eq!(set.into_iter().collect::<Vec<_>>(), vec![1, 3, 5, 7]);
    /// ```
    pub fn drain_filter<F>(&mut self, predicate: F) -> DrainFilter<'_, T, F>
    where
        F: FnMut(&T) -> bool,
    {
        DrainFilter::new(self.map.drain_cursor(), predicate)
    }
}

impl<T: Ord> RbTreeSet<T> {
    /// Returns `true` if the set contains `value`.
    ///
    /// # Complexity
    ///
    /// O(log N)
    #[must_use]
    pub fn contains<Q>(&self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.map.contains_key(value)
    }

    /// Returns the stored element equal to `value`.
    #[must_use]
    pub fn get<Q>(&self, value: &Q) -> Option<&T>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.map.get_key_value(value).map(|(stored, ())| stored)
    }

    /// Adds `value` to the set.
    ///
    /// Returns `false` if an equal element was already present; that element
    /// is kept and `value` is dropped.
    pub fn insert(&mut self, value: T) -> bool {
        self.map.insert(value, ()).is_none()
    }

    /// Adds `value`, replacing and returning an equal element if present.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use redblack::RbTreeSet;
    ///
    /// let mut set = RbTreeSet::new();
    /// assert_eq!(set.replace(Vec::<i32>::new()), None);
    /// assert_eq!(set.replace(Vec::new()), Some(Vec::new()));
    /// assert_eq!(set.len(), 1);
    /// ```
    pub fn replace(&mut self, value: T) -> Option<T> {
        self.map.replace_key(value)
    }

    /// Removes `value`, returning whether it was present.
    pub fn remove<Q>(&mut self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.map.remove(value).is_some()
    }

    /// Removes and returns the stored element equal to `value`.
    pub fn take<Q>(&mut self, value: &Q) -> Option<T>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.map.remove_entry(value).map(|(stored, ())| stored)
    }

    /// Moves every element of `other` into `self`, leaving `other` empty.
    pub fn append(&mut self, other: &mut Self) {
        self.map.append(&mut other.map);
    }

    /// Returns an iterator over the elements inside `range`.
    ///
    /// A range whose start lies after its end yields nothing.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use redblack::RbTreeSet;
    ///
    /// let set: RbTreeSet<i32> = (0..10).collect();
    /// assert_eq!(set.range(4..=6).copied().collect::<Vec<_>>(), vec![4, 5, 6]);
    /// assert_eq!(set.range(7..).rev().copied().collect::<Vec<_>>(), vec![9, 8, 7]);
    /// ```
    #[must_use]
    pub fn range<Q, R>(&self, range: R) -> Range<'_, T>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
        R: RangeBounds<Q>,
    {
        Range::new(self.map.range::<Q, R>(range))
    }

    // =========================================================================
    // Set Algebra
    // =========================================================================

    /// Elements in `self` or `other`, each once, ascending.
    #[must_use]
    pub fn union<'a>(&'a self, other: &'a Self) -> Union<'a, T> {
        Union::new(self.iter(), other.iter())
    }

    /// Elements in both `self` and `other`, ascending.
    #[must_use]
    pub fn intersection<'a>(&'a self, other: &'a Self) -> Intersection<'a, T> {
        Intersection::new(self.iter(), other.iter())
    }

    /// Elements in `self` but not in `other`, ascending.
    #[must_use]
    pub fn difference<'a>(&'a self, other: &'a Self) -> Difference<'a, T> {
        Difference::new(self.iter(), other.iter())
    }

    /// Elements in exactly one of `self` and `other`, ascending.
    #[must_use]
    pub fn symmetric_difference<'a>(&'a self, other: &'a Self) -> SymmetricDifference<'a, T> {
        SymmetricDifference::new(self.iter(), other.iter())
    }

    /// Returns `true` if the sets share no element.
    #[must_use]
    pub fn is_disjoint(&self, other: &Self) -> bool {
        self.intersection(other).next().is_none()
    }

    /// Returns `true` if every element of `self` is in `other`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use redblack::RbTreeSet;
    ///
    /// let small = RbTreeSet::from([2, 3]);
    /// let large = RbTreeSet::from([1, 2, 3, 4]);
    /// assert!(small.is_subset(&large));
    /// assert!(large.is_superset(&small));
    /// assert!(!large.is_subset(&small));
    /// ```
    #[must_use]
    pub fn is_subset(&self, other: &Self) -> bool {
        self.len() <= other.len() && self.difference(other).next().is_none()
    }

    /// Returns `true` if every element of `other` is in `self`.
    #[must_use]
    pub fn is_superset(&self, other: &Self) -> bool {
        other.is_subset(self)
    }

    /// Checks every red-black invariant and the element order.
    ///
    /// # Errors
    ///
    /// Returns the first [`InvariantViolation`] found.
    pub fn validate(&self) -> Result<(), InvariantViolation> {
        self.map.validate()
    }
}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<T> Default for RbTreeSet<T> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Ord> FromIterator<T> for RbTreeSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl<T: Ord, const N: usize> From<[T; N]> for RbTreeSet<T> {
    fn from(values: [T; N]) -> Self {
        let mut set = Self::with_capacity(N);
        set.extend(values);
        set
    }
}

impl<T: Ord> Extend<T> for RbTreeSet<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<'a, T: Ord + Copy> Extend<&'a T> for RbTreeSet<T> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied());
    }
}

impl<T> IntoIterator for RbTreeSet<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter::new(self.map.into_keys())
    }
}

impl<'a, T> IntoIterator for &'a RbTreeSet<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: fmt::Debug> fmt::Debug for RbTreeSet<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_set().entries(self.iter()).finish()
    }
}

impl<T: fmt::Display> fmt::Display for RbTreeSet<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{{")?;
        let mut first = true;
        for value in self {
            if first {
                first = false;
            } else {
                write!(formatter, ", ")?;
            }
            write!(formatter, "{value}")?;
        }
        write!(formatter, "}}")
    }
}

// =============================================================================
// Set Operators
// =============================================================================

impl<T: Ord + Clone> BitOr<&RbTreeSet<T>> for &RbTreeSet<T> {
    type Output = RbTreeSet<T>;

    /// Returns the union of `self` and `rhs` as a new set.
    fn bitor(self, rhs: &RbTreeSet<T>) -> RbTreeSet<T> {
        self.union(rhs).cloned().collect()
    }
}

impl<T: Ord + Clone> BitAnd<&RbTreeSet<T>> for &RbTreeSet<T> {
    type Output = RbTreeSet<T>;

    /// Returns the intersection of `self` and `rhs` as a new set.
    fn bitand(self, rhs: &RbTreeSet<T>) -> RbTreeSet<T> {
        self.intersection(rhs).cloned().collect()
    }
}

impl<T: Ord + Clone> Sub<&RbTreeSet<T>> for &RbTreeSet<T> {
    type Output = RbTreeSet<T>;

    /// Returns the difference of `self` and `rhs` as a new set.
    fn sub(self, rhs: &RbTreeSet<T>) -> RbTreeSet<T> {
        self.difference(rhs).cloned().collect()
    }
}

impl<T: Ord + Clone> BitXor<&RbTreeSet<T>> for &RbTreeSet<T> {
    type Output = RbTreeSet<T>;

    /// Returns the symmetric difference of `self` and `rhs` as a new set.
    fn bitxor(self, rhs: &RbTreeSet<T>) -> RbTreeSet<T> {
        self.symmetric_difference(rhs).cloned().collect()
    }
}

// =============================================================================
// Serde Support
// =============================================================================

#[cfg(feature = "serde")]
impl<T: serde::Serialize> serde::Serialize for RbTreeSet<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_seq(self)
    }
}

#[cfg(feature = "serde")]
struct RbTreeSetVisitor<T> {
    marker: std::marker::PhantomData<fn() -> RbTreeSet<T>>,
}

#[cfg(feature = "serde")]
impl<'de, T> serde::de::Visitor<'de> for RbTreeSetVisitor<T>
where
    T: serde::Deserialize<'de> + Ord,
{
    type Value = RbTreeSet<T>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a sequence")
    }

    fn visit_seq<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: serde::de::SeqAccess<'de>,
    {
        let mut set = RbTreeSet::new();
        while let Some(value) = access.next_element()? {
            set.insert(value);
        }
        Ok(set)
    }
}

#[cfg(feature = "serde")]
impl<'de, T> serde::Deserialize<'de> for RbTreeSet<T>
where
    T: serde::Deserialize<'de> + Ord,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_seq(RbTreeSetVisitor {
            marker: std::marker::PhantomData,
        })
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn test_display_set() {
        let set = RbTreeSet::from([3, 1, 2]);
        assert_eq!(format!("{set}"), "{1, 2, 3}");
        assert_eq!(format!("{}", RbTreeSet::<i32>::new()), "{}");
    }

    #[rstest]
    fn test_debug_uses_set_notation() {
        let set = RbTreeSet::from(["b", "a"]);
        assert_eq!(format!("{set:?}"), r#"{"a", "b"}"#);
    }

    #[rstest]
    fn test_insert_keeps_existing_element() {
        let mut set: RbTreeSet<String> = RbTreeSet::new();
        let original = "value".to_string();
        let pointer = original.as_ptr();
        set.insert(original);
        assert!(!set.insert("value".to_string()));
        assert_eq!(set.get("value").map(|stored| stored.as_ptr()), Some(pointer));
    }

    #[rstest]
    fn test_replace_swaps_stored_element() {
        let mut set: RbTreeSet<String> = RbTreeSet::new();
        set.insert("value".to_string());
        let replacement = "value".to_string();
        let pointer = replacement.as_ptr();
        assert_eq!(set.replace(replacement).as_deref(), Some("value"));
        assert_eq!(set.get("value").map(|stored| stored.as_ptr()), Some(pointer));
    }

    #[rstest]
    fn test_take_returns_stored_element() {
        let mut set = RbTreeSet::from([1, 2]);
        assert_eq!(set.take(&1), Some(1));
        assert_eq!(set.take(&1), None);
        assert!(set.validate().is_ok());
    }
}
