//! Iterators over [`RbTreeSet`](super::RbTreeSet).

use std::fmt;
use std::iter::FusedIterator;

use crate::map::{self, DrainCursor};

// =============================================================================
// Iter
// =============================================================================

/// An iterator over the elements of an `RbTreeSet`, in ascending order.
///
/// Created by [`RbTreeSet::iter`](super::RbTreeSet::iter).
pub struct Iter<'a, T> {
    inner: map::Keys<'a, T, ()>,
}

impl<'a, T> Iter<'a, T> {
    pub(super) const fn new(inner: map::Keys<'a, T, ()>) -> Self {
        Self { inner }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }

    fn last(mut self) -> Option<Self::Item> {
        self.inner.next_back()
    }
}

impl<T> DoubleEndedIterator for Iter<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back()
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Iter<'_, T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_list().entries(self.clone()).finish()
    }
}

// =============================================================================
// Range
// =============================================================================

/// An iterator over the elements of an `RbTreeSet` inside a range.
///
/// Created by [`RbTreeSet::range`](super::RbTreeSet::range).
pub struct Range<'a, T> {
    inner: map::Range<'a, T, ()>,
}

impl<'a, T> Range<'a, T> {
    pub(super) const fn new(inner: map::Range<'a, T, ()>) -> Self {
        Self { inner }
    }
}

impl<'a, T> Iterator for Range<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(value, ())| value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> DoubleEndedIterator for Range<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(value, ())| value)
    }
}

impl<T> FusedIterator for Range<'_, T> {}

impl<T> Clone for Range<'_, T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

// =============================================================================
// IntoIter
// =============================================================================

/// An owning iterator over the elements of an `RbTreeSet`, in ascending
/// order.
pub struct IntoIter<T> {
    inner: map::IntoKeys<T, ()>,
}

impl<T> IntoIter<T> {
    pub(super) const fn new(inner: map::IntoKeys<T, ()>) -> Self {
        Self { inner }
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> FusedIterator for IntoIter<T> {}

// =============================================================================
// DrainFilter
// =============================================================================

/// An iterator that removes and yields the elements of an `RbTreeSet`
/// accepted by a predicate.
///
/// Created by [`RbTreeSet::drain_filter`](super::RbTreeSet::drain_filter).
/// Dropping it finishes the pass.
pub struct DrainFilter<'a, T, F>
where
    F: FnMut(&T) -> bool,
{
    cursor: DrainCursor<'a, T, ()>,
    predicate: F,
}

impl<'a, T, F> DrainFilter<'a, T, F>
where
    F: FnMut(&T) -> bool,
{
    pub(super) const fn new(cursor: DrainCursor<'a, T, ()>, predicate: F) -> Self {
        Self { cursor, predicate }
    }
}

impl<T, F> Iterator for DrainFilter<'_, T, F>
where
    F: FnMut(&T) -> bool,
{
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        let predicate = &mut self.predicate;
        self.cursor
            .next_matching(&mut |value: &T, _: &mut ()| predicate(value))
            .map(|(value, ())| value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.cursor.size_hint()
    }
}

impl<T, F> FusedIterator for DrainFilter<'_, T, F> where F: FnMut(&T) -> bool {}

impl<T, F> Drop for DrainFilter<'_, T, F>
where
    F: FnMut(&T) -> bool,
{
    fn drop(&mut self) {
        if !std::thread::panicking() {
            let predicate = &mut self.predicate;
            self.cursor.finish(&mut |value: &T, _: &mut ()| predicate(value));
        }
    }
}

impl<T, F> fmt::Debug for DrainFilter<'_, T, F>
where
    F: FnMut(&T) -> bool,
{
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_struct("DrainFilter").finish_non_exhaustive()
    }
}
