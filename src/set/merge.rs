//! Lazy set algebra over two ascending sequences.
//!
//! All four iterators share [`MergeCursor`], which peeks both inputs and
//! advances the side with the smaller element (both sides on a tie), so each
//! element is compared O(1) times and the output stays ascending.

use std::cmp::{Ordering, max, min};
use std::fmt;
use std::iter::{FusedIterator, Peekable};

use super::Iter;

// =============================================================================
// MergeCursor
// =============================================================================

struct MergeCursor<'a, T> {
    left: Peekable<Iter<'a, T>>,
    right: Peekable<Iter<'a, T>>,
}

impl<'a, T: Ord> MergeCursor<'a, T> {
    fn new(left: Iter<'a, T>, right: Iter<'a, T>) -> Self {
        Self {
            left: left.peekable(),
            right: right.peekable(),
        }
    }

    /// Takes the smaller head, or both heads when they are equal.
    fn next_pair(&mut self) -> (Option<&'a T>, Option<&'a T>) {
        let ordering = match (self.left.peek(), self.right.peek()) {
            (None, None) => return (None, None),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (Some(left), Some(right)) => left.cmp(right),
        };
        match ordering {
            Ordering::Less => (self.left.next(), None),
            Ordering::Greater => (None, self.right.next()),
            Ordering::Equal => (self.left.next(), self.right.next()),
        }
    }

    fn left_exhausted(&mut self) -> bool {
        self.left.peek().is_none()
    }

    fn right_exhausted(&mut self) -> bool {
        self.right.peek().is_none()
    }

    fn lengths(&self) -> (usize, usize) {
        (self.left.len(), self.right.len())
    }
}

impl<T> Clone for MergeCursor<'_, T> {
    fn clone(&self) -> Self {
        Self {
            left: self.left.clone(),
            right: self.right.clone(),
        }
    }
}

// =============================================================================
// Union
// =============================================================================

/// A lazy iterator over the union of two sets, in ascending order.
///
/// Created by [`RbTreeSet::union`](super::RbTreeSet::union).
pub struct Union<'a, T> {
    cursor: MergeCursor<'a, T>,
}

impl<'a, T: Ord> Union<'a, T> {
    pub(super) fn new(left: Iter<'a, T>, right: Iter<'a, T>) -> Self {
        Self {
            cursor: MergeCursor::new(left, right),
        }
    }
}

impl<'a, T: Ord> Iterator for Union<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let (left, right) = self.cursor.next_pair();
        left.or(right)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let (left, right) = self.cursor.lengths();
        (max(left, right), left.checked_add(right))
    }

    fn min(mut self) -> Option<Self::Item> {
        self.next()
    }
}

impl<T: Ord> FusedIterator for Union<'_, T> {}

impl<T> Clone for Union<'_, T> {
    fn clone(&self) -> Self {
        Self {
            cursor: self.cursor.clone(),
        }
    }
}

impl<T: Ord + fmt::Debug> fmt::Debug for Union<'_, T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_tuple("Union")
            .field(&self.clone().collect::<Vec<_>>())
            .finish()
    }
}

// =============================================================================
// Intersection
// =============================================================================

/// A lazy iterator over the elements present in both sets.
///
/// Stops as soon as either input is exhausted.
pub struct Intersection<'a, T> {
    cursor: MergeCursor<'a, T>,
}

impl<'a, T: Ord> Intersection<'a, T> {
    pub(super) fn new(left: Iter<'a, T>, right: Iter<'a, T>) -> Self {
        Self {
            cursor: MergeCursor::new(left, right),
        }
    }
}

impl<'a, T: Ord> Iterator for Intersection<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.cursor.next_pair() {
                (Some(both), Some(_)) => return Some(both),
                (None, None) => return None,
                _ if self.cursor.left_exhausted() || self.cursor.right_exhausted() => {
                    return None;
                }
                _ => {}
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let (left, right) = self.cursor.lengths();
        (0, Some(min(left, right)))
    }
}

impl<T: Ord> FusedIterator for Intersection<'_, T> {}

impl<T> Clone for Intersection<'_, T> {
    fn clone(&self) -> Self {
        Self {
            cursor: self.cursor.clone(),
        }
    }
}

impl<T: Ord + fmt::Debug> fmt::Debug for Intersection<'_, T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_tuple("Intersection")
            .field(&self.clone().collect::<Vec<_>>())
            .finish()
    }
}

// =============================================================================
// Difference
// =============================================================================

/// A lazy iterator over the elements of the first set that are missing from
/// the second.
pub struct Difference<'a, T> {
    cursor: MergeCursor<'a, T>,
}

impl<'a, T: Ord> Difference<'a, T> {
    pub(super) fn new(left: Iter<'a, T>, right: Iter<'a, T>) -> Self {
        Self {
            cursor: MergeCursor::new(left, right),
        }
    }
}

impl<'a, T: Ord> Iterator for Difference<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.cursor.next_pair() {
                (Some(only_left), None) => return Some(only_left),
                (None, None) => return None,
                _ if self.cursor.left_exhausted() => return None,
                _ => {}
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let (left, right) = self.cursor.lengths();
        (left.saturating_sub(right), Some(left))
    }
}

impl<T: Ord> FusedIterator for Difference<'_, T> {}

impl<T> Clone for Difference<'_, T> {
    fn clone(&self) -> Self {
        Self {
            cursor: self.cursor.clone(),
        }
    }
}

impl<T: Ord + fmt::Debug> fmt::Debug for Difference<'_, T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_tuple("Difference")
            .field(&self.clone().collect::<Vec<_>>())
            .finish()
    }
}

// =============================================================================
// SymmetricDifference
// =============================================================================

/// A lazy iterator over the elements present in exactly one of two sets.
pub struct SymmetricDifference<'a, T> {
    cursor: MergeCursor<'a, T>,
}

impl<'a, T: Ord> SymmetricDifference<'a, T> {
    pub(super) fn new(left: Iter<'a, T>, right: Iter<'a, T>) -> Self {
        Self {
            cursor: MergeCursor::new(left, right),
        }
    }
}

impl<'a, T: Ord> Iterator for SymmetricDifference<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.cursor.next_pair() {
                (Some(_), Some(_)) => {}
                (left, right) => return left.or(right),
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let (left, right) = self.cursor.lengths();
        (0, left.checked_add(right))
    }
}

impl<T: Ord> FusedIterator for SymmetricDifference<'_, T> {}

impl<T> Clone for SymmetricDifference<'_, T> {
    fn clone(&self) -> Self {
        Self {
            cursor: self.cursor.clone(),
        }
    }
}

impl<T: Ord + fmt::Debug> fmt::Debug for SymmetricDifference<'_, T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_tuple("SymmetricDifference")
            .field(&self.clone().collect::<Vec<_>>())
            .finish()
    }
}
