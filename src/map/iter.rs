//! Iterators over [`RbTreeMap`](super::RbTreeMap).
//!
//! Shared iterators walk successor and predecessor links from two cursors
//! and stop when the cursors meet. Mutable and owning iterators fix their
//! in-order node sequence when they are created.

use std::fmt;
use std::iter::FusedIterator;
use std::vec;

use crate::tree::{NodeId, RawTree, Side};

// =============================================================================
// Span
// =============================================================================

/// Double-ended cursor over an inclusive run of nodes.
///
/// `ends` holds the next front and back node; once they have met the span is
/// exhausted, so every node is yielded exactly once however the two ends are
/// interleaved.
struct Span<'a, K, V> {
    tree: &'a RawTree<K, V>,
    ends: Option<(NodeId, NodeId)>,
}

impl<K, V> Clone for Span<'_, K, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K, V> Copy for Span<'_, K, V> {}

impl<'a, K, V> Span<'a, K, V> {
    const fn new(tree: &'a RawTree<K, V>, ends: Option<(NodeId, NodeId)>) -> Self {
        Self { tree, ends }
    }

    fn next_front(&mut self) -> Option<NodeId> {
        let (front, back) = self.ends?;
        self.ends = if front == back {
            None
        } else {
            self.tree.step(front, Side::Right).map(|next| (next, back))
        };
        Some(front)
    }

    fn next_back(&mut self) -> Option<NodeId> {
        let (front, back) = self.ends?;
        self.ends = if front == back {
            None
        } else {
            self.tree.step(back, Side::Left).map(|next| (front, next))
        };
        Some(back)
    }
}

// =============================================================================
// Iter
// =============================================================================

/// An iterator over the entries of an `RbTreeMap`, in ascending key order.
///
/// Created by [`RbTreeMap::iter`](super::RbTreeMap::iter).
pub struct Iter<'a, K, V> {
    span: Span<'a, K, V>,
    remaining: usize,
}

impl<'a, K, V> Iter<'a, K, V> {
    pub(super) fn new(tree: &'a RawTree<K, V>) -> Self {
        let ends = tree.first().zip(tree.last());
        Self {
            span: Span::new(tree, ends),
            remaining: tree.len(),
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let tree = self.span.tree;
        let node = self.span.next_front()?;
        self.remaining -= 1;
        Some(tree.key_value(node))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }

    fn last(mut self) -> Option<Self::Item> {
        self.next_back()
    }
}

impl<K, V> DoubleEndedIterator for Iter<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let tree = self.span.tree;
        let node = self.span.next_back()?;
        self.remaining -= 1;
        Some(tree.key_value(node))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<K, V> FusedIterator for Iter<'_, K, V> {}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            span: self.span,
            remaining: self.remaining,
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for Iter<'_, K, V> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_list().entries(self.clone()).finish()
    }
}

// =============================================================================
// Keys and Values
// =============================================================================

/// An iterator over the keys of an `RbTreeMap`, in ascending order.
pub struct Keys<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Keys<'a, K, V> {
    pub(super) const fn new(inner: Iter<'a, K, V>) -> Self {
        Self { inner }
    }
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(key, _)| key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for Keys<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(key, _)| key)
    }
}

impl<K, V> ExactSizeIterator for Keys<'_, K, V> {}

impl<K, V> FusedIterator for Keys<'_, K, V> {}

impl<K, V> Clone for Keys<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

/// An iterator over the values of an `RbTreeMap`, in key order.
pub struct Values<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Values<'a, K, V> {
    pub(super) const fn new(inner: Iter<'a, K, V>) -> Self {
        Self { inner }
    }
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, value)| value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for Values<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(_, value)| value)
    }
}

impl<K, V> ExactSizeIterator for Values<'_, K, V> {}

impl<K, V> FusedIterator for Values<'_, K, V> {}

impl<K, V> Clone for Values<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

// =============================================================================
// Range
// =============================================================================

/// An iterator over the entries of an `RbTreeMap` inside a key range.
///
/// Created by [`RbTreeMap::range`](super::RbTreeMap::range).
pub struct Range<'a, K, V> {
    span: Span<'a, K, V>,
}

impl<'a, K, V> Range<'a, K, V> {
    pub(super) const fn new(tree: &'a RawTree<K, V>, ends: Option<(NodeId, NodeId)>) -> Self {
        Self {
            span: Span::new(tree, ends),
        }
    }

    /// Node indices of the run, in ascending key order.
    pub(super) fn node_ids(
        tree: &'a RawTree<K, V>,
        ends: Option<(NodeId, NodeId)>,
    ) -> impl Iterator<Item = NodeId> + 'a {
        let mut span = Span::new(tree, ends);
        std::iter::from_fn(move || span.next_front())
    }
}

impl<'a, K, V> Iterator for Range<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let tree = self.span.tree;
        self.span.next_front().map(|node| tree.key_value(node))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self.span.ends {
            None => (0, Some(0)),
            Some(_) => (1, Some(self.span.tree.len())),
        }
    }

    fn last(mut self) -> Option<Self::Item> {
        self.next_back()
    }
}

impl<K, V> DoubleEndedIterator for Range<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let tree = self.span.tree;
        self.span.next_back().map(|node| tree.key_value(node))
    }
}

impl<K, V> FusedIterator for Range<'_, K, V> {}

impl<K, V> Clone for Range<'_, K, V> {
    fn clone(&self) -> Self {
        Self { span: self.span }
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for Range<'_, K, V> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_list().entries(self.clone()).finish()
    }
}

// =============================================================================
// Mutable Iterators
// =============================================================================

/// A mutable iterator over the entries of an `RbTreeMap`, in ascending key
/// order.
pub struct IterMut<'a, K, V> {
    entries: vec::IntoIter<(&'a K, &'a mut V)>,
}

impl<'a, K, V> IterMut<'a, K, V> {
    pub(super) fn new(entries: Vec<(&'a K, &'a mut V)>) -> Self {
        Self {
            entries: entries.into_iter(),
        }
    }
}

impl<'a, K, V> Iterator for IterMut<'a, K, V> {
    type Item = (&'a K, &'a mut V);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.entries.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.entries.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for IterMut<'_, K, V> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.entries.next_back()
    }
}

impl<K, V> ExactSizeIterator for IterMut<'_, K, V> {}

impl<K, V> FusedIterator for IterMut<'_, K, V> {}

/// A mutable iterator over the entries of an `RbTreeMap` inside a key range.
pub struct RangeMut<'a, K, V> {
    inner: IterMut<'a, K, V>,
}

impl<'a, K, V> RangeMut<'a, K, V> {
    pub(super) fn new(entries: Vec<(&'a K, &'a mut V)>) -> Self {
        Self {
            inner: IterMut::new(entries),
        }
    }
}

impl<'a, K, V> Iterator for RangeMut<'a, K, V> {
    type Item = (&'a K, &'a mut V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for RangeMut<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back()
    }
}

impl<K, V> ExactSizeIterator for RangeMut<'_, K, V> {}

impl<K, V> FusedIterator for RangeMut<'_, K, V> {}

/// A mutable iterator over the values of an `RbTreeMap`.
pub struct ValuesMut<'a, K, V> {
    inner: IterMut<'a, K, V>,
}

impl<'a, K, V> ValuesMut<'a, K, V> {
    pub(super) const fn new(inner: IterMut<'a, K, V>) -> Self {
        Self { inner }
    }
}

impl<'a, K, V> Iterator for ValuesMut<'a, K, V> {
    type Item = &'a mut V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, value)| value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for ValuesMut<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(_, value)| value)
    }
}

impl<K, V> ExactSizeIterator for ValuesMut<'_, K, V> {}

impl<K, V> FusedIterator for ValuesMut<'_, K, V> {}

// =============================================================================
// Owning Iterators
// =============================================================================

/// An owning iterator over the entries of an `RbTreeMap`, in ascending key
/// order.
///
/// Entries not yet yielded are dropped with the iterator.
pub struct IntoIter<K, V> {
    tree: RawTree<K, V>,
    order: vec::IntoIter<NodeId>,
}

impl<K, V> IntoIter<K, V> {
    pub(super) fn new(tree: RawTree<K, V>, order: Vec<NodeId>) -> Self {
        Self {
            tree,
            order: order.into_iter(),
        }
    }
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        let tree = &mut self.tree;
        self.order.find_map(|node| tree.take_unlinked(node))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.order.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for IntoIter<K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let tree = &mut self.tree;
        self.order
            .by_ref()
            .rev()
            .find_map(|node| tree.take_unlinked(node))
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {}

impl<K, V> FusedIterator for IntoIter<K, V> {}

/// An owning iterator over the keys of an `RbTreeMap`.
pub struct IntoKeys<K, V> {
    inner: IntoIter<K, V>,
}

impl<K, V> IntoKeys<K, V> {
    pub(super) const fn new(inner: IntoIter<K, V>) -> Self {
        Self { inner }
    }
}

impl<K, V> Iterator for IntoKeys<K, V> {
    type Item = K;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(key, _)| key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for IntoKeys<K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(key, _)| key)
    }
}

impl<K, V> ExactSizeIterator for IntoKeys<K, V> {}

impl<K, V> FusedIterator for IntoKeys<K, V> {}

/// An owning iterator over the values of an `RbTreeMap`.
pub struct IntoValues<K, V> {
    inner: IntoIter<K, V>,
}

impl<K, V> IntoValues<K, V> {
    pub(super) const fn new(inner: IntoIter<K, V>) -> Self {
        Self { inner }
    }
}

impl<K, V> Iterator for IntoValues<K, V> {
    type Item = V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, value)| value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for IntoValues<K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(_, value)| value)
    }
}

impl<K, V> ExactSizeIterator for IntoValues<K, V> {}

impl<K, V> FusedIterator for IntoValues<K, V> {}

#[cfg(test)]
mod tests {
    use crate::RbTreeMap;
    use rstest::rstest;

    fn sample() -> RbTreeMap<i32, i32> {
        (1..=7).map(|key| (key, key * key)).collect()
    }

    #[rstest]
    fn test_interleaved_ends_meet_once() {
        let map = sample();
        let mut iter = map.iter();
        let mut seen = Vec::new();
        while let Some((front, _)) = iter.next() {
            seen.push(*front);
            if let Some((back, _)) = iter.next_back() {
                seen.push(*back);
            }
        }
        seen.sort_unstable();
        assert_eq!(seen, (1..=7).collect::<Vec<_>>());
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next_back(), None);
    }

    #[rstest]
    fn test_iter_len_tracks_both_ends() {
        let map = sample();
        let mut iter = map.iter();
        assert_eq!(iter.len(), 7);
        iter.next();
        iter.next_back();
        assert_eq!(iter.len(), 5);
    }

    #[rstest]
    fn test_range_single_element() {
        let map = sample();
        let entries: Vec<(&i32, &i32)> = map.range(4..=4).collect();
        assert_eq!(entries, vec![(&4, &16)]);
    }

    #[rstest]
    fn test_range_reversed_and_interleaved() {
        let map = sample();
        let mut range = map.range(2..6);
        assert_eq!(range.next_back(), Some((&5, &25)));
        assert_eq!(range.next(), Some((&2, &4)));
        assert_eq!(range.next_back(), Some((&4, &16)));
        assert_eq!(range.next(), Some((&3, &9)));
        assert_eq!(range.next(), None);
        assert_eq!(range.next_back(), None);
    }

    #[rstest]
    fn test_into_iter_drops_untaken_entries() {
        let map: RbTreeMap<i32, String> = (0..5).map(|key| (key, key.to_string())).collect();
        let mut iter = map.into_iter();
        assert_eq!(iter.next(), Some((0, "0".to_string())));
        assert_eq!(iter.next_back(), Some((4, "4".to_string())));
        assert_eq!(iter.len(), 3);
    }

    #[rstest]
    fn test_debug_lists_remaining_entries() {
        let map = RbTreeMap::from([(1, 'a'), (2, 'b')]);
        let mut iter = map.iter();
        iter.next();
        assert_eq!(format!("{iter:?}"), "[(2, 'b')]");
    }
}
