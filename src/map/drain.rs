//! Removing iteration with a predicate.

use std::fmt;
use std::iter::FusedIterator;

use crate::trace::trace;
use crate::tree::{NodeId, RawTree, Side};

/// Forward cursor that removes matching nodes as it passes them.
///
/// The successor is looked up before the current node is removed. Removal
/// relinks nodes without moving payloads, so that index stays valid.
pub(crate) struct DrainCursor<'a, K, V> {
    tree: &'a mut RawTree<K, V>,
    next: Option<NodeId>,
}

impl<'a, K, V> DrainCursor<'a, K, V> {
    pub(crate) fn new(tree: &'a mut RawTree<K, V>) -> Self {
        let next = tree.first();
        Self { tree, next }
    }

    /// Advances to the next node accepted by `predicate` and removes it.
    pub(crate) fn next_matching<F>(&mut self, predicate: &mut F) -> Option<(K, V)>
    where
        F: FnMut(&K, &mut V) -> bool,
    {
        while let Some(current) = self.next {
            self.next = self.tree.step(current, Side::Right);
            let (key, value) = self.tree.key_value_mut(current);
            if predicate(key, value) {
                return Some(self.tree.remove_node(current));
            }
        }
        None
    }

    /// Runs the rest of the pass, dropping what it removes.
    pub(crate) fn finish<F>(&mut self, predicate: &mut F)
    where
        F: FnMut(&K, &mut V) -> bool,
    {
        while self.next_matching(predicate).is_some() {}
        trace!(len = self.tree.len(), "drain filter finished");
    }

    pub(crate) fn size_hint(&self) -> (usize, Option<usize>) {
        match self.next {
            None => (0, Some(0)),
            Some(_) => (0, Some(self.tree.len())),
        }
    }
}

/// An iterator that removes and yields the entries of an `RbTreeMap`
/// accepted by a predicate.
///
/// Created by [`RbTreeMap::drain_filter`](super::RbTreeMap::drain_filter).
/// Dropping it finishes the pass.
pub struct DrainFilter<'a, K, V, F>
where
    F: FnMut(&K, &mut V) -> bool,
{
    cursor: DrainCursor<'a, K, V>,
    predicate: F,
}

impl<'a, K, V, F> DrainFilter<'a, K, V, F>
where
    F: FnMut(&K, &mut V) -> bool,
{
    pub(super) const fn new(cursor: DrainCursor<'a, K, V>, predicate: F) -> Self {
        Self { cursor, predicate }
    }
}

impl<K, V, F> Iterator for DrainFilter<'_, K, V, F>
where
    F: FnMut(&K, &mut V) -> bool,
{
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        self.cursor.next_matching(&mut self.predicate)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.cursor.size_hint()
    }
}

impl<K, V, F> FusedIterator for DrainFilter<'_, K, V, F> where F: FnMut(&K, &mut V) -> bool {}

impl<K, V, F> Drop for DrainFilter<'_, K, V, F>
where
    F: FnMut(&K, &mut V) -> bool,
{
    fn drop(&mut self) {
        // A panicking predicate would panic again here.
        if !std::thread::panicking() {
            self.cursor.finish(&mut self.predicate);
        }
    }
}

impl<K, V, F> fmt::Debug for DrainFilter<'_, K, V, F>
where
    F: FnMut(&K, &mut V) -> bool,
{
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_struct("DrainFilter").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use crate::RbTreeMap;
    use rstest::rstest;

    #[rstest]
    fn test_drop_finishes_pass() {
        let mut map: RbTreeMap<i32, i32> = (0..20).map(|key| (key, key)).collect();
        {
            let mut drain = map.drain_filter(|key, _| key % 2 == 1);
            assert_eq!(drain.next(), Some((1, 1)));
        }
        assert_eq!(map.len(), 10);
        assert!(map.keys().all(|key| key % 2 == 0));
        assert_eq!(map.validate(), Ok(()));
    }

    #[rstest]
    fn test_forget_leaves_map_valid() {
        let mut map: RbTreeMap<i32, i32> = (0..10).map(|key| (key, key)).collect();
        let mut drain = map.drain_filter(|_, _| true);
        drain.next();
        std::mem::forget(drain);
        assert_eq!(map.len(), 9);
        assert_eq!(map.validate(), Ok(()));
    }

    #[rstest]
    fn test_predicate_sees_every_entry_once() {
        let mut map: RbTreeMap<i32, i32> = (0..30).map(|key| (key, 0)).collect();
        let mut visited = Vec::new();
        let removed: Vec<i32> = map
            .drain_filter(|key, value| {
                visited.push(*key);
                *value += 1;
                key % 3 == 0
            })
            .map(|(key, _)| key)
            .collect();
        assert_eq!(visited, (0..30).collect::<Vec<_>>());
        assert_eq!(removed, (0..30).step_by(3).collect::<Vec<_>>());
        assert!(map.values().all(|value| *value == 1));
    }
}
