//! Arena-backed red-black tree engine shared by the map and the set.
//!
//! # Internal Structure
//!
//! Nodes live in a [`Slab`] and refer to their parent and children by slot
//! index, so in-order successor and predecessor steps need neither recursion
//! nor an explicit stack. The tree maintains the following invariants:
//!
//! 1. Every node is either red or black
//! 2. The root is black
//! 3. All leaves (NIL) are black
//! 4. Red nodes have only black children
//! 5. Every path from root to leaf has the same number of black nodes
//!
//! Rebalancing lives in `balance.rs`, the structural self-check in `check.rs`.

mod balance;
mod check;
mod node;

pub(crate) use node::{AttachPoint, NodeId, Side};

use node::{Color, Node};
use slab::Slab;
use std::borrow::Borrow;
use std::cmp::Ordering;
use std::ops::{Bound, RangeBounds};

use crate::trace::trace;

/// Outcome of a descent looking for a key.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(crate) enum Search {
    /// The key is stored in this node.
    Found(NodeId),
    /// The key is absent; a new node would be attached here (`None` for an
    /// empty tree).
    Vacant(Option<AttachPoint>),
}

// =============================================================================
// RawTree Definition
// =============================================================================

/// Red-black tree over an index arena.
///
/// The element count is the number of occupied arena slots.
#[derive(Clone)]
pub(crate) struct RawTree<K, V> {
    nodes: Slab<Node<K, V>>,
    root: Option<NodeId>,
}

impl<K, V> RawTree<K, V> {
    pub(crate) fn new() -> Self {
        Self {
            nodes: Slab::new(),
            root: None,
        }
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Slab::with_capacity(capacity),
            root: None,
        }
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub(crate) const fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
        self.root = None;
    }

    #[inline]
    pub(crate) const fn root(&self) -> Option<NodeId> {
        self.root
    }

    // =========================================================================
    // Node Access
    // =========================================================================

    #[inline]
    fn node(&self, id: NodeId) -> &Node<K, V> {
        &self.nodes[id]
    }

    #[inline]
    fn node_mut(&mut self, id: NodeId) -> &mut Node<K, V> {
        &mut self.nodes[id]
    }

    #[inline]
    pub(crate) fn key(&self, id: NodeId) -> &K {
        &self.node(id).key
    }

    #[inline]
    pub(crate) fn key_value(&self, id: NodeId) -> (&K, &V) {
        let node = self.node(id);
        (&node.key, &node.value)
    }

    #[inline]
    pub(crate) fn key_value_mut(&mut self, id: NodeId) -> (&K, &mut V) {
        let node = self.node_mut(id);
        (&node.key, &mut node.value)
    }

    #[inline]
    pub(crate) fn value_mut(&mut self, id: NodeId) -> &mut V {
        &mut self.node_mut(id).value
    }

    /// Swaps the stored key for an equal one and returns the old key.
    pub(crate) fn replace_key(&mut self, id: NodeId, key: K) -> K {
        std::mem::replace(&mut self.node_mut(id).key, key)
    }

    #[inline]
    pub(crate) fn child(&self, id: NodeId, side: Side) -> Option<NodeId> {
        self.node(id).child(side)
    }

    #[inline]
    pub(crate) fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent
    }

    /// NIL leaves count as black.
    #[inline]
    fn is_red(&self, id: Option<NodeId>) -> bool {
        id.is_some_and(|id| self.node(id).is_red())
    }

    #[inline]
    fn paint(&mut self, id: Option<NodeId>, color: Color) {
        if let Some(id) = id {
            self.node_mut(id).color = color;
        }
    }

    /// Which child of its parent `id` is, or `None` for the root.
    fn side_of(&self, id: NodeId) -> Option<Side> {
        let parent = self.parent(id)?;
        if self.child(parent, Side::Left) == Some(id) {
            Some(Side::Left)
        } else {
            Some(Side::Right)
        }
    }

    /// Puts `new` where `old` hangs below its parent (or at the root).
    fn replace_child(&mut self, old: NodeId, new: Option<NodeId>) {
        let parent = self.parent(old);
        match (parent, self.side_of(old)) {
            (Some(parent), Some(side)) => self.node_mut(parent).set_child(side, new),
            _ => self.root = new,
        }
        if let Some(new) = new {
            self.node_mut(new).parent = parent;
        }
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    /// Follows `side` links from `id` until the end of the subtree.
    pub(crate) fn extreme(&self, mut id: NodeId, side: Side) -> NodeId {
        while let Some(child) = self.child(id, side) {
            id = child;
        }
        id
    }

    /// The node with the smallest key.
    pub(crate) fn first(&self) -> Option<NodeId> {
        self.root.map(|root| self.extreme(root, Side::Left))
    }

    /// The node with the largest key.
    pub(crate) fn last(&self) -> Option<NodeId> {
        self.root.map(|root| self.extreme(root, Side::Right))
    }

    /// In-order neighbour of `id`: the successor for [`Side::Right`], the
    /// predecessor for [`Side::Left`].
    ///
    /// O(log N) worst case, amortized O(1) over a full walk.
    pub(crate) fn step(&self, id: NodeId, side: Side) -> Option<NodeId> {
        if let Some(child) = self.child(id, side) {
            return Some(self.extreme(child, side.opposite()));
        }
        let mut current = id;
        while let Some(parent) = self.parent(current) {
            if self.child(parent, side.opposite()) == Some(current) {
                return Some(parent);
            }
            current = parent;
        }
        None
    }

    /// Node indices in ascending key order.
    pub(crate) fn in_order(&self) -> Vec<NodeId> {
        let mut order = Vec::with_capacity(self.len());
        let mut current = self.first();
        while let Some(id) = current {
            order.push(id);
            current = self.step(id, Side::Right);
        }
        order
    }

    /// Splits the arena borrow into one `(&K, &mut V)` per listed node, in
    /// the order given.
    ///
    /// O(capacity): the arena is walked once in slot order and each entry is
    /// placed at its rank.
    pub(crate) fn entries_mut(&mut self, order: &[NodeId]) -> Vec<(&K, &mut V)> {
        let span = order.iter().max().map_or(0, |max| max + 1);
        let mut rank_of: Vec<Option<usize>> = vec![None; span];
        for (rank, &id) in order.iter().enumerate() {
            rank_of[id] = Some(rank);
        }

        let mut placed: Vec<Option<(&K, &mut V)>> = Vec::with_capacity(order.len());
        placed.resize_with(order.len(), || None);
        for (id, node) in &mut self.nodes {
            if let Some(Some(rank)) = rank_of.get(id) {
                placed[*rank] = Some((&node.key, &mut node.value));
            }
        }
        placed.into_iter().flatten().collect()
    }

    /// Moves a node's payload out without relinking its neighbours.
    ///
    /// Only for consuming iteration: once any node has been taken the links
    /// of the remaining nodes must no longer be followed.
    pub(crate) fn take_unlinked(&mut self, id: NodeId) -> Option<(K, V)> {
        self.nodes.try_remove(id).map(|node| (node.key, node.value))
    }

    // =========================================================================
    // Structural Mutation
    // =========================================================================

    /// Links a new red node at `attach` and restores the red-black invariants.
    ///
    /// `attach` must come from a [`Search::Vacant`] of the current tree shape.
    pub(crate) fn insert_at(&mut self, attach: Option<AttachPoint>, key: K, value: V) -> NodeId {
        let parent = attach.map(|point| point.parent);
        let inserted = self.nodes.insert(Node::new_red(key, value, parent));
        match attach {
            None => {
                debug_assert!(self.root.is_none(), "attaching a second root");
                self.root = Some(inserted);
            }
            Some(AttachPoint { parent, side }) => {
                debug_assert!(
                    self.child(parent, side).is_none(),
                    "attach point is already occupied"
                );
                self.node_mut(parent).set_child(side, Some(inserted));
            }
        }
        self.rebalance_after_insert(inserted);
        trace!(node = inserted, len = self.len(), "rebalanced after insert");
        inserted
    }

    /// Unlinks `target`, restores the red-black invariants and returns its
    /// payload.
    ///
    /// A node with two children is replaced by its in-order successor node
    /// (relinked, not copied), so every other index stays valid.
    pub(crate) fn remove_node(&mut self, target: NodeId) -> (K, V) {
        let left = self.child(target, Side::Left);
        let right = self.child(target, Side::Right);

        let (replacement, replacement_parent, removed_color) = match (left, right) {
            (Some(left), Some(right)) => {
                let successor = self.extreme(right, Side::Left);
                let successor_color = self.node(successor).color;
                let successor_right = self.child(successor, Side::Right);

                let replacement_parent = if successor == right {
                    successor
                } else {
                    let Some(successor_parent) = self.parent(successor) else {
                        unreachable!("successor below a right child has a parent")
                    };
                    self.replace_child(successor, successor_right);
                    self.node_mut(successor).set_child(Side::Right, Some(right));
                    self.node_mut(right).parent = Some(successor);
                    successor_parent
                };

                let target_color = self.node(target).color;
                self.replace_child(target, Some(successor));
                self.node_mut(successor).set_child(Side::Left, Some(left));
                self.node_mut(left).parent = Some(successor);
                self.node_mut(successor).color = target_color;

                (successor_right, Some(replacement_parent), successor_color)
            }
            _ => {
                let child = left.or(right);
                let parent = self.parent(target);
                let color = self.node(target).color;
                self.replace_child(target, child);
                (child, parent, color)
            }
        };

        if removed_color == Color::Black {
            self.rebalance_after_remove(replacement, replacement_parent);
        }

        let node = self.nodes.remove(target);
        trace!(node = target, len = self.len(), "rebalanced after remove");
        (node.key, node.value)
    }
}

// =============================================================================
// Search
// =============================================================================

impl<K: Ord, V> RawTree<K, V> {
    /// Single descent from the root.
    ///
    /// O(log N)
    pub(crate) fn search<Q>(&self, key: &Q) -> Search
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let Some(mut current) = self.root else {
            return Search::Vacant(None);
        };
        loop {
            let side = match key.cmp(self.key(current).borrow()) {
                Ordering::Equal => return Search::Found(current),
                Ordering::Less => Side::Left,
                Ordering::Greater => Side::Right,
            };
            match self.child(current, side) {
                Some(child) => current = child,
                None => {
                    return Search::Vacant(Some(AttachPoint {
                        parent: current,
                        side,
                    }));
                }
            }
        }
    }

    pub(crate) fn find<Q>(&self, key: &Q) -> Option<NodeId>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        match self.search(key) {
            Search::Found(id) => Some(id),
            Search::Vacant(_) => None,
        }
    }

    /// The first node whose key satisfies a lower bound.
    pub(crate) fn lower_bound<Q>(&self, bound: Bound<&Q>) -> Option<NodeId>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut candidate = None;
        let mut current = self.root;
        while let Some(id) = current {
            let key: &Q = self.key(id).borrow();
            let inside = match bound {
                Bound::Included(limit) => key >= limit,
                Bound::Excluded(limit) => key > limit,
                Bound::Unbounded => true,
            };
            if inside {
                candidate = Some(id);
                current = self.child(id, Side::Left);
            } else {
                current = self.child(id, Side::Right);
            }
        }
        candidate
    }

    /// The last node whose key satisfies an upper bound.
    pub(crate) fn upper_bound<Q>(&self, bound: Bound<&Q>) -> Option<NodeId>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut candidate = None;
        let mut current = self.root;
        while let Some(id) = current {
            let key: &Q = self.key(id).borrow();
            let inside = match bound {
                Bound::Included(limit) => key <= limit,
                Bound::Excluded(limit) => key < limit,
                Bound::Unbounded => true,
            };
            if inside {
                candidate = Some(id);
                current = self.child(id, Side::Right);
            } else {
                current = self.child(id, Side::Left);
            }
        }
        candidate
    }

    /// First and last node inside `range`, or `None` when the range selects
    /// nothing (including inverted ranges).
    ///
    /// O(log N)
    pub(crate) fn range_ends<Q, R>(&self, range: &R) -> Option<(NodeId, NodeId)>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
        R: RangeBounds<Q>,
    {
        let front = self.lower_bound(range.start_bound())?;
        let back = self.upper_bound(range.end_bound())?;
        (self.key(front) <= self.key(back)).then_some((front, back))
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn insert(tree: &mut RawTree<i32, i32>, key: i32) -> NodeId {
        match tree.search(&key) {
            Search::Found(id) => id,
            Search::Vacant(attach) => tree.insert_at(attach, key, key * 10),
        }
    }

    fn keys(tree: &RawTree<i32, i32>) -> Vec<i32> {
        tree.in_order().into_iter().map(|id| *tree.key(id)).collect()
    }

    #[rstest]
    fn test_empty_tree_search_attaches_at_root() {
        let tree: RawTree<i32, i32> = RawTree::new();
        assert_eq!(tree.search(&1), Search::Vacant(None));
        assert_eq!(tree.first(), None);
        assert_eq!(tree.last(), None);
    }

    #[rstest]
    fn test_search_reports_attach_point() {
        let mut tree = RawTree::new();
        let root = insert(&mut tree, 10);
        assert_eq!(
            tree.search(&5),
            Search::Vacant(Some(AttachPoint {
                parent: root,
                side: Side::Left
            }))
        );
        assert_eq!(
            tree.search(&15),
            Search::Vacant(Some(AttachPoint {
                parent: root,
                side: Side::Right
            }))
        );
        assert_eq!(tree.search(&10), Search::Found(root));
    }

    #[rstest]
    fn test_ascending_inserts_stay_balanced() {
        let mut tree = RawTree::new();
        for key in 0..64 {
            insert(&mut tree, key);
            assert!(tree.validate().is_ok());
        }
        assert_eq!(keys(&tree), (0..64).collect::<Vec<_>>());
        assert_eq!(tree.len(), 64);
    }

    #[rstest]
    fn test_step_walks_both_directions() {
        let mut tree = RawTree::new();
        for key in [5, 3, 8, 1, 4, 7, 9] {
            insert(&mut tree, key);
        }
        let mut forward = Vec::new();
        let mut current = tree.first();
        while let Some(id) = current {
            forward.push(*tree.key(id));
            current = tree.step(id, Side::Right);
        }
        let mut backward = Vec::new();
        let mut current = tree.last();
        while let Some(id) = current {
            backward.push(*tree.key(id));
            current = tree.step(id, Side::Left);
        }
        backward.reverse();
        assert_eq!(forward, vec![1, 3, 4, 5, 7, 8, 9]);
        assert_eq!(forward, backward);
    }

    #[rstest]
    fn test_remove_keeps_other_indices_valid() {
        let mut tree = RawTree::new();
        let ids: Vec<NodeId> = (0..32).map(|key| insert(&mut tree, key)).collect();
        for key in (0..32).step_by(2) {
            let (removed_key, removed_value) = tree.remove_node(ids[key as usize]);
            assert_eq!(removed_key, key);
            assert_eq!(removed_value, key * 10);
            assert!(tree.validate().is_ok());
        }
        for key in (1..32).step_by(2) {
            assert_eq!(*tree.key(ids[key as usize]), key);
        }
    }

    #[rstest]
    fn test_remove_root_of_single_node_tree() {
        let mut tree = RawTree::new();
        let root = insert(&mut tree, 1);
        assert_eq!(tree.remove_node(root), (1, 10));
        assert!(tree.is_empty());
        assert_eq!(tree.len(), 0);
        assert!(tree.validate().is_ok());
    }

    #[rstest]
    fn test_freed_slots_are_reused() {
        let mut tree = RawTree::new();
        let first = insert(&mut tree, 1);
        insert(&mut tree, 2);
        tree.remove_node(first);
        let reused = insert(&mut tree, 3);
        assert_eq!(reused, first);
        assert_eq!(keys(&tree), vec![2, 3]);
    }

    #[rstest]
    #[case(Bound::Included(4), Some(4))]
    #[case(Bound::Excluded(4), Some(6))]
    #[case(Bound::Included(5), Some(6))]
    #[case(Bound::Unbounded, Some(2))]
    #[case(Bound::Excluded(8), None)]
    fn test_lower_bound(#[case] bound: Bound<i32>, #[case] expected: Option<i32>) {
        let mut tree = RawTree::new();
        for key in [2, 4, 6, 8] {
            insert(&mut tree, key);
        }
        let found = tree.lower_bound(bound.as_ref()).map(|id| *tree.key(id));
        assert_eq!(found, expected);
    }

    #[rstest]
    #[case(Bound::Included(4), Some(4))]
    #[case(Bound::Excluded(4), Some(2))]
    #[case(Bound::Included(5), Some(4))]
    #[case(Bound::Unbounded, Some(8))]
    #[case(Bound::Excluded(2), None)]
    fn test_upper_bound(#[case] bound: Bound<i32>, #[case] expected: Option<i32>) {
        let mut tree = RawTree::new();
        for key in [2, 4, 6, 8] {
            insert(&mut tree, key);
        }
        let found = tree.upper_bound(bound.as_ref()).map(|id| *tree.key(id));
        assert_eq!(found, expected);
    }

    #[rstest]
    fn test_entries_mut_follows_given_order() {
        let mut tree = RawTree::new();
        for key in [3, 1, 2] {
            insert(&mut tree, key);
        }
        let order = tree.in_order();
        for (_, value) in tree.entries_mut(&order) {
            *value += 1;
        }
        let order = tree.in_order();
        let entries: Vec<(i32, i32)> = tree
            .entries_mut(&order)
            .into_iter()
            .map(|(key, value)| (*key, *value))
            .collect();
        assert_eq!(entries, vec![(1, 11), (2, 21), (3, 31)]);
    }

    #[rstest]
    fn test_take_unlinked_empties_slots() {
        let mut tree = RawTree::new();
        for key in [1, 2, 3] {
            insert(&mut tree, key);
        }
        let order = tree.in_order();
        let taken: Vec<(i32, i32)> = order
            .iter()
            .filter_map(|&id| tree.take_unlinked(id))
            .collect();
        assert_eq!(taken, vec![(1, 10), (2, 20), (3, 30)]);
        assert_eq!(tree.len(), 0);
        assert_eq!(tree.take_unlinked(order[0]), None);
    }
}
