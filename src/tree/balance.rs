//! Rotations and the two red-black fix-up passes.
//!
//! Every case is written for one [`Side`] and mirrored through
//! [`Side::opposite`].

use super::{Color, NodeId, RawTree, Side};

impl<K, V> RawTree<K, V> {
    /// Moves `id` one level down towards `side`; its child on the opposite
    /// side takes its place.
    pub(super) fn rotate(&mut self, id: NodeId, side: Side) {
        let Some(pivot) = self.child(id, side.opposite()) else {
            unreachable!("rotation needs a child on the opposite side")
        };
        let inner = self.child(pivot, side);

        self.node_mut(id).set_child(side.opposite(), inner);
        if let Some(inner) = inner {
            self.node_mut(inner).parent = Some(id);
        }

        self.replace_child(id, Some(pivot));
        self.node_mut(pivot).set_child(side, Some(id));
        self.node_mut(id).parent = Some(pivot);
    }

    /// Restores the invariants after `node` was attached as a red leaf.
    ///
    /// At most two rotations; recoloring may climb to the root.
    pub(super) fn rebalance_after_insert(&mut self, mut node: NodeId) {
        loop {
            let Some(mut parent) = self.parent(node) else {
                break;
            };
            if !self.is_red(Some(parent)) {
                break;
            }
            let Some(grandparent) = self.parent(parent) else {
                unreachable!("a red parent is never the root")
            };
            let Some(side) = self.side_of(parent) else {
                unreachable!("parent hangs below the grandparent")
            };

            let uncle = self.child(grandparent, side.opposite());
            if self.is_red(uncle) {
                self.paint(Some(parent), Color::Black);
                self.paint(uncle, Color::Black);
                self.paint(Some(grandparent), Color::Red);
                node = grandparent;
                continue;
            }

            // Inside grandchild: turn it into the outside case first.
            if self.child(parent, side.opposite()) == Some(node) {
                self.rotate(parent, side);
                std::mem::swap(&mut node, &mut parent);
            }

            self.paint(Some(parent), Color::Black);
            self.paint(Some(grandparent), Color::Red);
            self.rotate(grandparent, side.opposite());
            break;
        }
        self.paint(self.root, Color::Black);
    }

    /// Restores the invariants after a black node was unlinked.
    ///
    /// `node` is the subtree that lost one black level (possibly NIL) and
    /// `parent` the node it now hangs below.
    pub(super) fn rebalance_after_remove(
        &mut self,
        mut node: Option<NodeId>,
        mut parent: Option<NodeId>,
    ) {
        while node != self.root && !self.is_red(node) {
            let Some(current_parent) = parent else {
                break;
            };
            let side = if self.child(current_parent, Side::Left) == node {
                Side::Left
            } else {
                Side::Right
            };
            let Some(mut sibling) = self.child(current_parent, side.opposite()) else {
                unreachable!("a node short of one black level always has a sibling")
            };

            if self.is_red(Some(sibling)) {
                self.paint(Some(sibling), Color::Black);
                self.paint(Some(current_parent), Color::Red);
                self.rotate(current_parent, side);
                let Some(next) = self.child(current_parent, side.opposite()) else {
                    unreachable!("the red sibling had two black children")
                };
                sibling = next;
            }

            let near = self.child(sibling, side);
            let far = self.child(sibling, side.opposite());
            if !self.is_red(near) && !self.is_red(far) {
                self.paint(Some(sibling), Color::Red);
                node = Some(current_parent);
                parent = self.parent(current_parent);
                continue;
            }

            if !self.is_red(far) {
                self.paint(near, Color::Black);
                self.paint(Some(sibling), Color::Red);
                self.rotate(sibling, side.opposite());
                let Some(next) = self.child(current_parent, side.opposite()) else {
                    unreachable!("the near nephew took the sibling's place")
                };
                sibling = next;
            }

            let parent_color = self.node(current_parent).color;
            self.node_mut(sibling).color = parent_color;
            self.paint(Some(current_parent), Color::Black);
            self.paint(self.child(sibling, side.opposite()), Color::Black);
            self.rotate(current_parent, side);
            node = self.root;
            break;
        }
        self.paint(node, Color::Black);
    }
}

#[cfg(test)]
mod tests {
    use super::super::Search;
    use super::*;
    use rstest::rstest;

    fn build(keys: &[i32]) -> RawTree<i32, ()> {
        let mut tree = RawTree::new();
        for &key in keys {
            if let Search::Vacant(attach) = tree.search(&key) {
                tree.insert_at(attach, key, ());
            }
        }
        tree
    }

    fn root_key(tree: &RawTree<i32, ()>) -> Option<i32> {
        tree.root().map(|root| *tree.key(root))
    }

    #[rstest]
    #[case(&[1, 2, 3], 2)]
    #[case(&[3, 2, 1], 2)]
    #[case(&[1, 3, 2], 2)]
    #[case(&[3, 1, 2], 2)]
    fn test_three_node_shapes_rotate_to_middle(#[case] keys: &[i32], #[case] expected_root: i32) {
        let tree = build(keys);
        assert_eq!(root_key(&tree), Some(expected_root));
        assert!(tree.validate().is_ok());
    }

    #[rstest]
    fn test_rotate_preserves_order_and_parent_links() {
        let mut tree = build(&[4, 2, 6, 1, 3, 5, 7]);
        let Some(root) = tree.root() else {
            panic!("tree is not empty")
        };
        tree.rotate(root, Side::Left);
        assert_eq!(root_key(&tree), Some(6));
        let keys: Vec<i32> = tree.in_order().into_iter().map(|id| *tree.key(id)).collect();
        assert_eq!(keys, vec![1, 2, 3, 4, 5, 6, 7]);
        assert_eq!(tree.parent(root).map(|id| *tree.key(id)), Some(6));
    }

    #[rstest]
    fn test_red_uncle_recolors_without_rotation() {
        let mut tree = build(&[2, 1, 3]);
        let root = tree.root();
        if let Search::Vacant(attach) = tree.search(&4) {
            tree.insert_at(attach, 4, ());
        }
        assert_eq!(tree.root(), root);
        assert!(!tree.is_red(tree.find(&1)));
        assert!(!tree.is_red(tree.find(&3)));
        assert!(tree.is_red(tree.find(&4)));
        assert!(tree.validate().is_ok());
    }

    #[rstest]
    #[case(1)]
    #[case(2)]
    #[case(4)]
    #[case(7)]
    #[case(10)]
    fn test_removal_cases_keep_invariants(#[case] removed: i32) {
        let mut tree = build(&(1..=10).collect::<Vec<_>>());
        let Some(id) = tree.find(&removed) else {
            panic!("key {removed} is present")
        };
        tree.remove_node(id);
        assert!(tree.validate().is_ok());
        assert_eq!(tree.find(&removed), None);
        assert_eq!(tree.len(), 9);
    }

    #[rstest]
    fn test_drain_to_empty_in_mixed_order() {
        let keys: Vec<i32> = (0..50).collect();
        let mut tree = build(&keys);
        for key in keys.iter().rev().step_by(3).chain(keys.iter().step_by(2)) {
            if let Some(id) = tree.find(key) {
                tree.remove_node(id);
                assert!(tree.validate().is_ok());
            }
        }
        for key in &keys {
            if let Some(id) = tree.find(key) {
                tree.remove_node(id);
            }
        }
        assert!(tree.is_empty());
        assert!(tree.validate().is_ok());
    }
}
