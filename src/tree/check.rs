//! Structural self-check of the red-black invariants.

use super::{NodeId, RawTree, Side};
use crate::error::InvariantViolation;

impl<K: Ord, V> RawTree<K, V> {
    /// Walks the whole tree and reports the first broken invariant.
    ///
    /// O(N)
    pub(crate) fn validate(&self) -> Result<(), InvariantViolation> {
        let Some(root) = self.root() else {
            return match self.len() {
                0 => Ok(()),
                stored => Err(InvariantViolation::LengthMismatch {
                    reachable: 0,
                    stored,
                }),
            };
        };
        let Some(root_node) = self.nodes.get(root) else {
            return Err(InvariantViolation::DanglingLink);
        };
        if root_node.parent.is_some() {
            return Err(InvariantViolation::RootHasParent);
        }
        if root_node.is_red() {
            return Err(InvariantViolation::RedRoot);
        }

        let mut reachable = 0;
        self.black_height(root, &mut reachable)?;
        if reachable != self.len() {
            return Err(InvariantViolation::LengthMismatch {
                reachable,
                stored: self.len(),
            });
        }

        let mut previous = self.first();
        while let Some(id) = previous {
            let next = self.step(id, Side::Right);
            if let Some(next) = next
                && self.key(id) >= self.key(next)
            {
                return Err(InvariantViolation::OutOfOrder);
            }
            previous = next;
        }
        Ok(())
    }

    /// Black height of the subtree at `id`, counting the NIL leaf.
    fn black_height(&self, id: NodeId, reachable: &mut usize) -> Result<usize, InvariantViolation> {
        *reachable += 1;
        if *reachable > self.len() {
            return Err(InvariantViolation::LengthMismatch {
                reachable: *reachable,
                stored: self.len(),
            });
        }

        let node = self.node(id);
        let mut heights = [1; 2];
        for (height, side) in heights.iter_mut().zip([Side::Left, Side::Right]) {
            let Some(child) = node.child(side) else {
                continue;
            };
            let Some(child_node) = self.nodes.get(child) else {
                return Err(InvariantViolation::DanglingLink);
            };
            if child_node.parent != Some(id) {
                return Err(InvariantViolation::BrokenParentLink);
            }
            if node.is_red() && child_node.is_red() {
                return Err(InvariantViolation::ConsecutiveRed);
            }
            *height = self.black_height(child, reachable)?;
        }

        let [left, right] = heights;
        if left != right {
            return Err(InvariantViolation::BlackHeightMismatch { left, right });
        }
        Ok(left + usize::from(!node.is_red()))
    }
}

#[cfg(test)]
mod tests {
    use super::super::{Color, Search};
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

    fn id_of(tree: &RawTree<i32, ()>, key: i32) -> NodeId {
        let Some(id) = tree.find(&key) else {
            panic!("key {key} is present")
        };
        id
    }

    #[rstest]
    fn test_empty_tree_is_valid() {
        let tree: RawTree<i32, ()> = RawTree::new();
        assert_eq!(tree.validate(), Ok(()));
    }

    #[rstest]
    fn test_detects_red_root() {
        let mut tree = build(&[1, 2, 3]);
        tree.paint(tree.root(), Color::Red);
        assert_eq!(tree.validate(), Err(InvariantViolation::RedRoot));
    }

    #[rstest]
    fn test_detects_consecutive_red() {
        let mut tree = build(&[2, 1, 3, 4]);
        let parent = id_of(&tree, 3);
        tree.paint(Some(parent), Color::Red);
        assert_eq!(tree.validate(), Err(InvariantViolation::ConsecutiveRed));
    }

    #[rstest]
    fn test_detects_black_height_mismatch() {
        let mut tree = build(&[2, 1, 3]);
        let left = id_of(&tree, 1);
        tree.paint(Some(left), Color::Black);
        assert_eq!(
            tree.validate(),
            Err(InvariantViolation::BlackHeightMismatch { left: 2, right: 1 })
        );
    }

    #[rstest]
    fn test_detects_out_of_order_keys() {
        let mut tree = build(&[2, 1, 3]);
        let left = id_of(&tree, 1);
        tree.replace_key(left, 5);
        assert_eq!(tree.validate(), Err(InvariantViolation::OutOfOrder));
    }

    #[rstest]
    fn test_detects_broken_parent_link() {
        let mut tree = build(&[2, 1, 3]);
        let left = id_of(&tree, 1);
        let right = id_of(&tree, 3);
        tree.node_mut(left).parent = Some(right);
        assert_eq!(tree.validate(), Err(InvariantViolation::BrokenParentLink));
    }

    #[rstest]
    fn test_detects_root_with_parent() {
        let mut tree = build(&[2, 1, 3]);
        let root = id_of(&tree, 2);
        tree.node_mut(root).parent = Some(root);
        assert_eq!(tree.validate(), Err(InvariantViolation::RootHasParent));
    }
}
