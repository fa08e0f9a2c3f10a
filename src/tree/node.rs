//! Node layout of the arena-backed red-black tree.

// =============================================================================
// Identifiers and Colors
// =============================================================================

/// Slot index of a node inside the arena.
///
/// A node keeps its index from insertion until removal. Rotations and
/// deletions relink indices; they never move a key or value to another slot.
pub(crate) type NodeId = usize;

/// The color of a Red-Black Tree node.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(crate) enum Color {
    Red,
    Black,
}

/// Which child of a node an operation is looking at.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(crate) enum Side {
    Left,
    Right,
}

impl Side {
    /// Returns the mirrored side.
    #[inline]
    pub(crate) const fn opposite(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    #[inline]
    const fn index(self) -> usize {
        match self {
            Self::Left => 0,
            Self::Right => 1,
        }
    }
}

/// Where a new node will hang below an existing one.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(crate) struct AttachPoint {
    pub(crate) parent: NodeId,
    pub(crate) side: Side,
}

// =============================================================================
// Node Definition
// =============================================================================

/// Internal node structure for the Red-Black Tree.
///
/// Children are stored as a two-element array indexed by [`Side`] so that
/// every rebalancing case is written once and mirrored through
/// [`Side::opposite`].
#[derive(Clone, Debug)]
pub(crate) struct Node<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,
    pub(crate) color: Color,
    pub(crate) parent: Option<NodeId>,
    children: [Option<NodeId>; 2],
}

impl<K, V> Node<K, V> {
    /// Creates a new red leaf hanging below `parent`.
    pub(crate) const fn new_red(key: K, value: V, parent: Option<NodeId>) -> Self {
        Self {
            key,
            value,
            color: Color::Red,
            parent,
            children: [None, None],
        }
    }

    #[inline]
    pub(crate) const fn child(&self, side: Side) -> Option<NodeId> {
        self.children[side.index()]
    }

    #[inline]
    pub(crate) const fn set_child(&mut self, side: Side, child: Option<NodeId>) {
        self.children[side.index()] = child;
    }

    /// Checks if this node is red.
    #[inline]
    pub(crate) fn is_red(&self) -> bool {
        self.color == Color::Red
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
    #[case(Side::Left, Side::Right)]
    #[case(Side::Right, Side::Left)]
    fn test_side_opposite(#[case] side: Side, #[case] expected: Side) {
        assert_eq!(side.opposite(), expected);
        assert_eq!(side.opposite().opposite(), side);
    }

    #[rstest]
    fn test_new_node_is_red_leaf() {
        let node = Node::new_red(1, "one", Some(7));
        assert!(node.is_red());
        assert_eq!(node.parent, Some(7));
        assert_eq!(node.child(Side::Left), None);
        assert_eq!(node.child(Side::Right), None);
    }

    #[rstest]
    fn test_set_child_targets_one_side() {
        let mut node = Node::new_red(1, (), None);
        node.set_child(Side::Right, Some(3));
        assert_eq!(node.child(Side::Left), None);
        assert_eq!(node.child(Side::Right), Some(3));
    }
}
