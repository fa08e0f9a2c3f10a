//! Error types returned by the collections.

use std::fmt;

use crate::map::OccupiedEntry;

// =============================================================================
// OccupiedError
// =============================================================================

/// Error returned by [`RbTreeMap::try_insert`](crate::RbTreeMap::try_insert)
/// when the key is already present.
///
/// Carries the entry for the existing key and the value that was not
/// inserted, so neither is lost.
///
/// # Examples
///
/// ```rust
/// use redblack::RbTreeMap;
///
/// let mut map = RbTreeMap::new();
/// map.insert(1, "one");
///
/// let error = map.try_insert(1, "uno").unwrap_err();
/// assert_eq!(error.entry.get(), &"one");
/// assert_eq!(error.value, "uno");
/// ```
pub struct OccupiedError<'a, K, V> {
    /// The entry already holding the key.
    pub entry: OccupiedEntry<'a, K, V>,
    /// The value that was rejected.
    pub value: V,
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for OccupiedError<'_, K, V> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("OccupiedError")
            .field("key", self.entry.key())
            .field("old_value", self.entry.get())
            .field("new_value", &self.value)
            .finish()
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Display for OccupiedError<'_, K, V> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            formatter,
            "failed to insert {:?}, key {:?} already exists with value {:?}",
            self.value,
            self.entry.key(),
            self.entry.get()
        )
    }
}

impl<K: fmt::Debug, V: fmt::Debug> std::error::Error for OccupiedError<'_, K, V> {}

// =============================================================================
// InvariantViolation
// =============================================================================

/// A broken red-black tree invariant found by `validate`.
///
/// The public API never produces a tree that fails validation; the check
/// exists for tests and for diagnosing inconsistent [`Ord`] implementations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvariantViolation {
    /// The root node is red.
    RedRoot,
    /// The root node records a parent.
    RootHasParent,
    /// A child link points at an empty arena slot.
    DanglingLink,
    /// A child does not point back at its parent.
    BrokenParentLink,
    /// A red node has a red child.
    ConsecutiveRed,
    /// Two sibling subtrees have different black heights.
    BlackHeightMismatch {
        /// Black height of the left subtree.
        left: usize,
        /// Black height of the right subtree.
        right: usize,
    },
    /// In-order traversal is not strictly ascending.
    OutOfOrder,
    /// The number of reachable nodes differs from the stored element count.
    LengthMismatch {
        /// Nodes reachable from the root.
        reachable: usize,
        /// Elements held by the arena.
        stored: usize,
    },
}

impl fmt::Display for InvariantViolation {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RedRoot => write!(formatter, "root node is red"),
            Self::RootHasParent => write!(formatter, "root node has a parent link"),
            Self::DanglingLink => write!(formatter, "child link points at a freed node"),
            Self::BrokenParentLink => {
                write!(formatter, "child does not link back to its parent")
            }
            Self::ConsecutiveRed => write!(formatter, "red node has a red child"),
            Self::BlackHeightMismatch { left, right } => write!(
                formatter,
                "black height mismatch: left subtree {left}, right subtree {right}"
            ),
            Self::OutOfOrder => write!(formatter, "keys are not in ascending order"),
            Self::LengthMismatch { reachable, stored } => write!(
                formatter,
                "{reachable} nodes reachable from the root but {stored} stored"
            ),
        }
    }
}

impl std::error::Error for InvariantViolation {}
