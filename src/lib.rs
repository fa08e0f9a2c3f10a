//! # redblack
//!
//! Ordered map and set collections backed by a mutable red-black tree.
//!
//! ## Overview
//!
//! - **[`RbTreeMap`]**: an ordered key-value map with an entry API, range
//!   queries, double-ended iterators and filtered draining
//! - **[`RbTreeSet`]**: an ordered set with lazy union, intersection,
//!   difference and symmetric difference
//!
//! Nodes live in an index arena and link to their parent and children by
//! slot index, so the crate needs no `unsafe` code. Insertion and removal
//! rebalance in place with at most three rotations.
//!
//! ## Feature Flags
//!
//! - `serde`: `Serialize`/`Deserialize` for both collections
//! - `tracing`: `trace`-level events from rebalancing and drain-filter passes
//! - `full`: Enable all features
//!
//! ## Example
//!
//! ```rust
//! use redblack::prelude::*;
//!
//! let mut inventory = RbTreeMap::new();
//! inventory.insert("apple", 3);
//! inventory.insert("pear", 0);
//! inventory.insert("fig", 7);
//!
//! // Remove sold-out items while iterating in key order
//! let sold_out: Vec<&str> = inventory
//!     .drain_filter(|_, count| *count == 0)
//!     .map(|(name, _)| name)
//!     .collect();
//! assert_eq!(sold_out, vec!["pear"]);
//!
//! let names: RbTreeSet<&str> = inventory.keys().copied().collect();
//! let wanted = RbTreeSet::from(["fig", "kiwi"]);
//! assert_eq!((&names & &wanted).into_iter().collect::<Vec<_>>(), vec!["fig"]);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
// Note: Disabling redundant_closure_for_method_calls due to clippy 0.1.92 panic bug
#![allow(clippy::redundant_closure_for_method_calls)]

/// Prelude module for convenient imports.
///
/// Re-exports the collections and their entry type.
///
/// # Usage
///
/// ```rust
/// use redblack::prelude::*;
/// ```
pub mod prelude {
    pub use crate::map::{Entry, RbTreeMap};
    pub use crate::set::RbTreeSet;
}

pub mod map;
pub mod set;

mod error;
mod trace;
mod tree;

pub use error::{InvariantViolation, OccupiedError};
pub use map::{Entry, RbTreeMap};
pub use set::RbTreeSet;
