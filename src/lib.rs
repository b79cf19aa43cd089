//! Persistent hash set and map based on CHAMP.
//!
//! CHAMP (Compressed Hash-Array Mapped Prefix-tree) is a refined HAMT that
//! guarantees **canonical form**: the same set of keys always produces the
//! same trie structure, regardless of insertion or removal order.
//!
//! # Key properties
//!
//! - **Canonical form**: same contents = same structure
//! - **Structural sharing**: every update copies only the path from the
//!   changed leaf to the root; untouched subtrees are shared through [`Arc`]
//! - **Thread-safe reads**: published values are never written, so they
//!   are `Send + Sync` whenever the keys are
//! - **Set algebra**: union, intersection, difference, symmetric difference
//!   and the subset/superset family
//! - **Zero `unsafe`**: enforced by `#![forbid(unsafe_code)]`
//!
//! # Trie layout
//!
//! Keys are hashed once to 32 bits and sliced 5 bits per level (32-way
//! fan-out). A branch node packs its direct entries and its child nodes into
//! two dense arrays indexed by two disjoint bitmaps. Keys that still share a
//! slot once the last level (bit offset 25) is reached go into a collision
//! bucket.
//!
//! ```
//! use champ_set::{TrieError, TrieSet};
//!
//! let set = TrieSet::new().try_add(1).try_add(2).try_add(3);
//! assert_eq!(set.find(&2), Some(&2));
//! assert_eq!(set.add(2).unwrap_err(), TrieError::KeyAlreadyExists);
//!
//! let other: TrieSet<i32> = [2, 3, 4].into_iter().collect();
//! let both: TrieSet<i32> = [2, 3].into_iter().collect();
//! assert_eq!(set.intersection(&other), both);
//! ```
//!
//! # References
//!
//! - Steindorfer & Vinju, 2015, "Optimizing Hash-Array Mapped Tries
//!   for Fast and Lean Immutable JVM Collections", OOPSLA 2015
//! - Bagwell, 2001, "Ideal Hash Trees"
//!
//! [`Arc`]: std::sync::Arc

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![allow(clippy::module_name_repetitions)]

pub mod hash;
pub mod iter;
pub mod node;

mod builder;
mod error;
mod map;
mod ops;
mod set;
mod trie;

#[cfg(test)]
mod tests;

pub use builder::{TrieMapBuilder, TrieSetBuilder};
pub use error::TrieError;
pub use hash::DefaultHashBuilder;
pub use map::TrieMap;
pub use ops::update::{UpdateKind, UpdateOutcome};
pub use set::TrieSet;
