//! Recursive trie operations.

pub mod get;
pub mod remove;
pub mod update;
