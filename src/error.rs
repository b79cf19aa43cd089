//! Errors raised by strict trie operations.

use thiserror::Error;

/// Failure of a strict operation. The trie it was called on is unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum TrieError {
    /// A strict add found the key already present.
    #[error("key already exists")]
    KeyAlreadyExists,
    /// A strict set or lookup did not find the key.
    #[error("key not found")]
    KeyNotFound,
}
