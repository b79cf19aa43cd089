//! Key hashing and order-independent content hashing.
//!
//! The trie slices a 32-bit hash. Hasher output is 64-bit, so it is folded
//! once per key. The content hash of a whole trie is
//! `φ(S) = fnv(Σ f(k, v), |S|)`: an additive `AdHash` over entries using
//! wrapping arithmetic, finished with FNV-1a so that the entry count is
//! mixed in. Two mixing seeds prevent degeneration when `hash(v)` is constant.

use std::collections::hash_map::DefaultHasher;
use std::hash::{BuildHasher, BuildHasherDefault, Hash};

/// Deterministic hasher builder used when none is supplied.
pub type DefaultHashBuilder = BuildHasherDefault<DefaultHasher>;

/// First mixing seed (golden ratio constant).
const SEED_1: u32 = 0x9E37_79B9;

/// Second mixing seed (odd murmur3 finalizer constant).
const SEED_2: u32 = 0x85EB_CA6B;

const FNV_OFFSET_BASIS: u32 = 0x811C_9DC5;
const FNV_PRIME: u32 = 0x0100_0193;

/// Computes the 32-bit trie hash of a value with the given builder.
#[must_use]
pub fn hash_one<S: BuildHasher, T: Hash + ?Sized>(builder: &S, value: &T) -> u32 {
    fold(builder.hash_one(value))
}

/// Folds a 64-bit hash into 32 bits, keeping entropy from both halves.
#[inline]
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub const fn fold(hash: u64) -> u32 {
    (hash ^ (hash >> 32)) as u32
}

/// Computes the `AdHash` contribution of a single entry.
///
/// `f(k, v) = key_hash · SEED₁ ⊕ value_hash · SEED₂`
#[inline]
#[must_use]
pub const fn entry_adhash(key_hash: u32, value_hash: u32) -> u32 {
    key_hash.wrapping_mul(SEED_1) ^ value_hash.wrapping_mul(SEED_2)
}

/// Feeds `bytes` into an FNV-1a 32 state.
#[must_use]
pub fn fnv1a(state: u32, bytes: &[u8]) -> u32 {
    bytes
        .iter()
        .fold(state, |h, &b| (h ^ u32::from(b)).wrapping_mul(FNV_PRIME))
}

/// Finishes a content hash from the additive sum and the entry count.
#[must_use]
pub fn finish(sum: u32, len: usize) -> u32 {
    let h = fnv1a(FNV_OFFSET_BASIS, &sum.to_le_bytes());
    fnv1a(h, &(len as u64).to_le_bytes())
}
