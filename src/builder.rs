//! Transient builders for bulk construction.
//!
//! A builder owns its trie outright and writes nodes in place. Nodes it still
//! shares with a published set or map (after [`TrieSet::to_builder`]) are
//! copied on first write, so published values never observe a change.

use std::borrow::Borrow;
use std::fmt;
use std::hash::{BuildHasher, BuildHasherDefault, Hash};

use crate::error::TrieError;
use crate::hash::DefaultHashBuilder;
use crate::map::TrieMap;
use crate::ops::update::{Lenient, UpdateKind, UpdateOutcome};
use crate::set::TrieSet;
use crate::trie::Trie;

// ---------------------------------------------------------------------------
// Set builder
// ---------------------------------------------------------------------------

/// Mutable builder producing a [`TrieSet`].
pub struct TrieSetBuilder<K, S = DefaultHashBuilder> {
    trie: Trie<K, (), S>,
}

impl<K> TrieSetBuilder<K> {
    /// Creates an empty builder.
    #[must_use]
    pub const fn new() -> Self {
        Self::with_hasher(BuildHasherDefault::new())
    }
}

impl<K, S> TrieSetBuilder<K, S> {
    /// Creates an empty builder hashing keys with `hasher`.
    #[must_use]
    pub const fn with_hasher(hasher: S) -> Self {
        Self {
            trie: Trie::with_hasher(hasher),
        }
    }

    pub(crate) const fn from_trie(trie: Trie<K, (), S>) -> Self {
        Self { trie }
    }

    /// Returns the number of keys added so far.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.trie.len()
    }

    /// Returns `true` if no keys have been added.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.trie.len() == 0
    }

    /// Finishes the build.
    #[must_use]
    pub fn build(self) -> TrieSet<K, S> {
        tracing::trace!(len = self.trie.len(), "set build finished");
        TrieSet::from_trie(self.trie)
    }
}

impl<K, S> TrieSetBuilder<K, S>
where
    K: Hash + Eq + Clone,
    S: BuildHasher,
{
    /// Returns `true` if the builder holds `key`.
    #[must_use]
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.trie.contains(key)
    }

    /// Adds `key` unless present. Returns `true` if it was added.
    pub fn insert(&mut self, key: K) -> bool {
        // Checked first so that a present key copies no shared node.
        if self.trie.contains(&key) {
            return false;
        }
        let Ok(outcome) = self.trie.update_mut(Lenient::TryAdd, key, ());
        matches!(outcome, UpdateOutcome::Inserted)
    }

    /// Adds a key that must not be present.
    ///
    /// # Errors
    ///
    /// [`TrieError::KeyAlreadyExists`] if the key is present; the builder is
    /// unchanged.
    pub fn add(&mut self, key: K) -> Result<(), TrieError> {
        self.trie.update_mut(UpdateKind::Add, key, ()).map(|_| ())
    }

    /// Removes `key`. Returns `true` if it was present.
    pub fn remove<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.trie.contains(key) && self.trie.remove_mut(key).is_some()
    }
}

impl<K, S: Default> Default for TrieSetBuilder<K, S> {
    fn default() -> Self {
        Self::with_hasher(S::default())
    }
}

impl<K, S> Extend<K> for TrieSetBuilder<K, S>
where
    K: Hash + Eq + Clone,
    S: BuildHasher,
{
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key);
        }
    }
}

impl<K, S> fmt::Debug for TrieSetBuilder<K, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TrieSetBuilder")
            .field("len", &self.trie.len())
            .finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// Map builder
// ---------------------------------------------------------------------------

/// Mutable builder producing a [`TrieMap`].
pub struct TrieMapBuilder<K, V, S = DefaultHashBuilder> {
    trie: Trie<K, V, S>,
}

impl<K, V> TrieMapBuilder<K, V> {
    /// Creates an empty builder.
    #[must_use]
    pub const fn new() -> Self {
        Self::with_hasher(BuildHasherDefault::new())
    }
}

impl<K, V, S> TrieMapBuilder<K, V, S> {
    /// Creates an empty builder hashing keys with `hasher`.
    #[must_use]
    pub const fn with_hasher(hasher: S) -> Self {
        Self {
            trie: Trie::with_hasher(hasher),
        }
    }

    pub(crate) const fn from_trie(trie: Trie<K, V, S>) -> Self {
        Self { trie }
    }

    /// Returns the number of entries added so far.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.trie.len()
    }

    /// Returns `true` if no entries have been added.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.trie.len() == 0
    }

    /// Finishes the build.
    #[must_use]
    pub fn build(self) -> TrieMap<K, V, S> {
        tracing::trace!(len = self.trie.len(), "map build finished");
        TrieMap::from_trie(self.trie)
    }
}

impl<K, V, S> TrieMapBuilder<K, V, S>
where
    K: Hash + Eq + Clone,
    V: Clone,
    S: BuildHasher,
{
    /// Returns the value stored for `key`.
    #[must_use]
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.trie.get(key).map(|e| &e.value)
    }

    /// Inserts or overwrites an entry. Returns the previous value.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        let Ok(outcome) = self.trie.update_mut(Lenient::AddOrUpdate, key, value);
        outcome.into_previous()
    }

    /// Inserts an entry unless the key is present. Returns `true` if inserted.
    pub fn try_insert(&mut self, key: K, value: V) -> bool {
        if self.trie.contains(&key) {
            return false;
        }
        let Ok(outcome) = self.trie.update_mut(Lenient::TryAdd, key, value);
        matches!(outcome, UpdateOutcome::Inserted)
    }

    /// Applies the update policy `kind`, returning what happened.
    ///
    /// # Errors
    ///
    /// As for [`TrieMap::update`]; the builder is unchanged on error.
    pub fn update(
        &mut self,
        kind: UpdateKind,
        key: K,
        value: V,
    ) -> Result<UpdateOutcome<K, V>, TrieError> {
        self.trie.update_mut(kind, key, value)
    }

    /// Removes `key`. Returns the removed value.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        if !self.trie.contains(key) {
            return None;
        }
        self.trie.remove_mut(key).map(|e| e.value)
    }
}

impl<K, V, S: Default> Default for TrieMapBuilder<K, V, S> {
    fn default() -> Self {
        Self::with_hasher(S::default())
    }
}

impl<K, V, S> Extend<(K, V)> for TrieMapBuilder<K, V, S>
where
    K: Hash + Eq + Clone,
    V: Clone,
    S: BuildHasher,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K, V, S> fmt::Debug for TrieMapBuilder<K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TrieMapBuilder")
            .field("len", &self.trie.len())
            .finish_non_exhaustive()
    }
}
