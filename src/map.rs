//! Persistent CHAMP hash map.

use std::borrow::Borrow;
use std::fmt;
use std::hash::{BuildHasher, BuildHasherDefault, Hash, Hasher};
use std::ops;

use crate::builder::TrieMapBuilder;
use crate::error::TrieError;
use crate::hash::DefaultHashBuilder;
use crate::iter::{MapIntoIter, MapIter};
use crate::ops::update::{Lenient, UpdateKind};
use crate::trie::Trie;

/// Persistent hash map based on a CHAMP trie.
///
/// Shares the trie of [`TrieSet`](crate::TrieSet), with a value stored next
/// to every key. Same set of key-value pairs always produces the same trie
/// structure (canonical form).
pub struct TrieMap<K, V, S = DefaultHashBuilder> {
    trie: Trie<K, V, S>,
}

// ---------------------------------------------------------------------------
// Construction & accessors — no trait bounds
// ---------------------------------------------------------------------------

impl<K, V> TrieMap<K, V> {
    /// Creates an empty map. Does not allocate.
    #[must_use]
    pub const fn new() -> Self {
        Self::with_hasher(BuildHasherDefault::new())
    }
}

impl<K, V, S> TrieMap<K, V, S> {
    /// Creates an empty map hashing keys with `hasher`.
    #[must_use]
    pub const fn with_hasher(hasher: S) -> Self {
        Self {
            trie: Trie::with_hasher(hasher),
        }
    }

    pub(crate) const fn from_trie(trie: Trie<K, V, S>) -> Self {
        Self { trie }
    }

    /// Returns the number of key-value pairs.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.trie.len()
    }

    /// Returns `true` if the map contains no entries.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.trie.len() == 0
    }

    /// Returns the map's hasher builder.
    #[must_use]
    pub const fn hasher(&self) -> &S {
        self.trie.hasher()
    }

    /// Returns an iterator over `(&K, &V)` pairs.
    #[must_use]
    pub fn iter(&self) -> MapIter<'_, K, V> {
        MapIter {
            inner: self.trie.entries(),
        }
    }

    /// Returns an iterator over the keys.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.iter().map(|(k, _)| k)
    }

    /// Returns an iterator over the values.
    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.iter().map(|(_, v)| v)
    }
}

// ---------------------------------------------------------------------------
// Read operations — K: Hash + Eq
// ---------------------------------------------------------------------------

impl<K: Hash + Eq, V, S: BuildHasher> TrieMap<K, V, S> {
    /// Returns a reference to the value associated with `key`.
    #[must_use]
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.trie.get(key).map(|e| &e.value)
    }

    /// Returns the stored key and its value.
    #[must_use]
    pub fn get_key_value<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.trie.get(key).map(|e| (&e.key, &e.value))
    }

    /// Returns the value associated with `key`.
    ///
    /// # Errors
    ///
    /// [`TrieError::KeyNotFound`] if the key is absent.
    pub fn get_or_err<Q>(&self, key: &Q) -> Result<&V, TrieError>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.get(key).ok_or(TrieError::KeyNotFound)
    }

    /// Returns `true` if the map contains the given key.
    #[must_use]
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.trie.contains(key)
    }
}

impl<K: Hash, V: Hash, S> TrieMap<K, V, S> {
    /// Order-independent hash over keys and values, cached on first request.
    ///
    /// Independent of the map's hasher.
    #[must_use]
    pub fn content_hash(&self) -> u32 {
        self.trie.content_hash()
    }
}

// ---------------------------------------------------------------------------
// Write operations — K: Hash + Eq + Clone, V: Clone
// ---------------------------------------------------------------------------

impl<K, V, S> TrieMap<K, V, S>
where
    K: Hash + Eq + Clone,
    V: Clone,
    S: BuildHasher + Clone,
{
    /// Applies the update policy `kind` for `key`, returning the new map and
    /// the previous value if one was overwritten.
    ///
    /// # Errors
    ///
    /// [`TrieError::KeyAlreadyExists`] for [`UpdateKind::Add`] on a present
    /// key, [`TrieError::KeyNotFound`] for [`UpdateKind::SetItem`] on an
    /// absent key.
    pub fn update(
        &self,
        kind: UpdateKind,
        key: K,
        value: V,
    ) -> Result<(Self, Option<V>), TrieError> {
        let (trie, outcome) = self.trie.update(kind, key, value)?;
        Ok((Self { trie }, outcome.into_previous()))
    }

    fn lenient(&self, kind: Lenient, key: K, value: V) -> (Self, Option<V>) {
        let Ok((trie, outcome)) = self.trie.update(kind, key, value);
        (Self { trie }, outcome.into_previous())
    }

    /// Adds an entry whose key must not be present.
    ///
    /// # Errors
    ///
    /// [`TrieError::KeyAlreadyExists`] if the key is present.
    pub fn add(&self, key: K, value: V) -> Result<Self, TrieError> {
        self.update(UpdateKind::Add, key, value).map(|(map, _)| map)
    }

    /// Adds an entry; a present key keeps its value.
    #[must_use]
    pub fn try_add(&self, key: K, value: V) -> Self {
        self.lenient(Lenient::TryAdd, key, value).0
    }

    /// Adds an entry or overwrites the value of a present key.
    #[must_use]
    pub fn insert(&self, key: K, value: V) -> Self {
        self.insert_entry(key, value).0
    }

    /// Adds an entry or overwrites the value of a present key, returning the
    /// new map and the previous value.
    #[must_use]
    pub fn insert_entry(&self, key: K, value: V) -> (Self, Option<V>) {
        self.lenient(Lenient::AddOrUpdate, key, value)
    }

    /// Overwrites the value of a key that must be present.
    ///
    /// # Errors
    ///
    /// [`TrieError::KeyNotFound`] if the key is absent.
    pub fn set_item(&self, key: K, value: V) -> Result<Self, TrieError> {
        self.update(UpdateKind::SetItem, key, value).map(|(map, _)| map)
    }

    /// Overwrites the value of a present key; an absent key is ignored.
    #[must_use]
    pub fn try_set_item(&self, key: K, value: V) -> Self {
        self.lenient(Lenient::TrySetItem, key, value).0
    }

    /// Removes a key; an absent key leaves the map unchanged.
    #[must_use]
    pub fn remove<Q>(&self, key: &Q) -> Self
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.remove_entry(key).0
    }

    /// Removes a key, returning the new map and the removed value.
    #[must_use]
    pub fn remove_entry<Q>(&self, key: &Q) -> (Self, Option<V>)
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let (trie, removed) = self.trie.remove(key);
        (Self { trie }, removed.map(|e| e.value))
    }

    /// Returns a builder seeded with this map's entries.
    #[must_use]
    pub fn to_builder(&self) -> TrieMapBuilder<K, V, S> {
        TrieMapBuilder::from_trie(self.trie.clone())
    }

    /// Entries of both maps; for keys in both, the value in `self` wins.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        if self.is_empty() {
            return other.clone();
        }
        let mut builder = self.to_builder();
        for (key, value) in other {
            builder.try_insert(key.clone(), value.clone());
        }
        builder.build()
    }
}

// ---------------------------------------------------------------------------
// Trait impls
// ---------------------------------------------------------------------------

impl<K, V, S: Clone> Clone for TrieMap<K, V, S> {
    fn clone(&self) -> Self {
        Self {
            trie: self.trie.clone(),
        }
    }
}

impl<K, V, S: Default> Default for TrieMap<K, V, S> {
    fn default() -> Self {
        Self::with_hasher(S::default())
    }
}

impl<K: fmt::Debug, V: fmt::Debug, S> fmt::Debug for TrieMap<K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K: Hash + Eq, V: PartialEq, S: BuildHasher> PartialEq for TrieMap<K, V, S> {
    fn eq(&self, other: &Self) -> bool {
        self.trie.eq_by(&other.trie, V::eq)
    }
}

impl<K: Hash + Eq, V: Eq, S: BuildHasher> Eq for TrieMap<K, V, S> {}

impl<K: Hash, V: Hash, S> Hash for TrieMap<K, V, S> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u32(self.content_hash());
    }
}

impl<K, Q, V, S> ops::Index<&Q> for TrieMap<K, V, S>
where
    K: Hash + Eq + Borrow<Q>,
    Q: Hash + Eq + ?Sized,
    S: BuildHasher,
{
    type Output = V;

    fn index(&self, key: &Q) -> &V {
        self.get(key).expect("key not found")
    }
}

impl<K, V, S> FromIterator<(K, V)> for TrieMap<K, V, S>
where
    K: Hash + Eq + Clone,
    V: Clone,
    S: BuildHasher + Clone + Default,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut builder = TrieMapBuilder::with_hasher(S::default());
        builder.extend(iter);
        builder.build()
    }
}

impl<K, V, S> Extend<(K, V)> for TrieMap<K, V, S>
where
    K: Hash + Eq + Clone,
    V: Clone,
    S: BuildHasher + Clone,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        let mut builder = self.to_builder();
        builder.extend(iter);
        *self = builder.build();
    }
}

impl<'a, K, V, S> IntoIterator for &'a TrieMap<K, V, S> {
    type Item = (&'a K, &'a V);
    type IntoIter = MapIter<'a, K, V>;

    fn into_iter(self) -> MapIter<'a, K, V> {
        self.iter()
    }
}

impl<K: Clone, V: Clone, S> IntoIterator for TrieMap<K, V, S> {
    type Item = (K, V);
    type IntoIter = MapIntoIter<K, V>;

    fn into_iter(self) -> MapIntoIter<K, V> {
        MapIntoIter {
            inner: self.trie.into_entries(),
        }
    }
}
