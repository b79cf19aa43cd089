//! Persistent CHAMP hash set.

use std::borrow::Borrow;
use std::fmt;
use std::hash::{BuildHasher, BuildHasherDefault, Hash, Hasher};
use std::ops;

use crate::builder::TrieSetBuilder;
use crate::error::TrieError;
use crate::hash::DefaultHashBuilder;
use crate::iter::{IntoIter, Iter};
use crate::ops::update::{Lenient, UpdateKind};
use crate::trie::Trie;

/// Persistent hash set based on a CHAMP trie.
///
/// Every operation returns a new set and leaves the receiver untouched;
/// untouched subtrees are shared between the two. The same keys always
/// produce the same trie shape regardless of insertion order.
///
/// ```
/// use champ_set::TrieSet;
///
/// let a: TrieSet<i32> = [1, 2, 3].into_iter().collect();
/// let b = a.remove(&2);
/// assert!(a.contains(&2));
/// assert!(!b.contains(&2));
/// assert_eq!(b.len(), 2);
/// ```
pub struct TrieSet<K, S = DefaultHashBuilder> {
    trie: Trie<K, (), S>,
}

// ---------------------------------------------------------------------------
// Construction & accessors — no trait bounds
// ---------------------------------------------------------------------------

impl<K> TrieSet<K> {
    /// Creates an empty set. Does not allocate.
    #[must_use]
    pub const fn new() -> Self {
        Self::with_hasher(BuildHasherDefault::new())
    }
}

impl<K, S> TrieSet<K, S> {
    /// Creates an empty set hashing keys with `hasher`.
    #[must_use]
    pub const fn with_hasher(hasher: S) -> Self {
        Self {
            trie: Trie::with_hasher(hasher),
        }
    }

    pub(crate) const fn from_trie(trie: Trie<K, (), S>) -> Self {
        Self { trie }
    }

    #[cfg(test)]
    pub(crate) const fn trie(&self) -> &Trie<K, (), S> {
        &self.trie
    }

    /// Returns the number of keys.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.trie.len()
    }

    /// Returns `true` if the set contains no keys.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.trie.len() == 0
    }

    /// Returns the set's hasher builder.
    #[must_use]
    pub const fn hasher(&self) -> &S {
        self.trie.hasher()
    }

    /// Returns a lazy iterator over the keys, in trie order.
    #[must_use]
    pub fn iter(&self) -> Iter<'_, K> {
        Iter {
            inner: self.trie.entries(),
        }
    }

    /// Returns `true` if both sets share the same root node.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        self.trie.ptr_eq(&other.trie)
    }
}

// ---------------------------------------------------------------------------
// Read operations — K: Hash + Eq
// ---------------------------------------------------------------------------

impl<K: Hash + Eq, S: BuildHasher> TrieSet<K, S> {
    /// Returns the stored key equal to `key`.
    #[must_use]
    pub fn find<Q>(&self, key: &Q) -> Option<&K>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.trie.get(key).map(|e| &e.key)
    }

    /// Returns `true` if the set contains `key`.
    #[must_use]
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.trie.contains(key)
    }

    /// Returns the stored key equal to `key`.
    ///
    /// # Errors
    ///
    /// [`TrieError::KeyNotFound`] if the key is absent.
    pub fn get_or_err<Q>(&self, key: &Q) -> Result<&K, TrieError>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.find(key).ok_or(TrieError::KeyNotFound)
    }

    /// Returns `true` if every key of `self` is in `other`.
    ///
    /// The empty set is a subset of every set.
    #[must_use]
    pub fn is_subset(&self, other: &Self) -> bool {
        self.is_empty() || (self.len() <= other.len() && self.iter().all(|k| other.contains(k)))
    }

    /// Returns `true` if `self` is a subset of `other` and `other` has more keys.
    ///
    /// The empty set is a proper subset of every non-empty set.
    #[must_use]
    pub fn is_proper_subset(&self, other: &Self) -> bool {
        if self.is_empty() {
            return !other.is_empty();
        }
        other.len() > self.len() && self.is_subset(other)
    }

    /// Returns `true` if every key of `other` is in `self`.
    ///
    /// Every set is a superset of the empty set.
    #[must_use]
    pub fn is_superset(&self, other: &Self) -> bool {
        other.is_subset(self)
    }

    /// Returns `true` if `self` is a superset of `other` and has more keys.
    ///
    /// The empty set is never a proper superset.
    #[must_use]
    pub fn is_proper_superset(&self, other: &Self) -> bool {
        if self.is_empty() {
            return false;
        }
        self.len() > other.len() && self.is_superset(other)
    }

    /// Returns `true` if the sets share at least one key.
    ///
    /// Always `false` when either set is empty.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        if self.is_empty() || other.is_empty() {
            return false;
        }
        let (small, large) = if self.len() <= other.len() {
            (self, other)
        } else {
            (other, self)
        };
        small.iter().any(|k| large.contains(k))
    }

    /// Returns `true` if both sets hold the same keys.
    #[must_use]
    pub fn set_equals(&self, other: &Self) -> bool {
        self.len() == other.len() && self.is_subset(other)
    }
}

impl<K: Hash, S> TrieSet<K, S> {
    /// Order-independent hash of the set's content.
    ///
    /// Independent of the set's hasher. Computed on first request and cached
    /// on this instance.
    #[must_use]
    pub fn content_hash(&self) -> u32 {
        self.trie.content_hash()
    }
}

// ---------------------------------------------------------------------------
// Write operations — K: Hash + Eq + Clone
// ---------------------------------------------------------------------------

impl<K, S> TrieSet<K, S>
where
    K: Hash + Eq + Clone,
    S: BuildHasher + Clone,
{
    /// Applies the update policy `kind` for `key`.
    ///
    /// # Errors
    ///
    /// [`TrieError::KeyAlreadyExists`] for [`UpdateKind::Add`] on a present
    /// key, [`TrieError::KeyNotFound`] for [`UpdateKind::SetItem`] on an
    /// absent key.
    pub fn update(&self, kind: UpdateKind, key: K) -> Result<Self, TrieError> {
        let (trie, _) = self.trie.update(kind, key, ())?;
        Ok(Self { trie })
    }

    /// Adds a key that must not be present.
    ///
    /// # Errors
    ///
    /// [`TrieError::KeyAlreadyExists`] if the key is present.
    pub fn add(&self, key: K) -> Result<Self, TrieError> {
        self.update(UpdateKind::Add, key)
    }

    /// Adds a key; a present key leaves the set unchanged.
    #[must_use]
    pub fn try_add(&self, key: K) -> Self {
        self.lenient(Lenient::TryAdd, key)
    }

    /// Adds a key, replacing an equal stored key.
    #[must_use]
    pub fn add_or_update(&self, key: K) -> Self {
        self.lenient(Lenient::AddOrUpdate, key)
    }

    /// Replaces a stored key that must be present.
    ///
    /// # Errors
    ///
    /// [`TrieError::KeyNotFound`] if the key is absent.
    pub fn set_item(&self, key: K) -> Result<Self, TrieError> {
        self.update(UpdateKind::SetItem, key)
    }

    /// Replaces a stored key; an absent key leaves the set unchanged.
    #[must_use]
    pub fn try_set_item(&self, key: K) -> Self {
        self.lenient(Lenient::TrySetItem, key)
    }

    fn lenient(&self, kind: Lenient, key: K) -> Self {
        let Ok((trie, _)) = self.trie.update(kind, key, ());
        Self { trie }
    }

    /// Removes a key; an absent key leaves the set unchanged.
    #[must_use]
    pub fn remove<Q>(&self, key: &Q) -> Self
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        Self {
            trie: self.trie.remove(key).0,
        }
    }

    /// Returns a builder seeded with this set's keys.
    ///
    /// Nodes shared with `self` are copied on first write.
    #[must_use]
    pub fn to_builder(&self) -> TrieSetBuilder<K, S> {
        TrieSetBuilder::from_trie(self.trie.clone())
    }

    fn empty_like(&self) -> TrieSetBuilder<K, S> {
        TrieSetBuilder::with_hasher(self.hasher().clone())
    }

    /// Keys in either set. Keys already in `self` are kept.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        if self.is_empty() {
            return other.clone();
        }
        self.union_iter(other.iter().cloned())
    }

    /// Adds every key of `keys` not already present.
    #[must_use]
    pub fn union_iter<I: IntoIterator<Item = K>>(&self, keys: I) -> Self {
        let mut builder = self.to_builder();
        builder.extend(keys);
        builder.build()
    }

    /// Keys in both sets, taken from `self`.
    #[must_use]
    pub fn intersection(&self, other: &Self) -> Self {
        let mut builder = self.empty_like();
        builder.extend(self.iter().filter(|k| other.contains(*k)).cloned());
        builder.build()
    }

    /// Keys of `self` not in `other`.
    #[must_use]
    pub fn difference(&self, other: &Self) -> Self {
        if other.len() < self.len() {
            let mut builder = self.to_builder();
            for key in other {
                builder.remove(key);
            }
            builder.build()
        } else {
            let mut builder = self.empty_like();
            builder.extend(self.iter().filter(|k| !other.contains(*k)).cloned());
            builder.build()
        }
    }

    /// Keys in exactly one of the two sets.
    #[must_use]
    pub fn symmetric_difference(&self, other: &Self) -> Self {
        let mut builder = self.to_builder();
        for key in other {
            if self.contains(key) {
                builder.remove(key);
            } else {
                builder.insert(key.clone());
            }
        }
        builder.build()
    }
}

impl<K, S> TrieSet<K, S>
where
    K: Hash + Eq + Clone,
    S: BuildHasher + Clone + Default,
{
    /// Creates a set holding one key.
    #[must_use]
    pub fn singleton(key: K) -> Self {
        Self::default().try_add(key)
    }
}

// ---------------------------------------------------------------------------
// Trait impls
// ---------------------------------------------------------------------------

impl<K, S: Clone> Clone for TrieSet<K, S> {
    fn clone(&self) -> Self {
        Self {
            trie: self.trie.clone(),
        }
    }
}

impl<K, S: Default> Default for TrieSet<K, S> {
    fn default() -> Self {
        Self::with_hasher(S::default())
    }
}

impl<K: fmt::Debug, S> fmt::Debug for TrieSet<K, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<K: Hash + Eq, S: BuildHasher> PartialEq for TrieSet<K, S> {
    fn eq(&self, other: &Self) -> bool {
        self.trie.eq_by(&other.trie, |_, _| true)
    }
}

impl<K: Hash + Eq, S: BuildHasher> Eq for TrieSet<K, S> {}

impl<K: Hash, S> Hash for TrieSet<K, S> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u32(self.content_hash());
    }
}

impl<K, Q, S> ops::Index<&Q> for TrieSet<K, S>
where
    K: Hash + Eq + Borrow<Q>,
    Q: Hash + Eq + ?Sized,
    S: BuildHasher,
{
    type Output = K;

    fn index(&self, key: &Q) -> &K {
        self.find(key).expect("key not found")
    }
}

impl<K, S> FromIterator<K> for TrieSet<K, S>
where
    K: Hash + Eq + Clone,
    S: BuildHasher + Clone + Default,
{
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut builder = TrieSetBuilder::with_hasher(S::default());
        builder.extend(iter);
        builder.build()
    }
}

impl<K, S> Extend<K> for TrieSet<K, S>
where
    K: Hash + Eq + Clone,
    S: BuildHasher + Clone,
{
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        *self = self.union_iter(iter);
    }
}

impl<'a, K, S> IntoIterator for &'a TrieSet<K, S> {
    type Item = &'a K;
    type IntoIter = Iter<'a, K>;

    fn into_iter(self) -> Iter<'a, K> {
        self.iter()
    }
}

impl<K: Clone, S> IntoIterator for TrieSet<K, S> {
    type Item = K;
    type IntoIter = IntoIter<K>;

    fn into_iter(self) -> IntoIter<K> {
        IntoIter {
            inner: self.trie.into_entries(),
        }
    }
}
