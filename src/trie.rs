//! Shared trie core behind [`TrieSet`](crate::TrieSet) and
//! [`TrieMap`](crate::TrieMap).

use std::borrow::Borrow;
use std::hash::{BuildHasher, Hash};
use std::sync::{Arc, OnceLock};

use crate::hash::{self, DefaultHashBuilder};
use crate::iter::{Entries, IntoEntries};
use crate::node::{Entry, Node, Section};
use crate::ops::get::get_recursive;
use crate::ops::remove::remove_recursive;
use crate::ops::update::{Policy, UpdateOutcome, update_recursive};

/// Root handle, entry count, hasher and memoized content hash.
///
/// `root == None` is the canonical empty trie. The `*_mut` operations write
/// through [`Arc::make_mut`] and are only reachable from builders and from
/// fresh clones made by the persistent operations, so nodes reachable from a
/// published trie are never written.
pub(crate) struct Trie<K, V, S> {
    root: Option<Arc<Node<K, V>>>,
    size: usize,
    hasher: S,
    content_hash: OnceLock<u32>,
}

// ---------------------------------------------------------------------------
// Construction & accessors — no trait bounds
// ---------------------------------------------------------------------------

impl<K, V, S> Trie<K, V, S> {
    pub(crate) const fn with_hasher(hasher: S) -> Self {
        Self {
            root: None,
            size: 0,
            hasher,
            content_hash: OnceLock::new(),
        }
    }

    pub(crate) const fn len(&self) -> usize {
        self.size
    }

    pub(crate) const fn hasher(&self) -> &S {
        &self.hasher
    }

    pub(crate) fn root(&self) -> Option<&Node<K, V>> {
        self.root.as_deref()
    }

    /// Returns `true` if both tries share the same root (or are both empty).
    pub(crate) fn ptr_eq(&self, other: &Self) -> bool {
        match (&self.root, &other.root) {
            (None, None) => true,
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }

    pub(crate) fn entries(&self) -> Entries<'_, K, V> {
        Entries::new(self.root(), self.size)
    }

    pub(crate) fn into_entries(self) -> IntoEntries<K, V> {
        IntoEntries::new(self.root, self.size)
    }
}

// ---------------------------------------------------------------------------
// Read operations — K: Hash + Eq
// ---------------------------------------------------------------------------

impl<K: Hash + Eq, V, S: BuildHasher> Trie<K, V, S> {
    pub(crate) fn hash_key<Q: Hash + ?Sized>(&self, key: &Q) -> u32 {
        hash::hash_one(&self.hasher, key)
    }

    pub(crate) fn get<Q>(&self, key: &Q) -> Option<&Entry<K, V>>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let root = self.root()?;
        get_recursive(root, self.hash_key(key), key, Section::ROOT)
    }

    pub(crate) fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.get(key).is_some()
    }

    /// Structural equality over entries compared with `eq_value`.
    ///
    /// Enumeration sequences are compared pairwise first. They can diverge for
    /// equal contents when collision buckets were filled in different orders
    /// or the hashers disagree, in which case membership decides.
    pub(crate) fn eq_by<F>(&self, other: &Self, mut eq_value: F) -> bool
    where
        F: FnMut(&V, &V) -> bool,
    {
        if self.size != other.size {
            return false;
        }
        if self.ptr_eq(other) {
            return true;
        }
        let same_sequence = self
            .entries()
            .zip(other.entries())
            .all(|(a, b)| a.hash == b.hash && a.key == b.key && eq_value(&a.value, &b.value));
        same_sequence
            || self.entries().all(|a| {
                other
                    .get(&a.key)
                    .is_some_and(|b| eq_value(&a.value, &b.value))
            })
    }
}

impl<K: Hash, V: Hash, S> Trie<K, V, S> {
    /// Order-independent hash of the whole content, computed once.
    ///
    /// Entries are rehashed with [`DefaultHashBuilder`], never with `S`, so
    /// equal contents hash alike even under per-instance hasher state.
    pub(crate) fn content_hash(&self) -> u32 {
        *self.content_hash.get_or_init(|| {
            let builder = DefaultHashBuilder::default();
            let sum = self.entries().fold(0_u32, |acc, e| {
                let key_hash = hash::hash_one(&builder, &e.key);
                let value_hash = hash::hash_one(&builder, &e.value);
                acc.wrapping_add(hash::entry_adhash(key_hash, value_hash))
            });
            hash::finish(sum, self.size)
        })
    }
}

// ---------------------------------------------------------------------------
// Write operations — K: Hash + Eq + Clone, V: Clone
// ---------------------------------------------------------------------------

impl<K, V, S> Trie<K, V, S>
where
    K: Hash + Eq + Clone,
    V: Clone,
    S: BuildHasher,
{
    /// Applies `kind` in place.
    pub(crate) fn update_mut<P: Policy>(
        &mut self,
        kind: P,
        key: K,
        value: V,
    ) -> Result<UpdateOutcome<K, V>, P::Error> {
        let hash = self.hash_key(&key);
        let entry = Entry { hash, key, value };
        let root = self.root.get_or_insert_with(|| Arc::new(Node::Empty));
        let result = update_recursive(Arc::make_mut(root), kind, entry, Section::ROOT);
        let vacant = root.is_empty();
        if vacant {
            self.root = None;
        }

        let outcome = result.inspect_err(|err| {
            tracing::debug!(?kind, error = %err, "strict update rejected");
        })?;
        if !matches!(outcome, UpdateOutcome::Unchanged) {
            self.size += outcome.count_delta();
            self.content_hash = OnceLock::new();
        }
        Ok(outcome)
    }

    /// Removes `key` in place, returning the removed entry.
    pub(crate) fn remove_mut<Q>(&mut self, key: &Q) -> Option<Entry<K, V>>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let hash = self.hash_key(key);
        let root = self.root.as_mut()?;
        let removed = remove_recursive(Arc::make_mut(root), hash, key, Section::ROOT);
        let vacant = root.is_empty();
        if vacant {
            self.root = None;
        }

        if removed.is_some() {
            self.size -= 1;
            self.content_hash = OnceLock::new();
        }
        removed
    }
}

impl<K, V, S> Trie<K, V, S>
where
    K: Hash + Eq + Clone,
    V: Clone,
    S: BuildHasher + Clone,
{
    /// Persistent update: returns a new trie sharing every untouched subtree.
    ///
    /// No node is copied when the outcome is a no-op or a strict failure.
    pub(crate) fn update<P: Policy>(
        &self,
        kind: P,
        key: K,
        value: V,
    ) -> Result<(Self, UpdateOutcome<K, V>), P::Error> {
        let decision = if self.contains(&key) {
            kind.on_present()
        } else {
            kind.on_absent()
        };
        let proceed = decision.inspect_err(|err| {
            tracing::debug!(?kind, error = %err, "strict update rejected");
        })?;
        if !proceed {
            return Ok((self.clone(), UpdateOutcome::Unchanged));
        }

        let mut next = self.clone();
        let outcome = next.update_mut(kind, key, value)?;
        Ok((next, outcome))
    }

    /// Persistent remove: returns a new trie and the removed entry.
    pub(crate) fn remove<Q>(&self, key: &Q) -> (Self, Option<Entry<K, V>>)
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        if !self.contains(key) {
            return (self.clone(), None);
        }
        let mut next = self.clone();
        let removed = next.remove_mut(key);
        (next, removed)
    }
}

impl<K, V, S: Clone> Clone for Trie<K, V, S> {
    fn clone(&self) -> Self {
        Self {
            root: self.root.clone(),
            size: self.size,
            hasher: self.hasher.clone(),
            content_hash: self.content_hash.clone(),
        }
    }
}
