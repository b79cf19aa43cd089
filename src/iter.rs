//! Iterator types for CHAMP sets and maps.
//!
//! Enumeration is depth-first: at each branch node the direct entries in slot
//! order, then each child in slot order. The order depends only on the trie
//! shape, so equal contents built with the same hasher enumerate alike
//! (collision buckets aside, which keep insertion order).

use std::slice;
use std::sync::Arc;
use std::vec;

use crate::node::{Entry, Node};

/// Lazy DFS over borrowed entries.
pub(crate) struct Entries<'a, K, V> {
    stack: Vec<&'a Node<K, V>>,
    current: slice::Iter<'a, Entry<K, V>>,
    remaining: usize,
}

impl<'a, K, V> Entries<'a, K, V> {
    pub(crate) fn new(root: Option<&'a Node<K, V>>, len: usize) -> Self {
        Self {
            stack: root.into_iter().collect(),
            current: Default::default(),
            remaining: len,
        }
    }
}

impl<K, V> Clone for Entries<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            stack: self.stack.clone(),
            current: self.current.clone(),
            remaining: self.remaining,
        }
    }
}

impl<'a, K, V> Iterator for Entries<'a, K, V> {
    type Item = &'a Entry<K, V>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(entry) = self.current.next() {
                self.remaining = self.remaining.saturating_sub(1);
                return Some(entry);
            }
            match self.stack.pop()? {
                Node::Empty => {}
                Node::Entries { items, nodes, .. } => {
                    self.current = items.iter();
                    self.stack.extend(nodes.iter().rev().map(Arc::as_ref));
                }
                Node::Collision { items, .. } => self.current = items.iter(),
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

/// Owning DFS: moves entries out of uniquely held nodes, clones shared ones.
pub(crate) struct IntoEntries<K, V> {
    stack: Vec<Arc<Node<K, V>>>,
    current: vec::IntoIter<Entry<K, V>>,
    remaining: usize,
}

impl<K, V> IntoEntries<K, V> {
    pub(crate) fn new(root: Option<Arc<Node<K, V>>>, len: usize) -> Self {
        Self {
            stack: root.into_iter().collect(),
            current: Vec::new().into_iter(),
            remaining: len,
        }
    }
}

impl<K: Clone, V: Clone> Iterator for IntoEntries<K, V> {
    type Item = Entry<K, V>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(entry) = self.current.next() {
                self.remaining = self.remaining.saturating_sub(1);
                return Some(entry);
            }
            match Arc::unwrap_or_clone(self.stack.pop()?) {
                Node::Empty => {}
                Node::Entries { items, nodes, .. } => {
                    self.current = items.into_iter();
                    self.stack.extend(nodes.into_iter().rev());
                }
                Node::Collision { items, .. } => self.current = items.into_iter(),
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

// ---------------------------------------------------------------------------
// Set iterators
// ---------------------------------------------------------------------------

/// Iterator over references to the keys of a [`TrieSet`](crate::TrieSet).
pub struct Iter<'a, K> {
    pub(crate) inner: Entries<'a, K, ()>,
}

impl<K> Clone for Iter<'_, K> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<'a, K> Iterator for Iter<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|e| &e.key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K> ExactSizeIterator for Iter<'_, K> {}

/// Owning iterator over the keys of a [`TrieSet`](crate::TrieSet).
pub struct IntoIter<K> {
    pub(crate) inner: IntoEntries<K, ()>,
}

impl<K: Clone> Iterator for IntoIter<K> {
    type Item = K;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|e| e.key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K: Clone> ExactSizeIterator for IntoIter<K> {}

// ---------------------------------------------------------------------------
// Map iterators
// ---------------------------------------------------------------------------

/// Iterator over references to the key-value pairs of a
/// [`TrieMap`](crate::TrieMap).
pub struct MapIter<'a, K, V> {
    pub(crate) inner: Entries<'a, K, V>,
}

impl<K, V> Clone for MapIter<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<'a, K, V> Iterator for MapIter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|e| (&e.key, &e.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for MapIter<'_, K, V> {}

/// Owning iterator over the key-value pairs of a [`TrieMap`](crate::TrieMap).
pub struct MapIntoIter<K, V> {
    pub(crate) inner: IntoEntries<K, V>,
}

impl<K: Clone, V: Clone> Iterator for MapIntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|e| (e.key, e.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K: Clone, V: Clone> ExactSizeIterator for MapIntoIter<K, V> {}
