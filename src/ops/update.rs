//! Update operation: insert, overwrite or reject under one of five policies.
//!
//! Works in place on a node whose children are reached through
//! [`Arc::make_mut`]: a child shared with another trie is copied before it is
//! written, so callers get path copying by handing in a freshly cloned root.

use std::convert::Infallible;
use std::fmt;
use std::sync::Arc;

use crate::error::TrieError;
use crate::node::{self, Entry, Node, Section};

/// Policy applied when an update meets an existing or an absent key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum UpdateKind {
    /// Insert a new key; an existing key is [`TrieError::KeyAlreadyExists`].
    Add,
    /// Insert a new key; an existing key is left as is.
    TryAdd,
    /// Insert a new key or overwrite an existing one.
    AddOrUpdate,
    /// Overwrite an existing key; an absent key is [`TrieError::KeyNotFound`].
    SetItem,
    /// Overwrite an existing key; an absent key is ignored.
    TrySetItem,
}

/// Presence decisions driving [`update_recursive`].
///
/// `Ok(true)` writes the entry, `Ok(false)` leaves the trie as is.
pub trait Policy: Copy + fmt::Debug {
    /// Rejection raised by a strict policy.
    type Error: fmt::Display;

    /// Decides what happens to a key that is already stored.
    fn on_present(self) -> Result<bool, Self::Error>;

    /// Decides what happens to a key that is not stored.
    fn on_absent(self) -> Result<bool, Self::Error>;
}

impl UpdateKind {
    /// Decides what happens to a key that is already stored.
    ///
    /// `Ok(true)` overwrites it, `Ok(false)` keeps it.
    pub const fn on_present(self) -> Result<bool, TrieError> {
        match self {
            Self::Add => Err(TrieError::KeyAlreadyExists),
            Self::TryAdd => Ok(false),
            Self::AddOrUpdate | Self::SetItem | Self::TrySetItem => Ok(true),
        }
    }

    /// Decides what happens to a key that is not stored.
    ///
    /// `Ok(true)` inserts it, `Ok(false)` skips it.
    pub const fn on_absent(self) -> Result<bool, TrieError> {
        match self {
            Self::SetItem => Err(TrieError::KeyNotFound),
            Self::TrySetItem => Ok(false),
            Self::Add | Self::TryAdd | Self::AddOrUpdate => Ok(true),
        }
    }
}

impl Policy for UpdateKind {
    type Error = TrieError;

    fn on_present(self) -> Result<bool, TrieError> {
        Self::on_present(self)
    }

    fn on_absent(self) -> Result<bool, TrieError> {
        Self::on_absent(self)
    }
}

/// The update kinds that cannot fail.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Lenient {
    /// As [`UpdateKind::TryAdd`].
    TryAdd,
    /// As [`UpdateKind::AddOrUpdate`].
    AddOrUpdate,
    /// As [`UpdateKind::TrySetItem`].
    TrySetItem,
}

impl Policy for Lenient {
    type Error = Infallible;

    fn on_present(self) -> Result<bool, Infallible> {
        Ok(!matches!(self, Self::TryAdd))
    }

    fn on_absent(self) -> Result<bool, Infallible> {
        Ok(!matches!(self, Self::TrySetItem))
    }
}

/// Outcome of a successful update.
#[derive(Debug, PartialEq, Eq)]
pub enum UpdateOutcome<K, V> {
    /// A new key was stored; the count grows by one.
    Inserted,
    /// An existing entry was overwritten; holds the previous entry.
    Replaced(Entry<K, V>),
    /// Nothing changed.
    Unchanged,
}

impl<K, V> UpdateOutcome<K, V> {
    /// Change in entry count caused by this outcome.
    #[must_use]
    pub const fn count_delta(&self) -> usize {
        match self {
            Self::Inserted => 1,
            Self::Replaced(_) | Self::Unchanged => 0,
        }
    }

    /// Returns the overwritten value, if any.
    #[must_use]
    pub fn into_previous(self) -> Option<V> {
        match self {
            Self::Replaced(old) => Some(old.value),
            Self::Inserted | Self::Unchanged => None,
        }
    }
}

/// Applies `kind` for `entry` to the subtree `node` located at `section`.
///
/// On error the subtree is left untouched.
pub fn update_recursive<K, V, P>(
    node: &mut Node<K, V>,
    kind: P,
    entry: Entry<K, V>,
    section: Section,
) -> Result<UpdateOutcome<K, V>, P::Error>
where
    P: Policy,
    K: Eq + Clone,
    V: Clone,
{
    match node {
        Node::Empty => {
            if !kind.on_absent()? {
                return Ok(UpdateOutcome::Unchanged);
            }
            *node = Node::single(entry, section);
            Ok(UpdateOutcome::Inserted)
        }
        Node::Entries {
            entry_map,
            node_map,
            items,
            nodes,
        } => {
            let bit = section.bit(entry.hash);

            if *entry_map & bit != 0 {
                let pos = node::index(*entry_map, bit);
                if items[pos].matches(entry.hash, &entry.key) {
                    if !kind.on_present()? {
                        return Ok(UpdateOutcome::Unchanged);
                    }
                    let old = std::mem::replace(&mut items[pos], entry);
                    return Ok(UpdateOutcome::Replaced(old));
                }
                if !kind.on_absent()? {
                    return Ok(UpdateOutcome::Unchanged);
                }

                // Different key at same position → push both into a subtree.
                let existing = items.remove(pos);
                let child = merge(existing, entry, section);
                *entry_map &= !bit;
                *node_map |= bit;
                nodes.insert(node::index(*node_map, bit), Arc::new(child));
                Ok(UpdateOutcome::Inserted)
            } else if *node_map & bit != 0 {
                let pos = node::index(*node_map, bit);
                let child = Arc::make_mut(&mut nodes[pos]);
                update_recursive(child, kind, entry, section.next())
            } else {
                if !kind.on_absent()? {
                    return Ok(UpdateOutcome::Unchanged);
                }
                *entry_map |= bit;
                items.insert(node::index(*entry_map, bit), entry);
                Ok(UpdateOutcome::Inserted)
            }
        }
        Node::Collision { items, .. } => {
            if let Some(pos) = items.iter().position(|e| e.key == entry.key) {
                if !kind.on_present()? {
                    return Ok(UpdateOutcome::Unchanged);
                }
                let old = std::mem::replace(&mut items[pos], entry);
                return Ok(UpdateOutcome::Replaced(old));
            }
            if !kind.on_absent()? {
                return Ok(UpdateOutcome::Unchanged);
            }
            items.push(entry);
            Ok(UpdateOutcome::Inserted)
        }
    }
}

/// Builds the child node for two distinct entries sharing a slot at `section`.
///
/// Descends until the slots at the next section differ, or opens a
/// collision bucket once the last bitmap level is reached.
pub fn merge<K, V>(e1: Entry<K, V>, e2: Entry<K, V>, section: Section) -> Node<K, V> {
    if section.is_last() {
        tracing::trace!(
            hash = e1.hash,
            offset = section.offset(),
            "hash space exhausted, opening collision bucket"
        );
        return Node::Collision {
            hash: e1.hash,
            items: vec![e1, e2],
        };
    }

    let next = section.next();
    let b1 = next.bit(e1.hash);
    let b2 = next.bit(e2.hash);

    if b1 == b2 {
        let child = merge(e1, e2, next);
        Node::Entries {
            entry_map: 0,
            node_map: b1,
            items: Vec::new(),
            nodes: vec![Arc::new(child)],
        }
    } else {
        let items = if b1 < b2 { vec![e1, e2] } else { vec![e2, e1] };
        Node::Entries {
            entry_map: b1 | b2,
            node_map: 0,
            items,
            nodes: Vec::new(),
        }
    }
}
