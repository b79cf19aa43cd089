//! Removal operation: path-copying delete with canonical compaction.

use std::borrow::Borrow;
use std::sync::Arc;

use crate::node::{self, Entry, Node, Section};

/// Removes `key` from the subtree `node` located at `section`.
///
/// Returns the removed entry, or `None` if the key is
/// absent. Callers on a published trie confirm presence first: an absent key
/// still copies the shared spine it walked.
///
/// Afterwards the subtree is canonical: a child left with a single entry is
/// absorbed into this node, and a node left without keys becomes
/// [`Node::Empty`].
pub fn remove_recursive<K, V, Q>(
    node: &mut Node<K, V>,
    hash: u32,
    key: &Q,
    section: Section,
) -> Option<Entry<K, V>>
where
    K: Borrow<Q> + Clone,
    V: Clone,
    Q: Eq + ?Sized,
{
    let removed = match node {
        Node::Empty => None,
        Node::Entries {
            entry_map,
            node_map,
            items,
            nodes,
        } => {
            let bit = section.bit(hash);

            if *entry_map & bit != 0 {
                let pos = node::index(*entry_map, bit);
                if !items[pos].matches(hash, key) {
                    return None;
                }
                *entry_map &= !bit;
                Some(items.remove(pos))
            } else if *node_map & bit != 0 {
                let pos = node::index(*node_map, bit);
                let child = Arc::make_mut(&mut nodes[pos]);
                let removed = remove_recursive(child, hash, key, section.next())?;

                // A child holding one entry is pulled up into this node. When
                // this node had no entries and this was its only child, the
                // result is the same one-entry node at this level, which the
                // parent absorbs in turn.
                if child.is_empty() || child.is_single_entry() {
                    let child = Arc::unwrap_or_clone(nodes.remove(pos));
                    *node_map &= !bit;
                    if let Some(survivor) = child.into_single_entry() {
                        *entry_map |= bit;
                        items.insert(node::index(*entry_map, bit), survivor);
                    }
                }
                Some(removed)
            } else {
                None
            }
        }
        Node::Collision { items, .. } => {
            let pos = items.iter().position(|e| e.key.borrow() == key)?;
            Some(items.remove(pos))
        }
    };

    if removed.is_some() {
        compact(node, section);
    }
    removed
}

/// Replaces a node that no longer justifies its kind.
fn compact<K, V>(node: &mut Node<K, V>, section: Section) {
    let replacement = match node {
        Node::Entries {
            entry_map: 0,
            node_map: 0,
            ..
        } => Some(Node::Empty),
        // A lone survivor leaves the bucket as an ordinary entry.
        Node::Collision { items, .. } if items.len() <= 1 => Some(
            items
                .pop()
                .map_or(Node::Empty, |last| Node::single(last, section)),
        ),
        _ => None,
    };
    if let Some(replacement) = replacement {
        *node = replacement;
    }
}
