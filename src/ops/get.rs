//! Lookup operation: walks the trie to find a key.

use std::borrow::Borrow;

use crate::node::{self, Entry, Node, Section};

/// Searches for `key` in the subtree rooted at `node`.
///
/// The full hash is computed once by the caller and sliced per level.
pub fn get_recursive<'a, K, V, Q>(
    node: &'a Node<K, V>,
    hash: u32,
    key: &Q,
    section: Section,
) -> Option<&'a Entry<K, V>>
where
    K: Borrow<Q>,
    Q: Eq + ?Sized,
{
    match node {
        Node::Empty => None,
        Node::Entries {
            entry_map,
            node_map,
            items,
            nodes,
        } => {
            let bit = section.bit(hash);

            if entry_map & bit != 0 {
                // Position has an inline entry.
                let entry = &items[node::index(*entry_map, bit)];
                entry.matches(hash, key).then_some(entry)
            } else if node_map & bit != 0 {
                // Position has a child subtree.
                let child = &nodes[node::index(*node_map, bit)];
                get_recursive(child, hash, key, section.next())
            } else {
                None
            }
        }
        // Linear search; the bucket's keys share every sliced bit.
        Node::Collision { items, .. } => items.iter().find(|e| e.key.borrow() == key),
    }
}
