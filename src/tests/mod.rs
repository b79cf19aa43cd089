//! Crate-internal tests with shared fixtures.

use std::fmt::Write as _;
use std::hash::{BuildHasherDefault, Hash, Hasher};

use crate::TrieSet;
use crate::node::{self, LAST_OFFSET, Node, Section};

mod algebra;
mod map;
mod stress;

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Hasher passing integer input straight through, so trie slots are
/// predictable: key `n` (below 2³²) hashes to `n`.
#[derive(Default)]
pub struct IdentityHasher(u64);

impl Hasher for IdentityHasher {
    fn finish(&self) -> u64 {
        self.0
    }

    fn write(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.0 = (self.0 << 8) | u64::from(b);
        }
    }

    fn write_u32(&mut self, n: u32) {
        self.0 = u64::from(n);
    }

    fn write_u64(&mut self, n: u64) {
        self.0 = n;
    }

    fn write_i32(&mut self, n: i32) {
        self.0 = u64::from(n.cast_unsigned());
    }
}

pub type IdentityBuild = BuildHasherDefault<IdentityHasher>;

pub type IdentitySet<K> = TrieSet<K, IdentityBuild>;

/// A key type with a controllable hash value for testing hash collisions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollidingKey {
    pub id: u32,
    pub forced_hash: u32,
}

impl CollidingKey {
    pub const fn new(id: u32, hash: u32) -> Self {
        Self {
            id,
            forced_hash: hash,
        }
    }
}

impl Hash for CollidingKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.forced_hash.hash(state);
    }
}

// ---------------------------------------------------------------------------
// Structural checks
// ---------------------------------------------------------------------------

/// Set bits of `map`, ascending.
fn bits(map: u32) -> impl Iterator<Item = u32> {
    (0..32).map(node::mask).filter(move |b| map & b != 0)
}

/// Checks every node invariant below `node`; returns the number of keys.
///
/// Non-root nodes must hold at least two keys and no child may be a
/// single-entry branch, which is what makes the shape canonical.
pub fn validate_node<K, V>(node: &Node<K, V>, section: Section, is_root: bool) -> usize {
    match node {
        Node::Empty => {
            assert!(is_root, "Empty stored as a child");
            0
        }
        Node::Entries {
            entry_map,
            node_map,
            items,
            nodes,
        } => {
            assert_eq!(entry_map & node_map, 0, "bitmaps overlap");
            assert_eq!(items.len(), entry_map.count_ones() as usize);
            assert_eq!(nodes.len(), node_map.count_ones() as usize);
            assert!(section.offset() <= LAST_OFFSET, "branch below last level");

            for (item, bit) in items.iter().zip(bits(*entry_map)) {
                assert_eq!(section.bit(item.hash), bit, "entry in wrong slot");
            }

            let mut total = items.len();
            for child in nodes {
                assert!(!child.is_empty(), "empty child");
                assert!(!child.is_single_entry(), "single-entry child not inlined");
                total += validate_node(child, section.next(), false);
            }
            if !is_root {
                assert!(total >= 2, "non-root subtree with {total} keys");
            }
            total
        }
        Node::Collision { hash, items } => {
            assert!(items.len() >= 2, "collision bucket with {} keys", items.len());
            assert!(section.offset() > LAST_OFFSET, "collision above last level");
            let used = (1_u32 << (LAST_OFFSET + node::BITS_PER_LEVEL)) - 1;
            for item in items {
                assert_eq!(item.hash & used, hash & used, "bucket keys disagree");
            }
            items.len()
        }
    }
}

/// Validates the whole set, including its cached length.
pub fn validate<K, S>(set: &TrieSet<K, S>) {
    let trie = set.trie();
    let counted = trie
        .root()
        .map_or(0, |root| validate_node(root, Section::ROOT, true));
    assert_eq!(counted, set.len(), "count drifted from contents");
    assert_eq!(trie.root().is_none(), set.is_empty());
}

/// Compact rendering of node kinds and bitmaps, for shape comparisons.
pub fn shape<K, S>(set: &TrieSet<K, S>) -> String {
    fn render<K, V>(node: &Node<K, V>, out: &mut String) {
        match node {
            Node::Empty => out.push('_'),
            Node::Entries {
                entry_map,
                node_map,
                nodes,
                ..
            } => {
                let _ = write!(out, "E[{entry_map:08x}/{node_map:08x}](");
                for child in nodes {
                    render(child, out);
                }
                out.push(')');
            }
            Node::Collision { items, .. } => {
                let _ = write!(out, "C{}", items.len());
            }
        }
    }

    let mut out = String::new();
    if let Some(root) = set.trie().root() {
        render(root, &mut out);
    }
    out
}
