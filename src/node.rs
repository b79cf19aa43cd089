//! CHAMP trie node types and bitmap helpers.

use std::borrow::Borrow;
use std::fmt;
use std::sync::Arc;

/// Bits per trie level (5 → 32-way branching).
pub const BITS_PER_LEVEL: u32 = 5;

/// Mask selecting one slot's worth of hash bits.
pub const SLOT_MASK: u32 = 0x1F;

/// Offset of the last bitmap-indexed level. Merging two keys below it
/// produces a [`Node::Collision`].
pub const LAST_OFFSET: u32 = 25;

/// Stored entry: a key, its payload and the key's precomputed 32-bit hash.
///
/// Sets use `V = ()`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Entry<K, V> {
    /// Precomputed 32-bit hash of the key.
    pub hash: u32,
    /// The key.
    pub key: K,
    /// The payload.
    pub value: V,
}

impl<K, V> Entry<K, V> {
    /// Returns `true` if this entry holds `key` with the given hash.
    #[inline]
    #[must_use]
    pub fn matches<Q>(&self, hash: u32, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Eq + ?Sized,
    {
        self.hash == hash && self.key.borrow() == key
    }
}

/// Cursor into a 32-bit hash: the bit offset consumed by one trie level.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Section {
    offset: u32,
}

impl Section {
    /// Section of the root node.
    pub const ROOT: Self = Self { offset: 0 };

    /// Returns the section one level deeper.
    #[inline]
    #[must_use]
    pub const fn next(self) -> Self {
        Self {
            offset: self.offset + BITS_PER_LEVEL,
        }
    }

    /// Returns the bit offset of this section.
    #[inline]
    #[must_use]
    pub const fn offset(self) -> u32 {
        self.offset
    }

    /// Returns `true` once no bitmap level remains below this one.
    #[inline]
    #[must_use]
    pub const fn is_last(self) -> bool {
        self.offset >= LAST_OFFSET
    }

    /// Extracts the 5-bit slot index of `hash` at this section.
    #[inline]
    #[must_use]
    pub const fn slot(self, hash: u32) -> u32 {
        (hash >> self.offset) & SLOT_MASK
    }

    /// Single-bit mask of `hash`'s slot at this section.
    #[inline]
    #[must_use]
    pub const fn bit(self, hash: u32) -> u32 {
        mask(self.slot(hash))
    }
}

/// CHAMP trie node.
///
/// Shared subtrees are held behind [`Arc`]; a write goes through
/// [`Arc::make_mut`], which copies a child only while another trie still
/// references it.
#[derive(Clone)]
pub enum Node<K, V> {
    /// Vacant subtree. Only the transient starting point of an insert and the
    /// result of removing a node's last key; never stored as a child.
    Empty,
    /// Bitmap-compressed branch node.
    ///
    /// Invariants: `entry_map & node_map == 0`,
    /// `items.len() == entry_map.count_ones()`,
    /// `nodes.len() == node_map.count_ones()`, both arrays in slot order.
    Entries {
        /// Slots holding a direct entry.
        entry_map: u32,
        /// Slots holding a child node.
        node_map: u32,
        /// Direct entries, packed.
        items: Vec<Entry<K, V>>,
        /// Child nodes, packed.
        nodes: Vec<Arc<Self>>,
    },
    /// Leaf for keys whose hashes agree on every bit the trie consumes.
    ///
    /// Only the low 30 bits are sliced, so keys differing in the top two bits
    /// share a bucket too. Invariant: `items.len() >= 2` once published.
    Collision {
        /// Hash of the key that opened this bucket. Other keys in the bucket
        /// agree with it on the low 30 bits only.
        hash: u32,
        /// Colliding entries in insertion order.
        items: Vec<Entry<K, V>>,
    },
}

// ---------------------------------------------------------------------------
// Bitmap helpers
// ---------------------------------------------------------------------------

/// Returns the single-bit mask for the given slot (0..31).
#[inline]
#[must_use]
pub const fn mask(slot: u32) -> u32 {
    1 << slot
}

/// Returns the compact index of `bit` within `bitmap`.
///
/// Counts the number of set bits below `bit`.
#[inline]
#[must_use]
pub const fn index(bitmap: u32, bit: u32) -> usize {
    (bitmap & (bit - 1)).count_ones() as usize
}

// ---------------------------------------------------------------------------
// Constructors & accessors
// ---------------------------------------------------------------------------

impl<K, V> Node<K, V> {
    /// One-entry branch node at `section`.
    #[must_use]
    pub fn single(entry: Entry<K, V>, section: Section) -> Self {
        Self::Entries {
            entry_map: section.bit(entry.hash),
            node_map: 0,
            items: vec![entry],
            nodes: Vec::new(),
        }
    }

    /// Returns `true` for [`Node::Empty`].
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Returns the number of direct entries held by this node.
    #[must_use]
    pub fn items_len(&self) -> usize {
        match self {
            Self::Empty => 0,
            Self::Entries { items, .. } | Self::Collision { items, .. } => items.len(),
        }
    }

    /// Returns the number of child subtrees (always 0 outside `Entries`).
    #[must_use]
    pub fn nodes_len(&self) -> usize {
        match self {
            Self::Entries { nodes, .. } => nodes.len(),
            Self::Empty | Self::Collision { .. } => 0,
        }
    }

    /// Returns `true` for a branch node holding exactly one direct entry and
    /// no children. Such a node never survives as a child: its parent
    /// absorbs the entry.
    #[must_use]
    pub fn is_single_entry(&self) -> bool {
        matches!(self, Self::Entries { items, nodes, .. } if items.len() == 1 && nodes.is_empty())
    }

    /// Consumes a single-entry branch node, yielding its entry.
    ///
    /// Returns `None` for any other shape.
    #[must_use]
    pub fn into_single_entry(self) -> Option<Entry<K, V>> {
        match self {
            Self::Entries { items, nodes, .. } if items.len() == 1 && nodes.is_empty() => {
                items.into_iter().next()
            }
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Manual trait impls — avoid false `K: Debug, V: Debug` bounds.
// ---------------------------------------------------------------------------

impl<K, V> fmt::Debug for Node<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("Empty"),
            Self::Entries {
                entry_map,
                node_map,
                nodes,
                ..
            } => f
                .debug_struct("Entries")
                .field("entry_map", &format_args!("{entry_map:#034b}"))
                .field("node_map", &format_args!("{node_map:#034b}"))
                .field("nodes", nodes)
                .finish_non_exhaustive(),
            Self::Collision { hash, items } => f
                .debug_struct("Collision")
                .field("hash", &format_args!("{hash:#010x}"))
                .field("items_len", &items.len())
                .finish(),
        }
    }
}
