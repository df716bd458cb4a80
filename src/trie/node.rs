//! Node storage shared by the compacted trie and the suffix tree
//!
//! Both trees are strict trees with no aliasing, so nodes live in a flat
//! arena and refer to their children by [`NodeId`]. Dropping the arena drops
//! the whole tree without recursion.

use num_bigint::BigUint;
use std::ops::{Index, IndexMut};

/// Stable index of a node inside its [`Arena`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(u32);

impl NodeId {
    /// Every arena allocates its root first
    pub const ROOT: NodeId = NodeId(0);

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Text span `[location, location + length)` represented by a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Span {
    pub location: usize,
    pub length: usize,
}

impl Span {
    /// The root represents no substring
    pub const ROOT: Span = Span {
        location: 0,
        length: 0,
    };

    #[inline]
    pub fn new(location: usize, length: usize) -> Self {
        Self { location, length }
    }

    /// Exclusive end position
    #[inline]
    pub fn end(&self) -> usize {
        self.location + self.length
    }
}

/// Append-only node arena
#[derive(Debug, Clone)]
pub struct Arena<N> {
    nodes: Vec<N>,
}

impl<N> Arena<N> {
    /// Create an arena holding only `root`
    pub fn with_root(root: N) -> Self {
        Self { nodes: vec![root] }
    }

    /// Store `node` and return its id
    pub fn alloc(&mut self, node: N) -> NodeId {
        let id = u32::try_from(self.nodes.len()).expect("node arena exceeds u32::MAX entries");
        self.nodes.push(node);
        NodeId(id)
    }

    /// Total nodes including the root
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false: an arena holds at least its root
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Look up a node
    ///
    /// # Panics
    /// Panics if `id` was not allocated by this arena.
    #[inline]
    pub fn get(&self, id: NodeId) -> &N {
        self.nodes
            .get(id.index())
            .unwrap_or_else(|| panic!("node {:?} does not exist", id))
    }
}

impl<N> Index<NodeId> for Arena<N> {
    type Output = N;

    #[inline]
    fn index(&self, id: NodeId) -> &N {
        self.get(id)
    }
}

impl<N> IndexMut<NodeId> for Arena<N> {
    #[inline]
    fn index_mut(&mut self, id: NodeId) -> &mut N {
        let len = self.nodes.len();
        self.nodes
            .get_mut(id.index())
            .unwrap_or_else(|| panic!("node {:?} does not exist (arena holds {})", id, len))
    }
}

/// Hash-keyed node of the coarse compacted trie
#[derive(Debug, Clone)]
pub struct TrieNode {
    pub span: Span,
    /// Fingerprint of the spanned substring, zero for the root
    pub print: BigUint,
    /// Children keyed by the fingerprint of their first block
    pub children: ahash::AHashMap<BigUint, NodeId>,
}

impl TrieNode {
    pub fn root() -> Self {
        Self::new(Span::ROOT, BigUint::default())
    }

    pub fn new(span: Span, print: BigUint) -> Self {
        Self {
            span,
            print,
            children: ahash::AHashMap::new(),
        }
    }

    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}
