//! Final suffix tree
//!
//! Produced from a [`crate::trie::CompactedTrie`] by one depth-first pass.
//! Nodes keep the `(location, length)` spans of the trie; edges are keyed by
//! the literal substring they spell and iterate in ascending order.
//!
//! ## Architecture
//!
//! - `assemble`: trie-to-tree conversion and node access
//! - `inspect`: node counts, height, the "simple" check, suffix
//!   reconstruction and the level-by-level diagnostic dump

pub mod assemble;
pub mod inspect;

// Re-exports for convenience
pub use assemble::{SuffixTree, TreeNode};
pub use inspect::{LevelEntry, SuffixPath};
