//! Coarse compacted trie
//!
//! The intermediate structure of construction: every suffix inserted block
//! by block, edges keyed by block fingerprints. It is consumed by
//! [`crate::tree::SuffixTree`] and discarded afterwards.
//!
//! ## Architecture
//!
//! - `node`: arena storage, spans and the hash-keyed trie node
//! - `builder`: incremental insertion with LCE-driven node splitting
//! - `lce`: direct character comparison at divergence points

pub mod builder;
pub mod lce;
pub mod node;

// Re-exports for convenience
pub use builder::{BuildStats, CompactedTrie};
pub use lce::lce;
pub use node::{Arena, NodeId, Span, TrieNode};
