//! # FPST - Fingerprint Sparse Suffix Trees
//!
//! FPST builds compacted suffix trees with a Monte Carlo construction that
//! compares text by Karp-Rabin fingerprints instead of characters. Suffixes
//! are inserted block by block, `B` characters at a time, and a character
//! comparison (LCE probe) is issued only where a suffix leaves an edge.
//!
//! ## Architecture
//!
//! The crate is organized into these main modules:
//!
//! - [`text`] - Sentinel-terminated texts, random generation and file loading
//! - [`fingerprint`] - Suffix fingerprint table and O(1) substring fingerprints
//! - [`params`] - Random prime / base selection and block length derivation
//! - [`trie`] - Coarse compacted trie keyed by block fingerprints
//! - [`tree`] - Final suffix tree with lexicographically ordered edge labels
//! - [`stats`] / [`output`] - Build reports and colored rendering
//! - [`utils`] - Configuration file and progress spinner
//!
//! ## Quick Start
//!
//! ```
//! use fpst::params::Params;
//! use fpst::text::Text;
//! use fpst::tree::SuffixTree;
//!
//! let text = Text::from_terminated(b"banana$".to_vec()).unwrap();
//! let params = Params::from_u64(1_000_000_007, 48_271, 2).unwrap();
//! let tree = SuffixTree::build(&text, &params);
//!
//! assert_eq!(tree.leaf_count(), text.len());
//! assert_eq!(tree.suffix_array(), vec![6, 5, 3, 1, 0, 4, 2]);
//! for entry in tree.levels() {
//!     println!("{}: {:?}", entry.level, entry.label);
//! }
//! ```
//!
//! ## Correctness
//!
//! Equal fingerprints are trusted without verification. With `p` drawn above
//! `n^(3 + c)` a collision among the fingerprints compared during one build
//! happens with probability about `n^-c`. Collisions that derail the
//! construction abort it with a panic; [`tree::SuffixTree::verify`] checks a
//! finished tree against the text.

pub mod fingerprint;
pub mod output;
pub mod params;
pub mod stats;
pub mod text;
pub mod tree;
pub mod trie;
pub mod utils;
