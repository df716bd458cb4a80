//! Coarse compacted trie builder
//!
//! Inserts every suffix of the text into a trie whose edges are keyed by the
//! fingerprint of their first block of `B` characters:
//!
//! 1. Fingerprint the next block of the suffix (clamped to the text end)
//! 2. No child under that fingerprint: attach a leaf for the rest of the suffix
//! 3. The child is exactly that block: descend and advance by `B`
//! 4. Otherwise probe the LCE against the child, round it down to a multiple
//!    of `B` and either descend (the whole child matched) or split the child
//!
//! Block fingerprint equality is trusted without a character comparison.
//! A false match surfaces either as a zero-length block match or as a walk
//! that runs off the end of the text, and both abort construction.

use super::lce::lce;
use super::node::{Arena, NodeId, Span, TrieNode};
use crate::fingerprint::Fingerprinter;
use crate::params::Params;
use crate::text::{escape_bytes, Text};
use num_bigint::BigUint;
use serde::Serialize;
use tracing::{debug, enabled, trace, Level};

/// Counters collected while building the trie
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BuildStats {
    /// Suffixes inserted
    pub inserts: u64,
    /// Leaves attached
    pub leaves: u64,
    /// Nodes split into an internal node and a tail
    pub splits: u64,
    /// Steps down into an existing child
    pub descents: u64,
    /// LCE probes issued at divergence points
    pub lce_probes: u64,
    /// Characters compared by all LCE probes
    pub lce_chars: u64,
    /// Trie nodes excluding the root
    pub trie_nodes: u64,
}

/// Compacted trie over all suffixes of a text
pub struct CompactedTrie<'t> {
    text: &'t Text,
    fingerprints: Fingerprinter,
    block_len: usize,
    nodes: Arena<TrieNode>,
    stats: BuildStats,
}

impl<'t> CompactedTrie<'t> {
    /// Build the trie for `text` under `params`.
    ///
    /// # Panics
    /// Panics if an insertion makes no forward progress, which only happens
    /// after a fingerprint collision or an internal logic error.
    pub fn build(text: &'t Text, params: &Params) -> Self {
        let mut trie = Self {
            text,
            fingerprints: Fingerprinter::new(text, params),
            block_len: params.block_len(),
            nodes: Arena::with_root(TrieNode::root()),
            stats: BuildStats::default(),
        };
        trie.construct();
        trie
    }

    fn construct(&mut self) {
        let n = self.text.len();
        for start in 0..n {
            match self.insert(start) {
                Some(next) if next > start => trace!(start, next, "inserted suffix"),
                outcome => panic!(
                    "compacted trie construction made no progress at suffix {} (outcome {:?}, B = {}); \
                     likely a fingerprint collision",
                    start, outcome, self.block_len
                ),
            }
        }

        self.stats.trie_nodes = (self.nodes.len() - 1) as u64;
        debug!(
            n,
            block_len = self.block_len,
            nodes = self.stats.trie_nodes,
            lce_probes = self.stats.lce_probes,
            splits = self.stats.splits,
            "compacted trie built"
        );

        if enabled!(Level::TRACE) {
            self.trace_dump();
        }
    }

    /// Insert the suffix starting at `start`.
    ///
    /// Returns the position just past the block where the new leaf was
    /// attached (`i + B` for a fresh branch, `i + match` after a split), or
    /// `None` if the walk could not place a leaf.
    fn insert(&mut self, start: usize) -> Option<usize> {
        let n = self.text.len();
        let block = self.block_len;
        self.stats.inserts += 1;

        let mut node = NodeId::ROOT;
        let mut i = start;

        while i < n {
            let block_print = self.fingerprints.block(i, block);

            let existing = self.nodes[node].children.get(&block_print).copied();
            let child = match existing {
                Some(child) => child,
                None => {
                    let print = if i + block >= n {
                        block_print.clone()
                    } else {
                        self.fingerprints.suffix(i).clone()
                    };
                    self.attach_leaf(node, block_print, i, print);
                    return Some(i + block);
                }
            };

            if self.nodes[child].print == block_print {
                self.stats.descents += 1;
                node = child;
                i += block;
                continue;
            }

            let span = self.nodes[child].span;
            let common = lce(self.text.as_bytes(), i, span.location, span.length);
            self.stats.lce_probes += 1;
            self.stats.lce_chars += common as u64;

            let matched = round_down(common, block);
            if matched == 0 {
                return None;
            }

            if matched == span.length {
                self.stats.descents += 1;
                node = child;
                i += matched;
                continue;
            }

            self.split(child, matched);
            i += matched;
            let key = self.fingerprints.block(i, block);
            let print = self.fingerprints.suffix(i).clone();
            self.attach_leaf(child, key, i, print);
            return Some(i);
        }

        None
    }

    fn attach_leaf(&mut self, parent: NodeId, key: BigUint, location: usize, print: BigUint) {
        let span = Span::new(location, self.text.len() - location);
        let leaf = self.nodes.alloc(TrieNode::new(span, print));
        self.nodes[parent].children.insert(key, leaf);
        self.stats.leaves += 1;
    }

    /// Shorten `node` to its first `matched` characters and move the rest of
    /// its span, with all of its children, into a new tail child.
    fn split(&mut self, node: NodeId, matched: usize) {
        let span = self.nodes[node].span;
        debug_assert!(matched > 0 && matched < span.length);

        let tail_span = Span::new(span.location + matched, span.length - matched);
        let tail_print = self.fingerprints.substring(tail_span.location, tail_span.end());
        let tail_key = self.fingerprints.block(tail_span.location, self.block_len);
        let head_print = self.fingerprints.substring(span.location, span.location + matched);

        let mut tail = TrieNode::new(tail_span, tail_print);
        tail.children = std::mem::take(&mut self.nodes[node].children);
        let tail = self.nodes.alloc(tail);

        let head = &mut self.nodes[node];
        head.span.length = matched;
        head.print = head_print;
        head.children.insert(tail_key, tail);

        self.stats.splits += 1;
    }

    /// Log every node with its edge key and print
    fn trace_dump(&self) {
        let mut stack = vec![(NodeId::ROOT, 0usize)];
        while let Some((id, depth)) = stack.pop() {
            let node = &self.nodes[id];
            for (key, &child) in &node.children {
                let span = self.nodes[child].span;
                trace!(
                    depth,
                    parent = %node.print,
                    edge = %key,
                    print = %self.nodes[child].print,
                    label = %escape_bytes(self.text.slice(span.location, span.length)),
                    "trie edge"
                );
                stack.push((child, depth + 1));
            }
            trace!(depth, children = node.children.len(), "trie node");
        }
    }

    pub fn text(&self) -> &'t Text {
        self.text
    }

    pub fn block_len(&self) -> usize {
        self.block_len
    }

    pub fn stats(&self) -> BuildStats {
        self.stats
    }

    /// Nodes excluding the root
    pub fn node_count(&self) -> usize {
        self.nodes.len() - 1
    }

    pub fn node(&self, id: NodeId) -> &TrieNode {
        &self.nodes[id]
    }

    /// Child ids of `id` in unspecified order
    pub fn children(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes[id].children.values().copied()
    }

    /// The fingerprint oracle used for construction
    pub fn fingerprints(&mut self) -> &mut Fingerprinter {
        &mut self.fingerprints
    }
}

#[inline]
fn round_down(value: usize, multiple: usize) -> usize {
    value - value % multiple
}

#[cfg(test)]
mod tests {
    use super::*;

    const P: u64 = 1_000_000_007;
    const X: u64 = 911_382_323;

    fn build(text: &Text, block_len: usize) -> CompactedTrie<'_> {
        CompactedTrie::build(text, &Params::from_u64(P, X, block_len).unwrap())
    }

    fn leaf_spans(trie: &CompactedTrie<'_>) -> Vec<Span> {
        let mut leaves = Vec::new();
        let mut stack = vec![NodeId::ROOT];
        while let Some(id) = stack.pop() {
            let node = trie.node(id);
            if id != NodeId::ROOT && node.is_leaf() {
                leaves.push(node.span);
            }
            stack.extend(trie.children(id));
        }
        leaves.sort();
        leaves
    }

    #[test]
    fn test_banana_block_one() {
        let text = Text::from_terminated(b"banana$".to_vec()).unwrap();
        let trie = build(&text, 1);

        // 7 leaves, internal nodes "a", "na", "ana" (as "a" -> "na")
        assert_eq!(leaf_spans(&trie).len(), 7);
        assert_eq!(trie.stats().inserts, 7);
        assert_eq!(trie.stats().leaves, 7);
        assert_eq!(trie.node_count(), 10);

        let root_children: Vec<_> = trie.children(NodeId::ROOT).collect();
        assert_eq!(root_children.len(), 4); // b, a, n, $
    }

    #[test]
    fn test_every_node_print_matches_span() {
        let text = Text::from_terminated(b"mississippi$".to_vec()).unwrap();
        for block_len in 1..=4 {
            let mut trie = build(&text, block_len);
            let mut stack = vec![NodeId::ROOT];
            let mut checks = Vec::new();
            while let Some(id) = stack.pop() {
                for (key, &child) in &trie.node(id).children {
                    let node = trie.node(child);
                    checks.push((key.clone(), node.print.clone(), node.span));
                    stack.push(child);
                }
            }
            for (key, print, span) in checks {
                let fp = trie.fingerprints();
                assert_eq!(print, fp.substring(span.location, span.end()), "B={} span {:?}", block_len, span);
                assert_eq!(key, fp.block(span.location, block_len), "B={} span {:?}", block_len, span);
            }
        }
    }

    #[test]
    fn test_internal_spans_are_block_multiples() {
        let text = Text::from_terminated(b"abababababababab$".to_vec()).unwrap();
        for block_len in 1..=5 {
            let trie = build(&text, block_len);
            let mut stack = vec![NodeId::ROOT];
            while let Some(id) = stack.pop() {
                let node = trie.node(id);
                if id != NodeId::ROOT && !node.is_leaf() {
                    assert_eq!(node.span.length % block_len, 0, "B={} {:?}", block_len, node.span);
                    assert!(node.span.length > 0);
                }
                stack.extend(trie.children(id));
            }
            assert_eq!(leaf_spans(&trie).len(), text.len());
        }
    }

    #[test]
    fn test_block_longer_than_text() {
        let text = Text::from_terminated(b"abc$".to_vec()).unwrap();
        let trie = build(&text, 10);
        assert_eq!(trie.node_count(), 4);
        assert_eq!(trie.stats().splits, 0);
        assert_eq!(trie.stats().lce_probes, 0);
    }

    #[test]
    fn test_empty_text() {
        let text = Text::from_terminated(Vec::new()).unwrap();
        let trie = build(&text, 3);
        assert_eq!(trie.node_count(), 0);
        assert_eq!(trie.stats(), BuildStats::default());
    }

    #[test]
    fn test_single_symbol_alphabet() {
        let text = Text::from_terminated(b"aaaaaaa$".to_vec()).unwrap();
        for block_len in 1..=3 {
            let trie = build(&text, block_len);
            let leaves = leaf_spans(&trie);
            assert_eq!(leaves.len(), 8);
            assert!(leaves.iter().all(|span| span.end() == 8));
        }
    }

    #[test]
    fn test_lce_probe_stops_at_edge_end() {
        // Suffix 6 "abx$" matches the internal edge "ab" and one more byte;
        // the probe reads only the two bytes of the edge before descending
        let text = Text::from_terminated(b"abxabyabx$".to_vec()).unwrap();
        let trie = build(&text, 1);
        let stats = trie.stats();

        assert_eq!(stats.lce_probes, 6);
        assert_eq!(stats.lce_chars, 8);
        assert_eq!(stats.splits, 5);
        assert_eq!(stats.descents, 2);
        assert_eq!(leaf_spans(&trie).len(), text.len());
    }

    #[test]
    fn test_zero_bytes_before_sentinel() {
        let text = Text::with_sentinel(vec![0, 0, 0], b'$').unwrap();
        for block_len in 1..=4 {
            let trie = build(&text, block_len);
            let leaves = leaf_spans(&trie);
            assert_eq!(leaves.len(), 4, "B={}", block_len);
            assert!(leaves.iter().all(|span| span.end() == 4));
        }

        // "$" and "0" -> {"$", "0" -> {"$", "0$"}}
        assert_eq!(build(&text, 1).node_count(), 6);
    }

    #[test]
    fn test_round_down() {
        assert_eq!(round_down(7, 3), 6);
        assert_eq!(round_down(2, 3), 0);
        assert_eq!(round_down(9, 1), 9);
    }
}
