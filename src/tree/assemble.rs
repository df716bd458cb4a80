//! Suffix tree assembly
//!
//! Walks the finished compacted trie once and rebuilds it with edges keyed
//! by their literal labels. Siblings are sorted by label once, and equal
//! labels are rejected. Children then live in a `BTreeMap`, so iteration
//! yields them in ascending lexicographic order.

use crate::params::Params;
use crate::text::{escape_bytes, Text};
use crate::trie::{Arena, BuildStats, CompactedTrie, NodeId, Span};
use std::collections::BTreeMap;
use tracing::debug;

/// String-keyed node of the final suffix tree
#[derive(Debug, Clone)]
pub struct TreeNode<'t> {
    pub span: Span,
    /// Children keyed by their edge label `text[location, location + length)`
    pub children: BTreeMap<&'t [u8], NodeId>,
}

impl<'t> TreeNode<'t> {
    fn new(span: Span) -> Self {
        Self {
            span,
            children: BTreeMap::new(),
        }
    }

    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// Sparse compacted suffix tree with lexicographically ordered edges
#[derive(Debug, Clone)]
pub struct SuffixTree<'t> {
    text: &'t Text,
    nodes: Arena<TreeNode<'t>>,
    node_count: usize,
    block_len: usize,
    stats: BuildStats,
}

impl<'t> SuffixTree<'t> {
    /// Run the whole pipeline: fingerprint table, compacted trie, suffix tree.
    /// The trie and its fingerprints are dropped before returning.
    ///
    /// # Panics
    /// Panics if trie construction makes no forward progress (see
    /// [`CompactedTrie::build`]).
    pub fn build(text: &'t Text, params: &Params) -> Self {
        let trie = CompactedTrie::build(text, params);
        Self::from_trie(trie)
    }

    /// Rebuild `trie` with literal edge labels, consuming it.
    ///
    /// # Panics
    /// Panics if two siblings carry the same label, which means two distinct
    /// block fingerprints were assigned to equal blocks.
    pub fn from_trie(trie: CompactedTrie<'t>) -> Self {
        let text = trie.text();
        let mut nodes = Arena::with_root(TreeNode::new(Span::ROOT));
        let mut node_count = 0usize;

        let mut stack = vec![(NodeId::ROOT, NodeId::ROOT)];
        while let Some((source, target)) = stack.pop() {
            let mut ordered: Vec<(&'t [u8], NodeId)> = trie
                .children(source)
                .map(|child| {
                    let span = trie.node(child).span;
                    (text.slice(span.location, span.length), child)
                })
                .collect();
            sort_labels(&mut ordered);

            let mut created = Vec::with_capacity(ordered.len());
            for (label, child) in ordered {
                let id = nodes.alloc(TreeNode::new(trie.node(child).span));
                node_count += 1;
                nodes[target].children.insert(label, id);
                created.push((child, id));
            }

            // Reverse so the smallest label is expanded first
            stack.extend(created.into_iter().rev());
        }

        debug!(
            nodes = node_count,
            trie_nodes = trie.node_count(),
            "suffix tree assembled"
        );

        Self {
            text,
            nodes,
            node_count,
            block_len: trie.block_len(),
            stats: trie.stats(),
        }
    }

    pub fn text(&self) -> &'t Text {
        self.text
    }

    /// Block length the tree was built with
    pub fn block_len(&self) -> usize {
        self.block_len
    }

    /// Construction counters of the discarded trie
    pub fn stats(&self) -> BuildStats {
        self.stats
    }

    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// # Panics
    /// Panics if `id` does not belong to this tree.
    pub fn node(&self, id: NodeId) -> &TreeNode<'t> {
        &self.nodes[id]
    }

    /// Children of `id` as `(edge label, child)` in ascending label order
    pub fn children(&self, id: NodeId) -> impl Iterator<Item = (&'t [u8], NodeId)> + '_ {
        self.nodes[id]
            .children
            .iter()
            .map(|(&label, &child)| (label, child))
    }

    /// Child of `id` reached through exactly `label`
    pub fn child(&self, id: NodeId, label: &[u8]) -> Option<NodeId> {
        self.nodes[id].children.get(label).copied()
    }

    /// Label of the edge entering `id`, empty for the root
    pub fn label(&self, id: NodeId) -> &'t [u8] {
        let span = self.nodes[id].span;
        self.text.slice(span.location, span.length)
    }

    /// Nodes created during assembly, excluding the root
    pub fn node_count(&self) -> usize {
        self.node_count
    }
}

/// Sort sibling edges by label.
///
/// # Panics
/// Panics if two siblings carry the same label.
fn sort_labels<T>(edges: &mut [(&[u8], T)]) {
    edges.sort_unstable_by(|a, b| a.0.cmp(b.0));
    if let Some(pair) = edges.windows(2).find(|pair| pair[0].0 == pair[1].0) {
        panic!("duplicate edge label {:?} under one node", escape_bytes(pair[0].0));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn banana() -> Text {
        Text::from_terminated(b"banana$".to_vec()).unwrap()
    }

    fn params(block_len: usize) -> Params {
        Params::from_u64(1_000_000_007, 48_271, block_len).unwrap()
    }

    fn labels<'t>(tree: &SuffixTree<'t>, id: NodeId) -> Vec<&'t [u8]> {
        tree.children(id).map(|(label, _)| label).collect()
    }

    #[test]
    fn test_banana_canonical_shape() {
        let text = banana();
        let tree = SuffixTree::build(&text, &params(1));

        let root = tree.root();
        assert_eq!(
            labels(&tree, root),
            vec![&b"$"[..], &b"a"[..], &b"banana$"[..], &b"na"[..]]
        );

        let a = tree.child(root, b"a").unwrap();
        assert_eq!(labels(&tree, a), vec![&b"$"[..], &b"na"[..]]);

        let ana = tree.child(a, b"na").unwrap();
        assert_eq!(labels(&tree, ana), vec![&b"$"[..], &b"na$"[..]]);

        let na = tree.child(root, b"na").unwrap();
        assert_eq!(labels(&tree, na), vec![&b"$"[..], &b"na$"[..]]);

        assert_eq!(tree.node_count(), 10);
    }

    #[test]
    fn test_nodes_keep_trie_spans() {
        let text = banana();
        let tree = SuffixTree::build(&text, &params(1));
        let leaf = tree.child(tree.root(), b"banana$").unwrap();

        assert_eq!(tree.node(leaf).span, Span::new(0, 7));
        assert!(tree.node(leaf).is_leaf());
        assert_eq!(tree.label(leaf), b"banana$");
        assert_eq!(tree.label(tree.root()), b"");
    }

    #[test]
    fn test_node_ids_follow_label_order() {
        let text = banana();
        let tree = SuffixTree::build(&text, &params(1));

        // Siblings are allocated in label order: "$" comes first under the root
        let first = tree.children(tree.root()).next().unwrap().1;
        assert_eq!(first.index(), 1);
    }

    #[test]
    fn test_from_trie_matches_build() {
        let text = Text::from_terminated(b"abracadabra$".to_vec()).unwrap();
        let trie = CompactedTrie::build(&text, &params(2));
        let trie_nodes = trie.node_count();
        let tree = SuffixTree::from_trie(trie);

        assert_eq!(tree.node_count(), trie_nodes);
        assert_eq!(tree.block_len(), 2);
        assert_eq!(tree.stats().inserts, 12);
    }

    #[test]
    fn test_empty_text_gives_bare_root() {
        let text = Text::from_terminated(Vec::new()).unwrap();
        let tree = SuffixTree::build(&text, &params(4));
        assert_eq!(tree.node_count(), 0);
        assert!(tree.node(tree.root()).is_leaf());
    }

    #[test]
    fn test_sort_labels() {
        let mut edges = vec![(&b"na"[..], 3), (&b"$"[..], 1), (&b"banana$"[..], 0), (&b"a"[..], 2)];
        sort_labels(&mut edges);
        let order: Vec<i32> = edges.iter().map(|&(_, id)| id).collect();
        assert_eq!(order, vec![1, 2, 0, 3]);
    }

    #[test]
    #[should_panic(expected = "duplicate edge label")]
    fn test_duplicate_sibling_labels_panic() {
        let mut edges = vec![(&b"ab"[..], NodeId::ROOT), (&b"c"[..], NodeId::ROOT), (&b"ab"[..], NodeId::ROOT)];
        sort_labels(&mut edges);
    }
}
