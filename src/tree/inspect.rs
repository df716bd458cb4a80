//! Structural queries and the diagnostic level dump
//!
//! All traversals use an explicit stack, so skewed trees from long texts
//! with small blocks cannot exhaust the call stack.

use super::assemble::SuffixTree;
use crate::text::escape_bytes;
use crate::trie::NodeId;
use anyhow::{bail, ensure, Result};

/// One entry of the level dump: an edge label and the depth of its parent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelEntry<'t> {
    /// 0 for children of the root
    pub level: usize,
    pub label: &'t [u8],
}

/// A root-to-leaf path and the suffix it spells
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuffixPath {
    /// Start position of the suffix in the text
    pub start: usize,
    /// Concatenated edge labels
    pub spelled: Vec<u8>,
}

impl<'t> SuffixTree<'t> {
    /// True when no child of the root has children of its own.
    ///
    /// Degenerate parameters (tiny alphabet, block length close to `n`)
    /// produce such flat trees.
    pub fn is_simple(&self) -> bool {
        self.children(self.root())
            .all(|(_, child)| self.node(child).is_leaf())
    }

    /// Maximum number of edges on a root-to-node path
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut stack = vec![(self.root(), 0usize)];
        while let Some((id, depth)) = stack.pop() {
            height = height.max(depth);
            stack.extend(self.children(id).map(|(_, child)| (child, depth + 1)));
        }
        height
    }

    /// Nodes reachable from the root, excluding the root
    pub fn reachable_nodes(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self.root()];
        while let Some(id) = stack.pop() {
            for (_, child) in self.children(id) {
                count += 1;
                stack.push(child);
            }
        }
        count
    }

    /// Number of leaves; equals `n` for a non-empty text
    pub fn leaf_count(&self) -> usize {
        self.preorder()
            .into_iter()
            .filter(|&id| id != self.root() && self.node(id).is_leaf())
            .count()
    }

    /// Every root-to-leaf path in lexicographic order
    pub fn suffixes(&self) -> Vec<SuffixPath> {
        let n = self.text().len();
        let mut paths = Vec::new();
        let mut stack: Vec<(NodeId, Vec<u8>)> = vec![(self.root(), Vec::new())];

        while let Some((id, spelled)) = stack.pop() {
            let node = self.node(id);
            if id != self.root() && node.is_leaf() {
                paths.push(SuffixPath {
                    start: n - spelled.len(),
                    spelled,
                });
                continue;
            }
            for (label, child) in self.children(id).collect::<Vec<_>>().into_iter().rev() {
                let mut next = spelled.clone();
                next.extend_from_slice(label);
                stack.push((child, next));
            }
        }
        paths
    }

    /// Suffix start positions in lexicographic order of the suffixes
    pub fn suffix_array(&self) -> Vec<usize> {
        let n = self.text().len();
        let mut starts = Vec::with_capacity(n);
        let mut stack = vec![(self.root(), 0usize)];

        while let Some((id, depth)) = stack.pop() {
            if id != self.root() && self.node(id).is_leaf() {
                starts.push(n - depth);
                continue;
            }
            let children: Vec<_> = self.children(id).collect();
            for (label, child) in children.into_iter().rev() {
                stack.push((child, depth + label.len()));
            }
        }
        starts
    }

    /// Check that root-to-leaf paths and suffixes are in bijection: one leaf
    /// per suffix, each spelling exactly that suffix, in ascending order.
    pub fn verify(&self) -> Result<()> {
        let text = self.text();
        let paths = self.suffixes();
        ensure!(
            paths.len() == text.len(),
            "tree has {} leaves for a text of length {}",
            paths.len(),
            text.len()
        );

        let mut seen = vec![false; text.len()];
        for path in &paths {
            if path.spelled != text.suffix(path.start) {
                bail!(
                    "leaf path {:?} does not spell the suffix at {}",
                    escape_bytes(&path.spelled),
                    path.start
                );
            }
            ensure!(!seen[path.start], "suffix {} reached by two leaves", path.start);
            seen[path.start] = true;
        }

        if let Some(pair) = paths.windows(2).find(|pair| pair[0].spelled >= pair[1].spelled) {
            bail!(
                "leaves out of order: {:?} before {:?}",
                escape_bytes(&pair[0].spelled),
                escape_bytes(&pair[1].spelled)
            );
        }
        Ok(())
    }

    /// Children listed level by level in pre-order: each label is followed
    /// by the labels of its subtree before its next sibling.
    pub fn levels(&self) -> Vec<LevelEntry<'t>> {
        let mut entries = Vec::with_capacity(self.node_count());
        let mut stack: Vec<(NodeId, usize)> = self
            .children(self.root())
            .map(|(_, child)| (child, 0))
            .collect::<Vec<_>>()
            .into_iter()
            .rev()
            .collect();

        while let Some((id, level)) = stack.pop() {
            entries.push(LevelEntry {
                level,
                label: self.label(id),
            });
            let children: Vec<_> = self.children(id).collect();
            stack.extend(children.into_iter().rev().map(|(_, child)| (child, level + 1)));
        }
        entries
    }

    fn preorder(&self) -> Vec<NodeId> {
        let mut order = Vec::with_capacity(self.node_count() + 1);
        let mut stack = vec![self.root()];
        while let Some(id) = stack.pop() {
            order.push(id);
            stack.extend(self.children(id).map(|(_, child)| child));
        }
        order
    }
}
