// Copyright (c) 2025 Kamus Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Node implementation for the Kamus Trie.
//!
//! Each node owns its children outright; there is no sharing between
//! branches and no link back to the parent.
//!
//! A word of `n` characters is a chain of `n` nested nodes, so nothing here
//! recurses along that chain: cloning, comparing, counting, removing and
//! dropping all walk the tree with an explicit heap stack.

use std::collections::{btree_map, BTreeMap};
use std::fmt;

/// A node in the Kamus Trie.
///
/// Each node represents one character in a word path. A node that ends a
/// stored word carries that word's meaning.
#[derive(Default, Eq)]
pub struct TrieNode {
    /// Map of characters to child nodes, ordered by code point
    pub(super) children: BTreeMap<char, TrieNode>,

    /// Meaning of the word ending at this node, `None` when no word ends here
    pub(super) meaning: Option<String>,
}

impl TrieNode {
    /// Creates a new empty trie node.
    pub(super) fn new() -> Self {
        Self::default()
    }

    /// True if a stored word ends at this node.
    #[inline]
    pub(super) fn is_end_of_word(&self) -> bool {
        self.meaning.is_some()
    }

    /// Meaning of the word ending at this node.
    #[inline]
    pub(super) fn meaning(&self) -> Option<&str> {
        self.meaning.as_deref()
    }

    /// Returns the child reached by `c`, if any.
    #[inline]
    pub(super) fn child(&self, c: char) -> Option<&TrieNode> {
        self.children.get(&c)
    }

    /// A node that is neither a word nor a prefix of one can be detached.
    #[inline]
    pub(super) fn is_prunable(&self) -> bool {
        self.children.is_empty() && self.meaning.is_none()
    }

    /// Removes the word spelled by `chars` below this node.
    ///
    /// After the meaning is taken, the chain of nodes that no longer lead to
    /// any word is cut off at the deepest ancestor that is still needed:
    /// this node, a node ending another word, or a node with other children.
    /// This node itself is never detached. Nothing changes when the path is
    /// missing or ends on a node that is not a word.
    pub(super) fn remove_path(&mut self, chars: &[char]) -> Option<String> {
        let mut cut = 0;
        let mut node: &TrieNode = self;
        for (depth, c) in chars.iter().enumerate() {
            if depth > 0 && (node.is_end_of_word() || node.children.len() > 1) {
                cut = depth;
            }
            node = node.children.get(c)?;
        }
        if !node.is_end_of_word() {
            return None;
        }
        let target_has_children = !node.children.is_empty();

        let removed = self.descend_mut(chars)?.meaning.take();
        if target_has_children || chars.is_empty() {
            return removed;
        }

        // The detached chain is dropped iteratively, see `Drop` below.
        self.descend_mut(&chars[..cut])?
            .children
            .remove(&chars[cut]);
        removed
    }

    fn descend_mut(&mut self, chars: &[char]) -> Option<&mut TrieNode> {
        chars
            .iter()
            .try_fold(self, |node, c| node.children.get_mut(c))
    }

    /// Counts this node and all of its descendants.
    pub(super) fn count_nodes(&self) -> usize {
        let mut count = 0;
        let mut pending = vec![self];
        while let Some(node) = pending.pop() {
            count += 1;
            pending.extend(node.children.values());
        }
        count
    }

    /// Counts the words stored in this subtree.
    pub(super) fn count_words(&self) -> usize {
        let mut count = 0;
        let mut pending = vec![self];
        while let Some(node) = pending.pop() {
            count += usize::from(node.is_end_of_word());
            pending.extend(node.children.values());
        }
        count
    }
}

impl Drop for TrieNode {
    fn drop(&mut self) {
        // Detach every descendant before it is dropped, so each node dies
        // childless and no drop glue recurses.
        let mut pending: Vec<TrieNode> =
            std::mem::take(&mut self.children).into_values().collect();
        while let Some(mut node) = pending.pop() {
            pending.extend(std::mem::take(&mut node.children).into_values());
        }
    }
}

/// One node being copied: its source, the source children not yet visited,
/// and the copies made so far.
struct CloneFrame<'a> {
    edge: Option<char>,
    source: &'a TrieNode,
    remaining: btree_map::Iter<'a, char, TrieNode>,
    children: BTreeMap<char, TrieNode>,
}

impl<'a> CloneFrame<'a> {
    fn new(edge: Option<char>, source: &'a TrieNode) -> Self {
        Self {
            edge,
            source,
            remaining: source.children.iter(),
            children: BTreeMap::new(),
        }
    }

    fn finish(self) -> (Option<char>, TrieNode) {
        let node = TrieNode {
            children: self.children,
            meaning: self.source.meaning.clone(),
        };
        (self.edge, node)
    }
}

impl Clone for TrieNode {
    fn clone(&self) -> Self {
        let mut ancestors: Vec<CloneFrame<'_>> = Vec::new();
        let mut frame = CloneFrame::new(None, self);
        loop {
            if let Some((&c, child)) = frame.remaining.next() {
                let parent = std::mem::replace(&mut frame, CloneFrame::new(Some(c), child));
                ancestors.push(parent);
                continue;
            }

            let (edge, node) = frame.finish();
            match (ancestors.pop(), edge) {
                (Some(parent), Some(c)) => {
                    frame = parent;
                    frame.children.insert(c, node);
                }
                _ => return node,
            }
        }
    }
}

impl PartialEq for TrieNode {
    fn eq(&self, other: &Self) -> bool {
        let mut pending = vec![(self, other)];
        while let Some((left, right)) = pending.pop() {
            if left.meaning != right.meaning || left.children.len() != right.children.len() {
                return false;
            }
            for ((a, left_child), (b, right_child)) in left.children.iter().zip(&right.children) {
                if a != b {
                    return false;
                }
                pending.push((left_child, right_child));
            }
        }
        true
    }
}

impl fmt::Debug for TrieNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Only the outgoing edges, not the subtrees below them.
        f.debug_struct("TrieNode")
            .field("meaning", &self.meaning)
            .field("children", &self.children.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(word: &str) -> Vec<char> {
        word.chars().collect()
    }

    fn chain(word: &str, meaning: &str) -> TrieNode {
        let mut root = TrieNode::new();
        let leaf = path(word)
            .into_iter()
            .fold(&mut root, |node, c| node.children.entry(c).or_default());
        leaf.meaning = Some(meaning.to_string());
        root
    }

    #[test]
    fn new_node_is_empty() {
        let node = TrieNode::new();
        assert!(!node.is_end_of_word());
        assert_eq!(node.meaning(), None);
        assert!(node.children.is_empty());
        assert!(node.is_prunable());
        assert_eq!(node.count_nodes(), 1);
    }

    #[test]
    fn remove_path_on_self_keeps_node() {
        let mut node = TrieNode::new();
        node.meaning = Some("meaning".to_string());
        assert_eq!(node.remove_path(&[]).as_deref(), Some("meaning"));
        assert!(node.is_prunable());
    }

    #[test]
    fn remove_path_keeps_node_with_children() {
        let mut node = chain("ab", "ab");
        if let Some(a) = node.children.get_mut(&'a') {
            a.meaning = Some("a".to_string());
        }
        assert_eq!(node.remove_path(&path("a")).as_deref(), Some("a"));
        assert_eq!(node.count_nodes(), 3);
        assert_eq!(node.count_words(), 1);
    }

    #[test]
    fn remove_path_detaches_dead_chain() {
        let mut node = chain("abc", "abc");
        assert_eq!(node.remove_path(&path("abc")).as_deref(), Some("abc"));
        assert!(node.is_prunable());
        assert_eq!(node.count_nodes(), 1);
    }

    #[test]
    fn remove_path_missing_edge_is_noop() {
        let mut node = chain("a", "a");
        assert_eq!(node.remove_path(&path("b")), None);
        assert_eq!(node.remove_path(&path("ab")), None);
        assert_eq!(node, chain("a", "a"));
    }

    #[test]
    fn remove_path_on_prefix_only_is_noop() {
        let mut root = chain("ab", "ab");
        let before = root.clone();
        assert_eq!(root.remove_path(&path("a")), None);
        assert_eq!(root, before);
    }

    #[test]
    fn counts_words_and_nodes() {
        let mut root = chain("ab", "ab");
        if let Some(a) = root.children.get_mut(&'a') {
            a.meaning = Some("a".to_string());
        }

        assert_eq!(root.count_nodes(), 3);
        assert_eq!(root.count_words(), 2);
    }

    #[test]
    fn clone_and_eq_compare_whole_subtrees() {
        let mut root = chain("abc", "abc");
        root.children.insert('x', chain("yz", "xyz"));
        let copy = root.clone();
        assert_eq!(copy, root);
        assert_eq!(copy.count_nodes(), root.count_nodes());

        let mut changed = copy.clone();
        changed.remove_path(&path("xyz"));
        assert_ne!(changed, root);
        assert_ne!(chain("ab", "m"), chain("ab", "n"));
        assert_ne!(chain("ab", "m"), chain("ac", "m"));
    }

    #[test]
    fn deep_chain_does_not_recurse() {
        let word = "a".repeat(200_000);
        let mut root = chain(&word, "deep");
        assert_eq!(root.count_nodes(), 200_001);
        assert_eq!(root.count_words(), 1);

        let copy = root.clone();
        assert_eq!(copy, root);
        drop(copy);

        assert_eq!(root.remove_path(&path(&word)).as_deref(), Some("deep"));
        assert_eq!(root.count_nodes(), 1);
    }
}
