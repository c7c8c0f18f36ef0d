//! Fixed-depth prefix tree narrowing candidate clusters per line.
//!
//! The root maps exact token counts to per-count subtrees, so clusters with
//! different token counts can never meet. Below that, nodes are keyed by the
//! template's leading tokens (or the wildcard marker) down to at most
//! `max_node_depth` levels; the node reached there is a leaf holding the
//! candidate cluster identifiers sharing that prefix.
//!
//! The tree never owns clusters. Leaves hold bare identifiers that must be
//! re-resolved through the cluster cache before use; identifiers whose
//! clusters have been evicted are skipped during scoring and dropped lazily
//! on the next insertion at their leaf, via the `is_live` oracle.

use std::collections::HashMap;

use ahash::RandomState;

use crate::domain::cluster::ClusterId;
use crate::domain::tokens::has_digit;

type ChildMap = HashMap<String, TreeNode, RandomState>;
type CountMap = HashMap<usize, TreeNode, RandomState>;

/// A tree node is either an interior branch keyed by token, or a leaf
/// accumulating candidate cluster identifiers.
#[derive(Debug)]
enum TreeNode {
    Branch(ChildMap),
    Leaf(Vec<ClusterId>),
}

impl TreeNode {
    fn new(leaf: bool) -> Self {
        if leaf {
            TreeNode::Leaf(Vec::new())
        } else {
            TreeNode::Branch(ChildMap::default())
        }
    }
}

#[derive(Debug)]
pub(crate) struct PrefixTree {
    root: CountMap,
    max_node_depth: usize,
    max_children: usize,
    wildcard: String,
}

impl PrefixTree {
    pub(crate) fn new(max_node_depth: usize, max_children: usize, wildcard: String) -> Self {
        Self {
            root: CountMap::default(),
            max_node_depth,
            max_children,
            wildcard,
        }
    }

    /// Descend to the leaf for `tokens` and return its candidate identifiers.
    ///
    /// At each level an exact-token child is preferred, falling back to the
    /// wildcard child; a dead end means no cluster group can match. The
    /// returned identifiers may include stale entries for evicted clusters.
    pub(crate) fn leaf_candidates(&self, tokens: &[String]) -> Option<&[ClusterId]> {
        let count = tokens.len();
        let mut node = self.root.get(&count)?;

        let mut depth = 1;
        for token in tokens {
            if depth >= self.max_node_depth || depth >= count {
                break;
            }
            let TreeNode::Branch(children) = node else {
                debug_assert!(false, "interior prefix tree node must be a branch");
                return None;
            };
            node = children
                .get(token)
                .or_else(|| children.get(self.wildcard.as_str()))?;
            depth += 1;
        }

        match node {
            TreeNode::Leaf(ids) => Some(ids),
            TreeNode::Branch(_) => {
                debug_assert!(false, "terminal prefix tree node must be a leaf");
                None
            }
        }
    }

    /// Insert a cluster's template tokens, creating interior nodes as needed.
    ///
    /// Branching policy per interior level:
    /// - an existing exact child is descended into directly;
    /// - digit-bearing tokens always route through the wildcard child;
    /// - novel literals get an exact child while the `max_children` budget
    ///   allows, with the budget's last slot reserved for the wildcard child
    ///   that absorbs all further literals.
    ///
    /// At the leaf, identifiers that no longer satisfy `is_live` are dropped
    /// before the new one is appended.
    pub(crate) fn insert<F>(&mut self, tokens: &[String], id: ClusterId, is_live: F)
    where
        F: Fn(ClusterId) -> bool,
    {
        let count = tokens.len();
        let first_is_leaf = self.max_node_depth <= 1 || count <= 1;
        let mut node = self
            .root
            .entry(count)
            .or_insert_with(|| TreeNode::new(first_is_leaf));

        if count == 0 {
            if let TreeNode::Leaf(ids) = node {
                ids.push(id);
            }
            return;
        }

        let mut depth = 1;
        for token in tokens {
            if depth >= self.max_node_depth || depth >= count {
                break;
            }
            let TreeNode::Branch(children) = node else {
                debug_assert!(false, "interior prefix tree node must be a branch");
                return;
            };
            let child_is_leaf = depth + 1 >= self.max_node_depth || depth + 1 >= count;

            node = if children.contains_key(token.as_str()) {
                children
                    .get_mut(token.as_str())
                    .expect("child presence checked above")
            } else if has_digit(token) {
                children
                    .entry(self.wildcard.clone())
                    .or_insert_with(|| TreeNode::new(child_is_leaf))
            } else if children.contains_key(self.wildcard.as_str()) {
                if children.len() < self.max_children {
                    children
                        .entry(token.clone())
                        .or_insert_with(|| TreeNode::new(child_is_leaf))
                } else {
                    children
                        .entry(self.wildcard.clone())
                        .or_insert_with(|| TreeNode::new(child_is_leaf))
                }
            } else if children.len() + 1 < self.max_children {
                children
                    .entry(token.clone())
                    .or_insert_with(|| TreeNode::new(child_is_leaf))
            } else {
                // The budget's last slot goes to the wildcard child, which
                // from now on absorbs every unseen literal at this level.
                children
                    .entry(self.wildcard.clone())
                    .or_insert_with(|| TreeNode::new(child_is_leaf))
            };

            depth += 1;
        }

        match node {
            TreeNode::Leaf(ids) => {
                ids.retain(|existing| is_live(*existing));
                ids.push(id);
            }
            TreeNode::Branch(_) => debug_assert!(false, "terminal prefix tree node must be a leaf"),
        }
    }

    /// Widest fan-out of any interior node below the token-count layer.
    #[cfg(test)]
    pub(crate) fn max_fanout(&self) -> usize {
        fn walk(node: &TreeNode) -> usize {
            match node {
                TreeNode::Leaf(_) => 0,
                TreeNode::Branch(children) => children
                    .len()
                    .max(children.values().map(walk).max().unwrap_or(0)),
            }
        }
        self.root.values().map(walk).max().unwrap_or(0)
    }
}
