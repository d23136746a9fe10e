//! The in-memory trie the index is built from.
//!
//! The tree is grown one catalog pattern at a time and keeps just enough
//! structure for a fast parent search:
//!
//! - a child's pattern is longer than its parent's;
//! - sibling nodes never share a prefix beyond their parent's pattern;
//! - every catalog pattern is held by exactly one `Full` node;
//! - `Partial` nodes are synthesized when two patterns share a common
//!   prefix neither wholly contains.
//!
//! Patterns are stored absolute during build; the index writer strips
//! them down to suffixes when the tree is persisted.

use log::trace;

use crate::matcher::significant_length;
use crate::types::errors::StoreError;

//------------ Node ----------------------------------------------------------

/// A build-trie node. The two variants carry the same payload; what
/// differs is their meaning: a `Full` node is an actual catalog pattern,
/// a `Partial` node only exists to host the common prefix of its
/// children. `max_length` stays 0 until [`Tree::optimize`] runs.
#[derive(Debug)]
pub enum Node {
    Full {
        pattern: String,
        max_length: u32,
        children: Vec<Node>,
    },
    Partial {
        pattern: String,
        max_length: u32,
        children: Vec<Node>,
    },
}

impl Node {
    /// A fresh node for a catalog pattern, without children.
    pub fn full(pattern: impl Into<String>) -> Node {
        Node::Full {
            pattern: pattern.into(),
            max_length: 0,
            children: vec![],
        }
    }

    fn partial(pattern: String, children: Vec<Node>) -> Node {
        Node::Partial {
            pattern,
            max_length: 0,
            children,
        }
    }

    pub fn pattern(&self) -> &str {
        match self {
            Node::Full { pattern, .. } | Node::Partial { pattern, .. } => {
                pattern
            }
        }
    }

    pub fn is_full(&self) -> bool {
        matches!(self, Node::Full { .. })
    }

    pub fn max_length(&self) -> u32 {
        match self {
            Node::Full { max_length, .. }
            | Node::Partial { max_length, .. } => *max_length,
        }
    }

    pub fn children(&self) -> &[Node] {
        match self {
            Node::Full { children, .. } | Node::Partial { children, .. } => {
                children
            }
        }
    }

    fn children_mut(&mut self) -> &mut Vec<Node> {
        match self {
            Node::Full { children, .. } | Node::Partial { children, .. } => {
                children
            }
        }
    }

    // The largest significant pattern length reachable in this subtree.
    // Only leaves contribute: an interior node takes the maximum over its
    // children and its own pattern is not considered. The search prune
    // threshold depends on exactly this.
    fn calc_max_length(&mut self) -> u32 {
        let max = if self.children().is_empty() {
            significant_length(self.pattern())
        } else {
            self.children_mut()
                .iter_mut()
                .map(|child| child.calc_max_length())
                .max()
                .unwrap_or(0)
        };

        match self {
            Node::Full { max_length, .. }
            | Node::Partial { max_length, .. } => *max_length = max,
        }

        max
    }

    fn sort_children(&mut self) {
        for child in self.children_mut() {
            child.sort_children();
        }
        self.children_mut()
            .sort_by(|a, b| b.max_length().cmp(&a.max_length()));
    }
}

//------------ Tree ----------------------------------------------------------

/// The root of the build trie. It has children but no pattern of its own.
#[derive(Debug, Default)]
pub struct Tree {
    children: Vec<Node>,
}

impl Tree {
    pub fn new() -> Tree {
        Tree::default()
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// Adds a freshly constructed [`Node::full`] in its proper place.
    ///
    /// The insertion point is found by descending along the single child
    /// per level that has pattern bytes in common with the new pattern
    /// beyond the already matched prefix. Since siblings never share a
    /// prefix beyond their parent's pattern, at most one child can
    /// qualify, so no backtracking is needed.
    pub fn insert(&mut self, node: Node) -> Result<(), StoreError> {
        trace!("insert pattern {:?}", node.pattern());
        insert_into(&mut self.children, node, 0)
    }

    /// Prepares the tree for the index writer: computes `max_length` for
    /// every node bottom-up, then sorts all sibling lists by it,
    /// descending. The descending order is what lets the search stop
    /// scanning siblings once no subtree can improve on the running
    /// score.
    pub fn optimize(&mut self) {
        for child in &mut self.children {
            child.calc_max_length();
        }
        for child in &mut self.children {
            child.sort_children();
        }
        self.children
            .sort_by(|a, b| b.max_length().cmp(&a.max_length()));
    }
}

/// Recursive insertion step: find the one child overlapping the new
/// pattern past `score` matched bytes and either descend, reject a
/// duplicate, promote a partial, or split.
fn insert_into(
    children: &mut Vec<Node>,
    new: Node,
    score: usize,
) -> Result<(), StoreError> {
    for idx in 0..children.len() {
        let extra = common_from(children[idx].pattern(), new.pattern(), score);
        if extra == 0 {
            continue;
        }

        let score = score + extra;
        let host_len = children[idx].pattern().len();

        if score == host_len && score == new.pattern().len() {
            if children[idx].is_full() {
                return Err(StoreError::DuplicatePattern(
                    new.pattern().to_string(),
                ));
            }
            // The new full pattern equals the synthetic prefix: it
            // takes the partial's place and inherits its children.
            let old = std::mem::replace(&mut children[idx], new);
            if let Node::Partial { children: orphans, .. } = old {
                children[idx].children_mut().extend(orphans);
            }
            return Ok(());
        }

        if score == host_len {
            // The host's pattern is a proper prefix of the new one;
            // the insertion point lies somewhere below it.
            return insert_into(children[idx].children_mut(), new, score);
        }

        // The patterns diverge inside the host's pattern. A new partial
        // node takes the host's slot, carrying the common prefix, with
        // the host and the new node as its children.
        let prefix = new.pattern()[..score].to_string();
        trace!("split {:?} off {:?}", prefix, children[idx].pattern());
        let host =
            std::mem::replace(&mut children[idx], Node::partial(prefix, vec![]));
        children[idx].children_mut().push(host);
        children[idx].children_mut().push(new);
        return Ok(());
    }

    // No overlap with any sibling; the new node lands here.
    children.push(new);
    Ok(())
}

// The number of bytes the two patterns have in common, starting at
// `start`. The count is shrunk back to a character boundary so the
// common prefix can always be sliced off.
fn common_from(a: &str, b: &str, start: usize) -> usize {
    let common = a
        .bytes()
        .zip(b.bytes())
        .skip(start)
        .take_while(|(left, right)| left == right)
        .count();

    let mut end = start + common;
    while !b.is_char_boundary(end) {
        end -= 1;
    }
    end - start
}
