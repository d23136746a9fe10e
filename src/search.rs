//! The read side: walking the persisted index for a user agent.
//!
//! The walk is a depth-first descent over index nodes with
//! branch-and-bound pruning. Children are stored sorted by their
//! subtree's `max_length` descending, so as soon as a child's bound
//! drops below the significant length already accumulated on the
//! current path, no later sibling can yield a better match and the
//! scan of that child list stops.

use log::{debug, trace};

use crate::matcher::{matches, significant_length};
use crate::persist::{PersistStore, ROOT_KEY};
use crate::types::errors::StoreError;
use crate::types::index_node::IndexNode;

//------------ SearchCtx -----------------------------------------------------

/// Per-call search state: the user agent under test and the best match
/// found so far. One instance per pass; never shared.
struct SearchCtx<'a> {
    user_agent: &'a str,
    ignore_case: bool,
    best_pattern: String,
    best_length: u32,
}

impl<'a> SearchCtx<'a> {
    fn new(user_agent: &'a str, ignore_case: bool) -> Self {
        SearchCtx {
            user_agent,
            ignore_case,
            best_pattern: String::new(),
            best_length: 0,
        }
    }

    fn update(&mut self, pattern: &str, length: u32) {
        if length > self.best_length {
            trace!("new best match {:?} (score {})", pattern, length);
            self.best_pattern = pattern.to_string();
            self.best_length = length;
        }
    }
}

/// Returns the best matching catalog pattern for `user_agent`, if any.
///
/// Runs a case-sensitive pass first and falls back to a case-insensitive
/// one, mirroring how the catalog is meant to be consumed. The result is
/// deterministic for a given index.
pub(crate) fn search(
    store: &PersistStore,
    root: &IndexNode,
    user_agent: &str,
) -> Result<Option<String>, StoreError> {
    let mut ctx = SearchCtx::new(user_agent, false);
    descend(store, root, "", 0, &mut ctx)?;

    if ctx.best_pattern.is_empty() {
        debug!("no case-sensitive match, retrying case-insensitively");
        ctx = SearchCtx::new(user_agent, true);
        descend(store, root, "", 0, &mut ctx)?;
    }

    if ctx.best_pattern.is_empty() {
        Ok(None)
    } else {
        Ok(Some(ctx.best_pattern))
    }
}

fn descend(
    store: &PersistStore,
    node: &IndexNode,
    pattern: &str,
    length: u32,
    ctx: &mut SearchCtx,
) -> Result<(), StoreError> {
    for child in &node.children {
        // Siblings are sorted by their bound, descending. Note that the
        // comparison must stay strict: a subtree bound may equal the
        // accumulated length when the only pattern below adds nothing
        // but a trailing star, and that pattern still has to be found.
        if child.max_length < length {
            break;
        }

        let child_pattern = [pattern, &child.suffix].concat();

        // Probe with a trailing star so a prefix match is enough to
        // warrant descending; the exact check happens below.
        let mut probe = child_pattern.clone();
        if !probe.ends_with('*') {
            probe.push('*');
        }
        if !matches(&probe, ctx.user_agent, ctx.ignore_case) {
            continue;
        }

        let child_node = store
            .get_index_node(&child_pattern)?
            .ok_or_else(|| StoreError::CorruptIndex(child_pattern.clone()))?;
        let child_length = length + significant_length(&child.suffix);

        if child_node.is_full {
            // A pattern ending in a star already matched via the probe.
            if child_pattern.ends_with('*')
                || matches(&child_pattern, ctx.user_agent, ctx.ignore_case)
            {
                ctx.update(&child_pattern, child_length);
            }
        }

        if !child_node.children.is_empty() {
            descend(store, &child_node, &child_pattern, child_length, ctx)?;
        }
    }

    Ok(())
}

/// Loads the root index node; its absence means there is no usable
/// index at all.
pub(crate) fn load_root(
    store: &PersistStore,
) -> Result<IndexNode, StoreError> {
    store
        .get_index_node(ROOT_KEY)?
        .ok_or_else(|| StoreError::CorruptIndex(ROOT_KEY.to_string()))
}
