//------------ PersistStore --------------------------------------------------

//! The key-value layer the index lives in.
//!
//! Two key namespaces share one lsm-tree: a properties record is stored
//! under its bare pattern, an index node under `__index__` + pattern.
//! The root index node is stored under `__index__root`. Values are the
//! framed bytes of [`IndexNode`] and the serde serialization of
//! [`Properties`]; both round-trip exactly.

use std::path::Path;

use log::trace;
use lsm_tree::AbstractTree;

use crate::tree::{Node, Tree};
use crate::types::errors::StoreError;
use crate::types::index_node::{ChildInfo, IndexNode};
use crate::types::properties::Properties;

const INDEX_PREFIX: &str = "__index__";

/// The root index node is keyed by this literal name instead of a
/// pattern.
pub(crate) const ROOT_KEY: &str = "root";

pub struct PersistStore {
    tree: lsm_tree::Tree,
}

impl PersistStore {
    /// Opens (or creates) the store files in `path`.
    pub fn open(path: &Path) -> Result<PersistStore, StoreError> {
        if let Ok(tree) = lsm_tree::Config::new(path).open() {
            Ok(PersistStore { tree })
        } else {
            Err(StoreError::PersistFailed)
        }
    }

    fn insert(&self, key: &[u8], value: &[u8]) {
        self.tree.insert::<&[u8], &[u8]>(key, value, 0);
    }

    fn get(&self, key: &[u8]) -> Result<Option<lsm_tree::Slice>, StoreError> {
        Ok(self.tree.get(key, None)?)
    }

    /// Stores a properties record under its own pattern.
    pub fn add_properties(
        &self,
        properties: &Properties,
    ) -> Result<(), StoreError> {
        let value = serde_json::to_vec(properties)
            .map_err(|_| StoreError::PersistFailed)?;
        self.insert(properties.pattern().as_bytes(), &value);
        Ok(())
    }

    /// Returns the properties record for an exact pattern, if present.
    pub fn get_properties(
        &self,
        pattern: &str,
    ) -> Result<Option<Properties>, StoreError> {
        match self.get(pattern.as_bytes())? {
            Some(value) => serde_json::from_slice(&value)
                .map(Some)
                .map_err(|_| StoreError::CorruptIndex(pattern.to_string())),
            None => Ok(None),
        }
    }

    pub fn add_index_node(&self, pattern: &str, node: &IndexNode) {
        trace!("store index node for {:?}", pattern);
        let key = [INDEX_PREFIX, pattern].concat();
        self.insert(key.as_bytes(), &node.to_bytes());
    }

    /// Returns the index node stored for a pattern (or [`ROOT_KEY`]).
    /// An entry that exists but does not decode means the index is
    /// corrupt; a missing entry is left for the caller to judge.
    pub fn get_index_node(
        &self,
        pattern: &str,
    ) -> Result<Option<IndexNode>, StoreError> {
        let key = [INDEX_PREFIX, pattern].concat();
        match self.get(key.as_bytes())? {
            Some(value) => IndexNode::from_bytes(&value)
                .map(Some)
                .ok_or(StoreError::CorruptIndex(key)),
            None => Ok(None),
        }
    }

    /// Walks an optimized build trie and emits the flat index nodes the
    /// search operates on. Children inherit the descending `max_length`
    /// order from the optimization pass; non-root entries carry pattern
    /// suffixes relative to their parent, the root entry absolute
    /// patterns.
    pub fn write_index(&self, tree: &Tree) -> Result<(), StoreError> {
        let root = IndexNode {
            is_full: false,
            children: tree
                .children()
                .iter()
                .map(|child| ChildInfo {
                    max_length: child.max_length(),
                    suffix: child.pattern().to_string(),
                })
                .collect(),
        };
        self.add_index_node(ROOT_KEY, &root);

        for child in tree.children() {
            self.write_node(child);
        }

        self.flush_to_disk()
    }

    fn write_node(&self, node: &Node) {
        let start = node.pattern().len();
        let index_node = IndexNode {
            is_full: node.is_full(),
            children: node
                .children()
                .iter()
                .map(|child| ChildInfo {
                    max_length: child.max_length(),
                    suffix: child.pattern()[start..].to_string(),
                })
                .collect(),
        };
        self.add_index_node(node.pattern(), &index_node);

        for child in node.children() {
            self.write_node(child);
        }
    }

    /// Flushes the active memtable and compacts, so a finished build is
    /// fully on disk before the store handle is dropped.
    pub fn flush_to_disk(&self) -> Result<(), StoreError> {
        let segment = self.tree.flush_active_memtable(0)?;

        if let Some(segment) = segment {
            self.tree.register_segments(&[segment])?;
            self.tree.compact(
                std::sync::Arc::new(lsm_tree::compaction::Leveled::default()),
                0,
            )?;
        }

        Ok(())
    }

    pub fn approximate_len(&self) -> usize {
        self.tree.approximate_len()
    }

    pub fn disk_space(&self) -> u64 {
        self.tree.disk_space()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_and_properties_round_trip_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let store = PersistStore::open(dir.path()).unwrap();

        let mut tree = Tree::new();
        for pattern in ["Mozilla/4.0 Test", "Mozilla/5.0 Test"] {
            store
                .add_properties(&Properties {
                    property_name: pattern.to_string(),
                    browser: "Test".to_string(),
                    ..Default::default()
                })
                .unwrap();
            tree.insert(Node::full(pattern)).unwrap();
        }
        tree.optimize();
        store.write_index(&tree).unwrap();

        let root = store.get_index_node(ROOT_KEY).unwrap().unwrap();
        assert!(!root.is_full);
        assert_eq!(1, root.children.len());
        assert_eq!("Mozilla/", root.children[0].suffix);
        assert_eq!(16, root.children[0].max_length);

        let partial = store.get_index_node("Mozilla/").unwrap().unwrap();
        assert!(!partial.is_full);
        let suffixes: Vec<&str> = partial
            .children
            .iter()
            .map(|child| child.suffix.as_str())
            .collect();
        assert_eq!(vec!["4.0 Test", "5.0 Test"], suffixes);

        let leaf = store.get_index_node("Mozilla/5.0 Test").unwrap().unwrap();
        assert!(leaf.is_full);
        assert!(leaf.children.is_empty());

        let properties = store
            .get_properties("Mozilla/5.0 Test")
            .unwrap()
            .unwrap();
        assert_eq!("Mozilla/5.0 Test", properties.pattern());
        assert_eq!("Test", properties.browser);

        assert!(store.get_index_node("no such pattern").unwrap().is_none());
        assert!(store.get_properties("no such pattern").unwrap().is_none());
    }
}
