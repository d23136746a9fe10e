//------------ PatternStore --------------------------------------------------

//! The high-level surface: building an index from catalog records and
//! answering user-agent lookups against it.

use std::path::Path;

use log::info;

use crate::persist::PersistStore;
use crate::search;
use crate::tree::{Node, Tree};
use crate::types::errors::StoreError;
use crate::types::index_node::IndexNode;
use crate::types::properties::Properties;

/// A persisted browscap pattern index.
///
/// A store is either produced by [`PatternStore::build`], which writes a
/// fresh index directory, or attached to an existing one with
/// [`PatternStore::open`]. The underlying key-value handle lives as long
/// as the store value and is released on drop; opened stores are only
/// ever read from.
pub struct PatternStore {
    persist: PersistStore,
    root: IndexNode,
}

impl PatternStore {
    /// Opens an existing index directory for searching. Fails with
    /// [`StoreError::CorruptIndex`] if the root index node is missing.
    pub fn open(path: &Path) -> Result<PatternStore, StoreError> {
        let persist = PersistStore::open(path)?;
        let root = search::load_root(&persist)?;
        Ok(PatternStore { persist, root })
    }

    /// Builds a fresh index at `path` from catalog records.
    ///
    /// A build is always a full rebuild: an existing directory is
    /// removed first, and a directory left behind by a failed build is
    /// removed again, so `path` either holds a complete index or
    /// nothing.
    pub fn build<I>(path: &Path, records: I) -> Result<PatternStore, StoreError>
    where
        I: IntoIterator<Item = Properties>,
    {
        Self::try_build(path, records.into_iter().map(Ok))
    }

    /// Like [`PatternStore::build`], for fallible record sources such as
    /// the CSV reader. The first error aborts the build.
    pub fn try_build<I>(
        path: &Path,
        records: I,
    ) -> Result<PatternStore, StoreError>
    where
        I: IntoIterator<Item = Result<Properties, StoreError>>,
    {
        if path.exists() {
            std::fs::remove_dir_all(path)?;
        }
        std::fs::create_dir_all(path)?;

        match Self::build_into(path, records) {
            Ok(store) => Ok(store),
            Err(err) => {
                let _ = std::fs::remove_dir_all(path);
                Err(err)
            }
        }
    }

    fn build_into<I>(path: &Path, records: I) -> Result<PatternStore, StoreError>
    where
        I: IntoIterator<Item = Result<Properties, StoreError>>,
    {
        let persist = PersistStore::open(path)?;
        let mut tree = Tree::new();
        let mut count: usize = 0;

        for properties in records {
            let properties = properties?;
            // The record goes to disk right away; the build trie only
            // keeps the pattern, which doubles as the retrieval key.
            persist.add_properties(&properties)?;
            tree.insert(Node::full(properties.pattern()))?;
            count += 1;
        }
        info!("inserted {} catalog patterns", count);

        tree.optimize();
        persist.write_index(&tree)?;
        info!(
            "index written: ~{} entries, {} bytes on disk",
            persist.approximate_len(),
            persist.disk_space()
        );

        let root = search::load_root(&persist)?;
        Ok(PatternStore { persist, root })
    }

    /// Returns the best matching catalog pattern for a user agent, or
    /// `None` if nothing in the catalog matches.
    pub fn search(
        &self,
        user_agent: &str,
    ) -> Result<Option<String>, StoreError> {
        search::search(&self.persist, &self.root, user_agent)
    }

    /// Searches and promotes the winning pattern to its full properties
    /// record.
    pub fn lookup(
        &self,
        user_agent: &str,
    ) -> Result<Option<Properties>, StoreError> {
        match self.search(user_agent)? {
            Some(pattern) => self
                .get_properties(&pattern)?
                .ok_or(StoreError::CorruptIndex(pattern))
                .map(Some),
            None => Ok(None),
        }
    }

    /// Returns the properties stored for an exact catalog pattern.
    pub fn get_properties(
        &self,
        pattern: &str,
    ) -> Result<Option<Properties>, StoreError> {
        self.persist.get_properties(pattern)
    }
}
