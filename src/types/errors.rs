use std::fmt;
use std::path::PathBuf;

/// Possible errors returned by methods on a pattern store
#[derive(Debug)]
pub enum StoreError {
    /// A pattern was inserted twice during a build. The catalog must be
    /// deduplicated upstream; the current build is aborted.
    DuplicatePattern(String),
    /// The ingestion layer found no catalog file at the given location.
    /// Reported so the caller can suggest running `fetch`.
    CatalogMissing(PathBuf),
    /// An index entry that must exist is absent from the key-value store,
    /// or its bytes do not decode. The on-disk index must be considered
    /// corrupted; rebuild it from the source catalog.
    CorruptIndex(String),
    /// The key-value backend refused to open, write or flush. Retrying is
    /// safe, but may yield the same result.
    PersistFailed,
    /// An I/O error surfaced from below.
    Io(std::io::Error),
    /// A malformed catalog row.
    Csv(csv::Error),
}

impl std::error::Error for StoreError {}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            StoreError::DuplicatePattern(pattern) => write!(
                f,
                "Error: Can't add two nodes with the same pattern {:?}.",
                pattern
            ),
            StoreError::CatalogMissing(path) => {
                write!(f, "Error: No catalog file at {}.", path.display())
            }
            StoreError::CorruptIndex(key) => write!(
                f,
                "Error: The index entry for key {:?} is missing or does \
                not decode. The index must be rebuilt.",
                key
            ),
            StoreError::PersistFailed => {
                write!(f, "Error: The key-value store cannot be written.")
            }
            StoreError::Io(err) => write!(f, "Error: {}", err),
            StoreError::Csv(err) => {
                write!(f, "Error: Malformed catalog row: {}", err)
            }
        }
    }
}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        StoreError::Io(err)
    }
}

impl From<csv::Error> for StoreError {
    fn from(err: csv::Error) -> Self {
        StoreError::Csv(err)
    }
}

impl From<lsm_tree::Error> for StoreError {
    fn from(_: lsm_tree::Error) -> Self {
        StoreError::PersistFailed
    }
}
