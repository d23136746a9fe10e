//! Catalog ingestion: `browscap.csv` rows into [`Properties`] records.
//!
//! The catalog file starts with two version-metadata rows that are not
//! CSV records; they are skipped here. The third row names the fields
//! and becomes the CSV header, so records map onto [`Properties`] by
//! column name. Quoting is handled by the `csv` crate; `"true"` and
//! `"false"` values stay plain strings.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use log::debug;

use crate::types::errors::StoreError;
use crate::types::properties::Properties;

/// Opens the catalog at `path` and returns an iterator over its
/// records. A missing file is [`StoreError::CatalogMissing`], so the
/// caller can suggest fetching it first.
pub fn read_catalog(path: &Path) -> Result<CatalogReader, StoreError> {
    if !path.exists() {
        return Err(StoreError::CatalogMissing(path.to_path_buf()));
    }

    let file = File::open(path)?;
    let mut reader = BufReader::new(file);

    let mut version_row = String::new();
    for _ in 0..2 {
        version_row.clear();
        reader.read_line(&mut version_row)?;
    }
    debug!("catalog version row: {}", version_row.trim_end());

    Ok(CatalogReader {
        records: csv::Reader::from_reader(reader).into_deserialize(),
    })
}

/// Iterator over the records of one catalog file.
pub struct CatalogReader {
    records: csv::DeserializeRecordsIntoIter<BufReader<File>, Properties>,
}

impl Iterator for CatalogReader {
    type Item = Result<Properties, StoreError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.records
            .next()
            .map(|record| record.map_err(StoreError::from))
    }
}
