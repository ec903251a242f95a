//! Pulls the CSV payload out of an uploaded ZIP archive.

use std::io::{Cursor, Read};

use tracing::debug;
use zip::ZipArchive;

use crate::ingest::IngestError;

/// Upper bound on the decompressed size of the selected CSV entry.
pub const MAX_CSV_ENTRY_BYTES: u64 = 256 * 1024 * 1024;

/// A CSV entry read out of an archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvEntry {
    pub name: String,
    pub contents: Vec<u8>,
}

/// Returns the first entry, in archive order, whose name ends with `.csv`.
pub fn extract_first_csv(bytes: &[u8]) -> Result<CsvEntry, IngestError> {
    let mut archive = ZipArchive::new(Cursor::new(bytes)).map_err(|e| IngestError::Archive(e.to_string()))?;

    let mut selected = None;
    for index in 0..archive.len() {
        let entry = archive
            .by_index_raw(index)
            .map_err(|e| IngestError::Archive(e.to_string()))?;
        if entry.name().ends_with(".csv") {
            selected = Some(index);
            break;
        }
    }
    let index = selected.ok_or(IngestError::MissingCsvInArchive)?;

    let entry = archive
        .by_index(index)
        .map_err(|e| IngestError::Archive(e.to_string()))?;
    let name = entry.name().to_string();

    let mut contents = Vec::new();
    entry
        .take(MAX_CSV_ENTRY_BYTES + 1)
        .read_to_end(&mut contents)
        .map_err(|e| IngestError::Archive(format!("failed to read {name}: {e}")))?;
    if contents.len() as u64 > MAX_CSV_ENTRY_BYTES {
        return Err(IngestError::Archive(format!(
            "{name} is larger than {MAX_CSV_ENTRY_BYTES} bytes when decompressed"
        )));
    }

    debug!(entry = %name, bytes = contents.len(), "Extracted CSV from archive");
    Ok(CsvEntry { name, contents })
}
