//! Upload ingestion: decide how to read the file, unpack it if it is an
//! archive, and parse the CSV into a `Table`.

pub mod archive;
pub mod filename;
pub mod parse;

use thiserror::Error;
use tracing::info;

use crate::models::table::Table;

pub use filename::{secure_filename, upload_kind, UploadKind};

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("Please upload a CSV or ZIP file containing a CSV.")]
    UnsupportedFileType,

    #[error("No CSV file found in ZIP.")]
    MissingCsvInArchive,

    #[error("{0}")]
    Archive(String),

    #[error("{0}")]
    Csv(String),

    #[error("No columns to parse from file")]
    NoColumns,

    #[error("Expected {expected} fields in line {line}, saw {saw}")]
    TooManyFields { line: u64, expected: usize, saw: usize },
}

/// Reads an uploaded file into a `Table`.
///
/// `.csv` uploads are parsed directly; `.zip` uploads are parsed from their
/// first `.csv` entry. Columns are not pruned here.
pub fn read_upload(filename: &str, bytes: &[u8]) -> Result<Table, IngestError> {
    let secure_name = secure_filename(filename);

    let table = match upload_kind(&secure_name) {
        Some(UploadKind::Csv) => parse::parse_csv(bytes)?,
        Some(UploadKind::Zip) => {
            let entry = archive::extract_first_csv(bytes)?;
            parse::parse_csv(&entry.contents)?
        }
        None => return Err(IngestError::UnsupportedFileType),
    };

    info!(
        file = %secure_name,
        rows = table.row_count(),
        columns = table.columns().len(),
        "Parsed upload"
    );
    Ok(table)
}
