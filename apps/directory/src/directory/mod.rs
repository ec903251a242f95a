//! Upload → directory PDF.
//!
//! `generate_directory` is the whole request as a plain function; the axum
//! handlers in `handlers` only move bytes in and out of it.

pub mod form;
pub mod handlers;

use tracing::{debug, info};

use crate::errors::AppError;
use crate::ingest::read_upload;
use crate::render::{render_directory, RenderSettings};

/// Download name of the generated document.
pub const DOWNLOAD_FILENAME: &str = "directory.pdf";

/// Multipart field carrying the upload.
pub const UPLOAD_FIELD: &str = "csv_file";

/// Parses `bytes` according to `filename`, drops columns that are empty in
/// every row and renders the directory.
pub fn generate_directory(
    filename: &str,
    bytes: &[u8],
    settings: &RenderSettings,
) -> Result<Vec<u8>, AppError> {
    let mut table = read_upload(filename, bytes)?;

    let dropped = table.drop_empty_columns();
    if !dropped.is_empty() {
        debug!(?dropped, "Dropped empty columns");
    }

    let pdf = render_directory(&table, settings).map_err(|e| AppError::Internal(e.into()))?;
    info!(
        families = table.row_count(),
        bytes = pdf.len(),
        "Directory generated"
    );
    Ok(pdf)
}
