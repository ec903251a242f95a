//! Directory document rendering: layout into a display list, then PDF output.
//!
//! Rendering is CPU-bound and synchronous. Handlers call it through
//! `tokio::task::spawn_blocking`.

pub mod directory;
pub mod pdf;
pub mod surface;

use chrono::Utc;
use thiserror::Error;

use crate::layout::PageConfig;
use crate::models::table::Table;

pub use directory::{layout_directory, DocumentHeader};

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("PDF output error: {0}")]
    Pdf(String),
}

/// Everything the renderer needs besides the table. Cheap to clone into a
/// blocking task.
#[derive(Debug, Clone)]
pub struct RenderSettings {
    pub header: DocumentHeader,
    pub page: PageConfig,
}

/// Renders the whole directory and returns the finished PDF bytes.
pub fn render_directory(table: &Table, settings: &RenderSettings) -> Result<Vec<u8>, RenderError> {
    let list = layout_directory(table, &settings.header, &settings.page);
    let info = pdf::DocumentInfo {
        title: settings.header.title.clone(),
        created_at: Utc::now(),
    };
    pdf::write_pdf(&list, &info)
}
