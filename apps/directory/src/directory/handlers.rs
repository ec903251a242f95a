//! Axum route handlers for the upload page and directory generation.

use axum::{
    extract::{Multipart, State},
    http::header,
    response::{Html, IntoResponse, Response},
};
use bytes::Bytes;
use tracing::info_span;
use uuid::Uuid;

use crate::directory::form::UPLOAD_FORM_HTML;
use crate::directory::{generate_directory, DOWNLOAD_FILENAME, UPLOAD_FIELD};
use crate::errors::AppError;
use crate::state::AppState;

/// GET /
pub async fn handle_upload_form() -> Html<&'static str> {
    Html(UPLOAD_FORM_HTML)
}

/// POST /
///
/// Reads the `csv_file` field and answers with the PDF as an attachment. A
/// field without a filename (nothing chosen in the form) gets the form back.
pub async fn handle_generate(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Response, AppError> {
    let Some((filename, data)) = read_upload_field(&mut multipart).await? else {
        return Err(AppError::Validation(format!(
            "Missing form field '{UPLOAD_FIELD}'"
        )));
    };
    if filename.is_empty() {
        return Ok(Html(UPLOAD_FORM_HTML).into_response());
    }

    let request_id = Uuid::new_v4();
    let span = info_span!("generate_directory", %request_id, %filename);
    let settings = state.render_settings.clone();

    // CPU-bound layout and PDF writing runs off the async executor.
    let pdf = tokio::task::spawn_blocking(move || {
        let _entered = span.enter();
        generate_directory(&filename, &data, &settings)
    })
    .await
    .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed in directory render: {e}")))??;

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{DOWNLOAD_FILENAME}\""),
            ),
        ],
        pdf,
    )
        .into_response())
}

/// Returns the first `csv_file` field as (client filename, contents).
async fn read_upload_field(multipart: &mut Multipart) -> Result<Option<(String, Bytes)>, AppError> {
    let upload_error = |e: axum::extract::multipart::MultipartError| AppError::Upload {
        status: e.status(),
        message: e.body_text(),
    };

    while let Some(field) = multipart.next_field().await.map_err(upload_error)? {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }
        let filename = field.file_name().unwrap_or_default().to_string();
        let data = field.bytes().await.map_err(upload_error)?;
        return Ok(Some((filename, data)));
    }
    Ok(None)
}
