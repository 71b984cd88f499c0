use axum::Json;
use axum::extract::multipart::Field;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::domain::SourceFile;

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

pub(super) fn error_response(status: StatusCode, error: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: error.into(),
        }),
    )
        .into_response()
}

/// Buffers one multipart field into a [`SourceFile`].
pub(super) async fn read_source_file(field: Field<'_>) -> Result<SourceFile, Response> {
    let filename = field.file_name().unwrap_or("unknown").to_string();
    let declared_mime = field
        .content_type()
        .filter(|mime| *mime != "application/octet-stream")
        .map(str::to_string);

    let data = field.bytes().await.map_err(|e| {
        tracing::error!(error = %e, filename = %filename, "Failed to read file bytes");
        error_response(StatusCode::BAD_REQUEST, format!("Failed to read file: {e}"))
    })?;

    tracing::debug!(
        filename = %filename,
        content_type = declared_mime.as_deref().unwrap_or("-"),
        bytes = data.len(),
        "File received"
    );
    Ok(SourceFile::new(filename, declared_mime, data))
}
