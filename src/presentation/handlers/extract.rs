use axum::Json;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::application::ports::ExtractionError;
use crate::presentation::state::AppState;

use super::upload::{error_response, read_source_file};

#[derive(Serialize)]
pub struct ExtractResponse {
    pub filename: String,
    pub content_type: String,
    pub text: String,
}

/// Single-file import: extract by type and enforce the bulk minimum length.
#[tracing::instrument(skip(state, multipart))]
pub async fn extract_handler(State(state): State<AppState>, mut multipart: Multipart) -> Response {
    let field = match multipart.next_field().await {
        Ok(Some(field)) => field,
        Ok(None) => {
            tracing::warn!("Extract request with no file");
            return error_response(StatusCode::BAD_REQUEST, "No file uploaded");
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to read multipart");
            return error_response(
                StatusCode::BAD_REQUEST,
                format!("Failed to read multipart: {e}"),
            );
        }
    };

    let file = match read_source_file(field).await {
        Ok(file) => file,
        Err(response) => return response,
    };

    match state.engines.bulk.extract(&file).await {
        Ok(text) => (
            StatusCode::OK,
            Json(ExtractResponse {
                content_type: file
                    .content_type()
                    .map(|ct| ct.as_mime().to_string())
                    .unwrap_or_default(),
                filename: file.filename,
                text,
            }),
        )
            .into_response(),
        Err(e @ ExtractionError::UnsupportedType(_)) => {
            tracing::warn!(error = %e, "Rejected upload");
            error_response(StatusCode::UNSUPPORTED_MEDIA_TYPE, e.to_string())
        }
        Err(e) => {
            tracing::warn!(error = %e, filename = %file.filename, "Extraction rejected");
            error_response(StatusCode::UNPROCESSABLE_ENTITY, e.to_string())
        }
    }
}
