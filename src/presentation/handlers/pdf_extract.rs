use axum::Json;
use axum::extract::{Multipart, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use crate::application::services::ProgressSender;
use crate::domain::ExtractionMode;
use crate::presentation::state::AppState;

use super::upload::{error_response, read_source_file};

#[derive(Debug, Deserialize)]
pub struct PdfExtractParams {
    pub mode: Option<String>,
}

#[derive(Serialize)]
pub struct PdfExtractResponse {
    pub mode: ExtractionMode,
    pub text: Option<String>,
}

/// Runs the PDF router directly. A document without extractable text is a
/// successful response with `text: null`.
#[tracing::instrument(skip(state, multipart))]
pub async fn pdf_extract_handler(
    State(state): State<AppState>,
    Query(params): Query<PdfExtractParams>,
    mut multipart: Multipart,
) -> Response {
    let mode = params
        .mode
        .as_deref()
        .map_or(state.engines.mode, ExtractionMode::parse_or_default);

    let field = match multipart.next_field().await {
        Ok(Some(field)) => field,
        Ok(None) => return error_response(StatusCode::BAD_REQUEST, "No file uploaded"),
        Err(e) => {
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

    if !file.is_pdf() {
        tracing::warn!(filename = %file.filename, "Non-PDF upload on PDF endpoint");
        return error_response(
            StatusCode::UNSUPPORTED_MEDIA_TYPE,
            format!("{} is not a PDF", file.filename),
        );
    }

    let text = state
        .engines
        .router
        .extract(&file.data, mode, &ProgressSender::disabled())
        .await;

    (StatusCode::OK, Json(PdfExtractResponse { mode, text })).into_response()
}
