use axum::Json;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::application::services::StatusSender;
use crate::domain::{DocumentSet, DocumentSetResult};
use crate::presentation::state::AppState;

use super::upload::{error_response, read_source_file};

#[derive(Serialize)]
pub struct DocumentSetResponse {
    pub case_identifier: Option<String>,
    pub documents: DocumentSetResult,
}

/// Accepts `primary` (at most once), `attachment` and `evidence` fields.
/// Repeated fields keep their upload order.
#[tracing::instrument(skip(state, multipart))]
pub async fn document_sets_handler(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Response {
    let mut documents = DocumentSet::default();

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => {
                tracing::error!(error = %e, "Failed to read multipart");
                return error_response(
                    StatusCode::BAD_REQUEST,
                    format!("Failed to read multipart: {e}"),
                );
            }
        };

        let group = field.name().unwrap_or_default().to_string();
        let file = match read_source_file(field).await {
            Ok(file) => file,
            Err(response) => return response,
        };

        match group.as_str() {
            "primary" if documents.primary.is_some() => {
                return error_response(StatusCode::BAD_REQUEST, "Only one primary document is allowed");
            }
            "primary" => documents.primary = Some(file),
            "attachment" | "attachments" => documents.attachments.push(file),
            "evidence" => documents.evidence.push(file),
            other => {
                return error_response(
                    StatusCode::BAD_REQUEST,
                    format!("Unknown field {other:?}, expected primary, attachment or evidence"),
                );
            }
        }
    }

    if documents.is_empty() {
        return error_response(StatusCode::BAD_REQUEST, "No files uploaded");
    }

    let case_identifier = state.engines.detector.detect(&documents).await;
    let result = state
        .engines
        .document_sets
        .extract_set(&documents, &StatusSender::disabled())
        .await;

    (
        StatusCode::OK,
        Json(DocumentSetResponse {
            case_identifier: case_identifier.map(|id| id.to_string()),
            documents: result,
        }),
    )
        .into_response()
}
