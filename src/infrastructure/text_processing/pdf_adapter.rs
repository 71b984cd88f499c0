use std::sync::Arc;

use async_trait::async_trait;

use crate::application::ports::{ExtractionError, FileLoader};
use crate::application::services::{ExtractionRouter, ProgressSender};
use crate::domain::{ContentType, Document, ExtractionMode};

/// Routes PDFs through the engine selected by a fixed [`ExtractionMode`].
///
/// PDF engines never fail; a document without text comes back as an empty
/// string and callers apply their own length rules.
pub struct PdfAdapter {
    router: Arc<ExtractionRouter>,
    mode: ExtractionMode,
}

impl PdfAdapter {
    pub fn new(router: Arc<ExtractionRouter>, mode: ExtractionMode) -> Self {
        Self { router, mode }
    }
}

#[async_trait]
impl FileLoader for PdfAdapter {
    #[tracing::instrument(
        skip(self, data),
        fields(
            document_id = %document.id,
            filename = %document.filename,
            mode = %self.mode,
        )
    )]
    async fn extract_text(
        &self,
        data: &[u8],
        document: &Document,
    ) -> Result<String, ExtractionError> {
        if document.content_type != ContentType::Pdf {
            return Err(ExtractionError::UnsupportedType(
                document.content_type.as_mime().to_string(),
            ));
        }

        let text = self
            .router
            .extract(data, self.mode, &ProgressSender::disabled())
            .await;

        if text.is_none() {
            tracing::info!("No text extracted from PDF");
        }
        Ok(text.unwrap_or_default())
    }
}
