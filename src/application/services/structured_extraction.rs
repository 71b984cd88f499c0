use std::sync::Arc;

use crate::application::ports::{DocumentConverter, ExtractionError};

use super::library_bootstrap::LibraryBootstrap;

/// Word-processor documents to plain text. Unlike the PDF engines this one
/// reports failures, since there is no other strategy to fall back on.
pub struct StructuredDocumentEngine {
    converter: Arc<LibraryBootstrap<dyn DocumentConverter>>,
}

impl StructuredDocumentEngine {
    pub fn new(converter: Arc<LibraryBootstrap<dyn DocumentConverter>>) -> Self {
        Self { converter }
    }

    #[tracing::instrument(skip(self, data), fields(bytes = data.len()))]
    pub async fn extract(&self, data: &[u8]) -> Result<String, ExtractionError> {
        let converter = self
            .converter
            .acquire()
            .await
            .map_err(|e| ExtractionError::Failed(e.to_string()))?;

        let data = data.to_vec();
        let text = tokio::task::spawn_blocking(move || converter.extract_raw_text(&data))
            .await
            .map_err(|e| ExtractionError::Failed(format!("task join error: {e}")))?
            .map_err(|e| ExtractionError::Failed(e.to_string()))?;

        tracing::debug!(chars = text.chars().count(), "Document converted");
        Ok(text)
    }
}
