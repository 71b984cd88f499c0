use std::sync::Arc;

use crate::application::ports::{ExtractionError, FileLoader};
use crate::domain::SourceFile;

pub const DEFAULT_BULK_MIN_CHARS: usize = 50;

/// Single-file entry point for import flows: extract by type, then reject
/// results too short to be a real document.
pub struct BulkIngestionValidator {
    loader: Arc<dyn FileLoader>,
    min_chars: usize,
}

impl BulkIngestionValidator {
    pub fn new(loader: Arc<dyn FileLoader>, min_chars: usize) -> Self {
        Self { loader, min_chars }
    }

    #[tracing::instrument(skip(self, file), fields(filename = %file.filename, bytes = file.data.len()))]
    pub async fn extract(&self, file: &SourceFile) -> Result<String, ExtractionError> {
        let document = file.to_document().ok_or_else(|| {
            ExtractionError::UnsupportedType(
                file.declared_mime
                    .clone()
                    .unwrap_or_else(|| file.filename.clone()),
            )
        })?;

        let text = self.loader.extract_text(&file.data, &document).await?;

        let chars = text.trim().chars().count();
        if chars < self.min_chars {
            tracing::warn!(chars, minimum = self.min_chars, "Extracted text below minimum length");
            return Err(ExtractionError::InsufficientText {
                format: document.content_type.label().to_string(),
                chars,
                minimum: self.min_chars,
            });
        }

        tracing::info!(chars, content_type = %document.content_type, "Bulk extraction accepted");
        Ok(text)
    }
}
