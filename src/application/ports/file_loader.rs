use async_trait::async_trait;

use crate::domain::Document;

#[async_trait]
pub trait FileLoader: Send + Sync {
    async fn extract_text(&self, data: &[u8], document: &Document)
    -> Result<String, ExtractionError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ExtractionError {
    #[error("unsupported content type: {0}")]
    UnsupportedType(String),
    #[error("extraction failed: {0}")]
    Failed(String),
    #[error("insufficient text extracted from {format}: {chars} characters, at least {minimum} required")]
    InsufficientText {
        format: String,
        chars: usize,
        minimum: usize,
    },
}
