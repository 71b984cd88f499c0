/// Converts word-processor documents to plain text.
pub trait DocumentConverter: Send + Sync {
    fn extract_raw_text(&self, data: &[u8]) -> Result<String, ConversionError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ConversionError {
    #[error("invalid document container: {0}")]
    Archive(String),
    #[error("malformed document body: {0}")]
    Xml(String),
}
