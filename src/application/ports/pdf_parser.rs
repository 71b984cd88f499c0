/// Rendered raster of one PDF page, PNG-encoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageImage {
    pub page_number: usize,
    pub png: Vec<u8>,
}

/// Structural PDF parser. Implementations are synchronous; callers run them
/// on the blocking pool.
pub trait PdfParser: Send + Sync {
    fn open<'a>(&'a self, data: &'a [u8]) -> Result<Box<dyn PdfDocumentHandle + 'a>, PdfError>;
}

/// An opened PDF. Dropping the handle releases the document.
pub trait PdfDocumentHandle {
    fn page_count(&self) -> usize;

    /// Text runs of the page at `page_index` (0-based), in content order.
    fn page_text_runs(&self, page_index: usize) -> Result<Vec<String>, PdfError>;

    fn render_page(&self, page_index: usize, dpi: f32) -> Result<PageImage, PdfError>;
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum PdfError {
    #[error("failed to open PDF: {0}")]
    Open(String),
    #[error("page {page} unreadable: {reason}")]
    Page { page: usize, reason: String },
    #[error("failed to render page {page}: {reason}")]
    Render { page: usize, reason: String },
}
