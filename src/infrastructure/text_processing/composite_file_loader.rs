use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use crate::application::ports::{ExtractionError, FileLoader};
use crate::application::services::{ExtractionRouter, StructuredDocumentEngine};
use crate::domain::{ContentType, Document, ExtractionMode};

use super::docx_adapter::DocxAdapter;
use super::pdf_adapter::PdfAdapter;
use super::plain_text_adapter::PlainTextAdapter;

/// Dispatches to one [`FileLoader`] per [`ContentType`].
pub struct CompositeFileLoader {
    adapters: HashMap<ContentType, Arc<dyn FileLoader>>,
}

impl CompositeFileLoader {
    pub fn new(adapters: Vec<(ContentType, Arc<dyn FileLoader>)>) -> Self {
        Self {
            adapters: adapters.into_iter().collect(),
        }
    }

    /// PDF, DOCX and plain text, with PDFs extracted in `pdf_mode`.
    pub fn for_filings(
        router: Arc<ExtractionRouter>,
        structured: Arc<StructuredDocumentEngine>,
        pdf_mode: ExtractionMode,
    ) -> Self {
        Self::new(vec![
            (
                ContentType::Pdf,
                Arc::new(PdfAdapter::new(router, pdf_mode)) as Arc<dyn FileLoader>,
            ),
            (ContentType::Docx, Arc::new(DocxAdapter::new(structured))),
            (ContentType::Text, Arc::new(PlainTextAdapter)),
        ])
    }

    pub fn supports(&self, content_type: ContentType) -> bool {
        self.adapters.contains_key(&content_type)
    }
}

#[async_trait]
impl FileLoader for CompositeFileLoader {
    async fn extract_text(
        &self,
        data: &[u8],
        document: &Document,
    ) -> Result<String, ExtractionError> {
        let adapter = self.adapters.get(&document.content_type).ok_or_else(|| {
            ExtractionError::UnsupportedType(document.content_type.as_mime().to_string())
        })?;

        tracing::debug!(content_type = %document.content_type, "Dispatching extraction");
        adapter.extract_text(data, document).await
    }
}
