use std::sync::Arc;

use async_trait::async_trait;

use crate::application::ports::{ExtractionError, FileLoader};
use crate::application::services::StructuredDocumentEngine;
use crate::domain::{ContentType, Document};

pub struct DocxAdapter {
    engine: Arc<StructuredDocumentEngine>,
}

impl DocxAdapter {
    pub fn new(engine: Arc<StructuredDocumentEngine>) -> Self {
        Self { engine }
    }
}

#[async_trait]
impl FileLoader for DocxAdapter {
    #[tracing::instrument(
        skip(self, data),
        fields(document_id = %document.id, filename = %document.filename)
    )]
    async fn extract_text(
        &self,
        data: &[u8],
        document: &Document,
    ) -> Result<String, ExtractionError> {
        if document.content_type != ContentType::Docx {
            return Err(ExtractionError::UnsupportedType(
                document.content_type.as_mime().to_string(),
            ));
        }

        self.engine.extract(data).await
    }
}
