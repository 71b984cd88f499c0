use async_trait::async_trait;

use crate::application::ports::{ExtractionError, FileLoader};
use crate::domain::{ContentType, Document};

pub struct PlainTextAdapter;

#[async_trait]
impl FileLoader for PlainTextAdapter {
    async fn extract_text(
        &self,
        data: &[u8],
        document: &Document,
    ) -> Result<String, ExtractionError> {
        if document.content_type != ContentType::Text {
            return Err(ExtractionError::UnsupportedType(
                document.content_type.as_mime().to_string(),
            ));
        }

        // Byte-order marks survive from_utf8 and would count toward length checks.
        let data = data.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(data);
        String::from_utf8(data.to_vec())
            .map_err(|e| ExtractionError::Failed(format!("{} is not valid UTF-8: {e}", document.filename)))
    }
}
