use bytes::Bytes;

use super::document::{ContentType, Document};

/// An uploaded blob together with what the uploader said it was.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceFile {
    pub filename: String,
    pub declared_mime: Option<String>,
    pub data: Bytes,
}

impl SourceFile {
    pub fn new(filename: impl Into<String>, declared_mime: Option<String>, data: Bytes) -> Self {
        Self {
            filename: filename.into(),
            declared_mime,
            data,
        }
    }

    pub fn content_type(&self) -> Option<ContentType> {
        ContentType::detect(self.declared_mime.as_deref(), &self.filename)
    }

    pub fn to_document(&self) -> Option<Document> {
        self.content_type().map(|content_type| {
            Document::new(
                self.filename.clone(),
                content_type,
                self.data.len() as u64,
            )
        })
    }

    pub fn is_pdf(&self) -> bool {
        self.content_type() == Some(ContentType::Pdf)
    }
}
