use std::sync::Arc;

use crate::domain::{CaseIdentifier, DocumentSet, SourceFile};

use super::pure_extraction::PureExtractionEngine;

/// Recovers the docket number of a filing from its document set.
///
/// Filenames are checked across the whole set before any document content is
/// read: primary, then attachments, then evidence. Content fallback reads the
/// first page of the primary document, then of each attachment.
pub struct CaseIdentifierDetector {
    pure: Arc<PureExtractionEngine>,
}

impl CaseIdentifierDetector {
    pub fn new(pure: Arc<PureExtractionEngine>) -> Self {
        Self { pure }
    }

    #[tracing::instrument(skip(self, documents), fields(documents = documents.len()))]
    pub async fn detect(&self, documents: &DocumentSet) -> Option<CaseIdentifier> {
        let by_filename = documents
            .primary
            .iter()
            .chain(&documents.attachments)
            .chain(&documents.evidence)
            .find_map(|file| CaseIdentifier::find(&file.filename));

        if let Some(identifier) = by_filename {
            tracing::info!(%identifier, "Case identifier found in filename");
            return Some(identifier);
        }

        for file in documents.primary.iter().chain(&documents.attachments) {
            if let Some(identifier) = self.from_first_page(file).await {
                tracing::info!(%identifier, filename = %file.filename, "Case identifier found in first page");
                return Some(identifier);
            }
        }

        tracing::debug!("No case identifier found");
        None
    }

    async fn from_first_page(&self, file: &SourceFile) -> Option<CaseIdentifier> {
        if !file.is_pdf() {
            return None;
        }
        let text = self.pure.extract_first_page(&file.data).await?;
        CaseIdentifier::find(&text)
    }
}
