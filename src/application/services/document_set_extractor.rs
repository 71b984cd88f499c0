use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;

use crate::application::ports::FileLoader;
use crate::domain::{DocumentSet, DocumentSetResult, DocumentSlot, SourceFile};

use super::progress::{DocumentSetEvent, StatusSender};

pub const DEFAULT_SET_MIN_CHARS: usize = 100;

/// Extracts every file of a [`DocumentSet`] independently. The result always
/// has the same shape as the input; failed or too-short items become `None`.
pub struct DocumentSetExtractor {
    loader: Arc<dyn FileLoader>,
    min_chars: usize,
}

struct BusyGuard<'a>(&'a StatusSender);

impl<'a> BusyGuard<'a> {
    fn engage(status: &'a StatusSender) -> Self {
        status.emit(DocumentSetEvent::Busy(true));
        Self(status)
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.emit(DocumentSetEvent::Busy(false));
    }
}

impl DocumentSetExtractor {
    pub fn new(loader: Arc<dyn FileLoader>, min_chars: usize) -> Self {
        Self { loader, min_chars }
    }

    #[tracing::instrument(skip(self, documents, status), fields(documents = documents.len()))]
    pub async fn extract_set(
        &self,
        documents: &DocumentSet,
        status: &StatusSender,
    ) -> DocumentSetResult {
        let _busy = BusyGuard::engage(status);

        let mut result = DocumentSetResult {
            primary: None,
            attachments: Vec::with_capacity(documents.attachments.len()),
            evidence: Vec::with_capacity(documents.evidence.len()),
        };

        for (slot, file) in documents.slots() {
            let text = self.extract_item(slot, file, status).await;
            match slot {
                DocumentSlot::Primary => result.primary = text,
                DocumentSlot::Attachment(_) => result.attachments.push(text),
                DocumentSlot::Evidence(_) => result.evidence.push(text),
            }
        }

        tracing::info!(
            extracted = usize::from(result.primary.is_some())
                + result.attachments.iter().flatten().count()
                + result.evidence.iter().flatten().count(),
            "Document set extraction finished"
        );
        result
    }

    async fn extract_item(
        &self,
        slot: DocumentSlot,
        file: &SourceFile,
        status: &StatusSender,
    ) -> Option<String> {
        let text = match file.to_document() {
            None => {
                tracing::warn!(%slot, filename = %file.filename, "Unsupported document type");
                None
            }
            Some(document) => {
                let outcome = AssertUnwindSafe(self.loader.extract_text(&file.data, &document))
                    .catch_unwind()
                    .await;
                match outcome {
                    Ok(Ok(text)) => Some(text),
                    Ok(Err(e)) => {
                        tracing::warn!(%slot, filename = %file.filename, error = %e, "Document extraction failed");
                        None
                    }
                    Err(_) => {
                        tracing::error!(%slot, filename = %file.filename, "Document extraction panicked");
                        None
                    }
                }
            }
        };

        let chars = text.as_deref().map_or(0, |t| t.trim().chars().count());
        let accepted = text.filter(|_| chars >= self.min_chars);

        status.emit(DocumentSetEvent::ItemCompleted {
            slot,
            extracted: accepted.is_some(),
            chars,
        });
        accepted
    }
}
