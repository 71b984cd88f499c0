use std::sync::Arc;

use crate::application::ports::{PdfError, PdfParser};

use super::library_bootstrap::LibraryBootstrap;
use super::progress::{ExtractionProgress, ProgressSender};

/// Reads the text layer of a PDF page by page. No rendering, no network.
pub struct PureExtractionEngine {
    pdf_parser: Arc<LibraryBootstrap<dyn PdfParser>>,
}

impl PureExtractionEngine {
    pub fn new(pdf_parser: Arc<LibraryBootstrap<dyn PdfParser>>) -> Self {
        Self { pdf_parser }
    }

    /// Returns `None` for corrupt documents, parser failures and documents
    /// without any text layer. Never propagates the underlying error.
    #[tracing::instrument(skip(self, data, progress), fields(bytes = data.len()))]
    pub async fn extract(&self, data: &[u8], progress: &ProgressSender) -> Option<String> {
        self.extract_pages(data, None, progress).await
    }

    pub async fn extract_first_page(&self, data: &[u8]) -> Option<String> {
        self.extract_pages(data, Some(1), &ProgressSender::disabled())
            .await
    }

    async fn extract_pages(
        &self,
        data: &[u8],
        page_limit: Option<usize>,
        progress: &ProgressSender,
    ) -> Option<String> {
        let parser = match self.pdf_parser.acquire().await {
            Ok(parser) => parser,
            Err(e) => {
                tracing::warn!(error = %e, "PDF parser unavailable, no text extracted");
                return None;
            }
        };

        let data = data.to_vec();
        let progress = progress.clone();
        let joined = tokio::task::spawn_blocking(move || {
            read_text_layer(parser.as_ref(), &data, page_limit, &progress)
        })
        .await;

        match joined {
            Ok(Ok(text)) => non_empty(text),
            Ok(Err(e)) => {
                tracing::warn!(error = %e, "Pure PDF extraction failed");
                None
            }
            Err(e) => {
                tracing::error!(error = %e, "Pure PDF extraction task aborted");
                None
            }
        }
    }
}

fn read_text_layer(
    parser: &dyn PdfParser,
    data: &[u8],
    page_limit: Option<usize>,
    progress: &ProgressSender,
) -> Result<String, PdfError> {
    let document = parser.open(data)?;
    let total = page_limit.map_or(document.page_count(), |limit| {
        limit.min(document.page_count())
    });

    let mut pages = Vec::with_capacity(total);
    for page_index in 0..total {
        let runs = document.page_text_runs(page_index)?;
        pages.push(runs.join(" "));
        progress.emit(ExtractionProgress::PageExtracted {
            page: page_index + 1,
            total,
        });
    }

    tracing::debug!(page_count = total, "PDF text layer read");
    Ok(pages.join("\n"))
}

pub(super) fn non_empty(text: String) -> Option<String> {
    if text.trim().is_empty() {
        None
    } else {
        Some(text)
    }
}
