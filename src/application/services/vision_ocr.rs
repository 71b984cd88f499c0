use std::sync::Arc;

use tokio::sync::mpsc;

use crate::application::ports::{
    PageImage, PdfError, PdfParser, VisionClient, VisionClientError, VisionRequest,
};
use crate::domain::{PageBatch, partition_pages};

use super::library_bootstrap::{BootstrapError, LibraryBootstrap};
use super::progress::{ExtractionProgress, ProgressSender};
use super::pure_extraction::{PureExtractionEngine, non_empty};

pub const DEFAULT_BATCH_SIZE: usize = 50;
pub const DEFAULT_RENDER_DPI: f32 = 150.0;

#[derive(Debug, Clone)]
pub struct VisionOcrSettings {
    pub language: String,
    pub batch_size: usize,
    pub render_dpi: f32,
}

impl Default for VisionOcrSettings {
    fn default() -> Self {
        Self {
            language: "pt-BR".to_string(),
            batch_size: DEFAULT_BATCH_SIZE,
            render_dpi: DEFAULT_RENDER_DPI,
        }
    }
}

pub fn ocr_instruction(language: &str) -> String {
    format!(
        "You are transcribing scanned pages of a legal filing. \
Transcribe all text visible in the attached page images, in page order and reading order.\n\
\n\
Follow these strict rules:\n\
1. The document language is {language}. Keep the original language, spelling and punctuation.\n\
2. Preserve paragraph breaks. Separate consecutive pages with a blank line.\n\
3. Keep case numbers, dates, names and monetary amounts exactly as printed.\n\
4. Do not summarize, translate, correct or comment on the content.\n\
5. Output ONLY the transcribed text."
    )
}

pub fn failure_marker(batch: &PageBatch) -> String {
    format!("[OCR failed for pages {}]", batch.display_range())
}

/// Renders PDF pages and has a remote vision model transcribe them, batch by
/// batch. Falls back to [`PureExtractionEngine`] when nothing useful can be
/// salvaged.
pub struct VisionOcrEngine {
    pdf_parser: Arc<LibraryBootstrap<dyn PdfParser>>,
    client: Arc<dyn VisionClient>,
    fallback: Arc<PureExtractionEngine>,
    settings: VisionOcrSettings,
}

enum RenderMessage {
    Batch {
        batch: PageBatch,
        images: Vec<PageImage>,
    },
    Failed(PdfError),
}

enum VisionRun {
    Completed(String),
    Abandoned(VisionAbort),
}

#[derive(Debug, thiserror::Error)]
enum VisionAbort {
    #[error(transparent)]
    Bootstrap(#[from] BootstrapError),
    #[error(transparent)]
    Document(#[from] PdfError),
    #[error("first batch rejected: {0}")]
    FirstBatch(VisionClientError),
    #[error("render task ended unexpectedly: {0}")]
    RenderTask(String),
}

impl VisionOcrEngine {
    pub fn new(
        pdf_parser: Arc<LibraryBootstrap<dyn PdfParser>>,
        client: Arc<dyn VisionClient>,
        fallback: Arc<PureExtractionEngine>,
        settings: VisionOcrSettings,
    ) -> Self {
        Self {
            pdf_parser,
            client,
            fallback,
            settings,
        }
    }

    #[tracing::instrument(skip(self, data, progress), fields(bytes = data.len()))]
    pub async fn extract(&self, data: &[u8], progress: &ProgressSender) -> Option<String> {
        match self.run(data, progress).await {
            VisionRun::Completed(text) => non_empty(text),
            VisionRun::Abandoned(reason) => {
                tracing::warn!(error = %reason, "Vision OCR abandoned, falling back to pure extraction");
                self.fallback.extract(data, progress).await
            }
        }
    }

    async fn run(&self, data: &[u8], progress: &ProgressSender) -> VisionRun {
        let parser = match self.pdf_parser.acquire().await {
            Ok(parser) => parser,
            Err(e) => return VisionRun::Abandoned(e.into()),
        };

        // Capacity 1: at most one rendered batch waits while another is in flight.
        let (tx, mut rx) = mpsc::channel(1);
        let render_task = tokio::task::spawn_blocking({
            let data = data.to_vec();
            let progress = progress.clone();
            let batch_size = self.settings.batch_size;
            let dpi = self.settings.render_dpi;
            move || render_batches(parser.as_ref(), &data, batch_size, dpi, &progress, &tx)
        });

        let instruction = ocr_instruction(&self.settings.language);
        let outcome = self.transcribe_batches(&mut rx, &instruction).await;

        // The render thread checks for a closed channel before every page, so
        // joining it here keeps its progress events ahead of any fallback.
        drop(rx);
        let joined = render_task.await;

        match (outcome, joined) {
            (Err(abort), _) => VisionRun::Abandoned(abort),
            (Ok(_), Err(e)) => VisionRun::Abandoned(VisionAbort::RenderTask(e.to_string())),
            (Ok(sections), Ok(())) => VisionRun::Completed(sections.join("\n\n")),
        }
    }

    async fn transcribe_batches(
        &self,
        rx: &mut mpsc::Receiver<RenderMessage>,
        instruction: &str,
    ) -> Result<Vec<String>, VisionAbort> {
        let mut sections = Vec::new();
        while let Some(message) = rx.recv().await {
            match message {
                RenderMessage::Batch { batch, images } => {
                    let text = self.submit_batch(&batch, images, instruction).await?;
                    if !text.trim().is_empty() {
                        sections.push(text);
                    }
                }
                RenderMessage::Failed(e) => return Err(e.into()),
            }
        }
        Ok(sections)
    }

    async fn submit_batch(
        &self,
        batch: &PageBatch,
        images: Vec<PageImage>,
        instruction: &str,
    ) -> Result<String, VisionAbort> {
        let request = VisionRequest {
            instruction: instruction.to_string(),
            images,
        };

        match (batch.is_first(), self.client.transcribe(&request).await) {
            (_, Ok(response)) => {
                if let Some(usage) = response.usage {
                    tracing::info!(
                        batch = batch.index,
                        pages = %batch.display_range(),
                        prompt_tokens = usage.prompt_tokens,
                        completion_tokens = usage.completion_tokens,
                        total_tokens = usage.total_tokens,
                        "Vision batch transcribed"
                    );
                } else {
                    tracing::info!(batch = batch.index, pages = %batch.display_range(), "Vision batch transcribed");
                }
                Ok(response.text)
            }
            // Nothing committed yet: the cheaper whole-document fallback wins.
            (true, Err(e)) => Err(VisionAbort::FirstBatch(e)),
            // Earlier batches already produced text: keep it and mark the gap.
            (false, Err(e)) => {
                tracing::warn!(
                    batch = batch.index,
                    pages = %batch.display_range(),
                    error = %e,
                    "Vision batch failed, marking gap"
                );
                Ok(failure_marker(batch))
            }
        }
    }
}

fn render_batches(
    parser: &dyn PdfParser,
    data: &[u8],
    batch_size: usize,
    dpi: f32,
    progress: &ProgressSender,
    tx: &mpsc::Sender<RenderMessage>,
) {
    let document = match parser.open(data) {
        Ok(document) => document,
        Err(e) => {
            let _ = tx.blocking_send(RenderMessage::Failed(e));
            return;
        }
    };

    let page_count = document.page_count();
    progress.emit(ExtractionProgress::Starting);

    let batches = partition_pages(page_count, batch_size);
    tracing::info!(
        page_count,
        batch_count = batches.len(),
        "Rendering PDF for vision OCR"
    );

    for batch in batches {
        let mut images = Vec::with_capacity(batch.len());
        for page_index in batch.pages() {
            if tx.is_closed() {
                tracing::debug!(
                    page = page_index + 1,
                    "Vision OCR stopped consuming batches, releasing document"
                );
                return;
            }
            match document.render_page(page_index, dpi) {
                Ok(image) => images.push(image),
                Err(e) => {
                    let _ = tx.blocking_send(RenderMessage::Failed(e));
                    return;
                }
            }
            progress.emit(ExtractionProgress::PageRendered {
                page: page_index + 1,
                total: page_count,
            });
        }

        if tx
            .blocking_send(RenderMessage::Batch { batch, images })
            .is_err()
        {
            tracing::debug!("Vision OCR stopped consuming batches, releasing document");
            return;
        }
    }
}
