use std::sync::Arc;
use std::time::Duration;

use crate::application::ports::{CapabilityLoader, DocumentConverter, PdfParser, VisionClient};
use crate::application::services::{
    BulkIngestionValidator, CaseIdentifierDetector, DocumentSetExtractor, ExtractionRouter,
    LibraryBootstrap, PureExtractionEngine, StructuredDocumentEngine, VisionOcrEngine,
    VisionOcrSettings,
};
use crate::domain::ExtractionMode;
use crate::infrastructure::llm::OpenAiVisionClient;
use crate::infrastructure::pdf::PdfiumLoader;
use crate::presentation::config::{ExtractionSettings, Settings, VisionSettings};

use super::composite_file_loader::CompositeFileLoader;
use super::docx_converter::DocxConverterLoader;

#[derive(Debug, thiserror::Error)]
pub enum EngineFactoryError {
    #[error("vision.base_url is required when vision is enabled")]
    MissingVisionBaseUrl,
    #[error("vision.model is required when vision is enabled")]
    MissingVisionModel,
    #[error("vision client initialization failed: {0}")]
    ClientInitialization(String),
}

/// Tunables for [`ExtractionEngines::assemble`].
#[derive(Debug, Clone)]
pub struct EngineOptions {
    pub mode: ExtractionMode,
    pub vision: VisionOcrSettings,
    pub bulk_min_chars: usize,
    pub set_min_chars: usize,
}

impl From<&ExtractionSettings> for EngineOptions {
    fn from(settings: &ExtractionSettings) -> Self {
        Self {
            mode: settings.mode,
            vision: VisionOcrSettings {
                language: settings.ocr_language.clone(),
                batch_size: settings.batch_size,
                render_dpi: settings.render_dpi,
            },
            bulk_min_chars: settings.bulk_min_chars,
            set_min_chars: settings.set_min_chars,
        }
    }
}

/// The wired extraction graph. Both library bootstraps are shared by every
/// engine, so each capability loads at most once per process.
#[derive(Clone)]
pub struct ExtractionEngines {
    pub mode: ExtractionMode,
    pub router: Arc<ExtractionRouter>,
    pub structured: Arc<StructuredDocumentEngine>,
    pub detector: Arc<CaseIdentifierDetector>,
    pub bulk: Arc<BulkIngestionValidator>,
    pub document_sets: Arc<DocumentSetExtractor>,
}

impl ExtractionEngines {
    pub fn from_settings(settings: &Settings) -> Result<Self, EngineFactoryError> {
        let pdf_loader = Arc::new(PdfiumLoader::new(
            settings.extraction.pdfium_library_path.clone(),
        ));
        let vision_client = build_vision_client(&settings.vision)?;

        Ok(Self::assemble(
            pdf_loader,
            Arc::new(DocxConverterLoader),
            vision_client,
            EngineOptions::from(&settings.extraction),
        ))
    }

    pub fn assemble(
        pdf_loader: Arc<dyn CapabilityLoader<dyn PdfParser>>,
        converter_loader: Arc<dyn CapabilityLoader<dyn DocumentConverter>>,
        vision_client: Option<Arc<dyn VisionClient>>,
        options: EngineOptions,
    ) -> Self {
        let pdf_parser = Arc::new(LibraryBootstrap::new(pdf_loader));
        let converter = Arc::new(LibraryBootstrap::new(converter_loader));

        let pure = Arc::new(PureExtractionEngine::new(Arc::clone(&pdf_parser)));
        let vision = vision_client.map(|client| {
            Arc::new(VisionOcrEngine::new(
                Arc::clone(&pdf_parser),
                client,
                Arc::clone(&pure),
                options.vision.clone(),
            ))
        });
        let router = Arc::new(ExtractionRouter::new(Arc::clone(&pure), vision));
        let structured = Arc::new(StructuredDocumentEngine::new(converter));

        // Import flows always read the embedded text layer.
        let loader = Arc::new(CompositeFileLoader::for_filings(
            Arc::clone(&router),
            Arc::clone(&structured),
            ExtractionMode::Pure,
        ));

        Self {
            mode: options.mode,
            detector: Arc::new(CaseIdentifierDetector::new(pure)),
            bulk: Arc::new(BulkIngestionValidator::new(
                loader.clone(),
                options.bulk_min_chars,
            )),
            document_sets: Arc::new(DocumentSetExtractor::new(loader, options.set_min_chars)),
            router,
            structured,
        }
    }
}

fn build_vision_client(
    settings: &VisionSettings,
) -> Result<Option<Arc<dyn VisionClient>>, EngineFactoryError> {
    if !settings.enabled {
        tracing::info!("Vision OCR disabled");
        return Ok(None);
    }

    let base_url = settings
        .base_url
        .as_deref()
        .ok_or(EngineFactoryError::MissingVisionBaseUrl)?;
    let model = settings
        .model
        .as_deref()
        .ok_or(EngineFactoryError::MissingVisionModel)?;

    tracing::info!(model, base_url, "Loading vision OCR client");
    let client = OpenAiVisionClient::new(
        base_url,
        model,
        settings.api_key.as_deref(),
        settings.max_tokens,
        Duration::from_secs(settings.timeout_secs),
    )
    .map_err(|e| EngineFactoryError::ClientInitialization(e.to_string()))?;

    Ok(Some(Arc::new(client)))
}
