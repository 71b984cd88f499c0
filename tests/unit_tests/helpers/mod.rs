
use std::sync::Arc;

use filing_ingest::application::ports::{CapabilityLoader, PdfParser, VisionClient};
use filing_ingest::application::services::{
    DEFAULT_BULK_MIN_CHARS, DEFAULT_SET_MIN_CHARS, LibraryBootstrap, PureExtractionEngine,
    VisionOcrSettings,
};
use filing_ingest::domain::ExtractionMode;
use filing_ingest::infrastructure::text_processing::{EngineOptions, ExtractionEngines};

pub use fake_loaders::{
    FixedConverterLoader, Stub, StubFileLoader, docx_file, long_text, text_file,
};
pub use fake_pdf::{
    FakePdfLoader, FakePdfParser, LoadBehavior, corrupt_pdf_file, fake_pdf, pdf_file,
    scanned_pdf,
};
pub use fake_vision::ScriptedVisionClient;

pub fn pdf_bootstrap(parser: &Arc<FakePdfParser>) -> Arc<LibraryBootstrap<dyn PdfParser>> {
    let loader: Arc<dyn CapabilityLoader<dyn PdfParser>> =
        Arc::new(FakePdfLoader::new(Arc::clone(parser)));
    Arc::new(LibraryBootstrap::new(loader))
}

pub fn pure_engine(parser: &Arc<FakePdfParser>) -> Arc<PureExtractionEngine> {
    Arc::new(PureExtractionEngine::new(pdf_bootstrap(parser)))
}

pub fn engine_options(mode: ExtractionMode) -> EngineOptions {
    EngineOptions {
        mode,
        vision: VisionOcrSettings::default(),
        bulk_min_chars: DEFAULT_BULK_MIN_CHARS,
        set_min_chars: DEFAULT_SET_MIN_CHARS,
    }
}

/// Full engine graph over fakes.
pub fn fake_engines(
    parser: &Arc<FakePdfParser>,
    converter: FixedConverterLoader,
    vision: Option<Arc<dyn VisionClient>>,
    mode: ExtractionMode,
) -> ExtractionEngines {
    ExtractionEngines::assemble(
        Arc::new(FakePdfLoader::new(Arc::clone(parser))),
        Arc::new(converter),
        vision,
        engine_options(mode),
    )
}
