mod bulk_ingestion;
mod case_identifier_detector;
mod document_set_extractor;
mod extraction_router;
mod library_bootstrap;
mod progress;
mod pure_extraction;
mod structured_extraction;
mod vision_ocr;

pub use bulk_ingestion::{BulkIngestionValidator, DEFAULT_BULK_MIN_CHARS};
pub use case_identifier_detector::CaseIdentifierDetector;
pub use document_set_extractor::{DEFAULT_SET_MIN_CHARS, DocumentSetExtractor};
pub use extraction_router::ExtractionRouter;
pub use library_bootstrap::{BOOTSTRAP_TIMEOUT, BootstrapError, LibraryBootstrap};
pub use progress::{DocumentSetEvent, ExtractionProgress, ProgressSender, StatusSender};
pub use pure_extraction::PureExtractionEngine;
pub use structured_extraction::StructuredDocumentEngine;
pub use vision_ocr::{
    DEFAULT_BATCH_SIZE, DEFAULT_RENDER_DPI, VisionOcrEngine, VisionOcrSettings, failure_marker,
    ocr_instruction,
};
