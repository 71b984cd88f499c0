mod composite_file_loader;
mod docx_adapter;
mod docx_converter;
mod engine_factory;
mod pdf_adapter;
mod plain_text_adapter;
mod text_sanitizer;

pub use composite_file_loader::CompositeFileLoader;
pub use docx_adapter::DocxAdapter;
pub use docx_converter::{DocxConverter, DocxConverterLoader};
pub use engine_factory::{EngineFactoryError, EngineOptions, ExtractionEngines};
pub use pdf_adapter::PdfAdapter;
pub use plain_text_adapter::PlainTextAdapter;
pub use text_sanitizer::sanitize_transcription;
