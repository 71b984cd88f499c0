mod capability_loader;
mod document_converter;
mod file_loader;
mod pdf_parser;
mod vision_client;

pub use capability_loader::{Capability, CapabilityLoader};
pub use document_converter::{ConversionError, DocumentConverter};
pub use file_loader::{ExtractionError, FileLoader};
pub use pdf_parser::{PageImage, PdfDocumentHandle, PdfError, PdfParser};
pub use vision_client::{TokenUsage, VisionClient, VisionClientError, VisionRequest, VisionResponse};
