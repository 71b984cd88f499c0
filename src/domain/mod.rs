mod case_identifier;
mod document;
mod document_id;
mod document_set;
mod extraction_mode;
mod page_batch;
mod source_file;

pub use case_identifier::CaseIdentifier;
pub use document::{ContentType, Document};
pub use document_id::DocumentId;
pub use document_set::{DocumentSet, DocumentSetResult, DocumentSlot};
pub use extraction_mode::ExtractionMode;
pub use page_batch::{PageBatch, partition_pages};
pub use source_file::SourceFile;
