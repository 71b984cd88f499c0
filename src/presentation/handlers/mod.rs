mod document_sets;
mod extract;
mod health;
mod pdf_extract;
mod upload;

pub use document_sets::document_sets_handler;
pub use extract::extract_handler;
pub use health::health_handler;
pub use pdf_extract::pdf_extract_handler;
pub use upload::ErrorResponse;
