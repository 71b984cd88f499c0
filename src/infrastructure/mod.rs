pub mod llm;
pub mod observability;
pub mod pdf;
pub mod text_processing;
