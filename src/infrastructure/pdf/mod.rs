mod pdfium_loader;
mod pdfium_parser;

pub use pdfium_loader::PdfiumLoader;
pub use pdfium_parser::PdfiumParser;
