use std::io::Cursor;

use image::ImageFormat;
use pdfium_render::prelude::*;

use crate::application::ports::{PageImage, PdfDocumentHandle, PdfError, PdfParser};

const POINTS_PER_INCH: f32 = 72.0;

/// [`PdfParser`] backed by a bound pdfium library.
pub struct PdfiumParser {
    pdfium: Pdfium,
}

impl PdfiumParser {
    pub fn new(pdfium: Pdfium) -> Self {
        Self { pdfium }
    }
}

impl PdfParser for PdfiumParser {
    fn open<'a>(&'a self, data: &'a [u8]) -> Result<Box<dyn PdfDocumentHandle + 'a>, PdfError> {
        let document = self
            .pdfium
            .load_pdf_from_byte_slice(data, None)
            .map_err(|e| PdfError::Open(e.to_string()))?;

        tracing::trace!(page_count = document.pages().len(), "PDF document opened");
        Ok(Box::new(PdfiumDocument { document }))
    }
}

struct PdfiumDocument<'a> {
    document: PdfDocument<'a>,
}

impl PdfiumDocument<'_> {
    fn page(&self, page_index: usize) -> Result<PdfPage<'_>, PdfError> {
        self.document
            .pages()
            .get(page_index as u16)
            .map_err(|e| PdfError::Page {
                page: page_index + 1,
                reason: e.to_string(),
            })
    }
}

impl PdfDocumentHandle for PdfiumDocument<'_> {
    fn page_count(&self) -> usize {
        self.document.pages().len() as usize
    }

    fn page_text_runs(&self, page_index: usize) -> Result<Vec<String>, PdfError> {
        let page = self.page(page_index)?;

        // Page-level text covers form XObjects too, in pdfium's reading order.
        let text = page.text().map_err(|e| PdfError::Page {
            page: page_index + 1,
            reason: e.to_string(),
        })?;
        let runs = text
            .all()
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect();

        Ok(runs)
    }

    fn render_page(&self, page_index: usize, dpi: f32) -> Result<PageImage, PdfError> {
        let page = self.page(page_index)?;
        let render_error = |reason: String| PdfError::Render {
            page: page_index + 1,
            reason,
        };

        let width = (page.width().value * dpi / POINTS_PER_INCH) as i32;
        let height = (page.height().value * dpi / POINTS_PER_INCH) as i32;

        let bitmap = page
            .render_with_config(
                &PdfRenderConfig::new()
                    .set_target_width(width)
                    .set_target_height(height),
            )
            .map_err(|e| render_error(e.to_string()))?;

        let mut png = Vec::new();
        bitmap
            .as_image()
            .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
            .map_err(|e| render_error(format!("PNG encode failed: {e}")))?;

        Ok(PageImage {
            page_number: page_index + 1,
            png,
        })
    }
}

impl Drop for PdfiumDocument<'_> {
    fn drop(&mut self) {
        tracing::trace!("PDF document released");
    }
}
