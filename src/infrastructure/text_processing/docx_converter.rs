use std::io::{Cursor, Read};
use std::sync::Arc;

use async_trait::async_trait;
use quick_xml::Reader;
use quick_xml::events::Event;
use zip::ZipArchive;

use crate::application::ports::{
    Capability, CapabilityLoader, ConversionError, DocumentConverter,
};

const DOCUMENT_PART: &str = "word/document.xml";

/// Raw-text conversion of WordprocessingML packages. Formatting is dropped;
/// paragraphs are separated by a blank line.
#[derive(Debug, Default, Clone, Copy)]
pub struct DocxConverter;

impl DocumentConverter for DocxConverter {
    fn extract_raw_text(&self, data: &[u8]) -> Result<String, ConversionError> {
        let mut archive = ZipArchive::new(Cursor::new(data))
            .map_err(|e| ConversionError::Archive(format!("not a DOCX package: {e}")))?;

        let mut xml = String::new();
        archive
            .by_name(DOCUMENT_PART)
            .map_err(|e| ConversionError::Archive(format!("{DOCUMENT_PART}: {e}")))?
            .read_to_string(&mut xml)
            .map_err(|e| ConversionError::Archive(format!("{DOCUMENT_PART}: {e}")))?;

        let paragraphs = read_paragraphs(&xml)?;
        Ok(paragraphs.join("\n\n"))
    }
}

fn read_paragraphs(xml: &str) -> Result<Vec<String>, ConversionError> {
    let mut reader = Reader::from_str(xml);
    let mut paragraphs = Vec::new();
    let mut current = String::new();
    let mut in_run = false;
    let mut in_text = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => match e.name().as_ref() {
                b"w:r" => in_run = true,
                b"w:t" => in_text = true,
                _ => {}
            },
            Ok(Event::End(e)) => match e.name().as_ref() {
                b"w:r" => in_run = false,
                b"w:t" => in_text = false,
                b"w:p" => paragraphs.push(std::mem::take(&mut current)),
                _ => {}
            },
            // Tab stops in paragraph properties are also `w:tab`; only runs carry tab characters.
            Ok(Event::Empty(e)) => match e.name().as_ref() {
                b"w:tab" if in_run => current.push('\t'),
                b"w:br" | b"w:cr" if in_run => current.push('\n'),
                b"w:p" => paragraphs.push(String::new()),
                _ => {}
            },
            Ok(Event::Text(text)) if in_text => {
                let text = text
                    .unescape()
                    .map_err(|e| ConversionError::Xml(e.to_string()))?;
                current.push_str(&text);
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(ConversionError::Xml(format!(
                    "at position {}: {e}",
                    reader.buffer_position()
                )));
            }
            _ => {}
        }
    }

    if !current.is_empty() {
        paragraphs.push(current);
    }
    Ok(paragraphs)
}

/// The converter is compiled in, so loading always finds it.
pub struct DocxConverterLoader;

#[async_trait]
impl CapabilityLoader<dyn DocumentConverter> for DocxConverterLoader {
    fn capability(&self) -> Capability {
        Capability::DocumentConverter
    }

    async fn load(&self) -> Result<Option<Arc<dyn DocumentConverter>>, String> {
        Ok(Some(Arc::new(DocxConverter)))
    }
}
