use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use pdfium_render::prelude::*;

use crate::application::ports::{Capability, CapabilityLoader, PdfParser};

use super::pdfium_parser::PdfiumParser;

/// Binds the pdfium shared library, either from a configured directory or
/// from the system library search path.
pub struct PdfiumLoader {
    library_dir: Option<PathBuf>,
}

impl PdfiumLoader {
    pub fn new(library_dir: Option<PathBuf>) -> Self {
        Self { library_dir }
    }

    pub fn system() -> Self {
        Self::new(None)
    }
}

#[async_trait]
impl CapabilityLoader<dyn PdfParser> for PdfiumLoader {
    fn capability(&self) -> Capability {
        Capability::PdfParser
    }

    async fn load(&self) -> Result<Option<Arc<dyn PdfParser>>, String> {
        let library_dir = self.library_dir.clone();
        let pdfium = tokio::task::spawn_blocking(move || bind_pdfium(library_dir.as_deref()))
            .await
            .map_err(|e| format!("task join error: {e}"))??;

        Ok(pdfium.map(|pdfium| Arc::new(PdfiumParser::new(pdfium)) as Arc<dyn PdfParser>))
    }
}

fn bind_pdfium(library_dir: Option<&Path>) -> Result<Option<Pdfium>, String> {
    let bindings = match library_dir {
        Some(dir) => {
            let dir = dir.to_string_lossy().to_string();
            let library = Pdfium::pdfium_platform_library_name_at_path(&dir);
            if !Path::new(&library).exists() {
                tracing::warn!(library_dir = %dir, "pdfium library not found in configured directory");
                return Ok(None);
            }
            Pdfium::bind_to_library(&library)
        }
        None => Pdfium::bind_to_system_library(),
    }
    .map_err(|e| format!("pdfium bind failed: {e}"))?;

    tracing::info!("pdfium library bound");
    Ok(Some(Pdfium::new(bindings)))
}
