use crate::infrastructure::text_processing::ExtractionEngines;
use crate::presentation::config::Settings;

#[derive(Clone)]
pub struct AppState {
    pub engines: ExtractionEngines,
    pub max_upload_bytes: usize,
}

impl AppState {
    pub fn new(engines: ExtractionEngines) -> Self {
        Self {
            engines,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }

    pub fn from_settings(engines: ExtractionEngines, settings: &Settings) -> Self {
        Self {
            engines,
            max_upload_bytes: settings.server.max_upload_mb * 1024 * 1024,
        }
    }
}

pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 100 * 1024 * 1024;
