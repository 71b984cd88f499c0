use std::path::PathBuf;

use config::{Config, ConfigError, File};
use serde::Deserialize;

use crate::application::services::{
    DEFAULT_BATCH_SIZE, DEFAULT_BULK_MIN_CHARS, DEFAULT_RENDER_DPI, DEFAULT_SET_MIN_CHARS,
};
use crate::domain::ExtractionMode;
use crate::infrastructure::observability::DEFAULT_FILTER;

use super::Environment;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub logging: LoggingSettings,
    pub extraction: ExtractionSettings,
    pub vision: VisionSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub max_upload_mb: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    pub level: String,
    pub json: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExtractionSettings {
    pub mode: ExtractionMode,
    pub ocr_language: String,
    pub batch_size: usize,
    pub render_dpi: f32,
    pub bulk_min_chars: usize,
    pub set_min_chars: usize,
    /// Directory holding the pdfium shared library. System search path when unset.
    pub pdfium_library_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VisionSettings {
    pub enabled: bool,
    pub base_url: Option<String>,
    pub model: Option<String>,
    pub api_key: Option<String>,
    pub max_tokens: u32,
    pub timeout_secs: u64,
}

impl Settings {
    /// Layers built-in defaults, `appsettings.toml`, `appsettings.{env}.toml`
    /// and `APP__SECTION__KEY` environment variables, later sources winning.
    pub fn load(environment: Environment) -> Result<Self, ConfigError> {
        Self::defaults()?
            .add_source(File::with_name("appsettings").required(false))
            .add_source(
                File::with_name(&format!("appsettings.{}", environment.as_str())).required(false),
            )
            .add_source(
                config::Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    fn defaults() -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3000)?
            .set_default("server.max_upload_mb", 100)?
            .set_default("logging.level", DEFAULT_FILTER)?
            .set_default("logging.json", false)?
            .set_default("extraction.mode", ExtractionMode::default().as_str())?
            .set_default("extraction.ocr_language", "pt-BR")?
            .set_default("extraction.batch_size", DEFAULT_BATCH_SIZE as i64)?
            .set_default("extraction.render_dpi", f64::from(DEFAULT_RENDER_DPI))?
            .set_default("extraction.bulk_min_chars", DEFAULT_BULK_MIN_CHARS as i64)?
            .set_default("extraction.set_min_chars", DEFAULT_SET_MIN_CHARS as i64)?
            .set_default("vision.enabled", false)?
            .set_default("vision.max_tokens", 16_384)?
            .set_default("vision.timeout_secs", 300)
    }
}
