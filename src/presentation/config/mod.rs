mod environment;
mod settings;

pub use environment::{ENVIRONMENT_VAR, Environment};
pub use settings::{
    ExtractionSettings, LoggingSettings, ServerSettings, Settings, VisionSettings,
};
