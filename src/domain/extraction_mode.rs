use std::fmt;

use serde::{Deserialize, Serialize};

/// Which strategy the router uses for PDF input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum ExtractionMode {
    #[default]
    Pure,
    Vision,
    Disabled,
}

impl ExtractionMode {
    /// Unknown or empty values fall back to [`ExtractionMode::Pure`].
    pub fn parse_or_default(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "vision" => Self::Vision,
            "disabled" => Self::Disabled,
            _ => Self::Pure,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pure => "pure",
            Self::Vision => "vision",
            Self::Disabled => "disabled",
        }
    }
}

impl From<String> for ExtractionMode {
    fn from(value: String) -> Self {
        Self::parse_or_default(&value)
    }
}

impl fmt::Display for ExtractionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
