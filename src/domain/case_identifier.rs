use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

// Optional 2-5 letter case-type code, then NNNNNNN-DD.YYYY.J.TR.OOOO.
static CASE_IDENTIFIER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?:(?:^|[^A-Za-z0-9])(?P<prefix>[A-Z]{2,5})[\s_-]*|(?:^|[^0-9]))(?P<docket>\d{7}-\d{2}\.\d{4}\.\d\.\d{2}\.\d{4})(?:[^0-9]|$)",
    )
    .unwrap()
});

/// Docket number identifying a case, with its case-type code when one was
/// written next to it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct CaseIdentifier {
    pub prefix: Option<String>,
    pub docket: String,
}

impl CaseIdentifier {
    /// First identifier in `text`, scanning left to right.
    pub fn find(text: &str) -> Option<Self> {
        let captures = CASE_IDENTIFIER.captures(text)?;
        let docket = captures.name("docket")?.as_str().to_string();
        let prefix = captures.name("prefix").map(|m| m.as_str().to_string());
        Some(Self { prefix, docket })
    }
}

impl fmt::Display for CaseIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.prefix {
            Some(prefix) => write!(f, "{prefix} {}", self.docket),
            None => f.write_str(&self.docket),
        }
    }
}
