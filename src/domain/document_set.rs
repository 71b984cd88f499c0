use std::fmt;

use serde::Serialize;

use super::source_file::SourceFile;

/// A filing submission: one main document plus two ordered groups of
/// supporting files.
#[derive(Debug, Clone, Default)]
pub struct DocumentSet {
    pub primary: Option<SourceFile>,
    pub attachments: Vec<SourceFile>,
    pub evidence: Vec<SourceFile>,
}

impl DocumentSet {
    pub fn new(
        primary: Option<SourceFile>,
        attachments: Vec<SourceFile>,
        evidence: Vec<SourceFile>,
    ) -> Self {
        Self {
            primary,
            attachments,
            evidence,
        }
    }

    pub fn len(&self) -> usize {
        usize::from(self.primary.is_some()) + self.attachments.len() + self.evidence.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Every file with its slot, in processing order: primary, attachments, evidence.
    pub fn slots(&self) -> impl Iterator<Item = (DocumentSlot, &SourceFile)> {
        self.primary
            .iter()
            .map(|file| (DocumentSlot::Primary, file))
            .chain(
                self.attachments
                    .iter()
                    .enumerate()
                    .map(|(i, file)| (DocumentSlot::Attachment(i), file)),
            )
            .chain(
                self.evidence
                    .iter()
                    .enumerate()
                    .map(|(i, file)| (DocumentSlot::Evidence(i), file)),
            )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "group", content = "index", rename_all = "snake_case")]
pub enum DocumentSlot {
    Primary,
    Attachment(usize),
    Evidence(usize),
}

impl fmt::Display for DocumentSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primary => f.write_str("primary"),
            Self::Attachment(i) => write!(f, "attachment[{i}]"),
            Self::Evidence(i) => write!(f, "evidence[{i}]"),
        }
    }
}

/// Mirrors [`DocumentSet`] slot for slot. `None` marks a file whose
/// extraction failed or produced too little text.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DocumentSetResult {
    pub primary: Option<String>,
    pub attachments: Vec<Option<String>>,
    pub evidence: Vec<Option<String>>,
}

impl DocumentSetResult {
    pub fn get(&self, slot: DocumentSlot) -> Option<&str> {
        match slot {
            DocumentSlot::Primary => self.primary.as_deref(),
            DocumentSlot::Attachment(i) => self.attachments.get(i).and_then(|t| t.as_deref()),
            DocumentSlot::Evidence(i) => self.evidence.get(i).and_then(|t| t.as_deref()),
        }
    }
}
