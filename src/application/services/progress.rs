use tokio::sync::mpsc;

use crate::domain::DocumentSlot;

/// Progress of a single PDF extraction. Page numbers are 1-based and arrive
/// in ascending order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionProgress {
    Starting,
    PageExtracted { page: usize, total: usize },
    PageRendered { page: usize, total: usize },
}

/// Sending half of a progress stream. A sender created with
/// [`ProgressSender::disabled`] or whose receiver was dropped discards events.
#[derive(Debug, Clone, Default)]
pub struct ProgressSender(Option<mpsc::UnboundedSender<ExtractionProgress>>);

impl ProgressSender {
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<ExtractionProgress>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self(Some(tx)), rx)
    }

    pub fn disabled() -> Self {
        Self(None)
    }

    pub fn emit(&self, event: ExtractionProgress) {
        if let Some(tx) = &self.0 {
            let _ = tx.send(event);
        }
    }
}

/// Status of a document-set run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentSetEvent {
    Busy(bool),
    ItemCompleted {
        slot: DocumentSlot,
        extracted: bool,
        chars: usize,
    },
}

#[derive(Debug, Clone, Default)]
pub struct StatusSender(Option<mpsc::UnboundedSender<DocumentSetEvent>>);

impl StatusSender {
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<DocumentSetEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self(Some(tx)), rx)
    }

    pub fn disabled() -> Self {
        Self(None)
    }

    pub fn emit(&self, event: DocumentSetEvent) {
        if let Some(tx) = &self.0 {
            let _ = tx.send(event);
        }
    }
}
