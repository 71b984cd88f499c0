use std::sync::Arc;

use crate::domain::ExtractionMode;

use super::progress::ProgressSender;
use super::pure_extraction::PureExtractionEngine;
use super::vision_ocr::VisionOcrEngine;

/// Dispatches PDF extraction to the engine selected by [`ExtractionMode`].
pub struct ExtractionRouter {
    pure: Arc<PureExtractionEngine>,
    vision: Option<Arc<VisionOcrEngine>>,
}

impl ExtractionRouter {
    pub fn new(pure: Arc<PureExtractionEngine>, vision: Option<Arc<VisionOcrEngine>>) -> Self {
        Self { pure, vision }
    }

    pub fn has_vision(&self) -> bool {
        self.vision.is_some()
    }

    #[tracing::instrument(skip(self, data, progress), fields(bytes = data.len(), %mode))]
    pub async fn extract(
        &self,
        data: &[u8],
        mode: ExtractionMode,
        progress: &ProgressSender,
    ) -> Option<String> {
        match mode {
            ExtractionMode::Disabled => {
                tracing::debug!("PDF extraction disabled");
                None
            }
            ExtractionMode::Pure => self.pure.extract(data, progress).await,
            ExtractionMode::Vision => match &self.vision {
                Some(vision) => vision.extract(data, progress).await,
                None => {
                    tracing::warn!("Vision mode requested without a vision client, using pure extraction");
                    self.pure.extract(data, progress).await
                }
            },
        }
    }
}
