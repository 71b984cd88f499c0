use async_trait::async_trait;

use super::pdf_parser::PageImage;

/// Remote vision-capable completion service that transcribes page images.
#[async_trait]
pub trait VisionClient: Send + Sync {
    async fn transcribe(&self, request: &VisionRequest) -> Result<VisionResponse, VisionClientError>;
}

#[derive(Debug, Clone)]
pub struct VisionRequest {
    pub instruction: String,
    pub images: Vec<PageImage>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct VisionResponse {
    pub text: String,
    pub usage: Option<TokenUsage>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TokenUsage {
    pub prompt_tokens: u64,
    pub completion_tokens: u64,
    pub total_tokens: u64,
}

#[derive(Debug, thiserror::Error)]
pub enum VisionClientError {
    #[error("vision request failed: {0}")]
    RequestFailed(String),
    #[error("vision service rate limited the request")]
    RateLimited,
    #[error("vision service returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("invalid vision response: {0}")]
    InvalidResponse(String),
}
