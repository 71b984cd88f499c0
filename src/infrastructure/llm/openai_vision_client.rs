use std::time::Duration;

use async_trait::async_trait;
use base64::{Engine as _, engine::general_purpose};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::application::ports::{
    PageImage, TokenUsage, VisionClient, VisionClientError, VisionRequest, VisionResponse,
};
use crate::infrastructure::text_processing::sanitize_transcription;

pub const DEFAULT_MAX_TOKENS: u32 = 16_384;
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(300);

/// Vision client for OpenAI-compatible `chat/completions` endpoints
/// (OpenAI, LM Studio, vLLM, Ollama).
pub struct OpenAiVisionClient {
    client: Client,
    base_url: String,
    model: String,
    api_key: Option<String>,
    max_tokens: u32,
}

impl OpenAiVisionClient {
    pub fn new(
        base_url: &str,
        model: &str,
        api_key: Option<&str>,
        max_tokens: u32,
        timeout: Duration,
    ) -> Result<Self, VisionClientError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| VisionClientError::RequestFailed(format!("client build failed: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            api_key: api_key.filter(|key| !key.is_empty()).map(str::to_string),
            max_tokens,
        })
    }

    fn request_body(&self, request: &VisionRequest) -> Value {
        let mut content = Vec::with_capacity(request.images.len() + 1);
        content.push(json!({ "type": "text", "text": request.instruction }));
        content.extend(request.images.iter().map(image_part));

        json!({
            "model": self.model,
            "messages": [{ "role": "user", "content": content }],
            "max_tokens": self.max_tokens,
            "temperature": 0.0,
            "stream": false
        })
    }
}

fn image_part(image: &PageImage) -> Value {
    let b64 = general_purpose::STANDARD.encode(&image.png);
    json!({
        "type": "image_url",
        "image_url": { "url": format!("data:image/png;base64,{b64}") }
    })
}

#[derive(Deserialize)]
struct ChatCompletion {
    choices: Vec<Choice>,
    usage: Option<Usage>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChatMessage,
}

#[derive(Deserialize)]
struct ChatMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct Usage {
    #[serde(default)]
    prompt_tokens: u64,
    #[serde(default)]
    completion_tokens: u64,
    #[serde(default)]
    total_tokens: u64,
}

impl From<Usage> for TokenUsage {
    fn from(usage: Usage) -> Self {
        Self {
            prompt_tokens: usage.prompt_tokens,
            completion_tokens: usage.completion_tokens,
            total_tokens: usage.total_tokens,
        }
    }
}

#[async_trait]
impl VisionClient for OpenAiVisionClient {
    #[tracing::instrument(skip(self, request), fields(model = %self.model, images = request.images.len()))]
    async fn transcribe(
        &self,
        request: &VisionRequest,
    ) -> Result<VisionResponse, VisionClientError> {
        let url = format!("{}/v1/chat/completions", self.base_url);

        let mut builder = self.client.post(&url).json(&self.request_body(request));
        if let Some(api_key) = &self.api_key {
            builder = builder.bearer_auth(api_key);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| VisionClientError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(VisionClientError::RateLimited);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(VisionClientError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let raw_bytes = response
            .bytes()
            .await
            .map_err(|e| VisionClientError::RequestFailed(e.to_string()))?;

        let completion: ChatCompletion = serde_json::from_slice(&raw_bytes).map_err(|e| {
            tracing::error!(
                raw_response = %String::from_utf8_lossy(&raw_bytes),
                "Failed to parse vision completion JSON"
            );
            VisionClientError::InvalidResponse(e.to_string())
        })?;

        let content = completion
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| VisionClientError::InvalidResponse("no choices returned".to_string()))?
            .message
            .content
            .unwrap_or_default();

        Ok(VisionResponse {
            text: sanitize_transcription(&content),
            usage: completion.usage.map(TokenUsage::from),
        })
    }
}
