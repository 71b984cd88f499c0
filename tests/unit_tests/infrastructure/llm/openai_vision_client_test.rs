use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};
use base64::{Engine as _, engine::general_purpose};
use serde_json::Value;
use tokio::net::TcpListener;
use tokio::sync::oneshot;

use filing_ingest::application::ports::{
    PageImage, TokenUsage, VisionClient, VisionClientError, VisionRequest,
};
use filing_ingest::infrastructure::llm::OpenAiVisionClient;

type Captured = Arc<Mutex<Vec<(Option<String>, Value)>>>;

async fn start_mock_vision_server(
    response_status: u16,
    response_body: &'static str,
) -> (String, Captured, oneshot::Sender<()>) {
    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
    let captured: Captured = Arc::new(Mutex::new(Vec::new()));

    let app = Router::new().route(
        "/v1/chat/completions",
        post({
            let captured = Arc::clone(&captured);
            move |headers: HeaderMap, Json(body): Json<Value>| async move {
                let authorization = headers
                    .get("authorization")
                    .and_then(|value| value.to_str().ok())
                    .map(str::to_string);
                captured.lock().unwrap().push((authorization, body));
                let status = StatusCode::from_u16(response_status).unwrap();
                (status, response_body).into_response()
            }
        }),
    );

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let base_url = format!("http://{}", addr);

    tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                shutdown_rx.await.ok();
            })
            .await
            .ok();
    });

    (base_url, captured, shutdown_tx)
}

fn client(base_url: &str, api_key: Option<&str>) -> OpenAiVisionClient {
    OpenAiVisionClient::new(base_url, "qwen2.5-vl", api_key, 4096, Duration::from_secs(5))
        .unwrap()
}

fn two_page_request() -> VisionRequest {
    VisionRequest {
        instruction: "Transcribe the pages.".to_string(),
        images: vec![
            PageImage {
                page_number: 1,
                png: b"png-1".to_vec(),
            },
            PageImage {
                page_number: 2,
                png: b"png-2".to_vec(),
            },
        ],
    }
}

const COMPLETION: &str = r#"{
    "choices": [{"message": {"role": "assistant", "content": "```\nPETIÇÃO   INICIAL\n\n\n\nO requeri-\nmento\n```"}}],
    "usage": {"prompt_tokens": 1500, "completion_tokens": 42, "total_tokens": 1542}
}"#;

#[tokio::test]
async fn given_successful_completion_when_transcribing_then_returns_sanitized_text_and_usage() {
    let (base_url, _, shutdown_tx) = start_mock_vision_server(200, COMPLETION).await;

    let response = client(&base_url, Some("secret"))
        .transcribe(&two_page_request())
        .await
        .unwrap();

    assert_eq!(response.text, "PETIÇÃO INICIAL\n\nO requerimento");
    assert_eq!(
        response.usage,
        Some(TokenUsage {
            prompt_tokens: 1500,
            completion_tokens: 42,
            total_tokens: 1542,
        })
    );
    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_two_pages_when_transcribing_then_one_message_carries_instruction_and_images() {
    let (base_url, captured, shutdown_tx) = start_mock_vision_server(200, COMPLETION).await;

    client(&base_url, Some("secret"))
        .transcribe(&two_page_request())
        .await
        .unwrap();

    let requests = captured.lock().unwrap().clone();
    assert_eq!(requests.len(), 1);
    let (authorization, body) = &requests[0];
    assert_eq!(authorization.as_deref(), Some("Bearer secret"));
    assert_eq!(body["model"], "qwen2.5-vl");
    assert_eq!(body["temperature"], 0.0);
    assert_eq!(body["max_tokens"], 4096);

    let messages = body["messages"].as_array().unwrap();
    assert_eq!(messages.len(), 1);
    let content = messages[0]["content"].as_array().unwrap();
    assert_eq!(content.len(), 3);
    assert_eq!(content[0]["type"], "text");
    assert_eq!(content[0]["text"], "Transcribe the pages.");
    assert_eq!(content[1]["type"], "image_url");
    assert_eq!(
        content[2]["image_url"]["url"],
        format!(
            "data:image/png;base64,{}",
            general_purpose::STANDARD.encode(b"png-2")
        )
    );
    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_no_api_key_when_transcribing_then_no_authorization_header_is_sent() {
    let (base_url, captured, shutdown_tx) = start_mock_vision_server(200, COMPLETION).await;

    client(&base_url, None)
        .transcribe(&two_page_request())
        .await
        .unwrap();

    assert_eq!(captured.lock().unwrap()[0].0, None);
    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_rate_limit_status_when_transcribing_then_returns_rate_limited() {
    let (base_url, _, shutdown_tx) =
        start_mock_vision_server(429, r#"{"error": "slow down"}"#).await;

    let result = client(&base_url, None).transcribe(&two_page_request()).await;

    assert!(matches!(result, Err(VisionClientError::RateLimited)));
    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_server_error_when_transcribing_then_returns_status_with_body() {
    let (base_url, _, shutdown_tx) = start_mock_vision_server(500, "model crashed").await;

    let result = client(&base_url, None).transcribe(&two_page_request()).await;

    match result {
        Err(VisionClientError::Status { status, body }) => {
            assert_eq!(status, 500);
            assert_eq!(body, "model crashed");
        }
        other => panic!("expected Status error, got {other:?}"),
    }
    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_non_json_body_when_transcribing_then_returns_invalid_response() {
    let (base_url, _, shutdown_tx) = start_mock_vision_server(200, "<html>proxy</html>").await;

    let result = client(&base_url, None).transcribe(&two_page_request()).await;

    assert!(matches!(result, Err(VisionClientError::InvalidResponse(_))));
    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_unreachable_server_when_transcribing_then_returns_request_failed() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);

    let result = client(&base_url, None).transcribe(&two_page_request()).await;

    assert!(matches!(result, Err(VisionClientError::RequestFailed(_))));
}
