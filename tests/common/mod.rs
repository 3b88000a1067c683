#![allow(dead_code)]

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

pub const TEST_API_KEY: &str = "test-key";

/// A synthesis request as seen by the mock service
#[derive(Debug, Clone)]
pub struct SeenRequest {
    pub voice_id: String,
    pub text: String,
    pub model_id: String,
}

/// How the mock speech service answers
#[derive(Clone)]
pub struct MockService {
    pub requests: Arc<Mutex<Vec<SeenRequest>>>,
    /// Status returned by the synthesis endpoint
    pub synth_status: StatusCode,
}

impl MockService {
    pub fn new() -> Self {
        Self {
            requests: Arc::new(Mutex::new(Vec::new())),
            synth_status: StatusCode::OK,
        }
    }

    pub fn failing_with(status: StatusCode) -> Self {
        Self {
            synth_status: status,
            ..Self::new()
        }
    }

    pub fn seen(&self) -> Vec<SeenRequest> {
        self.requests.lock().unwrap().clone()
    }
}

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get("xi-api-key")
        .and_then(|v| v.to_str().ok())
        .map(|v| v == TEST_API_KEY)
        .unwrap_or(false)
}

async fn voices(headers: HeaderMap) -> impl IntoResponse {
    if !authorized(&headers) {
        return (
            StatusCode::UNAUTHORIZED,
            Json(serde_json::json!({"detail": {"status": "invalid_api_key"}})),
        );
    }

    (
        StatusCode::OK,
        Json(serde_json::json!({
            "voices": [
                {"voice_id": "id-rachel", "name": "Rachel", "category": "premade"},
                {"voice_id": "id-josh", "name": "Josh", "category": "premade"}
            ]
        })),
    )
}

async fn synthesize(
    State(service): State<MockService>,
    Path(voice_id): Path<String>,
    headers: HeaderMap,
    Json(body): Json<serde_json::Value>,
) -> impl IntoResponse {
    if !authorized(&headers) {
        return (StatusCode::UNAUTHORIZED, Vec::new());
    }

    let text = body["text"].as_str().unwrap_or_default().to_string();
    service.requests.lock().unwrap().push(SeenRequest {
        voice_id,
        text: text.clone(),
        model_id: body["model_id"].as_str().unwrap_or_default().to_string(),
    });

    if !service.synth_status.is_success() {
        return (service.synth_status, b"upstream failure".to_vec());
    }

    // Echo the text back so tests can tell the parts apart
    (StatusCode::OK, format!("MP3:{}", text).into_bytes())
}

/// Start the mock service on an ephemeral port, returning its base URL
pub async fn spawn_mock(service: MockService) -> String {
    let app = Router::new()
        .route("/v1/voices", get(voices))
        .route("/v1/text-to-speech/:voice_id", post(synthesize))
        .with_state(service);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}", addr)
}
