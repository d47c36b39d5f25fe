//! Fake enhancement service for integration tests.
//!
//! Serves `POST /process/complete` on an ephemeral local port, records
//! every multipart upload it receives and answers with a canned reply.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Multipart, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::Router;
use serde_json::json;

/// Canned answer returned for every request.
#[derive(Debug, Clone)]
pub struct Reply {
    pub status: StatusCode,
    pub body: String,
    pub delay: Duration,
}

impl Reply {
    pub fn json(status: StatusCode, body: serde_json::Value) -> Self {
        Self {
            status,
            body: body.to_string(),
            delay: Duration::ZERO,
        }
    }

    pub fn raw(status: StatusCode, body: &str) -> Self {
        Self {
            status,
            body: body.to_string(),
            delay: Duration::ZERO,
        }
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

/// One multipart field as the service saw it.
#[derive(Debug, Clone)]
pub struct ReceivedField {
    pub name: Option<String>,
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

struct FakeState {
    reply: Reply,
    hits: AtomicUsize,
    fields: Mutex<Vec<ReceivedField>>,
}

pub struct FakeService {
    pub endpoint: String,
    state: Arc<FakeState>,
}

impl FakeService {
    pub async fn start(reply: Reply) -> Self {
        let state = Arc::new(FakeState {
            reply,
            hits: AtomicUsize::new(0),
            fields: Mutex::new(Vec::new()),
        });

        let app = Router::new()
            .route("/process/complete", post(handle))
            .with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind fake service");
        let addr = listener.local_addr().expect("fake service address");

        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("fake service crashed");
        });

        Self {
            endpoint: format!("http://{addr}/process/complete"),
            state,
        }
    }

    /// Number of requests that reached the service.
    pub fn hits(&self) -> usize {
        self.state.hits.load(Ordering::SeqCst)
    }

    pub fn fields(&self) -> Vec<ReceivedField> {
        self.state.fields.lock().unwrap().clone()
    }
}

async fn handle(State(state): State<Arc<FakeState>>, mut multipart: Multipart) -> Response {
    state.hits.fetch_add(1, Ordering::SeqCst);

    while let Ok(Some(field)) = multipart.next_field().await {
        let name = field.name().map(str::to_owned);
        let file_name = field.file_name().map(str::to_owned);
        let content_type = field.content_type().map(str::to_owned);
        let bytes = field.bytes().await.map(|b| b.to_vec()).unwrap_or_default();
        state.fields.lock().unwrap().push(ReceivedField {
            name,
            file_name,
            content_type,
            bytes,
        });
    }

    if !state.reply.delay.is_zero() {
        tokio::time::sleep(state.reply.delay).await;
    }

    (
        state.reply.status,
        [(header::CONTENT_TYPE, "application/json")],
        state.reply.body.clone(),
    )
        .into_response()
}

/// An address nothing listens on.
pub fn closed_endpoint() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind probe");
    let addr = listener.local_addr().expect("probe address");
    drop(listener);
    format!("http://{addr}/process/complete")
}

/// A successful service body carrying `payload` as the enhanced image.
pub fn success_body(payload: &str) -> serde_json::Value {
    json!({
        "filename": "image.png",
        "original_rating": {
            "raw_score": 0.48,
            "quality_score": 4.8,
            "processing_time": 0.35,
            "image_info": { "width": 512, "height": 384, "format": "JPEG", "mode": "RGB" }
        },
        "enhancement_info": {
            "original_size": [512, 384],
            "enhanced_size": [2048, 1536],
            "scale_factor": 4,
            "size_increase": 16.0,
            "processing_time": 4.2
        },
        "enhanced_rating": { "raw_score": 0.71, "quality_score": 7.1, "processing_time": 0.4 },
        "improvement_analysis": {
            "score_improvement": 2.3,
            "percentage_improvement": 47.9,
            "improved": true
        },
        "enhanced_image_base64": payload,
        "success": true
    })
}

/// A small JPEG-typed image reference (`\xff\xd8\xff\xe0\x00\x10JFIF`).
pub const JPEG_REFERENCE: &str = "data:image/jpeg;base64,/9j/4AAQSkZJRg==";

pub const JPEG_BYTES: &[u8] = b"\xff\xd8\xff\xe0\x00\x10JFIF";
