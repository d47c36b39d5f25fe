//! Integration tests for [`EnhancementClient`] against a fake service.

mod common;

use std::time::Duration;

use assert_matches::assert_matches;
use axum::http::StatusCode;
use serde_json::json;

use common::{closed_endpoint, success_body, FakeService, Reply, JPEG_BYTES, JPEG_REFERENCE};
use enhancer_client::client::{EnhancementClient, UPLOAD_FIELD_NAME, UPLOAD_FILENAME};
use enhancer_client::config::ClientConfig;
use enhancer_core::error::{EnhanceError, LOGICAL_FAILURE_MESSAGE, TRANSPORT_FAILURE_MESSAGE};

/// Base64 of `ABCDEFGHIJKLMNO`: exactly 20 characters.
const PAYLOAD: &str = "QUJDREVGR0hJSktMTU5P";

fn client_for(endpoint: &str) -> EnhancementClient {
    EnhancementClient::new(&ClientConfig::new(endpoint)).expect("client builds")
}

// ---------------------------------------------------------------------------
// Success path
// ---------------------------------------------------------------------------

#[tokio::test]
async fn success_wraps_payload_with_original_media_type() {
    let service = FakeService::start(Reply::json(StatusCode::OK, success_body(PAYLOAD))).await;
    let client = client_for(&service.endpoint);

    let result = client.submit(JPEG_REFERENCE).await.unwrap();

    assert_eq!(PAYLOAD.len(), 20);
    assert_eq!(
        result.enhanced_image_base64,
        format!("data:image/jpeg;base64,{PAYLOAD}")
    );
    // Everything else passes through untouched, including the echoed name.
    assert_eq!(result.filename, "image.png");
    assert_eq!(result.enhancement_info.enhanced_size, [2048, 1536]);
    assert!(result.improvement_analysis.improved);
    assert_eq!(service.hits(), 1);
}

#[tokio::test]
async fn upload_is_single_file_field_with_synthetic_name() {
    let service = FakeService::start(Reply::json(StatusCode::OK, success_body(PAYLOAD))).await;

    client_for(&service.endpoint)
        .submit(JPEG_REFERENCE)
        .await
        .unwrap();

    let fields = service.fields();
    assert_eq!(fields.len(), 1);
    let field = &fields[0];
    assert_eq!(field.name.as_deref(), Some(UPLOAD_FIELD_NAME));
    assert_eq!(field.file_name.as_deref(), Some(UPLOAD_FILENAME));
    assert_eq!(field.content_type.as_deref(), Some("image/jpeg"));
    assert_eq!(field.bytes, JPEG_BYTES);
}

#[tokio::test]
async fn unknown_fields_pass_through() {
    let mut body = success_body(PAYLOAD);
    body["model_version"] = json!("realesrgan-x4plus");
    let service = FakeService::start(Reply::json(StatusCode::OK, body)).await;

    let result = client_for(&service.endpoint)
        .submit(JPEG_REFERENCE)
        .await
        .unwrap();

    assert_eq!(result.extra["model_version"], "realesrgan-x4plus");
}

// ---------------------------------------------------------------------------
// Validation happens before any I/O
// ---------------------------------------------------------------------------

#[tokio::test]
async fn invalid_reference_never_reaches_the_service() {
    let service = FakeService::start(Reply::json(StatusCode::OK, success_body(PAYLOAD))).await;
    let client = client_for(&service.endpoint);

    assert_matches!(
        client.submit("").await,
        Err(EnhanceError::Validation(msg)) if msg == "Image data is required."
    );
    assert_matches!(
        client.submit("data:application/pdf;base64,QUJD").await,
        Err(EnhanceError::Validation(msg)) if msg == "Invalid image data format."
    );
    assert_matches!(
        client.submit("data:image/png;base64").await,
        Err(EnhanceError::Codec(_))
    );

    assert_eq!(service.hits(), 0);
}

#[tokio::test]
async fn unparsable_endpoint_never_reaches_the_service() {
    let service = FakeService::start(Reply::json(StatusCode::OK, success_body(PAYLOAD))).await;
    let broken = service.endpoint.replacen("http://", "http//", 1);
    let client = client_for(&broken);

    assert_matches!(
        client.submit(JPEG_REFERENCE).await,
        Err(EnhanceError::Validation(msg)) if msg == "Invalid model endpoint URL."
    );
    assert_eq!(service.hits(), 0);
}

// ---------------------------------------------------------------------------
// Failure classification
// ---------------------------------------------------------------------------

#[tokio::test]
async fn service_detail_becomes_the_message() {
    let service = FakeService::start(Reply::json(
        StatusCode::INTERNAL_SERVER_ERROR,
        json!({ "detail": "model unavailable" }),
    ))
    .await;

    let err = client_for(&service.endpoint)
        .submit(JPEG_REFERENCE)
        .await
        .unwrap_err();

    assert_matches!(&err, EnhanceError::Service { status: 500, .. });
    assert_eq!(err.to_string(), "model unavailable");
}

#[tokio::test]
async fn unparsable_error_body_names_the_status() {
    let service = FakeService::start(Reply::raw(
        StatusCode::INTERNAL_SERVER_ERROR,
        "Internal Server Error",
    ))
    .await;

    let err = client_for(&service.endpoint)
        .submit(JPEG_REFERENCE)
        .await
        .unwrap_err();

    assert_matches!(err, EnhanceError::Service { .. });
    assert!(err.to_string().contains("500"), "message was {err}");
}

#[tokio::test]
async fn success_false_is_a_logical_failure() {
    let mut body = success_body(PAYLOAD);
    body["success"] = json!(false);
    let service = FakeService::start(Reply::json(StatusCode::OK, body)).await;

    let err = client_for(&service.endpoint)
        .submit(JPEG_REFERENCE)
        .await
        .unwrap_err();

    assert_matches!(err, EnhanceError::LogicalFailure);
    assert_eq!(err.to_string(), LOGICAL_FAILURE_MESSAGE);
}

#[tokio::test]
async fn malformed_success_body_is_a_service_error() {
    let service =
        FakeService::start(Reply::json(StatusCode::OK, json!({ "success": true }))).await;

    let err = client_for(&service.endpoint)
        .submit(JPEG_REFERENCE)
        .await
        .unwrap_err();

    assert_matches!(err, EnhanceError::Service { status: 200, .. });
}

#[tokio::test]
async fn refused_connection_is_a_transport_error() {
    let err = client_for(&closed_endpoint())
        .submit(JPEG_REFERENCE)
        .await
        .unwrap_err();

    assert_matches!(err, EnhanceError::Transport { .. });
    assert_eq!(err.to_string(), TRANSPORT_FAILURE_MESSAGE);
}

#[tokio::test]
async fn slow_service_times_out_as_transport_error() {
    let service = FakeService::start(
        Reply::json(StatusCode::OK, success_body(PAYLOAD)).delayed(Duration::from_secs(5)),
    )
    .await;
    let config = ClientConfig::new(&service.endpoint).with_timeout(Some(Duration::from_millis(200)));
    let client = EnhancementClient::new(&config).unwrap();

    let err = client.submit(JPEG_REFERENCE).await.unwrap_err();

    assert_matches!(err, EnhanceError::Transport { .. });
}
