//! Integration tests for single-attempt gateway delivery.
//!
//! Each test runs the real [`GatewayClient`] against an in-process stub
//! gateway and checks how the HTTP outcome is mapped.

mod common;

use std::time::Duration;

use assert_matches::assert_matches;
use axum::http::StatusCode;

use common::{unreachable_url, StubGateway};
use pingrelay_events::{DeliveryError, GatewayClient, GatewayConfig, NotificationPayload};

#[tokio::test]
async fn success_returns_response_text() {
    let gateway = StubGateway::start(StatusCode::OK, "OK").await;

    let result = gateway
        .client()
        .send("bb10@example.com", "iMessage - Alice", "Hello", true)
        .await;

    assert_eq!(result.unwrap(), "OK");
}

#[tokio::test]
async fn request_carries_json_payload() {
    let gateway = StubGateway::start(StatusCode::OK, r#"{"queued":true}"#).await;

    let response = gateway
        .client()
        .send("bb10@example.com", "iMessage (2)", "Alice\nHi\nBob\nYo", false)
        .await
        .unwrap();
    assert_eq!(response, r#"{"queued":true}"#);

    let received = gateway.received();
    assert_eq!(received.len(), 1);
    assert_eq!(received[0].content_type.as_deref(), Some("application/json"));

    let payload: NotificationPayload =
        serde_json::from_value(received[0].payload.clone()).expect("payload shape");
    assert_eq!(
        payload,
        NotificationPayload {
            recipient_email: "bb10@example.com".into(),
            message_title: "iMessage (2)".into(),
            message_body: "Alice\nHi\nBob\nYo".into(),
            method: "mqtt".into(),
            queue_if_offline: false,
            collapse_duplicates: false,
        }
    );
}

#[tokio::test]
async fn not_found_is_invalid_status() {
    let gateway = StubGateway::start(StatusCode::NOT_FOUND, "no such device").await;

    let err = gateway
        .client()
        .send("bb10@example.com", "t", "b", true)
        .await
        .unwrap_err();

    assert_matches!(err, DeliveryError::InvalidStatus(404));
    assert_eq!(err.status_code(), 404);
}

#[tokio::test]
async fn server_error_is_invalid_status() {
    let gateway = StubGateway::start(StatusCode::INTERNAL_SERVER_ERROR, "").await;

    let err = gateway
        .client()
        .send("bb10@example.com", "t", "b", true)
        .await
        .unwrap_err();

    assert_matches!(err, DeliveryError::InvalidStatus(500));
}

#[tokio::test]
async fn empty_success_body_is_no_data() {
    let gateway = StubGateway::start(StatusCode::OK, Vec::<u8>::new()).await;

    let err = gateway
        .client()
        .send("bb10@example.com", "t", "b", true)
        .await
        .unwrap_err();

    assert_matches!(err, DeliveryError::NoData);
    assert_eq!(err.status_code(), -1);
}

#[tokio::test]
async fn non_utf8_body_is_invalid_response() {
    let gateway = StubGateway::start(StatusCode::OK, vec![0xffu8, 0xfe, 0xfd]).await;

    let err = gateway
        .client()
        .send("bb10@example.com", "t", "b", true)
        .await
        .unwrap_err();

    assert_matches!(err, DeliveryError::InvalidResponse(_));
}

#[tokio::test]
async fn accepted_status_counts_as_success() {
    let gateway = StubGateway::start(StatusCode::ACCEPTED, "queued").await;

    let result = gateway
        .client()
        .send("bb10@example.com", "t", "b", true)
        .await;

    assert_eq!(result.unwrap(), "queued");
}

#[tokio::test]
async fn refused_connection_is_transport_error() {
    let client = GatewayClient::new(&GatewayConfig::new(unreachable_url().await)).unwrap();

    let err = client
        .send("bb10@example.com", "t", "b", true)
        .await
        .unwrap_err();

    assert_matches!(err, DeliveryError::Transport(_));
    assert_eq!(err.status_code(), -1);
}

#[tokio::test]
async fn slow_gateway_times_out_as_transport_error() {
    let gateway =
        StubGateway::start_with_delay(StatusCode::OK, "late", Duration::from_secs(5)).await;
    let config = GatewayConfig {
        url: gateway.url.clone(),
        request_timeout: Duration::from_millis(100),
    };

    let err = GatewayClient::new(&config)
        .unwrap()
        .send("bb10@example.com", "t", "b", true)
        .await
        .unwrap_err();

    assert_matches!(err, DeliveryError::Transport(ref e) if e.is_timeout());
}
