#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::State;
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use axum::{Json, Router};

use pingrelay_events::{GatewayClient, GatewayConfig};

/// A request captured by the stub gateway.
#[derive(Debug, Clone)]
pub struct ReceivedRequest {
    pub content_type: Option<String>,
    pub payload: serde_json::Value,
}

#[derive(Clone)]
struct StubState {
    status: StatusCode,
    body: Vec<u8>,
    delay: Duration,
    received: Arc<Mutex<Vec<ReceivedRequest>>>,
}

/// In-process stand-in for the notification gateway.
///
/// Answers every `POST /notify` with a fixed status and body and records
/// what it was sent.
pub struct StubGateway {
    pub url: String,
    received: Arc<Mutex<Vec<ReceivedRequest>>>,
}

impl StubGateway {
    pub async fn start(status: StatusCode, body: impl Into<Vec<u8>>) -> Self {
        Self::start_with_delay(status, body, Duration::ZERO).await
    }

    pub async fn start_with_delay(
        status: StatusCode,
        body: impl Into<Vec<u8>>,
        delay: Duration,
    ) -> Self {
        let received = Arc::new(Mutex::new(Vec::new()));
        let state = StubState {
            status,
            body: body.into(),
            delay,
            received: Arc::clone(&received),
        };

        let app = Router::new()
            .route("/notify", post(notify))
            .with_state(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind stub gateway");
        let addr = listener.local_addr().expect("stub gateway address");

        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("stub gateway");
        });

        Self {
            url: format!("http://{addr}/notify"),
            received,
        }
    }

    pub fn received(&self) -> Vec<ReceivedRequest> {
        self.received.lock().unwrap().clone()
    }

    pub fn client(&self) -> GatewayClient {
        GatewayClient::new(&GatewayConfig::new(self.url.clone())).expect("build client")
    }
}

async fn notify(
    State(state): State<StubState>,
    headers: HeaderMap,
    Json(payload): Json<serde_json::Value>,
) -> (StatusCode, Vec<u8>) {
    let content_type = headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    state.received.lock().unwrap().push(ReceivedRequest {
        content_type,
        payload,
    });

    if !state.delay.is_zero() {
        tokio::time::sleep(state.delay).await;
    }

    (state.status, state.body)
}

/// URL of a local port with nothing listening on it.
pub async fn unreachable_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind probe listener");
    let addr = listener.local_addr().expect("probe address");
    drop(listener);
    format!("http://{addr}/notify")
}
