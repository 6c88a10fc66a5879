#![allow(dead_code)]

use async_trait::async_trait;
use axum::Router;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::post;
use paynow::domain::payment::{AgentTraceStep, Decision, PaymentRequest, PaymentResponse};
use paynow::domain::ports::{ClientResult, DecisionService, Timed};
use paynow::error::ClientError;
use std::sync::{Arc, Mutex};
use std::time::Instant;
use tokio::sync::{mpsc, oneshot};

pub const API_KEY: &str = "test-api-key";

pub fn payment_response(decision: Decision, reasons: &[&str]) -> PaymentResponse {
    PaymentResponse {
        decision,
        reasons: reasons.iter().map(|r| r.to_string()).collect(),
        agent_trace: vec![
            AgentTraceStep {
                step: "plan".to_string(),
                detail: "Check balance, risk, and limits.".to_string(),
            },
            AgentTraceStep {
                step: "tool:getRiskSignals".to_string(),
                detail: "recent_disputes=0, device_change=false".to_string(),
            },
        ],
        request_id: "req-stub".to_string(),
    }
}

/// A request the controller handed to [`ChannelService`], waiting for the
/// test to decide how it settles.
pub struct PendingCall {
    pub request: PaymentRequest,
    pub api_key: String,
    pub respond: oneshot::Sender<ClientResult>,
}

/// Decision service double whose calls settle only when the test says so.
pub struct ChannelService {
    calls: mpsc::UnboundedSender<PendingCall>,
}

impl ChannelService {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<PendingCall>) {
        let (calls, rx) = mpsc::unbounded_channel();
        (Self { calls }, rx)
    }
}

#[async_trait]
impl DecisionService for ChannelService {
    async fn submit(&self, request: PaymentRequest, api_key: &str) -> Timed<ClientResult> {
        let started = Instant::now();
        let (respond, settled) = oneshot::channel();
        let call = PendingCall {
            request,
            api_key: api_key.to_string(),
            respond,
        };

        let result = if self.calls.send(call).is_ok() {
            settled.await.unwrap_or(Err(ClientError::Unreachable))
        } else {
            Err(ClientError::Unreachable)
        };

        Timed {
            result,
            elapsed: started.elapsed(),
        }
    }
}

/// What the stub decision service saw on one request.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub api_key: Option<String>,
    pub idempotency_key: Option<String>,
    pub body: serde_json::Value,
}

#[derive(Clone)]
struct Stub {
    status: StatusCode,
    body: String,
    recorded: Arc<Mutex<Vec<Recorded>>>,
}

/// In-process stand-in for the decision service answering every
/// `POST /payments/decide` with a fixed status and body.
pub struct StubServer {
    pub base_url: String,
    recorded: Arc<Mutex<Vec<Recorded>>>,
}

impl StubServer {
    pub async fn start(status: u16, body: impl Into<String>) -> Self {
        let recorded = Arc::new(Mutex::new(Vec::new()));
        let stub = Stub {
            status: StatusCode::from_u16(status).unwrap(),
            body: body.into(),
            recorded: recorded.clone(),
        };
        let app = Router::new()
            .route("/payments/decide", post(decide))
            .with_state(stub);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{addr}"),
            recorded,
        }
    }

    pub async fn respond_json(status: u16, body: &serde_json::Value) -> Self {
        Self::start(status, body.to_string()).await
    }

    pub fn recorded(&self) -> Vec<Recorded> {
        self.recorded.lock().unwrap().clone()
    }
}

async fn decide(State(stub): State<Stub>, headers: HeaderMap, body: Bytes) -> impl IntoResponse {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };
    stub.recorded.lock().unwrap().push(Recorded {
        api_key: header("x-api-key"),
        idempotency_key: header("idempotency-key"),
        body: serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null),
    });

    (
        stub.status,
        [
            ("content-type", "application/json"),
            ("x-request-id", "stub-request-id"),
        ],
        stub.body,
    )
}

/// A base URL nothing is listening on.
pub async fn unreachable_base_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}
