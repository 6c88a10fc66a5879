use crate::config::ClientConfig;
use crate::domain::payment::{PaymentRequest, PaymentResponse};
use crate::domain::ports::{ClientResult, DecisionService, Timed};
use crate::error::{ClientError, ConfigError, GENERIC_FAILURE_MESSAGE};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Instant;
use tracing::{debug, info, warn};

pub const DECIDE_PATH: &str = "/payments/decide";
pub const API_KEY_HEADER: &str = "X-API-Key";
pub const IDEMPOTENCY_KEY_HEADER: &str = "Idempotency-Key";
pub const REQUEST_ID_HEADER: &str = "X-Request-Id";

/// Error body the decision service sends alongside a non-success status.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: String,
}

/// HTTP implementation of [`DecisionService`].
///
/// Holds no per-request state, so one instance can serve any number of
/// submissions.
#[derive(Debug, Clone)]
pub struct DecisionClient {
    http: Client,
    endpoint: String,
}

impl DecisionClient {
    pub fn new(config: &ClientConfig) -> Result<Self, ConfigError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http: builder.build()?,
            endpoint: format!("{}{}", config.base_url.trim_end_matches('/'), DECIDE_PATH),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn exchange(&self, request: &PaymentRequest, api_key: &str) -> ClientResult {
        let response = self
            .http
            .post(&self.endpoint)
            .header(API_KEY_HEADER, api_key)
            .header(IDEMPOTENCY_KEY_HEADER, request.idempotency_key().as_str())
            .json(request)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "decision service unreachable");
                ClientError::Unreachable
            })?;

        let status = response.status();
        if let Some(request_id) = response
            .headers()
            .get(REQUEST_ID_HEADER)
            .and_then(|v| v.to_str().ok())
        {
            debug!(%request_id, "decision service request id");
        }

        let body = response.bytes().await.map_err(|e| {
            warn!(error = %e, %status, "failed to read decision service response");
            ClientError::Unreachable
        })?;

        classify(status, &body)
    }
}

/// Maps a settled HTTP exchange onto the client's result taxonomy.
fn classify(status: StatusCode, body: &[u8]) -> ClientResult {
    if status.is_success() {
        return serde_json::from_slice::<PaymentResponse>(body).map_err(|e| {
            warn!(error = %e, %status, "malformed decision payload");
            ClientError::MalformedResponse
        });
    }

    let detail = serde_json::from_slice::<ErrorBody>(body)
        .ok()
        .map(|b| b.detail)
        .filter(|d| !d.trim().is_empty())
        .unwrap_or_else(|| GENERIC_FAILURE_MESSAGE.to_string());
    warn!(%status, %detail, "decision service rejected the request");
    Err(ClientError::Rejected(detail))
}

#[async_trait]
impl DecisionService for DecisionClient {
    async fn submit(&self, request: PaymentRequest, api_key: &str) -> Timed<ClientResult> {
        let started = Instant::now();
        let result = self.exchange(&request, api_key).await;
        let elapsed = started.elapsed();

        info!(
            idempotency_key = %request.idempotency_key(),
            payee_id = request.payee_id(),
            amount = %request.amount(),
            elapsed_ms = elapsed.as_secs_f64() * 1000.0,
            ok = result.is_ok(),
            "decision exchange settled"
        );

        Timed { result, elapsed }
    }
}
