use super::payment::{PaymentRequest, PaymentResponse};
use crate::error::ClientError;
use async_trait::async_trait;
use std::time::Duration;

pub type ClientResult = Result<PaymentResponse, ClientError>;

/// Outcome of one exchange together with the wall-clock time it took.
///
/// The elapsed time covers everything from just before the request was sent
/// until it settled, whether it succeeded or not.
#[derive(Debug, Clone)]
pub struct Timed<T> {
    pub result: T,
    pub elapsed: Duration,
}

/// The remote service that decides whether a payment goes through.
#[async_trait]
pub trait DecisionService: Send + Sync {
    /// Performs exactly one exchange. Never retries.
    async fn submit(&self, request: PaymentRequest, api_key: &str) -> Timed<ClientResult>;
}

pub type DecisionServiceBox = Box<dyn DecisionService>;
