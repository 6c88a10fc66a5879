use crate::error::ValidationError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// The only currency the decision service accepts.
pub const CURRENCY: &str = "USD";

/// A strictly positive payment amount with at most two decimal places.
///
/// Serialized as a JSON number, which is what the decision service expects.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct Amount(#[serde(with = "rust_decimal::serde::float")] Decimal);

impl Amount {
    /// Cents precision.
    pub const MAX_SCALE: u32 = 2;

    pub fn new(value: Decimal) -> Result<Self, ValidationError> {
        let value = value.normalize();
        if value > Decimal::ZERO && value.scale() <= Self::MAX_SCALE {
            Ok(Self(value))
        } else {
            Err(ValidationError::InvalidAmount)
        }
    }

    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl TryFrom<Decimal> for Amount {
    type Error = ValidationError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

/// Per-attempt token letting the service deduplicate network-level retries.
///
/// A fresh key is minted for every attempt and never reused, even when the
/// user resubmits the same payment.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IdempotencyKey(String);

impl IdempotencyKey {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for IdempotencyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Canonical body of `POST /payments/decide`.
///
/// The idempotency key rides along with the request but travels as a header,
/// so it is skipped when serializing the body.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRequest {
    customer_id: String,
    amount: Amount,
    currency: &'static str,
    payee_id: String,
    #[serde(skip)]
    idempotency_key: IdempotencyKey,
}

impl PaymentRequest {
    pub(crate) fn new(customer_id: String, amount: Amount, payee_id: String) -> Self {
        Self {
            customer_id,
            amount,
            currency: CURRENCY,
            payee_id,
            idempotency_key: IdempotencyKey::generate(),
        }
    }

    pub fn customer_id(&self) -> &str {
        &self.customer_id
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }

    pub fn currency(&self) -> &str {
        self.currency
    }

    pub fn payee_id(&self) -> &str {
        &self.payee_id
    }

    pub fn idempotency_key(&self) -> &IdempotencyKey {
        &self.idempotency_key
    }
}

/// Verdict returned by the decision service.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum Decision {
    Allow,
    Review,
    Block,
}

impl Decision {
    pub const ALL: [Decision; 3] = [Decision::Allow, Decision::Review, Decision::Block];

    pub fn as_str(&self) -> &'static str {
        match self {
            Decision::Allow => "allow",
            Decision::Review => "review",
            Decision::Block => "block",
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One step of the service's decisioning pipeline, in execution order.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
pub struct AgentTraceStep {
    pub step: String,
    pub detail: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct PaymentResponse {
    pub decision: Decision,
    pub reasons: Vec<String>,
    pub agent_trace: Vec<AgentTraceStep>,
    pub request_id: String,
}
