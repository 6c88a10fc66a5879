use crate::domain::payment::PaymentResponse;
use crate::domain::ports::ClientResult;
use crate::error::ValidationError;
use std::time::{Duration, Instant};

/// Where the current submission stands.
///
/// A response and its latency only ever appear together, in `Succeeded`.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SubmissionState {
    #[default]
    Idle,
    Submitting {
        started_at: Instant,
    },
    Succeeded {
        response: PaymentResponse,
        latency: Duration,
    },
    Failed {
        message: String,
        latency: Duration,
    },
}

/// Something that happened to the current submission.
#[derive(Debug, Clone)]
pub enum SubmissionEvent {
    /// Input was rejected before any request was built.
    Invalid(ValidationError),
    /// A request left for the decision service.
    Dispatched { at: Instant },
    /// The in-flight request settled.
    Settled { result: ClientResult, at: Instant },
}

impl SubmissionState {
    /// Total transition function.
    ///
    /// `Invalid` and `Dispatched` start a new attempt from any state. A
    /// `Settled` event only completes a `Submitting` state; anywhere else there
    /// is no attempt for it to belong to and the state is left untouched.
    pub fn apply(self, event: SubmissionEvent) -> Self {
        match (self, event) {
            (_, SubmissionEvent::Invalid(error)) => SubmissionState::Failed {
                message: error.to_string(),
                latency: Duration::ZERO,
            },
            (_, SubmissionEvent::Dispatched { at }) => {
                SubmissionState::Submitting { started_at: at }
            }
            (
                SubmissionState::Submitting { started_at },
                SubmissionEvent::Settled { result, at },
            ) => {
                let latency = at.saturating_duration_since(started_at);
                match result {
                    Ok(response) => SubmissionState::Succeeded { response, latency },
                    Err(error) => SubmissionState::Failed {
                        message: error.to_string(),
                        latency,
                    },
                }
            }
            (state, SubmissionEvent::Settled { .. }) => state,
        }
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self, SubmissionState::Submitting { .. })
    }

    pub fn response(&self) -> Option<&PaymentResponse> {
        match self {
            SubmissionState::Succeeded { response, .. } => Some(response),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            SubmissionState::Failed { message, .. } => Some(message),
            _ => None,
        }
    }

    /// Latency of a settled attempt.
    pub fn latency(&self) -> Option<Duration> {
        match self {
            SubmissionState::Succeeded { latency, .. }
            | SubmissionState::Failed { latency, .. } => Some(*latency),
            _ => None,
        }
    }
}
