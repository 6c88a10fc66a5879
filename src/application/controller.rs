use super::state::{SubmissionEvent, SubmissionState};
use crate::config::ClientConfig;
use crate::domain::ports::DecisionServiceBox;
use crate::domain::request::RequestBuilder;
use crate::error::Result;
use crate::infrastructure::http::DecisionClient;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;
use tokio::sync::watch;
use tracing::{debug, info};

/// Raw payment fields as typed by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentForm {
    pub customer_id: String,
    pub amount: String,
    pub payee_id: String,
}

impl PaymentForm {
    pub fn new(
        customer_id: impl Into<String>,
        amount: impl Into<String>,
        payee_id: impl Into<String>,
    ) -> Self {
        Self {
            customer_id: customer_id.into(),
            amount: amount.into(),
            payee_id: payee_id.into(),
        }
    }
}

/// What happened to the outcome of one `submit` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settlement {
    /// The outcome became the controller's current state.
    Applied,
    /// A newer submission was issued first; the outcome was dropped.
    Superseded,
}

/// Drives one payment submission at a time against a [`DecisionService`].
///
/// Every call to [`submit`](Self::submit) is tagged with a generation number.
/// Starting a new submission while one is still in flight supersedes it: the
/// older request is left to finish on its own, but its outcome is discarded
/// when it arrives. The controller therefore never honours two outstanding
/// requests at once.
///
/// [`DecisionService`]: crate::domain::ports::DecisionService
pub struct SubmissionController {
    service: DecisionServiceBox,
    api_key: String,
    state: watch::Sender<SubmissionState>,
    generation: AtomicU64,
}

impl SubmissionController {
    pub fn new(service: DecisionServiceBox, api_key: impl Into<String>) -> Self {
        Self {
            service,
            api_key: api_key.into(),
            state: watch::Sender::new(SubmissionState::Idle),
            generation: AtomicU64::new(0),
        }
    }

    /// Builds a controller backed by the HTTP [`DecisionClient`].
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        let client = DecisionClient::new(config)?;
        Ok(Self::new(Box::new(client), config.api_key.clone()))
    }

    /// Validates `form` and, if it holds up, sends it for a decision.
    ///
    /// Invalid input fails the attempt straight away without touching the
    /// network.
    pub async fn submit(&self, form: &PaymentForm) -> Settlement {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        let request = match RequestBuilder::build(&form.customer_id, &form.amount, &form.payee_id) {
            Ok(request) => request,
            Err(error) => {
                debug!(generation, %error, "submission rejected before dispatch");
                return self.transition(generation, SubmissionEvent::Invalid(error));
            }
        };

        info!(
            generation,
            idempotency_key = %request.idempotency_key(),
            "dispatching payment for decision"
        );
        let dispatched =
            self.transition(generation, SubmissionEvent::Dispatched { at: Instant::now() });
        if dispatched == Settlement::Superseded {
            return Settlement::Superseded;
        }

        let outcome = self.service.submit(request, &self.api_key).await;
        debug!(
            generation,
            elapsed_ms = outcome.elapsed.as_secs_f64() * 1000.0,
            "decision service settled"
        );

        self.transition(
            generation,
            SubmissionEvent::Settled {
                result: outcome.result,
                at: Instant::now(),
            },
        )
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> SubmissionState {
        self.state.borrow().clone()
    }

    /// Change feed for the presentation layer.
    pub fn subscribe(&self) -> watch::Receiver<SubmissionState> {
        self.state.subscribe()
    }

    /// Whether a request is in flight; the submit trigger should be disabled
    /// while this holds.
    pub fn is_submitting(&self) -> bool {
        self.state.borrow().is_submitting()
    }

    fn transition(&self, generation: u64, event: SubmissionEvent) -> Settlement {
        let applied = self.state.send_if_modified(|state| {
            if self.generation.load(Ordering::SeqCst) != generation {
                return false;
            }
            *state = std::mem::take(state).apply(event);
            true
        });

        if applied {
            Settlement::Applied
        } else {
            debug!(generation, "discarding superseded submission outcome");
            Settlement::Superseded
        }
    }
}
