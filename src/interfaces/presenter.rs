//! Pure rendering of submission state. No I/O happens here.
//!
//! Style tokens are opaque class names for whatever front end draws them; the
//! `Display` impls give a plain-text rendering for the terminal.

use crate::application::state::SubmissionState;
use crate::domain::payment::{AgentTraceStep, Decision, PaymentResponse};
use std::fmt;
use std::time::Duration;

/// Style tokens for a decision banner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Severity {
    pub background: &'static str,
    pub foreground: &'static str,
    pub border: &'static str,
}

pub fn severity_of(decision: Decision) -> Severity {
    match decision {
        Decision::Allow => Severity {
            background: "bg-green-100",
            foreground: "text-green-800",
            border: "border-green-400",
        },
        Decision::Review => Severity {
            background: "bg-yellow-100",
            foreground: "text-yellow-800",
            border: "border-yellow-400",
        },
        Decision::Block => Severity {
            background: "bg-red-100",
            foreground: "text-red-800",
            border: "border-red-400",
        },
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceEntry {
    /// Zero-based position in the service's pipeline.
    pub position: usize,
    pub step: String,
    pub detail: String,
}

impl fmt::Display for TraceEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.step, self.detail)
    }
}

/// One entry per step, in the order received.
pub fn format_trace(trace: &[AgentTraceStep]) -> Vec<TraceEntry> {
    trace
        .iter()
        .enumerate()
        .map(|(position, step)| TraceEntry {
            position,
            step: step.step.clone(),
            detail: step.detail.clone(),
        })
        .collect()
}

pub fn format_latency(ms: f64) -> String {
    format!("{ms:.2}")
}

/// Expand/collapse switch for the agent trace. Collapsed until toggled.
///
/// This is view state only and lives outside the submission controller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TraceToggle {
    expanded: bool,
}

impl TraceToggle {
    pub fn expanded() -> Self {
        Self { expanded: true }
    }

    pub fn toggle(&mut self) {
        self.expanded = !self.expanded;
    }

    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    pub fn label(&self) -> &'static str {
        if self.expanded {
            "Hide Agent Trace"
        } else {
            "Show Agent Trace"
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DecisionView {
    pub decision: Decision,
    pub severity: Severity,
    /// `None` when the service gave no reasons; there is no empty section.
    pub reasons: Option<Vec<String>>,
    pub latency_ms: String,
    pub request_id: String,
    pub trace: Vec<TraceEntry>,
    pub toggle: TraceToggle,
}

impl DecisionView {
    pub fn new(response: &PaymentResponse, latency: Duration, toggle: TraceToggle) -> Self {
        Self {
            decision: response.decision,
            severity: severity_of(response.decision),
            reasons: (!response.reasons.is_empty()).then(|| response.reasons.clone()),
            latency_ms: format_latency(latency.as_secs_f64() * 1000.0),
            request_id: response.request_id.clone(),
            trace: format_trace(&response.agent_trace),
            toggle,
        }
    }

    /// Trace entries to draw right now.
    pub fn visible_trace(&self) -> &[TraceEntry] {
        if self.toggle.is_expanded() {
            &self.trace
        } else {
            &[]
        }
    }
}

impl fmt::Display for DecisionView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Decision: {}", self.decision.as_str().to_uppercase())?;
        if let Some(reasons) = &self.reasons {
            writeln!(f, "Reasons:")?;
            for reason in reasons {
                writeln!(f, "  - {reason}")?;
            }
        }
        writeln!(
            f,
            "Request fulfilled in {}ms (Request ID: {})",
            self.latency_ms, self.request_id
        )?;
        write!(f, "{}", self.toggle.label())?;
        for entry in self.visible_trace() {
            write!(f, "\n  {entry}")?;
        }
        Ok(())
    }
}

/// Everything the front end needs to draw for one state.
#[derive(Debug, Clone, PartialEq)]
pub enum View {
    Idle,
    Processing,
    Error(String),
    Decision(DecisionView),
}

pub fn render(state: &SubmissionState, toggle: TraceToggle) -> View {
    match state {
        SubmissionState::Idle => View::Idle,
        SubmissionState::Submitting { .. } => View::Processing,
        SubmissionState::Failed { message, .. } => View::Error(message.clone()),
        SubmissionState::Succeeded { response, latency } => {
            View::Decision(DecisionView::new(response, *latency, toggle))
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            View::Idle => Ok(()),
            View::Processing => write!(f, "Processing..."),
            View::Error(message) => write!(f, "Error: {message}"),
            View::Decision(view) => fmt::Display::fmt(view, f),
        }
    }
}
