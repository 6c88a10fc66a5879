use thiserror::Error;

/// Shown whenever the decision service gives us nothing more specific to say.
pub const GENERIC_FAILURE_MESSAGE: &str = "An unexpected error occurred.";

/// Rejections raised locally, before anything is sent over the network.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Amount must be a positive number with at most two decimal places.")]
    InvalidAmount,
    #[error("{0} is required.")]
    MissingField(&'static str),
}

/// Failures of a single exchange with the decision service.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
    /// The service answered with a non-success status. Carries the service's
    /// `detail` text, or the generic message when none was provided.
    #[error("{0}")]
    Rejected(String),
    #[error("The decision service returned a malformed response.")]
    MalformedResponse,
    #[error("{}", GENERIC_FAILURE_MESSAGE)]
    Unreachable,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required env var: {0}")]
    Missing(&'static str),
    #[error("invalid {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
    #[error("failed to build http client: {0}")]
    Transport(#[from] reqwest::Error),
}

#[derive(Error, Debug)]
pub enum PaymentError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// The submission settled in the failed state with this message.
    #[error("{0}")]
    Failed(String),
}

pub type Result<T> = std::result::Result<T, PaymentError>;
