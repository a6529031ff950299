use bux_api::ApiError;
use bux_types::ValidationError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors from the transaction draft lifecycle and the transfer form.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DraftError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("a transaction draft is already pending confirmation")]
    Pending,

    #[error("cannot {action} while {state}")]
    InvalidTransition {
        action: &'static str,
        state: &'static str,
    },
}

/// Errors from a confirmation submit attempt. None of these reach the backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfirmError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("a submission is already in flight")]
    InFlight,

    #[error("transaction already settled")]
    Settled,

    #[error("submission was cancelled; result discarded")]
    Cancelled,
}

/// Errors from the contact verification workflow.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContactError {
    #[error("unknown contact: {0}")]
    UnknownContact(String),

    #[error("contact {0} is not awaiting acceptance")]
    NotAwaiting(String),

    #[error("contact {0} is awaiting acceptance")]
    AwaitingAcceptance(String),

    #[error("no verification prompt is open")]
    NoPrompt,

    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Errors from loading the startup configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("default config does not exist at {path}: {reason}")]
    MissingDefault { path: PathBuf, reason: String },

    #[error("config at {0} must be a JSON object")]
    NotAnObject(PathBuf),

    #[error("invalid config: {0}")]
    Invalid(#[from] serde_json::Error),
}
