use thiserror::Error;

use crate::wizard::StepId;

/// Failures raised while moving through the navigation history.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavigationError {
    #[error("Already at the first step")]
    AtStart,
    #[error("No next step, submit the current step first")]
    NoNextStep,
    #[error("Wizard has not started")]
    NotStarted,
}

/// Error type surfaced by every wizard operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WizardError {
    #[error("Invalid answer for `{step}`: {reason}")]
    ValidationRejected { step: StepId, reason: String },
    #[error(transparent)]
    Navigation(#[from] NavigationError),
    #[error("Please fill in all information (invalid: {})", .fields.join(", "))]
    PayloadInvalid { fields: Vec<String> },
    #[error("Survey submission failed: {cause}")]
    SubmissionFailure { cause: String },
    #[error("Wizard session is closed")]
    SessionClosed,
}

impl WizardError {
    pub fn rejected(step: StepId, reason: impl Into<String>) -> Self {
        Self::ValidationRejected {
            step,
            reason: reason.into(),
        }
    }
}

/// Transport-level failure reported by a [`crate::wizard::SubmissionGateway`].
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Request failed: {0}")]
    Request(String),
}

/// Errors raised while loading or saving configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Could not determine configuration directory")]
    NoConfigDir,
}
