//! Failure taxonomy of the chat pipeline.
//!
//! Every variant is fatal for the request it occurs in. Nag generation
//! failures are deliberately absent: they never leave
//! [`crate::runtime::nag::nag_or_empty`].

use np_transcript::SanitizeError;

#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    /// The upstream credential is missing. Raised before any other stage.
    #[error("upstream credential not configured (set {env})")]
    Configuration { env: String },

    /// The request itself is malformed; the caller must fix and resend.
    #[error("{reason}")]
    Validation {
        reason: String,
        details: Option<String>,
    },

    /// The completion service failed or answered with a non-success status.
    #[error("upstream: {message}")]
    Upstream { status: Option<u16>, message: String },

    #[error("{0}")]
    Internal(String),
}

impl ChatError {
    pub fn validation(reason: impl Into<String>) -> Self {
        ChatError::Validation {
            reason: reason.into(),
            details: None,
        }
    }
}

impl From<SanitizeError> for ChatError {
    fn from(e: SanitizeError) -> Self {
        match e {
            SanitizeError::NotAnArray => ChatError::validation(e.to_string()),
            SanitizeError::NoValidTurns => ChatError::Validation {
                reason: "messages is required and must contain valid items".into(),
                details: Some(e.to_string()),
            },
        }
    }
}

impl From<np_domain::error::Error> for ChatError {
    fn from(e: np_domain::error::Error) -> Self {
        use np_domain::error::Error;
        match e {
            Error::Upstream {
                status, message, ..
            } => ChatError::Upstream { status, message },
            Error::Http(_) | Error::Timeout(_) => ChatError::Upstream {
                status: None,
                message: e.to_string(),
            },
            other => ChatError::Internal(other.to_string()),
        }
    }
}
