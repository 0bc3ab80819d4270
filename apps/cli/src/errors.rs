use thiserror::Error;

/// Everything that can go wrong between a user action and a settled session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// Rejected locally; no request was sent.
    #[error("validation failed: {0}")]
    Validation(String),

    #[error("backend unavailable: {0}")]
    BackendUnavailable(String),

    /// A success status with a body that does not hold the expected shape.
    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

impl SessionError {
    /// Unavailable and malformed are the same thing as far as the user is concerned.
    pub fn is_backend_failure(&self) -> bool {
        matches!(
            self,
            SessionError::BackendUnavailable(_) | SessionError::MalformedResponse(_)
        )
    }
}

impl From<reqwest::Error> for SessionError {
    fn from(e: reqwest::Error) -> Self {
        SessionError::BackendUnavailable(e.to_string())
    }
}
