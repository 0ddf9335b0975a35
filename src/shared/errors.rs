use thiserror::Error;

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("Backend request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Backend responded with status {0}")]
    Status(u16),

    #[error("Invalid backend URL: {0}")]
    InvalidBaseUrl(String),
}

impl BackendError {
    /// Whether this error is likely transient (connection refused, timeout)
    /// and the request may succeed if retried.
    pub fn is_transient(&self) -> bool {
        match self {
            BackendError::Transport(err) => err.is_connect() || err.is_timeout(),
            _ => false,
        }
    }

    /// Upstream status code, when the backend answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            BackendError::Status(code) => Some(*code),
            BackendError::Transport(err) => err.status().map(|s| s.as_u16()),
            BackendError::InvalidBaseUrl(_) => None,
        }
    }
}

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error(transparent)]
    Backend(#[from] BackendError),

    #[error("Validation: {0}")]
    Validation(String),

    #[error("Not found: {entity} with {field}={value}")]
    NotFound {
        entity: &'static str,
        field: &'static str,
        value: String,
    },
}

impl GatewayError {
    pub fn session_not_found(id: impl ToString) -> Self {
        GatewayError::NotFound {
            entity: "session",
            field: "id",
            value: id.to_string(),
        }
    }
}
