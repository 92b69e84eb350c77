use thiserror::Error;

/// Failures surfaced by backend calls. Everything the transport or the
/// server can do wrong collapses into these two cases; callers log and
/// carry on with whatever state they already had.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Unreachable backend, timeouts, malformed bodies.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-2xx response; `detail` is the backend's `error` field when the
    /// body carried one.
    #[error("server rejected request ({status}): {detail}")]
    Status {
        status: reqwest::StatusCode,
        detail: String,
    },
}

impl ApiError {
    /// A plain backend rejection with the given detail, the shape the
    /// server's `{"error": ...}` bodies collapse into.
    pub fn server(detail: &str) -> Self {
        ApiError::Status {
            status: reqwest::StatusCode::INTERNAL_SERVER_ERROR,
            detail: detail.to_string(),
        }
    }

    /// Short human-readable form for status lines.
    pub fn detail(&self) -> String {
        match self {
            ApiError::Transport(err) => err.to_string(),
            ApiError::Status { detail, .. } => detail.clone(),
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
