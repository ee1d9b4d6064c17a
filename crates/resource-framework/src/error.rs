//! # Framework Errors
//!
//! Every failure the HTTP layer can produce is an [`ApiError`]. The service
//! layer never interprets these; it hands them back to the caller unchanged.
//! Stores turn them into a display message with [`ApiError::user_message`]
//! and, depending on the action, either re-raise them or swallow them.

/// Errors produced while talking to the REST backend.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request never produced a response (DNS, connect, timeout, ...).
    #[error("Transport error: {0}")]
    Transport(String),

    /// The server answered with a non-2xx status.
    #[error("HTTP {status}: {}", message.as_deref().unwrap_or("no message"))]
    Status {
        status: u16,
        message: Option<String>,
        body: String,
    },

    /// The response body did not match the expected shape.
    #[error("Decode error: {0}")]
    Decode(String),

    /// The request could not be built (e.g. a body that fails to serialize).
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl ApiError {
    /// HTTP status code, if the server responded at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// 404 is used by the backend as a plain "does not exist" answer.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// 401/403 mean the bearer token is no longer accepted.
    pub fn is_auth_failure(&self) -> bool {
        matches!(self.status(), Some(401) | Some(403))
    }

    /// The human-readable message the server attached to the failure.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Status { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    /// Message to show the user: the server's message, else `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        self.server_message()
            .map(str::to_owned)
            .unwrap_or_else(|| fallback.to_owned())
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        ApiError::Transport(e.to_string())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::Decode(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status(status: u16, message: Option<&str>) -> ApiError {
        ApiError::Status {
            status,
            message: message.map(str::to_owned),
            body: String::new(),
        }
    }

    #[test]
    fn test_user_message_prefers_server_message() {
        let err = status(400, Some("Titulo is required"));
        assert_eq!(err.user_message("Error creating categoria"), "Titulo is required");
    }

    #[test]
    fn test_user_message_falls_back_without_server_message() {
        assert_eq!(status(500, None).user_message("Error fetching productos"), "Error fetching productos");
        let transport = ApiError::Transport("connection refused".into());
        assert_eq!(transport.user_message("Error fetching productos"), "Error fetching productos");
    }

    #[test]
    fn test_status_classification() {
        assert!(status(404, None).is_not_found());
        assert!(status(401, None).is_auth_failure());
        assert!(status(403, None).is_auth_failure());
        assert!(!status(500, None).is_auth_failure());
        assert_eq!(ApiError::Decode("bad".into()).status(), None);
    }
}
