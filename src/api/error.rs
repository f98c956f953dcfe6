use std::time::Duration;

/// Failure of a single exchange with the chat backend.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The backend could not be reached or the connection broke.
    #[error("network error: {0}")]
    Network(String),
    /// The request exceeded its deadline.
    #[error("request timed out after {}s", .0.as_secs())]
    Timeout(Duration),
    /// The backend answered with a non-2xx status.
    #[error("{message}")]
    Status {
        status: u16,
        message: String,
        suggestion: Option<String>,
    },
    /// A 2xx response whose body was not the expected JSON.
    #[error("malformed response: {0}")]
    Malformed(String),
}

impl ApiError {
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout(_))
    }

    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Maps a transport failure, keeping timeouts distinct from other
    /// network errors.
    pub(crate) fn from_transport(err: &reqwest::Error, timeout: Option<Duration>) -> Self {
        if err.is_timeout() {
            Self::Timeout(timeout.unwrap_or_default())
        } else {
            Self::Network(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_display() {
        assert_eq!(
            ApiError::Network("connection refused".to_string()).to_string(),
            "network error: connection refused"
        );
        assert_eq!(
            ApiError::Timeout(Duration::from_secs(30)).to_string(),
            "request timed out after 30s"
        );
        assert_eq!(
            ApiError::Malformed("missing field `reply`".to_string()).to_string(),
            "malformed response: missing field `reply`"
        );
    }

    #[test]
    fn test_status_error_displays_server_message() {
        let err = ApiError::Status {
            status: 400,
            message: "Cannot connect to Ollama".to_string(),
            suggestion: Some("Start ollama serve".to_string()),
        };
        assert_eq!(err.to_string(), "Cannot connect to Ollama");
        assert_eq!(err.status(), Some(400));
        assert!(!err.is_timeout());
    }

    #[test]
    fn test_is_timeout() {
        assert!(ApiError::Timeout(Duration::from_secs(1)).is_timeout());
        assert!(!ApiError::Network(String::new()).is_timeout());
        assert_eq!(ApiError::Network(String::new()).status(), None);
    }
}
