//! Error types for the REST client.

use buddy_chat::BackendError;
use buddy_core::BuddyError;
use reqwest::StatusCode;

/// Errors from talking to the learning backend over HTTP.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("invalid base URL: {0}")]
    InvalidUrl(String),
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Failed to fetch {what}: {reason}")]
    Status { what: &'static str, reason: String },
    #[error("invalid response body: {0}")]
    Decode(String),
}

impl ClientError {
    pub(crate) fn status(what: &'static str, status: StatusCode) -> Self {
        let reason = status
            .canonical_reason()
            .map(str::to_string)
            .unwrap_or_else(|| status.as_str().to_string());
        ClientError::Status { what, reason }
    }
}

impl From<ClientError> for BackendError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Http(ref e) if e.is_decode() => BackendError::Decode(err.to_string()),
            ClientError::InvalidUrl(_) | ClientError::Http(_) => {
                BackendError::Transport(err.to_string())
            }
            ClientError::Status { .. } => BackendError::Status(err.to_string()),
            ClientError::Decode(msg) => BackendError::Decode(msg),
        }
    }
}

impl From<ClientError> for BuddyError {
    fn from(err: ClientError) -> Self {
        BuddyError::Api(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_uses_reason_phrase() {
        let err = ClientError::status("skill analysis", StatusCode::NOT_FOUND);
        assert_eq!(err.to_string(), "Failed to fetch skill analysis: Not Found");
    }

    #[test]
    fn test_status_error_without_reason_phrase() {
        let code = StatusCode::from_u16(599).unwrap();
        let err = ClientError::status("recommendations", code);
        assert_eq!(err.to_string(), "Failed to fetch recommendations: 599");
    }

    #[test]
    fn test_into_backend_error() {
        let err: BackendError = ClientError::status("skill analysis", StatusCode::BAD_GATEWAY).into();
        assert!(matches!(err, BackendError::Status(_)));
        assert_eq!(err.to_string(), "Failed to fetch skill analysis: Bad Gateway");

        let err: BackendError = ClientError::InvalidUrl("nope".to_string()).into();
        assert!(matches!(err, BackendError::Transport(_)));

        let err: BackendError = ClientError::Decode("expected array".to_string()).into();
        assert!(matches!(err, BackendError::Decode(_)));
    }

    #[test]
    fn test_into_buddy_error() {
        let err: BuddyError = ClientError::InvalidUrl("::".to_string()).into();
        assert!(matches!(err, BuddyError::Api(_)));
        assert_eq!(err.to_string(), "API error: invalid base URL: ::");
    }
}
