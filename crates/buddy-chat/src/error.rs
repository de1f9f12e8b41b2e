//! Error types for the chat engine.

use buddy_core::error::BuddyError;

/// Errors from the chat session.
///
/// Backend failures never surface here; they are folded into the
/// transcript as bot messages.
#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("message cannot be empty")]
    EmptyMessage,
    #[error("a request is already in flight")]
    Busy,
    #[error("no quick action at position {0}")]
    UnknownQuickAction(usize),
    #[error("user is not logged in")]
    NotLoggedIn,
}

impl From<ChatError> for BuddyError {
    fn from(err: ChatError) -> Self {
        BuddyError::Chat(err.to_string())
    }
}

/// Errors reported by a [`crate::LearningBackend`] implementation.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("transport error: {0}")]
    Transport(String),
    /// Non-success HTTP status. The message is shown to the user verbatim.
    #[error("{0}")]
    Status(String),
    #[error("invalid response: {0}")]
    Decode(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_error_display() {
        assert_eq!(ChatError::EmptyMessage.to_string(), "message cannot be empty");
        assert_eq!(ChatError::Busy.to_string(), "a request is already in flight");
        assert_eq!(
            ChatError::UnknownQuickAction(7).to_string(),
            "no quick action at position 7"
        );
        assert_eq!(ChatError::NotLoggedIn.to_string(), "user is not logged in");
    }

    #[test]
    fn test_backend_error_display() {
        let err = BackendError::Transport("connection refused".to_string());
        assert_eq!(err.to_string(), "transport error: connection refused");

        let err = BackendError::Status("Failed to fetch skill analysis: Not Found".to_string());
        assert_eq!(err.to_string(), "Failed to fetch skill analysis: Not Found");

        let err = BackendError::Decode("expected object".to_string());
        assert_eq!(err.to_string(), "invalid response: expected object");
    }

    #[test]
    fn test_chat_error_into_buddy_error() {
        let err: BuddyError = ChatError::Busy.into();
        assert!(matches!(err, BuddyError::Chat(_)));
        assert_eq!(err.to_string(), "Chat error: a request is already in flight");
    }
}
