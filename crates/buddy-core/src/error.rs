use thiserror::Error;

/// Top-level error type for the Learning Buddy client.
///
/// Subsystem crates define their own error types and implement
/// `From<SubsystemError> for BuddyError` (or the reverse) so that the `?`
/// operator works across crate boundaries.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum BuddyError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("API error: {0}")]
    Api(String),

    #[error("Chat error: {0}")]
    Chat(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<toml::de::Error> for BuddyError {
    fn from(err: toml::de::Error) -> Self {
        BuddyError::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for BuddyError {
    fn from(err: toml::ser::Error) -> Self {
        BuddyError::Config(err.to_string())
    }
}

/// A specialized `Result` type for Learning Buddy operations.
pub type Result<T> = std::result::Result<T, BuddyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let cases: Vec<(BuddyError, &str)> = vec![
            (
                BuddyError::Config("bad key".to_string()),
                "Configuration error: bad key",
            ),
            (
                BuddyError::Api("connection refused".to_string()),
                "API error: connection refused",
            ),
            (
                BuddyError::Chat("session busy".to_string()),
                "Chat error: session busy",
            ),
        ];

        for (error, expected) in cases {
            assert_eq!(error.to_string(), expected);
        }
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: BuddyError = io_err.into();
        assert!(matches!(err, BuddyError::Io(_)));
        assert!(err.to_string().starts_with("I/O error:"));
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_error_from_toml_de() {
        let err: std::result::Result<toml::Value, _> = toml::from_str("invalid = [[[");
        let buddy_err: BuddyError = err.unwrap_err().into();
        assert!(matches!(buddy_err, BuddyError::Config(_)));
    }

    #[test]
    fn test_result_type_with_question_mark() {
        fn inner() -> Result<String> {
            let io_result: std::result::Result<i32, std::io::Error> = Ok(42);
            let value = io_result?;
            Ok(value.to_string())
        }

        assert_eq!(inner().unwrap(), "42");
    }
}
