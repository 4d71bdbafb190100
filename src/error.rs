//! Error types for the review notifier.

use thiserror::Error;

/// Common error type for a notifier run.
#[derive(Error, Debug)]
pub enum NotifierError {
    /// A required argument or value was missing or malformed.
    #[error("validation error: {0}")]
    Validation(String),

    /// An HTTP request could not be completed.
    ///
    /// Also covers non-success feed responses and unreadable bodies.
    #[error("transport error: {0}")]
    Transport(String),

    /// The feed body is not JSON or does not match the review schema.
    #[error("decode error: {0}")]
    Decode(String),

    /// A review field could not be formatted into a message.
    #[error("format error: {0}")]
    Format(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl NotifierError {
    /// Whether this error came from a bad command-line value.
    pub fn is_usage(&self) -> bool {
        matches!(self, NotifierError::Validation(_))
    }
}

/// Result type alias for notifier operations.
pub type Result<T> = std::result::Result<T, NotifierError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_display() {
        let err = NotifierError::Validation("id is empty".to_string());
        assert_eq!(err.to_string(), "validation error: id is empty");
        assert!(err.is_usage());
    }

    #[test]
    fn test_transport_error_display() {
        let err = NotifierError::Transport("connection refused".to_string());
        assert_eq!(err.to_string(), "transport error: connection refused");
        assert!(!err.is_usage());
    }

    #[test]
    fn test_format_error_display() {
        let err = NotifierError::Format("rating \"x\" is not an integer".to_string());
        assert_eq!(
            err.to_string(),
            "format error: rating \"x\" is not an integer"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: NotifierError = io_err.into();
        assert!(matches!(err, NotifierError::Io(_)));
        assert!(err.to_string().contains("file not found"));
    }
}
