//! Error types for aart.

use thiserror::Error;

/// Common error type for aart.
#[derive(Error, Debug)]
pub enum AartError {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Resource not found.
    #[error("{0} not found")]
    NotFound(String),

    /// Validation error for a client-supplied name or header.
    #[error("validation error: {0}")]
    Validation(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// A blocking storage task panicked or was cancelled.
    #[error("task error: {0}")]
    Task(String),
}

impl From<tokio::task::JoinError> for AartError {
    fn from(e: tokio::task::JoinError) -> Self {
        AartError::Task(e.to_string())
    }
}

/// Result type alias for aart operations.
pub type Result<T> = std::result::Result<T, AartError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_error_display() {
        let err = AartError::NotFound("world 'abc'".to_string());
        assert_eq!(err.to_string(), "world 'abc' not found");
    }

    #[test]
    fn test_validation_error_display() {
        let err = AartError::Validation("file name must not be empty".to_string());
        assert_eq!(
            err.to_string(),
            "validation error: file name must not be empty"
        );
    }

    #[test]
    fn test_config_error_display() {
        let err = AartError::Config("PORT is not set".to_string());
        assert_eq!(err.to_string(), "configuration error: PORT is not set");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only");
        let err: AartError = io_err.into();
        assert!(matches!(err, AartError::Io(_)));
        assert!(err.to_string().contains("read-only"));
    }

    #[tokio::test]
    async fn test_join_error_conversion() {
        let handle = tokio::task::spawn_blocking(|| panic!("boom"));
        let err: AartError = handle.await.unwrap_err().into();
        assert!(matches!(err, AartError::Task(_)));
    }

    #[test]
    fn test_result_alias() {
        fn sample_ok() -> Result<i32> {
            Ok(42)
        }

        fn sample_err() -> Result<i32> {
            Err(AartError::NotFound("world".to_string()))
        }

        assert_eq!(sample_ok().unwrap(), 42);
        assert!(sample_err().is_err());
    }
}
