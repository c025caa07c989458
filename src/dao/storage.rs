use std::error::Error;
use thiserror::Error;

/// Result alias for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Error raised by storage backends regardless of the underlying database.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The backend cannot be reached.
    #[error("storage unavailable: {message}")]
    Unavailable {
        message: String,
        #[source]
        source: Box<dyn Error + Send + Sync>,
    },
    /// The backend was reachable but the operation failed.
    #[error("storage operation failed: {message}")]
    Backend {
        message: String,
        #[source]
        source: Box<dyn Error + Send + Sync>,
    },
    /// A unique constraint rejected the write.
    #[error("duplicate {field} in `{collection}`")]
    Duplicate {
        collection: &'static str,
        field: &'static str,
    },
}

/// A points total no longer fits in an `i64`.
#[derive(Debug, Error)]
#[error("points total out of range")]
pub struct PointsOverflow;

impl StorageError {
    /// Construct an unavailable error from any backend failure.
    pub fn unavailable(message: String, source: impl Error + Send + Sync + 'static) -> Self {
        StorageError::Unavailable {
            message,
            source: Box::new(source),
        }
    }

    /// Construct an operation failure from any backend error.
    pub fn backend(message: String, source: impl Error + Send + Sync + 'static) -> Self {
        StorageError::Backend {
            message,
            source: Box::new(source),
        }
    }

    /// Construct the operation failure raised when a points sum overflows.
    pub fn points_overflow(operation: &str) -> Self {
        StorageError::backend(format!("{operation}: points total out of range"), PointsOverflow)
    }

    /// Construct a unique-constraint violation.
    pub fn duplicate(collection: &'static str, field: &'static str) -> Self {
        StorageError::Duplicate { collection, field }
    }
}
