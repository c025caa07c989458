use mongodb::error::{Error as MongoError, ErrorKind, WriteFailure};
use thiserror::Error;

pub type MongoResult<T> = Result<T, MongoDaoError>;

const DUPLICATE_KEY_CODE: i32 = 11000;

#[derive(Debug, Error)]
pub enum MongoDaoError {
    #[error("failed to parse MongoDB connection URI `{uri}`")]
    InvalidUri {
        uri: String,
        #[source]
        source: MongoError,
    },
    #[error("failed to build MongoDB client from options")]
    ClientConstruction {
        #[source]
        source: MongoError,
    },
    #[error("MongoDB ping failed during initial connection after {attempts} attempt(s)")]
    InitialPing {
        attempts: u32,
        #[source]
        source: MongoError,
    },
    #[error("MongoDB ping health check failed")]
    HealthPing {
        #[source]
        source: MongoError,
    },
    #[error("failed to ensure index `{index}` on collection `{collection}`")]
    EnsureIndex {
        collection: &'static str,
        index: &'static str,
        #[source]
        source: MongoError,
    },
    #[error("duplicate {field} in collection `{collection}`")]
    DuplicateKey {
        collection: &'static str,
        field: &'static str,
        #[source]
        source: MongoError,
    },
    #[error("upsert on collection `{collection}` returned no document")]
    MissingUpsert { collection: &'static str },
    #[error("failed to {operation} on collection `{collection}`")]
    Operation {
        collection: &'static str,
        operation: &'static str,
        #[source]
        source: MongoError,
    },
}

impl MongoDaoError {
    /// Wrap a failed collection operation.
    pub fn operation(
        collection: &'static str,
        operation: &'static str,
    ) -> impl FnOnce(MongoError) -> Self {
        move |source| MongoDaoError::Operation {
            collection,
            operation,
            source,
        }
    }

    /// Wrap a failed write, recognising unique index violations on `field`.
    pub fn write(
        collection: &'static str,
        operation: &'static str,
        field: &'static str,
    ) -> impl FnOnce(MongoError) -> Self {
        move |source| {
            if is_duplicate_key(&source) {
                MongoDaoError::DuplicateKey {
                    collection,
                    field,
                    source,
                }
            } else {
                MongoDaoError::Operation {
                    collection,
                    operation,
                    source,
                }
            }
        }
    }
}

pub(super) fn is_duplicate_key(err: &MongoError) -> bool {
    match err.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(write_error)) => {
            write_error.code == DUPLICATE_KEY_CODE
        }
        ErrorKind::InsertMany(failure) => failure
            .write_errors
            .as_ref()
            .is_some_and(|errors| errors.iter().any(|e| e.code == DUPLICATE_KEY_CODE)),
        ErrorKind::Command(command_error) => command_error.code == DUPLICATE_KEY_CODE,
        _ => false,
    }
}
