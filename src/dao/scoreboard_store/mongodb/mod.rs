mod config;
mod connection;
mod error;
mod models;
mod pipelines;
pub mod store;

pub use config::MongoConfig;
pub use error::MongoDaoError;
pub use store::MongoScoreboardStore;

use crate::dao::storage::StorageError;

impl From<MongoDaoError> for StorageError {
    fn from(err: MongoDaoError) -> Self {
        match err {
            MongoDaoError::DuplicateKey { collection, field, .. } => {
                StorageError::duplicate(collection, field)
            }
            MongoDaoError::Operation { .. } | MongoDaoError::MissingUpsert { .. } => {
                StorageError::backend(err.to_string(), err)
            }
            _ => StorageError::unavailable(err.to_string(), err),
        }
    }
}
