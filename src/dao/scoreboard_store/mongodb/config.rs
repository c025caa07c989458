use std::{env, time::Duration};

use mongodb::options::ClientOptions;

use super::error::{MongoDaoError, MongoResult};

const DEFAULT_URI: &str = "mongodb://localhost:27017";
const DEFAULT_DB: &str = "scoreboard";
const APP_NAME: &str = "scoreboard-back";
/// Keeps requests from hanging on a dead server; the URI can still override it.
const SERVER_SELECTION_TIMEOUT: Duration = Duration::from_secs(5);

/// Parsed client options plus the database holding the scoreboard collections.
#[derive(Clone)]
pub struct MongoConfig {
    pub options: ClientOptions,
    pub database_name: String,
}

impl MongoConfig {
    /// Read `MONGO_URI` and `MONGO_DB`, defaulting to a local server and the `scoreboard` db.
    pub async fn from_env() -> MongoResult<Self> {
        let uri = env::var("MONGO_URI")
            .ok()
            .filter(|uri| !uri.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_URI.into());
        let db_name = env::var("MONGO_DB").ok();
        Self::from_uri(&uri, db_name.as_deref()).await
    }

    pub async fn from_uri(uri: &str, db_name: Option<&str>) -> MongoResult<Self> {
        let mut options =
            ClientOptions::parse(uri)
                .await
                .map_err(|source| MongoDaoError::InvalidUri {
                    uri: uri.to_owned(),
                    source,
                })?;
        options.app_name.get_or_insert_with(|| APP_NAME.into());
        options
            .server_selection_timeout
            .get_or_insert(SERVER_SELECTION_TIMEOUT);

        let database_name = db_name
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .or(options.default_database.as_deref())
            .unwrap_or(DEFAULT_DB)
            .to_owned();

        Ok(Self {
            options,
            database_name,
        })
    }
}
