use std::time::Duration;

use mongodb::{Client, Database, bson::doc};
use tokio::time::sleep;
use tracing::warn;

use super::{
    config::MongoConfig,
    error::{MongoDaoError, MongoResult},
};

/// Wait schedule between failed startup pings: 250 ms doubling up to 5 s.
struct PingBackoff {
    failures: u32,
    next: Duration,
}

impl PingBackoff {
    const MAX_FAILURES: u32 = 10;
    const FIRST_WAIT: Duration = Duration::from_millis(250);
    const LONGEST_WAIT: Duration = Duration::from_secs(5);

    fn new() -> Self {
        Self {
            failures: 0,
            next: Self::FIRST_WAIT,
        }
    }

    /// Record a failure and return how long to wait, or `None` once the budget is spent.
    fn on_failure(&mut self) -> Option<Duration> {
        self.failures += 1;
        if self.failures >= Self::MAX_FAILURES {
            return None;
        }
        let wait = self.next;
        self.next = (self.next * 2).min(Self::LONGEST_WAIT);
        Some(wait)
    }
}

/// Build a client for `config` and return once its database answers a ping.
pub async fn establish_connection(config: &MongoConfig) -> MongoResult<(Client, Database)> {
    let client = Client::with_options(config.options.clone())
        .map_err(|source| MongoDaoError::ClientConstruction { source })?;
    let database = client.database(&config.database_name);

    let mut backoff = PingBackoff::new();
    loop {
        let err = match database.run_command(doc! { "ping": 1 }).await {
            Ok(_) => return Ok((client, database)),
            Err(err) => err,
        };
        let Some(wait) = backoff.on_failure() else {
            return Err(MongoDaoError::InitialPing {
                attempts: backoff.failures,
                source: err,
            });
        };
        warn!(
            database = %config.database_name,
            failures = backoff.failures,
            wait_ms = wait.as_millis(),
            error = %err,
            "MongoDB not answering yet; retrying ping"
        );
        sleep(wait).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backoff_doubles_until_capped_then_gives_up() {
        let mut backoff = PingBackoff::new();
        let waits = std::iter::from_fn(|| backoff.on_failure()).collect::<Vec<_>>();

        assert_eq!(waits.len() as u32, PingBackoff::MAX_FAILURES - 1);
        assert_eq!(waits[0], Duration::from_millis(250));
        assert_eq!(waits[1], Duration::from_millis(500));
        assert_eq!(*waits.last().unwrap(), PingBackoff::LONGEST_WAIT);
    }
}
