use tracing::warn;

use crate::{dto::health::HealthResponse, state::SharedState};

/// Report degraded mode, pinging the store when one is installed and logging failures.
pub async fn health_status(state: &SharedState) -> HealthResponse {
    let reachable = match state.store().await {
        Some(store) => match store.health_check().await {
            Ok(()) => true,
            Err(err) => {
                warn!(error = %err, "storage health check failed");
                false
            }
        },
        None => {
            warn!("storage unavailable (degraded mode)");
            false
        }
    };

    HealthResponse::new(state.is_degraded(), reachable)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::{
        config::AppConfig,
        dto::health::HealthStatus, dao::scoreboard_store::memory::MemoryScoreboardStore, state::AppState,
    };

    #[tokio::test]
    async fn reports_degraded_without_store() {
        let state = AppState::new(AppConfig::default());
        let health = health_status(&state).await;
        assert_eq!(health.status, HealthStatus::Degraded);
        assert!(!health.store_reachable);
    }

    #[tokio::test]
    async fn reports_ok_with_healthy_store() {
        let state = AppState::new(AppConfig::default());
        state
            .install_store(Arc::new(MemoryScoreboardStore::new()))
            .await;
        let health = health_status(&state).await;
        assert_eq!(health.status, HealthStatus::Ok);
        assert!(health.store_reachable);
    }
}
