use std::sync::Arc;

use tokio::sync::{RwLock, watch};

use crate::{config::AppConfig, dao::scoreboard_store::ScoreboardStore, error::ServiceError};

/// Shared handle to the [`AppState`], cloned into every request handler.
pub type SharedState = Arc<AppState>;

/// Central application state holding the storage handle and runtime configuration.
pub struct AppState {
    store: RwLock<Option<Arc<dyn ScoreboardStore>>>,
    degraded: watch::Sender<bool>,
    config: AppConfig,
}

impl AppState {
    /// Construct a new [`AppState`] wrapped in an [`Arc`] so it can be cloned cheaply.
    ///
    /// The application starts in degraded mode until a storage backend is installed.
    pub fn new(config: AppConfig) -> SharedState {
        let (degraded_tx, _rx) = watch::channel(true);
        Arc::new(Self {
            store: RwLock::new(None),
            degraded: degraded_tx,
            config,
        })
    }

    /// Runtime configuration loaded at startup.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Obtain a handle to the current store, if one is installed.
    pub async fn store(&self) -> Option<Arc<dyn ScoreboardStore>> {
        let guard = self.store.read().await;
        guard.as_ref().cloned()
    }

    /// Current store, or [`ServiceError::Degraded`] when none is installed or it is unhealthy.
    pub async fn require_store(&self) -> Result<Arc<dyn ScoreboardStore>, ServiceError> {
        if *self.degraded.borrow() {
            return Err(ServiceError::Degraded);
        }
        self.store().await.ok_or(ServiceError::Degraded)
    }

    /// Install a new store implementation and leave degraded mode.
    pub async fn install_store(&self, store: Arc<dyn ScoreboardStore>) {
        {
            let mut guard = self.store.write().await;
            *guard = Some(store);
        }
        self.update_degraded(false);
    }

    /// Remove the current store and enter degraded mode.
    pub async fn clear_store(&self) {
        {
            let mut guard = self.store.write().await;
            guard.take();
        }
        self.update_degraded(true);
    }

    /// Current degraded flag.
    pub fn is_degraded(&self) -> bool {
        *self.degraded.borrow()
    }

    /// Subscribe to degraded mode updates.
    pub fn degraded_watcher(&self) -> watch::Receiver<bool> {
        self.degraded.subscribe()
    }

    /// Update and broadcast the degraded flag when the value changes.
    pub fn update_degraded(&self, value: bool) {
        self.degraded.send_if_modified(|current| {
            if *current == value {
                return false;
            }
            *current = value;
            true
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dao::scoreboard_store::memory::MemoryScoreboardStore;

    #[tokio::test]
    async fn starts_degraded_until_a_store_is_installed() {
        let state = AppState::new(AppConfig::default());
        assert!(state.is_degraded());
        assert!(matches!(
            state.require_store().await,
            Err(ServiceError::Degraded)
        ));

        state
            .install_store(Arc::new(MemoryScoreboardStore::new()))
            .await;
        assert!(!state.is_degraded());
        assert!(state.require_store().await.is_ok());
    }

    #[tokio::test]
    async fn watcher_observes_degraded_transitions() {
        let state = AppState::new(AppConfig::default());
        let mut watcher = state.degraded_watcher();

        state
            .install_store(Arc::new(MemoryScoreboardStore::new()))
            .await;
        watcher.changed().await.unwrap();
        assert!(!*watcher.borrow_and_update());

        state.clear_store().await;
        watcher.changed().await.unwrap();
        assert!(*watcher.borrow_and_update());
        assert!(state.store().await.is_none());
    }

    #[tokio::test]
    async fn unhealthy_store_is_refused_while_degraded() {
        let state = AppState::new(AppConfig::default());
        state
            .install_store(Arc::new(MemoryScoreboardStore::new()))
            .await;

        state.update_degraded(true);
        assert!(matches!(
            state.require_store().await,
            Err(ServiceError::Degraded)
        ));
    }
}
