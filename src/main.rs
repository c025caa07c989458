//! Scoreboard Back binary entrypoint wiring configuration, storage and the REST layer.

use std::{env, net::SocketAddr, sync::Arc};

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use scoreboard_back::{
    config::AppConfig,
    dao::scoreboard_store::memory::MemoryScoreboardStore,
    routes,
    state::{AppState, SharedState},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let app_state = AppState::new(AppConfig::load());

    match env::var("SCOREBOARD_STORE").as_deref() {
        Ok("memory") => {
            info!("using in-memory storage; data is lost on shutdown");
            app_state
                .install_store(Arc::new(MemoryScoreboardStore::new()))
                .await;
        }
        Ok(other) if other != "mongo" => {
            warn!(store = other, "unknown SCOREBOARD_STORE value; using MongoDB");
            spawn_mongo_supervisor(app_state.clone()).await;
        }
        _ => spawn_mongo_supervisor(app_state.clone()).await,
    }

    // Build the HTTP router once the shared state is ready.
    let app = routes::app(app_state);

    let port = env::var("PORT")
        .or_else(|_| env::var("SERVER_PORT"))
        .ok()
        .and_then(|value| value.parse::<u16>().ok())
        .unwrap_or(8080);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!(%addr, "starting server");

    let listener = TcpListener::bind(addr).await.context("binding server")?;
    let service = app.into_make_service();
    axum::serve(listener, service)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serving axum")?;

    Ok(())
}

/// Connect to MongoDB in the background; the service stays in degraded mode until the
/// supervisor installs the store.
#[cfg(feature = "mongo-store")]
async fn spawn_mongo_supervisor(state: SharedState) {
    use scoreboard_back::{
        dao::{
            scoreboard_store::{
                ScoreboardStore,
                mongodb::{MongoConfig, MongoScoreboardStore},
            },
            storage::StorageError,
        },
        services::storage_supervisor,
    };

    tokio::spawn(storage_supervisor::run(state, || async {
        let config = MongoConfig::from_env().await.map_err(StorageError::from)?;
        let store = MongoScoreboardStore::connect(config)
            .await
            .map_err(StorageError::from)?;
        Ok::<_, StorageError>(Arc::new(store) as Arc<dyn ScoreboardStore>)
    }));
}

#[cfg(not(feature = "mongo-store"))]
async fn spawn_mongo_supervisor(state: SharedState) {
    warn!("built without the `mongo-store` feature; falling back to in-memory storage");
    state
        .install_store(Arc::new(MemoryScoreboardStore::new()))
        .await;
}

/// Configure tracing subscribers so logs include spans by default.
fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,tower_http=debug".into());
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Wait for Ctrl+C or SIGTERM and shut the server down gracefully.
async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut term) => {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => {},
                    _ = term.recv() => {},
                }
            }
            Err(err) => {
                warn!(error = %err, "failed to install SIGTERM handler; waiting for Ctrl+C only");
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    }

    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}
