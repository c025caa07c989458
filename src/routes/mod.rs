use axum::Router;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::SharedState;

pub mod docs;
pub mod extract;
pub mod game;
pub mod health;
pub mod leaderboard;
pub mod member;
pub mod score;
pub mod team;

/// Compose all route trees, wiring in shared state and documentation routes.
pub fn router(state: SharedState) -> Router<()> {
    let data_router = team::router()
        .merge(member::router())
        .merge(game::router())
        .merge(score::router())
        .merge(leaderboard::router());

    let api_router = health::router().nest("/api", data_router);

    let docs_router = docs::router(state.clone());

    api_router.merge(docs_router).with_state(state)
}

/// Build the top-level router and attach cross-cutting middleware layers.
pub fn app(state: SharedState) -> Router<()> {
    router(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
