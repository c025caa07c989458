use axum::{Json, Router, extract::State, routing::get};

use crate::{dto::health::HealthResponse, services::health_service, state::SharedState};

const BANNER: &str = "Scoreboard API is running";

#[utoipa::path(
    get,
    path = "/healthcheck",
    tag = "health",
    responses((status = 200, description = "Service is up; `status` tells whether storage is available", body = HealthResponse))
)]
/// Report degraded mode and whether the store answered a ping.
pub async fn healthcheck(State(state): State<SharedState>) -> Json<HealthResponse> {
    Json(health_service::health_status(&state).await)
}

/// Plain-text liveness banner; answers even when storage is down.
async fn banner() -> &'static str {
    BANNER
}

/// Liveness routes mounted at the root, outside `/api`.
pub fn router() -> Router<SharedState> {
    Router::<SharedState>::new()
        .route("/", get(banner))
        .route("/healthcheck", get(healthcheck))
}
