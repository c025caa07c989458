use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{delete, get},
};
use uuid::Uuid;

use crate::{
    dto::{
        common::MessageResponse,
        score::{CreateScoreRequest, CreateScoreResponse, ScoreDetails},
    },
    error::AppError,
    routes::extract::{JsonBody, PathParam},
    services::score_service,
    state::SharedState,
};

/// Score submission endpoints.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/scores", get(list_scores).post(submit_score))
        .route("/scores/{id}", delete(delete_score))
}

/// Add points to a team, or to each listed member of the team.
#[utoipa::path(
    post,
    path = "/api/scores",
    tag = "scores",
    request_body = CreateScoreRequest,
    responses(
        (status = 201, description = "Scores added", body = CreateScoreResponse),
        (status = 400, description = "Member does not belong to the team"),
        (status = 404, description = "Unknown game, team or member")
    )
)]
pub async fn submit_score(
    State(state): State<SharedState>,
    JsonBody(payload): JsonBody<CreateScoreRequest>,
) -> Result<(StatusCode, Json<CreateScoreResponse>), AppError> {
    let created = score_service::submit_score(&state, payload).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// List every score row with the names it references.
#[utoipa::path(
    get,
    path = "/api/scores",
    tag = "scores",
    responses((status = 200, description = "Scores", body = [ScoreDetails]))
)]
pub async fn list_scores(
    State(state): State<SharedState>,
) -> Result<Json<Vec<ScoreDetails>>, AppError> {
    Ok(Json(score_service::list_scores(&state).await?))
}

#[utoipa::path(
    delete,
    path = "/api/scores/{id}",
    tag = "scores",
    params(("id" = Uuid, Path, description = "Identifier of the score row")),
    responses(
        (status = 200, description = "Score deleted", body = MessageResponse),
        (status = 404, description = "Unknown score")
    )
)]
pub async fn delete_score(
    State(state): State<SharedState>,
    PathParam(id): PathParam<Uuid>,
) -> Result<Json<MessageResponse>, AppError> {
    Ok(Json(score_service::delete_score(&state, id).await?))
}
