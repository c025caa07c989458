use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{delete, get, post, put},
};
use uuid::Uuid;

use crate::{
    dto::{
        common::MessageResponse,
        game::{
            CreateGamesRequest, CreateGamesResponse, GameResponse, GameSummary, UpdateGameRequest,
        },
    },
    error::AppError,
    routes::extract::{JsonBody, PathParam},
    services::game_service,
    state::SharedState,
};

/// Game catalogue endpoints.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/games/create", post(create_games))
        .route("/games/get", get(list_games))
        .route("/games/update/{id}", put(update_game))
        .route("/games/delete/{id}", delete(delete_game))
}

/// Create a batch of games, skipping names that already exist.
#[utoipa::path(
    post,
    path = "/api/games/create",
    tag = "games",
    request_body = CreateGamesRequest,
    responses(
        (status = 201, description = "Games created", body = CreateGamesResponse),
        (status = 400, description = "Empty batch or no valid name"),
        (status = 409, description = "Every game already exists")
    )
)]
pub async fn create_games(
    State(state): State<SharedState>,
    JsonBody(payload): JsonBody<CreateGamesRequest>,
) -> Result<(StatusCode, Json<CreateGamesResponse>), AppError> {
    let created = game_service::create_games(&state, payload).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// List games, newest first.
#[utoipa::path(
    get,
    path = "/api/games/get",
    tag = "games",
    responses((status = 200, description = "Games", body = [GameSummary]))
)]
pub async fn list_games(
    State(state): State<SharedState>,
) -> Result<Json<Vec<GameSummary>>, AppError> {
    Ok(Json(game_service::list_games(&state).await?))
}

#[utoipa::path(
    put,
    path = "/api/games/update/{id}",
    tag = "games",
    params(("id" = Uuid, Path, description = "Identifier of the game")),
    request_body = UpdateGameRequest,
    responses(
        (status = 200, description = "Game updated", body = GameResponse),
        (status = 404, description = "Unknown game"),
        (status = 409, description = "A game with this name already exists")
    )
)]
pub async fn update_game(
    State(state): State<SharedState>,
    PathParam(id): PathParam<Uuid>,
    JsonBody(payload): JsonBody<UpdateGameRequest>,
) -> Result<Json<GameResponse>, AppError> {
    Ok(Json(game_service::update_game(&state, id, payload).await?))
}

#[utoipa::path(
    delete,
    path = "/api/games/delete/{id}",
    tag = "games",
    params(("id" = Uuid, Path, description = "Identifier of the game")),
    responses(
        (status = 200, description = "Game deleted", body = MessageResponse),
        (status = 404, description = "Unknown game")
    )
)]
pub async fn delete_game(
    State(state): State<SharedState>,
    PathParam(id): PathParam<Uuid>,
) -> Result<Json<MessageResponse>, AppError> {
    Ok(Json(game_service::delete_game(&state, id).await?))
}
