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
        team::{
            CreateTeamRequest, TeamDetails, TeamMembersResponse, TeamResponse, TeamSummary,
            UpdateTeamRequest,
        },
    },
    error::AppError,
    routes::extract::{JsonBody, PathParam},
    services::team_service,
    state::SharedState,
};

/// Team management endpoints.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/teams/create", post(create_team))
        .route("/teams/get", get(list_teams))
        .route("/teams/get/{id}", get(get_team))
        .route("/teams/update/{id}", put(update_team))
        .route("/teams/delete/{id}", delete(delete_team))
        .route("/teams/{id}/members", get(team_members))
}

/// Register a new team.
#[utoipa::path(
    post,
    path = "/api/teams/create",
    tag = "teams",
    request_body = CreateTeamRequest,
    responses(
        (status = 201, description = "Team created", body = TeamResponse),
        (status = 400, description = "Missing or blank name"),
        (status = 409, description = "A team with this name already exists")
    )
)]
pub async fn create_team(
    State(state): State<SharedState>,
    JsonBody(payload): JsonBody<CreateTeamRequest>,
) -> Result<(StatusCode, Json<TeamResponse>), AppError> {
    let created = team_service::create_team(&state, payload).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// List teams, newest first.
#[utoipa::path(
    get,
    path = "/api/teams/get",
    tag = "teams",
    responses((status = 200, description = "Teams", body = [TeamSummary]))
)]
pub async fn list_teams(
    State(state): State<SharedState>,
) -> Result<Json<Vec<TeamSummary>>, AppError> {
    Ok(Json(team_service::list_teams(&state).await?))
}

/// Retrieve a team with its members populated.
#[utoipa::path(
    get,
    path = "/api/teams/get/{id}",
    tag = "teams",
    params(("id" = Uuid, Path, description = "Identifier of the team")),
    responses(
        (status = 200, description = "Team", body = TeamDetails),
        (status = 404, description = "Unknown team")
    )
)]
pub async fn get_team(
    State(state): State<SharedState>,
    PathParam(id): PathParam<Uuid>,
) -> Result<Json<TeamDetails>, AppError> {
    Ok(Json(team_service::get_team(&state, id).await?))
}

/// Rename a team.
#[utoipa::path(
    put,
    path = "/api/teams/update/{id}",
    tag = "teams",
    params(("id" = Uuid, Path, description = "Identifier of the team")),
    request_body = UpdateTeamRequest,
    responses(
        (status = 200, description = "Team renamed", body = TeamResponse),
        (status = 404, description = "Unknown team"),
        (status = 409, description = "A team with this name already exists")
    )
)]
pub async fn update_team(
    State(state): State<SharedState>,
    PathParam(id): PathParam<Uuid>,
    JsonBody(payload): JsonBody<UpdateTeamRequest>,
) -> Result<Json<TeamResponse>, AppError> {
    Ok(Json(team_service::update_team(&state, id, payload).await?))
}

/// Delete a team; its members and scores are kept.
#[utoipa::path(
    delete,
    path = "/api/teams/delete/{id}",
    tag = "teams",
    params(("id" = Uuid, Path, description = "Identifier of the team")),
    responses(
        (status = 200, description = "Team deleted", body = MessageResponse),
        (status = 404, description = "Unknown team")
    )
)]
pub async fn delete_team(
    State(state): State<SharedState>,
    PathParam(id): PathParam<Uuid>,
) -> Result<Json<MessageResponse>, AppError> {
    Ok(Json(team_service::delete_team(&state, id).await?))
}

/// List the members of a team in their joining order.
#[utoipa::path(
    get,
    path = "/api/teams/{id}/members",
    tag = "teams",
    params(("id" = Uuid, Path, description = "Identifier of the team")),
    responses(
        (status = 200, description = "Members of the team", body = TeamMembersResponse),
        (status = 404, description = "Unknown team")
    )
)]
pub async fn team_members(
    State(state): State<SharedState>,
    PathParam(id): PathParam<Uuid>,
) -> Result<Json<TeamMembersResponse>, AppError> {
    Ok(Json(team_service::team_members(&state, id).await?))
}
