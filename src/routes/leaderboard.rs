use axum::{
    Json, Router,
    extract::State,
    routing::get,
};
use uuid::Uuid;

use crate::{
    dto::leaderboard::{GameScore, LeaderboardQuery, MemberStanding, TeamStanding},
    error::AppError,
    routes::extract::{PathParam, QueryParams},
    services::leaderboard_service,
    state::SharedState,
};

/// Read-only ranking endpoints.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/leaderboard/teams", get(team_leaderboard))
        .route("/leaderboard/members", get(member_leaderboard))
        .route("/leaderboard/team/{team_id}/details", get(team_details))
        .route("/leaderboard/member/{member_id}/details", get(member_details))
}

/// Teams ranked by team-level points.
#[utoipa::path(
    get,
    path = "/api/leaderboard/teams",
    tag = "leaderboard",
    params(LeaderboardQuery),
    responses(
        (status = 200, description = "Team standings", body = [TeamStanding]),
        (status = 400, description = "Invalid limit")
    )
)]
pub async fn team_leaderboard(
    State(state): State<SharedState>,
    QueryParams(query): QueryParams<LeaderboardQuery>,
) -> Result<Json<Vec<TeamStanding>>, AppError> {
    Ok(Json(
        leaderboard_service::team_leaderboard(&state, query).await?,
    ))
}

/// Members ranked by member-level points.
#[utoipa::path(
    get,
    path = "/api/leaderboard/members",
    tag = "leaderboard",
    params(LeaderboardQuery),
    responses(
        (status = 200, description = "Member standings", body = [MemberStanding]),
        (status = 400, description = "Invalid limit")
    )
)]
pub async fn member_leaderboard(
    State(state): State<SharedState>,
    QueryParams(query): QueryParams<LeaderboardQuery>,
) -> Result<Json<Vec<MemberStanding>>, AppError> {
    Ok(Json(
        leaderboard_service::member_leaderboard(&state, query).await?,
    ))
}

/// Team-level points of one team, per game.
#[utoipa::path(
    get,
    path = "/api/leaderboard/team/{teamId}/details",
    tag = "leaderboard",
    params(("teamId" = Uuid, Path, description = "Identifier of the team")),
    responses(
        (status = 200, description = "Points per game", body = [GameScore]),
        (status = 404, description = "Unknown team")
    )
)]
pub async fn team_details(
    State(state): State<SharedState>,
    PathParam(team_id): PathParam<Uuid>,
) -> Result<Json<Vec<GameScore>>, AppError> {
    Ok(Json(
        leaderboard_service::team_details(&state, team_id).await?,
    ))
}

/// Points of one member, per game.
#[utoipa::path(
    get,
    path = "/api/leaderboard/member/{memberId}/details",
    tag = "leaderboard",
    params(("memberId" = Uuid, Path, description = "Identifier of the member")),
    responses(
        (status = 200, description = "Points per game", body = [GameScore]),
        (status = 404, description = "Unknown member")
    )
)]
pub async fn member_details(
    State(state): State<SharedState>,
    PathParam(member_id): PathParam<Uuid>,
) -> Result<Json<Vec<GameScore>>, AppError> {
    Ok(Json(
        leaderboard_service::member_details(&state, member_id).await?,
    ))
}
