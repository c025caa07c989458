use utoipa::OpenApi;

#[derive(OpenApi)]
/// Aggregated OpenAPI specification for the scoreboard backend.
#[openapi(
    paths(
        crate::routes::health::healthcheck,
        crate::routes::team::create_team,
        crate::routes::team::list_teams,
        crate::routes::team::get_team,
        crate::routes::team::update_team,
        crate::routes::team::delete_team,
        crate::routes::team::team_members,
        crate::routes::member::create_members,
        crate::routes::member::list_members,
        crate::routes::member::update_member,
        crate::routes::member::delete_member,
        crate::routes::game::create_games,
        crate::routes::game::list_games,
        crate::routes::game::update_game,
        crate::routes::game::delete_game,
        crate::routes::score::submit_score,
        crate::routes::score::list_scores,
        crate::routes::score::delete_score,
        crate::routes::leaderboard::team_leaderboard,
        crate::routes::leaderboard::member_leaderboard,
        crate::routes::leaderboard::team_details,
        crate::routes::leaderboard::member_details,
    ),
    components(
        schemas(
            crate::dto::health::HealthResponse,
            crate::dto::health::HealthStatus,
            crate::dto::common::MessageResponse,
            crate::dto::common::SuccessResponse,
            crate::dto::team::CreateTeamRequest,
            crate::dto::team::UpdateTeamRequest,
            crate::dto::team::TeamSummary,
            crate::dto::team::TeamDetails,
            crate::dto::team::TeamResponse,
            crate::dto::team::TeamMembersResponse,
            crate::dto::member::MemberInput,
            crate::dto::member::CreateMembersRequest,
            crate::dto::member::UpdateMemberRequest,
            crate::dto::member::MemberTeam,
            crate::dto::member::MemberSummary,
            crate::dto::member::CreateMembersResponse,
            crate::dto::game::GameInput,
            crate::dto::game::CreateGamesRequest,
            crate::dto::game::UpdateGameRequest,
            crate::dto::game::GameSummary,
            crate::dto::game::CreateGamesResponse,
            crate::dto::game::GameResponse,
            crate::dto::score::CreateScoreRequest,
            crate::dto::score::ScoreSummary,
            crate::dto::score::CreateScoreResponse,
            crate::dto::score::ScoreDetails,
            crate::dto::leaderboard::TeamStanding,
            crate::dto::leaderboard::MemberStanding,
            crate::dto::leaderboard::GameScore,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "teams", description = "Team management"),
        (name = "members", description = "Member management"),
        (name = "games", description = "Game catalogue"),
        (name = "scores", description = "Score submissions"),
        (name = "leaderboard", description = "Ranked standings and per-game breakdowns"),
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_every_data_route() {
        let doc = ApiDoc::openapi();
        for path in [
            "/healthcheck",
            "/api/teams/create",
            "/api/teams/get/{id}",
            "/api/members/update/{id}",
            "/api/games/delete/{id}",
            "/api/scores",
            "/api/scores/{id}",
            "/api/leaderboard/teams",
            "/api/leaderboard/member/{memberId}/details",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }
}
