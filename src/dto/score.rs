use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    dao::models::{GameEntity, MemberEntity, ScoreEntity, TeamEntity},
    dto::format_system_time,
};

/// Points submission for a team, or for some of its members.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateScoreRequest {
    pub game: Uuid,
    pub team: Uuid,
    /// When empty the points go to the team-level score.
    #[serde(default)]
    pub member_ids: Vec<Uuid>,
    /// Points to add; the game's default points when omitted.
    #[serde(default)]
    pub points: Option<i64>,
}

/// Score row after an increment.
#[skip_serializing_none]
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScoreSummary {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub game: Uuid,
    pub team: Uuid,
    pub member: Option<Uuid>,
    pub points: i64,
    pub created_at: String,
    pub updated_at: String,
}

impl From<ScoreEntity> for ScoreSummary {
    fn from(score: ScoreEntity) -> Self {
        Self {
            id: score.id,
            game: score.game_id,
            team: score.team_id,
            member: score.member_id,
            points: score.points,
            created_at: format_system_time(score.created_at),
            updated_at: format_system_time(score.updated_at),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CreateScoreResponse {
    pub message: String,
    pub scores: Vec<ScoreSummary>,
}

/// Score row joined with the names of the records it references.
///
/// Name fields are absent when the referenced record no longer exists.
#[skip_serializing_none]
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScoreDetails {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub game: Uuid,
    pub game_name: Option<String>,
    pub game_points: Option<i64>,
    pub team: Uuid,
    pub team_name: Option<String>,
    pub member: Option<Uuid>,
    pub member_name: Option<String>,
    pub member_role: Option<String>,
    pub points: i64,
    pub created_at: String,
    pub updated_at: String,
}

impl ScoreDetails {
    pub fn new(
        score: ScoreEntity,
        game: Option<&GameEntity>,
        team: Option<&TeamEntity>,
        member: Option<&MemberEntity>,
    ) -> Self {
        Self {
            id: score.id,
            game: score.game_id,
            game_name: game.map(|game| game.name.clone()),
            game_points: game.map(|game| game.points),
            team: score.team_id,
            team_name: team.map(|team| team.name.clone()),
            member: score.member_id,
            member_name: member.map(|member| member.name.clone()),
            member_role: member.map(|member| member.role.clone()),
            points: score.points,
            created_at: format_system_time(score.created_at),
            updated_at: format_system_time(score.updated_at),
        }
    }
}
