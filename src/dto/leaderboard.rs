use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::dao::models::{GameScoreEntity, MemberStandingEntity, TeamStandingEntity};

/// Optional truncation of a ranked list.
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct LeaderboardQuery {
    /// Maximum number of entries to return (positive).
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TeamStanding {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub team_name: String,
    pub total_points: i64,
}

impl From<TeamStandingEntity> for TeamStanding {
    fn from(entity: TeamStandingEntity) -> Self {
        Self {
            id: entity.team_id,
            team_name: entity.team_name,
            total_points: entity.total_points,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MemberStanding {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub member_name: String,
    pub team_id: Uuid,
    pub team_name: String,
    pub total_points: i64,
}

impl From<MemberStandingEntity> for MemberStanding {
    fn from(entity: MemberStandingEntity) -> Self {
        Self {
            id: entity.member_id,
            member_name: entity.member_name,
            team_id: entity.team_id,
            team_name: entity.team_name,
            total_points: entity.total_points,
        }
    }
}

/// Points of one team or member in one game.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GameScore {
    pub game_id: Uuid,
    pub game_name: String,
    pub points: i64,
}

impl From<GameScoreEntity> for GameScore {
    fn from(entity: GameScoreEntity) -> Self {
        Self {
            game_id: entity.game_id,
            game_name: entity.game_name,
            points: entity.points,
        }
    }
}
