use mongodb::bson::{self, Bson, DateTime, Document, doc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::dao::models::{
    GameEntity, GameScoreEntity, MemberEntity, MemberStandingEntity, ScoreEntity, ScoreKey,
    TeamEntity, TeamStandingEntity,
};

pub fn to_bson_uuid(id: Uuid) -> bson::Uuid {
    bson::Uuid::from_bytes(id.into_bytes())
}

pub fn from_bson_uuid(id: bson::Uuid) -> Uuid {
    Uuid::from_bytes(id.bytes())
}

pub fn uuid_list(ids: &[Uuid]) -> Vec<Bson> {
    ids.iter().map(|id| Bson::from(to_bson_uuid(*id))).collect()
}

pub fn optional_uuid(id: Option<Uuid>) -> Bson {
    match id {
        Some(id) => Bson::from(to_bson_uuid(id)),
        None => Bson::Null,
    }
}

pub fn doc_id(id: Uuid) -> Document {
    doc! {"_id": to_bson_uuid(id)}
}

/// Filter matching exactly one score row; team-level rows hold an explicit `null` member.
pub fn score_key_filter(key: &ScoreKey) -> Document {
    doc! {
        "game": to_bson_uuid(key.game_id),
        "team": to_bson_uuid(key.team_id),
        "member": optional_uuid(key.member_id),
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MongoTeamDocument {
    #[serde(rename = "_id")]
    id: bson::Uuid,
    name: String,
    #[serde(default)]
    members: Vec<bson::Uuid>,
    created_at: DateTime,
    updated_at: DateTime,
}

impl From<TeamEntity> for MongoTeamDocument {
    fn from(value: TeamEntity) -> Self {
        Self {
            id: to_bson_uuid(value.id),
            name: value.name,
            members: value.members.into_iter().map(to_bson_uuid).collect(),
            created_at: DateTime::from_system_time(value.created_at),
            updated_at: DateTime::from_system_time(value.updated_at),
        }
    }
}

impl From<MongoTeamDocument> for TeamEntity {
    fn from(value: MongoTeamDocument) -> Self {
        Self {
            id: from_bson_uuid(value.id),
            name: value.name,
            members: value.members.into_iter().map(from_bson_uuid).collect(),
            created_at: value.created_at.to_system_time(),
            updated_at: value.updated_at.to_system_time(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MongoMemberDocument {
    #[serde(rename = "_id")]
    id: bson::Uuid,
    name: String,
    role: String,
    team: bson::Uuid,
    created_at: DateTime,
    updated_at: DateTime,
}

impl From<MemberEntity> for MongoMemberDocument {
    fn from(value: MemberEntity) -> Self {
        Self {
            id: to_bson_uuid(value.id),
            name: value.name,
            role: value.role,
            team: to_bson_uuid(value.team_id),
            created_at: DateTime::from_system_time(value.created_at),
            updated_at: DateTime::from_system_time(value.updated_at),
        }
    }
}

impl From<MongoMemberDocument> for MemberEntity {
    fn from(value: MongoMemberDocument) -> Self {
        Self {
            id: from_bson_uuid(value.id),
            name: value.name,
            role: value.role,
            team_id: from_bson_uuid(value.team),
            created_at: value.created_at.to_system_time(),
            updated_at: value.updated_at.to_system_time(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MongoGameDocument {
    #[serde(rename = "_id")]
    id: bson::Uuid,
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    short_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(default)]
    points: i64,
    created_at: DateTime,
    updated_at: DateTime,
}

impl From<GameEntity> for MongoGameDocument {
    fn from(value: GameEntity) -> Self {
        Self {
            id: to_bson_uuid(value.id),
            name: value.name,
            short_name: value.short_name,
            description: value.description,
            points: value.points,
            created_at: DateTime::from_system_time(value.created_at),
            updated_at: DateTime::from_system_time(value.updated_at),
        }
    }
}

impl From<MongoGameDocument> for GameEntity {
    fn from(value: MongoGameDocument) -> Self {
        Self {
            id: from_bson_uuid(value.id),
            name: value.name,
            short_name: value.short_name,
            description: value.description,
            points: value.points,
            created_at: value.created_at.to_system_time(),
            updated_at: value.updated_at.to_system_time(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MongoScoreDocument {
    #[serde(rename = "_id")]
    id: bson::Uuid,
    game: bson::Uuid,
    team: bson::Uuid,
    #[serde(default)]
    member: Option<bson::Uuid>,
    points: i64,
    created_at: DateTime,
    updated_at: DateTime,
}

impl From<MongoScoreDocument> for ScoreEntity {
    fn from(value: MongoScoreDocument) -> Self {
        Self {
            id: from_bson_uuid(value.id),
            game_id: from_bson_uuid(value.game),
            team_id: from_bson_uuid(value.team),
            member_id: value.member.map(from_bson_uuid),
            points: value.points,
            created_at: value.created_at.to_system_time(),
            updated_at: value.updated_at.to_system_time(),
        }
    }
}

/// Output row of the team leaderboard pipeline.
#[derive(Debug, Deserialize)]
pub struct TeamStandingRow {
    team_id: bson::Uuid,
    team_name: String,
    total_points: i64,
}

impl From<TeamStandingRow> for TeamStandingEntity {
    fn from(row: TeamStandingRow) -> Self {
        Self {
            team_id: from_bson_uuid(row.team_id),
            team_name: row.team_name,
            total_points: row.total_points,
        }
    }
}

/// Output row of the member leaderboard pipeline.
#[derive(Debug, Deserialize)]
pub struct MemberStandingRow {
    member_id: bson::Uuid,
    member_name: String,
    team_id: bson::Uuid,
    team_name: String,
    total_points: i64,
}

impl From<MemberStandingRow> for MemberStandingEntity {
    fn from(row: MemberStandingRow) -> Self {
        Self {
            member_id: from_bson_uuid(row.member_id),
            member_name: row.member_name,
            team_id: from_bson_uuid(row.team_id),
            team_name: row.team_name,
            total_points: row.total_points,
        }
    }
}

/// Output row of the per-game breakdown pipelines.
#[derive(Debug, Deserialize)]
pub struct GameScoreRow {
    game_id: bson::Uuid,
    game_name: String,
    points: i64,
}

impl From<GameScoreRow> for GameScoreEntity {
    fn from(row: GameScoreRow) -> Self {
        Self {
            game_id: from_bson_uuid(row.game_id),
            game_name: row.game_name,
            points: row.points,
        }
    }
}
