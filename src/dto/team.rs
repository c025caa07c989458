use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    dao::models::TeamEntity,
    dto::{format_system_time, member::MemberSummary, validation::validate_name},
};

/// Payload used to register a team.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CreateTeamRequest {
    #[serde(default)]
    #[validate(custom(function = "validate_name"))]
    pub name: String,
}

/// Payload used to rename a team.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct UpdateTeamRequest {
    #[serde(default)]
    #[validate(custom(function = "validate_name"))]
    pub name: String,
}

/// Team as listed, with member references only.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TeamSummary {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub name: String,
    pub members: Vec<Uuid>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<TeamEntity> for TeamSummary {
    fn from(team: TeamEntity) -> Self {
        Self {
            id: team.id,
            name: team.name,
            members: team.members,
            created_at: format_system_time(team.created_at),
            updated_at: format_system_time(team.updated_at),
        }
    }
}

/// Team with its member records populated.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TeamDetails {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub name: String,
    pub members: Vec<MemberSummary>,
    pub created_at: String,
    pub updated_at: String,
}

impl TeamDetails {
    pub fn new(team: TeamEntity, members: Vec<MemberSummary>) -> Self {
        Self {
            id: team.id,
            name: team.name,
            members,
            created_at: format_system_time(team.created_at),
            updated_at: format_system_time(team.updated_at),
        }
    }
}

/// Result of a team creation or rename.
#[derive(Debug, Serialize, ToSchema)]
pub struct TeamResponse {
    pub message: String,
    pub team: TeamSummary,
}

/// Members of one team, in the team's member order.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TeamMembersResponse {
    pub team_id: Uuid,
    pub team_name: String,
    pub members: Vec<MemberSummary>,
}
