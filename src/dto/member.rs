use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::{dao::models::MemberEntity, dto::format_system_time};

/// One member inside a batch creation request.
#[derive(Debug, Deserialize, ToSchema)]
pub struct MemberInput {
    #[serde(default)]
    pub name: Option<String>,
    /// Falls back to the configured default role when omitted or blank.
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub team: Option<Uuid>,
}

/// Batch of members to create.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateMembersRequest {
    #[serde(default)]
    pub members: Vec<MemberInput>,
}

/// Partial member update; omitted fields are left untouched.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateMemberRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    /// Moving a member also moves it between the teams' member lists.
    #[serde(default)]
    pub team: Option<Uuid>,
}

/// Filter accepted by the member listing.
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct MemberListQuery {
    /// Only return members of this team.
    pub team: Option<Uuid>,
}

/// Team reference embedded in a member. `name` is absent when the team was deleted.
#[skip_serializing_none]
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MemberTeam {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub name: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MemberSummary {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub name: String,
    pub role: String,
    pub team: MemberTeam,
    pub created_at: String,
    pub updated_at: String,
}

impl MemberSummary {
    /// Project a member, resolving its team name when known.
    pub fn new(member: MemberEntity, team_name: Option<String>) -> Self {
        Self {
            id: member.id,
            name: member.name,
            role: member.role,
            team: MemberTeam {
                id: member.team_id,
                name: team_name,
            },
            created_at: format_system_time(member.created_at),
            updated_at: format_system_time(member.updated_at),
        }
    }
}

/// Result of a batch member creation.
#[derive(Debug, Serialize, ToSchema)]
pub struct CreateMembersResponse {
    pub message: String,
    pub created: Vec<MemberSummary>,
    /// Entries not created because their name was already taken.
    pub skipped: usize,
}
