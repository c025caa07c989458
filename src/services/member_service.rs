//! Member management. Members are created in batches and every create, move or delete
//! keeps the owning team's member list in sync.

use std::{
    collections::{HashMap, HashSet},
    time::SystemTime,
};

use indexmap::IndexMap;
use tracing::{info, warn};
use uuid::Uuid;

use crate::{
    dao::models::{MemberEntity, TeamEntity},
    dto::{
        common::SuccessResponse,
        member::{
            CreateMembersRequest, CreateMembersResponse, MemberInput, MemberListQuery,
            MemberSummary, UpdateMemberRequest,
        },
        validation::{dedup_by_name, name_key, normalize_name},
    },
    error::ServiceError,
    state::SharedState,
};

fn member_not_found(id: Uuid) -> ServiceError {
    ServiceError::NotFound(format!("member `{id}` not found"))
}

/// Entry of a batch after trimming and role defaulting.
struct NormalizedMember {
    name: String,
    role: String,
    team: Uuid,
}

fn normalize_input(input: MemberInput, default_role: &str) -> Option<NormalizedMember> {
    let name = input
        .name
        .as_deref()
        .map(normalize_name)
        .filter(|name| !name.is_empty())?;
    let team = input.team?;
    let role = input
        .role
        .as_deref()
        .map(str::trim)
        .filter(|role| !role.is_empty())
        .unwrap_or(default_role)
        .to_owned();
    Some(NormalizedMember { name, role, team })
}

/// Map of team id to team name for the given ids; unknown ids are absent.
async fn team_names(
    state: &SharedState,
    ids: Vec<Uuid>,
) -> Result<HashMap<Uuid, String>, ServiceError> {
    let store = state.require_store().await?;
    Ok(store
        .find_teams(ids)
        .await?
        .into_iter()
        .map(|team: TeamEntity| (team.id, team.name))
        .collect())
}

pub async fn create_members(
    state: &SharedState,
    payload: CreateMembersRequest,
) -> Result<CreateMembersResponse, ServiceError> {
    let requested = payload.members.len();
    if requested == 0 {
        return Err(ServiceError::InvalidInput("members array is required".into()));
    }
    let max_batch_size = state.config().max_batch_size();
    if requested > max_batch_size {
        return Err(ServiceError::InvalidInput(format!(
            "at most {max_batch_size} members can be created at once"
        )));
    }

    let default_role = state.config().default_member_role();
    let entries = payload
        .members
        .into_iter()
        .map(|input| normalize_input(input, default_role))
        .collect::<Option<Vec<_>>>()
        .ok_or_else(|| {
            ServiceError::InvalidInput("each member must have a valid name and team".into())
        })?;

    let store = state.require_store().await?;

    let mut team_ids = entries.iter().map(|entry| entry.team).collect::<Vec<_>>();
    let mut seen = HashSet::new();
    team_ids.retain(|id| seen.insert(*id));
    let teams = team_names(state, team_ids.clone()).await?;
    let unknown = team_ids
        .iter()
        .filter(|id| !teams.contains_key(id))
        .map(Uuid::to_string)
        .collect::<Vec<_>>();
    if !unknown.is_empty() {
        warn!(unknown = ?unknown, "rejected member batch with unknown teams");
        return Err(ServiceError::InvalidInput(format!(
            "invalid team id(s): {}",
            unknown.join(", ")
        )));
    }

    let existing = store
        .find_members_by_names(entries.iter().map(|entry| entry.name.clone()).collect())
        .await?;
    let taken = existing
        .iter()
        .map(|member| name_key(&member.name))
        .collect::<HashSet<_>>();
    let (fresh, _) = dedup_by_name(
        entries
            .into_iter()
            .filter(|entry| !taken.contains(&name_key(&entry.name)))
            .collect(),
        |entry| entry.name.as_str(),
    );
    if fresh.is_empty() {
        warn!(
            existing = existing.len(),
            "rejected member batch: every name already exists"
        );
        return Err(ServiceError::Conflict(format!(
            "all provided members already exist ({} existing)",
            existing.len()
        )));
    }

    let created = fresh
        .into_iter()
        .map(|entry| MemberEntity::new(entry.name, entry.role, entry.team))
        .collect::<Vec<_>>();
    store.insert_members(created.clone()).await.map_err(|err| {
        match ServiceError::from(err) {
            ServiceError::Conflict(_) => {
                ServiceError::Conflict("duplicate member name detected".into())
            }
            other => other,
        }
    })?;

    let mut by_team: IndexMap<Uuid, Vec<Uuid>> = IndexMap::new();
    for member in &created {
        by_team.entry(member.team_id).or_default().push(member.id);
    }
    for (team_id, member_ids) in by_team {
        store.push_team_members(team_id, member_ids).await?;
    }

    info!(created = created.len(), requested, "members created");
    let message = format!(
        "Created {} of {} member(s) successfully",
        created.len(),
        requested
    );
    let skipped = requested - created.len();
    let created = created
        .into_iter()
        .map(|member| {
            let team_name = teams.get(&member.team_id).cloned();
            MemberSummary::new(member, team_name)
        })
        .collect();

    Ok(CreateMembersResponse {
        message,
        created,
        skipped,
    })
}

/// Members, newest first, each with its team's name.
pub async fn list_members(
    state: &SharedState,
    query: MemberListQuery,
) -> Result<Vec<MemberSummary>, ServiceError> {
    let store = state.require_store().await?;
    let members = store.list_members(query.team).await?;

    let mut team_ids = members.iter().map(|member| member.team_id).collect::<Vec<_>>();
    team_ids.sort_unstable();
    team_ids.dedup();
    let teams = team_names(state, team_ids).await?;

    Ok(members
        .into_iter()
        .map(|member| {
            let team_name = teams.get(&member.team_id).cloned();
            MemberSummary::new(member, team_name)
        })
        .collect())
}

pub async fn update_member(
    state: &SharedState,
    id: Uuid,
    payload: UpdateMemberRequest,
) -> Result<MemberSummary, ServiceError> {
    let store = state.require_store().await?;
    let mut member = store
        .find_member(id)
        .await?
        .ok_or_else(|| member_not_found(id))?;
    let previous_team = member.team_id;

    if let Some(name) = payload.name {
        let name = normalize_name(&name);
        if name.is_empty() {
            return Err(ServiceError::InvalidInput("member name must not be empty".into()));
        }
        member.name = name;
    }
    if let Some(role) = payload.role {
        let role = role.trim();
        if role.is_empty() {
            return Err(ServiceError::InvalidInput("member role must not be empty".into()));
        }
        member.role = role.to_owned();
    }

    let mut team_name = None;
    if let Some(team_id) = payload.team {
        let Some(team) = store.find_team(team_id).await? else {
            return Err(ServiceError::InvalidInput(format!(
                "invalid team id: {team_id}"
            )));
        };
        member.team_id = team.id;
        team_name = Some(team.name);
    }

    member.updated_at = SystemTime::now();
    if !store.update_member(member.clone()).await? {
        return Err(member_not_found(id));
    }

    if member.team_id != previous_team {
        store.pull_team_member(previous_team, id).await?;
        store.push_team_members(member.team_id, vec![id]).await?;
        info!(member_id = %id, from = %previous_team, to = %member.team_id, "member moved");
    }

    if team_name.is_none() {
        team_name = store.find_team(member.team_id).await?.map(|team| team.name);
    }
    Ok(MemberSummary::new(member, team_name))
}

/// Delete a member and drop it from its team's member list. Its scores are left in place.
pub async fn delete_member(
    state: &SharedState,
    id: Uuid,
) -> Result<SuccessResponse, ServiceError> {
    let store = state.require_store().await?;
    let member = store
        .find_member(id)
        .await?
        .ok_or_else(|| member_not_found(id))?;
    if !store.delete_member(id).await? {
        return Err(member_not_found(id));
    }
    store.pull_team_member(member.team_id, id).await?;

    info!(member_id = %id, team_id = %member.team_id, "member deleted");
    Ok(SuccessResponse { success: true })
}
