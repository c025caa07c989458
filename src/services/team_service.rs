//! Team management: creation, renaming, deletion and member listings.

use std::{collections::HashMap, time::SystemTime};

use tracing::{info, warn};
use uuid::Uuid;
use validator::Validate;

use crate::{
    dao::models::{MemberEntity, TeamEntity},
    dto::{
        common::MessageResponse,
        member::MemberSummary,
        team::{
            CreateTeamRequest, TeamDetails, TeamMembersResponse, TeamResponse, TeamSummary,
            UpdateTeamRequest,
        },
        validation::normalize_name,
    },
    error::ServiceError,
    state::SharedState,
};

fn team_not_found(id: Uuid) -> ServiceError {
    ServiceError::NotFound(format!("team `{id}` not found"))
}

fn name_taken() -> ServiceError {
    ServiceError::Conflict("team name already exists".into())
}

pub async fn create_team(
    state: &SharedState,
    payload: CreateTeamRequest,
) -> Result<TeamResponse, ServiceError> {
    payload.validate()?;
    let store = state.require_store().await?;

    let name = normalize_name(&payload.name);
    if store.find_team_by_name(name.clone()).await?.is_some() {
        warn!(%name, "rejected duplicate team name");
        return Err(name_taken());
    }

    let team = TeamEntity::new(name);
    store.insert_team(team.clone()).await.map_err(|err| {
        // The unique index can still reject a concurrent insert of the same name.
        match ServiceError::from(err) {
            ServiceError::Conflict(_) => name_taken(),
            other => other,
        }
    })?;

    info!(team_id = %team.id, name = %team.name, "team created");
    Ok(TeamResponse {
        message: "Team created successfully".into(),
        team: team.into(),
    })
}

pub async fn list_teams(state: &SharedState) -> Result<Vec<TeamSummary>, ServiceError> {
    let store = state.require_store().await?;
    let teams = store.list_teams().await?;
    Ok(teams.into_iter().map(Into::into).collect())
}

/// Load the team's members in the order of its member list. Ids whose member is gone are
/// skipped.
async fn ordered_members(
    state: &SharedState,
    team: &TeamEntity,
) -> Result<Vec<MemberSummary>, ServiceError> {
    let store = state.require_store().await?;
    let mut by_id: HashMap<Uuid, MemberEntity> = store
        .find_members(team.members.clone())
        .await?
        .into_iter()
        .map(|member| (member.id, member))
        .collect();

    Ok(team
        .members
        .iter()
        .filter_map(|id| by_id.remove(id))
        .map(|member| MemberSummary::new(member, Some(team.name.clone())))
        .collect())
}

pub async fn get_team(state: &SharedState, id: Uuid) -> Result<TeamDetails, ServiceError> {
    let store = state.require_store().await?;
    let team = store.find_team(id).await?.ok_or_else(|| team_not_found(id))?;
    let members = ordered_members(state, &team).await?;
    Ok(TeamDetails::new(team, members))
}

pub async fn update_team(
    state: &SharedState,
    id: Uuid,
    payload: UpdateTeamRequest,
) -> Result<TeamResponse, ServiceError> {
    payload.validate()?;
    let store = state.require_store().await?;

    let mut team = store.find_team(id).await?.ok_or_else(|| team_not_found(id))?;
    let name = normalize_name(&payload.name);
    let taken = store
        .find_team_by_name(name.clone())
        .await?
        .is_some_and(|existing| existing.id != id);
    if taken {
        warn!(team_id = %id, %name, "rejected team rename to an existing name");
        return Err(name_taken());
    }

    team.name = name;
    team.updated_at = SystemTime::now();
    let updated = store.update_team(team.clone()).await.map_err(|err| {
        match ServiceError::from(err) {
            ServiceError::Conflict(_) => name_taken(),
            other => other,
        }
    })?;
    if !updated {
        return Err(team_not_found(id));
    }

    info!(team_id = %id, name = %team.name, "team renamed");
    Ok(TeamResponse {
        message: "Team updated successfully".into(),
        team: team.into(),
    })
}

/// Delete a team. Its members and scores are left in place.
pub async fn delete_team(state: &SharedState, id: Uuid) -> Result<MessageResponse, ServiceError> {
    let store = state.require_store().await?;
    if !store.delete_team(id).await? {
        return Err(team_not_found(id));
    }
    info!(team_id = %id, "team deleted");
    Ok(MessageResponse::new("Team deleted successfully"))
}

pub async fn team_members(
    state: &SharedState,
    id: Uuid,
) -> Result<TeamMembersResponse, ServiceError> {
    let store = state.require_store().await?;
    let team = store.find_team(id).await?.ok_or_else(|| team_not_found(id))?;
    let members = ordered_members(state, &team).await?;
    Ok(TeamMembersResponse {
        team_id: team.id,
        team_name: team.name,
        members,
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::{
        config::AppConfig, dao::scoreboard_store::memory::MemoryScoreboardStore, state::AppState,
    };

    async fn state() -> SharedState {
        let state = AppState::new(AppConfig::default());
        state
            .install_store(Arc::new(MemoryScoreboardStore::new()))
            .await;
        state
    }

    fn create(name: &str) -> CreateTeamRequest {
        CreateTeamRequest { name: name.into() }
    }

    #[tokio::test]
    async fn create_trims_the_name() {
        let state = state().await;
        let created = create_team(&state, create("  Red  ")).await.unwrap();
        assert_eq!(created.team.name, "Red");
        assert!(created.team.members.is_empty());
    }

    #[tokio::test]
    async fn blank_name_is_invalid() {
        let state = state().await;
        let err = create_team(&state, create("   ")).await.unwrap_err();
        assert!(matches!(err, ServiceError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn duplicate_name_is_a_conflict_regardless_of_case() {
        let state = state().await;
        create_team(&state, create("Red")).await.unwrap();
        let err = create_team(&state, create("rED")).await.unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(_)));
    }

    #[tokio::test]
    async fn rename_to_own_name_with_other_case_is_allowed() {
        let state = state().await;
        let red = create_team(&state, create("Red")).await.unwrap().team;
        let renamed = update_team(&state, red.id, UpdateTeamRequest { name: "RED".into() })
            .await
            .unwrap();
        assert_eq!(renamed.team.name, "RED");
    }

    #[tokio::test]
    async fn rename_to_another_teams_name_is_a_conflict() {
        let state = state().await;
        create_team(&state, create("Red")).await.unwrap();
        let blue = create_team(&state, create("Blue")).await.unwrap().team;
        let err = update_team(&state, blue.id, UpdateTeamRequest { name: "red".into() })
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(_)));
    }

    #[tokio::test]
    async fn unknown_team_is_not_found() {
        let state = state().await;
        let id = Uuid::new_v4();
        assert!(matches!(
            get_team(&state, id).await,
            Err(ServiceError::NotFound(_))
        ));
        assert!(matches!(
            delete_team(&state, id).await,
            Err(ServiceError::NotFound(_))
        ));
        assert!(matches!(
            team_members(&state, id).await,
            Err(ServiceError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn delete_removes_the_team_from_listing() {
        let state = state().await;
        let red = create_team(&state, create("Red")).await.unwrap().team;
        delete_team(&state, red.id).await.unwrap();
        assert!(list_teams(&state).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn degraded_state_refuses_requests() {
        let state = AppState::new(AppConfig::default());
        assert!(matches!(
            list_teams(&state).await,
            Err(ServiceError::Degraded)
        ));
    }
}
