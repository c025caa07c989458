//! Score submissions. Every submission adds points to the row of its (game, team, member)
//! combination, creating the row on first use.

use std::collections::{HashMap, HashSet};

use tracing::{info, warn};
use uuid::Uuid;

use crate::{
    dao::models::ScoreKey,
    dto::{
        common::MessageResponse,
        score::{CreateScoreRequest, CreateScoreResponse, ScoreDetails, ScoreSummary},
    },
    error::ServiceError,
    state::SharedState,
};

/// Add points to the team-level row, or to the row of each listed member.
///
/// Members are applied one by one in request order (repeated ids count once). A missing
/// member or a member of another team stops the request; members applied before it keep
/// their points.
pub async fn submit_score(
    state: &SharedState,
    payload: CreateScoreRequest,
) -> Result<CreateScoreResponse, ServiceError> {
    let store = state.require_store().await?;

    let game = store
        .find_game(payload.game)
        .await?
        .ok_or_else(|| ServiceError::NotFound("game not found".into()))?;
    let team = store
        .find_team(payload.team)
        .await?
        .ok_or_else(|| ServiceError::NotFound("team not found".into()))?;
    let points = payload.points.unwrap_or(game.points);

    if payload.member_ids.is_empty() {
        let score = store
            .add_points(ScoreKey::team(game.id, team.id), points)
            .await?;
        info!(game_id = %game.id, team_id = %team.id, points, total = score.points, "team score added");
        return Ok(CreateScoreResponse {
            message: "Team score added/updated successfully".into(),
            scores: vec![score.into()],
        });
    }

    let mut seen = HashSet::new();
    let member_ids = payload
        .member_ids
        .into_iter()
        .filter(|id| seen.insert(*id))
        .collect::<Vec<_>>();

    let mut scores = Vec::with_capacity(member_ids.len());
    for member_id in member_ids {
        let outcome = match store.find_member(member_id).await? {
            None => Err(ServiceError::NotFound(format!(
                "member with id {member_id} not found"
            ))),
            Some(member) if member.team_id != team.id => Err(ServiceError::InvalidInput(format!(
                "member {member_id} does not belong to team {}",
                team.id
            ))),
            Some(_) => Ok(()),
        };
        if let Err(err) = outcome {
            if !scores.is_empty() {
                warn!(
                    game_id = %game.id,
                    team_id = %team.id,
                    applied = scores.len(),
                    error = %err,
                    "member score submission stopped after partial apply"
                );
            }
            return Err(err);
        }

        let score = store
            .add_points(ScoreKey::member(game.id, team.id, member_id), points)
            .await?;
        scores.push(ScoreSummary::from(score));
    }

    info!(
        game_id = %game.id,
        team_id = %team.id,
        members = scores.len(),
        points,
        "member scores added"
    );
    Ok(CreateScoreResponse {
        message: "Member scores added/updated successfully".into(),
        scores,
    })
}

/// Every score row joined with the records it references.
pub async fn list_scores(state: &SharedState) -> Result<Vec<ScoreDetails>, ServiceError> {
    let store = state.require_store().await?;
    let scores = store.list_scores().await?;

    let games = store
        .list_games()
        .await?
        .into_iter()
        .map(|game| (game.id, game))
        .collect::<HashMap<_, _>>();
    let teams = store
        .list_teams()
        .await?
        .into_iter()
        .map(|team| (team.id, team))
        .collect::<HashMap<_, _>>();
    let member_ids = scores
        .iter()
        .filter_map(|score| score.member_id)
        .collect::<HashSet<Uuid>>();
    let members = store
        .find_members(member_ids.into_iter().collect())
        .await?
        .into_iter()
        .map(|member| (member.id, member))
        .collect::<HashMap<_, _>>();

    Ok(scores
        .into_iter()
        .map(|score| {
            let game = games.get(&score.game_id);
            let team = teams.get(&score.team_id);
            let member = score.member_id.and_then(|id| members.get(&id));
            ScoreDetails::new(score, game, team, member)
        })
        .collect())
}

pub async fn delete_score(state: &SharedState, id: Uuid) -> Result<MessageResponse, ServiceError> {
    let store = state.require_store().await?;
    if !store.delete_score(id).await? {
        return Err(ServiceError::NotFound("score not found".into()));
    }
    info!(score_id = %id, "score deleted");
    Ok(MessageResponse::new("Score deleted successfully"))
}
