//! Game catalogue management.

use std::{collections::HashSet, time::SystemTime};

use tracing::{info, warn};
use uuid::Uuid;

use crate::{
    dao::models::GameEntity,
    dto::{
        common::MessageResponse,
        game::{
            CreateGamesRequest, CreateGamesResponse, GameInput, GameResponse, GameSummary,
            UpdateGameRequest,
        },
        validation::{dedup_by_name, name_key, normalize_name},
    },
    error::ServiceError,
    state::SharedState,
};

fn game_not_found(id: Uuid) -> ServiceError {
    ServiceError::NotFound(format!("game `{id}` not found"))
}

fn name_taken() -> ServiceError {
    ServiceError::Conflict("game name already exists".into())
}

/// Blank optional text is stored as absent.
fn optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|text| text.trim().to_owned())
        .filter(|text| !text.is_empty())
}

/// Trimmed game, or `None` when its name is blank.
fn clean_input(input: GameInput) -> Option<GameEntity> {
    let name = input
        .name
        .as_deref()
        .map(normalize_name)
        .filter(|name| !name.is_empty())?;
    Some(GameEntity::new(
        name,
        optional_text(input.short_name),
        optional_text(input.description),
        input.points.unwrap_or(0),
    ))
}

pub async fn create_games(
    state: &SharedState,
    payload: CreateGamesRequest,
) -> Result<CreateGamesResponse, ServiceError> {
    if payload.games.is_empty() {
        return Err(ServiceError::InvalidInput("games array is required".into()));
    }
    let max_batch_size = state.config().max_batch_size();
    if payload.games.len() > max_batch_size {
        return Err(ServiceError::InvalidInput(format!(
            "at most {max_batch_size} games can be created at once"
        )));
    }

    let valid = payload
        .games
        .into_iter()
        .filter_map(clean_input)
        .collect::<Vec<_>>();
    if valid.is_empty() {
        return Err(ServiceError::InvalidInput(
            "at least one valid game name is required".into(),
        ));
    }
    let valid_count = valid.len();

    let store = state.require_store().await?;
    let existing = store
        .find_games_by_names(valid.iter().map(|game| game.name.clone()).collect())
        .await?;
    let taken = existing
        .iter()
        .map(|game| name_key(&game.name))
        .collect::<HashSet<_>>();
    let (fresh, _) = dedup_by_name(
        valid
            .into_iter()
            .filter(|game| !taken.contains(&name_key(&game.name)))
            .collect(),
        |game| game.name.as_str(),
    );
    if fresh.is_empty() {
        warn!(requested = valid_count, "rejected game batch: every name already exists");
        return Err(ServiceError::Conflict("all games already exist".into()));
    }

    store
        .insert_games(fresh.clone())
        .await
        .map_err(|err| match ServiceError::from(err) {
            ServiceError::Conflict(_) => name_taken(),
            other => other,
        })?;

    info!(created = fresh.len(), requested = valid_count, "games created");
    Ok(CreateGamesResponse {
        message: format!("{} game(s) added successfully", fresh.len()),
        skipped: valid_count - fresh.len(),
        created_games: fresh.into_iter().map(Into::into).collect(),
    })
}

pub async fn list_games(state: &SharedState) -> Result<Vec<GameSummary>, ServiceError> {
    let store = state.require_store().await?;
    let games = store.list_games().await?;
    Ok(games.into_iter().map(Into::into).collect())
}

pub async fn update_game(
    state: &SharedState,
    id: Uuid,
    payload: UpdateGameRequest,
) -> Result<GameResponse, ServiceError> {
    let store = state.require_store().await?;
    let mut game = store.find_game(id).await?.ok_or_else(|| game_not_found(id))?;

    if let Some(name) = payload.name {
        let name = normalize_name(&name);
        if name.is_empty() {
            return Err(ServiceError::InvalidInput("game name must not be empty".into()));
        }
        let taken = store
            .find_games_by_names(vec![name.clone()])
            .await?
            .iter()
            .any(|existing| existing.id != id);
        if taken {
            warn!(game_id = %id, %name, "rejected game rename to an existing name");
            return Err(name_taken());
        }
        game.name = name;
    }
    if payload.short_name.is_some() {
        game.short_name = optional_text(payload.short_name);
    }
    if payload.description.is_some() {
        game.description = optional_text(payload.description);
    }
    if let Some(points) = payload.points {
        game.points = points;
    }

    game.updated_at = SystemTime::now();
    let updated = store
        .update_game(game.clone())
        .await
        .map_err(|err| match ServiceError::from(err) {
            ServiceError::Conflict(_) => name_taken(),
            other => other,
        })?;
    if !updated {
        return Err(game_not_found(id));
    }

    info!(game_id = %id, name = %game.name, "game updated");
    Ok(GameResponse {
        message: "Game updated successfully".into(),
        game: game.into(),
    })
}

/// Delete a game. Scores recorded for it are left in place.
pub async fn delete_game(state: &SharedState, id: Uuid) -> Result<MessageResponse, ServiceError> {
    let store = state.require_store().await?;
    if !store.delete_game(id).await? {
        return Err(game_not_found(id));
    }
    info!(game_id = %id, "game deleted");
    Ok(MessageResponse::new("Game deleted successfully"))
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

    fn input(name: &str, points: Option<i64>) -> GameInput {
        GameInput {
            name: Some(name.into()),
            short_name: None,
            description: None,
            points,
        }
    }

    fn batch(games: Vec<GameInput>) -> CreateGamesRequest {
        CreateGamesRequest { games }
    }

    #[tokio::test]
    async fn blank_names_are_dropped_and_points_default_to_zero() {
        let state = state().await;
        let response = create_games(
            &state,
            batch(vec![input(" Chess ", None), input("  ", Some(5))]),
        )
        .await
        .unwrap();

        assert_eq!(response.created_games.len(), 1);
        assert_eq!(response.created_games[0].name, "Chess");
        assert_eq!(response.created_games[0].points, 0);
        assert_eq!(response.skipped, 0);
    }

    #[tokio::test]
    async fn only_blank_names_is_invalid() {
        let state = state().await;
        let err = create_games(&state, batch(vec![input(" ", None)]))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::InvalidInput(_)));

        let err = create_games(&state, batch(vec![])).await.unwrap_err();
        assert!(matches!(err, ServiceError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn existing_names_are_skipped_case_insensitively() {
        let state = state().await;
        create_games(&state, batch(vec![input("Chess", Some(10))]))
            .await
            .unwrap();

        let response = create_games(
            &state,
            batch(vec![input("CHESS", None), input("Darts", Some(3)), input("darts", None)]),
        )
        .await
        .unwrap();
        assert_eq!(response.created_games.len(), 1);
        assert_eq!(response.skipped, 2);

        let err = create_games(&state, batch(vec![input("chess", None)]))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(_)));
    }

    #[tokio::test]
    async fn partial_update_keeps_untouched_fields() {
        let state = state().await;
        let mut chess = input("Chess", Some(10));
        chess.short_name = Some("CHS".into());
        let id = create_games(&state, batch(vec![chess]))
            .await
            .unwrap()
            .created_games[0]
            .id;

        let updated = update_game(
            &state,
            id,
            UpdateGameRequest {
                points: Some(25),
                ..Default::default()
            },
        )
        .await
        .unwrap()
        .game;
        assert_eq!(updated.name, "Chess");
        assert_eq!(updated.short_name.as_deref(), Some("CHS"));
        assert_eq!(updated.points, 25);
    }

    #[tokio::test]
    async fn rename_to_existing_game_is_a_conflict() {
        let state = state().await;
        let created = create_games(
            &state,
            batch(vec![input("Chess", None), input("Darts", None)]),
        )
        .await
        .unwrap();
        let darts = created
            .created_games
            .iter()
            .find(|game| game.name == "Darts")
            .unwrap()
            .id;

        let err = update_game(
            &state,
            darts,
            UpdateGameRequest {
                name: Some("chess".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(_)));
    }

    #[tokio::test]
    async fn delete_unknown_game_is_not_found() {
        let state = state().await;
        assert!(matches!(
            delete_game(&state, Uuid::new_v4()).await,
            Err(ServiceError::NotFound(_))
        ));
    }
}
