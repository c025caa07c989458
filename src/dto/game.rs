use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{dao::models::GameEntity, dto::format_system_time};

/// One game inside a batch creation request.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GameInput {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub short_name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    /// Default points awarded per submission, 0 when omitted.
    #[serde(default)]
    pub points: Option<i64>,
}

/// Batch of games to create.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateGamesRequest {
    #[serde(default)]
    pub games: Vec<GameInput>,
}

/// Partial game update; omitted fields are left untouched.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateGameRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub short_name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub points: Option<i64>,
}

#[skip_serializing_none]
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GameSummary {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub name: String,
    pub short_name: Option<String>,
    pub description: Option<String>,
    pub points: i64,
    pub created_at: String,
    pub updated_at: String,
}

impl From<GameEntity> for GameSummary {
    fn from(game: GameEntity) -> Self {
        Self {
            id: game.id,
            name: game.name,
            short_name: game.short_name,
            description: game.description,
            points: game.points,
            created_at: format_system_time(game.created_at),
            updated_at: format_system_time(game.updated_at),
        }
    }
}

/// Result of a batch game creation.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateGamesResponse {
    pub message: String,
    pub created_games: Vec<GameSummary>,
    /// Valid entries not created because their name was already taken.
    pub skipped: usize,
}

/// Result of a game update.
#[derive(Debug, Serialize, ToSchema)]
pub struct GameResponse {
    pub message: String,
    pub game: GameSummary,
}
