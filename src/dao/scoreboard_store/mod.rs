pub mod memory;
#[cfg(feature = "mongo-store")]
pub mod mongodb;

use crate::dao::models::{
    GameEntity, GameScoreEntity, MemberEntity, MemberStandingEntity, ScoreEntity, ScoreKey,
    TeamEntity, TeamStandingEntity,
};
use crate::dao::storage::StorageResult;
use futures::future::BoxFuture;
use uuid::Uuid;

/// Abstraction over the persistence layer for teams, members, games and scores.
///
/// Name lookups (`*_by_name*`) compare case-insensitively. Unique names are enforced by the
/// backend: conflicting writes fail with [`StorageError::Duplicate`].
///
/// [`StorageError::Duplicate`]: crate::dao::storage::StorageError::Duplicate
pub trait ScoreboardStore: Send + Sync {
    fn insert_team(&self, team: TeamEntity) -> BoxFuture<'static, StorageResult<()>>;
    fn find_team(&self, id: Uuid) -> BoxFuture<'static, StorageResult<Option<TeamEntity>>>;
    fn find_team_by_name(
        &self,
        name: String,
    ) -> BoxFuture<'static, StorageResult<Option<TeamEntity>>>;
    fn find_teams(&self, ids: Vec<Uuid>) -> BoxFuture<'static, StorageResult<Vec<TeamEntity>>>;
    /// Every team, newest first.
    fn list_teams(&self) -> BoxFuture<'static, StorageResult<Vec<TeamEntity>>>;
    /// Replace a team; `false` when it does not exist.
    fn update_team(&self, team: TeamEntity) -> BoxFuture<'static, StorageResult<bool>>;
    fn delete_team(&self, id: Uuid) -> BoxFuture<'static, StorageResult<bool>>;
    /// Append members to a team's member list, skipping ids already present.
    fn push_team_members(
        &self,
        team_id: Uuid,
        member_ids: Vec<Uuid>,
    ) -> BoxFuture<'static, StorageResult<()>>;
    fn pull_team_member(
        &self,
        team_id: Uuid,
        member_id: Uuid,
    ) -> BoxFuture<'static, StorageResult<()>>;

    fn insert_members(&self, members: Vec<MemberEntity>) -> BoxFuture<'static, StorageResult<()>>;
    fn find_member(&self, id: Uuid) -> BoxFuture<'static, StorageResult<Option<MemberEntity>>>;
    fn find_members(
        &self,
        ids: Vec<Uuid>,
    ) -> BoxFuture<'static, StorageResult<Vec<MemberEntity>>>;
    fn find_members_by_names(
        &self,
        names: Vec<String>,
    ) -> BoxFuture<'static, StorageResult<Vec<MemberEntity>>>;
    /// Members, newest first, optionally restricted to one team.
    fn list_members(
        &self,
        team_id: Option<Uuid>,
    ) -> BoxFuture<'static, StorageResult<Vec<MemberEntity>>>;
    fn update_member(&self, member: MemberEntity) -> BoxFuture<'static, StorageResult<bool>>;
    fn delete_member(&self, id: Uuid) -> BoxFuture<'static, StorageResult<bool>>;

    fn insert_games(&self, games: Vec<GameEntity>) -> BoxFuture<'static, StorageResult<()>>;
    fn find_game(&self, id: Uuid) -> BoxFuture<'static, StorageResult<Option<GameEntity>>>;
    fn find_games_by_names(
        &self,
        names: Vec<String>,
    ) -> BoxFuture<'static, StorageResult<Vec<GameEntity>>>;
    /// Every game, newest first.
    fn list_games(&self) -> BoxFuture<'static, StorageResult<Vec<GameEntity>>>;
    fn update_game(&self, game: GameEntity) -> BoxFuture<'static, StorageResult<bool>>;
    fn delete_game(&self, id: Uuid) -> BoxFuture<'static, StorageResult<bool>>;

    /// Add `delta` to the row identified by `key`, creating it when missing, as one atomic
    /// operation. Returns the row after the increment.
    fn add_points(
        &self,
        key: ScoreKey,
        delta: i64,
    ) -> BoxFuture<'static, StorageResult<ScoreEntity>>;
    fn list_scores(&self) -> BoxFuture<'static, StorageResult<Vec<ScoreEntity>>>;
    fn delete_score(&self, id: Uuid) -> BoxFuture<'static, StorageResult<bool>>;

    fn team_standings(&self) -> BoxFuture<'static, StorageResult<Vec<TeamStandingEntity>>>;
    fn member_standings(&self) -> BoxFuture<'static, StorageResult<Vec<MemberStandingEntity>>>;
    fn team_game_scores(
        &self,
        team_id: Uuid,
    ) -> BoxFuture<'static, StorageResult<Vec<GameScoreEntity>>>;
    fn member_game_scores(
        &self,
        member_id: Uuid,
    ) -> BoxFuture<'static, StorageResult<Vec<GameScoreEntity>>>;

    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>>;
    fn try_reconnect(&self) -> BoxFuture<'static, StorageResult<()>>;
}
