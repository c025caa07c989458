//! In-process [`ScoreboardStore`] used for local runs and tests.

use std::{collections::HashMap, hash::Hash, sync::Arc, time::SystemTime};

use dashmap::DashMap;
use futures::future::BoxFuture;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::dao::{
    aggregation,
    models::{
        GameEntity, GameScoreEntity, MemberEntity, MemberStandingEntity, ScoreEntity, ScoreKey,
        TeamEntity, TeamStandingEntity,
    },
    scoreboard_store::ScoreboardStore,
    storage::{StorageError, StorageResult},
};

/// Collections kept in concurrent maps. Compound writes (uniqueness checks, score upserts)
/// hold `write_gate` so they behave like single-document database operations.
#[derive(Clone, Default)]
pub struct MemoryScoreboardStore {
    inner: Arc<MemoryInner>,
}

#[derive(Default)]
struct MemoryInner {
    teams: DashMap<Uuid, TeamEntity>,
    members: DashMap<Uuid, MemberEntity>,
    games: DashMap<Uuid, GameEntity>,
    scores: DashMap<Uuid, ScoreEntity>,
    write_gate: Mutex<()>,
}

fn snapshot<K: Eq + Hash + Copy, V: Clone>(map: &DashMap<K, V>) -> Vec<V> {
    map.iter().map(|entry| entry.value().clone()).collect()
}

fn index<K: Eq + Hash + Copy, V: Clone>(map: &DashMap<K, V>) -> HashMap<K, V> {
    map.iter()
        .map(|entry| (*entry.key(), entry.value().clone()))
        .collect()
}

fn same_name(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

fn newest_first<T>(items: &mut [T], created_at: impl Fn(&T) -> SystemTime) {
    items.sort_by_key(|item| std::cmp::Reverse(created_at(item)));
}

impl MemoryScoreboardStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    async fn insert_team(&self, team: TeamEntity) -> StorageResult<()> {
        let _gate = self.inner.write_gate.lock().await;
        if self
            .inner
            .teams
            .iter()
            .any(|entry| same_name(&entry.name, &team.name))
        {
            return Err(StorageError::duplicate("teams", "name"));
        }
        self.inner.teams.insert(team.id, team);
        Ok(())
    }

    async fn find_team_by_name(&self, name: String) -> StorageResult<Option<TeamEntity>> {
        Ok(self
            .inner
            .teams
            .iter()
            .find(|entry| same_name(&entry.name, &name))
            .map(|entry| entry.value().clone()))
    }

    async fn update_team(&self, team: TeamEntity) -> StorageResult<bool> {
        let _gate = self.inner.write_gate.lock().await;
        if !self.inner.teams.contains_key(&team.id) {
            return Ok(false);
        }
        if self
            .inner
            .teams
            .iter()
            .any(|entry| entry.id != team.id && same_name(&entry.name, &team.name))
        {
            return Err(StorageError::duplicate("teams", "name"));
        }
        self.inner.teams.insert(team.id, team);
        Ok(true)
    }

    async fn push_team_members(&self, team_id: Uuid, member_ids: Vec<Uuid>) -> StorageResult<()> {
        let _gate = self.inner.write_gate.lock().await;
        if let Some(mut team) = self.inner.teams.get_mut(&team_id) {
            for member_id in member_ids {
                if !team.members.contains(&member_id) {
                    team.members.push(member_id);
                }
            }
            team.updated_at = SystemTime::now();
        }
        Ok(())
    }

    async fn pull_team_member(&self, team_id: Uuid, member_id: Uuid) -> StorageResult<()> {
        let _gate = self.inner.write_gate.lock().await;
        if let Some(mut team) = self.inner.teams.get_mut(&team_id) {
            team.members.retain(|id| *id != member_id);
            team.updated_at = SystemTime::now();
        }
        Ok(())
    }

    async fn find_members_by_names(&self, names: Vec<String>) -> StorageResult<Vec<MemberEntity>> {
        let wanted = names
            .iter()
            .map(|name| name.to_lowercase())
            .collect::<Vec<_>>();
        Ok(self
            .inner
            .members
            .iter()
            .filter(|entry| wanted.contains(&entry.name.to_lowercase()))
            .map(|entry| entry.value().clone())
            .collect())
    }

    async fn list_members(&self, team_id: Option<Uuid>) -> StorageResult<Vec<MemberEntity>> {
        let mut members = snapshot(&self.inner.members)
            .into_iter()
            .filter(|member| team_id.is_none_or(|id| member.team_id == id))
            .collect::<Vec<_>>();
        newest_first(&mut members, |member| member.created_at);
        Ok(members)
    }

    async fn insert_games(&self, games: Vec<GameEntity>) -> StorageResult<()> {
        let _gate = self.inner.write_gate.lock().await;
        for (position, game) in games.iter().enumerate() {
            let clashes_existing = self
                .inner
                .games
                .iter()
                .any(|entry| same_name(&entry.name, &game.name));
            let clashes_batch = games[..position]
                .iter()
                .any(|earlier| same_name(&earlier.name, &game.name));
            if clashes_existing || clashes_batch {
                return Err(StorageError::duplicate("games", "name"));
            }
        }
        for game in games {
            self.inner.games.insert(game.id, game);
        }
        Ok(())
    }

    async fn find_games_by_names(&self, names: Vec<String>) -> StorageResult<Vec<GameEntity>> {
        let wanted = names
            .iter()
            .map(|name| name.to_lowercase())
            .collect::<Vec<_>>();
        Ok(self
            .inner
            .games
            .iter()
            .filter(|entry| wanted.contains(&entry.name.to_lowercase()))
            .map(|entry| entry.value().clone())
            .collect())
    }

    async fn update_game(&self, game: GameEntity) -> StorageResult<bool> {
        let _gate = self.inner.write_gate.lock().await;
        if !self.inner.games.contains_key(&game.id) {
            return Ok(false);
        }
        if self
            .inner
            .games
            .iter()
            .any(|entry| entry.id != game.id && same_name(&entry.name, &game.name))
        {
            return Err(StorageError::duplicate("games", "name"));
        }
        self.inner.games.insert(game.id, game);
        Ok(true)
    }

    async fn add_points(&self, key: ScoreKey, delta: i64) -> StorageResult<ScoreEntity> {
        let _gate = self.inner.write_gate.lock().await;
        let existing = self
            .inner
            .scores
            .iter()
            .find(|entry| entry.value().key() == key)
            .map(|entry| entry.value().id);

        if let Some(mut score) = existing.and_then(|id| self.inner.scores.get_mut(&id)) {
            score.points = score
                .points
                .checked_add(delta)
                .ok_or_else(|| StorageError::points_overflow("add points"))?;
            score.updated_at = SystemTime::now();
            return Ok(score.clone());
        }

        let score = ScoreEntity::new(key, delta);
        self.inner.scores.insert(score.id, score.clone());
        Ok(score)
    }

    async fn team_standings(&self) -> StorageResult<Vec<TeamStandingEntity>> {
        let scores = snapshot(&self.inner.scores);
        aggregation::team_standings(&scores, &index(&self.inner.teams))
    }

    async fn member_standings(&self) -> StorageResult<Vec<MemberStandingEntity>> {
        let scores = snapshot(&self.inner.scores);
        aggregation::member_standings(
            &scores,
            &index(&self.inner.members),
            &index(&self.inner.teams),
        )
    }

    async fn team_game_scores(&self, team_id: Uuid) -> StorageResult<Vec<GameScoreEntity>> {
        let scores = snapshot(&self.inner.scores);
        Ok(aggregation::team_game_scores(
            &scores,
            team_id,
            &index(&self.inner.games),
        ))
    }

    async fn member_game_scores(&self, member_id: Uuid) -> StorageResult<Vec<GameScoreEntity>> {
        let scores = snapshot(&self.inner.scores);
        Ok(aggregation::member_game_scores(
            &scores,
            member_id,
            &index(&self.inner.games),
        ))
    }
}

impl ScoreboardStore for MemoryScoreboardStore {
    fn insert_team(&self, team: TeamEntity) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move { store.insert_team(team).await })
    }

    fn find_team(&self, id: Uuid) -> BoxFuture<'static, StorageResult<Option<TeamEntity>>> {
        let team = self.inner.teams.get(&id).map(|entry| entry.value().clone());
        Box::pin(async move { Ok(team) })
    }

    fn find_team_by_name(
        &self,
        name: String,
    ) -> BoxFuture<'static, StorageResult<Option<TeamEntity>>> {
        let store = self.clone();
        Box::pin(async move { store.find_team_by_name(name).await })
    }

    fn find_teams(&self, ids: Vec<Uuid>) -> BoxFuture<'static, StorageResult<Vec<TeamEntity>>> {
        let teams = ids
            .iter()
            .filter_map(|id| self.inner.teams.get(id).map(|entry| entry.value().clone()))
            .collect();
        Box::pin(async move { Ok(teams) })
    }

    fn list_teams(&self) -> BoxFuture<'static, StorageResult<Vec<TeamEntity>>> {
        let mut teams = snapshot(&self.inner.teams);
        newest_first(&mut teams, |team| team.created_at);
        Box::pin(async move { Ok(teams) })
    }

    fn update_team(&self, team: TeamEntity) -> BoxFuture<'static, StorageResult<bool>> {
        let store = self.clone();
        Box::pin(async move { store.update_team(team).await })
    }

    fn delete_team(&self, id: Uuid) -> BoxFuture<'static, StorageResult<bool>> {
        let removed = self.inner.teams.remove(&id).is_some();
        Box::pin(async move { Ok(removed) })
    }

    fn push_team_members(
        &self,
        team_id: Uuid,
        member_ids: Vec<Uuid>,
    ) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move { store.push_team_members(team_id, member_ids).await })
    }

    fn pull_team_member(
        &self,
        team_id: Uuid,
        member_id: Uuid,
    ) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move { store.pull_team_member(team_id, member_id).await })
    }

    fn insert_members(&self, members: Vec<MemberEntity>) -> BoxFuture<'static, StorageResult<()>> {
        for member in members {
            self.inner.members.insert(member.id, member);
        }
        Box::pin(async move { Ok(()) })
    }

    fn find_member(&self, id: Uuid) -> BoxFuture<'static, StorageResult<Option<MemberEntity>>> {
        let member = self
            .inner
            .members
            .get(&id)
            .map(|entry| entry.value().clone());
        Box::pin(async move { Ok(member) })
    }

    fn find_members(
        &self,
        ids: Vec<Uuid>,
    ) -> BoxFuture<'static, StorageResult<Vec<MemberEntity>>> {
        let members = ids
            .iter()
            .filter_map(|id| self.inner.members.get(id).map(|entry| entry.value().clone()))
            .collect();
        Box::pin(async move { Ok(members) })
    }

    fn find_members_by_names(
        &self,
        names: Vec<String>,
    ) -> BoxFuture<'static, StorageResult<Vec<MemberEntity>>> {
        let store = self.clone();
        Box::pin(async move { store.find_members_by_names(names).await })
    }

    fn list_members(
        &self,
        team_id: Option<Uuid>,
    ) -> BoxFuture<'static, StorageResult<Vec<MemberEntity>>> {
        let store = self.clone();
        Box::pin(async move { store.list_members(team_id).await })
    }

    fn update_member(&self, member: MemberEntity) -> BoxFuture<'static, StorageResult<bool>> {
        let updated = match self.inner.members.get_mut(&member.id) {
            Some(mut slot) => {
                *slot = member;
                true
            }
            None => false,
        };
        Box::pin(async move { Ok(updated) })
    }

    fn delete_member(&self, id: Uuid) -> BoxFuture<'static, StorageResult<bool>> {
        let removed = self.inner.members.remove(&id).is_some();
        Box::pin(async move { Ok(removed) })
    }

    fn insert_games(&self, games: Vec<GameEntity>) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move { store.insert_games(games).await })
    }

    fn find_game(&self, id: Uuid) -> BoxFuture<'static, StorageResult<Option<GameEntity>>> {
        let game = self.inner.games.get(&id).map(|entry| entry.value().clone());
        Box::pin(async move { Ok(game) })
    }

    fn find_games_by_names(
        &self,
        names: Vec<String>,
    ) -> BoxFuture<'static, StorageResult<Vec<GameEntity>>> {
        let store = self.clone();
        Box::pin(async move { store.find_games_by_names(names).await })
    }

    fn list_games(&self) -> BoxFuture<'static, StorageResult<Vec<GameEntity>>> {
        let mut games = snapshot(&self.inner.games);
        newest_first(&mut games, |game| game.created_at);
        Box::pin(async move { Ok(games) })
    }

    fn update_game(&self, game: GameEntity) -> BoxFuture<'static, StorageResult<bool>> {
        let store = self.clone();
        Box::pin(async move { store.update_game(game).await })
    }

    fn delete_game(&self, id: Uuid) -> BoxFuture<'static, StorageResult<bool>> {
        let removed = self.inner.games.remove(&id).is_some();
        Box::pin(async move { Ok(removed) })
    }

    fn add_points(
        &self,
        key: ScoreKey,
        delta: i64,
    ) -> BoxFuture<'static, StorageResult<ScoreEntity>> {
        let store = self.clone();
        Box::pin(async move { store.add_points(key, delta).await })
    }

    fn list_scores(&self) -> BoxFuture<'static, StorageResult<Vec<ScoreEntity>>> {
        let mut scores = snapshot(&self.inner.scores);
        newest_first(&mut scores, |score| score.created_at);
        Box::pin(async move { Ok(scores) })
    }

    fn delete_score(&self, id: Uuid) -> BoxFuture<'static, StorageResult<bool>> {
        let removed = self.inner.scores.remove(&id).is_some();
        Box::pin(async move { Ok(removed) })
    }

    fn team_standings(&self) -> BoxFuture<'static, StorageResult<Vec<TeamStandingEntity>>> {
        let store = self.clone();
        Box::pin(async move { store.team_standings().await })
    }

    fn member_standings(&self) -> BoxFuture<'static, StorageResult<Vec<MemberStandingEntity>>> {
        let store = self.clone();
        Box::pin(async move { store.member_standings().await })
    }

    fn team_game_scores(
        &self,
        team_id: Uuid,
    ) -> BoxFuture<'static, StorageResult<Vec<GameScoreEntity>>> {
        let store = self.clone();
        Box::pin(async move { store.team_game_scores(team_id).await })
    }

    fn member_game_scores(
        &self,
        member_id: Uuid,
    ) -> BoxFuture<'static, StorageResult<Vec<GameScoreEntity>>> {
        let store = self.clone();
        Box::pin(async move { store.member_game_scores(member_id).await })
    }

    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>> {
        Box::pin(async { Ok(()) })
    }

    fn try_reconnect(&self) -> BoxFuture<'static, StorageResult<()>> {
        Box::pin(async { Ok(()) })
    }
}
