use std::{future::Future, sync::Arc};

use futures::{TryStreamExt, future::BoxFuture};
use mongodb::{
    Client, Collection, Database, IndexModel,
    bson::{DateTime, Document, doc},
    error::Error as MongoError,
    options::{Collation, CollationStrength, IndexOptions, ReturnDocument},
};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{
    config::MongoConfig,
    connection::establish_connection,
    error::{MongoDaoError, MongoResult, is_duplicate_key},
    models::{
        GameScoreRow, MemberStandingRow, MongoGameDocument, MongoMemberDocument,
        MongoScoreDocument, MongoTeamDocument, TeamStandingRow, doc_id, score_key_filter,
        to_bson_uuid, uuid_list,
    },
    pipelines::{self, GAME_COLLECTION, MEMBER_COLLECTION, SCORE_COLLECTION, TEAM_COLLECTION},
};
use crate::dao::{
    models::{
        GameEntity, GameScoreEntity, MemberEntity, MemberStandingEntity, ScoreEntity, ScoreKey,
        TeamEntity, TeamStandingEntity,
    },
    scoreboard_store::ScoreboardStore,
    storage::StorageResult,
};

/// MongoDB-backed [`ScoreboardStore`].
#[derive(Clone)]
pub struct MongoScoreboardStore {
    inner: Arc<MongoInner>,
}

struct MongoInner {
    state: RwLock<MongoState>,
    config: MongoConfig,
}

struct MongoState {
    client: Client,
    database: Database,
}

impl MongoInner {
    async fn ping(&self) -> MongoResult<()> {
        let database = {
            let guard = self.state.read().await;
            guard.database.clone()
        };

        database
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|source| MongoDaoError::HealthPing { source })?;
        Ok(())
    }

    async fn reconnect(&self) -> MongoResult<()> {
        let (client, database) = establish_connection(&self.config).await?;
        let previous = {
            let mut guard = self.state.write().await;
            guard.database = database;
            std::mem::replace(&mut guard.client, client)
        };
        // In-flight requests on the old client fail fast instead of holding the reconnect.
        previous.shutdown().immediate(true).await;
        Ok(())
    }
}

/// Case-insensitive comparison used by the unique name indexes and name lookups.
fn case_insensitive() -> Collation {
    Collation::builder()
        .locale("en".to_string())
        .strength(Some(CollationStrength::Secondary))
        .build()
}

/// Run `operation`, and run it a second time when its first error satisfies `retry`.
async fn retry_once_if<T, E, F, Fut>(
    mut operation: F,
    retry: impl Fn(&E) -> bool,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    match operation().await {
        Err(err) if retry(&err) => operation().await,
        outcome => outcome,
    }
}

fn unique_name_index(name: &str) -> IndexModel {
    IndexModel::builder()
        .keys(doc! {"name": 1})
        .options(
            IndexOptions::builder()
                .name(Some(name.to_owned()))
                .unique(Some(true))
                .collation(Some(case_insensitive()))
                .build(),
        )
        .build()
}

impl MongoScoreboardStore {
    /// Establish a connection to MongoDB and ensure indexes are present.
    pub async fn connect(config: MongoConfig) -> MongoResult<Self> {
        let (client, database) = establish_connection(&config).await?;

        let inner = Arc::new(MongoInner {
            state: RwLock::new(MongoState { client, database }),
            config,
        });

        let store = Self { inner };
        store.ensure_indexes().await?;
        Ok(store)
    }

    async fn ensure_indexes(&self) -> MongoResult<()> {
        let database = self.database().await;

        database
            .collection::<Document>(TEAM_COLLECTION)
            .create_index(unique_name_index("team_name_idx"))
            .await
            .map_err(|source| MongoDaoError::EnsureIndex {
                collection: TEAM_COLLECTION,
                index: "name",
                source,
            })?;

        database
            .collection::<Document>(GAME_COLLECTION)
            .create_index(unique_name_index("game_name_idx"))
            .await
            .map_err(|source| MongoDaoError::EnsureIndex {
                collection: GAME_COLLECTION,
                index: "name",
                source,
            })?;

        let member_index = IndexModel::builder()
            .keys(doc! {"team": 1})
            .options(
                IndexOptions::builder()
                    .name(Some("member_team_idx".to_owned()))
                    .build(),
            )
            .build();
        database
            .collection::<Document>(MEMBER_COLLECTION)
            .create_index(member_index)
            .await
            .map_err(|source| MongoDaoError::EnsureIndex {
                collection: MEMBER_COLLECTION,
                index: "team",
                source,
            })?;

        // Team-level rows store `member: null`, so they are covered by the unique key too.
        let score_index = IndexModel::builder()
            .keys(doc! {"game": 1, "team": 1, "member": 1})
            .options(
                IndexOptions::builder()
                    .name(Some("score_key_idx".to_owned()))
                    .unique(Some(true))
                    .build(),
            )
            .build();
        database
            .collection::<Document>(SCORE_COLLECTION)
            .create_index(score_index)
            .await
            .map_err(|source| MongoDaoError::EnsureIndex {
                collection: SCORE_COLLECTION,
                index: "game,team,member",
                source,
            })?;

        Ok(())
    }

    async fn database(&self) -> Database {
        let guard = self.inner.state.read().await;
        guard.database.clone()
    }

    async fn teams(&self) -> Collection<MongoTeamDocument> {
        self.database().await.collection(TEAM_COLLECTION)
    }

    async fn members(&self) -> Collection<MongoMemberDocument> {
        self.database().await.collection(MEMBER_COLLECTION)
    }

    async fn games(&self) -> Collection<MongoGameDocument> {
        self.database().await.collection(GAME_COLLECTION)
    }

    async fn scores(&self) -> Collection<MongoScoreDocument> {
        self.database().await.collection(SCORE_COLLECTION)
    }

    async fn insert_team(&self, team: TeamEntity) -> MongoResult<()> {
        let document: MongoTeamDocument = team.into();
        self.teams()
            .await
            .insert_one(&document)
            .await
            .map_err(MongoDaoError::write(TEAM_COLLECTION, "insert team", "name"))?;
        Ok(())
    }

    async fn find_team(&self, id: Uuid) -> MongoResult<Option<TeamEntity>> {
        let document = self
            .teams()
            .await
            .find_one(doc_id(id))
            .await
            .map_err(MongoDaoError::operation(TEAM_COLLECTION, "load team"))?;
        Ok(document.map(Into::into))
    }

    async fn find_team_by_name(&self, name: String) -> MongoResult<Option<TeamEntity>> {
        let document = self
            .teams()
            .await
            .find_one(doc! {"name": name})
            .collation(case_insensitive())
            .await
            .map_err(MongoDaoError::operation(TEAM_COLLECTION, "load team by name"))?;
        Ok(document.map(Into::into))
    }

    async fn find_teams(&self, ids: Vec<Uuid>) -> MongoResult<Vec<TeamEntity>> {
        let documents: Vec<MongoTeamDocument> = self
            .teams()
            .await
            .find(doc! {"_id": {"$in": uuid_list(&ids)}})
            .await
            .map_err(MongoDaoError::operation(TEAM_COLLECTION, "load teams"))?
            .try_collect()
            .await
            .map_err(MongoDaoError::operation(TEAM_COLLECTION, "load teams"))?;
        Ok(documents.into_iter().map(Into::into).collect())
    }

    async fn list_teams(&self) -> MongoResult<Vec<TeamEntity>> {
        let documents: Vec<MongoTeamDocument> = self
            .teams()
            .await
            .find(doc! {})
            .sort(doc! {"created_at": -1})
            .await
            .map_err(MongoDaoError::operation(TEAM_COLLECTION, "list teams"))?
            .try_collect()
            .await
            .map_err(MongoDaoError::operation(TEAM_COLLECTION, "list teams"))?;
        Ok(documents.into_iter().map(Into::into).collect())
    }

    async fn update_team(&self, team: TeamEntity) -> MongoResult<bool> {
        let id = team.id;
        let document: MongoTeamDocument = team.into();
        let result = self
            .teams()
            .await
            .replace_one(doc_id(id), &document)
            .await
            .map_err(MongoDaoError::write(TEAM_COLLECTION, "update team", "name"))?;
        Ok(result.matched_count > 0)
    }

    async fn delete_team(&self, id: Uuid) -> MongoResult<bool> {
        let result = self
            .teams()
            .await
            .delete_one(doc_id(id))
            .await
            .map_err(MongoDaoError::operation(TEAM_COLLECTION, "delete team"))?;
        Ok(result.deleted_count > 0)
    }

    async fn push_team_members(&self, team_id: Uuid, member_ids: Vec<Uuid>) -> MongoResult<()> {
        self.teams()
            .await
            .update_one(
                doc_id(team_id),
                doc! {
                    "$addToSet": {"members": {"$each": uuid_list(&member_ids)}},
                    "$set": {"updated_at": DateTime::now()},
                },
            )
            .await
            .map_err(MongoDaoError::operation(TEAM_COLLECTION, "add team members"))?;
        Ok(())
    }

    async fn pull_team_member(&self, team_id: Uuid, member_id: Uuid) -> MongoResult<()> {
        self.teams()
            .await
            .update_one(
                doc_id(team_id),
                doc! {
                    "$pull": {"members": to_bson_uuid(member_id)},
                    "$set": {"updated_at": DateTime::now()},
                },
            )
            .await
            .map_err(MongoDaoError::operation(TEAM_COLLECTION, "remove team member"))?;
        Ok(())
    }

    async fn insert_members(&self, members: Vec<MemberEntity>) -> MongoResult<()> {
        if members.is_empty() {
            return Ok(());
        }
        let documents = members
            .into_iter()
            .map(MongoMemberDocument::from)
            .collect::<Vec<_>>();
        self.members()
            .await
            .insert_many(documents)
            .await
            .map_err(MongoDaoError::write(MEMBER_COLLECTION, "insert members", "id"))?;
        Ok(())
    }

    async fn find_member(&self, id: Uuid) -> MongoResult<Option<MemberEntity>> {
        let document = self
            .members()
            .await
            .find_one(doc_id(id))
            .await
            .map_err(MongoDaoError::operation(MEMBER_COLLECTION, "load member"))?;
        Ok(document.map(Into::into))
    }

    async fn find_members_matching(
        &self,
        filter: Document,
        collation: Option<Collation>,
        operation: &'static str,
    ) -> MongoResult<Vec<MemberEntity>> {
        let members = self.members().await;
        let mut find = members.find(filter).sort(doc! {"created_at": -1});
        if let Some(collation) = collation {
            find = find.collation(collation);
        }
        let documents: Vec<MongoMemberDocument> = find
            .await
            .map_err(MongoDaoError::operation(MEMBER_COLLECTION, operation))?
            .try_collect()
            .await
            .map_err(MongoDaoError::operation(MEMBER_COLLECTION, operation))?;
        Ok(documents.into_iter().map(Into::into).collect())
    }

    async fn update_member(&self, member: MemberEntity) -> MongoResult<bool> {
        let id = member.id;
        let document: MongoMemberDocument = member.into();
        let result = self
            .members()
            .await
            .replace_one(doc_id(id), &document)
            .await
            .map_err(MongoDaoError::operation(MEMBER_COLLECTION, "update member"))?;
        Ok(result.matched_count > 0)
    }

    async fn delete_member(&self, id: Uuid) -> MongoResult<bool> {
        let result = self
            .members()
            .await
            .delete_one(doc_id(id))
            .await
            .map_err(MongoDaoError::operation(MEMBER_COLLECTION, "delete member"))?;
        Ok(result.deleted_count > 0)
    }

    async fn insert_games(&self, games: Vec<GameEntity>) -> MongoResult<()> {
        if games.is_empty() {
            return Ok(());
        }
        let documents = games
            .into_iter()
            .map(MongoGameDocument::from)
            .collect::<Vec<_>>();
        self.games()
            .await
            .insert_many(documents)
            .await
            .map_err(MongoDaoError::write(GAME_COLLECTION, "insert games", "name"))?;
        Ok(())
    }

    async fn find_game(&self, id: Uuid) -> MongoResult<Option<GameEntity>> {
        let document = self
            .games()
            .await
            .find_one(doc_id(id))
            .await
            .map_err(MongoDaoError::operation(GAME_COLLECTION, "load game"))?;
        Ok(document.map(Into::into))
    }

    async fn find_games_by_names(&self, names: Vec<String>) -> MongoResult<Vec<GameEntity>> {
        let documents: Vec<MongoGameDocument> = self
            .games()
            .await
            .find(doc! {"name": {"$in": names}})
            .collation(case_insensitive())
            .await
            .map_err(MongoDaoError::operation(GAME_COLLECTION, "load games by name"))?
            .try_collect()
            .await
            .map_err(MongoDaoError::operation(GAME_COLLECTION, "load games by name"))?;
        Ok(documents.into_iter().map(Into::into).collect())
    }

    async fn list_games(&self) -> MongoResult<Vec<GameEntity>> {
        let documents: Vec<MongoGameDocument> = self
            .games()
            .await
            .find(doc! {})
            .sort(doc! {"created_at": -1})
            .await
            .map_err(MongoDaoError::operation(GAME_COLLECTION, "list games"))?
            .try_collect()
            .await
            .map_err(MongoDaoError::operation(GAME_COLLECTION, "list games"))?;
        Ok(documents.into_iter().map(Into::into).collect())
    }

    async fn update_game(&self, game: GameEntity) -> MongoResult<bool> {
        let id = game.id;
        let document: MongoGameDocument = game.into();
        let result = self
            .games()
            .await
            .replace_one(doc_id(id), &document)
            .await
            .map_err(MongoDaoError::write(GAME_COLLECTION, "update game", "name"))?;
        Ok(result.matched_count > 0)
    }

    async fn delete_game(&self, id: Uuid) -> MongoResult<bool> {
        let result = self
            .games()
            .await
            .delete_one(doc_id(id))
            .await
            .map_err(MongoDaoError::operation(GAME_COLLECTION, "delete game"))?;
        Ok(result.deleted_count > 0)
    }

    /// Single `$inc` upsert: the key fields of the filter are copied into a freshly created
    /// row, so concurrent submissions for the same key never lose points. Two upserts racing
    /// to create the row can trip the unique key index; the loser runs once more and then
    /// finds the row.
    async fn add_points(&self, key: ScoreKey, delta: i64) -> MongoResult<ScoreEntity> {
        let document = retry_once_if(|| self.upsert_points(&key, delta), is_duplicate_key)
            .await
            .map_err(MongoDaoError::write(
                SCORE_COLLECTION,
                "add points",
                "game,team,member",
            ))?;

        document
            .map(Into::into)
            .ok_or(MongoDaoError::MissingUpsert {
                collection: SCORE_COLLECTION,
            })
    }

    async fn upsert_points(
        &self,
        key: &ScoreKey,
        delta: i64,
    ) -> Result<Option<MongoScoreDocument>, MongoError> {
        let now = DateTime::now();
        let update = doc! {
            "$inc": {"points": delta},
            "$set": {"updated_at": now},
            "$setOnInsert": {"_id": to_bson_uuid(Uuid::new_v4()), "created_at": now},
        };

        self.scores()
            .await
            .find_one_and_update(score_key_filter(key), update)
            .upsert(true)
            .return_document(ReturnDocument::After)
            .await
    }

    async fn list_scores(&self) -> MongoResult<Vec<ScoreEntity>> {
        let documents: Vec<MongoScoreDocument> = self
            .scores()
            .await
            .find(doc! {})
            .sort(doc! {"created_at": -1})
            .await
            .map_err(MongoDaoError::operation(SCORE_COLLECTION, "list scores"))?
            .try_collect()
            .await
            .map_err(MongoDaoError::operation(SCORE_COLLECTION, "list scores"))?;
        Ok(documents.into_iter().map(Into::into).collect())
    }

    async fn delete_score(&self, id: Uuid) -> MongoResult<bool> {
        let result = self
            .scores()
            .await
            .delete_one(doc_id(id))
            .await
            .map_err(MongoDaoError::operation(SCORE_COLLECTION, "delete score"))?;
        Ok(result.deleted_count > 0)
    }

    async fn aggregate_scores<Row, Entity>(
        &self,
        pipeline: Vec<Document>,
        operation: &'static str,
    ) -> MongoResult<Vec<Entity>>
    where
        Row: serde::de::DeserializeOwned + Send + Sync,
        Entity: From<Row>,
    {
        let rows: Vec<Row> = self
            .scores()
            .await
            .aggregate(pipeline)
            .with_type::<Row>()
            .await
            .map_err(MongoDaoError::operation(SCORE_COLLECTION, operation))?
            .try_collect()
            .await
            .map_err(MongoDaoError::operation(SCORE_COLLECTION, operation))?;
        Ok(rows.into_iter().map(Into::into).collect())
    }
}

impl ScoreboardStore for MongoScoreboardStore {
    fn insert_team(&self, team: TeamEntity) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move { store.insert_team(team).await.map_err(Into::into) })
    }

    fn find_team(&self, id: Uuid) -> BoxFuture<'static, StorageResult<Option<TeamEntity>>> {
        let store = self.clone();
        Box::pin(async move { store.find_team(id).await.map_err(Into::into) })
    }

    fn find_team_by_name(
        &self,
        name: String,
    ) -> BoxFuture<'static, StorageResult<Option<TeamEntity>>> {
        let store = self.clone();
        Box::pin(async move { store.find_team_by_name(name).await.map_err(Into::into) })
    }

    fn find_teams(&self, ids: Vec<Uuid>) -> BoxFuture<'static, StorageResult<Vec<TeamEntity>>> {
        let store = self.clone();
        Box::pin(async move { store.find_teams(ids).await.map_err(Into::into) })
    }

    fn list_teams(&self) -> BoxFuture<'static, StorageResult<Vec<TeamEntity>>> {
        let store = self.clone();
        Box::pin(async move { store.list_teams().await.map_err(Into::into) })
    }

    fn update_team(&self, team: TeamEntity) -> BoxFuture<'static, StorageResult<bool>> {
        let store = self.clone();
        Box::pin(async move { store.update_team(team).await.map_err(Into::into) })
    }

    fn delete_team(&self, id: Uuid) -> BoxFuture<'static, StorageResult<bool>> {
        let store = self.clone();
        Box::pin(async move { store.delete_team(id).await.map_err(Into::into) })
    }

    fn push_team_members(
        &self,
        team_id: Uuid,
        member_ids: Vec<Uuid>,
    ) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move {
            store
                .push_team_members(team_id, member_ids)
                .await
                .map_err(Into::into)
        })
    }

    fn pull_team_member(
        &self,
        team_id: Uuid,
        member_id: Uuid,
    ) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move {
            store
                .pull_team_member(team_id, member_id)
                .await
                .map_err(Into::into)
        })
    }

    fn insert_members(&self, members: Vec<MemberEntity>) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move { store.insert_members(members).await.map_err(Into::into) })
    }

    fn find_member(&self, id: Uuid) -> BoxFuture<'static, StorageResult<Option<MemberEntity>>> {
        let store = self.clone();
        Box::pin(async move { store.find_member(id).await.map_err(Into::into) })
    }

    fn find_members(
        &self,
        ids: Vec<Uuid>,
    ) -> BoxFuture<'static, StorageResult<Vec<MemberEntity>>> {
        let store = self.clone();
        Box::pin(async move {
            store
                .find_members_matching(doc! {"_id": {"$in": uuid_list(&ids)}}, None, "load members")
                .await
                .map_err(Into::into)
        })
    }

    fn find_members_by_names(
        &self,
        names: Vec<String>,
    ) -> BoxFuture<'static, StorageResult<Vec<MemberEntity>>> {
        let store = self.clone();
        Box::pin(async move {
            store
                .find_members_matching(
                    doc! {"name": {"$in": names}},
                    Some(case_insensitive()),
                    "load members by name",
                )
                .await
                .map_err(Into::into)
        })
    }

    fn list_members(
        &self,
        team_id: Option<Uuid>,
    ) -> BoxFuture<'static, StorageResult<Vec<MemberEntity>>> {
        let store = self.clone();
        let filter = match team_id {
            Some(team_id) => doc! {"team": to_bson_uuid(team_id)},
            None => doc! {},
        };
        Box::pin(async move {
            store
                .find_members_matching(filter, None, "list members")
                .await
                .map_err(Into::into)
        })
    }

    fn update_member(&self, member: MemberEntity) -> BoxFuture<'static, StorageResult<bool>> {
        let store = self.clone();
        Box::pin(async move { store.update_member(member).await.map_err(Into::into) })
    }

    fn delete_member(&self, id: Uuid) -> BoxFuture<'static, StorageResult<bool>> {
        let store = self.clone();
        Box::pin(async move { store.delete_member(id).await.map_err(Into::into) })
    }

    fn insert_games(&self, games: Vec<GameEntity>) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move { store.insert_games(games).await.map_err(Into::into) })
    }

    fn find_game(&self, id: Uuid) -> BoxFuture<'static, StorageResult<Option<GameEntity>>> {
        let store = self.clone();
        Box::pin(async move { store.find_game(id).await.map_err(Into::into) })
    }

    fn find_games_by_names(
        &self,
        names: Vec<String>,
    ) -> BoxFuture<'static, StorageResult<Vec<GameEntity>>> {
        let store = self.clone();
        Box::pin(async move { store.find_games_by_names(names).await.map_err(Into::into) })
    }

    fn list_games(&self) -> BoxFuture<'static, StorageResult<Vec<GameEntity>>> {
        let store = self.clone();
        Box::pin(async move { store.list_games().await.map_err(Into::into) })
    }

    fn update_game(&self, game: GameEntity) -> BoxFuture<'static, StorageResult<bool>> {
        let store = self.clone();
        Box::pin(async move { store.update_game(game).await.map_err(Into::into) })
    }

    fn delete_game(&self, id: Uuid) -> BoxFuture<'static, StorageResult<bool>> {
        let store = self.clone();
        Box::pin(async move { store.delete_game(id).await.map_err(Into::into) })
    }

    fn add_points(
        &self,
        key: ScoreKey,
        delta: i64,
    ) -> BoxFuture<'static, StorageResult<ScoreEntity>> {
        let store = self.clone();
        Box::pin(async move { store.add_points(key, delta).await.map_err(Into::into) })
    }

    fn list_scores(&self) -> BoxFuture<'static, StorageResult<Vec<ScoreEntity>>> {
        let store = self.clone();
        Box::pin(async move { store.list_scores().await.map_err(Into::into) })
    }

    fn delete_score(&self, id: Uuid) -> BoxFuture<'static, StorageResult<bool>> {
        let store = self.clone();
        Box::pin(async move { store.delete_score(id).await.map_err(Into::into) })
    }

    fn team_standings(&self) -> BoxFuture<'static, StorageResult<Vec<TeamStandingEntity>>> {
        let store = self.clone();
        Box::pin(async move {
            store
                .aggregate_scores::<TeamStandingRow, TeamStandingEntity>(
                    pipelines::team_standings(),
                    "aggregate team standings",
                )
                .await
                .map_err(Into::into)
        })
    }

    fn member_standings(&self) -> BoxFuture<'static, StorageResult<Vec<MemberStandingEntity>>> {
        let store = self.clone();
        Box::pin(async move {
            store
                .aggregate_scores::<MemberStandingRow, MemberStandingEntity>(
                    pipelines::member_standings(),
                    "aggregate member standings",
                )
                .await
                .map_err(Into::into)
        })
    }

    fn team_game_scores(
        &self,
        team_id: Uuid,
    ) -> BoxFuture<'static, StorageResult<Vec<GameScoreEntity>>> {
        let store = self.clone();
        Box::pin(async move {
            store
                .aggregate_scores::<GameScoreRow, GameScoreEntity>(
                    pipelines::team_game_scores(team_id),
                    "aggregate team game scores",
                )
                .await
                .map_err(Into::into)
        })
    }

    fn member_game_scores(
        &self,
        member_id: Uuid,
    ) -> BoxFuture<'static, StorageResult<Vec<GameScoreEntity>>> {
        let store = self.clone();
        Box::pin(async move {
            store
                .aggregate_scores::<GameScoreRow, GameScoreEntity>(
                    pipelines::member_game_scores(member_id),
                    "aggregate member game scores",
                )
                .await
                .map_err(Into::into)
        })
    }

    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move { store.inner.ping().await.map_err(Into::into) })
    }

    fn try_reconnect(&self) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move { store.inner.reconnect().await.map_err(Into::into) })
    }
}
