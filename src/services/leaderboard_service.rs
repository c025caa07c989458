//! Ranked leaderboards and per-game breakdowns.

use uuid::Uuid;

use crate::{
    dto::leaderboard::{GameScore, LeaderboardQuery, MemberStanding, TeamStanding},
    error::ServiceError,
    state::SharedState,
};

fn apply_limit<T>(mut rows: Vec<T>, query: &LeaderboardQuery) -> Result<Vec<T>, ServiceError> {
    match query.limit {
        Some(0) => Err(ServiceError::InvalidInput(
            "limit must be a positive integer".into(),
        )),
        Some(limit) => {
            rows.truncate(limit);
            Ok(rows)
        }
        None => Ok(rows),
    }
}

/// Teams ranked by the sum of their team-level scores.
pub async fn team_leaderboard(
    state: &SharedState,
    query: LeaderboardQuery,
) -> Result<Vec<TeamStanding>, ServiceError> {
    let store = state.require_store().await?;
    let standings = store.team_standings().await?;
    let rows = standings.into_iter().map(Into::into).collect();
    apply_limit(rows, &query)
}

/// Members ranked by the sum of their member-level scores.
pub async fn member_leaderboard(
    state: &SharedState,
    query: LeaderboardQuery,
) -> Result<Vec<MemberStanding>, ServiceError> {
    let store = state.require_store().await?;
    let standings = store.member_standings().await?;
    let rows = standings.into_iter().map(Into::into).collect();
    apply_limit(rows, &query)
}

pub async fn team_details(
    state: &SharedState,
    team_id: Uuid,
) -> Result<Vec<GameScore>, ServiceError> {
    let store = state.require_store().await?;
    if store.find_team(team_id).await?.is_none() {
        return Err(ServiceError::NotFound(format!("team `{team_id}` not found")));
    }
    let rows = store.team_game_scores(team_id).await?;
    Ok(rows.into_iter().map(Into::into).collect())
}

pub async fn member_details(
    state: &SharedState,
    member_id: Uuid,
) -> Result<Vec<GameScore>, ServiceError> {
    let store = state.require_store().await?;
    if store.find_member(member_id).await?.is_none() {
        return Err(ServiceError::NotFound(format!(
            "member `{member_id}` not found"
        )));
    }
    let rows = store.member_game_scores(member_id).await?;
    Ok(rows.into_iter().map(Into::into).collect())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::{
        config::AppConfig,
        dao::{
            models::{GameEntity, MemberEntity, ScoreKey, TeamEntity},
            scoreboard_store::{ScoreboardStore, memory::MemoryScoreboardStore},
        },
        state::AppState,
    };

    struct Fixture {
        state: SharedState,
        red: TeamEntity,
        blue: TeamEntity,
        green: TeamEntity,
        alice: MemberEntity,
    }

    /// Red: 15 team points, Blue: 20 team points, Green: nothing, Alice (Red): 40 member points.
    async fn fixture() -> Fixture {
        let store = MemoryScoreboardStore::new();
        let state = AppState::new(AppConfig::default());
        state.install_store(Arc::new(store.clone())).await;

        let chess = GameEntity::new("Chess".into(), None, None, 10);
        let darts = GameEntity::new("Darts".into(), None, None, 5);
        let red = TeamEntity::new("Red".into());
        let blue = TeamEntity::new("Blue".into());
        let green = TeamEntity::new("Green".into());
        let alice = MemberEntity::new("Alice".into(), "player".into(), red.id);

        ScoreboardStore::insert_games(&store, vec![chess.clone(), darts.clone()])
            .await
            .unwrap();
        ScoreboardStore::insert_team(&store, red.clone()).await.unwrap();
        ScoreboardStore::insert_team(&store, blue.clone()).await.unwrap();
        ScoreboardStore::insert_team(&store, green.clone()).await.unwrap();
        ScoreboardStore::insert_members(&store, vec![alice.clone()])
            .await
            .unwrap();

        for (key, points) in [
            (ScoreKey::team(chess.id, red.id), 10),
            (ScoreKey::team(darts.id, red.id), 5),
            (ScoreKey::team(chess.id, blue.id), 20),
            (ScoreKey::member(darts.id, red.id, alice.id), 40),
        ] {
            ScoreboardStore::add_points(&store, key, points)
                .await
                .unwrap();
        }

        Fixture {
            state,
            red,
            blue,
            green,
            alice,
        }
    }

    #[tokio::test]
    async fn team_leaderboard_ignores_member_rows() {
        let f = fixture().await;
        let rows = team_leaderboard(&f.state, LeaderboardQuery::default())
            .await
            .unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!((rows[0].id, rows[0].total_points), (f.blue.id, 20));
        assert_eq!((rows[1].id, rows[1].total_points), (f.red.id, 15));
    }

    #[tokio::test]
    async fn member_leaderboard_carries_team_name() {
        let f = fixture().await;
        let rows = member_leaderboard(&f.state, LeaderboardQuery::default())
            .await
            .unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, f.alice.id);
        assert_eq!(rows[0].team_name, "Red");
        assert_eq!(rows[0].total_points, 40);
    }

    #[tokio::test]
    async fn limit_truncates_and_zero_is_invalid() {
        let f = fixture().await;
        let rows = team_leaderboard(&f.state, LeaderboardQuery { limit: Some(1) })
            .await
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].team_name, "Blue");

        let err = team_leaderboard(&f.state, LeaderboardQuery { limit: Some(0) })
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn team_details_list_games_by_points() {
        let f = fixture().await;
        let rows = team_details(&f.state, f.red.id).await.unwrap();
        assert_eq!(
            rows.iter()
                .map(|row| (row.game_name.as_str(), row.points))
                .collect::<Vec<_>>(),
            vec![("Chess", 10), ("Darts", 5)]
        );
    }

    #[tokio::test]
    async fn details_require_a_known_entity() {
        let f = fixture().await;
        assert_eq!(member_details(&f.state, f.alice.id).await.unwrap().len(), 1);
        assert!(team_details(&f.state, f.green.id).await.unwrap().is_empty());
        assert!(matches!(
            team_details(&f.state, Uuid::new_v4()).await,
            Err(ServiceError::NotFound(_))
        ));
        assert!(matches!(
            member_details(&f.state, Uuid::new_v4()).await,
            Err(ServiceError::NotFound(_))
        ));
    }
}
