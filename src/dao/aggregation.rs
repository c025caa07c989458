//! Leaderboard aggregation over raw score rows.
//!
//! Backends that cannot push the grouping down to the database (the in-memory store) run
//! these functions over a snapshot of their collections. The MongoDB backend expresses the
//! same rules as aggregation pipelines.
//!
//! Joins are inner joins: a group whose team, member or game no longer exists is dropped.
//! Ranked output is ordered by points descending, then by display name and id ascending.
//! A total that leaves the `i64` range is an error, as it is for the database.

use std::{cmp::Ordering, collections::HashMap};

use indexmap::IndexMap;
use uuid::Uuid;

use crate::dao::{
    models::{
        GameEntity, GameScoreEntity, MemberEntity, MemberStandingEntity, ScoreEntity, TeamEntity,
        TeamStandingEntity,
    },
    storage::{StorageError, StorageResult},
};

/// Sum team-level scores per team and rank the teams.
pub fn team_standings(
    scores: &[ScoreEntity],
    teams: &HashMap<Uuid, TeamEntity>,
) -> StorageResult<Vec<TeamStandingEntity>> {
    let totals = sum_by(
        scores.iter().filter(|score| score.member_id.is_none()),
        |score| Some(score.team_id),
    )?;

    let mut standings = totals
        .into_iter()
        .filter_map(|(team_id, total_points)| {
            let team = teams.get(&team_id)?;
            Some(TeamStandingEntity {
                team_id,
                team_name: team.name.clone(),
                total_points,
            })
        })
        .collect::<Vec<_>>();

    standings.sort_by(|a, b| {
        rank_order(
            (a.total_points, a.team_name.as_str(), a.team_id),
            (b.total_points, b.team_name.as_str(), b.team_id),
        )
    });
    Ok(standings)
}

/// Sum member-level scores per member and rank the members.
///
/// The team name comes from the member's current team, not from the team stored on the
/// score rows.
pub fn member_standings(
    scores: &[ScoreEntity],
    members: &HashMap<Uuid, MemberEntity>,
    teams: &HashMap<Uuid, TeamEntity>,
) -> StorageResult<Vec<MemberStandingEntity>> {
    let totals = sum_by(scores.iter(), |score| score.member_id)?;

    let mut standings = totals
        .into_iter()
        .filter_map(|(member_id, total_points)| {
            let member = members.get(&member_id)?;
            let team = teams.get(&member.team_id)?;
            Some(MemberStandingEntity {
                member_id,
                member_name: member.name.clone(),
                team_id: team.id,
                team_name: team.name.clone(),
                total_points,
            })
        })
        .collect::<Vec<_>>();

    standings.sort_by(|a, b| {
        rank_order(
            (a.total_points, a.member_name.as_str(), a.member_id),
            (b.total_points, b.member_name.as_str(), b.member_id),
        )
    });
    Ok(standings)
}

/// Per-game team-level scores of one team, best game first.
pub fn team_game_scores(
    scores: &[ScoreEntity],
    team_id: Uuid,
    games: &HashMap<Uuid, GameEntity>,
) -> Vec<GameScoreEntity> {
    game_breakdown(
        scores
            .iter()
            .filter(|score| score.team_id == team_id && score.member_id.is_none()),
        games,
    )
}

/// Per-game scores of one member, best game first.
pub fn member_game_scores(
    scores: &[ScoreEntity],
    member_id: Uuid,
    games: &HashMap<Uuid, GameEntity>,
) -> Vec<GameScoreEntity> {
    game_breakdown(
        scores
            .iter()
            .filter(|score| score.member_id == Some(member_id)),
        games,
    )
}

fn game_breakdown<'a>(
    scores: impl Iterator<Item = &'a ScoreEntity>,
    games: &HashMap<Uuid, GameEntity>,
) -> Vec<GameScoreEntity> {
    let mut rows = scores
        .filter_map(|score| {
            let game = games.get(&score.game_id)?;
            Some(GameScoreEntity {
                game_id: game.id,
                game_name: game.name.clone(),
                points: score.points,
            })
        })
        .collect::<Vec<_>>();

    rows.sort_by(|a, b| {
        rank_order(
            (a.points, a.game_name.as_str(), a.game_id),
            (b.points, b.game_name.as_str(), b.game_id),
        )
    });
    rows
}

/// Group rows by `key` (rows yielding `None` are skipped) and sum their points.
fn sum_by<'a>(
    scores: impl Iterator<Item = &'a ScoreEntity>,
    key: impl Fn(&ScoreEntity) -> Option<Uuid>,
) -> StorageResult<IndexMap<Uuid, i64>> {
    let mut totals = IndexMap::new();
    for score in scores {
        let Some(id) = key(score) else {
            continue;
        };
        let total = totals.entry(id).or_insert(0i64);
        *total = total
            .checked_add(score.points)
            .ok_or_else(|| StorageError::points_overflow("sum points"))?;
    }
    Ok(totals)
}

fn rank_order(a: (i64, &str, Uuid), b: (i64, &str, Uuid)) -> Ordering {
    b.0.cmp(&a.0)
        .then_with(|| a.1.cmp(b.1))
        .then_with(|| a.2.cmp(&b.2))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dao::models::ScoreKey;

    fn by_id<T, F: Fn(&T) -> Uuid>(items: Vec<T>, id: F) -> HashMap<Uuid, T> {
        items.into_iter().map(|item| (id(&item), item)).collect()
    }

    struct Fixture {
        red: TeamEntity,
        blue: TeamEntity,
        alice: MemberEntity,
        bob: MemberEntity,
        chess: GameEntity,
        darts: GameEntity,
    }

    impl Fixture {
        fn new() -> Self {
            let red = TeamEntity::new("Red".into());
            let blue = TeamEntity::new("Blue".into());
            let alice = MemberEntity::new("Alice".into(), "player".into(), red.id);
            let bob = MemberEntity::new("Bob".into(), "player".into(), blue.id);
            let chess = GameEntity::new("Chess".into(), None, None, 10);
            let darts = GameEntity::new("Darts".into(), Some("DRT".into()), None, 5);
            Self {
                red,
                blue,
                alice,
                bob,
                chess,
                darts,
            }
        }

        fn teams(&self) -> HashMap<Uuid, TeamEntity> {
            by_id(vec![self.red.clone(), self.blue.clone()], |t| t.id)
        }

        fn members(&self) -> HashMap<Uuid, MemberEntity> {
            by_id(vec![self.alice.clone(), self.bob.clone()], |m| m.id)
        }

        fn games(&self) -> HashMap<Uuid, GameEntity> {
            by_id(vec![self.chess.clone(), self.darts.clone()], |g| g.id)
        }
    }

    #[test]
    fn team_standings_only_count_team_level_rows() {
        let f = Fixture::new();
        let scores = vec![
            ScoreEntity::new(ScoreKey::team(f.chess.id, f.red.id), 10),
            ScoreEntity::new(ScoreKey::team(f.darts.id, f.red.id), 5),
            ScoreEntity::new(ScoreKey::team(f.chess.id, f.blue.id), 20),
            ScoreEntity::new(ScoreKey::member(f.chess.id, f.red.id, f.alice.id), 100),
        ];

        let standings = team_standings(&scores, &f.teams()).unwrap();

        assert_eq!(standings.len(), 2);
        assert_eq!(standings[0].team_name, "Blue");
        assert_eq!(standings[0].total_points, 20);
        assert_eq!(standings[1].team_name, "Red");
        assert_eq!(standings[1].total_points, 15);
    }

    #[test]
    fn member_standings_only_count_member_rows_and_join_current_team() {
        let f = Fixture::new();
        let scores = vec![
            ScoreEntity::new(ScoreKey::member(f.chess.id, f.red.id, f.alice.id), 3),
            ScoreEntity::new(ScoreKey::member(f.darts.id, f.red.id, f.alice.id), 4),
            ScoreEntity::new(ScoreKey::member(f.darts.id, f.blue.id, f.bob.id), 9),
            ScoreEntity::new(ScoreKey::team(f.chess.id, f.red.id), 50),
        ];

        let standings = member_standings(&scores, &f.members(), &f.teams()).unwrap();

        assert_eq!(
            standings
                .iter()
                .map(|s| (s.member_name.as_str(), s.team_name.as_str(), s.total_points))
                .collect::<Vec<_>>(),
            vec![("Bob", "Blue", 9), ("Alice", "Red", 7)]
        );
    }

    #[test]
    fn standings_drop_groups_whose_records_are_gone() {
        let f = Fixture::new();
        let ghost_team = Uuid::new_v4();
        let scores = vec![
            ScoreEntity::new(ScoreKey::team(f.chess.id, ghost_team), 99),
            ScoreEntity::new(ScoreKey::team(f.chess.id, f.red.id), 1),
        ];

        let standings = team_standings(&scores, &f.teams()).unwrap();

        assert_eq!(standings.len(), 1);
        assert_eq!(standings[0].team_id, f.red.id);
    }

    #[test]
    fn ties_are_broken_by_name() {
        let f = Fixture::new();
        let scores = vec![
            ScoreEntity::new(ScoreKey::team(f.chess.id, f.red.id), 10),
            ScoreEntity::new(ScoreKey::team(f.chess.id, f.blue.id), 10),
        ];

        let standings = team_standings(&scores, &f.teams()).unwrap();

        assert_eq!(standings[0].team_name, "Blue");
        assert_eq!(standings[1].team_name, "Red");
    }

    #[test]
    fn negative_totals_rank_last() {
        let f = Fixture::new();
        let scores = vec![
            ScoreEntity::new(ScoreKey::team(f.chess.id, f.red.id), -5),
            ScoreEntity::new(ScoreKey::team(f.chess.id, f.blue.id), 0),
        ];

        let standings = team_standings(&scores, &f.teams()).unwrap();

        assert_eq!(standings[0].team_id, f.blue.id);
        assert_eq!(standings[1].total_points, -5);
    }

    #[test]
    fn overflowing_total_is_an_error() {
        let f = Fixture::new();
        let scores = vec![
            ScoreEntity::new(ScoreKey::team(f.chess.id, f.red.id), i64::MAX),
            ScoreEntity::new(ScoreKey::team(f.darts.id, f.red.id), 1),
        ];

        let err = team_standings(&scores, &f.teams()).unwrap_err();

        assert!(matches!(err, StorageError::Backend { .. }));
    }

    #[test]
    fn team_breakdown_lists_one_row_per_game() {
        let f = Fixture::new();
        let scores = vec![
            ScoreEntity::new(ScoreKey::team(f.chess.id, f.red.id), 2),
            ScoreEntity::new(ScoreKey::team(f.darts.id, f.red.id), 8),
            ScoreEntity::new(ScoreKey::team(f.darts.id, f.blue.id), 30),
            ScoreEntity::new(ScoreKey::member(f.darts.id, f.red.id, f.alice.id), 40),
        ];

        let rows = team_game_scores(&scores, f.red.id, &f.games());

        assert_eq!(
            rows.iter()
                .map(|row| (row.game_name.as_str(), row.points))
                .collect::<Vec<_>>(),
            vec![("Darts", 8), ("Chess", 2)]
        );
    }

    #[test]
    fn member_breakdown_ignores_other_members() {
        let f = Fixture::new();
        let scores = vec![
            ScoreEntity::new(ScoreKey::member(f.chess.id, f.red.id, f.alice.id), 6),
            ScoreEntity::new(ScoreKey::member(f.chess.id, f.blue.id, f.bob.id), 7),
        ];

        let rows = member_game_scores(&scores, f.alice.id, &f.games());

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].game_id, f.chess.id);
        assert_eq!(rows[0].points, 6);
    }

    #[test]
    fn breakdown_skips_deleted_games() {
        let f = Fixture::new();
        let scores = vec![ScoreEntity::new(
            ScoreKey::team(Uuid::new_v4(), f.red.id),
            4,
        )];

        assert!(team_game_scores(&scores, f.red.id, &f.games()).is_empty());
    }
}
