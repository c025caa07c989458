use serde::{Deserialize, Serialize};
use std::time::SystemTime;
use uuid::Uuid;

/// Team registered on the scoreboard.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TeamEntity {
    /// Stable identifier for the team.
    pub id: Uuid,
    /// Display name, unique across teams regardless of case.
    pub name: String,
    /// Members attached to the team, in the order they joined.
    pub members: Vec<Uuid>,
    /// Creation timestamp.
    pub created_at: SystemTime,
    /// Last time the team was updated.
    pub updated_at: SystemTime,
}

impl TeamEntity {
    /// Build a brand-new team without members.
    pub fn new(name: String) -> Self {
        let now = SystemTime::now();
        Self {
            id: Uuid::new_v4(),
            name,
            members: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Individual player (or staff member) belonging to a team.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MemberEntity {
    /// Stable identifier for the member.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Free-form role, "player" unless configured otherwise.
    pub role: String,
    /// Owning team.
    pub team_id: Uuid,
    /// Creation timestamp.
    pub created_at: SystemTime,
    /// Last time the member was updated.
    pub updated_at: SystemTime,
}

impl MemberEntity {
    /// Build a brand-new member of `team_id`.
    pub fn new(name: String, role: String, team_id: Uuid) -> Self {
        let now = SystemTime::now();
        Self {
            id: Uuid::new_v4(),
            name,
            role,
            team_id,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Game (event, discipline) points are scored in.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameEntity {
    /// Stable identifier for the game.
    pub id: Uuid,
    /// Display name, unique across games regardless of case.
    pub name: String,
    /// Optional abbreviation shown in compact tables.
    pub short_name: Option<String>,
    /// Optional description.
    pub description: Option<String>,
    /// Default number of points awarded when a score submission omits them.
    pub points: i64,
    /// Creation timestamp.
    pub created_at: SystemTime,
    /// Last time the game was updated.
    pub updated_at: SystemTime,
}

impl GameEntity {
    /// Build a brand-new game.
    pub fn new(
        name: String,
        short_name: Option<String>,
        description: Option<String>,
        points: i64,
    ) -> Self {
        let now = SystemTime::now();
        Self {
            id: Uuid::new_v4(),
            name,
            short_name,
            description,
            points,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Identifies a single score row: one per game, team and optional member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScoreKey {
    /// Game the points were earned in.
    pub game_id: Uuid,
    /// Team the points belong to.
    pub team_id: Uuid,
    /// Member the points belong to; `None` for team-level scores.
    pub member_id: Option<Uuid>,
}

impl ScoreKey {
    /// Key of the team-level score row.
    pub fn team(game_id: Uuid, team_id: Uuid) -> Self {
        Self {
            game_id,
            team_id,
            member_id: None,
        }
    }

    /// Key of a member-level score row.
    pub fn member(game_id: Uuid, team_id: Uuid, member_id: Uuid) -> Self {
        Self {
            game_id,
            team_id,
            member_id: Some(member_id),
        }
    }
}

/// Accumulated points for one [`ScoreKey`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScoreEntity {
    /// Stable identifier for the row.
    pub id: Uuid,
    /// Game the points were earned in.
    pub game_id: Uuid,
    /// Team the points belong to.
    pub team_id: Uuid,
    /// Member the points belong to; `None` for team-level scores.
    pub member_id: Option<Uuid>,
    /// Running total.
    pub points: i64,
    /// Creation timestamp (first submission).
    pub created_at: SystemTime,
    /// Last submission timestamp.
    pub updated_at: SystemTime,
}

impl ScoreEntity {
    /// Build the first row for `key` holding `points`.
    pub fn new(key: ScoreKey, points: i64) -> Self {
        let now = SystemTime::now();
        Self {
            id: Uuid::new_v4(),
            game_id: key.game_id,
            team_id: key.team_id,
            member_id: key.member_id,
            points,
            created_at: now,
            updated_at: now,
        }
    }

    /// Key identifying this row.
    pub fn key(&self) -> ScoreKey {
        ScoreKey {
            game_id: self.game_id,
            team_id: self.team_id,
            member_id: self.member_id,
        }
    }
}

/// Team leaderboard row: sum of the team-level scores of one team.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamStandingEntity {
    pub team_id: Uuid,
    pub team_name: String,
    pub total_points: i64,
}

/// Member leaderboard row: sum of the scores of one member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberStandingEntity {
    pub member_id: Uuid,
    pub member_name: String,
    pub team_id: Uuid,
    pub team_name: String,
    pub total_points: i64,
}

/// Per-game breakdown row for a single team or member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameScoreEntity {
    pub game_id: Uuid,
    pub game_name: String,
    pub points: i64,
}
