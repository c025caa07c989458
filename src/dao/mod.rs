/// Leaderboard grouping and ranking over raw score rows.
pub mod aggregation;
/// Database model definitions.
pub mod models;
/// Storage backends for teams, members, games and scores.
pub mod scoreboard_store;
/// Storage abstraction layer for database operations.
pub mod storage;
