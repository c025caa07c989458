/// OpenAPI documentation generation.
pub mod documentation;
/// Game catalogue management.
pub mod game_service;
/// Health check service.
pub mod health_service;
/// Leaderboards and per-game breakdowns.
pub mod leaderboard_service;
/// Member management.
pub mod member_service;
/// Score submissions.
pub mod score_service;
/// Storage connection supervisor toggling degraded mode.
pub mod storage_supervisor;
/// Team management.
pub mod team_service;
