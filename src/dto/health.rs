use serde::Serialize;
use utoipa::ToSchema;

/// Whether data routes are currently served.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Ok,
    /// No usable store; data routes answer 503.
    Degraded,
}

/// Body of the `/healthcheck` route.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: HealthStatus,
    /// Result of the ping issued while answering; `false` when no store is installed.
    pub store_reachable: bool,
}

impl HealthResponse {
    pub fn new(degraded: bool, store_reachable: bool) -> Self {
        let status = if degraded {
            HealthStatus::Degraded
        } else {
            HealthStatus::Ok
        };
        Self {
            status,
            store_reachable,
        }
    }
}
