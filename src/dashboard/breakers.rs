//! Circuit breaker page.
//!
//! Breaker state is owned by the backend; the console only displays it and
//! can ask for a manual reset.

use serde::{Deserialize, Serialize};

use crate::api::{segment, ApiClient, ApiRequest, ApiResult, Session};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BreakerState {
    Closed,
    Open,
    HalfOpen,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CircuitBreaker {
    pub provider: String,
    pub state: BreakerState,
    #[serde(default)]
    pub failure_count: u32,
    #[serde(default)]
    pub failure_threshold: Option<u32>,
    #[serde(default)]
    pub last_failure_at: Option<String>,
    #[serde(default)]
    pub next_attempt_at: Option<String>,
}

pub async fn list(client: &ApiClient, session: &Session) -> ApiResult<Vec<CircuitBreaker>> {
    client.get(session, "/api/circuit-breakers").await
}

/// Force a breaker back to closed.
pub async fn reset(client: &ApiClient, session: &Session, provider: &str) -> ApiResult<CircuitBreaker> {
    let path = format!("/api/circuit-breakers/{}/reset", segment(provider)?);
    client.send(session, ApiRequest::post(path)).await
}
