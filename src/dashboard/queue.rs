//! Request queue page.

use serde::{Deserialize, Serialize};

use crate::api::{ApiClient, ApiRequest, ApiResult, Session};

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct QueueStats {
    pub pending: u64,
    pub in_flight: u64,
    pub completed: u64,
    pub failed: u64,
    pub avg_wait_ms: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct QueuedJob {
    pub id: String,
    pub status: String,
    #[serde(default)]
    pub provider: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub enqueued_at: Option<String>,
    #[serde(default)]
    pub attempts: u32,
}

pub async fn stats(client: &ApiClient, session: &Session) -> ApiResult<QueueStats> {
    client.get(session, "/api/queue/stats").await
}

pub async fn jobs(
    client: &ApiClient,
    session: &Session,
    status: Option<&str>,
    limit: Option<u32>,
) -> ApiResult<Vec<QueuedJob>> {
    let request = ApiRequest::get("/api/queue/jobs")
        .query_opt("status", status)
        .query_opt("limit", limit);
    client.send(session, request).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_tolerate_missing_fields() {
        let stats: QueueStats = serde_json::from_str(r#"{"pending":12}"#).unwrap();
        assert_eq!(stats.pending, 12);
        assert_eq!(stats.failed, 0);
        assert!(stats.avg_wait_ms.is_none());
    }
}
