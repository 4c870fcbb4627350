//! Inference request log page.

use serde::{Deserialize, Serialize};

use crate::api::{ApiClient, ApiRequest, ApiResult, Session};

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct InferenceRequest {
    pub id: String,
    pub provider: String,
    pub model: String,
    pub status: String,
    #[serde(default)]
    pub latency_ms: Option<u64>,
    #[serde(default)]
    pub input_tokens: Option<u64>,
    #[serde(default)]
    pub output_tokens: Option<u64>,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    #[serde(default)]
    pub total: Option<u64>,
}

/// Filters for the request log.
#[derive(Debug, Clone, Default)]
pub struct RequestFilter {
    pub limit: Option<u32>,
    pub offset: Option<u32>,
    pub provider: Option<String>,
    pub status: Option<String>,
}

pub async fn list(
    client: &ApiClient,
    session: &Session,
    filter: &RequestFilter,
) -> ApiResult<Page<InferenceRequest>> {
    let request = ApiRequest::get("/api/inference/requests")
        .query_opt("limit", filter.limit)
        .query_opt("offset", filter.offset)
        .query_opt("provider", filter.provider.as_deref())
        .query_opt("status", filter.status.as_deref());
    client.send(session, request).await
}
