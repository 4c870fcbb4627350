//! Provider health page.

use serde::{Deserialize, Serialize};

use crate::api::{ApiClient, ApiResult, Session};

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ProviderHealth {
    pub provider: String,
    pub healthy: bool,
    #[serde(default)]
    pub latency_ms: Option<f64>,
    #[serde(default)]
    pub error_rate: Option<f64>,
    #[serde(default)]
    pub last_checked_at: Option<String>,
}

pub async fn list(client: &ApiClient, session: &Session) -> ApiResult<Vec<ProviderHealth>> {
    client.get(session, "/api/providers/health").await
}

/// Providers currently reported unhealthy.
pub fn unhealthy(providers: &[ProviderHealth]) -> Vec<&str> {
    providers
        .iter()
        .filter(|p| !p.healthy)
        .map(|p| p.provider.as_str())
        .collect()
}
