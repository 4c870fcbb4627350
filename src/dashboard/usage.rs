//! Usage, billing and cost forecast pages.

use serde::{Deserialize, Serialize};

use crate::api::{ApiClient, ApiRequest, ApiResult, Session};

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct UsageLine {
    pub provider: String,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub requests: u64,
    #[serde(default)]
    pub input_tokens: u64,
    #[serde(default)]
    pub output_tokens: u64,
    #[serde(default)]
    pub cost_usd: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct UsageSummary {
    pub period: String,
    #[serde(default)]
    pub total_cost_usd: f64,
    #[serde(default)]
    pub lines: Vec<UsageLine>,
}

impl UsageSummary {
    /// Total tokens across all lines.
    pub fn total_tokens(&self) -> u64 {
        self.lines.iter().fold(0u64, |total, line| {
            total
                .saturating_add(line.input_tokens)
                .saturating_add(line.output_tokens)
        })
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CostForecast {
    pub month_to_date_usd: f64,
    pub projected_month_usd: f64,
    #[serde(default)]
    pub budget_usd: Option<f64>,
}

impl CostForecast {
    /// True when the projection exceeds the configured budget.
    pub fn over_budget(&self) -> bool {
        self.budget_usd
            .is_some_and(|budget| self.projected_month_usd > budget)
    }
}

pub async fn summary(client: &ApiClient, session: &Session, period: Option<&str>) -> ApiResult<UsageSummary> {
    let request = ApiRequest::get("/api/billing/usage").query_opt("period", period);
    client.send(session, request).await
}

pub async fn forecast(client: &ApiClient, session: &Session) -> ApiResult<CostForecast> {
    client.get(session, "/api/billing/forecast").await
}
