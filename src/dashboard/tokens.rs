//! API token management page.

use serde::{Deserialize, Serialize};

use crate::api::{segment, ApiClient, ApiRequest, ApiResult, Session};

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ApiToken {
    pub id: String,
    pub name: String,
    /// First characters of the secret, for recognising a token.
    #[serde(default)]
    pub prefix: Option<String>,
    #[serde(default)]
    pub scopes: Vec<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub last_used_at: Option<String>,
    #[serde(default)]
    pub expires_at: Option<String>,
    #[serde(default)]
    pub revoked: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewToken {
    pub name: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub scopes: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_in_days: Option<u32>,
}

/// A freshly created token. The secret is only ever returned once.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CreatedToken {
    pub token: ApiToken,
    pub secret: String,
}

pub async fn list(client: &ApiClient, session: &Session) -> ApiResult<Vec<ApiToken>> {
    client.get(session, "/api/tokens").await
}

pub async fn create(client: &ApiClient, session: &Session, new: &NewToken) -> ApiResult<CreatedToken> {
    client.post(session, "/api/tokens", new).await
}

pub async fn revoke(client: &ApiClient, session: &Session, id: &str) -> ApiResult<()> {
    let path = format!("/api/tokens/{}", segment(id)?);
    let _: serde_json::Value = client.send(session, ApiRequest::delete(path)).await?;
    Ok(())
}
