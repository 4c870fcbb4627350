//! Signed-in user identity as reported by the identity probe.
//!
//! Any 2xx probe response means the session is valid. The body is read
//! leniently: backends differ in id types, wrap the user in `user`/`data`,
//! or send no body at all.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Body of a successful identity probe (`GET /api/auth/me`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Identity {
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub permissions: Vec<String>,
}

impl Identity {
    /// A confirmed session whose response named no user.
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Read a user out of a probe or login response body.
    ///
    /// Returns `None` when the body names no user (no `id` and no `email`).
    pub fn from_body(body: &Value) -> Option<Self> {
        let user = ["user", "data"]
            .iter()
            .find_map(|key| body.get(key).filter(|v| v.is_object()))
            .unwrap_or(body);
        if !user.is_object() {
            return None;
        }
        serde_json::from_value::<Identity>(user.clone())
            .ok()
            .filter(|identity| !identity.id.is_empty() || !identity.email.is_empty())
    }

    /// Name to show in the console header; falls back to the email, then
    /// the id.
    pub fn display_name(&self) -> &str {
        [self.name.as_deref(), Some(self.email.as_str()), Some(self.id.as_str())]
            .into_iter()
            .flatten()
            .find(|n| !n.trim().is_empty())
            .unwrap_or("signed-in user")
    }
}

fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => s,
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    })
}

fn lenient_list<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Array(items)) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    })
}

/// Email/password pair posted to the login endpoint.
#[derive(Clone, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}
