//! Login, logout and identity calls against the backend auth endpoints.

use std::future::Future;

use serde_json::Value;

use crate::api::{ApiClient, ApiError, ApiResult, Session};
use crate::auth::guard::IdentityProbe;
use crate::auth::identity::{Credentials, Identity};
use crate::config::AuthConfig;

/// Auth endpoints of the gateway backend.
#[derive(Clone, Debug)]
pub struct AuthApi {
    client: ApiClient,
    config: AuthConfig,
}

impl AuthApi {
    pub fn new(client: ApiClient, config: AuthConfig) -> Self {
        Self { client, config }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    /// Identity of the session's user.
    ///
    /// Any 2xx response confirms the session. A body that names no user, or
    /// is not JSON at all, yields [`Identity::anonymous`].
    pub async fn me(&self, session: &Session) -> ApiResult<Identity> {
        match self.client.get::<Value>(session, &self.config.probe_path).await {
            Ok(body) => Ok(Identity::from_body(&body).unwrap_or_else(Identity::anonymous)),
            Err(ApiError::Decode(e)) => {
                tracing::debug!(error = %e, "Identity probe body is not JSON");
                Ok(Identity::anonymous())
            }
            Err(e) => Err(e),
        }
    }

    /// Sign in. The backend's session cookie is stored in `session`.
    pub async fn login(&self, session: &Session, credentials: &Credentials) -> ApiResult<Identity> {
        let body: Value = self
            .client
            .post(session, &self.config.login_endpoint, credentials)
            .await?;

        tracing::info!(email = %credentials.email, "Signed in");
        match Identity::from_body(&body) {
            Some(identity) => Ok(identity),
            // Empty 204s and `{"ok": true}` bodies carry no identity; ask for it.
            None => self.me(session).await,
        }
    }

    /// End the server-side session. Expired cookies are dropped from
    /// `session`.
    pub async fn logout(&self, session: &Session) -> ApiResult<()> {
        let _: Value = self
            .client
            .post(session, &self.config.logout_endpoint, &serde_json::json!({}))
            .await?;
        tracing::info!("Signed out");
        Ok(())
    }

    /// Stored value of the session cookie, for handing to a later process.
    pub fn session_token(&self, session: &Session) -> Option<String> {
        session.cookie_value(&self.config.session_cookie, self.client.base_url())
    }

    /// Session seeded from a previously exported token.
    pub fn restore_session(&self, token: &str) -> Session {
        Session::with_cookie(&self.config.session_cookie, token, self.client.base_url())
    }
}

impl IdentityProbe for AuthApi {
    fn probe(&self, session: &Session) -> impl Future<Output = ApiResult<Identity>> + Send {
        self.me(session)
    }
}
