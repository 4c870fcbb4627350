//! Authenticated HTTP client for the gateway backend.

use std::time::{Duration, Instant};

use reqwest::header::{ACCEPT, COOKIE, SET_COOKIE};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use crate::api::error::{ApiError, ApiResult};
use crate::api::request::{resolve, ApiRequest, RequestId, X_REQUEST_ID};
use crate::api::session::Session;
use crate::config::ApiConfig;
use crate::observability::metrics;

/// The single place every console feature sends backend requests through.
///
/// Holds the base URL and transport settings only. Credentials come from
/// the [`Session`] passed to each call; the client itself never caches,
/// retries or keeps per-user state.
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: Client,
    base_url: Url,
}

impl ApiClient {
    /// Build a client from the API section of the config.
    pub fn new(config: &ApiConfig) -> ApiResult<Self> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| ApiError::InvalidPath(format!("{}: {e}", config.base_url)))?;
        if base_url.cannot_be_a_base() || !matches!(base_url.scheme(), "http" | "https") {
            return Err(ApiError::InvalidPath(config.base_url.clone()));
        }

        let http = Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Send a request with the session's credentials and decode the JSON
    /// response.
    ///
    /// An empty response body decodes as JSON `null`, so `T = ()` or
    /// `Option<_>` can be used for endpoints that return nothing.
    pub async fn send<T: DeserializeOwned>(
        &self,
        session: &Session,
        request: ApiRequest,
    ) -> ApiResult<T> {
        let url = resolve(&self.base_url, request.path())?;
        let request_id = RequestId::new();
        let method = request.method().clone();

        let mut builder = self
            .http
            .request(method.clone(), url.clone())
            .header(X_REQUEST_ID, request_id.to_string())
            .header(ACCEPT, "application/json");

        if let Some(cookie) = session.cookie_header(&url) {
            builder = builder.header(COOKIE, cookie);
        }
        if !request.query_pairs().is_empty() {
            builder = builder.query(request.query_pairs());
        }
        if let Some(body) = request.body() {
            builder = builder.json(body);
        }

        let start = Instant::now();
        let response = match builder.send().await {
            Ok(response) => response,
            Err(e) => {
                metrics::record_request(method.as_str(), None, start);
                let err = ApiError::from(e);
                tracing::warn!(
                    request_id = %request_id,
                    method = %method,
                    path = %url.path(),
                    error = %err,
                    "API request failed before a response"
                );
                return Err(err);
            }
        };

        session.store(response.headers().get_all(SET_COOKIE), &url);

        let status = response.status();
        let text = response.text().await?;
        metrics::record_request(method.as_str(), Some(status.as_u16()), start);

        tracing::debug!(
            request_id = %request_id,
            method = %method,
            path = %url.path(),
            status = status.as_u16(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "API request completed"
        );

        if !status.is_success() {
            return Err(ApiError::from_status(status.as_u16(), &text));
        }

        decode_body(&text)
    }

    pub async fn get<T: DeserializeOwned>(&self, session: &Session, path: &str) -> ApiResult<T> {
        self.send(session, ApiRequest::get(path)).await
    }

    pub async fn post<B, T>(&self, session: &Session, path: &str, body: &B) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send(session, ApiRequest::post(path).json(body)?).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, session: &Session, path: &str) -> ApiResult<T> {
        self.send(session, ApiRequest::delete(path)).await
    }
}

fn decode_body<T: DeserializeOwned>(text: &str) -> ApiResult<T> {
    let body = if text.trim().is_empty() { "null" } else { text };
    serde_json::from_str(body).map_err(|e| ApiError::Decode(e.to_string()))
}
