//! In-process mock of the gateway backend for integration tests.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tokio::net::TcpListener;

use gateway_console::config::{ApiConfig, AuthConfig};
use gateway_console::{ApiClient, AuthApi};

pub const SESSION_TOKEN: &str = "valid-token";
pub const EMAIL: &str = "ops@example.com";
pub const PASSWORD: &str = "hunter2";

#[derive(Clone, Default)]
struct GatewayState {
    identity_checks: Arc<AtomicUsize>,
}

pub struct MockGateway {
    pub addr: SocketAddr,
    state: GatewayState,
}

impl MockGateway {
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Number of identity checks the backend has served.
    pub fn identity_checks(&self) -> usize {
        self.state.identity_checks.load(Ordering::SeqCst)
    }

    pub fn client(&self) -> ApiClient {
        api_client(&self.url(), 5)
    }

    pub fn auth(&self) -> AuthApi {
        AuthApi::new(self.client(), AuthConfig::default())
    }

    /// Auth service that checks the session against `identity_path` instead.
    pub fn auth_with_identity_path(&self, identity_path: &str) -> AuthApi {
        let config = AuthConfig {
            probe_path: identity_path.to_string(),
            ..AuthConfig::default()
        };
        AuthApi::new(self.client(), config)
    }
}

pub fn api_client(base_url: &str, timeout_secs: u64) -> ApiClient {
    let config = ApiConfig {
        base_url: base_url.to_string(),
        request_timeout_secs: timeout_secs,
        ..ApiConfig::default()
    };
    ApiClient::new(&config).unwrap()
}

/// Address nothing listens on.
pub async fn unused_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap()
}

/// Start the mock gateway on an ephemeral port.
pub async fn start_mock_gateway() -> MockGateway {
    let state = GatewayState::default();

    let app = Router::new()
        .route("/api/auth/me", get(me))
        .route("/api/auth/login", post(login))
        .route("/api/auth/logout", post(logout))
        .route("/api/circuit-breakers", get(list_breakers))
        .route("/api/circuit-breakers/{provider}/reset", post(reset_breaker))
        .route("/api/tokens", get(list_tokens).post(create_token))
        .route("/api/tokens/{id}", delete(revoke_token))
        .route("/api/echo", get(echo).post(echo))
        .route(
            "/api/identity/numeric",
            get(|| async { Json(json!({ "id": 42, "email": EMAIL })) }),
        )
        .route(
            "/api/identity/wrapped",
            get(|| async { Json(json!({ "user": { "id": "u_1", "name": "Ops" } })) }),
        )
        .route("/api/identity/empty", get(|| async { StatusCode::OK }))
        .route("/api/identity/text", get(|| async { "OK" }))
        .route(
            "/api/forbidden",
            get(|| async {
                (
                    StatusCode::FORBIDDEN,
                    Json(json!({ "error": "admin role required" })),
                )
            }),
        )
        .route(
            "/api/boom",
            get(|| async {
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "kaboom" })),
                )
            }),
        )
        .route(
            "/api/slow",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                Json(json!({ "id": "u_slow", "email": "slow@example.com" }))
            }),
        )
        .with_state(state.clone());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    MockGateway { addr, state }
}

fn authenticated(headers: &HeaderMap) -> bool {
    let expected = format!("session={SESSION_TOKEN}");
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .any(|pair| pair.trim() == expected)
}

fn identity() -> Value {
    json!({
        "id": "u_1",
        "email": EMAIL,
        "name": "Ops",
        "role": "admin",
        "permissions": ["tokens:write"]
    })
}

async fn me(State(state): State<GatewayState>, headers: HeaderMap) -> Result<Json<Value>, StatusCode> {
    state.identity_checks.fetch_add(1, Ordering::SeqCst);
    if authenticated(&headers) {
        Ok(Json(identity()))
    } else {
        Err(StatusCode::UNAUTHORIZED)
    }
}

async fn login(Json(body): Json<Value>) -> Response {
    if body["email"] == EMAIL && body["password"] == PASSWORD {
        (
            [(
                header::SET_COOKIE,
                format!("session={SESSION_TOKEN}; Path=/; HttpOnly"),
            )],
            Json(identity()),
        )
            .into_response()
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "error": "invalid credentials" })),
        )
            .into_response()
    }
}

async fn logout() -> Response {
    (
        [(header::SET_COOKIE, "session=; Path=/; Max-Age=0")],
        StatusCode::NO_CONTENT,
    )
        .into_response()
}

async fn list_breakers(headers: HeaderMap) -> Result<Json<Value>, StatusCode> {
    if !authenticated(&headers) {
        return Err(StatusCode::UNAUTHORIZED);
    }
    Ok(Json(json!([
        { "provider": "openai", "state": "closed", "failure_count": 0 },
        { "provider": "anthropic", "state": "open", "failure_count": 7,
          "failure_threshold": 5, "next_attempt_at": "2026-10-19T12:00:30Z" }
    ])))
}

async fn reset_breaker(headers: HeaderMap, Path(provider): Path<String>) -> Result<Json<Value>, StatusCode> {
    if !authenticated(&headers) {
        return Err(StatusCode::UNAUTHORIZED);
    }
    Ok(Json(json!({ "provider": provider, "state": "closed", "failure_count": 0 })))
}

async fn list_tokens(headers: HeaderMap) -> Result<Json<Value>, StatusCode> {
    if !authenticated(&headers) {
        return Err(StatusCode::UNAUTHORIZED);
    }
    Ok(Json(json!([
        { "id": "tok_1", "name": "ci", "prefix": "gw_3f9a", "scopes": ["inference"] }
    ])))
}

async fn create_token(headers: HeaderMap, Json(body): Json<Value>) -> Result<Json<Value>, StatusCode> {
    if !authenticated(&headers) {
        return Err(StatusCode::UNAUTHORIZED);
    }
    Ok(Json(json!({
        "token": { "id": "tok_2", "name": body["name"], "scopes": body["scopes"] },
        "secret": "gw_secret_value"
    })))
}

async fn revoke_token(headers: HeaderMap, Path(id): Path<String>) -> StatusCode {
    if !authenticated(&headers) {
        StatusCode::UNAUTHORIZED
    } else if id == "tok_1" {
        StatusCode::NO_CONTENT
    } else {
        StatusCode::NOT_FOUND
    }
}

/// Reflect what the backend received.
async fn echo(headers: HeaderMap, uri: Uri, body: String) -> Json<Value> {
    let read = |name: header::HeaderName| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };
    Json(json!({
        "cookie": read(header::COOKIE),
        "content_type": read(header::CONTENT_TYPE),
        "accept": read(header::ACCEPT),
        "request_id": read(header::HeaderName::from_static("x-request-id")),
        "query": uri.query(),
        "body": if body.is_empty() { Value::Null } else { serde_json::from_str(&body).unwrap_or(Value::String(body)) },
    }))
}
