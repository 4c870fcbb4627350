//! Backend API access subsystem.
//!
//! # Data Flow
//! ```text
//! console feature
//!     → request.rs (ApiRequest: method, relative path, query, JSON body)
//!     → client.rs (resolve against base URL, attach session cookies,
//!                  X-Request-ID, send, absorb Set-Cookie)
//!     → error.rs (401 / 403 / other status / network / decode)
//!     → typed response body
//! ```
//!
//! # Design Decisions
//! - Credentials live in an explicit `Session`, never in the client
//! - 401 and 403 always map to dedicated error variants
//! - No caching or retries at this layer; each caller owns its state

pub mod client;
pub mod error;
pub mod request;
pub mod session;

pub use client::ApiClient;
pub use error::{ApiError, ApiResult, ErrorKind};
pub use request::{segment, ApiRequest, RequestId};
pub use session::Session;
