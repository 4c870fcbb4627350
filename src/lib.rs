//! Admin console client for the AI gateway.
//!
//! # Architecture Overview
//!
//! ```text
//!   CLI command / view
//!        │
//!        ▼
//!   ┌──────────────┐  probe   ┌──────────┐        ┌────────────┐
//!   │  RouteGuard  │─────────▶│ AuthApi  │───────▶│            │
//!   │ (auth/guard) │          └──────────┘        │ ApiClient  │──HTTP──▶ gateway backend
//!   └──────┬───────┘                              │  (+Session │
//!          │ render                               │   cookies) │
//!          ▼                                      │            │
//!   ┌──────────────┐  load    ┌──────────────┐    │            │
//!   │ Resource<T>  │◀─────────│  dashboard::*│───▶│            │
//!   │  + Poller    │          └──────────────┘    └────────────┘
//!   └──────────────┘
//!          ▲
//!          │ abandoned on unmount
//!   ┌──────────────┐
//!   │    Mount     │
//!   └──────────────┘
//! ```

pub mod api;
pub mod auth;
pub mod config;
pub mod dashboard;
pub mod fetch;
pub mod lifecycle;
pub mod observability;

pub use api::{ApiClient, ApiError, ApiRequest, Session};
pub use auth::{AuthApi, GuardOutcome, RouteGuard};
pub use config::ConsoleConfig;
pub use lifecycle::Mount;
