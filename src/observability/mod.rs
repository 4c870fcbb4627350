//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! ApiClient / RouteGuard / Poller produce:
//!     → logging.rs (structured log events via `tracing`)
//!     → metrics.rs (counters and histograms via the `metrics` facade)
//!
//! Consumers:
//!     → stderr (human-readable or JSON lines)
//!     → whatever recorder the embedding application installs
//! ```
//!
//! # Design Decisions
//! - Logs go to stderr so command output on stdout stays machine-readable
//! - Request ID flows into every request log line
//! - Metrics are no-ops until a recorder is installed

pub mod logging;
pub mod metrics;
