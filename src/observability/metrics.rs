//! Metrics collection.
//!
//! # Metrics
//! - `console_api_requests_total` (counter): requests by method, status
//! - `console_api_request_duration_seconds` (histogram): latency by method
//! - `console_route_guard_decisions_total` (counter): guard verdicts
//! - `console_poll_cycles_total` (counter): dashboard refreshes by outcome

use std::time::Instant;

/// Record one completed (or failed) API request.
///
/// `status` is `None` when no response was received.
pub fn record_request(method: &str, status: Option<u16>, start: Instant) {
    let status = status.map_or_else(|| "none".to_string(), |s| s.to_string());

    ::metrics::counter!(
        "console_api_requests_total",
        "method" => method.to_string(),
        "status" => status
    )
    .increment(1);

    ::metrics::histogram!(
        "console_api_request_duration_seconds",
        "method" => method.to_string()
    )
    .record(start.elapsed().as_secs_f64());
}

/// Record a route guard verdict (`authenticated`, `no_session`, `probe_failed`).
pub fn record_guard_decision(decision: &'static str) {
    ::metrics::counter!("console_route_guard_decisions_total", "decision" => decision).increment(1);
}

/// Record one poll cycle (`ok`, `error`, `abandoned`, `superseded`).
pub fn record_poll(outcome: &'static str) {
    ::metrics::counter!("console_poll_cycles_total", "outcome" => outcome).increment(1);
}
