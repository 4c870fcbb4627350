//! Periodic refresh of a page resource.
//!
//! # Responsibilities
//! - Re-load a resource on a fixed interval
//! - Stop when the view unmounts or the backend rejects the session

use std::future::Future;
use std::time::Duration;

use tokio::time::{self, MissedTickBehavior};

use crate::api::ApiResult;
use crate::fetch::resource::{FetchState, LoadOutcome, Resource};
use crate::observability::metrics;

/// Why a poll loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollExit {
    Unmounted,
    SessionRejected,
}

pub struct Poller {
    interval: Duration,
}

impl Poller {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }

    /// Load `resource` immediately, then every interval, calling
    /// `on_update` with each applied state.
    ///
    /// A slow request delays the next tick rather than stacking requests.
    pub async fn run<T, F, Fut, U>(
        self,
        resource: &Resource<T>,
        mut fetch: F,
        mut on_update: U,
    ) -> PollExit
    where
        T: Clone,
        F: FnMut() -> Fut,
        Fut: Future<Output = ApiResult<T>>,
        U: FnMut(&FetchState<T>),
    {
        let mut unmounted = resource.mount().subscribe();
        if !resource.mount().is_mounted() {
            return PollExit::Unmounted;
        }

        tracing::debug!(interval_ms = self.interval.as_millis() as u64, "Poller starting");

        let mut ticker = time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    match resource.load(fetch()).await {
                        LoadOutcome::Abandoned => {
                            metrics::record_poll("abandoned");
                            return PollExit::Unmounted;
                        }
                        LoadOutcome::Superseded => {
                            metrics::record_poll("superseded");
                        }
                        outcome => {
                            metrics::record_poll(if outcome == LoadOutcome::Loaded { "ok" } else { "error" });
                            let state = resource.snapshot();
                            on_update(&state);
                            if state.error.as_ref().is_some_and(|b| b.is_auth()) {
                                tracing::info!("Session rejected while polling, stopping");
                                return PollExit::SessionRejected;
                            }
                        }
                    }
                }
                _ = unmounted.recv() => {
                    tracing::debug!("Poller received unmount signal, exiting loop");
                    return PollExit::Unmounted;
                }
            }
        }
    }
}
