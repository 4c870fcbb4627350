//! Page-local data with loading and error state.

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use arc_swap::ArcSwap;

use crate::api::ApiResult;
use crate::fetch::banner::Banner;
use crate::lifecycle::Mount;

/// Snapshot of one page resource.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchState<T> {
    pub data: Option<T>,
    pub loading: bool,
    pub error: Option<Banner>,
}

impl<T> Default for FetchState<T> {
    fn default() -> Self {
        Self {
            data: None,
            loading: false,
            error: None,
        }
    }
}

/// Result of one [`Resource::load`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Loaded,
    Failed,
    /// The view unmounted first; the result was dropped.
    Abandoned,
    /// A later load started before this one finished; its result was
    /// dropped.
    Superseded,
}

/// Data a page fetches for itself, bound to the page's mount.
///
/// Readers take cheap snapshots; loads replace the snapshot atomically.
/// When loads overlap, only the most recently started one is applied.
/// Clones share state.
#[derive(Clone)]
pub struct Resource<T> {
    state: Arc<ArcSwap<FetchState<T>>>,
    generation: Arc<AtomicU64>,
    mount: Mount,
}

impl<T: Clone> Resource<T> {
    pub fn new(mount: Mount) -> Self {
        Self {
            state: Arc::new(ArcSwap::from_pointee(FetchState::default())),
            generation: Arc::new(AtomicU64::new(0)),
            mount,
        }
    }

    pub fn mount(&self) -> &Mount {
        &self.mount
    }

    /// Current state.
    pub fn snapshot(&self) -> Arc<FetchState<T>> {
        self.state.load_full()
    }

    /// Run `fetch` and apply its result.
    ///
    /// Previous data stays visible while loading and after a failure; a
    /// failure replaces any earlier banner. Nothing is applied once the view
    /// has unmounted, so an abandoned load leaves `loading` set on a state
    /// nobody reads any more. A load overtaken by a newer one is dropped and
    /// leaves `loading` to the newer load.
    pub async fn load<F>(&self, fetch: F) -> LoadOutcome
    where
        F: Future<Output = ApiResult<T>>,
    {
        if !self.mount.is_mounted() {
            return LoadOutcome::Abandoned;
        }
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.update(|state| {
            state.loading = true;
            state.error = None;
        });

        let result = self.mount.run(fetch).await;
        if result.is_some() && self.generation.load(Ordering::SeqCst) != generation {
            tracing::debug!(generation, "Dropping superseded resource load");
            return LoadOutcome::Superseded;
        }

        match result {
            Some(Ok(data)) => {
                self.state.store(Arc::new(FetchState {
                    data: Some(data),
                    loading: false,
                    error: None,
                }));
                LoadOutcome::Loaded
            }
            Some(Err(e)) => {
                tracing::debug!(error = %e, "Resource load failed");
                let banner = Banner::from_error(&e);
                self.update(|state| {
                    state.loading = false;
                    state.error = Some(banner.clone());
                });
                LoadOutcome::Failed
            }
            None => LoadOutcome::Abandoned,
        }
    }

    /// Clear the error banner.
    pub fn dismiss_error(&self) {
        self.update(|state| state.error = None);
    }

    fn update<F>(&self, mut f: F)
    where
        F: FnMut(&mut FetchState<T>),
    {
        self.state.rcu(|current| {
            let mut next = FetchState::clone(current);
            f(&mut next);
            next
        });
    }
}
