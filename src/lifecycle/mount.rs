//! Mount coordination for console views.

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::broadcast;

/// Lifetime of one mounted view.
///
/// Work started on behalf of the view goes through [`Mount::run`]; once the
/// view is unmounted, pending work is dropped and its result never applied.
/// Clones share the same lifetime.
#[derive(Clone, Debug)]
pub struct Mount {
    /// Broadcast channel sender.
    tx: broadcast::Sender<()>,
    mounted: Arc<AtomicBool>,
}

impl Mount {
    /// A freshly mounted view.
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self {
            tx,
            mounted: Arc::new(AtomicBool::new(true)),
        }
    }

    /// Subscribe to the unmount signal.
    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.tx.subscribe()
    }

    /// Unmount the view. Idempotent.
    pub fn unmount(&self) {
        if self.mounted.swap(false, Ordering::SeqCst) {
            let _ = self.tx.send(());
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted.load(Ordering::SeqCst)
    }

    /// Number of subscribers still waiting on this mount (pending runs,
    /// pollers).
    pub fn in_flight(&self) -> usize {
        self.tx.receiver_count()
    }

    /// Drive `fut` while the view stays mounted.
    ///
    /// Returns `None` if the view was unmounted before or while `fut` ran;
    /// the future is dropped at that point.
    pub async fn run<F: Future>(&self, fut: F) -> Option<F::Output> {
        // Subscribe before checking the flag so an unmount in between is
        // still observed.
        let mut unmounted = self.subscribe();
        if !self.is_mounted() {
            return None;
        }

        tokio::select! {
            output = fut => self.is_mounted().then_some(output),
            _ = unmounted.recv() => None,
        }
    }
}

impl Default for Mount {
    fn default() -> Self {
        Self::new()
    }
}
