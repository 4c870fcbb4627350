//! OS signal handling.
//!
//! Ctrl-C ends the current view: everything running under its [`Mount`]
//! is abandoned and pollers stop at their next select point.

use crate::lifecycle::Mount;

/// Unmount `mount` when the process receives Ctrl-C.
///
/// Runs until the signal arrives or the mount ends for another reason.
pub async fn unmount_on_ctrl_c(mount: Mount) {
    let mut unmounted = mount.subscribe();
    if !mount.is_mounted() {
        return;
    }

    tokio::select! {
        result = tokio::signal::ctrl_c() => {
            if let Err(e) = result {
                tracing::error!(error = %e, "Failed to listen for Ctrl-C");
                return;
            }
            tracing::info!("Ctrl-C received, unmounting view");
            mount.unmount();
        }
        _ = unmounted.recv() => {}
    }
}
