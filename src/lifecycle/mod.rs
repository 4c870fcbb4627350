//! View lifecycle management.
//!
//! # Data Flow
//! ```text
//! View mounted (mount.rs):
//!     Mount::new → RouteGuard probe / Resource loads / Poller run under it
//!
//! View unmounted:
//!     Mount::unmount → broadcast → in-flight futures dropped, results discarded
//!
//! Signals (signals.rs):
//!     SIGINT (Ctrl-C) → unmount the active view
//! ```
//!
//! # Design Decisions
//! - Each view owns its own Mount; nothing is shared between views
//! - Late results are dropped, never applied to an unmounted view

pub mod mount;
pub mod signals;

pub use mount::Mount;
