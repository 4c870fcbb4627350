//! Page data fetching.
//!
//! # Data Flow
//! ```text
//! page mounted (Mount)
//!     → resource.rs (Resource<T>: {data, loading, error})
//!     → load(endpoint future) under the mount
//!     → success: data replaced │ failure: banner.rs (dismissible Banner)
//!     → poll.rs (Poller: reload every interval until unmount / session rejected)
//! ```
//!
//! # Design Decisions
//! - One primitive for every page instead of per-page loading/error code
//! - Failures degrade to an error banner with stale data, never a panic
//! - No retries beyond the poll interval

pub mod banner;
pub mod poll;
pub mod resource;

pub use banner::{Banner, Severity};
pub use poll::{PollExit, Poller};
pub use resource::{FetchState, LoadOutcome, Resource};
