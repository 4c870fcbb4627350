//! Authentication subsystem.
//!
//! # Data Flow
//! ```text
//! Protected view mounted at Location
//!     → guard.rs (RouteGuard, state Loading)
//!     → service.rs (AuthApi::me, the identity probe)
//!     → Authenticated(Identity) → render
//!     → Unauthenticated → location.rs (LoginRedirect: /login?redirect=...)
//!
//! Login view:
//!     → service.rs (AuthApi::login stores the session cookie)
//!     → LoginRedirect::return_target → back to the original location
//! ```

pub mod guard;
pub mod identity;
pub mod location;
pub mod service;

pub use guard::{DenyReason, GuardOutcome, GuardState, IdentityProbe, RouteGuard};
pub use identity::{Credentials, Identity};
pub use location::{Location, LoginRedirect};
pub use service::AuthApi;
