//! Typed endpoints behind the console pages.
//!
//! Every page here displays state owned by the backend (breakers, queues,
//! billing). Nothing is computed or retried client-side; each function is a
//! single authenticated call through [`ApiClient`](crate::api::ApiClient).

pub mod breakers;
pub mod providers;
pub mod queue;
pub mod requests;
pub mod tokens;
pub mod usage;
