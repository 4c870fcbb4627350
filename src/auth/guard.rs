//! Route guard for protected console views.
//!
//! # States
//! - Loading: identity probe in flight, nothing protected is shown
//! - Authenticated: probe succeeded, the view renders
//! - Unauthenticated: probe failed, the visitor is sent to the login view
//!
//! # State Transitions
//! ```text
//! Loading → Authenticated:   probe returns an identity
//! Loading → Unauthenticated: probe returns any error (401/403, 5xx, network)
//! ```
//!
//! # Design Decisions
//! - One probe per mount; repeated or concurrent resolves share it
//! - Fail closed: every probe error denies access, not only 401/403
//! - No retry loop and no guard-level timeout
//! - Results that arrive after unmount are discarded

use std::future::Future;

use tokio::sync::{watch, OnceCell};

use crate::api::{ApiResult, Session};
use crate::auth::identity::Identity;
use crate::auth::location::{Location, LoginRedirect};
use crate::lifecycle::Mount;
use crate::observability::metrics;

/// Source of the current identity.
pub trait IdentityProbe {
    /// Ask the backend who the session belongs to.
    fn probe(&self, session: &Session) -> impl Future<Output = ApiResult<Identity>> + Send;
}

/// Why access was denied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenyReason {
    /// The backend rejected the session (401/403).
    NoSession,
    /// The probe failed for another reason (network, timeout, 5xx).
    ProbeFailed,
}

impl DenyReason {
    fn as_str(self) -> &'static str {
        match self {
            DenyReason::NoSession => "no_session",
            DenyReason::ProbeFailed => "probe_failed",
        }
    }
}

/// Observable guard state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardState {
    Loading,
    Authenticated(Identity),
    Unauthenticated {
        redirect: LoginRedirect,
        reason: DenyReason,
    },
}

impl GuardState {
    pub fn is_loading(&self) -> bool {
        matches!(self, GuardState::Loading)
    }
}

/// Result of [`RouteGuard::protect`].
#[derive(Debug)]
pub enum GuardOutcome<V> {
    /// Authenticated: the protected content.
    Render(V),
    /// Not authenticated: go to the login view.
    Redirect(LoginRedirect),
    /// The view unmounted before the probe finished; nothing to do.
    Abandoned,
}

/// Guards one mounted protected view.
///
/// Create one per mount. The identity probe runs at most once for the
/// lifetime of the guard.
pub struct RouteGuard<P> {
    probe: P,
    login_path: String,
    location: Location,
    state: watch::Sender<GuardState>,
    verdict: OnceCell<GuardState>,
}

impl<P: IdentityProbe> RouteGuard<P> {
    /// Guard the view at `location`, sending visitors to `login_path` when
    /// they are not signed in.
    pub fn new(probe: P, login_path: impl Into<String>, location: Location) -> Self {
        let (state, _) = watch::channel(GuardState::Loading);
        Self {
            probe,
            login_path: login_path.into(),
            location,
            state,
            verdict: OnceCell::new(),
        }
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    /// Current state.
    pub fn state(&self) -> GuardState {
        self.state.borrow().clone()
    }

    /// Watch state changes, e.g. to show a loading indicator.
    pub fn subscribe(&self) -> watch::Receiver<GuardState> {
        self.state.subscribe()
    }

    /// Run the identity probe (once) and return the terminal state.
    ///
    /// Returns `None` if the view was unmounted before the probe finished;
    /// the state then stays `Loading` and a later call may probe again.
    pub async fn resolve(&self, session: &Session, mount: &Mount) -> Option<GuardState> {
        let verdict = self
            .verdict
            .get_or_try_init(|| async {
                match mount.run(self.probe.probe(session)).await {
                    Some(result) => Ok(self.decide(result)),
                    None => Err(()),
                }
            })
            .await;

        match verdict {
            Ok(state) => Some(state.clone()),
            Err(()) => {
                tracing::debug!(location = %self.location, "View unmounted during identity probe");
                None
            }
        }
    }

    /// Resolve the guard and render the protected content only when
    /// authenticated.
    ///
    /// Consumes the guard so `render` runs at most once per mount.
    pub async fn protect<V, F>(self, session: &Session, mount: &Mount, render: F) -> GuardOutcome<V>
    where
        F: FnOnce(&Identity) -> V,
    {
        match self.resolve(session, mount).await {
            Some(GuardState::Authenticated(identity)) if mount.is_mounted() => {
                GuardOutcome::Render(render(&identity))
            }
            Some(GuardState::Unauthenticated { redirect, .. }) if mount.is_mounted() => {
                GuardOutcome::Redirect(redirect)
            }
            _ => GuardOutcome::Abandoned,
        }
    }

    fn decide(&self, result: ApiResult<Identity>) -> GuardState {
        let state = match result {
            Ok(identity) => {
                tracing::debug!(
                    location = %self.location,
                    user = %identity.email,
                    "Session confirmed"
                );
                metrics::record_guard_decision("authenticated");
                GuardState::Authenticated(identity)
            }
            Err(e) => {
                let reason = if e.is_auth() {
                    DenyReason::NoSession
                } else {
                    DenyReason::ProbeFailed
                };
                match reason {
                    DenyReason::NoSession => {
                        tracing::info!(location = %self.location, "No valid session, redirecting to login");
                    }
                    DenyReason::ProbeFailed => {
                        tracing::warn!(
                            location = %self.location,
                            error = %e,
                            "Identity probe failed, treating as signed out"
                        );
                    }
                }
                metrics::record_guard_decision(reason.as_str());
                GuardState::Unauthenticated {
                    redirect: LoginRedirect::new(self.login_path.clone(), self.location.clone()),
                    reason,
                }
            }
        };

        self.state.send_replace(state.clone());
        state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiError;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    /// Probe returning a canned result after an optional delay.
    struct FakeProbe {
        result: ApiResult<Identity>,
        delay: Duration,
        calls: Arc<AtomicUsize>,
    }

    impl FakeProbe {
        fn new(result: ApiResult<Identity>) -> (Self, Arc<AtomicUsize>) {
            let calls = Arc::new(AtomicUsize::new(0));
            let probe = Self {
                result,
                delay: Duration::ZERO,
                calls: calls.clone(),
            };
            (probe, calls)
        }

        fn delayed(mut self, delay: Duration) -> Self {
            self.delay = delay;
            self
        }
    }

    impl IdentityProbe for FakeProbe {
        fn probe(&self, _session: &Session) -> impl Future<Output = ApiResult<Identity>> + Send {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let result = self.result.clone();
            let delay = self.delay;
            async move {
                tokio::time::sleep(delay).await;
                result
            }
        }
    }

    fn admin() -> Identity {
        Identity {
            id: "u_1".into(),
            email: "ops@example.com".into(),
            name: Some("Ops".into()),
            role: Some("admin".into()),
            permissions: vec![],
        }
    }

    fn guard(probe: FakeProbe) -> RouteGuard<FakeProbe> {
        RouteGuard::new(probe, "/login", Location::parse("/breakers").unwrap())
    }

    #[tokio::test]
    async fn test_authenticated_renders_once() {
        let (probe, calls) = FakeProbe::new(Ok(admin()));
        let mount = Mount::new();
        let renders = AtomicUsize::new(0);

        let outcome = guard(probe)
            .protect(&Session::new(), &mount, |identity| {
                renders.fetch_add(1, Ordering::SeqCst);
                identity.email.clone()
            })
            .await;

        assert!(matches!(outcome, GuardOutcome::Render(ref email) if email == "ops@example.com"));
        assert_eq!(renders.load(Ordering::SeqCst), 1);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_unauthorized_redirects_with_return_location() {
        let (probe, _) = FakeProbe::new(Err(ApiError::Unauthorized("expired".into())));
        let guard = guard(probe);
        let mount = Mount::new();

        let state = guard.resolve(&Session::new(), &mount).await.unwrap();
        let GuardState::Unauthenticated { redirect, reason } = state else {
            panic!("expected unauthenticated, got {state:?}");
        };
        assert_eq!(reason, DenyReason::NoSession);
        assert_eq!(redirect.href(), "/login?redirect=%2Fbreakers");

        let outcome = guard
            .protect(&Session::new(), &mount, |_| unreachable!("must not render"))
            .await;
        assert!(matches!(outcome, GuardOutcome::<()>::Redirect(_)));
    }

    #[tokio::test]
    async fn test_network_failure_fails_closed() {
        let (probe, _) = FakeProbe::new(Err(ApiError::Network("connection refused".into())));
        let outcome = guard(probe)
            .protect(&Session::new(), &Mount::new(), |_| unreachable!("must not render"))
            .await;

        let GuardOutcome::<()>::Redirect(redirect) = outcome else {
            panic!("network failure must redirect");
        };
        assert_eq!(redirect.href(), "/login?redirect=%2Fbreakers");
    }

    #[tokio::test]
    async fn test_server_error_fails_closed() {
        let (probe, _) = FakeProbe::new(Err(ApiError::from_status(500, "")));
        let guard = guard(probe);
        let state = guard.resolve(&Session::new(), &Mount::new()).await.unwrap();
        assert!(matches!(
            state,
            GuardState::Unauthenticated {
                reason: DenyReason::ProbeFailed,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_repeated_resolves_share_one_probe() {
        let (probe, calls) = FakeProbe::new(Ok(admin()));
        let probe = probe.delayed(Duration::from_millis(20));
        let guard = guard(probe);
        let mount = Mount::new();
        let session = Session::new();

        let (a, b) = tokio::join!(guard.resolve(&session, &mount), guard.resolve(&session, &mount));
        let c = guard.resolve(&session, &mount).await;

        assert_eq!(a, b);
        assert_eq!(b, c);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_state_starts_loading_and_is_observable() {
        let (probe, _) = FakeProbe::new(Ok(admin()));
        let guard = guard(probe);
        let mut rx = guard.subscribe();
        assert!(guard.state().is_loading());

        guard.resolve(&Session::new(), &Mount::new()).await;
        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow(), GuardState::Authenticated(admin()));
    }

    #[tokio::test]
    async fn test_unmount_during_probe_abandons() {
        let (probe, _) = FakeProbe::new(Ok(admin()));
        let probe = probe.delayed(Duration::from_secs(30));
        let mount = Mount::new();
        let view = mount.clone();

        let task = tokio::spawn(async move {
            guard(probe)
                .protect(&Session::new(), &view, |_| "rendered")
                .await
        });
        tokio::time::sleep(Duration::from_millis(20)).await;
        mount.unmount();

        let outcome = tokio::time::timeout(Duration::from_secs(1), task)
            .await
            .unwrap()
            .unwrap();
        assert!(matches!(outcome, GuardOutcome::Abandoned));
    }
}
