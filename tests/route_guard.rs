//! Route guard and page fetching end to end against the mock gateway.

mod common;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use common::{start_mock_gateway, unused_addr, SESSION_TOKEN};
use gateway_console::api::Session;
use gateway_console::auth::{AuthApi, DenyReason, GuardOutcome, GuardState, Location, RouteGuard};
use gateway_console::config::AuthConfig;
use gateway_console::dashboard::breakers::{self, BreakerState};
use gateway_console::fetch::{PollExit, Poller, Resource};
use gateway_console::Mount;

fn breakers_guard(auth: AuthApi) -> RouteGuard<AuthApi> {
    RouteGuard::new(auth, "/login", Location::parse("/breakers").unwrap())
}

#[tokio::test]
async fn test_valid_session_renders_once_with_one_identity_check() {
    let gateway = start_mock_gateway().await;
    let auth = gateway.auth();
    let session = auth.restore_session(SESSION_TOKEN);
    let renders = AtomicUsize::new(0);

    let outcome = breakers_guard(auth)
        .protect(&session, &Mount::new(), |identity| {
            renders.fetch_add(1, Ordering::SeqCst);
            identity.display_name().to_string()
        })
        .await;

    assert!(matches!(outcome, GuardOutcome::Render(ref name) if name == "Ops"));
    assert_eq!(renders.load(Ordering::SeqCst), 1);
    assert_eq!(gateway.identity_checks(), 1);
}

#[tokio::test]
async fn test_missing_session_redirects_to_login() {
    let gateway = start_mock_gateway().await;
    let guard = breakers_guard(gateway.auth());
    let mount = Mount::new();

    let state = guard.resolve(&Session::new(), &mount).await.unwrap();
    assert!(matches!(
        state,
        GuardState::Unauthenticated {
            reason: DenyReason::NoSession,
            ..
        }
    ));

    let outcome = guard
        .protect(&Session::new(), &mount, |_| unreachable!("must not render"))
        .await;
    let GuardOutcome::<()>::Redirect(redirect) = outcome else {
        panic!("expected a redirect");
    };
    assert_eq!(redirect.href(), "/login?redirect=%2Fbreakers");
    assert_eq!(gateway.identity_checks(), 1);
}

#[tokio::test]
async fn test_unreachable_backend_fails_closed() {
    let addr = unused_addr().await;
    let auth = AuthApi::new(
        common::api_client(&format!("http://{addr}"), 5),
        AuthConfig::default(),
    );
    let session = auth.restore_session(SESSION_TOKEN);
    let guard = breakers_guard(auth);
    let mount = Mount::new();

    let state = guard.resolve(&session, &mount).await.unwrap();
    let GuardState::Unauthenticated { redirect, reason } = state else {
        panic!("network failure must not authenticate");
    };
    assert_eq!(reason, DenyReason::ProbeFailed);
    assert_eq!(redirect.href(), "/login?redirect=%2Fbreakers");
}

#[tokio::test]
async fn test_server_error_on_identity_check_fails_closed() {
    let gateway = start_mock_gateway().await;
    let auth = gateway.auth_with_identity_path("/api/boom");
    let session = auth.restore_session(SESSION_TOKEN);

    let outcome = breakers_guard(auth)
        .protect(&session, &Mount::new(), |_| unreachable!("must not render"))
        .await;
    assert!(matches!(outcome, GuardOutcome::<()>::Redirect(_)));
}

#[tokio::test]
async fn test_any_success_status_renders_whatever_the_body() {
    let gateway = start_mock_gateway().await;
    let cases = [
        ("/api/identity/numeric", "ops@example.com"),
        ("/api/identity/wrapped", "Ops"),
        ("/api/identity/empty", "signed-in user"),
        ("/api/identity/text", "signed-in user"),
    ];

    for (path, expected) in cases {
        let auth = gateway.auth_with_identity_path(path);
        let session = auth.restore_session(SESSION_TOKEN);
        let outcome = breakers_guard(auth)
            .protect(&session, &Mount::new(), |identity| {
                identity.display_name().to_string()
            })
            .await;

        match outcome {
            GuardOutcome::Render(name) => assert_eq!(name, expected, "{path}"),
            other => panic!("{path}: expected render, got {other:?}"),
        }
    }
}

#[tokio::test]
async fn test_unmount_during_identity_check_abandons() {
    let gateway = start_mock_gateway().await;
    let auth = gateway.auth_with_identity_path("/api/slow");
    let session = auth.restore_session(SESSION_TOKEN);
    let mount = Mount::new();
    let view = mount.clone();

    let task = tokio::spawn(async move {
        breakers_guard(auth)
            .protect(&session, &view, |_| "rendered")
            .await
    });
    tokio::time::sleep(Duration::from_millis(100)).await;
    mount.unmount();

    let outcome = tokio::time::timeout(Duration::from_secs(2), task)
        .await
        .unwrap()
        .unwrap();
    assert!(matches!(outcome, GuardOutcome::Abandoned));
}

#[tokio::test]
async fn test_guarded_page_polls_until_unmount() {
    let gateway = start_mock_gateway().await;
    let auth = gateway.auth();
    let session = auth.restore_session(SESSION_TOKEN);
    let client = auth.client().clone();
    let mount = Mount::new();

    let outcome = breakers_guard(auth)
        .protect(&session, &mount, |identity| identity.id.clone())
        .await;
    assert!(matches!(outcome, GuardOutcome::Render(_)));

    let resource = Resource::new(mount.clone());
    let mut updates = 0;
    let exit = Poller::new(Duration::from_millis(20))
        .run(
            &resource,
            || breakers::list(&client, &session),
            |state| {
                updates += 1;
                assert!(state.error.is_none());
                if updates == 2 {
                    mount.unmount();
                }
            },
        )
        .await;

    assert_eq!(exit, PollExit::Unmounted);
    assert_eq!(updates, 2);
    let data = resource.snapshot().data.clone().unwrap();
    assert_eq!(data[1].state, BreakerState::Open);
}

#[tokio::test]
async fn test_polling_stops_when_session_rejected() {
    let gateway = start_mock_gateway().await;
    let client = gateway.client();
    let session = Session::with_cookie("session", "expired", client.base_url());
    let resource = Resource::new(Mount::new());

    let exit = Poller::new(Duration::from_millis(20))
        .run(&resource, || breakers::list(&client, &session), |_| {})
        .await;

    assert_eq!(exit, PollExit::SessionRejected);
    let state = resource.snapshot();
    assert!(state.data.is_none());
    assert!(state.error.as_ref().is_some_and(|banner| banner.is_auth()));
}
