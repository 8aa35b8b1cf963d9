// tests/guard_tests.rs

use learnity::auth::{AuthProvider, LocalAuthProvider};
use learnity::guard::{RouteDecision, RouteGuard};

fn provider() -> LocalAuthProvider {
    LocalAuthProvider::new("guard_test_secret", 600)
}

#[tokio::test]
async fn anonymous_visitor_is_redirected_from_private_routes() {
    let auth = provider();
    let guard = RouteGuard::new();

    let decision = guard.check(&auth, "profile").await;

    assert_eq!(decision, RouteDecision::Redirect("login"));
}

#[tokio::test]
async fn public_routes_are_reachable_without_a_session() {
    let auth = provider();
    let guard = RouteGuard::new();

    for destination in ["login", "register", "index", "forgot-password"] {
        let decision = guard.check(&auth, destination).await;
        assert_eq!(decision, RouteDecision::Allow, "destination: {destination}");
    }
}

#[tokio::test]
async fn signed_in_visitor_passes_everywhere() {
    let auth = provider();
    auth.create_account_with_email("a@b.com", "password123")
        .await
        .unwrap();
    let guard = RouteGuard::new();

    assert_eq!(guard.check(&auth, "profile").await, RouteDecision::Allow);
    // Session state never blocks a public route
    assert_eq!(guard.check(&auth, "login").await, RouteDecision::Allow);
}

#[tokio::test]
async fn signing_out_restores_the_redirect() {
    let auth = provider();
    auth.create_account_with_email("a@b.com", "password123")
        .await
        .unwrap();
    let guard = RouteGuard::new();
    assert_eq!(guard.check(&auth, "profile").await, RouteDecision::Allow);

    auth.sign_out().await;

    assert_eq!(
        guard.check(&auth, "profile").await,
        RouteDecision::Redirect("login")
    );
}
