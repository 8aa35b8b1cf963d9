// src/guard.rs

use crate::auth::AuthProvider;

/// Destinations reachable without a session.
const PUBLIC_ROUTES: [&str; 4] = ["login", "register", "index", "forgot-password"];

/// Outcome of a navigation check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteDecision {
    Allow,
    Redirect(&'static str),
}

/// Pre-navigation gate: anonymous visitors are bounced to the login route
/// unless the destination is public. Pure gate - never mutates session or
/// profile state.
pub struct RouteGuard {
    public_routes: Vec<String>,
}

impl RouteGuard {
    pub fn new() -> Self {
        Self {
            public_routes: PUBLIC_ROUTES.iter().map(|r| r.to_string()).collect(),
        }
    }

    /// Checks a navigation to `destination`. May suspend while the auth
    /// provider finishes initializing.
    pub async fn check(&self, auth: &dyn AuthProvider, destination: &str) -> RouteDecision {
        let session = auth.current_session().await;

        if session.is_none() && !self.public_routes.iter().any(|r| r == destination) {
            return RouteDecision::Redirect("login");
        }

        RouteDecision::Allow
    }
}

impl Default for RouteGuard {
    fn default() -> Self {
        Self::new()
    }
}
