//! Navigation access guard.
//!
//! Runs once per page request. Signed-out visitors are sent to the login page
//! with the requested path as `callbackUrl`; signed-in users hitting a login
//! or registration page are sent to the landing page. Everything else passes.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};

use crate::middleware::auth::{self, CurrentUser};
use crate::AppState;

/// Path lists driving the guard.
#[derive(Debug, Clone)]
pub struct RouteRules {
    pub protected: Vec<String>,
    pub auth_only: Vec<String>,
    pub login_path: String,
    pub landing_path: String,
}

impl Default for RouteRules {
    fn default() -> Self {
        let owned = |paths: &[&str]| -> Vec<String> { paths.iter().map(|p| p.to_string()).collect() };
        Self {
            protected: owned(&[
                "/dashboard",
                "/bookings",
                "/rooms",
                "/analytics",
                "/guests",
                "/settings",
            ]),
            auth_only: owned(&["/login", "/register", "/forgot-password"]),
            login_path: "/login".to_string(),
            landing_path: "/dashboard".to_string(),
        }
    }
}

impl RouteRules {
    pub fn is_protected(&self, path: &str) -> bool {
        self.protected.iter().any(|p| path_matches(path, p))
    }

    pub fn is_auth_only(&self, path: &str) -> bool {
        self.auth_only.iter().any(|p| path_matches(path, p))
    }
}

/// Exact match, or prefix match on a whole path segment.
fn path_matches(path: &str, rule: &str) -> bool {
    if path == rule {
        return true;
    }
    let rule = rule.trim_end_matches('/');
    if rule.is_empty() {
        return false;
    }
    path.strip_prefix(rule)
        .is_some_and(|rest| rest.starts_with('/'))
}

/// Outcome of the guard for one navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    /// Go to login; `callback` is where to return afterwards.
    RedirectToLogin { callback: String },
    RedirectToLanding,
}

impl GuardDecision {
    /// Redirect target, if any.
    pub fn location(&self, rules: &RouteRules) -> Option<String> {
        match self {
            Self::Allow => None,
            Self::RedirectToLogin { callback } => Some(format!(
                "{}?callbackUrl={}",
                rules.login_path,
                urlencoding::encode(callback)
            )),
            Self::RedirectToLanding => Some(rules.landing_path.clone()),
        }
    }
}

/// Decide what to do with a navigation to `target` (path plus optional query).
pub fn decide(target: &str, session: Option<&CurrentUser>, rules: &RouteRules) -> GuardDecision {
    let path = target.split('?').next().unwrap_or(target);
    match session {
        None if rules.is_protected(path) => GuardDecision::RedirectToLogin {
            callback: target.to_string(),
        },
        Some(_) if rules.is_auth_only(path) => GuardDecision::RedirectToLanding,
        _ => GuardDecision::Allow,
    }
}

/// Axum middleware applying [`decide`] to every request.
pub async fn access_guard(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let target = request
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| request.uri().path().to_string());
    let session = auth::optional_session(request.headers(), &state);

    let decision = decide(&target, session.as_ref(), &state.route_rules);
    match decision.location(&state.route_rules) {
        None => next.run(request).await,
        Some(location) => {
            tracing::debug!(
                path = %target,
                authenticated = session.is_some(),
                location = %location,
                "Navigation redirected"
            );
            Redirect::to(&location).into_response()
        }
    }
}
