//! Navigation guard between public auth pages and the dashboard

use std::fmt;

use manahr_config::RouteConfig;
use tracing::debug;

/// Whether a session is present
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthState {
    Unauthenticated,
    Authenticated,
}

impl AuthState {
    pub fn from_authenticated(authenticated: bool) -> Self {
        if authenticated {
            AuthState::Authenticated
        } else {
            AuthState::Unauthenticated
        }
    }
}

/// How the guard treats a path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteClass {
    /// Dashboard family: requires a session
    Protected,
    /// Login and register pages
    PublicAuth,
    /// Anything else, e.g. forgot-password
    Open,
}

/// Outcome of a navigation request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    RedirectToLogin,
    RedirectToDashboard,
}

impl fmt::Display for GuardDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GuardDecision::Allow => write!(f, "allow"),
            GuardDecision::RedirectToLogin => write!(f, "redirect-to-login"),
            GuardDecision::RedirectToDashboard => write!(f, "redirect-to-dashboard"),
        }
    }
}

/// Decides per navigation request whether to allow or redirect
#[derive(Debug, Clone)]
pub struct RouteGuard {
    routes: RouteConfig,
}

impl RouteGuard {
    pub fn new(routes: RouteConfig) -> Self {
        Self { routes }
    }

    /// Classify a path by prefix, ignoring any query string or fragment
    ///
    /// Protected prefixes are checked first.
    pub fn classify(&self, path: &str) -> RouteClass {
        let path = strip_query(path);

        if self.routes.protected_prefixes.iter().any(|p| path.starts_with(p.as_str())) {
            RouteClass::Protected
        } else if self.routes.auth_prefixes.iter().any(|p| path.starts_with(p.as_str())) {
            RouteClass::PublicAuth
        } else {
            RouteClass::Open
        }
    }

    /// Apply the guard policy to `path` in `state`
    pub fn decide(&self, path: &str, state: AuthState) -> GuardDecision {
        let decision = match (self.classify(path), state) {
            (RouteClass::Protected, AuthState::Authenticated) => GuardDecision::Allow,
            (RouteClass::Protected, AuthState::Unauthenticated) => GuardDecision::RedirectToLogin,
            (RouteClass::PublicAuth, AuthState::Authenticated) => {
                GuardDecision::RedirectToDashboard
            }
            (RouteClass::PublicAuth, AuthState::Unauthenticated) => GuardDecision::Allow,
            (RouteClass::Open, _) => GuardDecision::Allow,
        };

        debug!(path, ?state, %decision, "Route guard evaluated");
        decision
    }

    /// Where a decision sends the visitor; `None` for [`GuardDecision::Allow`]
    pub fn redirect_target(&self, decision: GuardDecision) -> Option<&str> {
        match decision {
            GuardDecision::Allow => None,
            GuardDecision::RedirectToLogin => Some(&self.routes.login_path),
            GuardDecision::RedirectToDashboard => Some(&self.routes.dashboard_path),
        }
    }

    pub fn routes(&self) -> &RouteConfig {
        &self.routes
    }
}

impl Default for RouteGuard {
    fn default() -> Self {
        Self::new(RouteConfig::default())
    }
}

fn strip_query(path: &str) -> &str {
    match path.find(|c: char| c == '?' || c == '#') {
        Some(idx) => &path[..idx],
        None => path,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_defaults() {
        let guard = RouteGuard::default();
        assert_eq!(guard.classify("/dashboard"), RouteClass::Protected);
        assert_eq!(guard.classify("/employees/42"), RouteClass::Protected);
        assert_eq!(guard.classify("/settings"), RouteClass::Protected);
        assert_eq!(guard.classify("/login"), RouteClass::PublicAuth);
        assert_eq!(guard.classify("/register"), RouteClass::PublicAuth);
        assert_eq!(guard.classify("/forgot-password"), RouteClass::Open);
        assert_eq!(guard.classify("/"), RouteClass::Open);
    }

    #[test]
    fn test_classify_ignores_query_and_fragment() {
        let guard = RouteGuard::default();
        assert_eq!(guard.classify("/login?next=/payroll"), RouteClass::PublicAuth);
        assert_eq!(guard.classify("/?next=/payroll"), RouteClass::Open);
        assert_eq!(guard.classify("/leaves#pending"), RouteClass::Protected);
    }

    #[test]
    fn test_policy_table() {
        let guard = RouteGuard::default();
        use AuthState::*;

        assert_eq!(guard.decide("/dashboard", Authenticated), GuardDecision::Allow);
        assert_eq!(guard.decide("/dashboard", Unauthenticated), GuardDecision::RedirectToLogin);
        assert_eq!(guard.decide("/login", Authenticated), GuardDecision::RedirectToDashboard);
        assert_eq!(guard.decide("/login", Unauthenticated), GuardDecision::Allow);
        assert_eq!(guard.decide("/forgot-password", Authenticated), GuardDecision::Allow);
        assert_eq!(guard.decide("/forgot-password", Unauthenticated), GuardDecision::Allow);
    }

    #[test]
    fn test_redirect_targets() {
        let guard = RouteGuard::default();
        assert_eq!(guard.redirect_target(GuardDecision::Allow), None);
        assert_eq!(guard.redirect_target(GuardDecision::RedirectToLogin), Some("/login"));
        assert_eq!(
            guard.redirect_target(GuardDecision::RedirectToDashboard),
            Some("/dashboard")
        );
    }

    #[test]
    fn test_custom_routes() {
        let routes = RouteConfig {
            login_path: "/signin".to_string(),
            dashboard_path: "/home".to_string(),
            protected_prefixes: vec!["/home".to_string()],
            auth_prefixes: vec!["/signin".to_string()],
        };
        let guard = RouteGuard::new(routes);

        assert_eq!(guard.decide("/home", AuthState::Unauthenticated), GuardDecision::RedirectToLogin);
        assert_eq!(guard.redirect_target(GuardDecision::RedirectToLogin), Some("/signin"));
        assert_eq!(guard.decide("/dashboard", AuthState::Unauthenticated), GuardDecision::Allow);
    }

    #[test]
    fn test_auth_state_from_flag() {
        assert_eq!(AuthState::from_authenticated(true), AuthState::Authenticated);
        assert_eq!(AuthState::from_authenticated(false), AuthState::Unauthenticated);
    }
}
