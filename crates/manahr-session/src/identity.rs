//! The identity store
//!
//! [`SessionContext`] is the single source of truth for who is signed in and
//! what they may do. It is an explicit handle passed to whatever needs it;
//! there is no global instance. None of its operations fail: persistence
//! problems are logged and the in-memory state stays authoritative.

use std::sync::Arc;

use chrono::Utc;
use manahr_access::{Action, DataAccessLevel, Module, Permission, PermissionEvaluator, Role};
use tracing::{debug, info, warn};

use crate::api::{ApiFailure, LoginData};
use crate::bus::{EventBus, SessionEvent};
use crate::guard::{AuthState, GuardDecision, RouteGuard};
use crate::models::{AuthTokens, SessionSnapshot, User};
use crate::store::SnapshotRepository;
use crate::token::TokenProvider;

/// Handle to the current application session
pub struct SessionContext {
    snapshot: SessionSnapshot,
    repository: Arc<dyn SnapshotRepository>,
    tokens: Arc<dyn TokenProvider>,
    bus: EventBus,
}

impl SessionContext {
    /// Open a session, restoring whatever the repository holds
    ///
    /// A stored snapshot that cannot be read, or whose authentication flag
    /// disagrees with its user, is discarded and the session starts signed out.
    pub fn open(repository: Arc<dyn SnapshotRepository>, tokens: Arc<dyn TokenProvider>) -> Self {
        let snapshot = Self::restore(repository.as_ref());
        Self {
            snapshot,
            repository,
            tokens,
            bus: EventBus::new(),
        }
    }

    /// Publish session events on `bus` instead of a private one
    pub fn with_bus(mut self, bus: EventBus) -> Self {
        self.bus = bus;
        self
    }

    fn restore(repository: &dyn SnapshotRepository) -> SessionSnapshot {
        match repository.load() {
            Ok(Some(snapshot)) if snapshot.is_consistent() => {
                debug!(
                    authenticated = snapshot.is_authenticated,
                    permissions = snapshot.permissions.len(),
                    "Session restored"
                );
                snapshot
            }
            Ok(Some(_)) => {
                warn!("Discarding inconsistent session snapshot");
                Self::discard(repository)
            }
            Ok(None) => SessionSnapshot::default(),
            Err(e) => {
                warn!("Discarding unreadable session snapshot: {}", e);
                Self::discard(repository)
            }
        }
    }

    fn discard(repository: &dyn SnapshotRepository) -> SessionSnapshot {
        if let Err(e) = repository.clear() {
            warn!("Failed to clear session snapshot: {}", e);
        }
        SessionSnapshot::default()
    }

    /// Replace the identity wholesale and mark the session authenticated
    ///
    /// Tokens go to the session provider and are never persisted here.
    pub fn login(
        &mut self,
        user: User,
        role: Role,
        permissions: Vec<Permission>,
        access_token: impl Into<String>,
        refresh_token: impl Into<String>,
    ) {
        self.tokens
            .store_tokens(AuthTokens::new(access_token, refresh_token));

        let user_id = user.id.clone();
        self.snapshot = SessionSnapshot::authenticated(user, role, permissions);
        self.persist();

        info!(
            user_id = %user_id,
            permissions = self.snapshot.permissions.len(),
            "User logged in"
        );
        self.bus.publish(SessionEvent::LoggedIn {
            user_id,
            at: Utc::now(),
        });
    }

    /// Log in from a login response together with the identity's role
    pub fn login_with(&mut self, data: LoginData, role: Role, permissions: Vec<Permission>) {
        let LoginData {
            user,
            token,
            refresh_token,
        } = data;
        self.login(user, role, permissions, token, refresh_token);
    }

    /// Log in right after registering a new organization
    ///
    /// The registrant gets the organization-owner role and no permissions
    /// until the next refresh.
    pub fn login_registered(&mut self, data: LoginData) {
        self.login_with(data, Role::organization_owner(), Vec::new());
    }

    /// Replace user, role and permissions of the signed-in identity
    ///
    /// Returns false and changes nothing when signed out.
    pub fn refresh_identity(&mut self, user: User, role: Role, permissions: Vec<Permission>) -> bool {
        if !self.is_authenticated() {
            debug!("Ignoring identity refresh while signed out");
            return false;
        }

        let user_id = user.id.clone();
        self.snapshot = SessionSnapshot::authenticated(user, role, permissions);
        self.persist();

        debug!(user_id = %user_id, "Identity refreshed");
        self.bus.publish(SessionEvent::Refreshed { user_id });
        true
    }

    /// Sign out: clear the identity and purge cached tokens
    ///
    /// Calling it again leaves the same state.
    pub fn logout(&mut self) {
        if self.clear() {
            info!("User logged out");
            self.bus.publish(SessionEvent::LoggedOut);
        }
    }

    /// Sign out because the backend rejected the session
    pub fn expire(&mut self) {
        if self.clear() {
            warn!("Session expired");
            self.bus.publish(SessionEvent::Expired);
        }
    }

    /// React to a failed backend call
    ///
    /// A session-fatal failure expires the session and yields the redirect
    /// to the login page; anything else leaves the session alone.
    pub fn handle_failure(&mut self, failure: &ApiFailure) -> Option<GuardDecision> {
        if failure.is_session_fatal() {
            self.expire();
            Some(GuardDecision::RedirectToLogin)
        } else {
            debug!("Backend call failed: {}", failure);
            None
        }
    }

    /// Run the route guard against the current state
    pub fn guard(&self, guard: &RouteGuard, path: &str) -> GuardDecision {
        guard.decide(path, self.state())
    }

    /// Returns whether a signed-in identity was cleared
    fn clear(&mut self) -> bool {
        let was_authenticated = self.snapshot.is_authenticated;

        self.tokens.clear_tokens();
        self.snapshot = SessionSnapshot::default();
        self.persist();

        was_authenticated
    }

    fn persist(&self) {
        if let Err(e) = self.repository.save(&self.snapshot) {
            warn!("Failed to persist session snapshot: {}", e);
        }
    }

    /// Evaluator over the current snapshot
    pub fn evaluator(&self) -> PermissionEvaluator<'_> {
        self.snapshot.evaluator()
    }

    pub fn has_permission(&self, name: &str) -> bool {
        self.evaluator().has_permission(name)
    }

    pub fn has_module(&self, module: &Module) -> bool {
        self.evaluator().has_module(module)
    }

    pub fn has_action(&self, module: &Module, action: &Action) -> bool {
        self.evaluator().has_action(module, action)
    }

    pub fn can_access_data(&self, requested: DataAccessLevel) -> bool {
        self.evaluator().can_access_data(requested)
    }

    pub fn is_authenticated(&self) -> bool {
        self.snapshot.is_authenticated
    }

    pub fn state(&self) -> AuthState {
        AuthState::from_authenticated(self.is_authenticated())
    }

    pub fn user(&self) -> Option<&User> {
        self.snapshot.user.as_ref()
    }

    pub fn role(&self) -> Option<&Role> {
        self.snapshot.role.as_ref()
    }

    pub fn permissions(&self) -> &[Permission] {
        &self.snapshot.permissions
    }

    pub fn snapshot(&self) -> &SessionSnapshot {
        &self.snapshot
    }

    /// Current access token from the session provider
    pub fn access_token(&self) -> Option<String> {
        self.tokens.access_token()
    }

    pub fn subscribe(&self) -> tokio::sync::broadcast::Receiver<SessionEvent> {
        self.bus.subscribe()
    }

    pub fn events(&self) -> &EventBus {
        &self.bus
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::InMemorySnapshotRepository;
    use crate::token::InMemoryTokenProvider;

    fn context() -> (SessionContext, Arc<InMemorySnapshotRepository>, Arc<InMemoryTokenProvider>) {
        let repo = Arc::new(InMemorySnapshotRepository::new());
        let tokens = Arc::new(InMemoryTokenProvider::new());
        let ctx = SessionContext::open(repo.clone(), tokens.clone());
        (ctx, repo, tokens)
    }

    fn manager_role() -> Role {
        Role::new("r1", "Manager", 20, DataAccessLevel::Team).unwrap()
    }

    #[test]
    fn test_starts_signed_out() {
        let (ctx, _, _) = context();
        assert!(!ctx.is_authenticated());
        assert_eq!(ctx.state(), AuthState::Unauthenticated);
        assert!(ctx.user().is_none());
        assert!(!ctx.can_access_data(DataAccessLevel::Own));
    }

    #[test]
    fn test_login_sets_identity_and_tokens() {
        let (mut ctx, repo, tokens) = context();
        ctx.login(
            User::new("u1", "Asha", "asha@example.com"),
            manager_role(),
            vec![Permission::from_key("p1", "leave:approve").unwrap()],
            "at-7f3c",
            "rt-91ab",
        );

        assert!(ctx.is_authenticated());
        assert!(ctx.has_permission("leave:approve"));
        assert!(ctx.has_action(&Module::Leave, &Action::Approve));
        assert_eq!(tokens.access_token().as_deref(), Some("at-7f3c"));

        let raw = repo.raw().unwrap();
        assert!(!raw.contains("at-7f3c"));
        assert!(!raw.contains("rt-91ab"));
    }

    #[test]
    fn test_logout_clears_everything() {
        let (mut ctx, _, tokens) = context();
        ctx.login(
            User::new("u1", "Asha", "asha@example.com"),
            manager_role(),
            vec![Permission::from_key("p1", "users:read").unwrap()],
            "at",
            "rt",
        );
        ctx.logout();

        assert!(!ctx.is_authenticated());
        assert!(ctx.role().is_none());
        assert!(ctx.permissions().is_empty());
        assert!(!ctx.has_permission("users:read"));
        assert!(!ctx.has_module(&Module::Users));
        assert!(tokens.access_token().is_none());
    }

    #[test]
    fn test_refresh_ignored_when_signed_out() {
        let (mut ctx, _, _) = context();
        let refreshed = ctx.refresh_identity(User::new("u1", "A", "a@x"), manager_role(), vec![]);
        assert!(!refreshed);
        assert!(!ctx.is_authenticated());
    }

    #[test]
    fn test_non_fatal_failure_keeps_session() {
        let (mut ctx, _, _) = context();
        ctx.login(User::new("u1", "A", "a@x"), manager_role(), vec![], "at", "rt");

        let decision = ctx.handle_failure(&ApiFailure::from_response(500, "{}"));
        assert_eq!(decision, None);
        assert!(ctx.is_authenticated());
    }

    #[test]
    fn test_unauthorized_failure_expires_session() {
        let (mut ctx, _, tokens) = context();
        ctx.login(User::new("u1", "A", "a@x"), manager_role(), vec![], "at", "rt");

        let decision = ctx.handle_failure(&ApiFailure::from_response(401, "{}"));
        assert_eq!(decision, Some(GuardDecision::RedirectToLogin));
        assert!(!ctx.is_authenticated());
        assert!(tokens.access_token().is_none());
    }
}
