//! ManaHR Session Module
//!
//! The client side of authentication: who is signed in, what they may do, and
//! where navigation is allowed to go. The session snapshot survives restarts
//! through a [`SnapshotRepository`]; tokens stay with the external session
//! provider behind [`TokenProvider`].

pub mod api;
pub mod bus;
pub mod error;
pub mod guard;
pub mod identity;
pub mod models;
pub mod navigation;
pub mod store;
pub mod token;

pub use api::{ApiFailure, ApiResponse, LoginData, Pagination};
pub use bus::{EventBus, SessionEvent};
pub use error::{SessionError, SessionResult};
pub use guard::{AuthState, GuardDecision, RouteClass, RouteGuard};
pub use identity::SessionContext;
pub use models::{AuthTokens, SessionSnapshot, User, UserStatus};
pub use navigation::{visible_items, NavItem, NAV_ITEMS};
pub use store::{FileSnapshotRepository, InMemorySnapshotRepository, SnapshotRepository};
pub use token::{InMemoryTokenProvider, TokenProvider};
