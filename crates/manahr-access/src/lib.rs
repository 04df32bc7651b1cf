//! ManaHR access model
//!
//! Permission records, roles with their data-access scope, and the pure
//! evaluator the dashboard consults to decide what a signed-in user may see
//! and do. Every check fails closed: missing data means no access.

pub mod capability;
pub mod error;
pub mod permission;
pub mod role;

pub use capability::{Capability, RoleName};
pub use error::{AccessError, Result};
pub use permission::{Action, Module, Permission, PermissionEvaluator, PermissionKey};
pub use role::{DataAccessLevel, Role, RolePermission};
