//! Permission evaluation over a session snapshot

use crate::permission::models::{Action, Module, Permission, PermissionKey};
use crate::role::{DataAccessLevel, Role};

/// Read-only view answering access questions for one session snapshot
///
/// Every query is a linear scan with no caching, so results always reflect
/// exactly the borrowed permissions and role. An empty snapshot denies
/// everything.
#[derive(Debug, Clone, Copy)]
pub struct PermissionEvaluator<'a> {
    permissions: &'a [Permission],
    role: Option<&'a Role>,
}

impl<'a> PermissionEvaluator<'a> {
    /// Create an evaluator over a permission list and optional role
    pub fn new(permissions: &'a [Permission], role: Option<&'a Role>) -> Self {
        Self { permissions, role }
    }

    /// Evaluator that denies every check
    pub fn empty() -> Self {
        Self {
            permissions: &[],
            role: None,
        }
    }

    /// True if any record's `name` or `fullName` equals `name` exactly
    pub fn has_permission(&self, name: &str) -> bool {
        self.permissions.iter().any(|p| p.is_named(name))
    }

    /// True if any of `names` passes [`Self::has_permission`]
    pub fn has_any_permission<S: AsRef<str>>(&self, names: &[S]) -> bool {
        names.iter().any(|n| self.has_permission(n.as_ref()))
    }

    /// True if any record belongs to `module`
    pub fn has_module(&self, module: &Module) -> bool {
        self.permissions.iter().any(|p| &p.module == module)
    }

    /// True if a single record matches both `module` and `action`
    pub fn has_action(&self, module: &Module, action: &Action) -> bool {
        self.permissions
            .iter()
            .any(|p| &p.module == module && &p.action == action)
    }

    /// Typed form of [`Self::has_action`]
    pub fn has_key(&self, key: &PermissionKey) -> bool {
        self.has_action(&key.module, &key.action)
    }

    /// True if the role's scope covers `requested`; no role means false
    pub fn can_access_data(&self, requested: DataAccessLevel) -> bool {
        self.role
            .map(|role| role.can_access(requested))
            .unwrap_or(false)
    }

    /// The role this evaluator consults
    pub fn role(&self) -> Option<&'a Role> {
        self.role
    }

    /// The permissions this evaluator consults
    pub fn permissions(&self) -> &'a [Permission] {
        self.permissions
    }
}
