//! Named checks used by the dashboard pages

use std::fmt;

use crate::permission::PermissionEvaluator;

/// An action a dashboard page gates on, mapped to the permission it needs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    ViewUsers,
    CreateUsers,
    UpdateUsers,
    DeleteUsers,
    ViewAttendance,
    ManageAttendance,
    ViewLeaves,
    ApproveLeaves,
    ViewPayroll,
    ManagePayroll,
    ViewDocuments,
    ManageDocuments,
    ManageRoles,
    ManageSettings,
}

impl Capability {
    pub const ALL: [Capability; 14] = [
        Capability::ViewUsers,
        Capability::CreateUsers,
        Capability::UpdateUsers,
        Capability::DeleteUsers,
        Capability::ViewAttendance,
        Capability::ManageAttendance,
        Capability::ViewLeaves,
        Capability::ApproveLeaves,
        Capability::ViewPayroll,
        Capability::ManagePayroll,
        Capability::ViewDocuments,
        Capability::ManageDocuments,
        Capability::ManageRoles,
        Capability::ManageSettings,
    ];

    /// Permission name that grants this capability
    pub fn required_permission(&self) -> &'static str {
        match self {
            Capability::ViewUsers => "users:read",
            Capability::CreateUsers => "users:create",
            Capability::UpdateUsers => "users:update",
            Capability::DeleteUsers => "users:delete",
            Capability::ViewAttendance => "attendance:read",
            Capability::ManageAttendance => "attendance:create",
            Capability::ViewLeaves => "leaves:read",
            Capability::ApproveLeaves => "leaves:approve",
            Capability::ViewPayroll => "payroll:read",
            Capability::ManagePayroll => "payroll:create",
            Capability::ViewDocuments => "documents:read",
            Capability::ManageDocuments => "documents:create",
            Capability::ManageRoles => "roles:manage",
            Capability::ManageSettings => "settings:manage",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.required_permission())
    }
}

/// Built-in role names the dashboard recognizes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoleName {
    Admin,
    Manager,
    Employee,
}

impl RoleName {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoleName::Admin => "Admin",
            RoleName::Manager => "Manager",
            RoleName::Employee => "Employee",
        }
    }
}

impl<'a> PermissionEvaluator<'a> {
    /// Whether the snapshot grants `capability`
    pub fn can(&self, capability: Capability) -> bool {
        self.has_permission(capability.required_permission())
    }

    /// Every capability the snapshot grants, in declaration order
    pub fn capabilities(&self) -> Vec<Capability> {
        Capability::ALL
            .iter()
            .copied()
            .filter(|c| self.can(*c))
            .collect()
    }

    /// Whether the role is named `name`; no role means false
    pub fn is_role(&self, name: RoleName) -> bool {
        self.role().map(|r| r.name == name.as_str()).unwrap_or(false)
    }

    pub fn is_admin(&self) -> bool {
        self.is_role(RoleName::Admin)
    }

    pub fn is_manager(&self) -> bool {
        self.is_role(RoleName::Manager)
    }

    pub fn is_employee(&self) -> bool {
        self.is_role(RoleName::Employee)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::permission::Permission;
    use crate::role::{DataAccessLevel, Role};

    #[test]
    fn test_capability_maps_to_permission() {
        let perms = vec![
            Permission::from_key("1", "users:read").unwrap(),
            Permission::from_key("2", "leaves:approve").unwrap(),
        ];
        let eval = PermissionEvaluator::new(&perms, None);

        assert!(eval.can(Capability::ViewUsers));
        assert!(eval.can(Capability::ApproveLeaves));
        assert!(!eval.can(Capability::DeleteUsers));
        assert_eq!(
            eval.capabilities(),
            vec![Capability::ViewUsers, Capability::ApproveLeaves]
        );
    }

    #[test]
    fn test_capability_display() {
        assert_eq!(Capability::ManageRoles.to_string(), "roles:manage");
    }

    #[test]
    fn test_role_name_checks() {
        let role = Role::new("r", "Manager", 10, DataAccessLevel::Team).unwrap();
        let eval = PermissionEvaluator::new(&[], Some(&role));

        assert!(eval.is_manager());
        assert!(!eval.is_admin());
        assert!(!eval.is_employee());
    }

    #[test]
    fn test_role_name_checks_without_role() {
        let eval = PermissionEvaluator::empty();
        assert!(!eval.is_admin());
        assert!(!eval.is_manager());
        assert!(!eval.is_employee());
    }

    #[test]
    fn test_role_name_is_case_sensitive() {
        let role = Role::new("r", "admin", 1, DataAccessLevel::All).unwrap();
        let eval = PermissionEvaluator::new(&[], Some(&role));
        assert!(!eval.is_admin());
    }
}
