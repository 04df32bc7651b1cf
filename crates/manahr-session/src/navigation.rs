//! Dashboard navigation menu

use manahr_access::PermissionEvaluator;

/// One sidebar entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavItem {
    pub label: &'static str,
    pub href: &'static str,
    /// Permission name the entry needs; `None` shows it to everyone
    pub required_permission: Option<&'static str>,
}

impl NavItem {
    pub fn is_visible(&self, evaluator: &PermissionEvaluator<'_>) -> bool {
        self.required_permission
            .map(|perm| evaluator.has_permission(perm))
            .unwrap_or(true)
    }
}

/// The dashboard sidebar, in display order
pub const NAV_ITEMS: [NavItem; 8] = [
    NavItem {
        label: "Dashboard",
        href: "/dashboard",
        required_permission: None,
    },
    NavItem {
        label: "Employees",
        href: "/employees",
        required_permission: Some("employees:read"),
    },
    NavItem {
        label: "Attendance",
        href: "/attendance",
        required_permission: Some("attendance:read"),
    },
    NavItem {
        label: "Leave Management",
        href: "/leaves",
        required_permission: Some("leave:read"),
    },
    NavItem {
        label: "Payroll",
        href: "/payroll",
        required_permission: Some("payroll:read"),
    },
    NavItem {
        label: "Documents",
        href: "/documents",
        required_permission: Some("documents:read"),
    },
    NavItem {
        label: "Roles & Permissions",
        href: "/roles",
        required_permission: Some("system:configure"),
    },
    NavItem {
        label: "Settings",
        href: "/settings",
        required_permission: Some("settings:configure"),
    },
];

/// Sidebar entries the evaluator's snapshot may see
pub fn visible_items(evaluator: &PermissionEvaluator<'_>) -> Vec<&'static NavItem> {
    NAV_ITEMS.iter().filter(|item| item.is_visible(evaluator)).collect()
}
