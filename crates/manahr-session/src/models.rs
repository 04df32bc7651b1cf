//! Session data models

use manahr_access::{Permission, PermissionEvaluator, Role};
use serde::{Deserialize, Serialize};

/// Account status of a user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    #[default]
    Active,
    Inactive,
    Suspended,
}

/// The signed-in user as returned by the backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id")]
    pub id: String,
    pub full_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub organization: String,
    #[serde(default)]
    pub organization_code: String,
    /// Numeric role level assigned at registration
    #[serde(default)]
    pub role: u8,
    #[serde(default)]
    pub status: UserStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employee_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub designation: Option<String>,
}

impl User {
    pub fn new(id: impl Into<String>, full_name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            full_name: full_name.into(),
            email: email.into(),
            phone: String::new(),
            organization: String::new(),
            organization_code: String::new(),
            role: 1,
            status: UserStatus::Active,
            employee_code: None,
            department: None,
            designation: None,
        }
    }
}

/// Access and refresh tokens, owned by the session provider
#[derive(Clone, PartialEq, Eq)]
pub struct AuthTokens {
    pub access_token: String,
    pub refresh_token: String,
}

impl AuthTokens {
    pub fn new(access_token: impl Into<String>, refresh_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            refresh_token: refresh_token.into(),
        }
    }
}

impl std::fmt::Debug for AuthTokens {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthTokens")
            .field("access_token", &"<redacted>")
            .field("refresh_token", &"<redacted>")
            .finish()
    }
}

/// The persisted part of a session: identity and authorization, no tokens
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub user: Option<User>,
    pub role: Option<Role>,
    #[serde(default)]
    pub permissions: Vec<Permission>,
    #[serde(default)]
    pub is_authenticated: bool,
}

impl SessionSnapshot {
    /// Snapshot of a freshly signed-in identity
    pub fn authenticated(user: User, role: Role, permissions: Vec<Permission>) -> Self {
        Self {
            user: Some(user),
            role: Some(role),
            permissions,
            is_authenticated: true,
        }
    }

    /// `isAuthenticated` agrees with user presence, and a signed-out
    /// snapshot carries no role or permissions
    pub fn is_consistent(&self) -> bool {
        if self.is_authenticated != self.user.is_some() {
            return false;
        }
        self.is_authenticated || (self.role.is_none() && self.permissions.is_empty())
    }

    /// Evaluator over this snapshot
    pub fn evaluator(&self) -> PermissionEvaluator<'_> {
        PermissionEvaluator::new(&self.permissions, self.role.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use manahr_access::DataAccessLevel;

    #[test]
    fn test_user_deserializes_backend_shape() {
        let json = r#"{
            "_id": "u1",
            "fullName": "Asha Rao",
            "email": "asha@example.com",
            "phone": "555-0100",
            "organization": "Acme",
            "organizationCode": "ACME",
            "role": 3,
            "status": "active",
            "lastPasswordChange": "2024-01-01T00:00:00Z",
            "createdAt": "2024-01-01T00:00:00Z"
        }"#;
        let user: User = serde_json::from_str(json).unwrap();
        assert_eq!(user.id, "u1");
        assert_eq!(user.role, 3);
        assert_eq!(user.status, UserStatus::Active);
        assert_eq!(user.employee_code, None);
    }

    #[test]
    fn test_tokens_debug_is_redacted() {
        let tokens = AuthTokens::new("secret-access", "secret-refresh");
        let debug = format!("{:?}", tokens);
        assert!(!debug.contains("secret"));
    }

    #[test]
    fn test_snapshot_consistency() {
        assert!(SessionSnapshot::default().is_consistent());

        let role = Role::new("r", "Admin", 1, DataAccessLevel::All).unwrap();
        let snapshot = SessionSnapshot::authenticated(User::new("u", "U", "u@x"), role, vec![]);
        assert!(snapshot.is_consistent());

        let mut no_user = snapshot.clone();
        no_user.user = None;
        assert!(!no_user.is_consistent());

        let mut flag_off = snapshot;
        flag_off.is_authenticated = false;
        assert!(!flag_off.is_consistent());
    }

    #[test]
    fn test_signed_out_snapshot_with_leftover_role_is_inconsistent() {
        let snapshot = SessionSnapshot {
            role: Some(Role::new("r", "Admin", 1, DataAccessLevel::All).unwrap()),
            ..Default::default()
        };
        assert!(!snapshot.is_consistent());
    }

    #[test]
    fn test_snapshot_serializes_camel_case() {
        let value = serde_json::to_value(SessionSnapshot::default()).unwrap();
        assert_eq!(value["isAuthenticated"], false);
        assert!(value["user"].is_null());
        assert!(value.get("accessToken").is_none());
    }
}
