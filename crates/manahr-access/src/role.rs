//! Roles and data-access scope

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{AccessError, Result};
use crate::permission::Permission;

/// Lowest valid role level
pub const MIN_ROLE_LEVEL: u8 = 1;
/// Highest valid role level
pub const MAX_ROLE_LEVEL: u8 = 100;

/// Which records a role may see
///
/// Ordered by numeric value: a lower value is a broader scope, so
/// `All < Team < Own`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum DataAccessLevel {
    /// Every record in the organization
    All = 1,
    /// Records of the user's team
    Team = 2,
    /// The user's own records only
    Own = 3,
}

impl DataAccessLevel {
    pub fn value(&self) -> u8 {
        *self as u8
    }
}

impl TryFrom<u8> for DataAccessLevel {
    type Error = AccessError;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            1 => Ok(DataAccessLevel::All),
            2 => Ok(DataAccessLevel::Team),
            3 => Ok(DataAccessLevel::Own),
            other => Err(AccessError::InvalidDataAccessLevel(other)),
        }
    }
}

impl From<DataAccessLevel> for u8 {
    fn from(level: DataAccessLevel) -> Self {
        level.value()
    }
}

impl fmt::Display for DataAccessLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataAccessLevel::All => write!(f, "all"),
            DataAccessLevel::Team => write!(f, "team"),
            DataAccessLevel::Own => write!(f, "own"),
        }
    }
}

/// A role's permission entry, either populated or a bare id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RolePermission {
    Populated(Permission),
    Id(String),
}

impl RolePermission {
    pub fn id(&self) -> &str {
        match self {
            RolePermission::Populated(perm) => &perm.id,
            RolePermission::Id(id) => id,
        }
    }
}

/// A named bundle of permissions with a priority level and data scope
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Role {
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Priority, 1 to 100
    #[serde(deserialize_with = "deserialize_level")]
    pub level: u8,
    pub data_access_level: DataAccessLevel,
    #[serde(default)]
    pub permissions: Vec<RolePermission>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub is_system_role: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization_code: Option<String>,
}

fn default_true() -> bool {
    true
}

fn check_level(level: u8) -> Result<u8> {
    if (MIN_ROLE_LEVEL..=MAX_ROLE_LEVEL).contains(&level) {
        Ok(level)
    } else {
        Err(AccessError::InvalidRoleLevel(level))
    }
}

fn deserialize_level<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<u8, D::Error> {
    let level = u8::deserialize(deserializer)?;
    check_level(level).map_err(serde::de::Error::custom)
}

impl Role {
    /// Create a role, rejecting a level outside 1..=100
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        level: u8,
        data_access_level: DataAccessLevel,
    ) -> Result<Self> {
        let level = check_level(level)?;
        let name = name.into();
        Ok(Self {
            id: id.into(),
            display_name: name.clone(),
            name,
            description: None,
            level,
            data_access_level,
            permissions: Vec::new(),
            is_active: true,
            is_system_role: false,
            organization_code: None,
        })
    }

    /// The role assumed right after registering a new organization:
    /// top priority, unrestricted data scope, no permissions yet
    pub fn organization_owner() -> Self {
        Self {
            id: String::new(),
            name: String::new(),
            display_name: String::new(),
            description: None,
            level: MIN_ROLE_LEVEL,
            data_access_level: DataAccessLevel::All,
            permissions: Vec::new(),
            is_active: true,
            is_system_role: false,
            organization_code: None,
        }
    }

    /// Attach permissions to the role
    pub fn with_permissions(mut self, permissions: Vec<Permission>) -> Self {
        self.permissions = permissions.into_iter().map(RolePermission::Populated).collect();
        self
    }

    /// Whether the role may see records at `requested` scope
    pub fn can_access(&self, requested: DataAccessLevel) -> bool {
        self.data_access_level <= requested
    }
}
