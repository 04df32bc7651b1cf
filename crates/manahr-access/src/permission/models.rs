//! Permission data models

use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{AccessError, Result};

/// Functional area a permission belongs to
///
/// Values the backend issues outside the known set are kept verbatim in
/// [`Module::Other`] so a new module never breaks deserialization.
/// Equality and hashing go by wire name, so `Other("users")` equals `Users`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Module {
    Users,
    Employees,
    Attendance,
    Leave,
    Leaves,
    Payroll,
    Documents,
    Settings,
    Reports,
    Dashboard,
    System,
    Roles,
    Other(String),
}

impl Module {
    /// Wire name of the module
    pub fn as_str(&self) -> &str {
        match self {
            Module::Users => "users",
            Module::Employees => "employees",
            Module::Attendance => "attendance",
            Module::Leave => "leave",
            Module::Leaves => "leaves",
            Module::Payroll => "payroll",
            Module::Documents => "documents",
            Module::Settings => "settings",
            Module::Reports => "reports",
            Module::Dashboard => "dashboard",
            Module::System => "system",
            Module::Roles => "roles",
            Module::Other(name) => name,
        }
    }
}

impl From<&str> for Module {
    fn from(s: &str) -> Self {
        match s {
            "users" => Module::Users,
            "employees" => Module::Employees,
            "attendance" => Module::Attendance,
            "leave" => Module::Leave,
            "leaves" => Module::Leaves,
            "payroll" => Module::Payroll,
            "documents" => Module::Documents,
            "settings" => Module::Settings,
            "reports" => Module::Reports,
            "dashboard" => Module::Dashboard,
            "system" => Module::System,
            "roles" => Module::Roles,
            other => Module::Other(other.to_string()),
        }
    }
}

impl From<String> for Module {
    fn from(s: String) -> Self {
        Module::from(s.as_str())
    }
}

impl From<Module> for String {
    fn from(module: Module) -> Self {
        module.as_str().to_string()
    }
}

impl PartialEq for Module {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Eq for Module {}

impl Hash for Module {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_str().hash(state);
    }
}

impl fmt::Display for Module {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Operation a permission grants within its module
///
/// Compared by wire name, like [`Module`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Action {
    Create,
    Read,
    Update,
    Delete,
    Approve,
    Export,
    Import,
    Configure,
    Manage,
    Other(String),
}

impl Action {
    /// Wire name of the action
    pub fn as_str(&self) -> &str {
        match self {
            Action::Create => "create",
            Action::Read => "read",
            Action::Update => "update",
            Action::Delete => "delete",
            Action::Approve => "approve",
            Action::Export => "export",
            Action::Import => "import",
            Action::Configure => "configure",
            Action::Manage => "manage",
            Action::Other(name) => name,
        }
    }
}

impl From<&str> for Action {
    fn from(s: &str) -> Self {
        match s {
            "create" => Action::Create,
            "read" => Action::Read,
            "update" => Action::Update,
            "delete" => Action::Delete,
            "approve" => Action::Approve,
            "export" => Action::Export,
            "import" => Action::Import,
            "configure" => Action::Configure,
            "manage" => Action::Manage,
            other => Action::Other(other.to_string()),
        }
    }
}

impl From<String> for Action {
    fn from(s: String) -> Self {
        Action::from(s.as_str())
    }
}

impl From<Action> for String {
    fn from(action: Action) -> Self {
        action.as_str().to_string()
    }
}

impl PartialEq for Action {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Eq for Action {}

impl Hash for Action {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_str().hash(state);
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Typed `module:action` pair
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PermissionKey {
    pub module: Module,
    pub action: Action,
}

impl PermissionKey {
    pub fn new(module: Module, action: Action) -> Self {
        Self { module, action }
    }
}

impl fmt::Display for PermissionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.module, self.action)
    }
}

impl FromStr for PermissionKey {
    type Err = AccessError;

    fn from_str(s: &str) -> Result<Self> {
        match s.split_once(':') {
            Some((module, action)) if !module.is_empty() && !action.is_empty() => {
                Ok(Self::new(Module::from(module), Action::from(action)))
            }
            _ => Err(AccessError::InvalidPermissionKey(s.to_string())),
        }
    }
}

/// A capability record issued by the backend
///
/// Immutable once issued and identified by `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Permission {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub module: Module,
    pub action: Action,
    /// Conventionally `module:action`; absent when the backend omits the virtual
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub is_system_permission: bool,
}

fn default_true() -> bool {
    true
}

impl Permission {
    /// Create a permission whose name and full name are both `module:action`
    pub fn new(id: impl Into<String>, module: Module, action: Action) -> Self {
        let key = PermissionKey::new(module.clone(), action.clone()).to_string();
        Self {
            id: id.into(),
            name: key.clone(),
            display_name: String::new(),
            description: None,
            module,
            action,
            full_name: Some(key),
            is_active: true,
            is_system_permission: false,
        }
    }

    /// Create a permission from a `module:action` string
    pub fn from_key(id: impl Into<String>, key: &str) -> Result<Self> {
        let key: PermissionKey = key.parse()?;
        Ok(Self::new(id, key.module, key.action))
    }

    /// Override the record's `name`
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Override the record's `fullName`
    pub fn with_full_name(mut self, full_name: Option<String>) -> Self {
        self.full_name = full_name;
        self
    }

    /// The typed key of this record
    pub fn key(&self) -> PermissionKey {
        PermissionKey::new(self.module.clone(), self.action.clone())
    }

    /// Whether `name` equals this record's name or full name
    pub fn is_named(&self, name: &str) -> bool {
        self.name == name || self.full_name.as_deref() == Some(name)
    }
}
