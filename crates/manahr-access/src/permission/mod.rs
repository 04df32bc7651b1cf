//! Permission records and evaluation

pub mod checker;
pub mod models;

pub use checker::PermissionEvaluator;
pub use models::{Action, Module, Permission, PermissionKey};
