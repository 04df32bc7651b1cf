//! Property-based tests for manahr-access
//!
//! These tests verify correctness properties that should hold across all inputs.

use manahr_access::{
    Action, DataAccessLevel, Module, Permission, PermissionEvaluator, Role,
};
use proptest::prelude::*;

/// Strategy for generating module or action names, known and unknown
fn segment_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("users".to_string()),
        Just("leave".to_string()),
        Just("payroll".to_string()),
        Just("read".to_string()),
        Just("approve".to_string()),
        Just("*".to_string()),
        r"[a-z]{1,8}",
    ]
}

/// Strategy for generating a permission record with independent name fields
fn permission_strategy() -> impl Strategy<Value = Permission> {
    (
        r"[a-f0-9]{4}",
        segment_strategy(),
        segment_strategy(),
        r"[a-z:_*]{1,12}",
        prop::option::of(r"[a-z:_*]{1,12}"),
    )
        .prop_map(|(id, module, action, name, full_name)| {
            Permission::new(id, Module::from(module), Action::from(action))
                .with_name(name)
                .with_full_name(full_name)
        })
}

fn level_strategy() -> impl Strategy<Value = DataAccessLevel> {
    prop_oneof![
        Just(DataAccessLevel::All),
        Just(DataAccessLevel::Team),
        Just(DataAccessLevel::Own),
    ]
}

proptest! {
    /// has_permission(n) holds iff some record has name == n or fullName == n
    #[test]
    fn prop_has_permission_matches_name_or_full_name(
        perms in prop::collection::vec(permission_strategy(), 0..8),
        query in r"[a-z:_*]{1,12}",
    ) {
        let eval = PermissionEvaluator::new(&perms, None);
        let expected = perms
            .iter()
            .any(|p| p.name == query || p.full_name.as_deref() == Some(query.as_str()));
        prop_assert_eq!(eval.has_permission(&query), expected);
    }

    /// Every record's own name is always granted
    #[test]
    fn prop_every_issued_name_is_granted(
        perms in prop::collection::vec(permission_strategy(), 1..8),
    ) {
        let eval = PermissionEvaluator::new(&perms, None);
        for perm in &perms {
            prop_assert!(eval.has_permission(&perm.name));
        }
    }

    /// has_action is a conjunction on a single record, never independent membership
    #[test]
    fn prop_has_action_is_per_record(
        perms in prop::collection::vec(permission_strategy(), 0..8),
        module in segment_strategy(),
        action in segment_strategy(),
    ) {
        let module = Module::from(module);
        let action = Action::from(action);
        let eval = PermissionEvaluator::new(&perms, None);
        let expected = perms.iter().any(|p| p.module == module && p.action == action);

        prop_assert_eq!(eval.has_action(&module, &action), expected);
        if eval.has_action(&module, &action) {
            prop_assert!(eval.has_module(&module));
        }
    }

    /// can_access_data(l) holds iff the role's level d satisfies d <= l
    #[test]
    fn prop_can_access_data_is_numeric_comparison(
        stored in level_strategy(),
        requested in level_strategy(),
        role_level in 1u8..=100,
    ) {
        let role = Role::new("r", "Role", role_level, stored).unwrap();
        let eval = PermissionEvaluator::new(&[], Some(&role));
        prop_assert_eq!(
            eval.can_access_data(requested),
            stored.value() <= requested.value()
        );
    }

    /// Without a role, data access is always denied
    #[test]
    fn prop_no_role_denies_data_access(
        perms in prop::collection::vec(permission_strategy(), 0..8),
        requested in level_strategy(),
    ) {
        let eval = PermissionEvaluator::new(&perms, None);
        prop_assert!(!eval.can_access_data(requested));
    }

    /// Evaluation is deterministic for a snapshot
    #[test]
    fn prop_evaluation_is_deterministic(
        perms in prop::collection::vec(permission_strategy(), 0..8),
        query in r"[a-z:_*]{1,12}",
    ) {
        let eval = PermissionEvaluator::new(&perms, None);
        prop_assert_eq!(eval.has_permission(&query), eval.has_permission(&query));
    }
}

#[test]
fn test_team_role_example() {
    let role = Role::new("r", "Manager", 20, DataAccessLevel::Team).unwrap();
    let eval = PermissionEvaluator::new(&[], Some(&role));

    assert!(eval.can_access_data(DataAccessLevel::Team));
    assert!(eval.can_access_data(DataAccessLevel::Own));
    assert!(!eval.can_access_data(DataAccessLevel::All));
}
