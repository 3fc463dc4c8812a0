use super::*;

fn known(versions: &[Version]) -> BTreeSet<Version> {
    versions.iter().copied().collect()
}

#[test]
fn test_migrate_default_from_uninitialized() {
    let route = plan(UNINITIALIZED, &known(&[0, 1, 2]), Request::Migrate(None)).unwrap();
    assert_eq!(route.direction(), Direction::Up);
    assert_eq!(route.versions(), &[0]);
    assert_eq!(route.from(), -1);
    assert_eq!(route.to(), 0);
}

#[test]
fn test_migrate_default_advances_one() {
    let route = plan(1, &known(&[0, 1, 2, 3]), Request::Migrate(None)).unwrap();
    assert_eq!(route.versions(), &[2]);
}

#[test]
fn test_migrate_to_target() {
    let route = plan(0, &known(&[0, 1, 2, 3]), Request::Migrate(Some(3))).unwrap();
    assert_eq!(route.versions(), &[1, 2, 3]);
    assert_eq!(route.to(), 3);
}

#[test]
fn test_migrate_to_current_is_empty() {
    let route = plan(2, &known(&[0, 1, 2]), Request::Migrate(Some(2))).unwrap();
    assert!(route.is_empty());
    assert_eq!(route.to(), 2);
}

#[test]
fn test_migrate_below_current_fails() {
    let err = plan(3, &known(&[0, 1, 2, 3]), Request::Migrate(Some(1))).unwrap_err();
    assert!(matches!(
        err,
        CoreError::InvalidMigration {
            current: 3,
            target: 1
        }
    ));
    let msg = err.to_string();
    assert!(msg.contains('3') && msg.contains('1'));
    assert!(msg.contains("lower version"));
}

#[test]
fn test_migrate_missing_file() {
    let err = plan(0, &known(&[0, 1, 2, 3]), Request::Migrate(Some(4))).unwrap_err();
    assert!(matches!(err, CoreError::MissingMigrationFile { version: 4 }));
}

#[test]
fn test_migrate_gap_reports_first_missing() {
    let err = plan(0, &known(&[0, 1, 3, 5]), Request::Migrate(Some(5))).unwrap_err();
    assert!(matches!(err, CoreError::MissingMigrationFile { version: 2 }));
}

#[test]
fn test_rollback_default_steps_back_one() {
    let route = plan(2, &known(&[0, 1, 2]), Request::Rollback(None)).unwrap();
    assert_eq!(route.direction(), Direction::Down);
    assert_eq!(route.versions(), &[2]);
    assert_eq!(route.to(), 1);
}

#[test]
fn test_rollback_to_target_descends() {
    let route = plan(3, &known(&[0, 1, 2, 3]), Request::Rollback(Some(0))).unwrap();
    assert_eq!(route.versions(), &[3, 2, 1]);
}

#[test]
fn test_rollback_bootstrap_to_uninitialized() {
    let route = plan(0, &known(&[0, 1]), Request::Rollback(None)).unwrap();
    assert_eq!(route.versions(), &[0]);
    assert_eq!(route.to(), UNINITIALIZED);
}

#[test]
fn test_rollback_above_current_fails() {
    let err = plan(1, &known(&[0, 1, 2]), Request::Rollback(Some(2))).unwrap_err();
    assert!(matches!(
        err,
        CoreError::InvalidRollback {
            current: 1,
            target: 2,
            ..
        }
    ));
    assert!(err.to_string().contains("higher version"));
}

#[test]
fn test_rollback_uninitialized_fails() {
    let err = plan(UNINITIALIZED, &known(&[0]), Request::Rollback(None)).unwrap_err();
    assert!(matches!(err, CoreError::InvalidRollback { current: -1, .. }));
}

#[test]
fn test_rollback_below_floor_fails() {
    let err = plan(1, &known(&[0, 1]), Request::Rollback(Some(-2))).unwrap_err();
    assert!(matches!(err, CoreError::InvalidRollback { target: -2, .. }));
}

#[test]
fn test_rollback_to_current_is_empty() {
    let route = plan(1, &known(&[0, 1]), Request::Rollback(Some(1))).unwrap();
    assert!(route.is_empty());
}

#[test]
fn test_rollback_missing_file() {
    let err = plan(3, &known(&[0, 1, 3]), Request::Rollback(Some(0))).unwrap_err();
    assert!(matches!(err, CoreError::MissingMigrationFile { version: 2 }));
}

#[test]
fn test_update_to_latest() {
    let route = plan(0, &known(&[0, 1, 2, 3]), Request::Update(None)).unwrap();
    assert_eq!(route.direction(), Direction::Up);
    assert_eq!(route.versions(), &[1, 2, 3]);
}

#[test]
fn test_update_down_to_target() {
    let route = plan(3, &known(&[0, 1, 2, 3]), Request::Update(Some(1))).unwrap();
    assert_eq!(route.direction(), Direction::Down);
    assert_eq!(route.versions(), &[3, 2]);
}

#[test]
fn test_update_noop() {
    assert!(plan(3, &known(&[0, 1, 2, 3]), Request::Update(None))
        .unwrap()
        .is_empty());
    assert!(plan(UNINITIALIZED, &known(&[]), Request::Update(None))
        .unwrap()
        .is_empty());
}

#[test]
fn test_reversed_route() {
    let route = plan(UNINITIALIZED, &known(&[0, 1]), Request::Migrate(Some(1))).unwrap();
    let back = route.reversed();
    assert_eq!(back.direction(), Direction::Down);
    assert_eq!(back.versions(), &[1, 0]);
    assert_eq!(back.from(), 1);
    assert_eq!(back.to(), UNINITIALIZED);
}

#[test]
fn test_routing_errors_are_classified() {
    let err = plan(0, &known(&[0]), Request::Migrate(Some(1))).unwrap_err();
    assert!(err.is_routing());
    assert!(!err.is_structural());
}
