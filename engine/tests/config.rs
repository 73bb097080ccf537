use std::io::Write;

use dice_engine::{Limits, RollerConfig};

#[test]
fn empty_json_uses_defaults() {
    let cfg = RollerConfig::from_text("{}", Some("json")).unwrap();
    assert_eq!(cfg, RollerConfig::default());
    assert_eq!(cfg.limits(), Limits::default());
    assert_eq!(cfg.history_capacity, 20);
}

#[test]
fn yaml_overrides_fields() {
    let cfg = RollerConfig::from_text("max_dice: 12\nseed: 9\n", Some("yml")).unwrap();
    assert_eq!(cfg.max_dice, 12);
    assert_eq!(cfg.max_sides, 1000);
    assert_eq!(cfg.seed, Some(9));
}

#[test]
fn limits_above_the_hard_caps_are_rejected() {
    let err = RollerConfig::from_text(r#"{"max_dice": 500}"#, None).unwrap_err();
    assert!(err.to_string().contains("max_dice"));
    assert!(RollerConfig::from_text(r#"{"max_sides": 0}"#, None).is_err());
}

#[test]
fn loads_from_a_file_by_extension() {
    let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
    writeln!(file, "history_capacity: 5").unwrap();
    let cfg = RollerConfig::from_path(file.path()).unwrap();
    assert_eq!(cfg.history_capacity, 5);
}

#[test]
fn missing_file_reports_the_path() {
    let err = RollerConfig::from_path("/definitely/not/here.json").unwrap_err();
    assert!(format!("{err:#}").contains("/definitely/not/here.json"));
}

#[test]
fn oversized_history_capacity_is_rejected() {
    let err = RollerConfig::from_text(r#"{"history_capacity": 18446744073709551615}"#, None)
        .unwrap_err();
    assert!(err.to_string().contains("history_capacity"));
    assert!(RollerConfig::from_text(r#"{"history_capacity": 1000}"#, None).is_ok());
}

#[test]
fn large_history_capacity_does_not_preallocate() {
    let history = dice_engine::RollHistory::new(usize::MAX);
    assert_eq!(history.capacity(), usize::MAX);
    assert!(history.is_empty());
}
