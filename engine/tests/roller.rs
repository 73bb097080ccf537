use dice_engine::{AdMode, Die, Roller, RollerConfig, ScriptedDice};

#[test]
fn successful_rolls_are_recorded_newest_first() {
    let mut roller = Roller::new(ScriptedDice::new(vec![3, 4, 5, 6]));
    roller.quick(Die::D6);
    roller.roll_text("2d6+1").unwrap();
    roller.d20(AdMode::Normal);

    let labels: Vec<&str> = roller.history().iter().map(|r| r.label()).collect();
    assert_eq!(labels, vec!["d20", "2d6+1", "d6"]);
    assert_eq!(roller.history().latest().unwrap().total(), 6);
}

#[test]
fn rejected_rolls_leave_history_untouched() {
    let mut roller = Roller::new(ScriptedDice::new(vec![3]));
    assert!(roller.roll_text("nope").unwrap_err().is_parse());
    assert!(roller.roll_text("101d6").unwrap_err().is_range());
    assert!(roller.history().is_empty());
    assert_eq!(roller.source_mut().draws(), 0);
}

#[test]
fn history_keeps_the_twenty_most_recent() {
    let mut roller = Roller::new(ScriptedDice::new((1..=25).collect()));
    for _ in 0..25 {
        roller.quick(Die::D100);
    }
    let history = roller.history();
    assert_eq!(history.len(), 20);
    assert_eq!(history.capacity(), 20);
    let totals: Vec<i64> = history.iter().map(|r| r.total()).collect();
    assert_eq!(totals.first(), Some(&25));
    assert_eq!(totals.last(), Some(&6));
}

#[test]
fn clear_history_empties_the_log() {
    let mut roller = Roller::new(ScriptedDice::new(vec![2]));
    roller.quick(Die::D4);
    roller.clear_history();
    assert!(roller.history().is_empty());
}

#[test]
fn configured_limits_tighten_the_tray() {
    let cfg = RollerConfig {
        max_dice: 10,
        max_sides: 20,
        history_capacity: 2,
        seed: None,
    };
    let mut roller = Roller::with_config(ScriptedDice::new(vec![1]), &cfg);
    assert!(roller.roll_text("11d6").unwrap_err().is_range());
    assert!(roller.roll_text("1d100").unwrap_err().is_range());
    roller.roll_text("10d20").unwrap();
    roller.quick(Die::D4);
    roller.quick(Die::D6);
    assert_eq!(roller.history().len(), 2);
}

#[test]
fn zero_capacity_history_records_nothing() {
    let cfg = RollerConfig {
        history_capacity: 0,
        ..RollerConfig::default()
    };
    let mut roller = Roller::with_config(ScriptedDice::new(vec![5]), &cfg);
    let r = roller.quick(Die::D8);
    assert_eq!(r.total(), 5);
    assert!(roller.history().is_empty());
}

#[test]
fn seeded_config_is_reproducible() {
    let cfg = RollerConfig {
        seed: Some(31337),
        ..RollerConfig::default()
    };
    let mut a = Roller::from_config(&cfg);
    let mut b = Roller::from_config(&cfg);
    for _ in 0..10 {
        assert_eq!(
            a.roll_text("4d6").unwrap().dice(),
            b.roll_text("4d6").unwrap().dice()
        );
    }
}
