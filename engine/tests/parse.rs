use dice_engine::{parse, DiceExpression, ParseErrorKind};
use insta::assert_snapshot;

fn expr(count: u32, sides: u32, modifier: i32) -> DiceExpression {
    DiceExpression {
        count,
        sides,
        modifier,
    }
}

#[test]
fn bare_die_defaults_count_and_modifier() {
    assert_eq!(parse("d20").unwrap(), expr(1, 20, 0));
}

#[test]
fn count_sides_and_positive_modifier() {
    assert_eq!(parse("3d6+2").unwrap(), expr(3, 6, 2));
}

#[test]
fn negative_modifier() {
    assert_eq!(parse("1d20-1").unwrap(), expr(1, 20, -1));
}

#[test]
fn garbage_is_rejected() {
    assert_eq!(parse("abc").unwrap_err().kind, ParseErrorKind::MissingDie);
    assert_eq!(parse("").unwrap_err().kind, ParseErrorKind::Empty);
    assert_eq!(parse("d").unwrap_err().kind, ParseErrorKind::MissingSides);
}

#[test]
fn partial_matches_are_rejected() {
    for bad in [
        " d20", "d20 ", "2d6+", "2d6+1x", "x2d6", "2 d6", "2d 6", "2d6 +1", "2d6++1", "2d6+-1",
        "2d6+1+1", "2x6", "1.5d6", "-1d6",
    ] {
        assert!(parse(bad).is_err(), "{bad:?} should not parse");
    }
}

#[test]
fn zero_dice_or_sides_are_rejected() {
    assert_eq!(parse("0d6").unwrap_err().kind, ParseErrorKind::ZeroCount);
    assert_eq!(parse("2d0").unwrap_err().kind, ParseErrorKind::ZeroSides);
}

#[test]
fn leading_zeros_are_just_digits() {
    assert_eq!(parse("02d06+03").unwrap(), expr(2, 6, 3));
}

#[test]
fn error_message_names_the_input() {
    let err = parse("2d").unwrap_err();
    assert_snapshot!(err.to_string(), @"invalid dice expression '2d': expected the number of sides after 'd' (use forms like d20, 2d6, 3d8+5, 1d20-2)");
}

#[test]
fn display_is_canonical() {
    assert_snapshot!(parse("d20").unwrap().to_string(), @"1d20");
    assert_snapshot!(parse("4D8+0").unwrap().to_string(), @"4d8");
    assert_snapshot!(parse("2d6-3").unwrap().to_string(), @"2d6-3");
}

#[test]
fn from_str_matches_parse() {
    let e: DiceExpression = "2d10+4".parse().unwrap();
    assert_eq!(e, expr(2, 10, 4));
}
