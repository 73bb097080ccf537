use dice_engine::stats::{chi_square, expected_d20, expected_distribution, Histogram};
use dice_engine::{roll, roll_d20, AdMode, Dice, DiceExpression, RollMode, ScriptedDice};

// Pearson chi-square critical value for 19 degrees of freedom at p = 0.001.
const CHI2_CRIT_DF19: f64 = 43.82;
const TRIALS: u32 = 10_000;

#[test]
fn advantage_keeps_the_higher_die_in_draw_order() {
    let mut dice = ScriptedDice::new(vec![7, 20]);
    let res = roll_d20(AdMode::Advantage, &mut dice);
    assert_eq!(res.dice(), &[7, 20]);
    assert_eq!(res.total(), 20);
    assert_eq!(res.label(), "d20 (Advantage)");
    assert_eq!(res.mode(), RollMode::Advantage);
    assert_eq!(res.description(), "Advantage Roll");
}

#[test]
fn disadvantage_keeps_the_lower_die_in_draw_order() {
    let mut dice = ScriptedDice::new(vec![20, 7]);
    let res = roll_d20(AdMode::Disadvantage, &mut dice);
    assert_eq!(res.dice(), &[20, 7]);
    assert_eq!(res.total(), 7);
    assert_eq!(res.label(), "d20 (Disadvantage)");
}

#[test]
fn no_crit_on_advantage_even_when_twenty_is_kept() {
    let mut dice = ScriptedDice::new(vec![20, 20]);
    let res = roll_d20(AdMode::Advantage, &mut dice);
    assert_eq!(res.total(), 20);
    assert!(!res.is_critical_success());
    assert!(!res.is_critical_failure());
}

#[test]
fn no_fumble_on_disadvantage_even_when_one_is_kept() {
    let mut dice = ScriptedDice::new(vec![1, 1]);
    let res = roll_d20(AdMode::Disadvantage, &mut dice);
    assert_eq!(res.total(), 1);
    assert!(!res.is_critical_success());
    assert!(!res.is_critical_failure());
}

#[test]
fn normal_mode_is_a_plain_d20() {
    let mut dice = ScriptedDice::new(vec![20]);
    let res = roll_d20(AdMode::Normal, &mut dice);
    assert_eq!(res.dice(), &[20]);
    assert!(res.is_critical_success());
    assert_eq!(dice.draws(), 1);
}

fn d20_histogram(mode: AdMode, seed: u64) -> Histogram {
    let mut dice = Dice::from_seed(seed);
    (0..TRIALS).map(|_| roll_d20(mode, &mut dice).total()).collect()
}

#[test]
fn advantage_matches_max_of_two_uniform_draws() {
    let observed = d20_histogram(AdMode::Advantage, 2025);
    assert_eq!(observed.trials(), u64::from(TRIALS));
    let stat = chi_square(&observed, &expected_d20(AdMode::Advantage));
    assert!(stat < CHI2_CRIT_DF19, "chi-square {stat:.2}");
    // E[max of two d20] = 13.825
    assert!((observed.mean() - 13.825).abs() < 0.25, "mean {}", observed.mean());
}

#[test]
fn disadvantage_matches_min_of_two_uniform_draws() {
    let observed = d20_histogram(AdMode::Disadvantage, 4242);
    let stat = chi_square(&observed, &expected_d20(AdMode::Disadvantage));
    assert!(stat < CHI2_CRIT_DF19, "chi-square {stat:.2}");
    assert!((observed.mean() - 7.175).abs() < 0.25, "mean {}", observed.mean());
}

#[test]
fn advantage_does_not_fit_a_flat_d20() {
    let observed = d20_histogram(AdMode::Advantage, 7);
    let stat = chi_square(&observed, &expected_d20(AdMode::Normal));
    assert!(stat > CHI2_CRIT_DF19 * 10.0, "chi-square {stat:.2}");
}

#[test]
fn three_d6_matches_convolved_distribution() {
    let expr = DiceExpression {
        count: 3,
        sides: 6,
        modifier: 0,
    };
    let mut dice = Dice::from_seed(11);
    let observed: Histogram = (0..TRIALS)
        .map(|_| roll(&expr, &mut dice).unwrap().total())
        .collect();
    // 16 possible totals -> 15 degrees of freedom; p = 0.001 critical value.
    let stat = chi_square(&observed, &expected_distribution(&expr));
    assert!(stat < 37.70, "chi-square {stat:.2}");
}
