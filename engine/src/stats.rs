//! Observed and exact roll distributions, for Monte Carlo sanity checks.

use std::collections::BTreeMap;

use crate::expr::DiceExpression;
use crate::roll::AdMode;

/// Counts of each observed total.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Histogram {
    counts: BTreeMap<i64, u64>,
    trials: u64,
}

impl Histogram {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, total: i64) {
        *self.counts.entry(total).or_insert(0) += 1;
        self.trials += 1;
    }

    pub fn count(&self, total: i64) -> u64 {
        self.counts.get(&total).copied().unwrap_or(0)
    }

    pub fn trials(&self) -> u64 {
        self.trials
    }

    pub fn mean(&self) -> f64 {
        if self.trials == 0 {
            return 0.0;
        }
        let sum: f64 = self
            .counts
            .iter()
            .map(|(&total, &n)| total as f64 * n as f64)
            .sum();
        sum / self.trials as f64
    }

    /// `(total, count)` in ascending order of total.
    pub fn iter(&self) -> impl Iterator<Item = (i64, u64)> + '_ {
        self.counts.iter().map(|(&t, &n)| (t, n))
    }
}

impl FromIterator<i64> for Histogram {
    fn from_iter<I: IntoIterator<Item = i64>>(iter: I) -> Self {
        let mut h = Histogram::new();
        for total in iter {
            h.record(total);
        }
        h
    }
}

/// Exact probability of every reachable total of `expr`.
///
/// Built by convolving one uniform die at a time; cost grows with
/// `(count * sides)^2`.
pub fn expected_distribution(expr: &DiceExpression) -> BTreeMap<i64, f64> {
    let sides = expr.sides as usize;
    let face_p = 1.0 / expr.sides as f64;

    // ways[s] = probability that the dice so far sum to s
    let mut ways = vec![1.0_f64];
    for _ in 0..expr.count {
        let mut next = vec![0.0_f64; ways.len() + sides];
        for (sum, p) in ways.iter().enumerate() {
            if *p == 0.0 {
                continue;
            }
            for face in 1..=sides {
                next[sum + face] += p * face_p;
            }
        }
        ways = next;
    }

    ways
        .into_iter()
        .enumerate()
        .filter(|(_, p)| *p > 0.0)
        .map(|(sum, p)| (sum as i64 + i64::from(expr.modifier), p))
        .collect()
}

/// Exact distribution of a d20 check under `mode`.
pub fn expected_d20(mode: AdMode) -> BTreeMap<i64, f64> {
    (1..=20_i64)
        .map(|k| {
            let p = match mode {
                AdMode::Normal => 1.0 / 20.0,
                AdMode::Advantage => (2 * k - 1) as f64 / 400.0,
                AdMode::Disadvantage => (41 - 2 * k) as f64 / 400.0,
            };
            (k, p)
        })
        .collect()
}

/// Pearson's chi-square statistic of `observed` against `expected`
/// probabilities. Totals outside `expected` count fully against the fit.
pub fn chi_square(observed: &Histogram, expected: &BTreeMap<i64, f64>) -> f64 {
    let n = observed.trials() as f64;
    let mut stat = 0.0;
    for (&total, &p) in expected {
        let e = n * p;
        if e > 0.0 {
            let o = observed.count(total) as f64;
            stat += (o - e).powi(2) / e;
        }
    }
    let stray: u64 = observed
        .iter()
        .filter(|(t, _)| !expected.contains_key(t))
        .map(|(_, c)| c)
        .sum();
    if stray > 0 {
        // nothing expected there; any hit is an outright mismatch
        stat += stray as f64 * n;
    }
    stat
}
