//! Executing dice expressions against a [`RandomSource`].

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{DiceError, ParseError, ParseErrorKind, RangeError};
use crate::expr::{self, DiceExpression};
use crate::source::RandomSource;

/// Hard cap on dice per expression.
pub const MAX_DICE: u32 = 100;
/// Hard cap on faces per die.
pub const MAX_SIDES: u32 = 1000;

/// Size limits checked before any die is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Limits {
    pub max_dice: u32,
    pub max_sides: u32,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_dice: MAX_DICE,
            max_sides: MAX_SIDES,
        }
    }
}

impl Limits {
    pub fn check(&self, expr: &DiceExpression) -> Result<(), RangeError> {
        if expr.count == 0 || expr.sides == 0 {
            return Err(RangeError::Empty {
                count: expr.count,
                sides: expr.sides,
            });
        }
        if expr.count > self.max_dice {
            return Err(RangeError::TooManyDice {
                count: expr.count,
                max: self.max_dice,
            });
        }
        if expr.sides > self.max_sides {
            return Err(RangeError::TooManySides {
                sides: expr.sides,
                max: self.max_sides,
            });
        }
        Ok(())
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdMode {
    #[default]
    Normal,
    Advantage,
    Disadvantage,
}

impl AdMode {
    /// Fold two sources of (dis)advantage; one of each cancels out.
    pub fn combine(self, other: AdMode) -> AdMode {
        use AdMode::*;
        match (self, other) {
            (Normal, x) | (x, Normal) => x,
            (Advantage, Advantage) => Advantage,
            (Disadvantage, Disadvantage) => Disadvantage,
            (Advantage, Disadvantage) | (Disadvantage, Advantage) => Normal,
        }
    }
}

/// How a [`RollResult`] was produced.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RollMode {
    Expression,
    Quick,
    Advantage,
    Disadvantage,
}

/// The fixed die sizes offered for one-click rolls.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Die {
    D4,
    D6,
    D8,
    D10,
    D12,
    D20,
    D100,
}

impl Die {
    pub const ALL: [Die; 7] = [
        Die::D4,
        Die::D6,
        Die::D8,
        Die::D10,
        Die::D12,
        Die::D20,
        Die::D100,
    ];

    pub fn sides(self) -> u32 {
        match self {
            Die::D4 => 4,
            Die::D6 => 6,
            Die::D8 => 8,
            Die::D10 => 10,
            Die::D12 => 12,
            Die::D20 => 20,
            Die::D100 => 100,
        }
    }

    pub fn from_sides(sides: u32) -> Option<Die> {
        Die::ALL.into_iter().find(|d| d.sides() == sides)
    }
}

impl fmt::Display for Die {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "d{}", self.sides())
    }
}

impl FromStr for Die {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let expr = expr::parse(s)?;
        if expr.count != 1 || expr.modifier != 0 {
            return Err(ParseError::new(s, ParseErrorKind::TrailingInput));
        }
        Die::from_sides(expr.sides)
            .ok_or_else(|| ParseError::new(s, ParseErrorKind::UnexpectedCharacter))
    }
}

/// One finished roll. Immutable; build a new one instead of editing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RollResult {
    label: String,
    mode: RollMode,
    total: i64,
    dice: Vec<u32>,
    modifier: i32,
    is_critical_success: bool,
    is_critical_failure: bool,
    description: String,
    timestamp: DateTime<Utc>,
}

impl RollResult {
    fn new(label: String, mode: RollMode, total: i64, dice: Vec<u32>, modifier: i32) -> Self {
        Self {
            label,
            mode,
            total,
            dice,
            modifier,
            is_critical_success: false,
            is_critical_failure: false,
            description: String::new(),
            timestamp: Utc::now(),
        }
    }

    // Only a lone d20 can crit; callers decide whether the shape qualifies.
    fn with_criticals_from_single_d20(mut self) -> Self {
        if let [face] = self.dice.as_slice() {
            self.is_critical_success = *face == 20;
            self.is_critical_failure = *face == 1;
        }
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn mode(&self) -> RollMode {
        self.mode
    }

    pub fn total(&self) -> i64 {
        self.total
    }

    /// Raw faces in the order they were drawn. Never empty.
    pub fn dice(&self) -> &[u32] {
        &self.dice
    }

    pub fn modifier(&self) -> i32 {
        self.modifier
    }

    pub fn is_critical_success(&self) -> bool {
        self.is_critical_success
    }

    pub fn is_critical_failure(&self) -> bool {
        self.is_critical_failure
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

impl fmt::Display for RollResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let faces = self
            .dice
            .iter()
            .map(|d| d.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        write!(f, "{} = {} [{}]", self.label, self.total, faces)?;
        if self.is_critical_success {
            write!(f, " CRITICAL!")?;
        } else if self.is_critical_failure {
            write!(f, " CRITICAL FAIL!")?;
        }
        Ok(())
    }
}

/// Roll an expression under the default [`Limits`].
pub fn roll(
    expr: &DiceExpression,
    source: &mut impl RandomSource,
) -> Result<RollResult, RangeError> {
    roll_within(&Limits::default(), expr, source)
}

/// Roll an expression, rejecting it up front if it is empty or exceeds `limits`.
pub fn roll_within(
    limits: &Limits,
    expr: &DiceExpression,
    source: &mut impl RandomSource,
) -> Result<RollResult, RangeError> {
    if let Err(e) = limits.check(expr) {
        tracing::debug!(expr = %expr, error = %e, "refused out-of-range roll");
        return Err(e);
    }

    let dice: Vec<u32> = (0..expr.count)
        .map(|_| source.between(1, expr.sides))
        .collect();
    let sum: i64 = dice.iter().map(|&d| i64::from(d)).sum();
    let total = sum + i64::from(expr.modifier);

    let result = RollResult::new(
        expr.to_string(),
        RollMode::Expression,
        total,
        dice,
        expr.modifier,
    );
    let result = if expr.is_single_d20() {
        result.with_criticals_from_single_d20()
    } else {
        result
    };
    tracing::debug!(label = %result.label, total = result.total, "rolled");
    Ok(result)
}

/// One die of a fixed size, no modifier.
pub fn quick_roll(die: Die, source: &mut impl RandomSource) -> RollResult {
    let face = source.between(1, die.sides());
    let result = RollResult::new(
        die.to_string(),
        RollMode::Quick,
        i64::from(face),
        vec![face],
        0,
    );
    let result = if die == Die::D20 {
        result.with_criticals_from_single_d20()
    } else {
        result
    };
    tracing::debug!(label = %result.label, total = result.total, "rolled");
    result
}

/// A d20 check. Advantage keeps the higher of two draws, disadvantage the
/// lower; neither can be a critical because two dice were rolled.
pub fn roll_d20(mode: AdMode, source: &mut impl RandomSource) -> RollResult {
    let (mode, label, description) = match mode {
        AdMode::Normal => return quick_roll(Die::D20, source),
        AdMode::Advantage => (RollMode::Advantage, "d20 (Advantage)", "Advantage Roll"),
        AdMode::Disadvantage => (
            RollMode::Disadvantage,
            "d20 (Disadvantage)",
            "Disadvantage Roll",
        ),
    };
    let first = source.between(1, 20);
    let second = source.between(1, 20);
    let kept = if mode == RollMode::Advantage {
        first.max(second)
    } else {
        first.min(second)
    };
    let result = RollResult::new(
        label.to_string(),
        mode,
        i64::from(kept),
        vec![first, second],
        0,
    )
    .with_description(description);
    tracing::debug!(label = %result.label, total = result.total, "rolled");
    result
}

/// Trim, parse and roll free-form user input.
pub fn roll_expression(
    text: &str,
    source: &mut impl RandomSource,
) -> Result<RollResult, DiceError> {
    let expr = expr::parse(text.trim())?;
    Ok(roll(&expr, source)?)
}
