use crate::config::RollerConfig;
use crate::error::{DiceError, ParseError, RangeError};
use crate::expr::{self, DiceExpression};
use crate::history::RollHistory;
use crate::roll::{self, AdMode, Die, Limits, RollResult};
use crate::source::{Dice, RandomSource};

/// A dice tray: one randomness source, its limits, and recent results.
///
/// Successful rolls land in the history; rejected ones leave no trace.
#[derive(Debug, Clone)]
pub struct Roller<S = Dice> {
    source: S,
    limits: Limits,
    history: RollHistory,
}

impl Roller<Dice> {
    /// Build from config, seeding from `config.seed` when set.
    pub fn from_config(config: &RollerConfig) -> Self {
        let dice = match config.seed {
            Some(seed) => Dice::from_seed(seed),
            None => Dice::from_entropy(),
        };
        Self::with_config(dice, config)
    }
}

impl<S: RandomSource> Roller<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            limits: Limits::default(),
            history: RollHistory::default(),
        }
    }

    pub fn with_config(source: S, config: &RollerConfig) -> Self {
        Self {
            source,
            limits: config.limits(),
            history: RollHistory::new(config.history_capacity),
        }
    }

    pub fn limits(&self) -> Limits {
        self.limits
    }

    pub fn parse(&self, text: &str) -> Result<DiceExpression, ParseError> {
        expr::parse(text)
    }

    pub fn roll(&mut self, expr: &DiceExpression) -> Result<RollResult, RangeError> {
        let result = roll::roll_within(&self.limits, expr, &mut self.source)?;
        Ok(self.record(result))
    }

    /// Trim, parse and roll user input.
    pub fn roll_text(&mut self, text: &str) -> Result<RollResult, DiceError> {
        let expr = expr::parse(text.trim())?;
        Ok(self.roll(&expr)?)
    }

    pub fn quick(&mut self, die: Die) -> RollResult {
        let result = roll::quick_roll(die, &mut self.source);
        self.record(result)
    }

    pub fn d20(&mut self, mode: AdMode) -> RollResult {
        let result = roll::roll_d20(mode, &mut self.source);
        self.record(result)
    }

    pub fn history(&self) -> &RollHistory {
        &self.history
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    fn record(&mut self, result: RollResult) -> RollResult {
        self.history.push(result.clone());
        result
    }
}
