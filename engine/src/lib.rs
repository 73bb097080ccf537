//! Dice engine for the tabletop companion: parse `NdM±K` notation, roll it
//! against an injectable randomness source, and tag natural 20s and 1s.

pub mod character;
pub mod config;
pub mod error;
pub mod expr;
pub mod history;
pub mod roll;
pub mod roller;
pub mod session;
pub mod source;
pub mod stats;

pub use character::{
    ability_modifier, format_modifier, passive_perception, proficiency_bonus,
    starting_armor_class, CharacterClass,
};
pub use config::RollerConfig;
pub use error::{DiceError, ParseError, ParseErrorKind, RangeError};
pub use expr::{parse, DiceExpression};
pub use history::RollHistory;
pub use roll::{
    quick_roll, roll, roll_d20, roll_expression, roll_within, AdMode, Die, Limits, RollMode,
    RollResult, MAX_DICE, MAX_SIDES,
};
pub use roller::Roller;
pub use session::SessionCode;
pub use source::{Dice, RandomSource, ScriptedDice};
