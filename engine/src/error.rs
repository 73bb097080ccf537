use thiserror::Error;

/// Why an expression failed to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    Empty,
    MissingDie,
    MissingSides,
    ZeroCount,
    ZeroSides,
    BadModifier,
    TrailingInput,
    UnexpectedCharacter,
}

impl ParseErrorKind {
    fn describe(self) -> &'static str {
        match self {
            ParseErrorKind::Empty => "expression is empty",
            ParseErrorKind::MissingDie => "expected 'd'",
            ParseErrorKind::MissingSides => "expected the number of sides after 'd'",
            ParseErrorKind::ZeroCount => "dice count must be at least 1",
            ParseErrorKind::ZeroSides => "die sides must be at least 1",
            ParseErrorKind::BadModifier => "modifier must be a whole number after '+' or '-'",
            ParseErrorKind::TrailingInput => "unexpected text after the expression",
            ParseErrorKind::UnexpectedCharacter => "unexpected character",
        }
    }
}

/// Input text did not match `[count]d<sides>[+|-modifier]`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid dice expression '{input}': {} (use forms like d20, 2d6, 3d8+5, 1d20-2)", .kind.describe())]
pub struct ParseError {
    pub input: String,
    pub kind: ParseErrorKind,
}

impl ParseError {
    pub(crate) fn new(input: &str, kind: ParseErrorKind) -> Self {
        Self {
            input: input.to_string(),
            kind,
        }
    }
}

/// An expression asked for no dice at all, or more dice or sides than allowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RangeError {
    #[error("cannot roll {count}d{sides}: dice count and sides must both be at least 1")]
    Empty { count: u32, sides: u32 },
    #[error("too many dice: {count} requested, at most {max} allowed")]
    TooManyDice { count: u32, max: u32 },
    #[error("too many sides: d{sides} requested, at most d{max} allowed")]
    TooManySides { sides: u32, max: u32 },
}

/// Either failure of the combined parse-then-roll path.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiceError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Range(#[from] RangeError),
}

impl DiceError {
    pub fn is_parse(&self) -> bool {
        matches!(self, DiceError::Parse(_))
    }

    pub fn is_range(&self) -> bool {
        matches!(self, DiceError::Range(_))
    }
}
