//! Dice notation: `[count]d<sides>[+|-modifier]`.
//!
//! The scanner is anchored at both ends, so `" d6"`, `"2d6 "` and `"2d6+1x"`
//! are all rejected. Callers that accept user input trim it first.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ParseError, ParseErrorKind};

/// A parsed dice request such as `3d6+2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DiceExpression {
    pub count: u32,
    pub sides: u32,
    #[serde(default)]
    pub modifier: i32,
}

impl DiceExpression {
    /// A single die with no modifier.
    pub fn single(sides: u32) -> Self {
        Self {
            count: 1,
            sides,
            modifier: 0,
        }
    }

    /// True for exactly one d20, the only shape that can score a critical.
    pub fn is_single_d20(&self) -> bool {
        self.count == 1 && self.sides == 20
    }

    /// Lowest reachable total.
    pub fn min_total(&self) -> i64 {
        i64::from(self.count) + i64::from(self.modifier)
    }

    /// Highest reachable total.
    pub fn max_total(&self) -> i64 {
        i64::from(self.count) * i64::from(self.sides) + i64::from(self.modifier)
    }
}

impl fmt::Display for DiceExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}d{}", self.count, self.sides)?;
        match self.modifier {
            0 => Ok(()),
            m if m > 0 => write!(f, "+{}", m),
            m => write!(f, "{}", m),
        }
    }
}

impl FromStr for DiceExpression {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}

/// Parse dice notation. The whole string must match; no whitespace is skipped.
pub fn parse(text: &str) -> Result<DiceExpression, ParseError> {
    let result = Scanner::new(text).expression();
    if let Err(e) = &result {
        tracing::debug!(input = text, kind = ?e.kind, "rejected dice expression");
    }
    result
}

struct Scanner<'a> {
    input: &'a str,
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Scanner<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            input,
            bytes: input.as_bytes(),
            pos: 0,
        }
    }

    fn fail(&self, kind: ParseErrorKind) -> ParseError {
        ParseError::new(self.input, kind)
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn expression(mut self) -> Result<DiceExpression, ParseError> {
        if self.bytes.is_empty() {
            return Err(self.fail(ParseErrorKind::Empty));
        }

        let count = match self.digits() {
            Some(digits) => saturating_u32(digits),
            None => 1,
        };

        match self.peek() {
            Some(b'd' | b'D') => self.pos += 1,
            Some(_) if self.pos == 0 => return Err(self.fail(ParseErrorKind::MissingDie)),
            Some(_) => return Err(self.fail(ParseErrorKind::UnexpectedCharacter)),
            None => return Err(self.fail(ParseErrorKind::MissingDie)),
        }

        let sides = match self.digits() {
            Some(digits) => saturating_u32(digits),
            None => return Err(self.fail(ParseErrorKind::MissingSides)),
        };

        let modifier = match self.peek() {
            None => 0,
            Some(sign @ (b'+' | b'-')) => {
                self.pos += 1;
                let digits = self
                    .digits()
                    .ok_or_else(|| self.fail(ParseErrorKind::BadModifier))?;
                let magnitude: i64 = digits
                    .parse()
                    .map_err(|_| self.fail(ParseErrorKind::BadModifier))?;
                let signed = if sign == b'-' { -magnitude } else { magnitude };
                i32::try_from(signed).map_err(|_| self.fail(ParseErrorKind::BadModifier))?
            }
            Some(_) => return Err(self.fail(ParseErrorKind::TrailingInput)),
        };

        if self.pos != self.bytes.len() {
            return Err(self.fail(ParseErrorKind::TrailingInput));
        }
        if count == 0 {
            return Err(self.fail(ParseErrorKind::ZeroCount));
        }
        if sides == 0 {
            return Err(self.fail(ParseErrorKind::ZeroSides));
        }

        Ok(DiceExpression {
            count,
            sides,
            modifier,
        })
    }

    /// Consume a run of ASCII digits, if any.
    fn digits(&mut self) -> Option<&'a str> {
        let start = self.pos;
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.pos += 1;
        }
        (self.pos > start).then(|| &self.input[start..self.pos])
    }
}

// Oversized counts stay syntactically valid and are left for the range check.
fn saturating_u32(digits: &str) -> u32 {
    digits.parse().unwrap_or(u32::MAX)
}
