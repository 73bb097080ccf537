use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::source::RandomSource;

pub const SESSION_CODE_LEN: usize = 6;
const ALPHABET: &[u8; 36] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionCodeError {
    #[error("session code must be 6 characters, got {0}")]
    Length(usize),
    #[error("session code may only contain A-Z and 0-9, found '{0}'")]
    Character(char),
}

/// Short join code players type in to find a table.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SessionCode(String);

impl SessionCode {
    pub fn generate(source: &mut impl RandomSource) -> Self {
        let last = ALPHABET.len() as u32 - 1;
        let code = (0..SESSION_CODE_LEN)
            .map(|_| char::from(ALPHABET[source.between(0, last) as usize]))
            .collect();
        Self(code)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for SessionCode {
    type Err = SessionCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        let len = upper.chars().count();
        if len != SESSION_CODE_LEN {
            return Err(SessionCodeError::Length(len));
        }
        if let Some(bad) = upper.chars().find(|c| !c.is_ascii_uppercase() && !c.is_ascii_digit()) {
            return Err(SessionCodeError::Character(bad));
        }
        Ok(Self(upper))
    }
}

impl TryFrom<String> for SessionCode {
    type Error = SessionCodeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SessionCode> for String {
    fn from(code: SessionCode) -> Self {
        code.0
    }
}
