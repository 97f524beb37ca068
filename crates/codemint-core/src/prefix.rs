use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;
use std::fmt::Display;

pub const MIN_PREFIX_LEN: usize = 3;
pub const MAX_PREFIX_LEN: usize = 8;

/// The fixed leading part of every code in one generation request.
///
/// A prefix is 3-8 characters drawn from `A-Z` and `0-9`. Input is trimmed
/// and uppercased before validation, so `" abc "` parses as `ABC`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Prefix(SmolStr);

impl Prefix {
    /// Normalizes and validates a user supplied prefix.
    pub fn parse(raw: &str) -> Result<Self> {
        let normalized = raw.trim().to_ascii_uppercase();
        let len = normalized.chars().count();

        if !(MIN_PREFIX_LEN..=MAX_PREFIX_LEN).contains(&len) {
            return Err(CoreError::InvalidPrefix(format!(
                "'{}' must be between {} and {} characters long, got {}",
                normalized, MIN_PREFIX_LEN, MAX_PREFIX_LEN, len
            )));
        }

        if !normalized
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
        {
            return Err(CoreError::InvalidPrefix(format!(
                "'{}' must contain only letters and digits",
                normalized
            )));
        }

        Ok(Self(SmolStr::new(normalized)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of random characters that complete a code with this prefix.
    pub fn suffix_len(&self) -> Result<usize> {
        crate::code::CODE_LENGTH
            .checked_sub(self.len())
            .ok_or_else(|| CoreError::SuffixUnderflow {
                prefix: self.to_string(),
                width: crate::code::CODE_LENGTH,
            })
    }

    /// Case-insensitive check used when matching corpus resource names.
    pub fn is_prefix_of(&self, name: &str) -> bool {
        name.to_ascii_uppercase().starts_with(self.as_str())
    }
}

impl Display for Prefix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Prefix {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<Prefix> for String {
    fn from(value: Prefix) -> Self {
        value.0.to_string()
    }
}
