use crate::error::{CoreError, Result};
use crate::prefix::Prefix;
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;
use std::fmt::Display;

/// Total width of every issued code, prefix included.
pub const CODE_LENGTH: usize = 16;

/// Symbols a random suffix is drawn from.
pub const ALPHABET: &[u8; 36] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// A 16-character identifier made of a prefix and a random suffix.
///
/// Codes fit inline in a [`SmolStr`], so cloning one never allocates.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Code(SmolStr);

impl Code {
    /// Builds a code from a prefix and a suffix, validating the result.
    pub fn compose(prefix: &Prefix, suffix: &str) -> Result<Self> {
        let mut code = String::with_capacity(CODE_LENGTH);
        code.push_str(prefix.as_str());
        code.push_str(suffix);
        Self::validate(&code)?;
        Ok(Self(SmolStr::new(code)))
    }

    /// Parses an already issued code.
    pub fn new(code: impl AsRef<str>) -> Result<Self> {
        let code = code.as_ref();
        Self::validate(code)?;
        Ok(Self(SmolStr::new(code)))
    }

    /// Creates a `Code` without validation.
    ///
    /// Use this only for codes produced by trusted internal sources that are
    /// guaranteed to emit the right width and alphabet.
    pub fn new_unchecked(code: impl AsRef<str>) -> Self {
        Self(SmolStr::new(code))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn starts_with(&self, prefix: &Prefix) -> bool {
        self.0.starts_with(prefix.as_str())
    }

    fn validate(code: &str) -> Result<()> {
        if code.len() != CODE_LENGTH {
            return Err(CoreError::InvalidCode(format!(
                "length must be {}, got {} for '{}'",
                CODE_LENGTH,
                code.len(),
                code
            )));
        }

        if !code.bytes().all(|b| ALPHABET.contains(&b)) {
            return Err(CoreError::InvalidCode(format!(
                "must contain only uppercase letters and digits: '{}'",
                code
            )));
        }

        Ok(())
    }
}

impl Display for Code {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Code {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}
