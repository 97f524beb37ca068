use crate::code::Code;
use crate::prefix::Prefix;
use std::collections::HashSet;

/// Codes already issued under one prefix.
///
/// Values are kept exactly as they were stored, without re-validating them,
/// so a malformed legacy entry still blocks an identical candidate.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExistingCodes(HashSet<String>);

impl ExistingCodes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, code: &Code) -> bool {
        self.0.contains(code.as_str())
    }

    pub fn insert(&mut self, code: impl Into<String>) -> bool {
        self.0.insert(code.into())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for ExistingCodes {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl<S: Into<String>> Extend<S> for ExistingCodes {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        self.0.extend(iter.into_iter().map(Into::into));
    }
}

/// A read-only view of previously issued codes.
///
/// The registry is an append-only ledger kept by someone else: files on
/// disk, a database table, an object store. Loading never fails the caller.
/// A missing or partly unreadable backend contributes what it can and
/// reports the rest as diagnostics.
pub trait CodeRegistry {
    /// Returns every code the backend holds for `prefix`.
    fn load(&self, prefix: &Prefix) -> ExistingCodes;
}

impl<R: CodeRegistry + ?Sized> CodeRegistry for &R {
    fn load(&self, prefix: &Prefix) -> ExistingCodes {
        (**self).load(prefix)
    }
}
