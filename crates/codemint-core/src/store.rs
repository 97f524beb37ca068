use crate::code::Code;
use crate::error::StorageError;
use crate::prefix::Prefix;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Name of a persisted batch of codes, e.g. `ABC_2.csv`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BatchId(String);

impl BatchId {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for BatchId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Destination collection for newly generated batches.
pub trait BatchStore {
    /// File extension (without the dot) given to batch names.
    fn extension(&self) -> &str;

    /// Checks whether a batch with this name already exists.
    fn contains(&self, name: &str) -> Result<bool, StorageError>;

    /// Writes `codes` under `name`. The store does not check for collisions;
    /// callers pick the name with [`resolve_output_name`].
    fn persist(&self, name: &str, codes: &[Code]) -> Result<BatchId, StorageError>;
}

impl<S: BatchStore + ?Sized> BatchStore for &S {
    fn extension(&self) -> &str {
        (**self).extension()
    }

    fn contains(&self, name: &str) -> Result<bool, StorageError> {
        (**self).contains(name)
    }

    fn persist(&self, name: &str, codes: &[Code]) -> Result<BatchId, StorageError> {
        (**self).persist(name, codes)
    }
}

/// Picks a batch name that does not collide with anything in `store`.
///
/// Tries `{prefix}.{ext}`, then `{prefix}_1.{ext}`, `{prefix}_2.{ext}` and so
/// on. The counter is unbounded.
pub fn resolve_output_name<S: BatchStore + ?Sized>(
    prefix: &Prefix,
    store: &S,
) -> Result<String, StorageError> {
    let extension = store.extension();
    let mut name = format!("{}.{}", prefix, extension);
    let mut counter: u64 = 0;

    while store.contains(&name)? {
        counter += 1;
        name = format!("{}_{}.{}", prefix, counter, extension);
    }

    Ok(name)
}
