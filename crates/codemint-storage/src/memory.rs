use codemint_core::{BatchId, BatchStore, Code, CodeRegistry, ExistingCodes, Prefix, StorageError};
use std::cell::RefCell;
use std::collections::BTreeMap;

/// In-memory registry seeded with a flat list of issued codes.
///
/// `load` returns the codes that start with the prefix, compared
/// case-insensitively.
#[derive(Debug, Clone, Default)]
pub struct MemoryRegistry {
    codes: Vec<String>,
}

impl MemoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_codes<I, S>(codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            codes: codes.into_iter().map(Into::into).collect(),
        }
    }

    pub fn push(&mut self, code: impl Into<String>) {
        self.codes.push(code.into());
    }
}

impl CodeRegistry for MemoryRegistry {
    fn load(&self, prefix: &Prefix) -> ExistingCodes {
        self.codes
            .iter()
            .filter(|code| prefix.is_prefix_of(code))
            .cloned()
            .collect()
    }
}

/// In-memory batch store.
///
/// Persisted batches are also visible through [`CodeRegistry`], scoped by
/// batch name the same way [`crate::CsvDirectory`] scopes files, so a store
/// can act as its own corpus.
#[derive(Debug, Default)]
pub struct MemoryStore {
    batches: RefCell<BTreeMap<String, Vec<Code>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the codes persisted under `name`.
    pub fn batch(&self, name: &str) -> Option<Vec<Code>> {
        self.batches.borrow().get(name).cloned()
    }

    /// Names of every persisted batch, sorted.
    pub fn names(&self) -> Vec<String> {
        self.batches.borrow().keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.batches.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.batches.borrow().is_empty()
    }
}

impl BatchStore for MemoryStore {
    fn extension(&self) -> &str {
        "csv"
    }

    fn contains(&self, name: &str) -> Result<bool, StorageError> {
        Ok(self.batches.borrow().contains_key(name))
    }

    fn persist(&self, name: &str, codes: &[Code]) -> Result<BatchId, StorageError> {
        let mut batches = self.batches.borrow_mut();
        if batches.contains_key(name) {
            return Err(StorageError::Operation(format!(
                "batch already exists: {}",
                name
            )));
        }
        batches.insert(name.to_owned(), codes.to_vec());
        Ok(BatchId::new(name))
    }
}

impl CodeRegistry for MemoryStore {
    fn load(&self, prefix: &Prefix) -> ExistingCodes {
        self.batches
            .borrow()
            .iter()
            .filter(|(name, _)| prefix.is_prefix_of(name))
            .flat_map(|(_, codes)| codes.iter().map(|code| code.to_string()))
            .collect()
    }
}
