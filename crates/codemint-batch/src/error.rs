use codemint_core::{CoreError, StorageError};
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Invalid(#[from] CoreError),
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
    #[error("unsupported batch input format: '{}'", .0.display())]
    UnsupportedInput(PathBuf),
    #[error("failed to read batch input '{}': {message}", path.display())]
    Input { path: PathBuf, message: String },
    #[error("batch input contains no data rows")]
    Empty,
}
