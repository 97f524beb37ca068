use codemint_core::StorageError;
use std::path::PathBuf;
use thiserror::Error;

/// Failure to read one corpus resource.
///
/// These never reach the caller of a registry load; they are logged and the
/// resource is skipped.
#[derive(Debug, Error)]
pub enum CorpusError {
    #[error("failed to open '{path}': {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed record in '{path}': {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

pub(crate) fn map_csv_error(err: csv::Error) -> StorageError {
    let message = err.to_string();

    match err.into_kind() {
        csv::ErrorKind::Io(io) => StorageError::from(io),
        csv::ErrorKind::Utf8 { .. } | csv::ErrorKind::UnequalLengths { .. } => {
            StorageError::InvalidData(message)
        }
        _ => StorageError::Operation(message),
    }
}
