use thiserror::Error;

/// Result type for validation of core values.
pub type Result<T> = std::result::Result<T, CoreError>;

/// Validation failures. These are reported to the immediate caller and never
/// coerced into something valid.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("invalid prefix: {0}")]
    InvalidPrefix(String),
    #[error("invalid quantity {0}; must be greater than 0")]
    InvalidQuantity(i64),
    #[error("prefix '{prefix}' leaves no room for a random suffix in a {width}-character code")]
    SuffixUnderflow { prefix: String, width: usize },
    #[error("invalid code: {0}")]
    InvalidCode(String),
}

#[derive(Debug, Clone, Error)]
pub enum StorageError {
    #[error("storage backend unavailable: {0}")]
    Unavailable(String),
    #[error("stored data is invalid: {0}")]
    InvalidData(String),
    #[error("storage operation failed: {0}")]
    Operation(String),
}

impl From<std::io::Error> for StorageError {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound | std::io::ErrorKind::PermissionDenied => {
                Self::Unavailable(err.to_string())
            }
            std::io::ErrorKind::InvalidData => Self::InvalidData(err.to_string()),
            _ => Self::Operation(err.to_string()),
        }
    }
}
