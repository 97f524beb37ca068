//! Storage backends for issued codes.
//!
//! [`CsvDirectory`] treats a directory of CSV files as the ledger of issued
//! codes and as the destination for new batches. [`MemoryStore`] and
//! [`MemoryRegistry`] keep everything in memory.

pub mod csv_dir;
pub mod error;
pub mod memory;

pub use csv_dir::CsvDirectory;
pub use error::CorpusError;
pub use memory::{MemoryRegistry, MemoryStore};
