//! Core types and traits for the codemint code issuer.
//!
//! This crate provides the validated value types shared by the generator,
//! the storage backends and the batch orchestrator, together with the
//! registry and store seams that keep the generation engine decoupled from
//! any particular storage format.

pub mod code;
pub mod error;
pub mod prefix;
pub mod progress;
pub mod registry;
pub mod request;
pub mod store;

pub use code::{Code, ALPHABET, CODE_LENGTH};
pub use error::{CoreError, StorageError};
pub use prefix::{Prefix, MAX_PREFIX_LEN, MIN_PREFIX_LEN};
pub use progress::Progress;
pub use registry::{CodeRegistry, ExistingCodes};
pub use request::GenerationRequest;
pub use store::{resolve_output_name, BatchId, BatchStore};
