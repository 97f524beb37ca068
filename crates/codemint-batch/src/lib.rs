//! Code issuing service and batch orchestration.
//!
//! [`CodeService`] drives one request through load, generate, name and
//! persist. [`run_batch`] repeats that for every row of a tabular request
//! file, isolating per-row failures.

pub mod error;
pub mod input;
pub mod orchestrator;
pub mod service;

pub use error::{Error, Result};
pub use input::{read_requests, Cell, RequestRow};
pub use orchestrator::{run_batch, BatchReport, RowOutcome, SkipReason};
pub use service::{CodeService, Issued};
