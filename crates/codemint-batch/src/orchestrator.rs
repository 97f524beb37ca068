use crate::error::Error;
use crate::input::RequestRow;
use crate::service::CodeService;
use codemint_core::{BatchId, BatchStore, CodeRegistry, GenerationRequest, Prefix, Progress};
use codemint_generator::Generator;
use jiff::Timestamp;
use serde::Serialize;
use std::fmt::Display;
use tracing::{info, warn};

/// Why a batch row produced no output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SkipReason {
    /// The row has fewer than the two expected cells.
    MissingColumns { found: usize },
    /// Prefix or quantity failed validation.
    Invalid { message: String },
    /// Sampling ran out of attempts without a single new code.
    Exhausted { requested: usize },
    /// The batch could not be named or written.
    Storage { message: String },
}

impl Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::MissingColumns { found } => {
                write!(f, "expected 2 columns, found {}", found)
            }
            SkipReason::Invalid { message } => f.write_str(message),
            SkipReason::Exhausted { requested } => {
                write!(f, "no new unique codes could be generated out of {} requested", requested)
            }
            SkipReason::Storage { message } => write!(f, "storage error: {}", message),
        }
    }
}

/// What happened to one batch row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RowOutcome {
    Generated {
        row: usize,
        prefix: Prefix,
        requested: usize,
        generated: usize,
        batch: BatchId,
    },
    Skipped {
        row: usize,
        reason: SkipReason,
    },
}

impl RowOutcome {
    pub fn row(&self) -> usize {
        match self {
            RowOutcome::Generated { row, .. } | RowOutcome::Skipped { row, .. } => *row,
        }
    }

    pub fn is_generated(&self) -> bool {
        matches!(self, RowOutcome::Generated { .. })
    }
}

/// Aggregate of a batch run. A batch always finishes; failed rows show up
/// here as [`RowOutcome::Skipped`].
#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    pub outcomes: Vec<RowOutcome>,
    pub started_at: Timestamp,
    pub finished_at: Timestamp,
}

impl BatchReport {
    /// Number of rows that produced an output batch.
    pub fn rows_processed(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_generated()).count()
    }

    /// Output batches in row order.
    pub fn outputs(&self) -> Vec<&BatchId> {
        self.outcomes
            .iter()
            .filter_map(|outcome| match outcome {
                RowOutcome::Generated { batch, .. } => Some(batch),
                RowOutcome::Skipped { .. } => None,
            })
            .collect()
    }

    pub fn skipped(&self) -> impl Iterator<Item = (usize, &SkipReason)> {
        self.outcomes.iter().filter_map(|outcome| match outcome {
            RowOutcome::Skipped { row, reason } => Some((*row, reason)),
            RowOutcome::Generated { .. } => None,
        })
    }
}

/// Issues codes for every row, continuing past rows that fail.
///
/// Progress is reported once per row, before the row is processed.
pub fn run_batch<R, S, G>(
    rows: &[RequestRow],
    service: &CodeService<R, S>,
    generator: &mut G,
    progress: Option<&dyn Progress>,
) -> BatchReport
where
    R: CodeRegistry,
    S: BatchStore,
    G: Generator + ?Sized,
{
    let started_at = Timestamp::now();
    let total = rows.len();
    let last_row = rows.iter().map(|r| r.row).max().unwrap_or(0);
    let mut outcomes = Vec::with_capacity(total);

    for (index, row) in rows.iter().enumerate() {
        if let Some(progress) = progress {
            progress.report(
                ((index + 1) as f64 / total as f64).min(1.0),
                &format!("Processing row: {} / {}", row.row, last_row),
            );
        }

        let outcome = process_row(row, service, generator);
        match &outcome {
            RowOutcome::Generated {
                prefix,
                generated,
                batch,
                ..
            } => info!(row = row.row, prefix = %prefix, generated, batch = %batch, "row done"),
            RowOutcome::Skipped { reason, .. } => {
                warn!(row = row.row, reason = %reason, "skipping row")
            }
        }
        outcomes.push(outcome);
    }

    let report = BatchReport {
        outcomes,
        started_at,
        finished_at: Timestamp::now(),
    };
    info!(
        rows = total,
        rows_processed = report.rows_processed(),
        "batch finished"
    );
    report
}

fn process_row<R, S, G>(
    row: &RequestRow,
    service: &CodeService<R, S>,
    generator: &mut G,
) -> RowOutcome
where
    R: CodeRegistry,
    S: BatchStore,
    G: Generator + ?Sized,
{
    let skipped = |reason| RowOutcome::Skipped {
        row: row.row,
        reason,
    };

    let (Some(prefix), Some(quantity)) = (row.prefix(), row.quantity()) else {
        return skipped(SkipReason::MissingColumns {
            found: row.cells.len(),
        });
    };

    let request = match GenerationRequest::new(&prefix.to_prefix(), quantity.to_quantity()) {
        Ok(request) => request,
        Err(err) => {
            return skipped(SkipReason::Invalid {
                message: err.to_string(),
            })
        }
    };

    match service.issue(&request, generator, None) {
        Ok(issued) => match issued.batch {
            Some(batch) => RowOutcome::Generated {
                row: row.row,
                prefix: request.prefix().clone(),
                requested: request.quantity(),
                generated: issued.generation.len(),
                batch,
            },
            None => skipped(SkipReason::Exhausted {
                requested: request.quantity(),
            }),
        },
        Err(Error::Storage(err)) => skipped(SkipReason::Storage {
            message: err.to_string(),
        }),
        Err(err) => skipped(SkipReason::Invalid {
            message: err.to_string(),
        }),
    }
}
