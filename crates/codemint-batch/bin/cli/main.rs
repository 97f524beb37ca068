mod cli;
mod progress;

use crate::cli::{BatchArgs, Command, GenerateArgs, InspectArgs, CLI};
use crate::progress::TerminalProgress;
use anyhow::Context;
use clap::Parser;
use codemint_batch::{read_requests, run_batch, CodeService, RowOutcome};
use codemint_core::{CodeRegistry, GenerationRequest, Prefix};
use codemint_generator::{Generator, RandomGenerator, Sampler};
use codemint_storage::CsvDirectory;
use std::process::ExitCode;
use tracing::info;

/// How many generated codes to echo after a manual run.
const PREVIEW_LEN: usize = 10;

fn main() -> anyhow::Result<ExitCode> {
    let config = CLI::parse();
    codemint_telemetry::init(config.log_format.into())?;

    info!(
        corpus_dir = %config.corpus_dir.display(),
        output_dir = %config.output_dir.display(),
        log_format = %config.log_format,
        seeded = config.seed.is_some(),
        "starting codemint"
    );

    let attempts_per_code =
        usize::try_from(config.attempts_per_code).context("attempts per code out of range")?;
    let sampler = match config.max_attempts {
        Some(limit) => Sampler::builder()
            .attempts_per_code(attempts_per_code)
            .attempt_limit(usize::try_from(limit).unwrap_or(usize::MAX))
            .build(),
        None => Sampler::builder()
            .attempts_per_code(attempts_per_code)
            .build(),
    };
    let service = CodeService::builder()
        .registry(CsvDirectory::new(config.corpus_dir.clone()))
        .store(CsvDirectory::new(config.output_dir.clone()))
        .sampler(sampler)
        .build();
    let mut generator: Box<dyn Generator> = match config.seed {
        Some(seed) => Box::new(RandomGenerator::seeded(seed)),
        None => Box::new(RandomGenerator::new()),
    };

    match config.command {
        Command::Generate(args) => generate(&service, generator.as_mut(), args),
        Command::Batch(args) => batch(&service, generator.as_mut(), args),
        Command::Inspect(args) => inspect(service.registry(), args),
    }
}

fn generate(
    service: &CodeService<CsvDirectory, CsvDirectory>,
    generator: &mut dyn Generator,
    args: GenerateArgs,
) -> anyhow::Result<ExitCode> {
    let request = GenerationRequest::new(&args.prefix, args.quantity)?;

    let progress = TerminalProgress::new();
    let issued = service.issue(&request, generator, Some(&progress));
    progress.finish();
    let issued = issued?;

    println!(
        "Found {} existing codes for prefix '{}'.",
        issued.existing,
        request.prefix()
    );

    let Some(batch) = issued.batch else {
        println!("No new unique codes could be generated for the request and the existing codes.");
        return Ok(ExitCode::FAILURE);
    };

    let generation = issued.generation;
    println!(
        "Generated {} new codes into '{}' in '{}'.",
        generation.len(),
        batch,
        service.store().root().display()
    );
    if !generation.is_complete() {
        println!(
            "Warning: only {} of {} requested codes could be generated after {} attempts.",
            generation.len(),
            generation.requested(),
            generation.attempts()
        );
    }
    for code in generation.codes().iter().take(PREVIEW_LEN) {
        println!("  {}", code);
    }

    Ok(ExitCode::SUCCESS)
}

fn batch(
    service: &CodeService<CsvDirectory, CsvDirectory>,
    generator: &mut dyn Generator,
    args: BatchArgs,
) -> anyhow::Result<ExitCode> {
    let rows = read_requests(&args.input)?;

    let progress = TerminalProgress::new();
    let report = run_batch(&rows, service, generator, Some(&progress));
    progress.finish();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!(
            "Processed {} of {} rows from '{}'.",
            report.rows_processed(),
            report.outcomes.len(),
            args.input.display()
        );
        for outcome in &report.outcomes {
            match outcome {
                RowOutcome::Generated {
                    row,
                    prefix,
                    requested,
                    generated,
                    batch,
                } => println!(
                    "  row {}: {} -> {} ({} / {} codes)",
                    row, prefix, batch, generated, requested
                ),
                RowOutcome::Skipped { row, reason } => {
                    println!("  row {}: skipped, {}", row, reason)
                }
            }
        }
    }

    if report.rows_processed() == 0 {
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}

fn inspect(corpus: &CsvDirectory, args: InspectArgs) -> anyhow::Result<ExitCode> {
    let prefix = Prefix::parse(&args.prefix)?;

    if !corpus.exists() {
        println!(
            "Corpus directory '{}' does not exist; no codes are on record.",
            corpus.root().display()
        );
        return Ok(ExitCode::FAILURE);
    }

    let existing = corpus.load(&prefix);
    println!(
        "Corpus '{}' holds {} codes for prefix '{}'.",
        corpus.root().display(),
        existing.len(),
        prefix
    );
    Ok(ExitCode::SUCCESS)
}
