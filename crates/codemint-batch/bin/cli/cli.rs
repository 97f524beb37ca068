use clap::{Args, Parser, Subcommand, ValueEnum};
use codemint_generator::ATTEMPTS_PER_CODE;
use codemint_telemetry::LogFormat;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub const CORPUS_DIR_ENV: &str = "CODEMINT_CORPUS_DIR";
pub const OUTPUT_DIR_ENV: &str = "CODEMINT_OUTPUT_DIR";
pub const LOG_FORMAT_ENV: &str = "CODEMINT_LOG_FORMAT";
pub const SEED_ENV: &str = "CODEMINT_SEED";
pub const ATTEMPTS_PER_CODE_ENV: &str = "CODEMINT_ATTEMPTS_PER_CODE";
pub const MAX_ATTEMPTS_ENV: &str = "CODEMINT_MAX_ATTEMPTS";

pub const DEFAULT_CORPUS_DIR: &str = ".";
pub const DEFAULT_OUTPUT_DIR: &str = "processed_files_output";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormatArg {
    #[value(name = "text")]
    Text,
    #[value(name = "json")]
    Json,
}

impl Display for LogFormatArg {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            LogFormatArg::Text => write!(f, "text"),
            LogFormatArg::Json => write!(f, "json"),
        }
    }
}

impl From<LogFormatArg> for LogFormat {
    fn from(value: LogFormatArg) -> Self {
        match value {
            LogFormatArg::Text => LogFormat::Text,
            LogFormatArg::Json => LogFormat::Json,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "codemint", about = "Issue unique prefixed codes")]
pub struct CLI {
    /// Directory of CSV files holding previously issued codes.
    #[arg(long, global = true, env = CORPUS_DIR_ENV, default_value = DEFAULT_CORPUS_DIR)]
    pub corpus_dir: PathBuf,

    /// Directory new batches are written to.
    #[arg(long, global = true, env = OUTPUT_DIR_ENV, default_value = DEFAULT_OUTPUT_DIR)]
    pub output_dir: PathBuf,

    #[arg(
        long,
        global = true,
        env = LOG_FORMAT_ENV,
        value_enum,
        default_value_t = LogFormatArg::Text
    )]
    pub log_format: LogFormatArg,

    /// Seed for reproducible generation.
    #[arg(long, global = true, env = SEED_ENV)]
    pub seed: Option<u64>,

    /// Candidate draws allowed per requested code.
    #[arg(
        long,
        global = true,
        env = ATTEMPTS_PER_CODE_ENV,
        default_value_t = ATTEMPTS_PER_CODE as u64,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub attempts_per_code: u64,

    /// Cap on candidate draws for any single request, whatever its quantity.
    #[arg(
        long,
        global = true,
        env = MAX_ATTEMPTS_ENV,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub max_attempts: Option<u64>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate codes for a single prefix.
    Generate(GenerateArgs),
    /// Generate codes for every (prefix, quantity) row of a CSV or Excel file.
    Batch(BatchArgs),
    /// Report what the corpus holds for a prefix.
    Inspect(InspectArgs),
}

#[derive(Debug, Args)]
pub struct GenerateArgs {
    /// 3-8 letters or digits; lowercase is accepted and uppercased.
    #[arg(long)]
    pub prefix: String,

    #[arg(long, default_value_t = 100, allow_negative_numbers = true)]
    pub quantity: i64,
}

#[derive(Debug, Args)]
pub struct BatchArgs {
    /// Request table: first column prefix, second column quantity.
    #[arg(long)]
    pub input: PathBuf,

    /// Print the batch report as JSON on stdout.
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct InspectArgs {
    #[arg(long)]
    pub prefix: String,
}
