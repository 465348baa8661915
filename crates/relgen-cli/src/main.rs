mod logging;

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use thiserror::Error;
use tracing::{error, info};

use relgen_compile::{compile_schema, compile_to_path, CompileError, CompileOptions, WriteOutcome};
use relgen_core::{Error as CoreError, Schema, SchemaDocument, SCHEMA_VERSION};

#[derive(Debug, Error)]
enum CliError {
    #[error("compile error: {0}")]
    Compile(#[from] CompileError),
    #[error("core error: {0}")]
    Core(#[from] CoreError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid arguments: {0}")]
    InvalidArgs(String),
}

#[derive(Parser, Debug)]
#[command(name = "relgen", version, about = "Typed data-access layer generator")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compile a parsed schema into the generated models artifact.
    Generate(GenerateArgs),
    /// Compile a parsed schema and discard the output, reporting errors.
    Check(CheckArgs),
}

#[derive(Args, Debug)]
struct GenerateArgs {
    /// Path to the parsed schema artifact (schema.json).
    #[arg(long, value_name = "PATH")]
    schema: PathBuf,
    /// Output path for the generated artifact.
    #[arg(long, value_name = "PATH", required_unless_present = "stdout")]
    out: Option<PathBuf>,
    /// Print the artifact to stdout instead of writing a file.
    #[arg(long, default_value_t = false)]
    stdout: bool,
    /// Skip per-field setter emission (preview mode).
    #[arg(long, default_value_t = false)]
    skip_mutators: bool,
}

#[derive(Args, Debug)]
struct CheckArgs {
    /// Path to the parsed schema artifact (schema.json).
    #[arg(long, value_name = "PATH")]
    schema: PathBuf,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(message) = logging::init_logging() {
        eprintln!("relgen: {message}");
        return ExitCode::FAILURE;
    }

    let result = match cli.command {
        Command::Generate(args) => run_generate(args),
        Command::Check(args) => run_check(args),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run_generate(args: GenerateArgs) -> Result<(), CliError> {
    let schema = load_schema(&args.schema)?;
    let options = CompileOptions {
        include_mutators: !args.skip_mutators,
    };

    if args.stdout {
        let content = compile_schema(&schema, &options)?;
        print!("{content}");
        return Ok(());
    }

    let out = args
        .out
        .ok_or_else(|| CliError::InvalidArgs("--out is required unless --stdout".to_string()))?;
    match compile_to_path(&schema, &options, &out)? {
        WriteOutcome::Written => info!(path = %out.display(), "generated"),
        WriteOutcome::Unchanged => info!(path = %out.display(), "up to date"),
    }
    Ok(())
}

fn run_check(args: CheckArgs) -> Result<(), CliError> {
    let schema = load_schema(&args.schema)?;
    let content = compile_schema(&schema, &CompileOptions::default())?;
    info!(
        statements = schema.statements.len(),
        bytes = content.len(),
        "schema compiles"
    );
    Ok(())
}

/// Read and deserialize the parser's schema artifact. Parse failures are
/// surfaced verbatim as the compilation failure.
fn load_schema(path: &PathBuf) -> Result<Schema, CliError> {
    let raw = fs::read_to_string(path)?;
    let document: SchemaDocument =
        serde_json::from_str(&raw).map_err(|err| CoreError::Parse(err.to_string()))?;
    if document.schema_version != SCHEMA_VERSION {
        return Err(CoreError::InvalidSchema(format!(
            "unsupported schema_version: {} (expected {})",
            document.schema_version, SCHEMA_VERSION
        ))
        .into());
    }
    Ok(document.into_schema())
}
