//! Transcoder CLI - run values through the codec from the command line
//!
//! Commands:
//!   transcoder decode <input>     - Validate wire JSON and print the native value
//!   transcoder normalize <input>  - Decode then re-encode, printing canonical wire JSON

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use transcoder::{
    decode_with_limits, encode_with_limits, Limits, TypeDescription, TypeTable, Value,
};

#[derive(Parser)]
#[command(name = "transcoder")]
#[command(about = "Validate and convert values against a type table", long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a wire value and print its decoded form
    Decode(TranscodeArgs),

    /// Decode then re-encode, printing the canonical wire form
    Normalize(TranscodeArgs),
}

#[derive(Args)]
struct TranscodeArgs {
    /// JSON file mapping type names to descriptions
    #[arg(long, short = 't')]
    types: Option<PathBuf>,

    /// Type to check against: a bare name such as `Customer[]` or a JSON description
    #[arg(long = "type", short = 'T')]
    ty: String,

    /// Root label used in error paths
    #[arg(long, default_value = "root")]
    path: String,

    /// Maximum nesting depth before giving up
    #[arg(long, default_value_t = Limits::default().max_depth)]
    max_depth: usize,

    /// Type-table references followed in a row before giving up
    #[arg(long, default_value_t = Limits::default().max_alias_hops)]
    max_alias_hops: usize,

    /// JSON input file; stdin when omitted
    input: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Decode(args) => decode_command(&args),
        Commands::Normalize(args) => normalize_command(&args),
    }
}

fn decode_command(args: &TranscodeArgs) -> anyhow::Result<()> {
    let job = Job::load(args)?;
    let native = job.decode()?;
    print_json(&native)
}

fn normalize_command(args: &TranscodeArgs) -> anyhow::Result<()> {
    let job = Job::load(args)?;
    let native = job.decode()?;
    let wire = encode_with_limits(&job.table, &args.path, &job.ty, &native, Some(&job.limits))?;
    print_json(&wire)
}

/// Everything one invocation needs, read from disk up front.
struct Job<'a> {
    args: &'a TranscodeArgs,
    table: TypeTable,
    ty: TypeDescription,
    input: Value,
    limits: Limits,
}

impl<'a> Job<'a> {
    fn load(args: &'a TranscodeArgs) -> anyhow::Result<Self> {
        let table = match &args.types {
            Some(path) => serde_json::from_str(&read_text(path)?)
                .with_context(|| format!("Failed to parse type table {}", path.display()))?,
            None => TypeTable::new(),
        };
        let ty = parse_type(&args.ty)?;
        let input = match &args.input {
            Some(path) => read_text(path)?,
            None => {
                let mut text = String::new();
                std::io::stdin()
                    .read_to_string(&mut text)
                    .context("Failed to read stdin")?;
                text
            }
        };
        let input = serde_json::from_str(&input).context("Input is not valid JSON")?;
        tracing::info!(types = table.len(), ty = %ty, "loaded job");

        Ok(Self {
            args,
            table,
            ty,
            input,
            limits: Limits {
                max_depth: args.max_depth,
                max_alias_hops: args.max_alias_hops,
            },
        })
    }

    fn decode(&self) -> anyhow::Result<Value> {
        Ok(decode_with_limits(
            &self.table,
            &self.args.path,
            &self.ty,
            &self.input,
            Some(&self.limits),
        )?)
    }
}

/// JSON documents (`{...}`, `[...]`, `"..."`) are parsed as descriptions;
/// anything else is taken as a type name.
fn parse_type(text: &str) -> anyhow::Result<TypeDescription> {
    let trimmed = text.trim();
    if trimmed.starts_with(['{', '[', '"']) {
        serde_json::from_str(trimmed).context("Failed to parse type description")
    } else {
        Ok(TypeDescription::named(trimmed))
    }
}

fn read_text(path: &Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

fn print_json(value: &Value) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
