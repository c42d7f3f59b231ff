//! `refine` CLI — encode, decode, and toggle search filter strings from the command line.
//!
//! ## Usage
//!
//! ```sh
//! # Encode aggregations JSON to a filter string (stdin → stdout)
//! echo '[{"field":"subject","results":[{"key":"Animals","selected":true}]}]' | refine encode
//!
//! # Encode from file to file
//! refine encode -i aggregations.json -o filter.txt
//!
//! # Decode a filter string to pretty-printed JSON
//! echo 'subject:"Animals"|"People"' | refine decode
//!
//! # Toggle a term against the current filter
//! refine toggle --aggregations aggregations.json --settings settings.json \
//!     --filter 'subject:"Animals"' --field author --key "News Staff"
//!
//! # More logging on stderr (or set REFINE_LOG=debug)
//! refine -vv decode -i filter.txt
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use refine_core::{AggregationSettings, FieldAggregation, Refinements};
use std::io::{self, Read};

#[derive(Parser)]
#[command(
    name = "refine",
    version,
    about = "Search refinement filter string CLI"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Log filter directive; overrides --verbose
    #[arg(long, env = "REFINE_LOG", hide_env_values = true)]
    log: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode a JSON array of aggregations into a filter string
    Encode {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Decode a filter string into JSON
    Decode {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Check or uncheck one term and print the resulting filter string
    Toggle {
        /// JSON file with the aggregations of the current search response
        #[arg(long)]
        aggregations: String,
        /// JSON file with per-aggregation settings (multiple_selections_allowed)
        #[arg(long)]
        settings: Option<String>,
        /// Current filter string
        #[arg(long, default_value = "")]
        filter: String,
        /// Field the term belongs to
        #[arg(long)]
        field: String,
        /// Term key to toggle
        #[arg(long)]
        key: String,
        /// Uncheck the term instead of checking it
        #[arg(long)]
        uncheck: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.log.as_deref());

    match cli.command {
        Commands::Encode { input, output } => {
            let json = read_input(input.as_deref())?;
            tracing::debug!(bytes = json.len(), "encoding aggregations");
            let filter =
                refine_core::encode_json(&json).context("Failed to encode aggregations")?;
            write_output(output.as_deref(), &filter)?;
        }
        Commands::Decode { input, output } => {
            let raw = read_input(input.as_deref())?;
            let filter = raw.trim_end_matches(['\n', '\r']);
            tracing::debug!(bytes = filter.len(), "decoding filter");
            let decoded =
                refine_core::from_string(filter).context("Failed to decode filter string")?;
            tracing::info!(fields = decoded.filter_fields.len(), "decoded filter");
            let pretty = serde_json::to_string_pretty(&decoded)?;
            write_output(output.as_deref(), &pretty)?;
        }
        Commands::Toggle {
            aggregations,
            settings,
            filter,
            field,
            key,
            uncheck,
        } => {
            let aggregations: Vec<FieldAggregation> = read_json(&aggregations)?;
            let settings: Vec<AggregationSettings> = match settings {
                Some(path) => read_json(&path)?,
                None => Vec::new(),
            };
            let mut refinements = Refinements::from_filter(&aggregations, &filter, &settings)
                .context("Failed to apply current filter")?;
            tracing::info!(
                field = %field,
                key = %key,
                checked = !uncheck,
                mode = ?refinements.selection_mode(&field),
                "toggling term"
            );
            refinements
                .toggle(&field, &key, !uncheck)
                .context("Failed to toggle term")?;
            let filter = refinements
                .filter_string()
                .context("Failed to encode selection")?;
            println!("{}", filter);
        }
    }

    Ok(())
}

/// Log to stderr so stdout stays pipeable. `--log`/`REFINE_LOG` wins over `-v`.
fn init_logging(verbose: u8, directive: Option<&str>) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = directive.unwrap_or(default_level).to_string();

    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_target(false)
        .with_ansi(false)
        .compact()
        .with_env_filter(filter)
        .init();
}

fn read_json<T: serde::de::DeserializeOwned>(path: &str) -> Result<T> {
    let raw = read_input(Some(path))?;
    serde_json::from_str(&raw).with_context(|| format!("Failed to parse JSON in {}", path))
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            print!("{}", content);
        }
    }
    Ok(())
}
