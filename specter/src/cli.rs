// specter/src/cli.rs
//! This file defines the command-line interface (CLI) for the specter
//! application, including all available commands and their arguments.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(
    name = "specter",
    author = "Relay",
    version = env!("CARGO_PKG_VERSION"),
    about = "Detect and replace sensitive spans in text and scanned documents",
    long_about = "Specter finds sensitive spans of text (names, locations, identifiers) with configurable detectors, resolves conflicts between overlapping detections, and rewrites the text or the scanned page image with substitute content. Repeated values can be mapped to stable pseudonyms across a whole run.",
    arg_required_else_help = true,
)]
pub struct Cli {
    /// Disable informational messages
    #[arg(long, short = 'q', help = "Suppress all informational and debug messages.")]
    pub quiet: bool,

    /// Enable debug logging (overrides RUST_LOG for the 'specter' crates to DEBUG)
    #[arg(long, short = 'd', help = "Enable debug logging.")]
    pub debug: bool,

    /// The subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// All available commands for the `specter` CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Processes a literal text string and prints the transformed text.
    #[command(about = "Processes a literal text string and prints the transformed text.")]
    Text(TextCommand),

    /// Processes one or more document files (pdf, jpg, png, or tiff).
    #[command(about = "Processes one or more document files (pdf, jpg, png, or tiff).")]
    Doc(DocCommand),
}

/// Arguments for the `text` command.
#[derive(Parser, Debug)]
pub struct TextCommand {
    /// The text to process.
    pub text: String,

    /// Language used to select the applicable detectors.
    #[arg(long, short = 'l', value_name = "LANG", default_value = "en", help = "Language used to select the applicable detectors.")]
    pub language: String,

    /// Replacer strategy to use (defaults to the first configured one).
    #[arg(long, short = 'r', value_name = "NAME", help = "Replacer strategy to use (defaults to the first configured one).")]
    pub replacer: Option<String>,

    /// Explicitly enable only these detector names (comma-separated).
    #[arg(long, short = 'e', value_delimiter = ',', help = "Explicitly enable only these detector names (comma-separated).")]
    pub detectors: Vec<String>,

    /// Path to a custom configuration file (YAML).
    #[arg(long = "config", value_name = "FILE", help = "Path to a custom configuration file (YAML).")]
    pub config: Option<PathBuf>,

    /// Write a JSON report of spans and replacements to this file.
    #[arg(long = "report", value_name = "FILE", help = "Write a JSON report of spans and replacements to this file.")]
    pub report: Option<PathBuf>,

    /// Suppress the replacement summary.
    #[arg(long = "no-summary", help = "Suppress the replacement summary.")]
    pub no_summary: bool,
}

/// Arguments for the `doc` command.
#[derive(Parser, Debug)]
pub struct DocCommand {
    /// Document files to process.
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Language used to select detectors and the OCR provider.
    #[arg(long, short = 'l', value_name = "LANG", default_value = "en", help = "Language used to select detectors and the OCR provider.")]
    pub language: String,

    /// Replacer strategy to use (defaults to the first configured one).
    #[arg(long, short = 'r', value_name = "NAME", help = "Replacer strategy to use (defaults to the first configured one).")]
    pub replacer: Option<String>,

    /// Explicitly enable only these detector names (comma-separated).
    #[arg(long, short = 'e', value_delimiter = ',', help = "Explicitly enable only these detector names (comma-separated).")]
    pub detectors: Vec<String>,

    /// OCR provider to use (defaults to the first registered one for the language).
    #[arg(long = "ocr", value_name = "NAME", help = "OCR provider to use (defaults to the first registered one for the language).")]
    pub ocr: Option<String>,

    /// Path to a custom configuration file (YAML).
    #[arg(long = "config", value_name = "FILE", help = "Path to a custom configuration file (YAML).")]
    pub config: Option<PathBuf>,

    /// Directory the redacted page images are written to.
    #[arg(long = "out-dir", short = 'o', value_name = "DIR", default_value = ".", help = "Directory the redacted page images are written to.")]
    pub out_dir: PathBuf,

    /// Also write a JSON report per document into the output directory.
    #[arg(long = "report", help = "Also write a JSON report per document into the output directory.")]
    pub report: bool,
}
