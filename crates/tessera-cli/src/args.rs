//! Command-line argument definitions for the Tessera CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control input/output paths, how the input is
//! read, configuration file selection, and logging verbosity.

use clap::Parser;

/// Command-line arguments for the Tessera diagram tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input document
    #[arg(help = "Path to the input file")]
    pub input: String,

    /// Path to the output HTML file
    #[arg(short, long, default_value = "out.html")]
    pub output: String,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Treat the whole input as a single diagram body instead of a document
    /// with `<diagram>` blocks
    #[arg(long)]
    pub raw: bool,

    /// Wrap the output in an HTML page with the diagram stylesheet
    #[arg(long)]
    pub standalone: bool,
}
