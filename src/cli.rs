//! CLI argument parsing for Opgram

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::sequence::DepthPolicy;

/// Output format for the n-gram histogram
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable top-N table (default)
    Text,
    /// JSON object mapping key to count
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "opgram")]
#[command(version)]
#[command(about = "Depth-aware opcode n-gram histogram from VM struct-logs", long_about = None)]
pub struct Cli {
    /// N-gram order (2 = bigrams, 3 = trigrams, ...)
    #[arg(short = 'n', long = "order", value_name = "N")]
    pub order: Option<usize>,

    /// Window behavior when the call depth changes (defaults per order)
    #[arg(long = "policy", value_enum)]
    pub policy: Option<DepthPolicy>,

    /// TOML config file with a [tracer] table; flags override it
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Output format (text or json)
    #[arg(long = "format", value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Number of keys shown in text output
    #[arg(long = "top", value_name = "K", default_value = "20")]
    pub top: usize,

    /// Enable debug tracing to stderr
    #[arg(long = "debug")]
    pub debug: bool,

    /// JSON-lines struct-log to replay ("-" or absent for stdin)
    #[arg(value_name = "FILE")]
    pub input: Option<PathBuf>,
}
