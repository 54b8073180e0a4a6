//! Command-line interface definitions for dupview.
//!
//! # Example
//!
//! ```bash
//! # Browse the report from the default endpoint
//! dupview
//!
//! # Browse a report served elsewhere, starting with a filter
//! dupview --endpoint http://scanner.local:8080/report --filter photos
//!
//! # Print matching groups as JSON for scripting
//! dupview --output json --filter .jpg
//!
//! # Render a standalone HTML page from an exported report file
//! dupview --file report.json --output html --output-file report.html
//! ```

use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Searchable viewer for duplicate-file reports.
///
/// dupview fetches a precomputed duplicate report (hash groups and the paths
/// that share each hash) and shows it as a live-filtered table.
#[derive(Debug, Parser)]
#[command(name = "dupview")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity level (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, env = "NO_COLOR")]
    pub no_color: bool,

    /// Print errors as JSON objects on stderr
    #[arg(long)]
    pub json_errors: bool,

    /// Report endpoint URL (default: http://localhost:8080/report)
    #[arg(short, long, value_name = "URL")]
    pub endpoint: Option<String>,

    /// Read the report from an exported JSON file instead of the endpoint
    #[arg(long, value_name = "PATH", conflicts_with = "endpoint")]
    pub file: Option<PathBuf>,

    /// Output format (tui for interactive, others print and exit)
    #[arg(short, long, value_enum, default_value = "tui")]
    pub output: OutputFormat,

    /// Search term: filters non-interactive output, pre-fills the TUI search box
    #[arg(short, long, value_name = "TERM")]
    pub filter: Option<String>,

    /// Write non-interactive output to a file instead of stdout
    #[arg(long, value_name = "PATH")]
    pub output_file: Option<PathBuf>,

    /// Configuration file (TOML)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Write diagnostic logs to this file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Color theme
    #[arg(long, value_enum)]
    pub theme: Option<ThemeArg>,

    /// Use ASCII borders instead of Unicode box drawing
    #[arg(long)]
    pub ascii: bool,

    /// Plain loading messages instead of an animated spinner
    #[arg(long, env = "DUPVIEW_ACCESSIBLE")]
    pub accessible: bool,

    /// Mark the table "Report unavailable" when the fetch fails
    #[arg(long)]
    pub show_fetch_errors: bool,

    /// Request timeout in seconds (default: wait indefinitely)
    #[arg(long, value_name = "SECONDS")]
    pub timeout: Option<u64>,

    /// Print the effective configuration as TOML and exit
    #[arg(long)]
    pub print_config: bool,
}

/// Output format for the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Interactive terminal user interface
    Tui,
    /// JSON array in the endpoint's format
    Json,
    /// CSV, one record per hash group
    Csv,
    /// Plain text listing
    Text,
    /// Standalone HTML page
    Html,
}

impl OutputFormat {
    /// Check if this format runs the interactive TUI.
    #[must_use]
    pub fn is_interactive(self) -> bool {
        matches!(self, Self::Tui)
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Tui => write!(f, "tui"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Csv => write!(f, "csv"),
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Html => write!(f, "html"),
        }
    }
}

/// TUI color theme selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeArg {
    /// Detect from the terminal environment
    #[default]
    Auto,
    /// High-contrast dark theme
    Dark,
    /// High-contrast light theme
    Light,
}
