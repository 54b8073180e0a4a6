//! Non-interactive output formatters.
//!
//! - JSON in the endpoint's format, for scripting
//! - CSV, one record per group, for spreadsheets
//! - Text, for reading in a terminal or a pipe
//! - HTML, a standalone searchable page
//!
//! JSON, CSV and text write the filtered view. HTML writes the whole report and
//! pre-fills its search box with the term instead.

pub mod csv;
pub mod html;
pub mod json;
pub mod text;

use std::io::Write;

use thiserror::Error;

use crate::cli::OutputFormat;
use crate::report::{filter_entries, ReportEntry};

pub use self::csv::{CsvOutput, CsvOutputError};
pub use html::{HtmlOutput, HtmlOutputError};
pub use json::{JsonOutput, JsonOutputError};
pub use text::TextOutput;

/// Any output failure.
#[derive(Debug, Error)]
pub enum OutputError {
    /// JSON output failed.
    #[error(transparent)]
    Json(#[from] JsonOutputError),
    /// CSV output failed.
    #[error(transparent)]
    Csv(#[from] CsvOutputError),
    /// HTML output failed.
    #[error(transparent)]
    Html(#[from] HtmlOutputError),
    /// Plain write failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// The interactive format has no writer.
    #[error("output format '{0}' is interactive")]
    Interactive(OutputFormat),
}

/// Options for a non-interactive render.
#[derive(Debug, Clone, Copy)]
pub struct OutputOptions<'a> {
    /// Search term
    pub term: &'a str,
    /// Label of the report source, shown in the HTML page
    pub source: &'a str,
    /// ANSI colors in text output
    pub color: bool,
}

/// Write `report` in `format`.
///
/// Returns the number of groups that matched the search term.
///
/// # Errors
///
/// Returns [`OutputError`] if formatting or writing fails, or if `format` is
/// the interactive TUI.
pub fn write_report<W: Write>(
    format: OutputFormat,
    report: &[ReportEntry],
    options: OutputOptions<'_>,
    writer: &mut W,
) -> Result<usize, OutputError> {
    let visible = filter_entries(report, options.term);

    match format {
        OutputFormat::Json => JsonOutput::new(&visible).write_to(writer, true)?,
        OutputFormat::Csv => CsvOutput::new(&visible).write_to(&mut *writer)?,
        OutputFormat::Text => TextOutput::new(&visible)
            .with_color(options.color)
            .write_to(writer)?,
        OutputFormat::Html => HtmlOutput::new(report, options.source, options.term).write_to(writer)?,
        OutputFormat::Tui => return Err(OutputError::Interactive(format)),
    }

    writer.flush()?;
    Ok(visible.len())
}
