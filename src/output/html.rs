//! HTML output formatter.
//!
//! Generates a self-contained page with the same layout as the interactive
//! view: a "Search files..." input above a Hash/Files table. A small inline
//! script applies the case-insensitive file-path filter in the browser, so the
//! page stays searchable offline.
//!
//! The page contains the whole report; `--filter` only pre-fills the search
//! box. Paths and hashes are escaped by askama.
//!
//! # Usage
//!
//! ```
//! use dupview::output::html::HtmlOutput;
//! use dupview::report::ReportEntry;
//!
//! let report = vec![ReportEntry::new("abc123", vec!["/a/x.txt", "/b/x.txt"])];
//! let html = HtmlOutput::new(&report, "report.json", "").to_html().unwrap();
//! assert!(html.contains("abc123"));
//! ```

use std::io::Write;

use askama::Template;
use chrono::Local;

use crate::report::ReportEntry;

/// Complete HTML output structure for the askama template.
#[derive(Template)]
#[template(path = "report.html")]
pub struct HtmlOutput {
    /// Formatted generation timestamp
    pub timestamp: String,
    /// Application version
    pub version: String,
    /// Where the report came from
    pub source: String,
    /// Initial value of the search box
    pub initial_filter: String,
    /// Number of groups in the report
    pub total_groups: usize,
    /// Groups in report order
    pub groups: Vec<HtmlGroup>,
}

/// A report entry formatted for the template.
pub struct HtmlGroup {
    /// Content hash
    pub hash: String,
    /// Paths in report order
    pub files: Vec<String>,
}

impl HtmlOutput {
    /// Create the page model.
    #[must_use]
    pub fn new(report: &[ReportEntry], source: &str, initial_filter: &str) -> Self {
        Self {
            timestamp: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            source: source.to_string(),
            initial_filter: initial_filter.to_string(),
            total_groups: report.len(),
            groups: report
                .iter()
                .map(|entry| HtmlGroup {
                    hash: entry.hash.clone(),
                    files: entry.files.clone(),
                })
                .collect(),
        }
    }

    /// Generate the HTML string.
    ///
    /// # Errors
    ///
    /// Returns an error if template rendering fails.
    pub fn to_html(&self) -> Result<String, askama::Error> {
        self.render()
    }

    /// Write the page to a writer.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering or writing fails.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<(), HtmlOutputError> {
        let html = self.to_html()?;
        writer.write_all(html.as_bytes())?;
        Ok(())
    }
}

/// Errors that can occur during HTML output generation.
#[derive(thiserror::Error, Debug)]
pub enum HtmlOutputError {
    /// Template rendering error
    #[error("HTML template error: {0}")]
    Template(#[from] askama::Error),

    /// I/O error during writing
    #[error("I/O error during HTML generation: {0}")]
    Io(#[from] std::io::Error),
}
