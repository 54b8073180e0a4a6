//! CSV output formatter.
//!
//! One record per hash group: the hash followed by every file path in order.
//! Records have as many fields as the group has files, so the output has no
//! header row and readers must accept variable-length records.
//!
//! ```text
//! abc123,/a/x.txt,/b/x.txt
//! def456,/c/y.png,/d/y.png,/e/y.png
//! ```
//!
//! # Example
//!
//! ```
//! use dupview::output::csv::CsvOutput;
//! use dupview::report::ReportEntry;
//!
//! let entries = vec![ReportEntry::new("abc123", vec!["/a/x.txt", "/b/x.txt"])];
//! let refs: Vec<&ReportEntry> = entries.iter().collect();
//! let csv = CsvOutput::new(&refs).to_string().unwrap();
//! assert_eq!(csv, "abc123,/a/x.txt,/b/x.txt\n");
//! ```

use std::io;

use thiserror::Error;

use crate::report::ReportEntry;

/// Errors that can occur during CSV output generation.
#[derive(Debug, Error)]
pub enum CsvOutputError {
    /// I/O error during writing.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Error during CSV serialization.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// CSV output formatter.
#[derive(Debug, Clone, Copy)]
pub struct CsvOutput<'a> {
    entries: &'a [&'a ReportEntry],
}

impl<'a> CsvOutput<'a> {
    /// Create a formatter over the rows to write.
    #[must_use]
    pub fn new(entries: &'a [&'a ReportEntry]) -> Self {
        Self { entries }
    }

    /// Write the CSV output to the given writer.
    ///
    /// # Errors
    ///
    /// Returns `CsvOutputError` if writing fails.
    pub fn write_to<W: io::Write>(&self, writer: W) -> Result<(), CsvOutputError> {
        let mut csv_writer = csv::WriterBuilder::new()
            .flexible(true)
            .has_headers(false)
            .from_writer(writer);

        for entry in self.entries {
            let record = std::iter::once(entry.hash.as_str())
                .chain(entry.files.iter().map(String::as_str));
            csv_writer.write_record(record)?;
        }

        csv_writer.flush()?;
        Ok(())
    }

    /// Render the CSV output to a string.
    ///
    /// # Errors
    ///
    /// Returns `CsvOutputError` if serialization fails.
    pub fn to_string(&self) -> Result<String, CsvOutputError> {
        let mut buffer = Vec::new();
        self.write_to(&mut buffer)?;
        String::from_utf8(buffer).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e).into())
    }
}
