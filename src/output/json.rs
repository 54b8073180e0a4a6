//! JSON output formatter.
//!
//! Writes the (filtered) report in exactly the endpoint's format, so the
//! output can be fed back through `--file`.
//!
//! ```json
//! [
//!   {
//!     "hash": "abc123",
//!     "files": ["/a/x.txt", "/b/x.txt"]
//!   }
//! ]
//! ```
//!
//! # Example
//!
//! ```
//! use dupview::output::json::JsonOutput;
//! use dupview::report::ReportEntry;
//!
//! let entries = vec![ReportEntry::new("abc123", vec!["/a/x.txt", "/b/x.txt"])];
//! let refs: Vec<&ReportEntry> = entries.iter().collect();
//! let json = JsonOutput::new(&refs).to_json().unwrap();
//! assert_eq!(json, r#"[{"hash":"abc123","files":["/a/x.txt","/b/x.txt"]}]"#);
//! ```

use std::io::Write;

use crate::report::ReportEntry;

/// JSON output formatter.
#[derive(Debug, Clone, Copy)]
pub struct JsonOutput<'a> {
    entries: &'a [&'a ReportEntry],
}

impl<'a> JsonOutput<'a> {
    /// Create a formatter over the rows to write.
    #[must_use]
    pub fn new(entries: &'a [&'a ReportEntry]) -> Self {
        Self { entries }
    }

    /// Serialize to a compact JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self.entries)
    }

    /// Serialize to a pretty-printed JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self.entries)
    }

    /// Write JSON to a writer, followed by a newline.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or writing fails.
    pub fn write_to<W: Write>(&self, writer: &mut W, pretty: bool) -> Result<(), JsonOutputError> {
        let json = if pretty {
            self.to_json_pretty()?
        } else {
            self.to_json()?
        };
        writer.write_all(json.as_bytes())?;
        writer.write_all(b"\n")?;
        Ok(())
    }
}

/// Errors that can occur during JSON output.
#[derive(thiserror::Error, Debug)]
pub enum JsonOutputError {
    /// JSON serialization error
    #[error("JSON serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O error during writing
    #[error("I/O error during JSON generation: {0}")]
    Io(#[from] std::io::Error),
}
