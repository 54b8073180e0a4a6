//! Duplicate-file report data model and filtering.
//!
//! # Overview
//!
//! A report is an ordered list of [`ReportEntry`] values, each one a content
//! hash plus the file paths sharing it. Reports come from a [`ReportSource`]
//! (normally the HTTP endpoint) and are never mutated after they arrive.
//!
//! The filtered view is derived on demand by [`filter_entries`]. It holds no
//! state of its own, so it can never drift from the report or the search term.
//!
//! # Example
//!
//! ```
//! use dupview::report::{filter_entries, ReportEntry};
//!
//! let report = vec![
//!     ReportEntry::new("abc123", vec!["/a/x.txt", "/b/x.txt"]),
//!     ReportEntry::new("def456", vec!["/a/y.png", "/c/y.png"]),
//! ];
//!
//! let visible = filter_entries(&report, "X.TXT");
//! assert_eq!(visible.len(), 1);
//! assert_eq!(visible[0].hash, "abc123");
//! ```

pub mod fetch;
pub mod source;

use serde::{Deserialize, Serialize};

pub use fetch::{spawn_fetch, LivenessToken, PendingFetch};
pub use source::{FetchError, FileReportSource, HttpReportSource, ReportSource};

/// Default report endpoint of the duplicate scanner service.
pub const DEFAULT_ENDPOINT: &str = "http://localhost:8080/report";

/// One duplicate-content group: a content hash and every path that shares it.
///
/// Field names match the endpoint's wire format exactly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportEntry {
    /// Content fingerprint, as delivered by the server
    pub hash: String,
    /// Paths sharing the fingerprint, in server order
    pub files: Vec<String>,
}

impl ReportEntry {
    /// Create a report entry.
    #[must_use]
    pub fn new<H, I, F>(hash: H, files: I) -> Self
    where
        H: Into<String>,
        I: IntoIterator<Item = F>,
        F: Into<String>,
    {
        Self {
            hash: hash.into(),
            files: files.into_iter().map(Into::into).collect(),
        }
    }

    /// Check whether any file path contains `needle`.
    ///
    /// `needle` must already be lowercase; paths are lowercased here. The hash
    /// is not considered.
    #[must_use]
    pub fn matches_lowercase(&self, needle: &str) -> bool {
        needle.is_empty()
            || self
                .files
                .iter()
                .any(|file| file.to_lowercase().contains(needle))
    }

    /// Number of files in this group.
    #[must_use]
    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    /// Table lines this group occupies: one per file, at least one.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.files.len().max(1)
    }

    /// Last seven characters of the hash, for compact listings.
    #[must_use]
    pub fn short_hash(&self) -> &str {
        let count = self.hash.chars().count();
        if count <= 7 {
            return &self.hash;
        }
        let start = self
            .hash
            .char_indices()
            .nth(count - 7)
            .map_or(0, |(idx, _)| idx);
        &self.hash[start..]
    }
}

/// Derive the filtered view of a report.
///
/// An entry is kept iff at least one of its file paths contains `term` as a
/// case-insensitive substring. An empty term keeps everything. Order is
/// preserved.
#[must_use]
pub fn filter_entries<'a>(entries: &'a [ReportEntry], term: &str) -> Vec<&'a ReportEntry> {
    let needle = term.to_lowercase();
    entries
        .iter()
        .filter(|entry| entry.matches_lowercase(&needle))
        .collect()
}

/// Decode a report from the endpoint's JSON representation.
///
/// # Errors
///
/// Returns the `serde_json` error when the text is not a JSON array of
/// `{ "hash": string, "files": [string] }` objects.
pub fn parse_report(json: &str) -> Result<Vec<ReportEntry>, serde_json::Error> {
    serde_json::from_str(json)
}
