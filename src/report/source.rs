//! Report sources.
//!
//! A [`ReportSource`] performs one best-effort read of a duplicate-file report.
//! The production source is [`HttpReportSource`], which issues a plain
//! `GET` against the report endpoint. [`FileReportSource`] reads the same JSON
//! shape from disk, as written by the scanner's JSON export.
//!
//! Every failure mode (transport, HTTP status, payload shape, file I/O) maps to
//! a single [`FetchError`] so callers have exactly one failure path to handle.

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use super::{parse_report, ReportEntry};

/// Failure to obtain a report.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Transport-level failure (connection refused, DNS, reset, ...).
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("report endpoint returned HTTP {status}")]
    Status {
        /// HTTP status code
        status: u16,
    },

    /// The payload was not an array of `{hash, files}` objects.
    #[error("malformed report payload: {0}")]
    Malformed(#[from] serde_json::Error),

    /// A report file could not be read.
    #[error("cannot read report file {path}: {source}")]
    Io {
        /// File that failed
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

/// A place a report can be read from.
///
/// Implementations must be usable from a worker thread.
pub trait ReportSource: Send + Sync {
    /// Read the full report once.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] for any failure; no retry is attempted.
    fn fetch(&self) -> Result<Vec<ReportEntry>, FetchError>;

    /// Human-readable description used in log messages.
    fn describe(&self) -> String;
}

/// Reads the report from the scanner's HTTP endpoint.
#[derive(Debug, Clone)]
pub struct HttpReportSource {
    endpoint: String,
    timeout: Option<Duration>,
}

impl HttpReportSource {
    /// Create a source for the given endpoint URL with no request timeout.
    #[must_use]
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            timeout: None,
        }
    }

    /// Apply a request timeout. `None` waits indefinitely.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// The endpoint URL.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl ReportSource for HttpReportSource {
    fn fetch(&self) -> Result<Vec<ReportEntry>, FetchError> {
        log::debug!("GET {}", self.endpoint);

        // reqwest's blocking client defaults to a 30s timeout; override it
        let client = reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .build()?;

        let response = client.get(&self.endpoint).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
            });
        }

        let body = response.text()?;
        let entries = parse_report(&body)?;
        log::debug!(
            "Received {} report entries ({} bytes) from {}",
            entries.len(),
            body.len(),
            self.endpoint
        );
        Ok(entries)
    }

    fn describe(&self) -> String {
        self.endpoint.clone()
    }
}

/// Reads a report previously exported to a JSON file.
#[derive(Debug, Clone)]
pub struct FileReportSource {
    path: PathBuf,
}

impl FileReportSource {
    /// Create a source for the given file.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ReportSource for FileReportSource {
    fn fetch(&self) -> Result<Vec<ReportEntry>, FetchError> {
        let content = fs::read_to_string(&self.path).map_err(|source| FetchError::Io {
            path: self.path.clone(),
            source,
        })?;
        Ok(parse_report(&content)?)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_file_source_reads_report() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"hash":"abc123","files":["/a/x.txt","/b/x.txt"]}}]"#
        )
        .unwrap();

        let source = FileReportSource::new(file.path());
        let report = source.fetch().unwrap();
        assert_eq!(report, vec![ReportEntry::new("abc123", vec!["/a/x.txt", "/b/x.txt"])]);
    }

    #[test]
    fn test_file_source_missing_file() {
        let source = FileReportSource::new("/nonexistent/dupview/report.json");
        let err = source.fetch().unwrap_err();
        assert!(matches!(err, FetchError::Io { .. }));
        assert!(err.to_string().contains("report.json"));
    }

    #[test]
    fn test_file_source_malformed() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"not":"an array"}}"#).unwrap();

        let err = FileReportSource::new(file.path()).fetch().unwrap_err();
        assert!(matches!(err, FetchError::Malformed(_)));
    }

    #[test]
    fn test_http_source_describe() {
        let source = HttpReportSource::new("http://localhost:8080/report");
        assert_eq!(source.describe(), "http://localhost:8080/report");
        assert_eq!(source.endpoint(), "http://localhost:8080/report");
    }

    #[test]
    fn test_status_error_display() {
        let err = FetchError::Status { status: 503 };
        assert_eq!(err.to_string(), "report endpoint returned HTTP 503");
    }
}
