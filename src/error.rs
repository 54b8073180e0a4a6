//! Structured error handling and exit codes.

use serde::Serialize;

/// Exit codes for the dupview application.
///
/// - 0: Success (report rendered, at least one group shown)
/// - 1: General error (unexpected failure)
/// - 2: No duplicates (report fetched, nothing left after filtering)
/// - 3: Report unavailable (the fetch failed; output is empty)
/// - 130: Interrupted by user (Ctrl+C)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ExitCode {
    /// Success: groups were rendered.
    Success = 0,
    /// General error: An unexpected error occurred.
    GeneralError = 1,
    /// No duplicates: the (filtered) report is empty.
    NoDuplicates = 2,
    /// Report unavailable: the fetch failed and output degraded to empty.
    ReportUnavailable = 3,
    /// Interrupted: user pressed Ctrl+C.
    Interrupted = 130,
}

impl ExitCode {
    /// Get the numeric exit code.
    #[must_use]
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    /// Get the machine-readable code prefix.
    #[must_use]
    pub fn code_prefix(self) -> &'static str {
        match self {
            Self::Success => "DV000",
            Self::GeneralError => "DV001",
            Self::NoDuplicates => "DV002",
            Self::ReportUnavailable => "DV003",
            Self::Interrupted => "DV130",
        }
    }
}

/// Structured error information for JSON output.
#[derive(Debug, Serialize)]
pub struct StructuredError {
    /// The error code (e.g., "DV001")
    pub code: String,
    /// The exit code number
    pub exit_code: i32,
    /// Human-readable error message
    pub message: String,
    /// Whether the operation was interrupted
    pub interrupted: bool,
}

impl StructuredError {
    /// Create a new structured error from an anyhow error and an exit code.
    #[must_use]
    pub fn new(err: &anyhow::Error, exit_code: ExitCode) -> Self {
        Self {
            code: exit_code.code_prefix().to_string(),
            exit_code: exit_code.as_i32(),
            message: format!("{:#}", err),
            interrupted: exit_code == ExitCode::Interrupted,
        }
    }
}
