//! Logging infrastructure for dupview.
//!
//! Structured logging uses the `log` facade and `env_logger` backend. This is
//! the operator-facing diagnostic channel: report fetch failures are written
//! here and nowhere else.
//!
//! Log levels are determined by (in priority order):
//!
//! 1. `RUST_LOG` environment variable (if set)
//! 2. CLI flags: `--quiet` (error only) or `--verbose` (debug/trace)
//! 3. Default: info level
//!
//! # Destinations
//!
//! The interactive TUI owns the terminal, so writing log lines to stderr would
//! corrupt the screen. In TUI mode logs go to `--log-file`, or to
//! `dupview.log` in the platform data directory. Non-interactive modes log to
//! stderr unless `--log-file` is given.
//!
//! # Example
//!
//! ```rust,no_run
//! use dupview::logging::{init_logging, LogDestination};
//!
//! init_logging(1, false, LogDestination::Stderr);
//! log::debug!("Debug info here");
//! ```

use std::env;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use env_logger::{Builder, Target};
use log::LevelFilter;

/// Where log records are written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogDestination {
    /// Standard error
    Stderr,
    /// Append to a file
    File(PathBuf),
}

impl LogDestination {
    /// Pick the destination for a run.
    ///
    /// An explicit file always wins. Otherwise interactive runs log to the
    /// default log file (falling back to stderr if no data directory exists)
    /// and non-interactive runs log to stderr.
    #[must_use]
    pub fn choose(explicit: Option<&Path>, interactive: bool) -> Self {
        if let Some(path) = explicit {
            return Self::File(path.to_path_buf());
        }
        if interactive {
            if let Some(path) = default_log_path() {
                return Self::File(path);
            }
        }
        Self::Stderr
    }
}

/// Default log file path in the platform data directory.
#[must_use]
pub fn default_log_path() -> Option<PathBuf> {
    ProjectDirs::from("com", "dupview", "dupview")
        .map(|dirs| dirs.data_local_dir().join("dupview.log"))
}

/// Initialize the logging subsystem.
///
/// Call once at startup. If the log file cannot be opened, logging falls
/// back to stderr.
///
/// # Arguments
///
/// * `verbose` - Verbosity count from CLI (0=info, 1=debug, 2+=trace)
/// * `quiet` - If true, only show errors (overridden by RUST_LOG)
/// * `destination` - Where to write records
pub fn init_logging(verbose: u8, quiet: bool, destination: LogDestination) {
    let use_env = env::var("RUST_LOG").is_ok();

    let mut builder = Builder::new();

    if use_env {
        builder.parse_default_env();
    } else {
        builder.filter_level(determine_level(verbose, quiet));
    }

    let file_target = match &destination {
        LogDestination::Stderr => None,
        LogDestination::File(path) => match open_log_file(path) {
            Ok(file) => Some(file),
            Err(e) => {
                eprintln!(
                    "Cannot open log file {}: {}; logging to stderr",
                    path.display(),
                    e
                );
                None
            }
        },
    };
    let to_file = file_target.is_some();
    if let Some(file) = file_target {
        builder.target(Target::Pipe(Box::new(file)));
    }

    configure_format(&mut builder, verbose, to_file);

    // A second init (e.g. from tests) is harmless
    if builder.try_init().is_err() {
        return;
    }

    if use_env {
        log::debug!(
            "Logging initialized from RUST_LOG environment variable: {:?}",
            env::var("RUST_LOG").ok()
        );
    } else {
        log::debug!(
            "Logging initialized at level: {:?}",
            determine_level(verbose, quiet)
        );
    }
}

/// Open (append) the log file, creating its directory if needed.
fn open_log_file(path: &Path) -> std::io::Result<File> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    OpenOptions::new().create(true).append(true).open(path)
}

/// Determine the log level from CLI flags.
fn determine_level(verbose: u8, quiet: bool) -> LevelFilter {
    if quiet {
        LevelFilter::Error
    } else {
        match verbose {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}

/// Configure the log format.
///
/// File logs always carry a timestamp and module path and never carry ANSI
/// styling. Terminal logs use the compact styled format, adding the module
/// path at debug verbosity and above.
fn configure_format(builder: &mut Builder, verbose: u8, to_file: bool) {
    if to_file {
        builder.write_style(env_logger::WriteStyle::Never);
        builder.format(|buf, record| {
            writeln!(
                buf,
                "{} {:<5} [{}] {}",
                buf.timestamp_millis(),
                record.level(),
                record.module_path().unwrap_or("unknown"),
                record.args()
            )
        });
        return;
    }

    builder.format(move |buf, record| {
        let level = record.level();
        let level_style = buf.default_level_style(level);

        if verbose >= 1 {
            writeln!(
                buf,
                "{} {level_style}{:<5}{level_style:#} [{}] {}",
                buf.timestamp_seconds(),
                level,
                record.module_path().unwrap_or("unknown"),
                record.args()
            )
        } else {
            writeln!(
                buf,
                "{level_style}{:<5}{level_style:#} {}",
                level,
                record.args()
            )
        }
    });
}
