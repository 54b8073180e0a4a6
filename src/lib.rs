//! dupview - Duplicate File Report Viewer
//!
//! Fetches a precomputed duplicate-file report (groups of paths sharing a
//! content hash) and shows it as a searchable table, either in an interactive
//! TUI or as JSON, CSV, text or HTML output.

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod output;
pub mod progress;
pub mod report;
pub mod signal;
pub mod tui;

use std::fs::File;
use std::io::{self, BufWriter, IsTerminal, Write};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;

use crate::cli::Cli;
use crate::config::Config;
use crate::error::ExitCode;
use crate::logging::{init_logging, LogDestination};
use crate::output::{write_report, OutputOptions};
use crate::progress::LoadingIndicator;
use crate::report::{FileReportSource, HttpReportSource, ReportSource};
use crate::signal::{install_handler, ShutdownHandler};
use crate::tui::{run_tui, ReportView, Theme, TuiExit};

/// How long the non-interactive path blocks per wait before checking for a
/// shutdown signal.
const WAIT_SLICE: Duration = Duration::from_millis(100);

/// Run dupview with parsed arguments.
///
/// # Errors
///
/// Returns an error for configuration, terminal or output failures. A failed
/// report fetch is not an error: the TUI shows an empty table and the other
/// formats exit with [`ExitCode::ReportUnavailable`].
pub fn run_app(cli: Cli) -> anyhow::Result<ExitCode> {
    let interactive = cli.output.is_interactive() && !cli.print_config;
    init_logging(
        cli.verbose,
        cli.quiet,
        LogDestination::choose(cli.log_file.as_deref(), interactive),
    );

    if cli.no_color {
        yansi::disable();
    }

    let mut config = Config::load(cli.config.as_deref()).context("failed to load configuration")?;
    config.apply_cli(&cli);
    log::debug!("Effective configuration: {:?}", config);

    if cli.print_config {
        let toml = config.to_toml().context("failed to serialize configuration")?;
        print!("{}", toml);
        return Ok(ExitCode::Success);
    }

    let source = build_source(&cli, &config);
    log::info!("Report source: {}", source.describe());

    let shutdown = match install_handler() {
        Ok(handler) => Some(handler),
        Err(e) => {
            log::warn!("Ctrl+C handling unavailable: {}", e);
            None
        }
    };

    if interactive {
        run_interactive(&cli, &config, source, shutdown)
    } else {
        run_batch(&cli, source, shutdown.as_ref())
    }
}

fn build_source(cli: &Cli, config: &Config) -> Arc<dyn ReportSource> {
    match &cli.file {
        Some(path) => Arc::new(FileReportSource::new(path.clone())),
        None => Arc::new(HttpReportSource::new(config.endpoint.clone()).with_timeout(config.timeout())),
    }
}

fn run_interactive(
    cli: &Cli,
    config: &Config,
    source: Arc<dyn ReportSource>,
    shutdown: Option<ShutdownHandler>,
) -> anyhow::Result<ExitCode> {
    let mut view = ReportView::new()
        .with_theme(Theme::from_arg(config.theme))
        .with_ascii_borders(config.ascii_borders)
        .with_fetch_error_notice(config.show_fetch_errors)
        .with_search_term(cli.filter.clone().unwrap_or_default());

    let exit = run_tui(&mut view, source, shutdown).context("terminal UI failed")?;

    Ok(match exit {
        TuiExit::Interrupted => ExitCode::Interrupted,
        TuiExit::Quit => ExitCode::Success,
    })
}

fn run_batch(
    cli: &Cli,
    source: Arc<dyn ReportSource>,
    shutdown: Option<&ShutdownHandler>,
) -> anyhow::Result<ExitCode> {
    let label = source.describe();
    let mut view = ReportView::new();
    view.mount(source);

    let indicator = LoadingIndicator::start(cli.quiet, cli.accessible, &label);
    while !view.wait_fetch(WAIT_SLICE) {
        if shutdown.is_some_and(ShutdownHandler::is_shutdown_requested) {
            view.teardown();
            indicator.clear();
            log::info!("Interrupted while loading the report");
            return Ok(ExitCode::Interrupted);
        }
    }
    indicator.finish(!view.fetch_failed());

    view.update_search_term(cli.filter.clone().unwrap_or_default());
    let options = OutputOptions {
        term: view.search_term(),
        source: &label,
        color: cli.output_file.is_none() && !cli.no_color && io::stdout().is_terminal(),
    };

    let matched = match &cli.output_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create output file {}", path.display()))?;
            let mut writer = BufWriter::new(file);
            let matched = write_report(cli.output, view.report(), options, &mut writer)
                .with_context(|| format!("failed to write {}", path.display()))?;
            writer.flush()?;
            log::info!("Wrote {} output to {}", cli.output, path.display());
            matched
        }
        None => {
            let stdout = io::stdout();
            let mut writer = stdout.lock();
            write_report(cli.output, view.report(), options, &mut writer)
                .context("failed to write output")?
        }
    };

    Ok(if view.fetch_failed() {
        ExitCode::ReportUnavailable
    } else if matched == 0 {
        ExitCode::NoDuplicates
    } else {
        ExitCode::Success
    })
}
