//! TUI main loop.
//!
//! Takes over the terminal (raw mode, alternate screen, hidden cursor),
//! mounts the [`ReportView`] so its fetch starts, then loops:
//!
//! 1. Apply the fetch result if it has arrived
//! 2. Render the current state
//! 3. Poll for a key event and handle it
//! 4. Limit frame rate to ~60 FPS
//!
//! On exit the view is torn down before the terminal is restored, so a fetch
//! still in flight is discarded. The terminal is restored on error and panic
//! too.

use std::io::{self, Stdout};
use std::panic;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crossterm::{
    cursor, execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use thiserror::Error;

use super::app::ReportView;
use super::events::EventHandler;
use super::ui::{render, table_viewport_rows};
use crate::report::ReportSource;
use crate::signal::ShutdownHandler;

/// Frame rate limit: 60 FPS = ~16.67ms per frame.
const FRAME_DURATION: Duration = Duration::from_millis(16);

/// Event poll timeout.
const POLL_TIMEOUT: Duration = Duration::from_millis(16);

/// Error type for TUI operations.
#[derive(Debug, Error)]
pub enum TuiError {
    /// I/O error from terminal operations.
    #[error("terminal I/O error: {0}")]
    Io(#[from] io::Error),

    /// Event handling error.
    #[error("event error: {0}")]
    Event(#[from] super::events::EventError),
}

/// Result type for TUI operations.
pub type TuiResult<T> = Result<T, TuiError>;

/// Type alias for the terminal backend.
type Terminal = ratatui::Terminal<CrosstermBackend<Stdout>>;

/// How the TUI session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TuiExit {
    /// The user quit
    Quit,
    /// A shutdown signal arrived
    Interrupted,
}

/// Run the interactive TUI until the user quits.
///
/// # Errors
///
/// Returns [`TuiError`] for terminal I/O failures. Report fetch failures are
/// not errors here; the view degrades to an empty table.
pub fn run_tui(
    view: &mut ReportView,
    source: Arc<dyn ReportSource>,
    shutdown: Option<ShutdownHandler>,
) -> TuiResult<TuiExit> {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = restore_terminal();
        original_hook(panic_info);
    }));

    let result = run_tui_inner(view, source, shutdown);

    // Drop our hook; the default one comes back
    let _ = panic::take_hook();

    view.teardown();
    let restored = restore_terminal();
    let exit = result?;
    restored?;
    log::info!("TUI exited: {:?}", exit);
    Ok(exit)
}

fn run_tui_inner(
    view: &mut ReportView,
    source: Arc<dyn ReportSource>,
    shutdown: Option<ShutdownHandler>,
) -> TuiResult<TuiExit> {
    let mut terminal = setup_terminal()?;
    let event_handler = EventHandler::new();
    let mut last_render = Instant::now();

    view.mount(source);

    loop {
        if shutdown
            .as_ref()
            .is_some_and(ShutdownHandler::is_shutdown_requested)
        {
            log::info!("Shutdown signal received, exiting TUI");
            return Ok(TuiExit::Interrupted);
        }
        if view.should_quit() {
            return Ok(TuiExit::Quit);
        }

        view.poll_fetch();
        view.tick();

        let size = terminal.size()?;
        view.set_page_rows(table_viewport_rows(Rect::new(0, 0, size.width, size.height)));

        terminal.draw(|frame| render(frame, view))?;

        if let Some(action) = event_handler.poll(POLL_TIMEOUT)? {
            view.handle_action(action);
        }

        let elapsed = last_render.elapsed();
        if elapsed < FRAME_DURATION {
            std::thread::sleep(FRAME_DURATION - elapsed);
        }
        last_render = Instant::now();
    }
}

/// Set up the terminal for TUI mode.
fn setup_terminal() -> TuiResult<Terminal> {
    log::debug!("Setting up terminal for TUI");

    terminal::enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, cursor::Hide)?;

    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore the terminal to its original state.
fn restore_terminal() -> TuiResult<()> {
    log::debug!("Restoring terminal");

    terminal::disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen, cursor::Show)?;
    Ok(())
}
