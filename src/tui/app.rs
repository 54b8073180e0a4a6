//! Report view state.
//!
//! # Overview
//!
//! [`ReportView`] is the single stateful component of dupview. It owns:
//! - the report (replaced wholesale once the fetch succeeds)
//! - the loading flag (true until the fetch resolves, never reset)
//! - the raw search term, exactly as typed
//! - the table scroll offset
//!
//! The filtered view is never stored. [`ReportView::filtered_view`] derives it
//! from the report and the search term on every call.
//!
//! # Lifecycle
//!
//! 1. [`ReportView::new`] starts in the loading state.
//! 2. [`ReportView::mount`] starts the one-shot fetch on a worker thread.
//! 3. The owner calls [`ReportView::poll_fetch`] each frame; the result is
//!    applied on the owner's thread.
//! 4. Dropping the view revokes its liveness token, so a fetch that resolves
//!    later is discarded by the worker.
//!
//! # Example
//!
//! ```
//! use dupview::report::ReportEntry;
//! use dupview::tui::app::{Action, ReportView};
//!
//! let mut view = ReportView::new();
//! assert!(view.is_loading());
//!
//! view.apply_fetch_result(Ok(vec![ReportEntry::new(
//!     "abc123",
//!     vec!["/a/x.txt", "/b/x.txt"],
//! )]));
//! assert!(!view.is_loading());
//!
//! for c in "X.TXT".chars() {
//!     view.handle_action(Action::Input(c));
//! }
//! assert_eq!(view.search_term(), "X.TXT");
//! assert_eq!(view.filtered_view().len(), 1);
//! ```

use std::sync::Arc;
use std::time::Duration;

use crate::report::fetch::FetchResult;
use crate::report::{
    filter_entries, spawn_fetch, LivenessToken, PendingFetch, ReportEntry, ReportSource,
};

use super::theme::Theme;

/// Spinner frames for the loading indicator.
const SPINNER_FRAMES: [&str; 4] = ["|", "/", "-", "\\"];

/// Outcome of the report fetch.
///
/// Distinguishes a failed fetch from a genuinely empty report. The TUI only
/// surfaces the difference when configured to.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FetchStatus {
    /// Not resolved yet
    #[default]
    Pending,
    /// Report received
    Loaded,
    /// Fetch failed; the report stays empty
    Failed(String),
}

/// User action triggered by keyboard input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Append a character to the search term
    Input(char),
    /// Remove the last character of the search term
    DeleteChar,
    /// Scroll the table up one row
    ScrollUp,
    /// Scroll the table down one row
    ScrollDown,
    /// Scroll the table up one page
    PageUp,
    /// Scroll the table down one page
    PageDown,
    /// Quit the application
    Quit,
}

/// The duplicate report view.
///
/// Not thread-safe by intent: all state changes happen on the UI thread. The
/// only cross-thread traffic is the fetch result arriving over a channel.
#[derive(Debug)]
pub struct ReportView {
    /// True until the fetch resolves
    loading: bool,
    /// Current report (empty until a successful fetch)
    report: Vec<ReportEntry>,
    /// Search term exactly as typed
    search_term: String,
    /// Why the report looks the way it does
    status: FetchStatus,
    /// Index of the first visible table line (one line per file)
    scroll: usize,
    /// Lines moved by PageUp/PageDown
    page_rows: usize,
    /// Frame counter for the spinner
    ticks: usize,
    /// Set once the user asks to quit
    quit_requested: bool,
    /// Whether the fetch has been started
    mounted: bool,
    /// In-flight fetch
    pending: Option<PendingFetch>,
    /// Revoked on teardown
    token: LivenessToken,
    /// Color palette
    theme: Theme,
    /// Draw ASCII borders
    ascii_borders: bool,
    /// Show "Report unavailable" after a failed fetch
    show_fetch_errors: bool,
}

impl Default for ReportView {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportView {
    /// Create a view in its initial state: loading, empty report, empty term.
    #[must_use]
    pub fn new() -> Self {
        Self {
            loading: true,
            report: Vec::new(),
            search_term: String::new(),
            status: FetchStatus::Pending,
            scroll: 0,
            page_rows: 10,
            ticks: 0,
            quit_requested: false,
            mounted: false,
            pending: None,
            token: LivenessToken::new(),
            theme: Theme::default(),
            ascii_borders: false,
            show_fetch_errors: false,
        }
    }

    /// Set the color theme.
    #[must_use]
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Draw borders with ASCII characters.
    #[must_use]
    pub fn with_ascii_borders(mut self, ascii: bool) -> Self {
        self.ascii_borders = ascii;
        self
    }

    /// Show an explicit notice when the fetch failed.
    #[must_use]
    pub fn with_fetch_error_notice(mut self, show: bool) -> Self {
        self.show_fetch_errors = show;
        self
    }

    /// Pre-fill the search term.
    #[must_use]
    pub fn with_search_term(mut self, term: impl Into<String>) -> Self {
        self.search_term = term.into();
        self
    }

    // ==================== Fetch Lifecycle ====================

    /// Start the report fetch.
    ///
    /// Fires at most once per view; later calls are ignored and return false.
    pub fn mount(&mut self, source: Arc<dyn ReportSource>) -> bool {
        if self.mounted {
            log::warn!("Report view already mounted; ignoring second fetch");
            return false;
        }
        self.mounted = true;
        self.pending = Some(spawn_fetch(source, self.token.clone()));
        true
    }

    /// Check whether the fetch has been started.
    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Apply the fetch result if it has arrived.
    ///
    /// Returns true if the view changed.
    pub fn poll_fetch(&mut self) -> bool {
        let Some(pending) = self.pending.as_mut() else {
            return false;
        };

        match pending.try_take() {
            Some(result) => {
                self.pending = None;
                self.apply_fetch_result(result);
                true
            }
            None if pending.is_done() => {
                self.pending = None;
                self.fail("report fetch worker exited without a result".to_string());
                true
            }
            None => false,
        }
    }

    /// Block up to `timeout` for the fetch result and apply it.
    ///
    /// Returns true once the view is no longer loading.
    pub fn wait_fetch(&mut self, timeout: Duration) -> bool {
        if !self.loading {
            return true;
        }
        let Some(pending) = self.pending.as_mut() else {
            return false;
        };

        match pending.wait_timeout(timeout) {
            Some(result) => {
                self.pending = None;
                self.apply_fetch_result(result);
            }
            None if pending.is_done() => {
                self.pending = None;
                self.fail("report fetch worker exited without a result".to_string());
            }
            None => {}
        }
        !self.loading
    }

    /// Resolve the fetch with `result`.
    ///
    /// Success replaces the report. Failure leaves it empty and reports the
    /// error on the diagnostic log only. Either way the loading flag drops.
    /// Only the first resolution counts.
    pub fn apply_fetch_result(&mut self, result: FetchResult) {
        if !self.loading {
            log::warn!("Ignoring report fetch result: view already resolved");
            return;
        }

        match result {
            Ok(report) => {
                log::info!("Loaded report with {} hash groups", report.len());
                self.report = report;
                self.status = FetchStatus::Loaded;
                self.loading = false;
                self.scroll = 0;
            }
            Err(e) => self.fail(e.to_string()),
        }
    }

    fn fail(&mut self, message: String) {
        log::error!("Error fetching report data: {}", message);
        self.status = FetchStatus::Failed(message);
        self.loading = false;
    }

    /// Tear the view down: revoke the liveness token and drop the pending
    /// fetch. A result arriving afterwards is discarded.
    pub fn teardown(&mut self) {
        if self.pending.take().is_some() {
            log::debug!("Report view torn down with fetch still in flight");
        }
        self.token.revoke();
    }

    /// The liveness token shared with the fetch worker.
    #[must_use]
    pub fn liveness(&self) -> &LivenessToken {
        &self.token
    }

    // ==================== State ====================

    /// Check whether the fetch is still outstanding.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// The full report.
    #[must_use]
    pub fn report(&self) -> &[ReportEntry] {
        &self.report
    }

    /// Fetch outcome.
    #[must_use]
    pub fn fetch_status(&self) -> &FetchStatus {
        &self.status
    }

    /// Check whether the fetch failed.
    #[must_use]
    pub fn fetch_failed(&self) -> bool {
        matches!(self.status, FetchStatus::Failed(_))
    }

    /// Check whether the UI should title the table "Report unavailable".
    #[must_use]
    pub fn shows_fetch_error(&self) -> bool {
        self.show_fetch_errors && self.fetch_failed()
    }

    /// Raw search term.
    #[must_use]
    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    /// Replace the search term with `input`, verbatim.
    pub fn update_search_term(&mut self, input: impl Into<String>) {
        self.search_term = input.into();
        self.scroll = 0;
        log::trace!("Search term: {:?}", self.search_term);
    }

    /// Derive the visible rows from the report and search term.
    #[must_use]
    pub fn filtered_view(&self) -> Vec<&ReportEntry> {
        filter_entries(&self.report, &self.search_term)
    }

    /// Color theme.
    #[must_use]
    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Check whether ASCII borders are enabled.
    #[must_use]
    pub fn ascii_borders(&self) -> bool {
        self.ascii_borders
    }

    /// Check whether the user asked to quit.
    #[must_use]
    pub fn should_quit(&self) -> bool {
        self.quit_requested
    }

    // ==================== Scrolling ====================

    /// Index of the first visible table line.
    ///
    /// Lines, not groups: a group spans one line per file, so a group taller
    /// than the screen can still be scrolled through.
    #[must_use]
    pub fn scroll(&self) -> usize {
        self.scroll
    }

    /// Total table lines of the filtered view.
    #[must_use]
    pub fn table_lines(&self) -> usize {
        self.filtered_view()
            .iter()
            .map(|entry| entry.line_count())
            .sum()
    }

    /// Set the page size used by PageUp/PageDown, in table lines.
    pub fn set_page_rows(&mut self, rows: usize) {
        self.page_rows = rows.max(1);
    }

    fn scroll_down(&mut self, rows: usize) {
        let last = self.table_lines().saturating_sub(1);
        self.scroll = (self.scroll + rows).min(last);
    }

    fn scroll_up(&mut self, rows: usize) {
        self.scroll = self.scroll.saturating_sub(rows);
    }

    // ==================== Spinner ====================

    /// Advance the spinner by one frame.
    pub fn tick(&mut self) {
        self.ticks = self.ticks.wrapping_add(1);
    }

    /// Current spinner glyph.
    #[must_use]
    pub fn spinner_frame(&self) -> &'static str {
        SPINNER_FRAMES[(self.ticks / 6) % SPINNER_FRAMES.len()]
    }

    // ==================== Action Handling ====================

    /// Handle a user action.
    ///
    /// While loading only `Quit` has an effect, as the search input and table
    /// are not shown yet. Returns true if the action was handled.
    pub fn handle_action(&mut self, action: Action) -> bool {
        log::trace!("Handling action: {:?} (loading: {})", action, self.loading);

        if action == Action::Quit {
            self.quit_requested = true;
            return true;
        }
        if self.loading {
            return false;
        }

        match action {
            Action::Input(c) => {
                let mut term = std::mem::take(&mut self.search_term);
                term.push(c);
                self.update_search_term(term);
            }
            Action::DeleteChar => {
                let mut term = std::mem::take(&mut self.search_term);
                term.pop();
                self.update_search_term(term);
            }
            Action::ScrollUp => self.scroll_up(1),
            Action::ScrollDown => self.scroll_down(1),
            Action::PageUp => self.scroll_up(self.page_rows),
            Action::PageDown => self.scroll_down(self.page_rows),
            Action::Quit => {}
        }
        true
    }
}

impl Drop for ReportView {
    fn drop(&mut self) {
        self.token.revoke();
    }
}
