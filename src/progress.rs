//! Loading indicator for non-TUI output modes using indicatif.
//!
//! The spinner is drawn on stderr so it never mixes with report output on
//! stdout. Quiet mode and accessible mode skip the animation.
//!
//! # Accessible Mode
//!
//! When accessible mode is enabled, loading is reported as plain text lines
//! without cursor movement.

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

/// Spinner shown while the report fetch is in flight.
#[derive(Debug)]
pub struct LoadingIndicator {
    bar: Option<ProgressBar>,
    accessible: bool,
}

impl LoadingIndicator {
    /// Start the indicator.
    ///
    /// # Arguments
    ///
    /// * `quiet` - If true, nothing is displayed.
    /// * `accessible` - If true, prints plain lines instead of animating.
    /// * `source` - Label of the report source, shown in the message.
    ///
    /// # Examples
    ///
    /// ```
    /// use dupview::progress::LoadingIndicator;
    ///
    /// let indicator = LoadingIndicator::start(true, false, "report.json");
    /// assert!(!indicator.is_visible());
    /// indicator.finish(true);
    /// ```
    #[must_use]
    pub fn start(quiet: bool, accessible: bool, source: &str) -> Self {
        if quiet {
            return Self {
                bar: None,
                accessible,
            };
        }

        let message = format!("Loading report from {}", source);
        if accessible {
            eprintln!("{}...", message);
            return Self {
                bar: None,
                accessible,
            };
        }

        let bar = ProgressBar::new_spinner();
        bar.set_style(
            ProgressStyle::with_template("{spinner:.green} {msg} [{elapsed_precise}]")
                .unwrap_or_else(|_| ProgressStyle::default_spinner())
                .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ "),
        );
        bar.set_message(message);
        bar.enable_steady_tick(Duration::from_millis(100));

        Self {
            bar: Some(bar),
            accessible,
        }
    }

    /// Whether an animated spinner is on screen.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.bar.is_some()
    }

    /// Stop the indicator. `loaded` selects the final message.
    pub fn finish(self, loaded: bool) {
        let message = if loaded {
            "Report loaded"
        } else {
            "Report unavailable"
        };

        match self.bar {
            Some(bar) => bar.finish_with_message(message),
            None if self.accessible => eprintln!("{}", message),
            None => {}
        }
    }

    /// Remove the indicator without a final message.
    pub fn clear(self) {
        if let Some(bar) = self.bar {
            bar.finish_and_clear();
        }
    }
}
