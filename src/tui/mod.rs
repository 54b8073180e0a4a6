//! Terminal User Interface module.
//!
//! The interactive report view, built on ratatui with the crossterm backend.
//!
//! - [`app`]: view state (report, loading flag, search term, scroll)
//! - [`events`]: key events to actions
//! - [`theme`]: color palettes
//! - [`ui`]: rendering
//! - [`run`]: terminal setup and main loop
//!
//! # Architecture
//!
//! Unidirectional data flow:
//! 1. Key events are captured from the terminal (crossterm)
//! 2. Events are translated to Actions
//! 3. Actions modify the ReportView state
//! 4. The UI renders from the current state, deriving the filtered rows

pub mod app;
pub mod events;
pub mod run;
pub mod theme;
pub mod ui;

pub use app::{Action, FetchStatus, ReportView};
pub use events::{EventError, EventHandler};
pub use run::{run_tui, TuiError, TuiExit};
pub use theme::Theme;
pub use ui::render;
