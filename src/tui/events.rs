//! TUI event handling with crossterm.
//!
//! Translates key presses into [`Action`]s. The search box is the only input,
//! so every printable character is text; only navigation keys and the quit
//! keys are special.

use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use thiserror::Error;

use super::app::Action;

/// Error type for event polling.
#[derive(Debug, Error)]
pub enum EventError {
    /// Reading from the terminal failed.
    #[error("failed to read terminal event: {0}")]
    Io(#[from] std::io::Error),
}

/// Polls the terminal for input.
#[derive(Debug, Default, Clone, Copy)]
pub struct EventHandler;

impl EventHandler {
    /// Create an event handler.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Wait up to `timeout` for an event and translate it.
    ///
    /// # Errors
    ///
    /// Returns [`EventError::Io`] if the terminal cannot be read.
    pub fn poll(&self, timeout: Duration) -> Result<Option<Action>, EventError> {
        if !event::poll(timeout)? {
            return Ok(None);
        }
        match event::read()? {
            Event::Key(key) => Ok(map_key(&key)),
            _ => Ok(None),
        }
    }
}

/// Map a key event to an action.
///
/// Only key presses count; some terminals also report releases.
#[must_use]
pub fn map_key(key: &KeyEvent) -> Option<Action> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Char('c') | KeyCode::Char('d') if ctrl => Some(Action::Quit),
        KeyCode::Esc => Some(Action::Quit),
        KeyCode::Char(_) if ctrl => None,
        KeyCode::Char(c) => Some(Action::Input(c)),
        KeyCode::Backspace => Some(Action::DeleteChar),
        KeyCode::Up => Some(Action::ScrollUp),
        KeyCode::Down => Some(Action::ScrollDown),
        KeyCode::PageUp => Some(Action::PageUp),
        KeyCode::PageDown => Some(Action::PageDown),
        _ => None,
    }
}
