//! Terminal event handling.

use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// What a key press asks the application to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiAction {
    /// No action bound.
    None,
    /// Exit the application.
    Quit,
    /// Restart the load cycle for the current source pair.
    Reload,
}

/// Terminal event handler.
#[derive(Debug, Clone, Copy)]
pub struct EventHandler {
    poll_timeout: Duration,
}

impl EventHandler {
    const DEFAULT_POLL_TIMEOUT_MS: u64 = 100;

    /// Creates new handler with default timeout.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            poll_timeout: Duration::from_millis(Self::DEFAULT_POLL_TIMEOUT_MS),
        }
    }

    /// Creates handler with custom timeout.
    #[must_use]
    pub const fn with_timeout(timeout: Duration) -> Self {
        Self {
            poll_timeout: timeout,
        }
    }

    /// Polls for events.
    ///
    /// # Errors
    /// Returns IO error if polling fails.
    pub fn poll(&self) -> std::io::Result<Option<Event>> {
        if event::poll(self.poll_timeout)? {
            Ok(Some(event::read()?))
        } else {
            Ok(None)
        }
    }

    /// Maps a key press to its bound action.
    #[must_use]
    pub fn action_for(key: &KeyEvent) -> UiAction {
        if key.kind == KeyEventKind::Release {
            return UiAction::None;
        }
        match (key.code, key.modifiers) {
            (KeyCode::Char('q') | KeyCode::Esc, _) => UiAction::Quit,
            (KeyCode::Char('c'), KeyModifiers::CONTROL) => UiAction::Quit,
            (KeyCode::Char('r'), KeyModifiers::NONE) => UiAction::Reload,
            _ => UiAction::None,
        }
    }
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn test_quit_bindings() {
        assert_eq!(
            EventHandler::action_for(&press(KeyCode::Char('q'), KeyModifiers::NONE)),
            UiAction::Quit
        );
        assert_eq!(
            EventHandler::action_for(&press(KeyCode::Esc, KeyModifiers::NONE)),
            UiAction::Quit
        );
        assert_eq!(
            EventHandler::action_for(&press(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            UiAction::Quit
        );
    }

    #[test]
    fn test_reload_binding() {
        assert_eq!(
            EventHandler::action_for(&press(KeyCode::Char('r'), KeyModifiers::NONE)),
            UiAction::Reload
        );
    }

    #[test]
    fn test_unbound_keys_do_nothing() {
        assert_eq!(
            EventHandler::action_for(&press(KeyCode::Char('x'), KeyModifiers::NONE)),
            UiAction::None
        );
    }
}
