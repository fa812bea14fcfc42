//! Event handling for the live session screen.

use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};

use crate::error::PlungeError;
use crate::features::timer::TickSource;
use crate::tui::app::SessionApp;

/// Longest time to block on input before redrawing.
const MAX_POLL: Duration = Duration::from_millis(250);

/// Action to take after handling an event.
pub enum Action {
    /// Stop the session and leave.
    Quit,
    /// Pause or resume.
    TogglePause,
    /// End the session early.
    Stop,
}

/// Handle terminal events.
///
/// Waits at most until the next tick is due, so the countdown stays on
/// schedule while the user is idle.
///
/// # Errors
///
/// Returns an error if event polling fails.
pub fn handle_events<T: TickSource>(app: &mut SessionApp<T>) -> Result<Option<Action>, PlungeError> {
    let timeout = app.ticker.until_next().min(MAX_POLL);

    if !event::poll(timeout)
        .map_err(|e| PlungeError::Terminal(format!("Event poll failed: {e}")))?
    {
        return Ok(None);
    }

    let Event::Key(key) =
        event::read().map_err(|e| PlungeError::Terminal(format!("Event read failed: {e}")))?
    else {
        return Ok(None);
    };

    if key.kind != KeyEventKind::Press {
        return Ok(None);
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Ok(Some(Action::Quit));
    }

    let action = match key.code {
        KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
        KeyCode::Char(' ' | 'p') => Some(Action::TogglePause),
        KeyCode::Char('s') => Some(Action::Stop),
        KeyCode::Char('?') => {
            app.status = Some("space/p:pause | s:stop | q:quit".to_string());
            None
        }
        _ => None,
    };

    Ok(action)
}
