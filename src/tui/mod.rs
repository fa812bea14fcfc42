//! Terminal User Interface (TUI) for plunge.
//!
//! Shows a live countdown for a running session and drives the timer from a
//! wall-clock ticker. Built with ratatui and crossterm.

mod app;
mod event;
mod ui;

pub use app::SessionApp;

use std::io;

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;

use crate::error::PlungeError;
use crate::features::timer::{SessionTimer, TickSource, TimerOutcome};

/// Run a session on the live screen.
///
/// Returns the completion or discard, or `None` if the session was
/// stopped without an outcome.
///
/// # Errors
///
/// Returns an error if the TUI fails to initialize or run.
pub fn run<T: TickSource>(
    timer: SessionTimer,
    ticker: T,
    title: &str,
) -> Result<Option<TimerOutcome>, PlungeError> {
    // Setup terminal
    enable_raw_mode()
        .map_err(|e| PlungeError::Terminal(format!("Failed to enable raw mode: {e}")))?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)
        .map_err(|e| PlungeError::Terminal(format!("Failed to setup terminal: {e}")))?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)
        .map_err(|e| PlungeError::Terminal(format!("Failed to create terminal: {e}")))?;

    let mut app = SessionApp::new(timer, ticker, title);
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
    terminal.show_cursor().ok();

    result.map(|()| app.outcome)
}

/// Run the main application loop.
fn run_app<B: Backend, T: TickSource>(
    terminal: &mut Terminal<B>,
    app: &mut SessionApp<T>,
) -> Result<(), PlungeError> {
    while !app.should_quit {
        app.on_tick();

        terminal
            .draw(|frame| ui::render(frame, app))
            .map_err(|e| PlungeError::Terminal(format!("Failed to draw: {e}")))?;

        if let Some(action) = event::handle_events(app)? {
            match action {
                event::Action::Quit => app.quit(),
                event::Action::TogglePause => app.toggle_pause(),
                event::Action::Stop => app.stop(),
            }
        }
    }

    Ok(())
}
