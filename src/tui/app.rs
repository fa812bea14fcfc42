//! Application state for the live session screen.

use crate::core::format_mmss;
use crate::features::timer::{
    PhaseKind, RunState, SessionTimer, TickSource, TimerConfiguration, TimerOutcome,
};

/// Application state.
pub struct SessionApp<T: TickSource> {
    /// The timer being driven.
    pub timer: SessionTimer,
    /// Wall-clock (or virtual) tick source.
    pub ticker: T,
    /// Session title shown in the header.
    pub title: String,
    /// Status message to display.
    pub status: Option<String>,
    /// Completion or discard, once the session has ended.
    pub outcome: Option<TimerOutcome>,
    /// Whether the app should quit.
    pub should_quit: bool,
}

impl<T: TickSource> SessionApp<T> {
    /// Create a new app instance. The timer starts immediately.
    pub fn new(mut timer: SessionTimer, mut ticker: T, title: impl Into<String>) -> Self {
        timer.start();
        ticker.reset();
        Self {
            timer,
            ticker,
            title: title.into(),
            status: Some("Session started".to_string()),
            outcome: None,
            should_quit: false,
        }
    }

    /// Consume due ticks and react to what they produced.
    pub fn on_tick(&mut self) {
        for outcome in self.timer.pump(&mut self.ticker) {
            self.handle_outcome(outcome);
        }
    }

    fn handle_outcome(&mut self, outcome: TimerOutcome) {
        match &outcome {
            TimerOutcome::PhaseChanged { phase, .. } => {
                self.status = Some(phase_instruction(
                    self.timer.config(),
                    *phase,
                    self.timer.state().current_phase_index,
                ));
            }
            TimerOutcome::Completed(_) => {
                self.status = Some("Session complete! Press q to save and exit".to_string());
                self.outcome = Some(outcome);
            }
            TimerOutcome::Discarded => {
                self.status = Some("Session too short to save. Press q to exit".to_string());
                self.outcome = Some(outcome);
            }
        }
    }

    /// Pause a running session or resume a paused one.
    pub fn toggle_pause(&mut self) {
        match self.timer.run_state() {
            RunState::Running => {
                self.timer.pause();
                self.status = Some("Paused".to_string());
            }
            RunState::Paused => {
                self.timer.resume();
                self.ticker.reset();
                self.status = Some("Resumed".to_string());
            }
            RunState::Idle | RunState::Completed => {}
        }
    }

    /// End the session early.
    pub fn stop(&mut self) {
        if !self.timer.state().is_active() {
            return;
        }
        match self.timer.stop() {
            Some(outcome) => self.handle_outcome(outcome),
            None => {
                self.status = Some("Stopped. Press q to exit".to_string());
            }
        }
    }

    /// Stop anything still running and leave.
    pub fn quit(&mut self) {
        self.stop();
        self.should_quit = true;
    }

    /// Remaining time in the current phase as mm:ss.
    #[must_use]
    pub fn remaining_label(&self) -> String {
        format_mmss(self.timer.state().remaining_in_phase)
    }

    /// Current phase label and instruction.
    #[must_use]
    pub fn phase_label(&self) -> String {
        phase_instruction(
            self.timer.config(),
            self.timer.current_phase(),
            self.timer.state().current_phase_index,
        )
    }

    /// "Cycle 3 of 10" for breathing, "Step 2 of 6" for contrast.
    #[must_use]
    pub fn position_label(&self) -> Option<String> {
        let state = self.timer.state();
        match self.timer.config() {
            TimerConfiguration::Plain(_) => None,
            TimerConfiguration::Cyclic(cyclic) => Some(format!(
                "Cycle {} of {}",
                (state.current_cycle + 1).min(cyclic.cycles),
                cyclic.cycles
            )),
            TimerConfiguration::MultiPhase(protocol) => Some(format!(
                "Step {} of {}",
                state.current_phase_index + 1,
                protocol.phases.len()
            )),
        }
    }
}

fn phase_instruction(config: &TimerConfiguration, phase: PhaseKind, index: usize) -> String {
    match config {
        TimerConfiguration::MultiPhase(protocol) => protocol
            .phases
            .get(index)
            .map_or_else(
                || phase.label().to_string(),
                |p| format!("{} {:.0}°C - {}", phase.label(), p.temperature, p.description),
            ),
        _ => phase.label().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::SessionKind;
    use crate::features::catalog::{protocol, technique};
    use crate::features::timer::{ManualTicker, PlainConfig, DEFAULT_MINIMUM_SESSION_SECS};

    fn plain_app(secs: u32) -> SessionApp<ManualTicker> {
        let timer = SessionTimer::new(PlainConfig::new(secs, SessionKind::IceBath).unwrap());
        SessionApp::new(timer, ManualTicker::new(), "Ice Bath")
    }

    #[test]
    fn test_new_starts_timer() {
        let app = plain_app(60);
        assert_eq!(app.timer.run_state(), RunState::Running);
        assert_eq!(app.remaining_label(), "01:00");
        assert!(app.position_label().is_none());
    }

    #[test]
    fn test_ticks_complete_session() {
        let mut app = plain_app(3);
        app.ticker.advance(2);
        app.on_tick();
        assert!(app.outcome.is_none());

        app.ticker.advance(5);
        app.on_tick();
        assert!(matches!(app.outcome, Some(TimerOutcome::Completed(_))));
        assert_eq!(app.ticker.pending(), 4);
    }

    #[test]
    fn test_pause_blocks_ticks() {
        let mut app = plain_app(10);
        app.toggle_pause();
        app.ticker.advance(3);
        app.on_tick();
        assert_eq!(app.timer.state().elapsed_total, 0);

        app.toggle_pause();
        assert_eq!(app.timer.run_state(), RunState::Running);
    }

    #[test]
    fn test_quit_early_contrast_is_discarded() {
        let config = protocol("basic-3-1")
            .unwrap()
            .to_config(DEFAULT_MINIMUM_SESSION_SECS)
            .unwrap();
        let mut app = SessionApp::new(SessionTimer::new(config), ManualTicker::new(), "Basic");
        app.ticker.advance(10);
        app.on_tick();
        app.quit();

        assert!(app.should_quit);
        assert_eq!(app.outcome, Some(TimerOutcome::Discarded));
        assert_eq!(app.position_label().as_deref(), Some("Step 1 of 4"));
    }

    #[test]
    fn test_breathing_labels() {
        let config = technique("box").unwrap().to_config(Some(2)).unwrap();
        let mut app = SessionApp::new(SessionTimer::new(config), ManualTicker::new(), "Box");
        assert_eq!(app.position_label().as_deref(), Some("Cycle 1 of 2"));

        app.ticker.advance(4);
        app.on_tick();
        assert_eq!(app.phase_label(), PhaseKind::HoldIn.label());
    }
}
