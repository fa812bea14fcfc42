//! Voice control for a running session.

pub mod parser;

pub use parser::{parse_command, VoiceCommand};

use tracing::debug;

use crate::error::PlungeError;
use crate::features::timer::{RunState, SessionTimer, TimerOutcome};

/// What a voice command did to the timer.
#[derive(Debug, Clone, PartialEq)]
pub enum VoiceEffect {
    /// The command does not apply in the current state
    Ignored,
    /// The command was applied, possibly producing an outcome
    Applied(Option<TimerOutcome>),
}

/// Apply a recognised command to a timer.
///
/// Start only acts when the timer is not running (it resumes a paused
/// session and restarts a completed one), pause only while running, stop only
/// while running or paused, and a new duration only while no session is active.
///
/// # Errors
///
/// Returns an error if a duration is set on a timer that has none to change.
pub fn apply_voice_command(
    timer: &mut SessionTimer,
    command: VoiceCommand,
) -> Result<VoiceEffect, PlungeError> {
    debug!(%command, state = %timer.run_state(), "voice command");

    let effect = match (command, timer.run_state()) {
        (VoiceCommand::Start, RunState::Idle) => VoiceEffect::Applied(timer.start()),
        (VoiceCommand::Start, RunState::Paused) => VoiceEffect::Applied(timer.resume()),
        (VoiceCommand::Start, RunState::Completed) => {
            timer.stop();
            VoiceEffect::Applied(timer.start())
        }
        (VoiceCommand::Pause, RunState::Running) => VoiceEffect::Applied(timer.pause()),
        (VoiceCommand::Stop, RunState::Running | RunState::Paused) => {
            VoiceEffect::Applied(timer.stop())
        }
        (VoiceCommand::SetDuration(secs), RunState::Idle | RunState::Completed) => {
            timer.set_duration(secs)?;
            VoiceEffect::Applied(None)
        }
        _ => VoiceEffect::Ignored,
    };

    Ok(effect)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::SessionKind;
    use crate::features::timer::{CyclicConfig, PlainConfig};

    fn plain(secs: u32) -> SessionTimer {
        SessionTimer::new(PlainConfig::new(secs, SessionKind::IceBath).unwrap())
    }

    #[test]
    fn test_start_pause_resume_stop() {
        let mut timer = plain(120);

        assert_eq!(
            apply_voice_command(&mut timer, VoiceCommand::Pause).unwrap(),
            VoiceEffect::Ignored
        );
        apply_voice_command(&mut timer, VoiceCommand::Start).unwrap();
        assert_eq!(timer.run_state(), RunState::Running);

        assert_eq!(
            apply_voice_command(&mut timer, VoiceCommand::Start).unwrap(),
            VoiceEffect::Ignored
        );

        apply_voice_command(&mut timer, VoiceCommand::Pause).unwrap();
        assert_eq!(timer.run_state(), RunState::Paused);

        apply_voice_command(&mut timer, VoiceCommand::Start).unwrap();
        assert_eq!(timer.run_state(), RunState::Running);

        apply_voice_command(&mut timer, VoiceCommand::Stop).unwrap();
        assert_eq!(timer.run_state(), RunState::Idle);
    }

    #[test]
    fn test_set_duration_only_when_inactive() {
        let mut timer = plain(120);
        apply_voice_command(&mut timer, VoiceCommand::SetDuration(300)).unwrap();
        assert_eq!(timer.state().remaining_in_phase, 300);

        timer.start();
        assert_eq!(
            apply_voice_command(&mut timer, VoiceCommand::SetDuration(60)).unwrap(),
            VoiceEffect::Ignored
        );
        assert_eq!(timer.state().remaining_in_phase, 300);
    }

    #[test]
    fn test_set_duration_on_breathing_timer_fails() {
        let config = CyclicConfig::new("Box Breathing", [4, 4, 4, 4], 10).unwrap();
        let mut timer = SessionTimer::new(config);
        assert!(apply_voice_command(&mut timer, VoiceCommand::SetDuration(60)).is_err());
    }

    #[test]
    fn test_start_after_completion_restarts() {
        let mut timer = plain(1);
        timer.start();
        timer.tick();
        assert_eq!(timer.run_state(), RunState::Completed);

        apply_voice_command(&mut timer, VoiceCommand::Start).unwrap();
        assert_eq!(timer.run_state(), RunState::Running);
        assert_eq!(timer.state().elapsed_total, 0);
    }
}
