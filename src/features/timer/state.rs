//! Mutable timer state.

use serde::{Deserialize, Serialize};

use super::config::TimerConfiguration;

/// Lifecycle of one timer instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunState {
    /// Configured, not started
    #[default]
    Idle,
    /// Counting down
    Running,
    /// Halted mid-session
    Paused,
    /// Finished; the completion outcome has been emitted
    Completed,
}

impl std::fmt::Display for RunState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Idle => "Idle",
            Self::Running => "Running",
            Self::Paused => "Paused",
            Self::Completed => "Completed",
        })
    }
}

/// Counters of a running timer.
///
/// `remaining_in_phase` only reaches zero in the `Completed` state; every
/// other transition that empties a phase loads the next non-empty one in the
/// same step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TimerState {
    /// Seconds left in the current phase
    pub remaining_in_phase: u32,
    /// Index into the configuration's phase sequence
    pub current_phase_index: usize,
    /// Completed repetitions (breathing only)
    pub current_cycle: u32,
    /// Ticks counted since start
    pub elapsed_total: u32,
    /// Lifecycle state
    pub run_state: RunState,
}

impl TimerState {
    /// Fresh idle state positioned at the first non-empty phase.
    #[must_use]
    pub fn idle(config: &TimerConfiguration) -> Self {
        let index = config.first_phase();
        Self {
            remaining_in_phase: config.phase_duration(index),
            current_phase_index: index,
            current_cycle: 0,
            elapsed_total: 0,
            run_state: RunState::Idle,
        }
    }

    /// Running or paused.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        matches!(self.run_state, RunState::Running | RunState::Paused)
    }
}
