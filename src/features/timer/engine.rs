//! The session timer state machine.
//!
//! [`transition`] is a pure function from `(configuration, state, event)` to
//! the next state plus an optional outcome. [`SessionTimer`] owns one
//! configuration and one state and applies events to them. Every event is
//! defined in every state; misuse such as resuming an idle timer leaves the
//! state untouched.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::clock::TickSource;
use super::config::{PhaseKind, PlainConfig, ProtocolConfig, TimerConfiguration};
use super::state::{RunState, TimerState};
use crate::core::{Intensity, SessionKind};
use crate::error::PlungeError;

/// Input to the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    /// Begin a session from Idle
    Start,
    /// Halt a running session
    Pause,
    /// Continue a paused session
    Resume,
    /// End the session early
    Stop,
    /// One second elapsed
    Tick,
}

/// Data handed to the journal when a session completes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionPayload {
    /// Seconds to record
    pub duration_secs: u32,
    /// Session kind
    pub kind: SessionKind,
    /// Breathing technique or contrast protocol name
    pub technique: Option<String>,
    /// Temperature in °C
    pub temperature: Option<f64>,
    /// Session intensity
    pub intensity: Option<Intensity>,
}

/// Something noteworthy produced by a transition.
#[derive(Debug, Clone, PartialEq)]
pub enum TimerOutcome {
    /// A new phase became current.
    PhaseChanged {
        /// Index of the phase now running
        index: usize,
        /// Its label
        phase: PhaseKind,
        /// Completed cycles at this point
        cycle: u32,
    },
    /// The session finished and should be recorded.
    Completed(CompletionPayload),
    /// The session was stopped too early to be worth recording.
    Discarded,
}

/// Result of applying one event.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    /// State after the event
    pub state: TimerState,
    /// What happened, if anything
    pub outcome: Option<TimerOutcome>,
}

impl Transition {
    const fn quiet(state: TimerState) -> Self {
        Self {
            state,
            outcome: None,
        }
    }

    const fn with(state: TimerState, outcome: TimerOutcome) -> Self {
        Self {
            state,
            outcome: Some(outcome),
        }
    }
}

/// Apply `event` to `state` under `config`.
#[must_use]
pub fn transition(config: &TimerConfiguration, state: TimerState, event: TimerEvent) -> Transition {
    match (state.run_state, event) {
        (RunState::Idle, TimerEvent::Start) => Transition::quiet(TimerState {
            run_state: RunState::Running,
            ..TimerState::idle(config)
        }),
        (RunState::Running, TimerEvent::Pause) => Transition::quiet(TimerState {
            run_state: RunState::Paused,
            ..state
        }),
        (RunState::Paused, TimerEvent::Resume) => Transition::quiet(TimerState {
            run_state: RunState::Running,
            ..state
        }),
        (RunState::Running, TimerEvent::Tick) => tick(config, state),
        (RunState::Running | RunState::Paused, TimerEvent::Stop) => stop(config, state),
        (RunState::Completed, TimerEvent::Stop) => Transition::quiet(TimerState::idle(config)),
        _ => Transition::quiet(state),
    }
}

fn tick(config: &TimerConfiguration, state: TimerState) -> Transition {
    let mut next = state;
    next.elapsed_total = next.elapsed_total.saturating_add(1);
    next.remaining_in_phase = next.remaining_in_phase.saturating_sub(1);

    if next.remaining_in_phase > 0 {
        return Transition::quiet(next);
    }

    match config {
        TimerConfiguration::Plain(plain) => {
            next.run_state = RunState::Completed;
            Transition::with(next, TimerOutcome::Completed(plain_payload(plain)))
        }
        TimerConfiguration::Cyclic(cyclic) => {
            let len = cyclic.pattern.len();
            loop {
                next.current_phase_index = (next.current_phase_index + 1) % len;
                if next.current_phase_index == 0 {
                    next.current_cycle += 1;
                    if next.current_cycle >= cyclic.cycles {
                        next.run_state = RunState::Completed;
                        let payload = CompletionPayload {
                            duration_secs: next.elapsed_total,
                            kind: SessionKind::Breathing,
                            technique: Some(cyclic.technique.clone()),
                            temperature: None,
                            intensity: None,
                        };
                        return Transition::with(next, TimerOutcome::Completed(payload));
                    }
                }

                let secs = cyclic.pattern[next.current_phase_index];
                if secs > 0 {
                    next.remaining_in_phase = secs;
                    return Transition::with(next, phase_changed(config, &next));
                }
            }
        }
        TimerConfiguration::MultiPhase(protocol) => {
            let upcoming = (next.current_phase_index + 1..protocol.phases.len())
                .find(|i| protocol.phases[*i].duration_secs > 0);

            if let Some(index) = upcoming {
                next.current_phase_index = index;
                next.remaining_in_phase = protocol.phases[index].duration_secs;
                return Transition::with(next, phase_changed(config, &next));
            }

            next.run_state = RunState::Completed;
            let payload = protocol_payload(protocol, next.elapsed_total, Intensity::High);
            Transition::with(next, TimerOutcome::Completed(payload))
        }
    }
}

fn stop(config: &TimerConfiguration, state: TimerState) -> Transition {
    let TimerConfiguration::MultiPhase(protocol) = config else {
        return Transition::quiet(TimerState::idle(config));
    };

    if state.elapsed_total > protocol.minimum_session_secs {
        let payload = protocol_payload(protocol, state.elapsed_total, Intensity::Medium);
        let next = TimerState {
            run_state: RunState::Completed,
            ..state
        };
        Transition::with(next, TimerOutcome::Completed(payload))
    } else {
        Transition::with(TimerState::idle(config), TimerOutcome::Discarded)
    }
}

fn phase_changed(config: &TimerConfiguration, state: &TimerState) -> TimerOutcome {
    TimerOutcome::PhaseChanged {
        index: state.current_phase_index,
        phase: config.phase_kind(state.current_phase_index),
        cycle: state.current_cycle,
    }
}

fn plain_payload(plain: &PlainConfig) -> CompletionPayload {
    CompletionPayload {
        duration_secs: plain.duration_secs,
        kind: plain.kind,
        technique: None,
        temperature: plain.temperature,
        intensity: plain.intensity,
    }
}

fn protocol_payload(
    protocol: &ProtocolConfig,
    elapsed: u32,
    intensity: Intensity,
) -> CompletionPayload {
    CompletionPayload {
        duration_secs: elapsed,
        kind: SessionKind::ContrastTherapy,
        technique: Some(protocol.name.clone()),
        temperature: Some(protocol.average_temperature()),
        intensity: Some(intensity),
    }
}

/// A single timer instance.
#[derive(Debug, Clone)]
pub struct SessionTimer {
    config: TimerConfiguration,
    state: TimerState,
}

impl SessionTimer {
    /// Create an idle timer.
    #[must_use]
    pub fn new(config: impl Into<TimerConfiguration>) -> Self {
        let config = config.into();
        let state = TimerState::idle(&config);
        Self { config, state }
    }

    /// Current configuration.
    #[must_use]
    pub const fn config(&self) -> &TimerConfiguration {
        &self.config
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> &TimerState {
        &self.state
    }

    /// Lifecycle state.
    #[must_use]
    pub const fn run_state(&self) -> RunState {
        self.state.run_state
    }

    /// Apply an event.
    pub fn apply(&mut self, event: TimerEvent) -> Option<TimerOutcome> {
        let Transition { state, outcome } = transition(&self.config, self.state, event);

        if state.run_state != self.state.run_state {
            debug!(from = %self.state.run_state, to = %state.run_state, ?event, "timer transition");
        }
        match &outcome {
            Some(TimerOutcome::Completed(payload)) => info!(
                kind = payload.kind.as_str(),
                duration = payload.duration_secs,
                "session completed"
            ),
            Some(TimerOutcome::Discarded) => {
                info!(elapsed = self.state.elapsed_total, "session too short, discarded");
            }
            Some(TimerOutcome::PhaseChanged { index, phase, cycle }) => {
                debug!(index, %phase, cycle, "phase changed");
            }
            None => {}
        }

        self.state = state;
        outcome
    }

    /// Start from Idle.
    pub fn start(&mut self) -> Option<TimerOutcome> {
        self.apply(TimerEvent::Start)
    }

    /// Pause a running session.
    pub fn pause(&mut self) -> Option<TimerOutcome> {
        self.apply(TimerEvent::Pause)
    }

    /// Resume a paused session.
    pub fn resume(&mut self) -> Option<TimerOutcome> {
        self.apply(TimerEvent::Resume)
    }

    /// Stop the session.
    pub fn stop(&mut self) -> Option<TimerOutcome> {
        self.apply(TimerEvent::Stop)
    }

    /// Advance by one second.
    pub fn tick(&mut self) -> Option<TimerOutcome> {
        self.apply(TimerEvent::Tick)
    }

    /// Consume every tick the source has due while the timer keeps running.
    pub fn pump<T: TickSource + ?Sized>(&mut self, ticker: &mut T) -> Vec<TimerOutcome> {
        let mut outcomes = Vec::new();
        while self.state.run_state == RunState::Running && ticker.poll_tick() {
            outcomes.extend(self.tick());
        }
        outcomes
    }

    /// Replace the configuration and reset every counter.
    ///
    /// # Errors
    ///
    /// Returns `PlungeError::TimerBusy` while a session is running or paused;
    /// the timer is left untouched.
    pub fn reconfigure(&mut self, config: impl Into<TimerConfiguration>) -> Result<(), PlungeError> {
        if self.state.is_active() {
            warn!(state = %self.state.run_state, "rejected reconfiguration of an active timer");
            return Err(PlungeError::TimerBusy(
                "stop the current session before changing its configuration".to_string(),
            ));
        }
        self.config = config.into();
        self.state = TimerState::idle(&self.config);
        Ok(())
    }

    /// Change the length of a plain countdown.
    ///
    /// # Errors
    ///
    /// Returns `PlungeError::TimerBusy` while active, or
    /// `PlungeError::InvalidConfig` for a zero duration or a non-plain timer.
    pub fn set_duration(&mut self, duration_secs: u32) -> Result<(), PlungeError> {
        let TimerConfiguration::Plain(plain) = &self.config else {
            return Err(PlungeError::InvalidConfig(
                "only plain timers have an adjustable duration".to_string(),
            ));
        };
        let updated = PlainConfig::new(duration_secs, plain.kind)?
            .with_temperature(plain.temperature)
            .with_intensity(plain.intensity);
        self.reconfigure(updated)
    }

    /// Label of the current phase.
    #[must_use]
    pub fn current_phase(&self) -> PhaseKind {
        self.config.phase_kind(self.state.current_phase_index)
    }

    /// Overall progress in `0.0..=1.0`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn progress(&self) -> f64 {
        match self.state.run_state {
            RunState::Idle => return 0.0,
            RunState::Completed => return 1.0,
            RunState::Running | RunState::Paused => {}
        }

        let fraction = match &self.config {
            TimerConfiguration::Cyclic(cyclic) => {
                let phase = (self.state.current_phase_index + 1) as f64 / cyclic.pattern.len() as f64;
                (f64::from(self.state.current_cycle) + phase) / f64::from(cyclic.cycles)
            }
            TimerConfiguration::Plain(_) | TimerConfiguration::MultiPhase(_) => {
                f64::from(self.state.elapsed_total) / f64::from(self.config.total_secs().max(1))
            }
        };
        fraction.clamp(0.0, 1.0)
    }

    /// Progress through the current phase in `0.0..=1.0`.
    #[must_use]
    pub fn phase_progress(&self) -> f64 {
        let total = self.config.phase_duration(self.state.current_phase_index);
        if total == 0 || self.state.run_state == RunState::Completed {
            return 1.0;
        }
        let done = total.saturating_sub(self.state.remaining_in_phase);
        f64::from(done) / f64::from(total)
    }
}
