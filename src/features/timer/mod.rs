//! Session timer engine.
//!
//! Three variants share one state machine:
//! - Plain countdowns (ice bath, sauna, jacuzzi, cold plunge)
//! - Cyclic breathing patterns
//! - Multi-phase hot/cold contrast protocols

pub mod clock;
pub mod config;
pub mod engine;
pub mod state;

pub use clock::{IntervalTicker, ManualTicker, TickSource};
pub use config::{
    CyclicConfig, Exposure, PhaseKind, PlainConfig, ProtocolConfig, ProtocolPhase,
    TimerConfiguration, DEFAULT_MINIMUM_SESSION_SECS,
};
pub use engine::{transition, CompletionPayload, SessionTimer, TimerEvent, TimerOutcome, Transition};
pub use state::{RunState, TimerState};
