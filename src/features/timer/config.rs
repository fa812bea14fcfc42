//! Timer configurations.
//!
//! A configuration is immutable once built and always valid: every
//! constructor rejects shapes that could never make progress (zero-length
//! plain timers, patterns where every phase is empty, zero cycles).

use serde::{Deserialize, Serialize};

use crate::core::{Intensity, SessionKind};
use crate::error::PlungeError;

/// Minimum elapsed seconds before a stopped protocol is kept.
pub const DEFAULT_MINIMUM_SESSION_SECS: u32 = 30;

/// Label of a single timer phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PhaseKind {
    /// Single countdown of a plain timer
    Countdown,
    /// Breathe in
    Inhale,
    /// Hold after inhaling
    HoldIn,
    /// Breathe out
    Exhale,
    /// Hold after exhaling
    HoldOut,
    /// Heat exposure
    Hot,
    /// Cold exposure
    Cold,
}

impl PhaseKind {
    /// Breathing phases in pattern order.
    pub const BREATH_ORDER: [Self; 4] = [Self::Inhale, Self::HoldIn, Self::Exhale, Self::HoldOut];

    /// Human-readable label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Countdown => "Countdown",
            Self::Inhale => "Inhale",
            Self::HoldIn | Self::HoldOut => "Hold",
            Self::Exhale => "Exhale",
            Self::Hot => "Hot",
            Self::Cold => "Cold",
        }
    }
}

impl std::fmt::Display for PhaseKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A fixed countdown, optionally tagged with thermal details.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlainConfig {
    /// Countdown length in seconds
    pub duration_secs: u32,
    /// Kind recorded on completion
    pub kind: SessionKind,
    /// Target temperature in °C
    pub temperature: Option<f64>,
    /// Selected intensity
    pub intensity: Option<Intensity>,
}

impl PlainConfig {
    /// Create a plain countdown.
    ///
    /// # Errors
    ///
    /// Returns `PlungeError::InvalidConfig` if the duration is zero.
    pub fn new(duration_secs: u32, kind: SessionKind) -> Result<Self, PlungeError> {
        if duration_secs == 0 {
            return Err(PlungeError::InvalidConfig(
                "duration must be at least one second".to_string(),
            ));
        }
        Ok(Self {
            duration_secs,
            kind,
            temperature: None,
            intensity: None,
        })
    }

    /// Set the target temperature.
    #[must_use]
    pub const fn with_temperature(mut self, temperature: Option<f64>) -> Self {
        self.temperature = temperature;
        self
    }

    /// Set the intensity.
    #[must_use]
    pub const fn with_intensity(mut self, intensity: Option<Intensity>) -> Self {
        self.intensity = intensity;
        self
    }
}

/// A four-phase breathing pattern repeated for a number of cycles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CyclicConfig {
    /// Technique name recorded on completion
    pub technique: String,
    /// `[inhale, hold, exhale, hold]` in seconds
    pub pattern: [u32; 4],
    /// Number of full repetitions
    pub cycles: u32,
}

impl CyclicConfig {
    /// Create a breathing configuration.
    ///
    /// # Errors
    ///
    /// Returns `PlungeError::InvalidConfig` if `cycles` is zero or every
    /// phase of the pattern is zero.
    pub fn new(
        technique: impl Into<String>,
        pattern: [u32; 4],
        cycles: u32,
    ) -> Result<Self, PlungeError> {
        if cycles == 0 {
            return Err(PlungeError::InvalidConfig(
                "a breathing session needs at least one cycle".to_string(),
            ));
        }
        if pattern.iter().all(|secs| *secs == 0) {
            return Err(PlungeError::InvalidConfig(
                "breathing pattern has no non-empty phase".to_string(),
            ));
        }
        Ok(Self {
            technique: technique.into(),
            pattern,
            cycles,
        })
    }

    /// Length of one full cycle in seconds.
    #[must_use]
    pub fn cycle_secs(&self) -> u32 {
        self.pattern.iter().sum()
    }
}

/// Heat or cold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Exposure {
    /// Sauna, hot tub, warm shower
    Hot,
    /// Plunge, ice bath, cold shower
    Cold,
}

impl From<Exposure> for PhaseKind {
    fn from(exposure: Exposure) -> Self {
        match exposure {
            Exposure::Hot => Self::Hot,
            Exposure::Cold => Self::Cold,
        }
    }
}

/// One step of a contrast protocol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProtocolPhase {
    /// Hot or cold
    pub exposure: Exposure,
    /// Step length in seconds
    pub duration_secs: u32,
    /// Target temperature in °C
    pub temperature: f64,
    /// Short instruction shown while the step runs
    pub description: String,
}

impl ProtocolPhase {
    /// Create a protocol step.
    #[must_use]
    pub fn new(
        exposure: Exposure,
        duration_secs: u32,
        temperature: f64,
        description: impl Into<String>,
    ) -> Self {
        Self {
            exposure,
            duration_secs,
            temperature,
            description: description.into(),
        }
    }
}

/// A named, linear, non-repeating sequence of hot and cold steps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProtocolConfig {
    /// Protocol name recorded on completion
    pub name: String,
    /// Steps in order
    pub phases: Vec<ProtocolPhase>,
    /// A stop at or below this many elapsed seconds discards the session
    pub minimum_session_secs: u32,
}

impl ProtocolConfig {
    /// Create a protocol.
    ///
    /// # Errors
    ///
    /// Returns `PlungeError::InvalidConfig` if no step has a non-zero duration.
    pub fn new(name: impl Into<String>, phases: Vec<ProtocolPhase>) -> Result<Self, PlungeError> {
        if phases.iter().all(|p| p.duration_secs == 0) {
            return Err(PlungeError::InvalidConfig(
                "protocol has no non-empty phase".to_string(),
            ));
        }
        Ok(Self {
            name: name.into(),
            phases,
            minimum_session_secs: DEFAULT_MINIMUM_SESSION_SECS,
        })
    }

    /// Override the discard threshold for early stops.
    #[must_use]
    pub const fn with_minimum_session(mut self, secs: u32) -> Self {
        self.minimum_session_secs = secs;
        self
    }

    /// Arithmetic mean of every step's target temperature.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn average_temperature(&self) -> f64 {
        let sum: f64 = self.phases.iter().map(|p| p.temperature).sum();
        sum / self.phases.len() as f64
    }
}

/// What a timer runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "variant", rename_all = "kebab-case")]
pub enum TimerConfiguration {
    /// One countdown
    Plain(PlainConfig),
    /// Repeating breathing pattern
    Cyclic(CyclicConfig),
    /// Linear contrast protocol
    MultiPhase(ProtocolConfig),
}

impl TimerConfiguration {
    /// Number of phases in the sequence.
    #[must_use]
    pub fn phase_count(&self) -> usize {
        match self {
            Self::Plain(_) => 1,
            Self::Cyclic(c) => c.pattern.len(),
            Self::MultiPhase(p) => p.phases.len(),
        }
    }

    /// Configured length of the phase at `index`, zero when out of range.
    #[must_use]
    pub fn phase_duration(&self, index: usize) -> u32 {
        match self {
            Self::Plain(p) if index == 0 => p.duration_secs,
            Self::Plain(_) => 0,
            Self::Cyclic(c) => c.pattern.get(index).copied().unwrap_or(0),
            Self::MultiPhase(p) => p.phases.get(index).map_or(0, |phase| phase.duration_secs),
        }
    }

    /// Label of the phase at `index`.
    #[must_use]
    pub fn phase_kind(&self, index: usize) -> PhaseKind {
        match self {
            Self::Plain(_) => PhaseKind::Countdown,
            Self::Cyclic(_) => PhaseKind::BREATH_ORDER[index % 4],
            Self::MultiPhase(p) => p
                .phases
                .get(index)
                .map_or(PhaseKind::Countdown, |phase| phase.exposure.into()),
        }
    }

    /// Index of the first phase with a non-zero duration.
    #[must_use]
    pub fn first_phase(&self) -> usize {
        (0..self.phase_count())
            .find(|i| self.phase_duration(*i) > 0)
            .unwrap_or(0)
    }

    /// Total ticks a session takes when run to completion.
    #[must_use]
    pub fn total_secs(&self) -> u32 {
        match self {
            Self::Plain(p) => p.duration_secs,
            Self::Cyclic(c) => c.cycle_secs().saturating_mul(c.cycles),
            Self::MultiPhase(p) => p.phases.iter().map(|phase| phase.duration_secs).sum(),
        }
    }

    /// Kind recorded in the journal.
    #[must_use]
    pub const fn session_kind(&self) -> SessionKind {
        match self {
            Self::Plain(p) => p.kind,
            Self::Cyclic(_) => SessionKind::Breathing,
            Self::MultiPhase(_) => SessionKind::ContrastTherapy,
        }
    }

    /// Technique or protocol name, if any.
    #[must_use]
    pub fn label(&self) -> Option<&str> {
        match self {
            Self::Plain(_) => None,
            Self::Cyclic(c) => Some(&c.technique),
            Self::MultiPhase(p) => Some(&p.name),
        }
    }
}

impl From<PlainConfig> for TimerConfiguration {
    fn from(config: PlainConfig) -> Self {
        Self::Plain(config)
    }
}

impl From<CyclicConfig> for TimerConfiguration {
    fn from(config: CyclicConfig) -> Self {
        Self::Cyclic(config)
    }
}

impl From<ProtocolConfig> for TimerConfiguration {
    fn from(config: ProtocolConfig) -> Self {
        Self::MultiPhase(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alternating(temps: &[f64]) -> ProtocolConfig {
        let phases = temps
            .iter()
            .enumerate()
            .map(|(i, t)| {
                let exposure = if i % 2 == 0 { Exposure::Hot } else { Exposure::Cold };
                ProtocolPhase::new(exposure, 60, *t, "step")
            })
            .collect();
        ProtocolConfig::new("test", phases).unwrap()
    }

    #[test]
    fn test_plain_rejects_zero_duration() {
        assert!(matches!(
            PlainConfig::new(0, SessionKind::IceBath),
            Err(PlungeError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_cyclic_validation() {
        assert!(CyclicConfig::new("empty", [0, 0, 0, 0], 3).is_err());
        assert!(CyclicConfig::new("none", [4, 4, 4, 4], 0).is_err());
        assert!(CyclicConfig::new("wim", [2, 0, 1, 0], 30).is_ok());
    }

    #[test]
    fn test_protocol_rejects_all_empty() {
        let phases = vec![ProtocolPhase::new(Exposure::Hot, 0, 40.0, "nothing")];
        assert!(ProtocolConfig::new("empty", phases).is_err());
    }

    #[test]
    fn test_average_temperature() {
        let protocol = alternating(&[40.0, 15.0, 40.0, 15.0]);
        assert!((protocol.average_temperature() - 27.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_first_phase_skips_empty() {
        let config: TimerConfiguration = CyclicConfig::new("x", [0, 0, 3, 1], 1).unwrap().into();
        assert_eq!(config.first_phase(), 2);
        assert_eq!(config.phase_kind(2), PhaseKind::Exhale);
    }

    #[test]
    fn test_total_secs() {
        let breathing: TimerConfiguration = CyclicConfig::new("box", [4, 4, 4, 4], 2).unwrap().into();
        assert_eq!(breathing.total_secs(), 32);

        let protocol: TimerConfiguration = alternating(&[40.0, 15.0]).into();
        assert_eq!(protocol.total_secs(), 120);
        assert_eq!(protocol.session_kind(), SessionKind::ContrastTherapy);
    }
}
