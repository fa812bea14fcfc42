//! Built-in contrast therapy protocols.

use serde::Serialize;

use crate::error::PlungeError;
use crate::features::timer::{Exposure, ProtocolConfig, ProtocolPhase};

/// Experience level a protocol targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    /// New to contrast therapy
    Beginner,
    /// Comfortable with both extremes
    Intermediate,
    /// Long cold exposures
    Advanced,
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
        })
    }
}

/// One step of a built-in protocol.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Step {
    /// Hot or cold
    pub exposure: Exposure,
    /// Seconds
    pub duration_secs: u32,
    /// Target °C
    pub temperature: f64,
    /// Instruction
    pub description: &'static str,
}

const fn hot(duration_secs: u32, temperature: f64, description: &'static str) -> Step {
    Step {
        exposure: Exposure::Hot,
        duration_secs,
        temperature,
        description,
    }
}

const fn cold(duration_secs: u32, temperature: f64, description: &'static str) -> Step {
    Step {
        exposure: Exposure::Cold,
        duration_secs,
        temperature,
        description,
    }
}

/// A named contrast protocol.
#[derive(Debug, Clone, Serialize)]
pub struct ContrastProtocol {
    /// Identifier used on the command line
    pub id: &'static str,
    /// Display name
    pub name: &'static str,
    /// One-line description
    pub description: &'static str,
    /// Target experience level
    pub difficulty: Difficulty,
    /// Steps in order
    pub steps: &'static [Step],
    /// What the protocol is for
    pub benefits: &'static [&'static str],
}

impl ContrastProtocol {
    /// Total length in seconds.
    #[must_use]
    pub fn total_secs(&self) -> u32 {
        self.steps.iter().map(|s| s.duration_secs).sum()
    }

    /// Build the timer configuration.
    ///
    /// # Errors
    ///
    /// Returns `PlungeError::InvalidConfig` if the protocol has no steps.
    pub fn to_config(&self, minimum_session_secs: u32) -> Result<ProtocolConfig, PlungeError> {
        let phases = self
            .steps
            .iter()
            .map(|s| ProtocolPhase::new(s.exposure, s.duration_secs, s.temperature, s.description))
            .collect();
        Ok(ProtocolConfig::new(self.name, phases)?.with_minimum_session(minimum_session_secs))
    }
}

static PROTOCOLS: [ContrastProtocol; 3] = [
    ContrastProtocol {
        id: "basic-3-1",
        name: "Basic 3-1",
        description: "Three minutes warm, one minute cold, twice",
        difficulty: Difficulty::Beginner,
        steps: &[
            hot(180, 40.0, "Warm start"),
            cold(60, 15.0, "Cold shock"),
            hot(180, 40.0, "Warm recovery"),
            cold(60, 15.0, "Cold finish"),
        ],
        benefits: &["Improves circulation", "Speeds recovery"],
    },
    ContrastProtocol {
        id: "finnish",
        name: "Finnish Method",
        description: "Traditional sauna rounds with ice plunges",
        difficulty: Difficulty::Intermediate,
        steps: &[
            hot(300, 85.0, "Sauna warm-up"),
            cold(60, 8.0, "Ice plunge"),
            hot(300, 85.0, "Main sauna round"),
            cold(90, 8.0, "Extended cold"),
            hot(240, 85.0, "Final sauna round"),
            cold(30, 8.0, "Final chill"),
        ],
        benefits: &["Detoxification", "Builds endurance", "Mental clarity"],
    },
    ContrastProtocol {
        id: "performance",
        name: "Performance Protocol",
        description: "Athlete recovery with progressively colder plunges",
        difficulty: Difficulty::Advanced,
        steps: &[
            hot(120, 42.0, "Hot pre-conditioning"),
            cold(90, 12.0, "Intense cold"),
            hot(120, 42.0, "Hot mid-round"),
            cold(90, 10.0, "Deep cold"),
            hot(120, 42.0, "Hot final round"),
            cold(120, 8.0, "Maximum cold"),
            hot(60, 38.0, "Warm down"),
        ],
        benefits: &["Athletic performance", "Cold adaptation", "Stress resilience"],
    },
];

/// All built-in protocols.
#[must_use]
pub fn protocols() -> &'static [ContrastProtocol] {
    &PROTOCOLS
}

/// Look up a protocol by id.
///
/// # Errors
///
/// Returns `PlungeError::NotFound` for unknown ids.
pub fn protocol(id: &str) -> Result<&'static ContrastProtocol, PlungeError> {
    let id = id.trim().to_lowercase();
    PROTOCOLS
        .iter()
        .find(|p| p.id == id)
        .ok_or_else(|| PlungeError::NotFound(format!("contrast protocol '{id}'")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_durations() {
        assert_eq!(protocol("basic-3-1").unwrap().total_secs(), 480);
        assert_eq!(protocol("finnish").unwrap().total_secs(), 1020);
        assert_eq!(protocol("performance").unwrap().total_secs(), 720);
    }

    #[test]
    fn test_basic_average_temperature() {
        let config = protocol("basic-3-1").unwrap().to_config(30).unwrap();
        assert!((config.average_temperature() - 27.5).abs() < f64::EPSILON);
        assert_eq!(config.minimum_session_secs, 30);
        assert_eq!(config.phases.len(), 4);
    }

    #[test]
    fn test_unknown_protocol() {
        assert!(matches!(protocol("russian"), Err(PlungeError::NotFound(_))));
    }

    #[test]
    fn test_protocols_alternate_starting_hot() {
        for p in protocols() {
            assert_eq!(p.steps[0].exposure, Exposure::Hot);
            for pair in p.steps.windows(2) {
                assert_ne!(pair[0].exposure, pair[1].exposure);
            }
        }
    }
}
