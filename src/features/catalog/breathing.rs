//! Built-in breathing techniques.

use serde::Serialize;

use crate::error::PlungeError;
use crate::features::timer::CyclicConfig;

/// A guided breathing technique.
#[derive(Debug, Clone, Serialize)]
pub struct BreathingTechnique {
    /// Identifier used on the command line
    pub id: &'static str,
    /// Display name
    pub name: &'static str,
    /// One-line description
    pub description: &'static str,
    /// `[inhale, hold, exhale, hold]` seconds
    pub pattern: [u32; 4],
    /// Recommended repetitions
    pub cycles: u32,
    /// What practitioners use it for
    pub benefits: &'static [&'static str],
}

impl BreathingTechnique {
    /// Build the timer configuration, optionally overriding the cycle count.
    ///
    /// # Errors
    ///
    /// Returns `PlungeError::InvalidConfig` if `cycles` is zero.
    pub fn to_config(&self, cycles: Option<u32>) -> Result<CyclicConfig, PlungeError> {
        CyclicConfig::new(self.name, self.pattern, cycles.unwrap_or(self.cycles))
    }

    /// Length of one cycle in seconds.
    #[must_use]
    pub fn cycle_secs(&self) -> u32 {
        self.pattern.iter().sum()
    }

    /// Pattern rendered like "4-7-8-0".
    #[must_use]
    pub fn pattern_label(&self) -> String {
        self.pattern
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("-")
    }
}

static TECHNIQUES: [BreathingTechnique; 5] = [
    BreathingTechnique {
        id: "box",
        name: "Box Breathing",
        description: "Equal inhale, hold, exhale and hold",
        pattern: [4, 4, 4, 4],
        cycles: 10,
        benefits: &["Reduces stress", "Improves focus", "Calms nervous system"],
    },
    BreathingTechnique {
        id: "wim-hof",
        name: "Wim Hof",
        description: "Quick inhale and exhale without holds",
        pattern: [2, 0, 1, 0],
        cycles: 30,
        benefits: &["Increases energy", "Boosts immunity", "Enhances cold tolerance"],
    },
    BreathingTechnique {
        id: "4-7-8",
        name: "4-7-8 Breathing",
        description: "Long hold and slow exhale for relaxation",
        pattern: [4, 7, 8, 0],
        cycles: 8,
        benefits: &["Promotes sleep", "Reduces anxiety", "Calms mind"],
    },
    BreathingTechnique {
        id: "pranayama",
        name: "Basic Pranayama",
        description: "Balanced yogic breath with short holds",
        pattern: [4, 2, 6, 2],
        cycles: 12,
        benefits: &["Balances energy", "Improves concentration", "Purifies breath"],
    },
    BreathingTechnique {
        id: "energizing",
        name: "Energizing Breath",
        description: "Brisk rhythm to wake up body and mind",
        pattern: [3, 1, 3, 1],
        cycles: 15,
        benefits: &["Increases alertness", "Boosts metabolism", "Enhances vitality"],
    },
];

/// All built-in techniques.
#[must_use]
pub fn techniques() -> &'static [BreathingTechnique] {
    &TECHNIQUES
}

/// Look up a technique by id.
///
/// # Errors
///
/// Returns `PlungeError::NotFound` for unknown ids.
pub fn technique(id: &str) -> Result<&'static BreathingTechnique, PlungeError> {
    let id = id.trim().to_lowercase();
    TECHNIQUES
        .iter()
        .find(|t| t.id == id)
        .ok_or_else(|| PlungeError::NotFound(format!("breathing technique '{id}'")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup() {
        let box_breathing = technique("BOX").unwrap();
        assert_eq!(box_breathing.pattern, [4, 4, 4, 4]);
        assert_eq!(box_breathing.cycle_secs(), 16);
        assert!(matches!(technique("kapalbhati"), Err(PlungeError::NotFound(_))));
    }

    #[test]
    fn test_every_technique_builds_a_config() {
        for t in techniques() {
            let config = t.to_config(None).unwrap();
            assert_eq!(config.cycles, t.cycles);
            assert_eq!(config.technique, t.name);
        }
    }

    #[test]
    fn test_cycle_override() {
        let config = technique("4-7-8").unwrap().to_config(Some(2)).unwrap();
        assert_eq!(config.cycles, 2);
        assert!(technique("4-7-8").unwrap().to_config(Some(0)).is_err());
    }

    #[test]
    fn test_pattern_label() {
        assert_eq!(technique("wim-hof").unwrap().pattern_label(), "2-0-1-0");
    }
}
