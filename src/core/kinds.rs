//! Session kinds and intensities shared by the timer and the journal.

use serde::{Deserialize, Serialize};

/// What kind of session was performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SessionKind {
    /// Ice bath immersion
    IceBath,
    /// Guided breathing
    Breathing,
    /// Sauna
    Sauna,
    /// Hot tub
    Jacuzzi,
    /// Cold plunge pool
    ColdPlunge,
    /// Alternating hot and cold protocol
    ContrastTherapy,
}

impl SessionKind {
    /// All kinds, in display order.
    pub const ALL: [Self; 6] = [
        Self::IceBath,
        Self::ColdPlunge,
        Self::Sauna,
        Self::Jacuzzi,
        Self::ContrastTherapy,
        Self::Breathing,
    ];

    /// Stable identifier used in storage and on the command line.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::IceBath => "ice-bath",
            Self::Breathing => "breathing",
            Self::Sauna => "sauna",
            Self::Jacuzzi => "jacuzzi",
            Self::ColdPlunge => "cold-plunge",
            Self::ContrastTherapy => "contrast-therapy",
        }
    }

    /// Parse a kind from its identifier or a common alias.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "ice-bath" | "ice" | "icebath" => Some(Self::IceBath),
            "breathing" | "breath" | "breathe" => Some(Self::Breathing),
            "sauna" => Some(Self::Sauna),
            "jacuzzi" | "hot-tub" => Some(Self::Jacuzzi),
            "cold-plunge" | "plunge" => Some(Self::ColdPlunge),
            "contrast-therapy" | "contrast" => Some(Self::ContrastTherapy),
            _ => None,
        }
    }

    /// Human-readable name.
    #[must_use]
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::IceBath => "Ice Bath",
            Self::Breathing => "Breathing",
            Self::Sauna => "Sauna",
            Self::Jacuzzi => "Jacuzzi",
            Self::ColdPlunge => "Cold Plunge",
            Self::ContrastTherapy => "Contrast Therapy",
        }
    }

    /// Whether this is a cold exposure.
    #[must_use]
    pub const fn is_cold(&self) -> bool {
        matches!(self, Self::IceBath | Self::ColdPlunge)
    }
}

impl std::fmt::Display for SessionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Subjective session intensity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Intensity {
    /// Gentle
    Low,
    /// Moderate
    Medium,
    /// Hard
    High,
}

impl Intensity {
    /// Stable identifier.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    /// Parse an intensity identifier.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "low" | "l" => Some(Self::Low),
            "medium" | "med" | "m" => Some(Self::Medium),
            "high" | "h" => Some(Self::High),
            _ => None,
        }
    }
}

impl std::fmt::Display for Intensity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the user felt after a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Energized,
    Accomplished,
    Calm,
    Strong,
}

impl Mood {
    pub const ALL: [Self; 4] = [Self::Energized, Self::Accomplished, Self::Calm, Self::Strong];

    /// Stable identifier.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Energized => "energized",
            Self::Accomplished => "accomplished",
            Self::Calm => "calm",
            Self::Strong => "strong",
        }
    }

    /// Parse a mood identifier.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim().to_lowercase();
        Self::ALL.into_iter().find(|m| m.as_str() == s)
    }
}

impl std::fmt::Display for Mood {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
