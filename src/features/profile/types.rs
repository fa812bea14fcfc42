//! Profile data types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A local user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub user_id: String,
    pub name: String,
    pub email: String,
    pub picture: String,
    /// When the profile was first created
    pub signed_in_at: DateTime<Utc>,
}

/// Self-reported experience level from onboarding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Experience {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

impl Experience {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
        }
    }

    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "beginner" => Some(Self::Beginner),
            "intermediate" => Some(Self::Intermediate),
            "advanced" => Some(Self::Advanced),
            _ => None,
        }
    }
}

impl std::fmt::Display for Experience {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Practice the user wants to focus on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Interest {
    ColdTherapy,
    Breathing,
}

impl Interest {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ColdTherapy => "cold-therapy",
            Self::Breathing => "breathing",
        }
    }

    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "cold-therapy" | "cold" => Some(Self::ColdTherapy),
            "breathing" | "breath" => Some(Self::Breathing),
            _ => None,
        }
    }
}

/// Onboarding answers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preferences {
    pub user_id: String,
    pub name: String,
    pub experience: Experience,
    pub goals: Vec<String>,
    /// Preferred plain session length
    pub preferred_duration_secs: u32,
    pub interests: Vec<Interest>,
    pub onboarding_completed: bool,
}

/// Interface language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    He,
}

impl Language {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::En => "en",
            Self::He => "he",
        }
    }

    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "en" | "english" => Some(Self::En),
            "he" | "hebrew" => Some(Self::He),
            _ => None,
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Color theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }
}

/// Per-user application settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppSettings {
    pub user_id: String,
    pub language: Language,
    pub theme: Option<Theme>,
}

impl AppSettings {
    /// Settings used before anything has been saved.
    #[must_use]
    pub fn defaults_for(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            language: Language::default(),
            theme: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_experience_parse() {
        assert_eq!(Experience::parse("Advanced"), Some(Experience::Advanced));
        assert_eq!(Experience::parse("expert"), None);
    }

    #[test]
    fn test_interest_wire_names() {
        let json = serde_json::to_string(&Interest::ColdTherapy).unwrap();
        assert_eq!(json, "\"cold-therapy\"");
        assert_eq!(Interest::parse("breath"), Some(Interest::Breathing));
    }

    #[test]
    fn test_language_and_theme() {
        assert_eq!(Language::parse("hebrew"), Some(Language::He));
        assert_eq!(Language::default(), Language::En);
        assert_eq!(Theme::parse("DARK"), Some(Theme::Dark));
        assert_eq!(Theme::parse("sepia"), None);
    }

    #[test]
    fn test_settings_defaults() {
        let settings = AppSettings::defaults_for("local");
        assert_eq!(settings.language, Language::En);
        assert!(settings.theme.is_none());
    }
}
