//! Recorded sessions.

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};

use crate::core::{format_duration, Intensity, Mood, SessionKind};
use crate::features::timer::CompletionPayload;

/// A session stored in the journal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    /// Database ID (None if not persisted)
    pub id: Option<i64>,
    /// Owner
    pub user_id: String,
    /// Recorded length in seconds
    pub duration_secs: u32,
    /// When the session finished
    pub completed_at: DateTime<Utc>,
    /// Session kind
    pub kind: SessionKind,
    /// Breathing technique or contrast protocol
    pub technique: Option<String>,
    /// Temperature in °C
    pub temperature: Option<f64>,
    /// How the session felt
    pub mood: Option<Mood>,
    /// Free-form notes
    pub notes: Option<String>,
    /// Intensity
    pub intensity: Option<Intensity>,
}

impl SessionRecord {
    /// Build an unsaved record from a timer completion.
    #[must_use]
    pub fn from_completion(
        user_id: impl Into<String>,
        payload: &CompletionPayload,
        completed_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: None,
            user_id: user_id.into(),
            duration_secs: payload.duration_secs,
            completed_at,
            kind: payload.kind,
            technique: payload.technique.clone(),
            temperature: payload.temperature,
            mood: None,
            notes: None,
            intensity: payload.intensity,
        }
    }

    /// Completion time in the local timezone.
    #[must_use]
    pub fn completed_at_local(&self) -> DateTime<Local> {
        self.completed_at.with_timezone(&Local)
    }

    /// One-line summary, e.g. "Sauna 15m at 85°C (high)".
    #[must_use]
    pub fn summary(&self) -> String {
        let mut out = format!("{} {}", self.kind, format_duration(self.duration_secs));
        if let Some(ref technique) = self.technique {
            out.push_str(&format!(" - {technique}"));
        }
        if let Some(temp) = self.temperature {
            out.push_str(&format!(" at {temp:.1}°C"));
        }
        if let Some(intensity) = self.intensity {
            out.push_str(&format!(" ({intensity})"));
        }
        out
    }
}

/// Fields to change on an existing record. `None` leaves a field as is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionPatch {
    /// New duration in seconds
    pub duration_secs: Option<u32>,
    /// New mood
    pub mood: Option<Mood>,
    /// New notes
    pub notes: Option<String>,
    /// New temperature
    pub temperature: Option<f64>,
    /// New intensity
    pub intensity: Option<Intensity>,
}

impl SessionPatch {
    /// True if nothing would change.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.duration_secs.is_none()
            && self.mood.is_none()
            && self.notes.is_none()
            && self.temperature.is_none()
            && self.intensity.is_none()
    }
}
