//! JSON output formatting for plunge.

use serde::Serialize;
use serde_json::json;

use crate::error::PlungeError;
use crate::features::catalog::{BreathingTechnique, ContrastProtocol, ThermalPreset};
use crate::features::journal::SessionRecord;
use crate::features::profile::{AppSettings, Preferences, User};

/// Format journal records as JSON
///
/// # Errors
///
/// Returns `PlungeError::Parse` if JSON serialization fails.
pub fn format_sessions_json(sessions: &[SessionRecord], title: &str) -> Result<String, PlungeError> {
    let output = json!({
        "list": title,
        "count": sessions.len(),
        "items": sessions
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Format the catalog as JSON. Sections left out are omitted.
///
/// # Errors
///
/// Returns `PlungeError::Parse` if JSON serialization fails.
pub fn format_catalog_json(
    breathing: Option<&[BreathingTechnique]>,
    contrast: Option<&[ContrastProtocol]>,
    thermal: Option<&[ThermalPreset]>,
) -> Result<String, PlungeError> {
    let mut output = serde_json::Map::new();
    if let Some(techniques) = breathing {
        output.insert("breathing".to_string(), serde_json::to_value(techniques)?);
    }
    if let Some(protocols) = contrast {
        let items: Vec<_> = protocols
            .iter()
            .map(|p| {
                json!({
                    "protocol": p,
                    "total_secs": p.total_secs(),
                })
            })
            .collect();
        output.insert("contrast".to_string(), serde_json::Value::Array(items));
    }
    if let Some(presets) = thermal {
        output.insert("thermal".to_string(), serde_json::to_value(presets)?);
    }
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Format a profile as JSON
///
/// # Errors
///
/// Returns `PlungeError::Parse` if JSON serialization fails.
pub fn format_profile_json(
    user: Option<&User>,
    preferences: Option<&Preferences>,
    settings: &AppSettings,
) -> Result<String, PlungeError> {
    let output = json!({
        "user": user,
        "preferences": preferences,
        "settings": settings,
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Generic JSON formatter for any serializable type
///
/// # Errors
///
/// Returns `PlungeError::Parse` if JSON serialization fails.
pub fn to_json<T: Serialize>(value: &T) -> Result<String, PlungeError> {
    Ok(serde_json::to_string_pretty(value)?)
}
