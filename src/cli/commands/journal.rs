//! Journal commands: history, edit and delete.

use colored::Colorize;
use serde_json::json;

use crate::cli::args::{EditArgs, HistoryArgs, OutputFormat};
use crate::config::Config;
use crate::error::PlungeError;
use crate::features::journal::{SessionPatch, SessionStorage};
use crate::output::{format_session, format_sessions, to_json};

/// Execute history command
///
/// # Errors
///
/// Returns an error if the query or output formatting fails.
pub fn history(
    config: &Config,
    storage: &SessionStorage,
    args: HistoryArgs,
    format: OutputFormat,
) -> Result<String, PlungeError> {
    let limit = args.limit.unwrap_or(config.journal.history_limit);
    let sessions = storage.list_for_user(&config.general.user_id, args.kind, Some(limit))?;

    let title = args
        .kind
        .map_or_else(|| "History".to_string(), |k| format!("History: {}", k.display_name()));
    format_sessions(&sessions, &title, format)
}

/// Execute edit command
///
/// # Errors
///
/// Returns `InvalidInput` when no field is given and `NotFound` for an
/// unknown session ID.
pub fn edit(
    storage: &SessionStorage,
    args: EditArgs,
    format: OutputFormat,
) -> Result<String, PlungeError> {
    let patch = SessionPatch {
        duration_secs: args.duration,
        mood: args.mood,
        notes: args.notes,
        temperature: args.temperature,
        intensity: args.intensity,
    };
    if patch.is_empty() {
        return Err(PlungeError::InvalidInput(
            "nothing to change (use --duration, --mood, --notes, --temperature or --intensity)"
                .to_string(),
        ));
    }
    if patch.duration_secs == Some(0) {
        return Err(PlungeError::InvalidInput("duration must be positive".to_string()));
    }

    if !storage.update(args.id, &patch)? {
        return Err(PlungeError::NotFound(format!("session {}", args.id)));
    }

    let session = storage
        .get(args.id)?
        .ok_or_else(|| PlungeError::NotFound(format!("session {}", args.id)))?;
    format_session(&session, format)
}

/// Execute delete command
///
/// # Errors
///
/// Returns `NotFound` for an unknown session ID.
pub fn delete(
    storage: &SessionStorage,
    id: i64,
    format: OutputFormat,
) -> Result<String, PlungeError> {
    if !storage.delete(id)? {
        return Err(PlungeError::NotFound(format!("session {id}")));
    }

    match format {
        OutputFormat::Json => to_json(&json!({ "deleted": id })),
        OutputFormat::Pretty => Ok(format!("{} Deleted session {id}", "✓".green())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Mood, SessionKind};
    use crate::features::journal::SessionRecord;
    use crate::storage::Database;
    use chrono::{Duration, Utc};

    fn seeded() -> SessionStorage {
        let storage = SessionStorage::with_database(Database::open_in_memory().unwrap());
        for (offset, kind) in [(2, SessionKind::Sauna), (1, SessionKind::IceBath)] {
            let mut record = SessionRecord {
                id: None,
                user_id: "local".to_string(),
                duration_secs: 300,
                completed_at: Utc::now() - Duration::hours(offset),
                kind,
                technique: None,
                temperature: None,
                mood: None,
                notes: None,
                intensity: None,
            };
            storage.record(&mut record).unwrap();
        }
        storage
    }

    fn edit_args(id: i64) -> EditArgs {
        EditArgs {
            id,
            duration: None,
            mood: None,
            notes: None,
            temperature: None,
            intensity: None,
        }
    }

    #[test]
    fn test_history_filters_by_kind() {
        colored::control::set_override(false);
        let storage = seeded();
        let args = HistoryArgs {
            kind: Some(SessionKind::Sauna),
            limit: None,
        };
        let output = history(&Config::default(), &storage, args, OutputFormat::Pretty).unwrap();
        assert!(output.contains("History: Sauna (1 sessions)"));
    }

    #[test]
    fn test_history_json_respects_limit() {
        let storage = seeded();
        let args = HistoryArgs {
            kind: None,
            limit: Some(1),
        };
        let output = history(&Config::default(), &storage, args, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["count"], 1);
        assert_eq!(value["items"][0]["kind"], "ice-bath");
    }

    #[test]
    fn test_edit_updates_fields() {
        colored::control::set_override(false);
        let storage = seeded();
        let mut args = edit_args(1);
        args.mood = Some(Mood::Calm);

        let output = edit(&storage, args, OutputFormat::Pretty).unwrap();
        assert!(output.contains("Mood: calm"));
        assert_eq!(storage.get(1).unwrap().unwrap().duration_secs, 300);
    }

    #[test]
    fn test_edit_requires_a_change() {
        let err = edit(&seeded(), edit_args(1), OutputFormat::Pretty).unwrap_err();
        assert!(matches!(err, PlungeError::InvalidInput(_)));
    }

    #[test]
    fn test_edit_missing_session() {
        let mut args = edit_args(99);
        args.notes = Some("x".to_string());
        let err = edit(&seeded(), args, OutputFormat::Pretty).unwrap_err();
        assert!(matches!(err, PlungeError::NotFound(_)));
    }

    #[test]
    fn test_delete() {
        let storage = seeded();
        assert!(delete(&storage, 2, OutputFormat::Pretty).is_ok());
        assert!(matches!(
            delete(&storage, 2, OutputFormat::Pretty),
            Err(PlungeError::NotFound(_))
        ));
    }
}
