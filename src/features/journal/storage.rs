//! Session journal storage.
//!
//! Persists completed sessions to the local database.

use chrono::{DateTime, Utc};
use rusqlite::types::Type;
use rusqlite::{params, OptionalExtension, Row};
use tracing::debug;

use super::record::{SessionPatch, SessionRecord};
use crate::core::{Intensity, Mood, SessionKind};
use crate::error::PlungeError;
use crate::features::timer::CompletionPayload;
use crate::storage::Database;

const SELECT_COLUMNS: &str = "SELECT id, user_id, duration_secs, completed_at, kind, technique,
                                     temperature, mood, notes, intensity
                              FROM sessions";

/// Storage for recorded sessions.
pub struct SessionStorage {
    db: Database,
}

impl SessionStorage {
    /// Open storage at the default database location.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened.
    pub fn new() -> Result<Self, PlungeError> {
        Ok(Self {
            db: Database::open()?,
        })
    }

    /// Create storage with an existing database connection.
    #[must_use]
    pub const fn with_database(db: Database) -> Self {
        Self { db }
    }

    /// Insert a new record and fill in its ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn record(&self, session: &mut SessionRecord) -> Result<i64, PlungeError> {
        let conn = self.db.connection();

        conn.execute(
            r"INSERT INTO sessions
              (user_id, duration_secs, completed_at, kind, technique, temperature, mood, notes, intensity)
              VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                session.user_id,
                session.duration_secs,
                session.completed_at.to_rfc3339(),
                session.kind.as_str(),
                session.technique,
                session.temperature,
                session.mood.map(|m| m.as_str()),
                session.notes,
                session.intensity.map(|i| i.as_str()),
            ],
        )
        .map_err(|e| PlungeError::Database(format!("Failed to insert session: {e}")))?;

        let id = conn.last_insert_rowid();
        session.id = Some(id);
        debug!(id, kind = session.kind.as_str(), "session recorded");
        Ok(id)
    }

    /// Record a timer completion for a user, stamped now, with the mood and
    /// notes given when saving it. Blank notes are stored as none.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn record_completion(
        &self,
        user_id: &str,
        payload: &CompletionPayload,
        mood: Option<Mood>,
        notes: Option<&str>,
    ) -> Result<SessionRecord, PlungeError> {
        let mut session = SessionRecord::from_completion(user_id, payload, Utc::now());
        session.mood = mood;
        session.notes = notes
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(str::to_string);
        self.record(&mut session)?;
        Ok(session)
    }

    /// Get a record by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get(&self, id: i64) -> Result<Option<SessionRecord>, PlungeError> {
        let conn = self.db.connection();

        conn.query_row(&format!("{SELECT_COLUMNS} WHERE id = ?1"), [id], row_to_record)
            .optional()
            .map_err(|e| PlungeError::Database(format!("Failed to query session: {e}")))
    }

    /// List a user's sessions, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_for_user(
        &self,
        user_id: &str,
        kind: Option<SessionKind>,
        limit: Option<usize>,
    ) -> Result<Vec<SessionRecord>, PlungeError> {
        let conn = self.db.connection();
        let limit = limit.map_or(-1, |l| i64::try_from(l).unwrap_or(i64::MAX));

        let mut stmt = conn
            .prepare(&format!(
                "{SELECT_COLUMNS}
                 WHERE user_id = ?1 AND (?2 IS NULL OR kind = ?2)
                 ORDER BY completed_at DESC, id DESC
                 LIMIT ?3"
            ))
            .map_err(|e| PlungeError::Database(format!("Failed to prepare query: {e}")))?;

        let rows = stmt
            .query_map(params![user_id, kind.map(|k| k.as_str()), limit], row_to_record)
            .map_err(|e| PlungeError::Database(format!("Failed to query sessions: {e}")))?;

        rows.collect::<Result<Vec<_>, _>>()
            .map_err(|e| PlungeError::Database(e.to_string()))
    }

    /// Apply a patch. Returns false if no record has that ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub fn update(&self, id: i64, patch: &SessionPatch) -> Result<bool, PlungeError> {
        let conn = self.db.connection();

        let rows = conn
            .execute(
                r"UPDATE sessions SET
                  duration_secs = COALESCE(?1, duration_secs),
                  mood = COALESCE(?2, mood),
                  notes = COALESCE(?3, notes),
                  temperature = COALESCE(?4, temperature),
                  intensity = COALESCE(?5, intensity)
                  WHERE id = ?6",
                params![
                    patch.duration_secs,
                    patch.mood.map(|m| m.as_str()),
                    patch.notes,
                    patch.temperature,
                    patch.intensity.map(|i| i.as_str()),
                    id,
                ],
            )
            .map_err(|e| PlungeError::Database(format!("Failed to update session: {e}")))?;

        debug!(id, rows, "session updated");
        Ok(rows > 0)
    }

    /// Delete a record. Returns false if no record has that ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn delete(&self, id: i64) -> Result<bool, PlungeError> {
        let conn = self.db.connection();

        let rows = conn
            .execute("DELETE FROM sessions WHERE id = ?1", [id])
            .map_err(|e| PlungeError::Database(format!("Failed to delete session: {e}")))?;

        Ok(rows > 0)
    }
}

fn conversion_error(index: usize, message: String) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(index, Type::Text, Box::new(PlungeError::Parse(message)))
}

/// Convert a database row to a `SessionRecord`.
fn row_to_record(row: &Row<'_>) -> Result<SessionRecord, rusqlite::Error> {
    let completed_at_str: String = row.get(3)?;
    let kind_str: String = row.get(4)?;
    let mood_str: Option<String> = row.get(7)?;
    let intensity_str: Option<String> = row.get(9)?;

    let completed_at = DateTime::parse_from_rfc3339(&completed_at_str)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| conversion_error(3, format!("bad timestamp '{completed_at_str}': {e}")))?;

    let kind = SessionKind::parse(&kind_str)
        .ok_or_else(|| conversion_error(4, format!("unknown session kind '{kind_str}'")))?;

    let mood = mood_str
        .map(|s| Mood::parse(&s).ok_or_else(|| conversion_error(7, format!("unknown mood '{s}'"))))
        .transpose()?;

    let intensity = intensity_str
        .map(|s| {
            Intensity::parse(&s).ok_or_else(|| conversion_error(9, format!("unknown intensity '{s}'")))
        })
        .transpose()?;

    Ok(SessionRecord {
        id: Some(row.get(0)?),
        user_id: row.get(1)?,
        duration_secs: row.get(2)?,
        completed_at,
        kind,
        technique: row.get(5)?,
        temperature: row.get(6)?,
        mood,
        notes: row.get(8)?,
        intensity,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn create_test_storage() -> SessionStorage {
        let db = Database::open_in_memory().unwrap();
        SessionStorage::with_database(db)
    }

    fn record(kind: SessionKind, secs: u32, minutes_ago: i64) -> SessionRecord {
        let payload = CompletionPayload {
            duration_secs: secs,
            kind,
            technique: None,
            temperature: None,
            intensity: None,
        };
        SessionRecord::from_completion("local", &payload, Utc::now() - Duration::minutes(minutes_ago))
    }

    #[test]
    fn test_record_and_get() {
        let storage = create_test_storage();

        let payload = CompletionPayload {
            duration_secs: 480,
            kind: SessionKind::ContrastTherapy,
            technique: Some("Basic 3-1".to_string()),
            temperature: Some(27.5),
            intensity: Some(Intensity::High),
        };
        let mut session = SessionRecord::from_completion("local", &payload, Utc::now());

        let id = storage.record(&mut session).unwrap();
        assert_eq!(session.id, Some(id));

        let loaded = storage.get(id).unwrap().unwrap();
        assert_eq!(loaded.kind, SessionKind::ContrastTherapy);
        assert_eq!(loaded.technique.as_deref(), Some("Basic 3-1"));
        assert_eq!(loaded.temperature, Some(27.5));
        assert_eq!(loaded.intensity, Some(Intensity::High));
        assert_eq!(loaded.duration_secs, 480);
    }

    #[test]
    fn test_record_completion() {
        let storage = create_test_storage();
        let payload = CompletionPayload {
            duration_secs: 160,
            kind: SessionKind::Breathing,
            technique: Some("Box Breathing".to_string()),
            temperature: None,
            intensity: None,
        };

        let saved = storage
            .record_completion("local", &payload, Some(Mood::Calm), Some("  slow exhale "))
            .unwrap();
        let loaded = storage.get(saved.id.unwrap()).unwrap().unwrap();
        assert_eq!(loaded.technique.as_deref(), Some("Box Breathing"));
        assert_eq!(loaded.user_id, "local");
        assert_eq!(loaded.mood, Some(Mood::Calm));
        assert_eq!(loaded.notes.as_deref(), Some("slow exhale"));

        let blank = storage
            .record_completion("local", &payload, None, Some("   "))
            .unwrap();
        assert_eq!(blank.notes, None);
    }

    #[test]
    fn test_get_missing() {
        let storage = create_test_storage();
        assert!(storage.get(42).unwrap().is_none());
    }

    #[test]
    fn test_list_newest_first_and_filtered() {
        let storage = create_test_storage();
        storage.record(&mut record(SessionKind::IceBath, 120, 30)).unwrap();
        storage.record(&mut record(SessionKind::Sauna, 900, 20)).unwrap();
        storage.record(&mut record(SessionKind::IceBath, 180, 10)).unwrap();

        let mut other = record(SessionKind::IceBath, 60, 5);
        other.user_id = "someone-else".to_string();
        storage.record(&mut other).unwrap();

        let all = storage.list_for_user("local", None, None).unwrap();
        assert_eq!(all.len(), 3);
        assert_eq!(all[0].duration_secs, 180);
        assert_eq!(all[2].duration_secs, 120);

        let ice = storage
            .list_for_user("local", Some(SessionKind::IceBath), None)
            .unwrap();
        assert_eq!(ice.len(), 2);

        let limited = storage.list_for_user("local", None, Some(1)).unwrap();
        assert_eq!(limited.len(), 1);
    }

    #[test]
    fn test_update_only_touches_given_fields() {
        let storage = create_test_storage();
        let mut session = record(SessionKind::ColdPlunge, 90, 0);
        session.notes = Some("windy".to_string());
        let id = storage.record(&mut session).unwrap();

        let patch = SessionPatch {
            mood: Some(Mood::Energized),
            intensity: Some(Intensity::Low),
            ..SessionPatch::default()
        };
        assert!(storage.update(id, &patch).unwrap());

        let loaded = storage.get(id).unwrap().unwrap();
        assert_eq!(loaded.mood, Some(Mood::Energized));
        assert_eq!(loaded.intensity, Some(Intensity::Low));
        assert_eq!(loaded.notes.as_deref(), Some("windy"));
        assert_eq!(loaded.duration_secs, 90);

        assert!(!storage.update(999, &patch).unwrap());
    }

    #[test]
    fn test_delete() {
        let storage = create_test_storage();
        let id = storage.record(&mut record(SessionKind::Jacuzzi, 1200, 0)).unwrap();

        assert!(storage.delete(id).unwrap());
        assert!(storage.get(id).unwrap().is_none());
        assert!(!storage.delete(id).unwrap());
    }
}
