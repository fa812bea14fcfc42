//! Profile storage.
//!
//! Users, onboarding preferences and app settings, one row each per user.

use chrono::{DateTime, Utc};
use rusqlite::types::Type;
use rusqlite::{params, OptionalExtension, Row};
use tracing::debug;

use super::types::{AppSettings, Experience, Interest, Language, Preferences, Theme, User};
use crate::error::PlungeError;
use crate::storage::Database;

/// Storage for user profiles.
pub struct ProfileStorage {
    db: Database,
}

impl ProfileStorage {
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

    /// Return the user, creating it if it does not exist yet.
    ///
    /// An existing user is returned unchanged.
    ///
    /// # Errors
    ///
    /// Returns an error if the query or insert fails.
    pub fn get_or_create_user(
        &self,
        user_id: &str,
        name: &str,
        email: &str,
        picture: &str,
    ) -> Result<User, PlungeError> {
        if let Some(existing) = self.get_user(user_id)? {
            return Ok(existing);
        }

        let user = User {
            user_id: user_id.to_string(),
            name: name.to_string(),
            email: email.to_string(),
            picture: picture.to_string(),
            signed_in_at: Utc::now(),
        };

        self.db
            .connection()
            .execute(
                "INSERT INTO users (user_id, name, email, picture, signed_in_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    user.user_id,
                    user.name,
                    user.email,
                    user.picture,
                    user.signed_in_at.to_rfc3339()
                ],
            )
            .map_err(|e| PlungeError::Database(format!("Failed to create user: {e}")))?;

        debug!(user_id, "user created");
        Ok(user)
    }

    /// Get a user by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_user(&self, user_id: &str) -> Result<Option<User>, PlungeError> {
        self.db
            .connection()
            .query_row(
                "SELECT user_id, name, email, picture, signed_in_at FROM users WHERE user_id = ?1",
                [user_id],
                row_to_user,
            )
            .optional()
            .map_err(|e| PlungeError::Database(format!("Failed to query user: {e}")))
    }

    /// Insert or replace a user's onboarding preferences.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub fn save_preferences(&self, prefs: &Preferences) -> Result<(), PlungeError> {
        let goals = serde_json::to_string(&prefs.goals)?;
        let interests = serde_json::to_string(&prefs.interests)?;

        self.db
            .connection()
            .execute(
                r"INSERT INTO user_preferences
                  (user_id, name, experience, goals, preferred_duration_secs, interests, onboarding_completed)
                  VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
                  ON CONFLICT(user_id) DO UPDATE SET
                    name = excluded.name,
                    experience = excluded.experience,
                    goals = excluded.goals,
                    preferred_duration_secs = excluded.preferred_duration_secs,
                    interests = excluded.interests,
                    onboarding_completed = excluded.onboarding_completed",
                params![
                    prefs.user_id,
                    prefs.name,
                    prefs.experience.as_str(),
                    goals,
                    prefs.preferred_duration_secs,
                    interests,
                    prefs.onboarding_completed,
                ],
            )
            .map_err(|e| PlungeError::Database(format!("Failed to save preferences: {e}")))?;

        debug!(user_id = %prefs.user_id, "preferences saved");
        Ok(())
    }

    /// Get a user's onboarding preferences.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_preferences(&self, user_id: &str) -> Result<Option<Preferences>, PlungeError> {
        self.db
            .connection()
            .query_row(
                r"SELECT user_id, name, experience, goals, preferred_duration_secs, interests,
                         onboarding_completed
                  FROM user_preferences WHERE user_id = ?1",
                [user_id],
                row_to_preferences,
            )
            .optional()
            .map_err(|e| PlungeError::Database(format!("Failed to query preferences: {e}")))
    }

    /// Insert or replace a user's app settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub fn save_settings(&self, settings: &AppSettings) -> Result<(), PlungeError> {
        self.db
            .connection()
            .execute(
                r"INSERT INTO app_settings (user_id, language, theme)
                  VALUES (?1, ?2, ?3)
                  ON CONFLICT(user_id) DO UPDATE SET
                    language = excluded.language,
                    theme = excluded.theme",
                params![
                    settings.user_id,
                    settings.language.as_str(),
                    settings.theme.map(|t| t.as_str()),
                ],
            )
            .map_err(|e| PlungeError::Database(format!("Failed to save settings: {e}")))?;

        Ok(())
    }

    /// Get a user's app settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_settings(&self, user_id: &str) -> Result<Option<AppSettings>, PlungeError> {
        self.db
            .connection()
            .query_row(
                "SELECT user_id, language, theme FROM app_settings WHERE user_id = ?1",
                [user_id],
                row_to_settings,
            )
            .optional()
            .map_err(|e| PlungeError::Database(format!("Failed to query settings: {e}")))
    }
}

fn conversion_error(index: usize, message: String) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(index, Type::Text, Box::new(PlungeError::Parse(message)))
}

fn row_to_user(row: &Row<'_>) -> Result<User, rusqlite::Error> {
    let signed_in_at: String = row.get(4)?;
    let signed_in_at = DateTime::parse_from_rfc3339(&signed_in_at)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| conversion_error(4, format!("bad timestamp '{signed_in_at}': {e}")))?;

    Ok(User {
        user_id: row.get(0)?,
        name: row.get(1)?,
        email: row.get(2)?,
        picture: row.get(3)?,
        signed_in_at,
    })
}

fn row_to_preferences(row: &Row<'_>) -> Result<Preferences, rusqlite::Error> {
    let experience: String = row.get(2)?;
    let goals: String = row.get(3)?;
    let interests: String = row.get(5)?;

    let experience = Experience::parse(&experience)
        .ok_or_else(|| conversion_error(2, format!("unknown experience '{experience}'")))?;
    let goals: Vec<String> = serde_json::from_str(&goals)
        .map_err(|e| conversion_error(3, format!("bad goals list: {e}")))?;
    let interests: Vec<Interest> = serde_json::from_str(&interests)
        .map_err(|e| conversion_error(5, format!("bad interests list: {e}")))?;

    Ok(Preferences {
        user_id: row.get(0)?,
        name: row.get(1)?,
        experience,
        goals,
        preferred_duration_secs: row.get(4)?,
        interests,
        onboarding_completed: row.get(6)?,
    })
}

fn row_to_settings(row: &Row<'_>) -> Result<AppSettings, rusqlite::Error> {
    let language: String = row.get(1)?;
    let theme: Option<String> = row.get(2)?;

    let language = Language::parse(&language)
        .ok_or_else(|| conversion_error(1, format!("unknown language '{language}'")))?;
    let theme = theme
        .map(|t| Theme::parse(&t).ok_or_else(|| conversion_error(2, format!("unknown theme '{t}'"))))
        .transpose()?;

    Ok(AppSettings {
        user_id: row.get(0)?,
        language,
        theme,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_storage() -> ProfileStorage {
        ProfileStorage::with_database(Database::open_in_memory().unwrap())
    }

    fn prefs(name: &str, completed: bool) -> Preferences {
        Preferences {
            user_id: "local".to_string(),
            name: name.to_string(),
            experience: Experience::Intermediate,
            goals: vec!["recovery".to_string(), "focus".to_string()],
            preferred_duration_secs: 180,
            interests: vec![Interest::ColdTherapy, Interest::Breathing],
            onboarding_completed: completed,
        }
    }

    #[test]
    fn test_get_or_create_user_keeps_existing() {
        let storage = create_test_storage();
        assert!(storage.get_user("local").unwrap().is_none());

        let created = storage
            .get_or_create_user("local", "Noa", "noa@example.com", "")
            .unwrap();
        let again = storage
            .get_or_create_user("local", "Someone Else", "", "")
            .unwrap();

        assert_eq!(again.name, "Noa");
        assert_eq!(again.signed_in_at.timestamp(), created.signed_in_at.timestamp());
        assert_eq!(storage.get_user("local").unwrap().unwrap().email, "noa@example.com");
    }

    #[test]
    fn test_preferences_upsert() {
        let storage = create_test_storage();
        assert!(storage.get_preferences("local").unwrap().is_none());

        storage.save_preferences(&prefs("Noa", false)).unwrap();
        storage.save_preferences(&prefs("Noa B", true)).unwrap();

        let loaded = storage.get_preferences("local").unwrap().unwrap();
        assert_eq!(loaded.name, "Noa B");
        assert!(loaded.onboarding_completed);
        assert_eq!(loaded.goals, vec!["recovery", "focus"]);
        assert_eq!(loaded.interests, vec![Interest::ColdTherapy, Interest::Breathing]);
        assert_eq!(loaded.experience, Experience::Intermediate);
    }

    #[test]
    fn test_settings_upsert() {
        let storage = create_test_storage();
        assert!(storage.get_settings("local").unwrap().is_none());

        let mut settings = AppSettings::defaults_for("local");
        storage.save_settings(&settings).unwrap();

        settings.language = Language::He;
        settings.theme = Some(Theme::Dark);
        storage.save_settings(&settings).unwrap();

        let loaded = storage.get_settings("local").unwrap().unwrap();
        assert_eq!(loaded, settings);
    }
}
