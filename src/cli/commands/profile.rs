//! Profile commands: profile, onboarding and settings.

use colored::Colorize;

use crate::cli::args::{OnboardArgs, OutputFormat, ProfileCommands, SettingsCommands};
use crate::config::Config;
use crate::error::PlungeError;
use crate::features::profile::{AppSettings, Preferences, ProfileStorage};
use crate::output::{format_profile_json, format_profile_pretty, format_settings_pretty, to_json};

fn current_settings(storage: &ProfileStorage, user_id: &str) -> Result<AppSettings, PlungeError> {
    Ok(storage
        .get_settings(user_id)?
        .unwrap_or_else(|| AppSettings::defaults_for(user_id)))
}

fn show_profile(
    config: &Config,
    storage: &ProfileStorage,
    format: OutputFormat,
) -> Result<String, PlungeError> {
    let user_id = &config.general.user_id;
    let user = storage.get_user(user_id)?;
    let preferences = storage.get_preferences(user_id)?;
    let settings = current_settings(storage, user_id)?;

    match format {
        OutputFormat::Json => format_profile_json(user.as_ref(), preferences.as_ref(), &settings),
        OutputFormat::Pretty => Ok(format_profile_pretty(
            user.as_ref(),
            preferences.as_ref(),
            &settings,
        )),
    }
}

/// Execute profile subcommands.
///
/// # Errors
///
/// Returns an error if a profile query or insert fails.
pub fn profile(
    config: &Config,
    storage: &ProfileStorage,
    cmd: Option<ProfileCommands>,
    format: OutputFormat,
) -> Result<String, PlungeError> {
    match cmd {
        None | Some(ProfileCommands::Show) => show_profile(config, storage, format),
        Some(ProfileCommands::Init { name, email }) => {
            if name.trim().is_empty() {
                return Err(PlungeError::InvalidInput("name must not be empty".to_string()));
            }
            storage.get_or_create_user(&config.general.user_id, name.trim(), &email, "")?;
            show_profile(config, storage, format)
        }
    }
}

/// Execute onboard command.
///
/// Saves the answers, marks onboarding complete and creates the user if
/// needed.
///
/// # Errors
///
/// Returns `InvalidInput` for an empty name or zero duration, or an error if
/// saving fails.
pub fn onboard(
    config: &Config,
    storage: &ProfileStorage,
    args: OnboardArgs,
    format: OutputFormat,
) -> Result<String, PlungeError> {
    let name = args.name.trim();
    if name.is_empty() {
        return Err(PlungeError::InvalidInput("name must not be empty".to_string()));
    }
    if args.duration == 0 {
        return Err(PlungeError::InvalidInput("duration must be positive".to_string()));
    }

    let user_id = &config.general.user_id;
    storage.get_or_create_user(user_id, name, "", "")?;

    let mut interests = args.interests;
    interests.dedup();

    let preferences = Preferences {
        user_id: user_id.clone(),
        name: name.to_string(),
        experience: args.experience,
        goals: args.goals,
        preferred_duration_secs: args.duration,
        interests,
        onboarding_completed: true,
    };
    storage.save_preferences(&preferences)?;

    match format {
        OutputFormat::Json => to_json(&preferences),
        OutputFormat::Pretty => Ok(format!(
            "{} Welcome, {}! Preferences saved ({} experience)",
            "✓".green(),
            name.bold(),
            preferences.experience
        )),
    }
}

/// Execute settings subcommands.
///
/// # Errors
///
/// Returns `InvalidInput` when `set` is given nothing to change, or an error
/// if the settings cannot be read or saved.
pub fn settings(
    config: &Config,
    storage: &ProfileStorage,
    cmd: Option<SettingsCommands>,
    format: OutputFormat,
) -> Result<String, PlungeError> {
    let user_id = &config.general.user_id;
    let mut settings = current_settings(storage, user_id)?;

    if let Some(SettingsCommands::Set { language, theme }) = cmd {
        if language.is_none() && theme.is_none() {
            return Err(PlungeError::InvalidInput(
                "nothing to change (use --language or --theme)".to_string(),
            ));
        }
        if let Some(language) = language {
            settings.language = language;
        }
        if theme.is_some() {
            settings.theme = theme;
        }
        storage.save_settings(&settings)?;
    }

    match format {
        OutputFormat::Json => to_json(&settings),
        OutputFormat::Pretty => Ok(format!(
            "{}\n{}",
            "Settings".bold(),
            format_settings_pretty(&settings)
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::profile::{Experience, Interest, Language, Theme};
    use crate::storage::Database;

    fn storage() -> ProfileStorage {
        ProfileStorage::with_database(Database::open_in_memory().unwrap())
    }

    fn onboard_args(name: &str) -> OnboardArgs {
        OnboardArgs {
            name: name.to_string(),
            experience: Experience::Intermediate,
            goals: vec!["recovery".to_string()],
            duration: 180,
            interests: vec![Interest::ColdTherapy, Interest::ColdTherapy, Interest::Breathing],
        }
    }

    #[test]
    fn test_profile_without_user() {
        colored::control::set_override(false);
        let output = profile(&Config::default(), &storage(), None, OutputFormat::Pretty).unwrap();
        assert!(output.contains("No profile yet"));
        assert!(output.contains("Language: en"));
    }

    #[test]
    fn test_profile_init_then_show_json() {
        let storage = storage();
        let cmd = ProfileCommands::Init {
            name: "Noa".to_string(),
            email: "noa@example.com".to_string(),
        };
        profile(&Config::default(), &storage, Some(cmd), OutputFormat::Pretty).unwrap();

        let output = profile(&Config::default(), &storage, None, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["user"]["name"], "Noa");
        assert!(value["preferences"].is_null());
        assert_eq!(value["settings"]["language"], "en");
    }

    #[test]
    fn test_onboard_saves_preferences() {
        let storage = storage();
        let args = onboard_args(" Noa ");
        onboard(&Config::default(), &storage, args, OutputFormat::Pretty).unwrap();

        let prefs = storage.get_preferences("local").unwrap().unwrap();
        assert!(prefs.onboarding_completed);
        assert_eq!(prefs.name, "Noa");
        assert_eq!(prefs.interests, vec![Interest::ColdTherapy, Interest::Breathing]);
        assert_eq!(storage.get_user("local").unwrap().unwrap().name, "Noa");
    }

    #[test]
    fn test_onboard_rejects_blank_name() {
        let err = onboard(&Config::default(), &storage(), onboard_args("  "), OutputFormat::Json)
            .unwrap_err();
        assert!(matches!(err, PlungeError::InvalidInput(_)));
    }

    #[test]
    fn test_settings_set_and_show() {
        let storage = storage();
        let cmd = SettingsCommands::Set {
            language: Some(Language::He),
            theme: Some(Theme::Dark),
        };
        settings(&Config::default(), &storage, Some(cmd), OutputFormat::Json).unwrap();

        let saved = storage.get_settings("local").unwrap().unwrap();
        assert_eq!(saved.language, Language::He);
        assert_eq!(saved.theme, Some(Theme::Dark));
    }

    #[test]
    fn test_settings_set_requires_a_change() {
        let cmd = SettingsCommands::Set {
            language: None,
            theme: None,
        };
        let err = settings(&Config::default(), &storage(), Some(cmd), OutputFormat::Json)
            .unwrap_err();
        assert!(matches!(err, PlungeError::InvalidInput(_)));
    }
}
