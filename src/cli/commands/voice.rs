//! Voice transcript command.

use colored::Colorize;
use serde_json::json;
use tracing::debug;

use crate::cli::args::OutputFormat;
use crate::config::Config;
use crate::error::PlungeError;
use crate::features::profile::{Language, ProfileStorage};
use crate::features::voice::parse_command;
use crate::output::to_json;

/// Execute voice command.
///
/// The language comes from `--language`, then the saved settings, then
/// English.
///
/// # Errors
///
/// Returns an error if the settings cannot be read or output formatting fails.
pub fn voice(
    config: &Config,
    storage: &ProfileStorage,
    transcript: &str,
    language: Option<Language>,
    format: OutputFormat,
) -> Result<String, PlungeError> {
    let language = match language {
        Some(language) => language,
        None => storage
            .get_settings(&config.general.user_id)?
            .map(|s| s.language)
            .unwrap_or_default(),
    };

    let command = parse_command(transcript, language);
    debug!(transcript, %language, ?command, "voice transcript parsed");

    match format {
        OutputFormat::Json => to_json(&json!({
            "transcript": transcript,
            "language": language,
            "command": command,
        })),
        OutputFormat::Pretty => Ok(match command {
            Some(command) => format!("{} {}", "→".green(), command.to_string().bold()),
            None => format!("{} No command recognised", "?".yellow()),
        }),
    }
}
