//! Progress commands: stats and achievements.

use crate::cli::args::OutputFormat;
use crate::config::Config;
use crate::error::PlungeError;
use crate::features::journal::SessionStorage;
use crate::features::progress::ProgressReport;
use crate::output::{format_achievements, format_progress};

fn report(config: &Config, storage: &SessionStorage) -> Result<ProgressReport, PlungeError> {
    let sessions = storage.list_for_user(&config.general.user_id, None, None)?;
    Ok(ProgressReport::from_sessions(&sessions))
}

/// Execute stats command
///
/// # Errors
///
/// Returns an error if the journal query or output formatting fails.
pub fn stats(
    config: &Config,
    storage: &SessionStorage,
    format: OutputFormat,
) -> Result<String, PlungeError> {
    format_progress(&report(config, storage)?, format)
}

/// Execute achievements command
///
/// # Errors
///
/// Returns an error if the journal query or output formatting fails.
pub fn achievements(
    config: &Config,
    storage: &SessionStorage,
    format: OutputFormat,
) -> Result<String, PlungeError> {
    format_achievements(&report(config, storage)?.achievements, format)
}
