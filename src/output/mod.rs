//! Output formatting for plunge.
//!
//! This module provides formatters for journal records, the catalog and
//! progress in pretty or JSON form.

mod json;
mod pretty;

use crate::cli::args::OutputFormat;
use crate::error::PlungeError;
use crate::features::journal::SessionRecord;
use crate::features::progress::{Achievement, ProgressReport};

pub use json::*;
pub use pretty::*;

/// Format journal records based on output format
///
/// # Errors
///
/// Returns `PlungeError::Parse` if JSON serialization fails.
pub fn format_sessions(
    sessions: &[SessionRecord],
    title: &str,
    format: OutputFormat,
) -> Result<String, PlungeError> {
    match format {
        OutputFormat::Pretty => Ok(format_sessions_pretty(sessions, title)),
        OutputFormat::Json => format_sessions_json(sessions, title),
    }
}

/// Format a single journal record based on output format
///
/// # Errors
///
/// Returns `PlungeError::Parse` if JSON serialization fails.
pub fn format_session(session: &SessionRecord, format: OutputFormat) -> Result<String, PlungeError> {
    match format {
        OutputFormat::Pretty => Ok(format_session_pretty(session)),
        OutputFormat::Json => to_json(session),
    }
}

/// Format the stats overview based on output format
///
/// # Errors
///
/// Returns `PlungeError::Parse` if JSON serialization fails.
pub fn format_progress(report: &ProgressReport, format: OutputFormat) -> Result<String, PlungeError> {
    match format {
        OutputFormat::Pretty => Ok(format_progress_pretty(report)),
        OutputFormat::Json => to_json(report),
    }
}

/// Format achievements based on output format
///
/// # Errors
///
/// Returns `PlungeError::Parse` if JSON serialization fails.
pub fn format_achievements(
    achievements: &[Achievement],
    format: OutputFormat,
) -> Result<String, PlungeError> {
    match format {
        OutputFormat::Pretty => Ok(format_achievements_pretty(achievements)),
        OutputFormat::Json => to_json(&achievements),
    }
}
