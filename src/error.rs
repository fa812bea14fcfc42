//! Error types for plunge.

use thiserror::Error;

/// Errors that can occur while running plunge.
#[derive(Debug, Error)]
pub enum PlungeError {
    /// Configuration could not be loaded, saved or resolved.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A database operation failed.
    #[error("Database error: {0}")]
    Database(String),

    /// A requested item does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// User-supplied input was rejected.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A timer configuration failed validation.
    #[error("Invalid timer configuration: {0}")]
    InvalidConfig(String),

    /// The timer refused a change because a session is in progress.
    #[error("Timer is busy: {0}")]
    TimerBusy(String),

    /// Serialization or parsing failed.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Filesystem or terminal I/O failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The terminal UI could not be driven.
    #[error("Terminal error: {0}")]
    Terminal(String),
}

impl From<serde_json::Error> for PlungeError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}

impl From<serde_yaml::Error> for PlungeError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Parse(err.to_string())
    }
}

impl From<rusqlite::Error> for PlungeError {
    fn from(err: rusqlite::Error) -> Self {
        Self::Database(err.to_string())
    }
}

impl PlungeError {
    /// Process exit code for this error.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::InvalidInput(_) | Self::InvalidConfig(_) | Self::Parse(_) => 2,
            Self::NotFound(_) => 3,
            _ => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = PlungeError::NotFound("technique 'box'".to_string());
        assert_eq!(err.to_string(), "Not found: technique 'box'");
    }

    #[test]
    fn test_from_json_error() {
        let json_err = serde_json::from_str::<u32>("nope").unwrap_err();
        let err: PlungeError = json_err.into();
        assert!(matches!(err, PlungeError::Parse(_)));
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(PlungeError::InvalidInput(String::new()).exit_code(), 2);
        assert_eq!(PlungeError::NotFound(String::new()).exit_code(), 3);
        assert_eq!(PlungeError::Database(String::new()).exit_code(), 1);
    }
}
