//! Path resolution for plunge configuration and data files.
//!
//! All plunge data is stored in `~/.plunge/`, or in `$PLUNGE_HOME` when set:
//! - `config.yaml` - Main configuration file
//! - `plunge.db` - SQLite database for sessions, profile and settings

use std::path::PathBuf;

use crate::error::PlungeError;

/// Environment variable that overrides the data root.
pub const HOME_ENV: &str = "PLUNGE_HOME";

/// Paths to plunge configuration and data files.
#[derive(Debug, Clone)]
pub struct Paths {
    /// Root directory: `~/.plunge/`
    pub root: PathBuf,
    /// Config file: `~/.plunge/config.yaml`
    pub config_file: PathBuf,
    /// Database file: `~/.plunge/plunge.db`
    pub database: PathBuf,
}

impl Paths {
    /// Resolve paths from `$PLUNGE_HOME`, falling back to the home directory.
    ///
    /// # Errors
    ///
    /// Returns an error if neither variable is set.
    pub fn new() -> Result<Self, PlungeError> {
        if let Some(root) = std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
            return Ok(Self::with_root(PathBuf::from(root)));
        }

        let home = std::env::var("HOME").map_err(|_| {
            PlungeError::Config("Could not determine home directory".to_string())
        })?;

        Ok(Self::with_root(PathBuf::from(home).join(".plunge")))
    }

    /// Create paths with a custom root directory (useful for testing).
    #[must_use]
    pub fn with_root(root: PathBuf) -> Self {
        Self {
            config_file: root.join("config.yaml"),
            database: root.join("plunge.db"),
            root,
        }
    }

    /// Ensure the root directory exists.
    ///
    /// # Errors
    ///
    /// Returns an error if directory creation fails.
    pub fn ensure_dirs(&self) -> Result<(), PlungeError> {
        if !self.root.exists() {
            std::fs::create_dir_all(&self.root).map_err(|e| {
                PlungeError::Config(format!(
                    "Failed to create directory {}: {e}",
                    self.root.display()
                ))
            })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_paths_with_root() {
        let root = PathBuf::from("/tmp/test-plunge");
        let paths = Paths::with_root(root.clone());

        assert_eq!(paths.root, root);
        assert_eq!(paths.config_file, root.join("config.yaml"));
        assert_eq!(paths.database, root.join("plunge.db"));
    }

    #[test]
    fn test_ensure_dirs() {
        let temp_dir = TempDir::new().unwrap();
        let paths = Paths::with_root(temp_dir.path().join("nested").join("plunge"));

        paths.ensure_dirs().unwrap();
        paths.ensure_dirs().unwrap();

        assert!(paths.root.exists());
    }
}
