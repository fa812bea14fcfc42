//! Configuration management for plunge.
//!
//! This module handles loading and saving configuration from `~/.plunge/`
//! (or `$PLUNGE_HOME`).

mod paths;
mod settings;

pub use paths::{Paths, HOME_ENV};
pub use settings::{ColorSetting, Config, GeneralConfig, JournalConfig, TimerSettings};
