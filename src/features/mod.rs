//! Feature implementations for plunge.
//!
//! - Session timer engine
//! - Built-in catalog of breathing techniques, contrast protocols and thermal presets
//! - Session journal
//! - User profile and settings
//! - Progress: streaks and achievements
//! - Voice commands

pub mod catalog;
pub mod journal;
pub mod profile;
pub mod progress;
pub mod timer;
pub mod voice;
