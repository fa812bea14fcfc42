//! Storage layer for plunge.
//!
//! `SQLite` persistence for recorded sessions, user profiles, onboarding
//! preferences and app settings.

mod database;
mod migrations;

pub use database::Database;
