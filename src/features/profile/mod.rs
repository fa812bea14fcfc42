//! User profile, onboarding preferences and app settings.

pub mod storage;
pub mod types;

pub use storage::ProfileStorage;
pub use types::{AppSettings, Experience, Interest, Language, Preferences, Theme, User};
