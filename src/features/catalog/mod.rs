//! Built-in session catalog.
//!
//! Breathing techniques, contrast protocols and per-kind thermal presets.

pub mod breathing;
pub mod contrast;
pub mod thermal;

pub use breathing::{technique, techniques, BreathingTechnique};
pub use contrast::{protocol, protocols, ContrastProtocol, Difficulty, Step};
pub use thermal::{preset, presets, TemperatureRange, ThermalPreset};
