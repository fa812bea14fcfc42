//! Core types shared across plunge features.

mod duration;
mod kinds;

pub use duration::{format_duration, format_mmss, parse_duration, render_progress_bar};
pub use kinds::{Intensity, Mood, SessionKind};
