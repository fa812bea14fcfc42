//! Command implementations for plunge.
//!
//! Each command returns the text to print, already formatted for the
//! selected output format.

mod catalog;
mod completions;
mod journal;
mod profile;
mod progress;
mod session;
mod voice;

pub use catalog::catalog;
pub use completions::completions;
pub use journal::{delete, edit, history};
pub use profile::{onboard, profile, settings};
pub use progress::{achievements, stats};
pub use session::{breathe, contrast, run_headless, thermal, timer};
pub use voice::voice;
