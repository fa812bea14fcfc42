//! plunge - wellness session timer
//!
//! Times ice baths, sauna and jacuzzi sessions, guided breathing and
//! hot/cold contrast protocols, and keeps a local journal of completed
//! sessions with streaks and achievements.

#![deny(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod features;
pub mod output;
pub mod storage;
pub mod tui;

pub use cli::args::{Cli, Commands, OutputFormat};
pub use error::PlungeError;
pub use features::timer::{SessionTimer, TimerConfiguration, TimerOutcome};
