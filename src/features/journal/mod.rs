//! Session journal.
//!
//! Records completed sessions and lets them be listed, edited and deleted.

pub mod record;
pub mod storage;

pub use record::{SessionPatch, SessionRecord};
pub use storage::SessionStorage;
