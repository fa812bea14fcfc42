//! Progress tracking: totals, streaks and achievements.

pub mod achievements;
pub mod streak;

use serde::{Deserialize, Serialize};

pub use achievements::{evaluate, Achievement, Category, Rarity};
pub use streak::{StreakInfo, Totals};

use crate::features::journal::SessionRecord;

/// Everything the stats screen shows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressReport {
    pub totals: Totals,
    pub streak: StreakInfo,
    pub achievements: Vec<Achievement>,
}

impl ProgressReport {
    /// Build a report from a user's full history.
    #[must_use]
    pub fn from_sessions(sessions: &[SessionRecord]) -> Self {
        let totals = Totals::calculate(sessions);
        let streak = StreakInfo::calculate(sessions);
        let achievements = evaluate(&totals, &streak);
        Self {
            totals,
            streak,
            achievements,
        }
    }

    /// Number of unlocked achievements.
    #[must_use]
    pub fn unlocked_count(&self) -> usize {
        self.achievements.iter().filter(|a| a.unlocked).count()
    }
}
