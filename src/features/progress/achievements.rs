//! Achievement badges.
//!
//! Each badge unlocks when one metric (session count, longest session or
//! current streak) reaches its threshold.

use serde::{Deserialize, Serialize};

use super::streak::{StreakInfo, Totals};

/// Achievement grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Milestone,
    Frequency,
    Duration,
    Consistency,
}

/// How hard an achievement is to get.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rarity {
    Common,
    Rare,
    Epic,
    Legendary,
}

impl Rarity {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Common => "common",
            Self::Rare => "rare",
            Self::Epic => "epic",
            Self::Legendary => "legendary",
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Metric {
    Sessions,
    LongestSession,
    CurrentStreak,
}

struct Definition {
    id: &'static str,
    title: &'static str,
    description: &'static str,
    category: Category,
    rarity: Rarity,
    metric: Metric,
    threshold: u32,
}

const DEFINITIONS: &[Definition] = &[
    Definition {
        id: "first-plunge",
        title: "First Plunge",
        description: "Welcome to the cold! Your journey begins.",
        category: Category::Milestone,
        rarity: Rarity::Common,
        metric: Metric::Sessions,
        threshold: 1,
    },
    Definition {
        id: "ice-initiate",
        title: "Ice Initiate",
        description: "Complete 5 sessions and embrace the cold",
        category: Category::Frequency,
        rarity: Rarity::Common,
        metric: Metric::Sessions,
        threshold: 5,
    },
    Definition {
        id: "ice-warrior",
        title: "Ice Warrior",
        description: "Show dedication with 10 cold sessions",
        category: Category::Frequency,
        rarity: Rarity::Rare,
        metric: Metric::Sessions,
        threshold: 10,
    },
    Definition {
        id: "polar-champion",
        title: "Polar Champion",
        description: "Master the cold with 25 sessions",
        category: Category::Frequency,
        rarity: Rarity::Epic,
        metric: Metric::Sessions,
        threshold: 25,
    },
    Definition {
        id: "arctic-legend",
        title: "Arctic Legend",
        description: "Legendary status with 50 sessions",
        category: Category::Frequency,
        rarity: Rarity::Legendary,
        metric: Metric::Sessions,
        threshold: 50,
    },
    Definition {
        id: "one-minute-milestone",
        title: "One Minute Milestone",
        description: "Endure 60 seconds of pure cold",
        category: Category::Duration,
        rarity: Rarity::Common,
        metric: Metric::LongestSession,
        threshold: 60,
    },
    Definition {
        id: "two-minute-mark",
        title: "Two Minute Warrior",
        description: "Master 2 minutes of ice cold endurance",
        category: Category::Duration,
        rarity: Rarity::Rare,
        metric: Metric::LongestSession,
        threshold: 120,
    },
    Definition {
        id: "five-minute-hero",
        title: "Five Minute Hero",
        description: "Epic endurance - 5 minutes of cold mastery",
        category: Category::Duration,
        rarity: Rarity::Epic,
        metric: Metric::LongestSession,
        threshold: 300,
    },
    Definition {
        id: "iron-mind",
        title: "Iron Mind",
        description: "Legendary - survive 10 minutes in the ice",
        category: Category::Duration,
        rarity: Rarity::Legendary,
        metric: Metric::LongestSession,
        threshold: 600,
    },
    Definition {
        id: "weekly-warrior",
        title: "Weekly Warrior",
        description: "Maintain consistent practice for 7 days",
        category: Category::Consistency,
        rarity: Rarity::Rare,
        metric: Metric::CurrentStreak,
        threshold: 7,
    },
    Definition {
        id: "consistency-champion",
        title: "Consistency Champion",
        description: "Epic dedication - 21 day streak",
        category: Category::Consistency,
        rarity: Rarity::Epic,
        metric: Metric::CurrentStreak,
        threshold: 21,
    },
    Definition {
        id: "ice-sage",
        title: "Ice Sage",
        description: "Legendary consistency - 30 day streak",
        category: Category::Consistency,
        rarity: Rarity::Legendary,
        metric: Metric::CurrentStreak,
        threshold: 30,
    },
];

/// An evaluated achievement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Achievement {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: Category,
    pub rarity: Rarity,
    pub unlocked: bool,
    /// Progress towards the threshold, capped at `max_progress`
    pub progress: u32,
    pub max_progress: u32,
}

/// Evaluate every achievement against the given totals and streak.
#[must_use]
pub fn evaluate(totals: &Totals, streak: &StreakInfo) -> Vec<Achievement> {
    DEFINITIONS
        .iter()
        .map(|def| {
            let value = match def.metric {
                Metric::Sessions => totals.sessions,
                Metric::LongestSession => totals.longest_session_secs,
                Metric::CurrentStreak => streak.current,
            };
            Achievement {
                id: def.id.to_string(),
                title: def.title.to_string(),
                description: def.description.to_string(),
                category: def.category,
                rarity: def.rarity,
                unlocked: value >= def.threshold,
                progress: value.min(def.threshold),
                max_progress: def.threshold,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unlocked_ids(totals: &Totals, streak: &StreakInfo) -> Vec<String> {
        evaluate(totals, streak)
            .into_iter()
            .filter(|a| a.unlocked)
            .map(|a| a.id)
            .collect()
    }

    #[test]
    fn test_nothing_unlocked_without_sessions() {
        let achievements = evaluate(&Totals::default(), &StreakInfo::default());
        assert_eq!(achievements.len(), 12);
        assert!(achievements.iter().all(|a| !a.unlocked));
    }

    #[test]
    fn test_thresholds_are_inclusive() {
        let totals = Totals {
            sessions: 5,
            total_secs: 600,
            longest_session_secs: 120,
        };
        let streak = StreakInfo {
            current: 7,
            longest: 7,
            last_session: None,
        };

        let ids = unlocked_ids(&totals, &streak);
        assert_eq!(
            ids,
            vec![
                "first-plunge",
                "ice-initiate",
                "one-minute-milestone",
                "two-minute-mark",
                "weekly-warrior"
            ]
        );
    }

    #[test]
    fn test_progress_is_capped() {
        let totals = Totals {
            sessions: 12,
            total_secs: 0,
            longest_session_secs: 0,
        };
        let achievements = evaluate(&totals, &StreakInfo::default());
        let initiate = achievements.iter().find(|a| a.id == "ice-initiate").unwrap();
        assert_eq!(initiate.progress, 5);
        let champion = achievements.iter().find(|a| a.id == "polar-champion").unwrap();
        assert_eq!(champion.progress, 12);
        assert_eq!(champion.max_progress, 25);
    }

    #[test]
    fn test_longest_streak_does_not_count() {
        let streak = StreakInfo {
            current: 0,
            longest: 40,
            last_session: None,
        };
        assert!(unlocked_ids(&Totals::default(), &streak).is_empty());
    }
}
