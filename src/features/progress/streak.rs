//! Streaks and session totals.

use chrono::{Duration, Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::features::journal::SessionRecord;

/// Streak information.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakInfo {
    /// Consecutive days with at least one session, ending today or yesterday
    pub current: u32,
    /// Longest run of consecutive days ever
    pub longest: u32,
    /// Last day with a session
    pub last_session: Option<NaiveDate>,
}

impl StreakInfo {
    /// Calculate streaks from recorded sessions, using local calendar days.
    #[must_use]
    pub fn calculate(sessions: &[SessionRecord]) -> Self {
        let days: Vec<NaiveDate> = sessions
            .iter()
            .map(|s| s.completed_at_local().date_naive())
            .collect();
        Self::from_days(&days, Local::now().date_naive())
    }

    /// Calculate streaks from session days relative to `today`.
    #[must_use]
    pub fn from_days(days: &[NaiveDate], today: NaiveDate) -> Self {
        let mut dates = days.to_vec();
        dates.sort_unstable();
        dates.dedup();

        let Some(&last_session) = dates.last() else {
            return Self::default();
        };

        // A streak is still alive if the last session was yesterday
        let mut check = if dates.binary_search(&today).is_ok() {
            today
        } else {
            today - Duration::days(1)
        };
        let mut current = 0;
        while dates.binary_search(&check).is_ok() {
            current += 1;
            check -= Duration::days(1);
        }

        let mut longest = 0;
        let mut run = 0;
        let mut prev: Option<NaiveDate> = None;
        for date in &dates {
            run = match prev {
                Some(p) if (*date - p).num_days() == 1 => run + 1,
                _ => 1,
            };
            longest = longest.max(run);
            prev = Some(*date);
        }

        Self {
            current,
            longest,
            last_session: Some(last_session),
        }
    }
}

/// Aggregate session totals.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Totals {
    pub sessions: u32,
    pub total_secs: u64,
    pub longest_session_secs: u32,
}

impl Totals {
    #[must_use]
    pub fn calculate(sessions: &[SessionRecord]) -> Self {
        Self {
            sessions: u32::try_from(sessions.len()).unwrap_or(u32::MAX),
            total_secs: sessions.iter().map(|s| u64::from(s.duration_secs)).sum(),
            longest_session_secs: sessions.iter().map(|s| s.duration_secs).max().unwrap_or(0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(offset: i64) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 15).unwrap() + Duration::days(offset)
    }

    #[test]
    fn test_empty() {
        let info = StreakInfo::from_days(&[], day(0));
        assert_eq!(info, StreakInfo::default());
    }

    #[test]
    fn test_streak_includes_today() {
        let info = StreakInfo::from_days(&[day(0), day(-1), day(-2), day(-5)], day(0));
        assert_eq!(info.current, 3);
        assert_eq!(info.longest, 3);
        assert_eq!(info.last_session, Some(day(0)));
    }

    #[test]
    fn test_streak_anchored_at_yesterday() {
        let info = StreakInfo::from_days(&[day(-1), day(-2)], day(0));
        assert_eq!(info.current, 2);
    }

    #[test]
    fn test_streak_broken() {
        let info = StreakInfo::from_days(&[day(-2), day(-3), day(-4), day(-5)], day(0));
        assert_eq!(info.current, 0);
        assert_eq!(info.longest, 4);
    }

    #[test]
    fn test_duplicate_days_count_once() {
        let info = StreakInfo::from_days(&[day(0), day(0), day(0)], day(0));
        assert_eq!(info.current, 1);
        assert_eq!(info.longest, 1);
    }

    #[test]
    fn test_totals() {
        use crate::core::SessionKind;
        use crate::features::timer::CompletionPayload;
        use chrono::Utc;

        let make = |secs| {
            let payload = CompletionPayload {
                duration_secs: secs,
                kind: SessionKind::IceBath,
                technique: None,
                temperature: None,
                intensity: None,
            };
            SessionRecord::from_completion("local", &payload, Utc::now())
        };
        let totals = Totals::calculate(&[make(60), make(200), make(90)]);
        assert_eq!(totals.sessions, 3);
        assert_eq!(totals.total_secs, 350);
        assert_eq!(totals.longest_session_secs, 200);
    }
}
