use colored::Colorize;

use crate::core::{format_duration, render_progress_bar, SessionKind};
use crate::features::catalog::{BreathingTechnique, ContrastProtocol, ThermalPreset};
use crate::features::journal::SessionRecord;
use crate::features::profile::{AppSettings, Preferences, User};
use crate::features::progress::{Achievement, ProgressReport, Rarity};
use crate::features::timer::Exposure;

fn kind_icon(kind: SessionKind) -> colored::ColoredString {
    match kind {
        SessionKind::IceBath | SessionKind::ColdPlunge => "❄".cyan(),
        SessionKind::Sauna | SessionKind::Jacuzzi => "♨".red(),
        SessionKind::Breathing => "≈".green(),
        SessionKind::ContrastTherapy => "⇅".magenta(),
    }
}

/// Format journal records as a list
pub fn format_sessions_pretty(sessions: &[SessionRecord], title: &str) -> String {
    if sessions.is_empty() {
        return format!("{title} (0 sessions)\n  No sessions yet");
    }

    let mut output = format!("{} ({} sessions)\n", title, sessions.len());
    output.push_str(&"─".repeat(60));
    output.push('\n');

    for session in sessions {
        let id = session.id.map_or_else(|| "-".to_string(), |id| id.to_string());
        let mut line = format!(
            "{} {:>4}  {}  {}",
            kind_icon(session.kind),
            id.dimmed(),
            session
                .completed_at_local()
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .dimmed(),
            session.summary().bold()
        );

        if let Some(mood) = &session.mood {
            line.push_str(&format!("  {}", mood.as_str().yellow()));
        }

        output.push_str(&line);
        output.push('\n');
    }

    output
}

/// Format a single journal record
pub fn format_session_pretty(session: &SessionRecord) -> String {
    let mut output = format!("{} {}\n", kind_icon(session.kind), session.kind.display_name().bold());
    if let Some(id) = session.id {
        output.push_str(&format!("  {}: {}\n", "ID".dimmed(), id));
    }
    output.push_str(&format!(
        "  {}: {}\n",
        "Duration".dimmed(),
        format_duration(session.duration_secs)
    ));
    output.push_str(&format!(
        "  {}: {}\n",
        "Completed".dimmed(),
        session.completed_at_local().format("%Y-%m-%d %H:%M")
    ));

    if let Some(technique) = &session.technique {
        output.push_str(&format!("  {}: {}\n", "Technique".dimmed(), technique));
    }
    if let Some(temp) = session.temperature {
        output.push_str(&format!("  {}: {temp:.1}°C\n", "Temperature".dimmed()));
    }
    if let Some(intensity) = session.intensity {
        output.push_str(&format!("  {}: {}\n", "Intensity".dimmed(), intensity));
    }
    if let Some(mood) = &session.mood {
        output.push_str(&format!("  {}: {}\n", "Mood".dimmed(), mood));
    }
    if let Some(notes) = &session.notes {
        output.push_str(&format!("  {}: {}\n", "Notes".dimmed(), notes));
    }

    output
}

/// Format breathing techniques
pub fn format_techniques_pretty(techniques: &[BreathingTechnique]) -> String {
    let mut output = format!("{}\n", "Breathing techniques".bold());
    output.push_str(&"─".repeat(60));
    output.push('\n');

    for t in techniques {
        output.push_str(&format!(
            "{:<12} {}  {} × {}  ({})\n",
            t.id.cyan(),
            t.name.bold(),
            t.pattern_label(),
            t.cycles,
            format_duration(t.cycle_secs() * t.cycles).dimmed()
        ));
        output.push_str(&format!("{:<12} {}\n", "", t.description.dimmed()));
    }

    output
}

/// Format contrast protocols with their steps
pub fn format_protocols_pretty(protocols: &[ContrastProtocol]) -> String {
    let mut output = format!("{}\n", "Contrast protocols".bold());
    output.push_str(&"─".repeat(60));
    output.push('\n');

    for p in protocols {
        output.push_str(&format!(
            "{:<12} {}  [{}]  {}\n",
            p.id.cyan(),
            p.name.bold(),
            p.difficulty,
            format_duration(p.total_secs()).dimmed()
        ));
        for step in p.steps {
            let label = match step.exposure {
                Exposure::Hot => "hot ".red(),
                Exposure::Cold => "cold".cyan(),
            };
            output.push_str(&format!(
                "{:<12}   {} {:>6} at {:.0}°C  {}\n",
                "",
                label,
                format_duration(step.duration_secs),
                step.temperature,
                step.description.dimmed()
            ));
        }
    }

    output
}

/// Format thermal presets
pub fn format_presets_pretty(presets: &[ThermalPreset]) -> String {
    let mut output = format!("{}\n", "Thermal sessions".bold());
    output.push_str(&"─".repeat(60));
    output.push('\n');

    for p in presets {
        let mut line = format!(
            "{} {:<18} default {}",
            kind_icon(p.kind),
            p.kind.as_str().cyan(),
            format_duration(p.default_duration_secs)
        );
        if let Some(temp) = p.default_temperature {
            line.push_str(&format!(" at {temp:.0}°C"));
        }
        if let Some(range) = p.range {
            line.push_str(&format!(
                "  {}",
                format!("({:.0}-{:.0}°C)", range.min, range.max).dimmed()
            ));
        }
        output.push_str(&line);
        output.push('\n');
    }

    output
}

/// Format the stats overview
pub fn format_progress_pretty(report: &ProgressReport) -> String {
    let mut output = format!("{}\n", "Progress".bold());
    output.push_str(&"─".repeat(40));
    output.push('\n');

    let totals = &report.totals;
    output.push_str(&format!("  {:<18} {}\n", "Sessions".dimmed(), totals.sessions));
    output.push_str(&format!(
        "  {:<18} {}\n",
        "Total time".dimmed(),
        format_duration(u32::try_from(totals.total_secs).unwrap_or(u32::MAX))
    ));
    output.push_str(&format!(
        "  {:<18} {}\n",
        "Longest session".dimmed(),
        format_duration(totals.longest_session_secs)
    ));
    output.push_str(&format!(
        "  {:<18} {} days\n",
        "Current streak".dimmed(),
        report.streak.current.to_string().yellow()
    ));
    output.push_str(&format!(
        "  {:<18} {} days\n",
        "Longest streak".dimmed(),
        report.streak.longest
    ));
    output.push_str(&format!(
        "  {:<18} {}/{}\n",
        "Achievements".dimmed(),
        report.unlocked_count(),
        report.achievements.len()
    ));

    output
}

fn rarity_label(rarity: Rarity) -> colored::ColoredString {
    match rarity {
        Rarity::Common => rarity.as_str().white(),
        Rarity::Rare => rarity.as_str().blue(),
        Rarity::Epic => rarity.as_str().magenta(),
        Rarity::Legendary => rarity.as_str().yellow(),
    }
}

/// Format achievements with progress bars
pub fn format_achievements_pretty(achievements: &[Achievement]) -> String {
    let unlocked = achievements.iter().filter(|a| a.unlocked).count();
    let mut output = format!("{} ({unlocked}/{})\n", "Achievements".bold(), achievements.len());
    output.push_str(&"─".repeat(60));
    output.push('\n');

    for a in achievements {
        let icon = if a.unlocked { "★".yellow() } else { "☆".dimmed() };
        let title = if a.unlocked {
            a.title.bold()
        } else {
            a.title.normal()
        };
        output.push_str(&format!("{icon} {title}  {}\n", rarity_label(a.rarity)));

        let ratio = f64::from(a.progress) / f64::from(a.max_progress.max(1));
        output.push_str(&format!(
            "    {} {}/{}  {}\n",
            render_progress_bar(ratio, 20),
            a.progress,
            a.max_progress,
            a.description.dimmed()
        ));
    }

    output
}

/// Format the user profile
pub fn format_profile_pretty(
    user: Option<&User>,
    preferences: Option<&Preferences>,
    settings: &AppSettings,
) -> String {
    let mut output = String::new();

    match user {
        Some(user) => {
            output.push_str(&format!("{}\n", user.name.bold()));
            output.push_str(&format!("  {}: {}\n", "User ID".dimmed(), user.user_id));
            if !user.email.is_empty() {
                output.push_str(&format!("  {}: {}\n", "Email".dimmed(), user.email));
            }
            output.push_str(&format!(
                "  {}: {}\n",
                "Since".dimmed(),
                user.signed_in_at.format("%Y-%m-%d")
            ));
        }
        None => output.push_str("No profile yet. Run `plunge profile init`.\n"),
    }

    if let Some(prefs) = preferences {
        output.push_str(&format!("  {}: {}\n", "Experience".dimmed(), prefs.experience));
        output.push_str(&format!(
            "  {}: {}\n",
            "Preferred length".dimmed(),
            format_duration(prefs.preferred_duration_secs)
        ));
        if !prefs.goals.is_empty() {
            output.push_str(&format!("  {}: {}\n", "Goals".dimmed(), prefs.goals.join(", ")));
        }
        if !prefs.interests.is_empty() {
            let interests: Vec<_> = prefs.interests.iter().map(|i| i.as_str()).collect();
            output.push_str(&format!("  {}: {}\n", "Interests".dimmed(), interests.join(", ")));
        }
        let onboarded = if prefs.onboarding_completed { "yes".green() } else { "no".yellow() };
        output.push_str(&format!("  {}: {}\n", "Onboarded".dimmed(), onboarded));
    }

    output.push_str(&format_settings_pretty(settings));
    output
}

/// Format app settings
pub fn format_settings_pretty(settings: &AppSettings) -> String {
    let theme = settings.theme.map_or("system", |t| t.as_str());
    format!(
        "  {}: {}\n  {}: {}\n",
        "Language".dimmed(),
        settings.language,
        "Theme".dimmed(),
        theme
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Mood;
    use crate::features::catalog::{presets, protocols, techniques};
    use crate::features::progress::{evaluate, StreakInfo, Totals};
    use crate::features::timer::CompletionPayload;
    use chrono::Utc;

    fn make_record() -> SessionRecord {
        let payload = CompletionPayload {
            duration_secs: 150,
            kind: SessionKind::IceBath,
            technique: None,
            temperature: Some(9.0),
            intensity: None,
        };
        let mut record = SessionRecord::from_completion("local", &payload, Utc::now());
        record.id = Some(3);
        record.mood = Some(Mood::Strong);
        record
    }

    #[test]
    fn test_format_sessions_empty() {
        let result = format_sessions_pretty(&[], "History");
        assert!(result.contains("History (0 sessions)"));
        assert!(result.contains("No sessions yet"));
    }

    #[test]
    fn test_format_sessions_lists_each() {
        colored::control::set_override(false);
        let result = format_sessions_pretty(&[make_record()], "History");
        assert!(result.contains("History (1 sessions)"));
        assert!(result.contains("Ice Bath 2m 30s at 9.0°C"));
        assert!(result.contains("strong"));
    }

    #[test]
    fn test_format_session_detail() {
        colored::control::set_override(false);
        let result = format_session_pretty(&make_record());
        assert!(result.contains("ID: 3"));
        assert!(result.contains("Duration: 2m 30s"));
        assert!(result.contains("Temperature: 9.0°C"));
        assert!(result.contains("Mood: strong"));
    }

    #[test]
    fn test_format_catalog_sections() {
        colored::control::set_override(false);
        assert!(format_techniques_pretty(techniques()).contains("4-7-8-0"));
        assert!(format_protocols_pretty(protocols()).contains("Basic 3-1"));
        assert!(format_presets_pretty(presets()).contains("sauna"));
    }

    #[test]
    fn test_format_achievements() {
        colored::control::set_override(false);
        let totals = Totals {
            sessions: 1,
            total_secs: 90,
            longest_session_secs: 90,
        };
        let result = format_achievements_pretty(&evaluate(&totals, &StreakInfo::default()));
        assert!(result.contains("Achievements (2/12)"));
        assert!(result.contains("First Plunge"));
    }
}
