//! Voice command parser.
//!
//! Turns a speech transcript like "set timer to 3 minutes" or "התחל" into a
//! timer command.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::features::profile::Language;

/// A command recognised in a transcript.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "command", content = "duration_secs")]
pub enum VoiceCommand {
    Start,
    Pause,
    Stop,
    /// New plain countdown length in seconds
    SetDuration(u32),
}

impl std::fmt::Display for VoiceCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Start => f.write_str("start"),
            Self::Pause => f.write_str("pause"),
            Self::Stop => f.write_str("stop"),
            Self::SetDuration(secs) => write!(f, "set duration {secs}s"),
        }
    }
}

struct Vocabulary {
    start: &'static [&'static str],
    pause: &'static [&'static str],
    stop: &'static [&'static str],
    /// Tried in order; the flag marks patterns whose number is in seconds.
    durations: &'static Lazy<Vec<(Regex, bool)>>,
}

static ENGLISH_DURATIONS: Lazy<Vec<(Regex, bool)>> = Lazy::new(|| {
    compile(&[
        (r"(?i)(?:set|timer|time)\s*(?:to|for)?\s*([0-9]+)\s*(?:minute|minutes|min|m)", false),
        (r"(?i)([0-9]+)\s*(?:minute|minutes|min|m)", false),
        (r"(?i)(?:set|timer|time)\s*(?:to|for)?\s*([0-9]+)\s*(?:second|seconds|sec|s)", true),
        (r"(?i)([0-9]+)\s*(?:second|seconds|sec|s)", true),
    ])
});

static HEBREW_DURATIONS: Lazy<Vec<(Regex, bool)>> = Lazy::new(|| {
    compile(&[
        (r"(?:קבע|טיימר|זמן)\s*(?:ל|של)?-?\s*([0-9]+)\s*(?:דקה|דקות|ד)", false),
        (r"([0-9]+)\s*(?:דקה|דקות|ד)", false),
        (r"(?:קבע|טיימר|זמן)\s*(?:ל|של)?-?\s*([0-9]+)\s*(?:שנייה|שניות|ש)", true),
        (r"([0-9]+)\s*(?:שנייה|שניות|ש)", true),
    ])
});

static ENGLISH: Vocabulary = Vocabulary {
    start: &["start", "begin", "go"],
    pause: &["pause", "wait", "hold"],
    stop: &["stop", "end", "finish", "cancel"],
    durations: &ENGLISH_DURATIONS,
};

static HEBREW: Vocabulary = Vocabulary {
    start: &["התחל", "תתחיל", "בואי"],
    pause: &["השהה", "עצור", "חכה"],
    stop: &["הפסק", "סיים", "בטל"],
    durations: &HEBREW_DURATIONS,
};

fn compile(patterns: &[(&str, bool)]) -> Vec<(Regex, bool)> {
    patterns
        .iter()
        .filter_map(|(source, seconds)| Regex::new(source).ok().map(|re| (re, *seconds)))
        .collect()
}

const fn vocabulary(language: Language) -> &'static Vocabulary {
    match language {
        Language::En => &ENGLISH,
        Language::He => &HEBREW,
    }
}

/// Parse a transcript into a command.
///
/// Keywords match anywhere in the text and are checked before durations,
/// so "start 5 minutes" is a start command.
#[must_use]
pub fn parse_command(transcript: &str, language: Language) -> Option<VoiceCommand> {
    let text = transcript.trim().to_lowercase();
    if text.is_empty() {
        return None;
    }

    let vocab = vocabulary(language);
    let contains_any = |words: &[&str]| words.iter().any(|w| text.contains(w));

    if contains_any(vocab.start) {
        return Some(VoiceCommand::Start);
    }
    if contains_any(vocab.pause) {
        return Some(VoiceCommand::Pause);
    }
    if contains_any(vocab.stop) {
        return Some(VoiceCommand::Stop);
    }

    parse_duration(&text, vocab).map(VoiceCommand::SetDuration)
}

fn parse_duration(text: &str, vocab: &Vocabulary) -> Option<u32> {
    for (pattern, seconds) in vocab.durations.iter() {
        let Some(number) = pattern
            .captures(text)
            .and_then(|caps| caps.get(1))
            .and_then(|m| m.as_str().parse::<u32>().ok())
        else {
            continue;
        };

        if number == 0 {
            continue;
        }

        return if *seconds {
            Some(number)
        } else {
            number.checked_mul(60)
        };
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_english_keywords() {
        assert_eq!(parse_command("Start the timer", Language::En), Some(VoiceCommand::Start));
        assert_eq!(parse_command("  BEGIN ", Language::En), Some(VoiceCommand::Start));
        assert_eq!(parse_command("wait a moment", Language::En), Some(VoiceCommand::Pause));
        assert_eq!(parse_command("hold", Language::En), Some(VoiceCommand::Pause));
        assert_eq!(parse_command("cancel", Language::En), Some(VoiceCommand::Stop));
        assert_eq!(parse_command("finish", Language::En), Some(VoiceCommand::Stop));
    }

    #[test]
    fn test_start_wins_over_stop() {
        assert_eq!(
            parse_command("stop and start again", Language::En),
            Some(VoiceCommand::Start)
        );
    }

    #[test]
    fn test_english_durations() {
        assert_eq!(
            parse_command("set timer to 3 minutes", Language::En),
            Some(VoiceCommand::SetDuration(180))
        );
        assert_eq!(parse_command("5 min", Language::En), Some(VoiceCommand::SetDuration(300)));
        assert_eq!(
            parse_command("30 seconds", Language::En),
            Some(VoiceCommand::SetDuration(30))
        );
        assert_eq!(parse_command("timer 45 sec", Language::En), Some(VoiceCommand::SetDuration(45)));
    }

    #[test]
    fn test_zero_is_not_a_duration() {
        assert_eq!(parse_command("0 minutes", Language::En), None);
        assert_eq!(parse_command("set timer to 0 seconds", Language::En), None);
    }

    #[test]
    fn test_unrecognised() {
        assert_eq!(parse_command("", Language::En), None);
        assert_eq!(parse_command("how cold is it", Language::En), None);
    }

    #[test]
    fn test_hebrew() {
        assert_eq!(parse_command("התחל", Language::He), Some(VoiceCommand::Start));
        assert_eq!(parse_command("חכה רגע", Language::He), Some(VoiceCommand::Pause));
        assert_eq!(parse_command("סיים", Language::He), Some(VoiceCommand::Stop));
        assert_eq!(
            parse_command("קבע טיימר ל-3 דקות", Language::He),
            Some(VoiceCommand::SetDuration(180))
        );
        assert_eq!(
            parse_command("40 שניות", Language::He),
            Some(VoiceCommand::SetDuration(40))
        );
    }

    #[test]
    fn test_language_is_respected() {
        assert_eq!(parse_command("start", Language::He), None);
        assert_eq!(parse_command("התחל", Language::En), None);
    }
}
