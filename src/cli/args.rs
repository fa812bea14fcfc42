use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use serde::{Deserialize, Serialize};

use crate::core::{parse_duration, Intensity, Mood, SessionKind};
use crate::features::profile::{Experience, Interest, Language, Theme};

#[derive(Parser)]
#[command(name = "plunge")]
#[command(about = "Cold plunge, sauna and breathing session timer with a local journal")]
#[command(long_about = "plunge - wellness session timer

Times ice baths, cold plunges, sauna and jacuzzi sessions, guided breathing
and hot/cold contrast protocols. Completed sessions are saved to a local
journal with streaks and achievements.

QUICK START:
  plunge timer -d 2m          Two minute ice bath
  plunge breathe box          Box breathing, 10 cycles
  plunge contrast finnish     Finnish sauna/plunge protocol
  plunge history              Recent sessions
  plunge stats                Totals and streaks

OUTPUT FORMATS:
  --output pretty    Human-readable colored output (default)
  --output json      Machine-readable JSON for scripting

Data lives in ~/.plunge/ (override with PLUNGE_HOME).")]
#[command(version, propagate_version = true)]
pub struct Cli {
    /// Output format for command results
    #[arg(short, long, value_enum, global = true)]
    pub output: Option<OutputFormat>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for command results.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable colored output.
    #[default]
    Pretty,
    /// Machine-readable JSON output.
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Plain ice bath countdown
    ///
    /// # Examples
    ///
    ///   plunge timer              Default length (2 minutes)
    ///   plunge timer -d 3m        Three minutes
    ///   plunge timer -d 90s --no-tui
    ///   plunge timer -d 3m --mood strong --notes "steady breathing"
    #[command(alias = "t")]
    Timer(TimerArgs),

    /// Timed thermal session: ice-bath, cold-plunge, sauna or jacuzzi
    ///
    /// Temperature must be inside the preset range for the kind.
    ///
    /// # Examples
    ///
    ///   plunge thermal sauna -d 15m -t 90 -i high
    ///   plunge thermal cold-plunge
    Thermal(ThermalArgs),

    /// Guided breathing session
    ///
    /// Techniques: box, wim-hof, 4-7-8, pranayama, energizing.
    ///
    /// # Examples
    ///
    ///   plunge breathe box
    ///   plunge breathe 4-7-8 --cycles 4
    #[command(alias = "b")]
    Breathe(BreatheArgs),

    /// Hot/cold contrast protocol
    ///
    /// Protocols: basic-3-1, finnish, performance. Stopping after more than
    /// the minimum session length still saves the session.
    ///
    /// # Examples
    ///
    ///   plunge contrast basic-3-1
    ///   plunge contrast finnish --no-tui --stop-after 120
    Contrast(ContrastArgs),

    /// List built-in techniques, protocols and presets
    Catalog {
        /// Only show one section
        #[arg(value_enum)]
        section: Option<CatalogSection>,
    },

    /// Show recorded sessions, newest first
    #[command(alias = "h")]
    History(HistoryArgs),

    /// Edit a recorded session
    ///
    /// # Examples
    ///
    ///   plunge edit 12 --mood energized --notes "felt great"
    ///   plunge edit 12 -d 3m
    Edit(EditArgs),

    /// Delete a recorded session
    Delete {
        /// Session ID
        id: i64,
    },

    /// Totals, streaks and achievement count
    Stats,

    /// All achievements with progress
    Achievements,

    /// Show or create the local profile
    Profile(ProfileArgs),

    /// Save onboarding answers
    ///
    /// # Examples
    ///
    ///   plunge onboard --name Noa --experience beginner -g recovery -g focus \
    ///       --duration 2m --interest cold-therapy
    Onboard(OnboardArgs),

    /// Show or change app settings
    Settings(SettingsArgs),

    /// Parse a voice transcript into a timer command
    ///
    /// # Examples
    ///
    ///   plunge voice "set timer to 3 minutes"
    ///   plunge voice "התחל" --language he
    Voice {
        /// Transcript text
        transcript: String,

        /// Transcript language (defaults to the saved setting)
        #[arg(short, long, value_parser = parse_language)]
        language: Option<Language>,
    },

    /// Generate shell completions
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// How a session is displayed while it runs.
#[derive(Args, Clone, Debug, Default)]
pub struct RunArgs {
    /// Run without the live screen, printing phase changes
    #[arg(long)]
    pub no_tui: bool,

    /// Stop the session after this many ticks (implies --no-tui)
    #[arg(long, value_name = "SECS")]
    pub stop_after: Option<u32>,

    /// Mood to save with a completed session: energized, accomplished, calm or strong
    #[arg(short, long, value_parser = parse_mood)]
    pub mood: Option<Mood>,

    /// Notes to save with a completed session
    #[arg(long)]
    pub notes: Option<String>,
}

#[derive(Args)]
pub struct TimerArgs {
    /// Countdown length, e.g. 90s, 2m, 1m30s
    #[arg(short, long, value_parser = parse_duration_arg)]
    pub duration: Option<u32>,

    #[command(flatten)]
    pub run: RunArgs,
}

#[derive(Args)]
pub struct ThermalArgs {
    /// Session kind
    #[arg(value_parser = parse_kind)]
    pub kind: SessionKind,

    /// Session length, e.g. 15m
    #[arg(short, long, value_parser = parse_duration_arg)]
    pub duration: Option<u32>,

    /// Temperature in °C
    #[arg(short, long, allow_negative_numbers = true)]
    pub temperature: Option<f64>,

    /// Intensity: low, medium or high
    #[arg(short, long, value_parser = parse_intensity)]
    pub intensity: Option<Intensity>,

    #[command(flatten)]
    pub run: RunArgs,
}

#[derive(Args)]
pub struct BreatheArgs {
    /// Technique ID
    pub technique: String,

    /// Override the number of cycles
    #[arg(short, long)]
    pub cycles: Option<u32>,

    #[command(flatten)]
    pub run: RunArgs,
}

#[derive(Args)]
pub struct ContrastArgs {
    /// Protocol ID
    pub protocol: String,

    #[command(flatten)]
    pub run: RunArgs,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum CatalogSection {
    Breathing,
    Contrast,
    Thermal,
}

#[derive(Args)]
pub struct HistoryArgs {
    /// Only show one kind of session
    #[arg(short, long, value_parser = parse_kind)]
    pub kind: Option<SessionKind>,

    /// Maximum number of sessions (defaults to the configured limit)
    #[arg(short = 'n', long)]
    pub limit: Option<usize>,
}

#[derive(Args)]
pub struct EditArgs {
    /// Session ID
    pub id: i64,

    /// New length, e.g. 2m30s
    #[arg(short, long, value_parser = parse_duration_arg)]
    pub duration: Option<u32>,

    /// energized, accomplished, calm or strong
    #[arg(short, long, value_parser = parse_mood)]
    pub mood: Option<Mood>,

    /// Free-form notes
    #[arg(long)]
    pub notes: Option<String>,

    /// Temperature in °C
    #[arg(short, long, allow_negative_numbers = true)]
    pub temperature: Option<f64>,

    /// Intensity: low, medium or high
    #[arg(short, long, value_parser = parse_intensity)]
    pub intensity: Option<Intensity>,
}

#[derive(Args)]
pub struct ProfileArgs {
    #[command(subcommand)]
    pub command: Option<ProfileCommands>,
}

#[derive(Subcommand)]
pub enum ProfileCommands {
    /// Show the profile (default)
    Show,
    /// Create the local profile if it does not exist
    Init {
        /// Display name
        #[arg(long)]
        name: String,

        /// Email address
        #[arg(long, default_value = "")]
        email: String,
    },
}

#[derive(Args)]
pub struct OnboardArgs {
    /// Display name
    #[arg(long)]
    pub name: String,

    /// beginner, intermediate or advanced
    #[arg(long, value_parser = parse_experience, default_value = "beginner")]
    pub experience: Experience,

    /// Goals (repeatable)
    #[arg(short, long = "goal")]
    pub goals: Vec<String>,

    /// Preferred session length
    #[arg(short, long, value_parser = parse_duration_arg, default_value = "2m")]
    pub duration: u32,

    /// cold-therapy or breathing (repeatable)
    #[arg(long = "interest", value_parser = parse_interest)]
    pub interests: Vec<Interest>,
}

#[derive(Args)]
pub struct SettingsArgs {
    #[command(subcommand)]
    pub command: Option<SettingsCommands>,
}

#[derive(Subcommand)]
pub enum SettingsCommands {
    /// Show current settings (default)
    Show,
    /// Change settings
    Set {
        /// en or he
        #[arg(long, value_parser = parse_language)]
        language: Option<Language>,

        /// light or dark
        #[arg(long, value_parser = parse_theme)]
        theme: Option<Theme>,
    },
}

fn parse_duration_arg(s: &str) -> Result<u32, String> {
    parse_duration(s).ok_or_else(|| format!("invalid duration '{s}' (try 90s, 2m or 1m30s)"))
}

fn parse_kind(s: &str) -> Result<SessionKind, String> {
    SessionKind::parse(s).ok_or_else(|| {
        let names: Vec<_> = SessionKind::ALL.iter().map(SessionKind::as_str).collect();
        format!("unknown session kind '{s}' (expected one of: {})", names.join(", "))
    })
}

fn parse_intensity(s: &str) -> Result<Intensity, String> {
    Intensity::parse(s).ok_or_else(|| format!("unknown intensity '{s}' (low, medium, high)"))
}

fn parse_mood(s: &str) -> Result<Mood, String> {
    Mood::parse(s)
        .ok_or_else(|| format!("unknown mood '{s}' (energized, accomplished, calm, strong)"))
}

fn parse_experience(s: &str) -> Result<Experience, String> {
    Experience::parse(s)
        .ok_or_else(|| format!("unknown experience '{s}' (beginner, intermediate, advanced)"))
}

fn parse_interest(s: &str) -> Result<Interest, String> {
    Interest::parse(s).ok_or_else(|| format!("unknown interest '{s}' (cold-therapy, breathing)"))
}

fn parse_language(s: &str) -> Result<Language, String> {
    Language::parse(s).ok_or_else(|| format!("unknown language '{s}' (en, he)"))
}

fn parse_theme(s: &str) -> Result<Theme, String> {
    Theme::parse(s).ok_or_else(|| format!("unknown theme '{s}' (light, dark)"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_thermal() {
        let cli = Cli::try_parse_from([
            "plunge", "thermal", "sauna", "-d", "15m", "-t", "90", "-i", "high", "--no-tui",
        ])
        .unwrap();
        let Commands::Thermal(args) = cli.command else {
            panic!("expected thermal");
        };
        assert_eq!(args.kind, SessionKind::Sauna);
        assert_eq!(args.duration, Some(900));
        assert_eq!(args.temperature, Some(90.0));
        assert_eq!(args.intensity, Some(Intensity::High));
        assert!(args.run.no_tui);
    }

    #[test]
    fn test_global_flags() {
        let cli = Cli::try_parse_from(["plunge", "stats", "-o", "json", "-vv"]).unwrap();
        assert_eq!(cli.output, Some(OutputFormat::Json));
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(Cli::try_parse_from(["plunge", "thermal", "steam-room"]).is_err());
        assert!(Cli::try_parse_from(["plunge", "timer", "-d", "soon"]).is_err());
        assert!(Cli::try_parse_from(["plunge", "history", "--kind", "nap"]).is_err());
    }

    #[test]
    fn test_mood_values() {
        let cli = Cli::try_parse_from([
            "plunge", "breathe", "box", "--mood", "Calm", "--notes", "easy", "--no-tui",
        ])
        .unwrap();
        let Commands::Breathe(args) = cli.command else {
            panic!("expected breathe");
        };
        assert_eq!(args.run.mood, Some(Mood::Calm));
        assert_eq!(args.run.notes.as_deref(), Some("easy"));

        assert!(Cli::try_parse_from(["plunge", "edit", "1", "--mood", "sleepy"]).is_err());
    }

    #[test]
    fn test_negative_temperature() {
        let cli = Cli::try_parse_from(["plunge", "edit", "3", "-t", "-1.5"]).unwrap();
        let Commands::Edit(args) = cli.command else {
            panic!("expected edit");
        };
        assert_eq!(args.temperature, Some(-1.5));
    }
}
