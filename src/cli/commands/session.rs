//! Session commands: run a timer and record the result.

use std::io::{self, Write};
use std::time::Duration;

use colored::Colorize;
use serde_json::json;
use tracing::debug;

use crate::cli::args::{BreatheArgs, ContrastArgs, OutputFormat, RunArgs, ThermalArgs, TimerArgs};
use crate::config::Config;
use crate::core::{format_duration, format_mmss, SessionKind};
use crate::error::PlungeError;
use crate::features::catalog::{preset, protocol, technique};
use crate::features::journal::SessionStorage;
use crate::features::progress::ProgressReport;
use crate::features::timer::{
    IntervalTicker, PlainConfig, SessionTimer, TickSource, TimerConfiguration, TimerOutcome,
};
use crate::output::to_json;
use crate::tui;

/// Longest sleep between ticker polls in headless mode.
const MAX_SLEEP: Duration = Duration::from_millis(250);

/// Execute the plain ice bath timer.
///
/// # Errors
///
/// Returns an error if the duration is zero, the session fails to run, or
/// recording fails.
pub fn timer(
    config: &Config,
    storage: &SessionStorage,
    args: TimerArgs,
    format: OutputFormat,
) -> Result<String, PlungeError> {
    let secs = args.duration.unwrap_or(config.timer.default_duration_secs);
    let plain = PlainConfig::new(secs, SessionKind::IceBath)?;
    run_session(config, storage, plain.into(), "Ice Bath", &args.run, format)
}

/// Execute a thermal session from its preset.
///
/// # Errors
///
/// Returns an error for kinds without a preset, out-of-range temperatures, or
/// failures while running or recording.
pub fn thermal(
    config: &Config,
    storage: &SessionStorage,
    args: ThermalArgs,
    format: OutputFormat,
) -> Result<String, PlungeError> {
    let preset = preset(args.kind)?;
    let plain = preset.to_config(args.duration, args.temperature, args.intensity)?;
    let title = args.kind.display_name();
    run_session(config, storage, plain.into(), title, &args.run, format)
}

/// Execute a breathing session.
///
/// # Errors
///
/// Returns an error for unknown techniques or failures while running or
/// recording.
pub fn breathe(
    config: &Config,
    storage: &SessionStorage,
    args: BreatheArgs,
    format: OutputFormat,
) -> Result<String, PlungeError> {
    let technique = technique(&args.technique)?;
    let cyclic = technique.to_config(args.cycles)?;
    run_session(config, storage, cyclic.into(), technique.name, &args.run, format)
}

/// Execute a contrast protocol.
///
/// # Errors
///
/// Returns an error for unknown protocols or failures while running or
/// recording.
pub fn contrast(
    config: &Config,
    storage: &SessionStorage,
    args: ContrastArgs,
    format: OutputFormat,
) -> Result<String, PlungeError> {
    let protocol = protocol(&args.protocol)?;
    let multi = protocol.to_config(config.timer.minimum_session_secs)?;
    run_session(config, storage, multi.into(), protocol.name, &args.run, format)
}

fn run_session(
    config: &Config,
    storage: &SessionStorage,
    timer_config: TimerConfiguration,
    title: &str,
    run: &RunArgs,
    format: OutputFormat,
) -> Result<String, PlungeError> {
    debug!(title, total = timer_config.total_secs(), "starting session");

    let timer = SessionTimer::new(timer_config);
    let ticker = IntervalTicker::new(config.timer.tick_period());

    let outcome = if run.no_tui || run.stop_after.is_some() {
        match format {
            OutputFormat::Pretty => {
                run_headless(timer, ticker, run.stop_after, &mut io::stdout().lock())?
            }
            OutputFormat::Json => run_headless(timer, ticker, run.stop_after, &mut io::sink())?,
        }
    } else {
        tui::run(timer, ticker, title)?
    };

    finish_session(config, storage, outcome, run, format)
}

/// Drive a timer without the live screen, writing phase changes to `out`.
///
/// Stops the session once `stop_after` ticks have elapsed.
///
/// # Errors
///
/// Returns an error if writing progress fails.
pub fn run_headless<T: TickSource, W: Write>(
    mut timer: SessionTimer,
    mut ticker: T,
    stop_after: Option<u32>,
    out: &mut W,
) -> Result<Option<TimerOutcome>, PlungeError> {
    timer.start();
    writeln!(
        out,
        "{} {} ({})",
        "▶".green(),
        timer.current_phase(),
        format_duration(timer.config().total_secs())
    )?;

    let mut ticks = 0u32;
    loop {
        if stop_after.is_some_and(|limit| ticks >= limit) {
            writeln!(out, "{} stopped after {}", "■".yellow(), format_duration(ticks))?;
            return Ok(timer.stop());
        }

        if !ticker.poll_tick() {
            std::thread::sleep(ticker.until_next().min(MAX_SLEEP));
            continue;
        }
        ticks += 1;

        match timer.tick() {
            Some(TimerOutcome::PhaseChanged { phase, .. }) => {
                writeln!(
                    out,
                    "  {} {} {}",
                    format_mmss(timer.state().elapsed_total).dimmed(),
                    phase,
                    format_duration(timer.state().remaining_in_phase)
                )?;
            }
            Some(outcome) => return Ok(Some(outcome)),
            None => {}
        }
    }
}

/// Record a completed session, with the mood and notes from `run`, and
/// describe what happened.
fn finish_session(
    config: &Config,
    storage: &SessionStorage,
    outcome: Option<TimerOutcome>,
    run: &RunArgs,
    format: OutputFormat,
) -> Result<String, PlungeError> {
    let payload = match outcome {
        Some(TimerOutcome::Completed(payload)) => payload,
        other => return describe_unsaved(config, other, format),
    };

    let user_id = &config.general.user_id;

    let before = ProgressReport::from_sessions(&storage.list_for_user(user_id, None, None)?);
    let record =
        storage.record_completion(user_id, &payload, run.mood, run.notes.as_deref())?;
    let after = ProgressReport::from_sessions(&storage.list_for_user(user_id, None, None)?);

    let unlocked: Vec<_> = after
        .achievements
        .iter()
        .filter(|a| {
            a.unlocked
                && !before
                    .achievements
                    .iter()
                    .any(|b| b.id == a.id && b.unlocked)
        })
        .collect();

    match format {
        OutputFormat::Json => to_json(&json!({
            "status": "completed",
            "session": record,
            "unlocked": unlocked,
        })),
        OutputFormat::Pretty => {
            let mut output = vec![format!(
                "{} Session saved (#{}): {}",
                "✓".green(),
                record.id.unwrap_or_default(),
                record.summary().bold()
            )];
            for achievement in unlocked {
                output.push(format!(
                    "  {} Unlocked: {} - {}",
                    "★".yellow(),
                    achievement.title.bold(),
                    achievement.description
                ));
            }
            if after.streak.current > 1 {
                let streak = format!("  {} day streak", after.streak.current);
                output.push(streak.dimmed().to_string());
            }
            Ok(output.join("\n"))
        }
    }
}

/// Describe a session that ended without anything to record.
fn describe_unsaved(
    config: &Config,
    outcome: Option<TimerOutcome>,
    format: OutputFormat,
) -> Result<String, PlungeError> {
    let discarded = matches!(outcome, Some(TimerOutcome::Discarded));
    match format {
        OutputFormat::Json => to_json(&json!({
            "status": if discarded { "discarded" } else { "stopped" },
        })),
        OutputFormat::Pretty if discarded => Ok(format!(
            "{} Session shorter than {}; not saved",
            "✗".yellow(),
            format_duration(config.timer.minimum_session_secs)
        )),
        OutputFormat::Pretty => Ok(format!("{} Session stopped; nothing recorded", "■".yellow())),
    }
}
