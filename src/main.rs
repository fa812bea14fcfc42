use clap::Parser;
use colored::Colorize;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use plunge::cli::args::{Cli, Commands, ProfileArgs, SettingsArgs};
use plunge::cli::commands;
use plunge::config::{ColorSetting, Config};
use plunge::error::PlungeError;
use plunge::features::journal::SessionStorage;
use plunge::features::profile::ProfileStorage;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(e.exit_code());
    }
}

fn init_tracing(verbose: u8, config: &Config) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = match verbose {
            0 => config.general.log_level.as_str(),
            1 => "debug",
            _ => "trace",
        };
        EnvFilter::new(format!("plunge={level}"))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run() -> Result<(), PlungeError> {
    let cli = Cli::parse();
    let config = Config::load()?;

    init_tracing(cli.verbose, &config);
    match config.general.color {
        ColorSetting::Auto => {}
        ColorSetting::Always => colored::control::set_override(true),
        ColorSetting::Never => colored::control::set_override(false),
    }

    let format = cli.output.unwrap_or(config.general.default_output);
    debug!(?format, user = %config.general.user_id, "starting");

    let output = match cli.command {
        Commands::Timer(args) => commands::timer(&config, &SessionStorage::new()?, args, format)?,
        Commands::Thermal(args) => {
            commands::thermal(&config, &SessionStorage::new()?, args, format)?
        }
        Commands::Breathe(args) => {
            commands::breathe(&config, &SessionStorage::new()?, args, format)?
        }
        Commands::Contrast(args) => {
            commands::contrast(&config, &SessionStorage::new()?, args, format)?
        }
        Commands::Catalog { section } => commands::catalog(section, format)?,
        Commands::History(args) => {
            commands::history(&config, &SessionStorage::new()?, args, format)?
        }
        Commands::Edit(args) => commands::edit(&SessionStorage::new()?, args, format)?,
        Commands::Delete { id } => commands::delete(&SessionStorage::new()?, id, format)?,
        Commands::Stats => commands::stats(&config, &SessionStorage::new()?, format)?,
        Commands::Achievements => {
            commands::achievements(&config, &SessionStorage::new()?, format)?
        }
        Commands::Profile(ProfileArgs { command }) => {
            commands::profile(&config, &ProfileStorage::new()?, command, format)?
        }
        Commands::Onboard(args) => {
            commands::onboard(&config, &ProfileStorage::new()?, args, format)?
        }
        Commands::Settings(SettingsArgs { command }) => {
            commands::settings(&config, &ProfileStorage::new()?, command, format)?
        }
        Commands::Voice {
            transcript,
            language,
        } => commands::voice(&config, &ProfileStorage::new()?, &transcript, language, format)?,
        Commands::Completions { shell } => commands::completions(shell)?,
    };

    if !output.is_empty() {
        println!("{output}");
    }
    Ok(())
}
