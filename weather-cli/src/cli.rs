use anyhow::Context;
use clap::{Parser, Subcommand};
use inquire::{InquireError, Password, PasswordDisplayMode, Text};
use tracing::info;
use weather_widget_core::{
    Config, FilePreferenceStore, MemoryPreferenceStore, PreferenceStore, UiState, View,
    ViewController, client_from_config,
};

use crate::terminal::TerminalView;

/// Typed at the prompt to flip the theme.
const THEME_COMMAND: &str = ":theme";
/// Typed at the prompt to leave.
const QUIT_COMMAND: &str = ":quit";

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather-widget", version, about = "Current weather and 5-day forecast in your terminal")]
pub struct Cli {
    /// More log output on stderr (-v, -vv). `RUST_LOG` takes precedence.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeather API key.
    Configure,

    /// Show weather for a location once and exit.
    Show {
        /// Location name, e.g. "London" or "Paris,FR".
        location: String,

        /// Do not remember the location for the next session.
        #[arg(long)]
        no_save: bool,
    },

    /// Switch between the light and dark theme.
    Theme,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            None => interactive().await,
            Some(Command::Configure) => configure(),
            Some(Command::Show { location, no_save }) => show(location, no_save).await,
            Some(Command::Theme) => toggle_theme(),
        }
    }
}

async fn interactive() -> anyhow::Result<()> {
    let config = Config::load()?;
    let client = client_from_config(&config)?;
    let prefs = FilePreferenceStore::open_default()?;
    info!(path = %prefs.path().display(), "Using preferences file");

    let mut widget = ViewController::new(client, Box::new(prefs), TerminalView::new());
    widget.start().await;

    let help = format!("Enter to search, {THEME_COMMAND} to switch theme, {QUIT_COMMAND} or Esc to exit");

    loop {
        widget.view_mut().settle();
        let initial = widget.view().input_value();
        let prompt = Text::new("Location:")
            .with_initial_value(&initial)
            .with_help_message(&help)
            .prompt();

        let line = match prompt {
            Ok(line) => line,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
            Err(err) => return Err(err).context("Failed to read location"),
        };

        match line.trim() {
            QUIT_COMMAND => break,
            THEME_COMMAND => {
                widget.toggle_theme();
            }
            _ => {
                widget.view_mut().set_input_value(&line);
                widget.submit().await;
            }
        }
    }

    Ok(())
}

async fn show(location: String, no_save: bool) -> anyhow::Result<()> {
    let config = Config::load()?;
    let client = client_from_config(&config)?;
    let file_prefs = FilePreferenceStore::open_default()?;

    // Keep the saved theme even when the location is not saved.
    let prefs: Box<dyn PreferenceStore> = if no_save {
        let memory = MemoryPreferenceStore::new();
        if let Some(theme) = file_prefs.theme() {
            memory.set_theme(theme)?;
        }
        Box::new(memory)
    } else {
        Box::new(file_prefs)
    };

    let mut view = TerminalView::new();
    view.set_input_value(&location);

    let mut widget = ViewController::new(client, prefs, view);
    widget.restore_theme();
    widget.submit().await;

    match widget.state() {
        UiState::ShowingError => anyhow::bail!("lookup failed"),
        UiState::Idle => anyhow::bail!("location must not be blank"),
        _ => Ok(()),
    }
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let api_key = Password::new("OpenWeather API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .with_help_message("Get one at https://openweathermap.org/api")
        .prompt()
        .context("Failed to read API key")?;

    config.set_api_key(api_key.trim().to_string());
    config.save()?;

    println!("Saved API key to {}", Config::config_file_path()?.display());
    Ok(())
}

fn toggle_theme() -> anyhow::Result<()> {
    let prefs = FilePreferenceStore::open_default()?;
    let next = prefs.theme().unwrap_or_default().toggled();
    prefs.set_theme(next)?;

    println!("Theme: {next}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(args)
    }

    #[test]
    fn no_subcommand_is_interactive() {
        let cli = parse(&["weather-widget"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn show_takes_location() {
        let cli = parse(&["weather-widget", "show", "New York"]).unwrap();
        match cli.command {
            Some(Command::Show { location, no_save }) => {
                assert_eq!(location, "New York");
                assert!(!no_save);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn show_accepts_no_save() {
        let cli = parse(&["weather-widget", "show", "Oslo", "--no-save"]).unwrap();
        assert!(matches!(cli.command, Some(Command::Show { no_save: true, .. })));
    }

    #[test]
    fn show_requires_location() {
        assert!(parse(&["weather-widget", "show"]).is_err());
    }

    #[test]
    fn verbose_is_counted() {
        let cli = parse(&["weather-widget", "-vv", "theme"]).unwrap();
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.command, Some(Command::Theme)));
    }

    #[test]
    fn configure_parses() {
        let cli = parse(&["weather-widget", "configure"]).unwrap();
        assert!(matches!(cli.command, Some(Command::Configure)));
    }
}
