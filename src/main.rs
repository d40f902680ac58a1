use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use autotyper::config::Settings;
use autotyper::error::AutoTyperError;
use autotyper::injector::TextInjector;
use autotyper::sequencer::{self, TypingRequest};

#[derive(Parser)]
#[command(name = "autotyper")]
#[command(version)]
#[command(about = "Types text into the focused window after a delay", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Type text into the currently focused window after the start delay
    Type {
        /// The text to type
        text: String,

        /// Override the saved start delay, in seconds (1.0 to 5.0)
        #[arg(long, value_name = "SECONDS")]
        start_delay: Option<f64>,

        /// Override the saved per-keystroke delay, in seconds (0.0 to 0.1)
        #[arg(long, value_name = "SECONDS")]
        char_delay: Option<f64>,
    },
    /// Show or change the persisted settings
    Settings {
        #[command(subcommand)]
        action: SettingsCommand,
    },
}

#[derive(Subcommand)]
enum SettingsCommand {
    /// Print every setting and its current value
    Show,
    /// Change one setting and save the file
    Set {
        /// Setting key (run 'settings show' for the list)
        key: String,
        /// New value
        value: String,
    },
    /// Restore every setting to its default value
    Reset,
    /// Print the settings file location
    Path,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    match Cli::parse().command {
        Command::Type {
            text,
            start_delay,
            char_delay,
        } => run_type(&text, start_delay, char_delay),
        Command::Settings { action } => run_settings(action),
    }
}

fn run_type(text: &str, start_delay: Option<f64>, char_delay: Option<f64>) -> Result<()> {
    let mut settings = Settings::load();

    // Overrides go through the same validation as the settings editor but
    // are never written back.
    if let Some(secs) = start_delay {
        settings.set("start_delay", &secs.to_string())?;
    }
    if let Some(secs) = char_delay {
        settings.set("delay", &secs.to_string())?;
    }

    let request = match TypingRequest::new(text, &settings) {
        Ok(request) => request,
        Err(AutoTyperError::EmptyText) => {
            eprintln!(
                "{}",
                "⚠️  No text entered. There is nothing to type.".yellow()
            );
            std::process::exit(1);
        }
        Err(err) => return Err(err.into()),
    };

    let injector = TextInjector::new()?;

    println!(
        "{}",
        format!(
            "⌛ Typing starts in {:.1}s. Focus the target window now.",
            request.start_delay.as_secs_f64()
        )
        .cyan()
    );

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let local = tokio::task::LocalSet::new();
    local.block_on(&rt, async move {
        let mut handle = sequencer::spawn(injector, request);
        handle.completed().await;
        println!("{}", "✔ Text written successfully!".green());
        handle.drained().await;
    });

    Ok(())
}

fn run_settings(action: SettingsCommand) -> Result<()> {
    match action {
        SettingsCommand::Show => {
            let settings = Settings::load();
            for (key, value) in settings.entries() {
                println!("{}  {value}", format!("{key:>13}").bold());
            }
        }
        SettingsCommand::Set { key, value } => {
            let mut settings = Settings::load();
            settings.set(&key, &value)?;
            persist(&settings);
            println!("{} {key} = {}", "✔ Saved:".green(), settings.get(&key)?);
        }
        SettingsCommand::Reset => {
            persist(&Settings::default());
            println!("{}", "✔ Settings restored to defaults".green());
        }
        SettingsCommand::Path => {
            println!("{}", Settings::default_path().display());
        }
    }
    Ok(())
}

/// Write the full record, reporting a failed save without touching the
/// in-memory value.
fn persist(settings: &Settings) {
    if let Err(err) = settings.save() {
        eprintln!("{}", format!("✖ Failed to save settings: {err}").red());
        std::process::exit(1);
    }
}
