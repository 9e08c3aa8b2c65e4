// SPDX-License-Identifier: AGPL-3.0
// PetPals CLI - Main entry point
//
// Browse, favorite and adopt pets from the terminal.

mod commands;
mod state;

use clap::{Parser, Subcommand, ValueEnum};
use commands::{AddArgs, SettingsChange};
use petpals_core::{AppEvent, SwipeDirection};
use state::AppState;
use std::path::PathBuf;
use std::process::ExitCode;
use std::thread;

#[derive(Parser)]
#[command(name = "petpals", version, about = "Browse, favorite and adopt pets")]
struct Cli {
    /// Directory holding the storage file (defaults to the platform data dir)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List pets, optionally filtered
    List {
        /// Search by name, breed or species
        #[arg(short, long, default_value = "")]
        query: String,
        /// All, Dog, Cat or Rabbit
        #[arg(short, long, default_value = "All")]
        species: String,
    },
    /// Show a pet's profile
    Show { id: String },
    /// Add a pet of your own
    Add {
        #[arg(long, default_value = "")]
        name: String,
        #[arg(long, default_value = "")]
        age: String,
        #[arg(long, default_value = "")]
        breed: String,
        #[arg(long, default_value = "")]
        description: String,
        /// Dog, Cat, Rabbit, Bird or Other
        #[arg(long, default_value = "Dog")]
        species: String,
        /// Picture URI
        #[arg(long)]
        image: Option<String>,
    },
    /// Delete a pet you added
    Delete { id: String },
    /// Add or remove a favorite
    Favorite { id: String },
    /// List favorite pets
    Favorites,
    /// Pick a random favorite and celebrate its adoption
    Adopt {
        /// Seed for a reproducible pick
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Swipe through the built-in pets
    Swipe {
        #[arg(value_enum)]
        moves: Vec<SwipeMove>,
    },
    /// Show pets near a position
    Nearby {
        #[arg(long, allow_negative_numbers = true)]
        lat: Option<f64>,
        #[arg(long, allow_negative_numbers = true)]
        lon: Option<f64>,
    },
    /// Show or change settings
    Settings {
        #[command(subcommand)]
        action: Option<SettingsAction>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum SwipeMove {
    Like,
    Nope,
}

#[derive(Subcommand)]
enum SettingsAction {
    /// Toggle dark mode
    Theme,
    /// Change language (en, zh, ms, ta)
    Language { code: String },
    /// Turn notifications on or off
    Notifications {
        #[arg(value_enum)]
        state: OnOff,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum OnOff {
    On,
    Off,
}

fn main() -> ExitCode {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("petpals_cli=info".parse().unwrap())
                .add_directive("petpals_core=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let (app_state, events) = match AppState::new(cli.data_dir.as_deref()) {
        Ok(state) => state,
        Err(e) => {
            tracing::error!("Failed to initialize application state: {}", e);
            eprintln!("{}", e.user_message());
            return ExitCode::FAILURE;
        }
    };

    // Spawn event listener thread; ends once every notifier is dropped
    let listener = thread::spawn(move || {
        while let Ok(event) = events.recv_blocking() {
            match event {
                AppEvent::Notification(n) => println!("\u{1F514} {}: {}", n.title, n.body),
                AppEvent::Haptic(feedback) => tracing::debug!("Haptic feedback: {:?}", feedback),
            }
        }
    });

    let result = run(&app_state, cli.command);
    drop(app_state);
    let _ = listener.join();

    match result {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("Command failed: {}", e);
            eprintln!("{}", e.user_message());
            ExitCode::FAILURE
        }
    }
}

fn run(state: &AppState, command: Command) -> Result<String, petpals_core::AppError> {
    match command {
        Command::List { query, species } => commands::list(state, &query, &species),
        Command::Show { id } => commands::show(state, &id),
        Command::Add {
            name,
            age,
            breed,
            description,
            species,
            image,
        } => commands::add(
            state,
            AddArgs {
                name,
                age,
                breed,
                description,
                species,
                image,
            },
        ),
        Command::Delete { id } => commands::delete(state, &id),
        Command::Favorite { id } => commands::favorite(state, &id),
        Command::Favorites => commands::favorites(state),
        Command::Adopt { seed } => commands::adopt(state, seed),
        Command::Swipe { moves } => {
            let moves: Vec<SwipeDirection> = moves
                .into_iter()
                .map(|m| match m {
                    SwipeMove::Like => SwipeDirection::Like,
                    SwipeMove::Nope => SwipeDirection::Nope,
                })
                .collect();
            commands::swipe(state, &moves)
        }
        Command::Nearby { lat, lon } => commands::nearby(state, lat, lon),
        Command::Settings { action } => {
            let change = match action {
                None => SettingsChange::Show,
                Some(SettingsAction::Theme) => SettingsChange::ToggleTheme,
                Some(SettingsAction::Language { code }) => SettingsChange::Language(code),
                Some(SettingsAction::Notifications { state: on_off }) => {
                    SettingsChange::Notifications(matches!(on_off, OnOff::On))
                }
            };
            commands::settings(state, change)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_swipe_moves() {
        let cli = Cli::try_parse_from(["petpals", "swipe", "like", "nope"]).unwrap();
        match cli.command {
            Command::Swipe { moves } => assert_eq!(moves.len(), 2),
            _ => panic!("expected swipe"),
        }
    }
}
