use anyhow::{Context, Result};
use tokio::{
    io::{AsyncBufReadExt, BufReader},
    sync::mpsc::{self, Sender},
};

use crate::{
    about::AboutInfo,
    game::{DisplayUpdate, GameController, GameInput, GameObserver, SavedStateStore},
    settings::GameSettings,
};

const ENABLE_LOGS: bool = true;

use crate::{log_info, log_warn};

const HELP: &str = "Press Enter (or `t`) to tap, `a` for about, `q` to quit.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Tap,
    About,
    Quit,
    Unknown(String),
}

pub fn parse_command(line: &str) -> Command {
    match line.trim().to_ascii_lowercase().as_str() {
        "" | "t" | "tap" => Command::Tap,
        "a" | "about" | "?" => Command::About,
        "q" | "quit" | "exit" => Command::Quit,
        other => Command::Unknown(other.to_string()),
    }
}

/// Prints display updates to stdout.
pub struct ConsoleDisplay;

impl GameObserver for ConsoleDisplay {
    fn on_display(&mut self, update: DisplayUpdate) {
        match &update {
            DisplayUpdate::RoundFinished { .. } => println!("*** {update} ***"),
            _ => println!("{update}"),
        }
    }
}

/// Plays on the terminal until the user quits or stdin closes. Picks up the
/// round left in `saved_store` and leaves the current one there on exit.
pub async fn run_terminal(settings: GameSettings, saved_store: &SavedStateStore) -> Result<()> {
    let mut controller = GameController::new(settings, ConsoleDisplay);
    match saved_store.take() {
        Ok(saved) => controller.resume(saved),
        Err(err) => log_warn!("Ignoring saved state: {:#}", err),
    }

    println!("{HELP}");

    let (input_tx, input_rx) = mpsc::channel(32);
    let (saved, read_result) = tokio::join!(controller.run(input_rx), read_commands(input_tx));

    saved_store.put(&saved)?;
    log_info!("Saved round state for the next launch");
    read_result
}

async fn read_commands(input_tx: Sender<GameInput>) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines
        .next_line()
        .await
        .context("Failed to read from stdin")?
    {
        match parse_command(&line) {
            Command::Tap => {
                if input_tx.send(GameInput::Tap).await.is_err() {
                    break;
                }
            }
            Command::About => println!("{}", AboutInfo::current()),
            Command::Quit => break,
            Command::Unknown(other) => println!("Unknown command `{other}`. {HELP}"),
        }
    }

    let _ = input_tx.send(GameInput::Shutdown).await;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_commands() {
        assert_eq!(parse_command(""), Command::Tap);
        assert_eq!(parse_command("  T \n"), Command::Tap);
        assert_eq!(parse_command("about"), Command::About);
        assert_eq!(parse_command("Q"), Command::Quit);
        assert_eq!(parse_command("jump"), Command::Unknown("jump".into()));
    }
}
