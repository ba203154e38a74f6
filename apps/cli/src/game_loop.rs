//! Text rendition of the sorting game: `<item> <bin>` stands in for a drag and drop.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use client_core::{
    sorting::WIN_MESSAGE, DropOutcome, SessionState, SortingError, SortingSession,
};
use rand::Rng;
use shared::domain::{BinCategory, ItemId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameCommand {
    Drop { item_id: ItemId, target: BinCategory },
    Show,
    Restart,
    Help,
    Quit,
    Invalid(String),
}

pub fn parse_game_command(line: &str) -> GameCommand {
    let line = line.trim();
    match line.to_ascii_lowercase().as_str() {
        "" | "show" | "list" => return GameCommand::Show,
        "restart" | "r" => return GameCommand::Restart,
        "help" | "?" => return GameCommand::Help,
        "quit" | "q" | "exit" => return GameCommand::Quit,
        _ => {}
    }

    let Some((item, bin)) = line.split_once(char::is_whitespace) else {
        return GameCommand::Invalid(format!("expected '<item> <bin>', got '{line}'"));
    };
    let Ok(item_id) = item.trim_start_matches('#').parse::<i64>() else {
        return GameCommand::Invalid(format!("'{item}' is not an item number"));
    };
    match bin.parse::<BinCategory>() {
        Ok(target) => GameCommand::Drop {
            item_id: ItemId(item_id),
            target,
        },
        Err(err) => GameCommand::Invalid(err.to_string()),
    }
}

pub fn render_board<G: Rng>(session: &SortingSession<G>) -> String {
    let mut board = format!("Score: {}\n", session.score());
    for item in session.active_items() {
        board.push_str(&format!(
            "  [{}] {} {}\n",
            item.item_id, item.icon, item.description
        ));
    }
    let bins: Vec<&str> = BinCategory::ALL.iter().map(|bin| bin.label()).collect();
    board.push_str(&format!("Bins: {}", bins.join(" | ")));
    board
}

const HELP: &str = "Sort each item into its bin, e.g. '3 plastic' or '12 Paper Bin'.\n  show     list the remaining items\n  restart  deal a new round\n  quit     leave";

/// Runs the game until `quit` or end of input. Starts a round if none is running.
pub fn run<G: Rng, R: BufRead, W: Write>(
    session: &mut SortingSession<G>,
    input: R,
    out: &mut W,
) -> Result<()> {
    if session.state() == SessionState::NotStarted {
        session.start();
    }
    writeln!(out, "Recycling Sorting Game\nDrag the item into the correct bin")?;
    writeln!(out, "{}", render_board(session))?;

    for line in input.lines() {
        let line = line.context("failed to read game input")?;
        match parse_game_command(&line) {
            GameCommand::Quit => break,
            GameCommand::Help => writeln!(out, "{HELP}")?,
            GameCommand::Show => writeln!(out, "{}", render_board(session))?,
            GameCommand::Invalid(reason) => writeln!(out, "{reason}")?,
            GameCommand::Restart => {
                session.start();
                writeln!(out, "{}", render_board(session))?;
            }
            GameCommand::Drop { item_id, target } => {
                match session.drop_item(item_id, target) {
                    Ok(outcome) => {
                        if let Some(feedback) = session.feedback() {
                            writeln!(out, "{feedback}")?;
                        }
                        if let DropOutcome::Correct { won: true, .. } = outcome {
                            writeln!(out, "{WIN_MESSAGE}")?;
                            writeln!(out, "Type 'restart' to play again or 'quit' to leave.")?;
                        } else {
                            writeln!(out, "{}", render_board(session))?;
                        }
                    }
                    Err(SortingError::NotInProgress(SessionState::Won)) => {
                        writeln!(out, "This round is over. Type 'restart' to play again.")?;
                    }
                    Err(err) => writeln!(out, "{err}")?,
                }
            }
        }
    }

    out.flush()?;
    Ok(())
}

#[cfg(test)]
#[path = "tests/game_loop_tests.rs"]
mod tests;
