//! Interactive chat over stdin/stdout.

use std::path::PathBuf;

use anyhow::{Context, Result};
use client_core::{chat::TYPING_INDICATOR, ChatSession};
use shared::protocol::{ChatEvent, ChatMessage, ImageRef, MessageOrigin};
use tokio::{
    io::{AsyncBufReadExt, BufReader},
    sync::mpsc,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatInput {
    Text(String),
    Image(PathBuf),
    Suggest(String),
    Help,
    Quit,
    Usage(&'static str),
}

pub fn parse_chat_input(line: &str) -> ChatInput {
    let line = line.trim();
    let (command, rest) = match line.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim()),
        None => (line, ""),
    };

    match command {
        "/quit" | "/exit" => ChatInput::Quit,
        "/help" => ChatInput::Help,
        "/image" if rest.is_empty() => ChatInput::Usage("usage: /image <path>"),
        "/image" => ChatInput::Image(PathBuf::from(rest)),
        "/suggest" => ChatInput::Suggest(rest.to_string()),
        _ => ChatInput::Text(line.to_string()),
    }
}

pub fn render_message(message: &ChatMessage) -> String {
    let speaker = match message.origin {
        MessageOrigin::Bot => "GreenKaki",
        MessageOrigin::User => "You",
    };
    match (&message.content, &message.image) {
        (Some(text), _) => format!("{speaker}: {text}"),
        (None, Some(image)) => format!("{speaker}: [image {}]", image.path.display()),
        (None, None) => format!("{speaker}:"),
    }
}

const HELP: &str = "Type an item to ask where it goes.\n  /image <path>   ask about a photo\n  /suggest <text> list known items\n  /quit           leave";

pub async fn run(mut session: ChatSession, mut events: mpsc::UnboundedReceiver<ChatEvent>) -> Result<()> {
    for message in session.messages() {
        println!("{}", render_message(message));
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("failed to read from stdin")? else {
                    break;
                };
                match parse_chat_input(&line) {
                    ChatInput::Quit => break,
                    ChatInput::Help => println!("{HELP}"),
                    ChatInput::Usage(usage) => println!("{usage}"),
                    ChatInput::Suggest(text) => print_suggestions(&session, &text),
                    ChatInput::Image(path) => {
                        session.send_image(ImageRef::new(path));
                        println!("{TYPING_INDICATOR}");
                    }
                    ChatInput::Text(text) => {
                        if session.send_text(&text).is_some() {
                            println!("{TYPING_INDICATOR}");
                        }
                    }
                }
            }
            Some(event) = events.recv() => apply_and_print(&mut session, event),
        }
    }

    // Let replies that are already scheduled arrive before leaving.
    while session.is_bot_typing() {
        match events.recv().await {
            Some(event) => apply_and_print(&mut session, event),
            None => break,
        }
    }

    Ok(())
}

fn apply_and_print(session: &mut ChatSession, event: ChatEvent) {
    let before = session.messages().len();
    session.apply(event);
    for message in &session.messages()[before..] {
        println!("{}", render_message(message));
    }
}

fn print_suggestions(session: &ChatSession, text: &str) {
    let suggestions = session.suggestions(text);
    if suggestions.is_empty() {
        println!("No suggestions for '{text}'.");
    } else {
        println!("Try: {}", suggestions.join(", "));
    }
}

#[cfg(test)]
#[path = "tests/chat_loop_tests.rs"]
mod tests;
