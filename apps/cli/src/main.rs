use std::{io, path::PathBuf, sync::Arc};

use anyhow::Result;
use clap::{Parser, Subcommand};
use classifier::FileNameClassifier;
use client_core::{ChatSession, LookupResponder, SortingSession};
use knowledge::{KnowledgeBase, KnowledgeSource};
use rand::{rngs::StdRng, SeedableRng};
use shared::protocol::ChatMessage;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod chat_loop;
mod config;
mod game_loop;

use config::load_settings;

#[derive(Parser, Debug)]
#[command(name = "greenkaki", version, about = "Ask where things go, or practise sorting them")]
struct Cli {
    #[arg(long, default_value = "greenkaki.toml")]
    config: PathBuf,
    /// Recycling data file; overrides the config file and environment.
    #[arg(long)]
    data: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Chat with GreenKaki on stdin/stdout.
    Chat {
        #[arg(long)]
        reply_delay_ms: Option<u64>,
    },
    /// Answer a single question and exit.
    Ask {
        #[arg(long)]
        json: bool,
        #[arg(required = true)]
        text: Vec<String>,
    },
    /// List known items matching the text.
    Suggest { text: String },
    /// Play the sorting game.
    Sort {
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long)]
        round_size: Option<usize>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();
    let cli = Cli::parse();

    let mut settings = load_settings(&cli.config);
    if let Some(data) = cli.data {
        settings.data_path = Some(data);
    }

    let knowledge = KnowledgeBase::load_or_builtin(settings.data_path.as_deref());
    if let KnowledgeSource::File(path) = knowledge.source() {
        info!(path = %path.display(), "using recycling data file");
    }
    let responder = Arc::new(LookupResponder::from_knowledge(&knowledge));

    match cli.command {
        Command::Chat { reply_delay_ms } => {
            if let Some(delay) = reply_delay_ms {
                settings.reply_delay_ms = delay;
            }
            let (session, events) = ChatSession::new(
                responder,
                Arc::new(FileNameClassifier::default()),
                settings.chat_options(),
            );
            chat_loop::run(session, events).await?;
        }
        Command::Ask { json, text } => {
            let reply = responder.respond(&text.join(" "));
            if json {
                println!("{}", serde_json::to_string_pretty(&ChatMessage::bot_text(reply))?);
            } else {
                println!("{reply}");
            }
        }
        Command::Suggest { text } => {
            for keyword in responder.suggestions(&text) {
                println!("{keyword}");
            }
        }
        Command::Sort { seed, round_size } => {
            let round_size = round_size.unwrap_or(settings.round_size);
            let rng = match seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };
            let mut session = SortingSession::with_rng(knowledge.items().to_vec(), round_size, rng)?;
            let stdin = io::stdin();
            game_loop::run(&mut session, stdin.lock(), &mut io::stdout())?;
        }
    }

    Ok(())
}
