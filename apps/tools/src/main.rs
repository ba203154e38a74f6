use std::{fs, path::PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use knowledge::KnowledgeBase;
use shared::domain::BinCategory;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "kaki-tools", about = "Maintain GreenKaki recycling data files")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Validate a data file and summarise what it defines.
    CheckData { path: PathBuf },
    /// Write the built-in data as a TOML data file.
    ExportBuiltin {
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();
    let cli = Cli::parse();

    match cli.command {
        Command::CheckData { path } => {
            let knowledge = KnowledgeBase::load(&path)
                .with_context(|| format!("invalid data file '{}'", path.display()))?;
            println!("{} keyword entries", knowledge.entries().len());
            println!("{} sortable items", knowledge.items().len());
            for category in BinCategory::ALL {
                let count = knowledge
                    .items()
                    .iter()
                    .filter(|item| item.category == category)
                    .count();
                println!("  {category}: {count}");
            }
        }
        Command::ExportBuiltin { output } => {
            let raw = KnowledgeBase::builtin().to_toml_string()?;
            match output {
                Some(path) => {
                    fs::write(&path, raw)
                        .with_context(|| format!("failed to write '{}'", path.display()))?;
                    info!(path = %path.display(), "wrote built-in data file");
                }
                None => print!("{raw}"),
            }
        }
    }

    Ok(())
}
