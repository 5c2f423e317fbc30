use anyhow::*;
use clap::{Parser, Subcommand};
use serde::Serialize;
use serde_json::json;
use std::fs::File;
use std::io::{self, BufWriter};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use mcq_bank::bank::page::{DEFAULT_LIMIT, DEFAULT_PAGE};
use mcq_bank::export::write_csv;
use mcq_bank::{PageRequest, QuestionBank};

mod config;

use crate::config::{Config, DATA_DIR_ENV};

#[derive(Debug, Parser)]
#[command(name = "mcq-bank", about = "Browse multiple-choice question datasets")]
struct Cli {
    /// Directory holding the "<count> <Topic> MCQs.json" dataset files
    #[arg(long, global = true, env = DATA_DIR_ENV)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List every available topic
    Topics,
    /// Find topics whose name contains the query
    Search { query: String },
    /// Print one page of questions for a topic
    Questions {
        topic: String,
        #[arg(long, default_value_t = DEFAULT_PAGE)]
        page: usize,
        #[arg(long, default_value_t = DEFAULT_LIMIT)]
        limit: usize,
    },
    /// Write every usable question of a topic as CSV
    Export {
        topic: String,
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn run(cli: Cli) -> Result<()> {
    let config = Config::resolve(cli.data_dir)?;
    let bank = QuestionBank::new(config.data_dir);

    match cli.command {
        Command::Topics => {
            let catalog = bank.list_topics();
            if !catalog.is_available() {
                info!(dir = ?bank.data_dir(), "No dataset directory, catalog is empty");
            }
            let topics = catalog.topics();
            print_json(&json!({ "count": topics.len(), "topics": topics }))
        }
        Command::Search { query } => {
            let topics = bank.search_topics(&query)?;
            print_json(&json!({ "count": topics.len(), "topics": topics }))
        }
        Command::Questions { topic, page, limit } => {
            let page = bank
                .questions_page(&topic, PageRequest { page, limit })
                .with_context(|| format!("Could not load questions for {:?}", topic))?;
            print_json(&page)
        }
        Command::Export { topic, output } => {
            let resolved = bank.resolve_topic(&topic)?;
            let questions = bank.usable_questions(&resolved)?;
            match output {
                Some(path) => {
                    let file = File::create(&path)
                        .with_context(|| format!("Could not create {:?}", path))?;
                    write_csv(&questions, BufWriter::new(file))?;
                    info!(?path, count = questions.len(), "Exported {}", resolved.name);
                }
                None => write_csv(&questions, io::stdout().lock())?,
            }
            Ok(())
        }
    }
}

fn main() {
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    if let Err(e) = run(Cli::parse()) {
        eprintln!("{:#}", e);
        std::process::exit(1);
    }
}
