//! review - draft, review and publish social posts from articles
//!
//! Main entry point for the `review` command-line tool.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use review_cli::commands;
use review_cli::{AppContext, ConfigLoader};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "review")]
#[command(about = "Turn an article into a social post, with a human approving every draft", long_about = None)]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Cli {
    /// Config file applied on top of ~/.review/review.toml and ./.review/review.toml
    #[arg(short, long, global = true, env = "REVIEW_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a first draft and wait for review
    Start {
        /// Article file; reads stdin when omitted
        file: Option<PathBuf>,

        /// Use this run id instead of generating one
        #[arg(long)]
        run_id: Option<String>,
    },

    /// Approve the current draft or ask for a revision
    Respond {
        /// Run id printed by `start`
        run_id: String,

        /// "approve" (or yes, ok, publish, y) to publish; anything else is revision feedback.
        /// Prompts interactively when omitted.
        feedback: Option<String>,
    },

    /// Show a run's state and outcome
    Status {
        run_id: String,

        /// Print the stored checkpoint as JSON
        #[arg(long)]
        json: bool,
    },

    /// List runs, most recently updated first
    List {
        /// Maximum number of runs to show
        #[arg(short, long)]
        limit: Option<usize>,

        /// Print summaries as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check the model server and publisher credentials
    Check,
}

fn init_tracing(default_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = ConfigLoader::new()
        .with_explicit_path(cli.config)
        .load()
        .await
        .context("Failed to load configuration")?;
    init_tracing(&config.logging.level);

    let context = AppContext::from_config(config).await?;
    let mut stdout = io::stdout().lock();

    match cli.command {
        Commands::Start { file, run_id } => {
            let article = commands::read_article(file.as_deref()).await?;
            commands::handle_start(&context, &article, run_id.as_deref(), &mut stdout).await
        }
        Commands::Respond { run_id, feedback } => {
            let mut stdin = io::stdin().lock();
            commands::handle_respond(&context, &run_id, feedback, &mut stdin, &mut stdout).await
        }
        Commands::Status { run_id, json } => {
            commands::handle_status(&context, &run_id, json, &mut stdout).await
        }
        Commands::List { limit, json } => commands::handle_list(&context, limit, json, &mut stdout).await,
        Commands::Check => commands::handle_check(&context, &mut stdout).await,
    }
}
