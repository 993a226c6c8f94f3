mod commands;
mod config;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::output::OutputFormat;

#[derive(Parser)]
#[command(name = "gbomb")]
#[command(about = "Browse Giant Bomb videos, games and podcasts")]
struct Cli {
    /// Output format: table or json
    #[arg(long, default_value = "table", global = true)]
    output: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List videos, newest first
    Videos(commands::videos::VideosArgs),
    /// Show a single game
    Game(commands::game::GameArgs),
    /// Search games by name
    Search(commands::search::SearchArgs),
    /// List the episodes of a podcast feed
    Podcast(commands::podcast::PodcastArgs),
    /// Download a video, image or podcast episode
    Download(commands::download::DownloadArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive("gbomb=info".parse()?),
        )
        .with_target(false)
        .init();

    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let format = match cli.output.as_str() {
        "json" => OutputFormat::Json,
        _ => OutputFormat::Table,
    };

    let invoker = config::Config::from_env()?.invoker()?;

    // Ctrl-C aborts a pending rate limiter wait.
    let cancel = invoker.cancellation_token().clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            cancel.cancel();
        }
    });

    match &cli.command {
        Commands::Videos(args) => commands::videos::run(args, &invoker, &format).await?,
        Commands::Game(args) => commands::game::run(args, &invoker, &format).await?,
        Commands::Search(args) => commands::search::run(args, &invoker, &format).await?,
        Commands::Podcast(args) => commands::podcast::run(args, &invoker, &format).await?,
        Commands::Download(args) => commands::download::run(args, &invoker).await?,
    }

    Ok(())
}
