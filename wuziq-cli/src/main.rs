//! WuziQ CLI - Command-line interface
//!
//! Commands:
//! - play: Play in the terminal, optionally against the computer
//! - serve: Start the HTTP server for the browser board

mod input;
mod persist;
mod play;
mod render;
mod serve;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "wuziq")]
#[command(about = "Connect-five (Gomoku) with a heuristic opponent")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a game in the terminal
    Play(play::PlayArgs),
    /// Start the web server
    Serve(serve::ServerArgs),
}

fn main() -> anyhow::Result<()> {
    // Logs go to stderr; stdout carries the board
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Play(args) => play::run(args),
        Commands::Serve(args) => serve::run(args),
    }
}
