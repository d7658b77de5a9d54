//! Serve command - start the web server
//!
//! ## Architecture
//!
//! - Level 1: run() - orchestration
//! - Level 2: configure_server(), start_server()
//! - Level 3: configuration validation

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Args;

use wuziq_core::{DEFAULT_BOARD_SIZE, MIN_BOARD_SIZE};
use wuziq_server::{run_server, ServerConfig};

// ============================================================================
// COMMAND ARGUMENTS
// ============================================================================

#[derive(Args)]
pub struct ServerArgs {
    /// Port number to listen on
    #[arg(long, default_value = "8000")]
    pub port: u16,

    /// Directory containing the static board page
    #[arg(long, default_value = "static")]
    pub static_dir: PathBuf,

    /// Board size for new sessions
    #[arg(long, default_value_t = DEFAULT_BOARD_SIZE)]
    pub board_size: usize,

    /// Largest board a client may request
    #[arg(long, default_value = "25")]
    pub max_board_size: usize,

    /// Most games kept in memory at once
    #[arg(long, default_value = "1024")]
    pub max_sessions: usize,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run serve command
pub fn run(args: ServerArgs) -> Result<()> {
    let config = configure_server(&args)?;

    tracing::info!("Starting WuziQ server on port {}", config.port);

    start_server(config)
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// Configure server from command arguments
fn configure_server(args: &ServerArgs) -> Result<ServerConfig> {
    validate_static_dir(&args.static_dir)?;
    validate_sizes(args.board_size, args.max_board_size)?;
    if args.max_sessions == 0 {
        anyhow::bail!("--max-sessions must be at least 1");
    }

    Ok(ServerConfig {
        port: args.port,
        static_dir: args.static_dir.to_string_lossy().to_string(),
        default_board_size: args.board_size,
        max_board_size: args.max_board_size,
        max_sessions: args.max_sessions,
    })
}

/// Start the server (blocking)
fn start_server(config: ServerConfig) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;

    runtime.block_on(async { run_server(config).await })
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

/// Validate that static directory exists
fn validate_static_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        tracing::warn!(
            "Static directory does not exist: {}. Only the JSON API will be served.",
            path.display()
        );
    } else if !path.is_dir() {
        anyhow::bail!(
            "Static path exists but is not a directory: {}",
            path.display()
        );
    }

    Ok(())
}

fn validate_sizes(board_size: usize, max_board_size: usize) -> Result<()> {
    if board_size < MIN_BOARD_SIZE {
        anyhow::bail!("--board-size must be at least {}", MIN_BOARD_SIZE);
    }
    if board_size > max_board_size {
        anyhow::bail!(
            "--board-size {} is larger than --max-board-size {}",
            board_size,
            max_board_size
        );
    }
    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================
