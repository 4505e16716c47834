//! Claude Code PermissionRequest hook.
//!
//! Reads one permission request from stdin, races the Telegram approval
//! prompt against the local monitor dashboard socket, and writes the
//! winning decision to stdout. No output means no channel answered, which
//! lets the CLI fall back to its own permission dialog.

mod session;

use std::io::Read;
use std::path::PathBuf;

use clap::Parser;
use hook_config_and_utils::{init_logging, Config, Paths};
use session::SessionLifecycle;

/// Permission hook command-line interface.
#[derive(Parser)]
#[command(name = "claude-permission-hook")]
#[command(about = "Races remote and local approval channels for Claude Code permission requests")]
#[command(version)]
struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Base directory for monitor files (.env, sessions). Defaults to ~/.claude/monitor
    #[arg(long)]
    base_dir: Option<PathBuf>,

    /// Dashboard socket address. Defaults to /tmp/claude-monitor.sock
    #[arg(long)]
    socket_path: Option<PathBuf>,

    /// Global race timeout in seconds
    #[arg(long)]
    timeout_secs: Option<u64>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(&cli.log_level);

    let paths = match cli.base_dir {
        Some(base) => Paths::with_base_dir(base),
        None => Paths::new()?,
    };
    let mut config = Config::load(&paths)?;
    if let Some(socket_path) = cli.socket_path {
        config.socket_path = socket_path;
    }
    if let Some(timeout_secs) = cli.timeout_secs {
        config.timeout_secs = timeout_secs;
    }

    let mut raw_request = String::new();
    std::io::stdin().read_to_string(&mut raw_request)?;

    let lifecycle = SessionLifecycle::new(config, &paths);
    if let Some(output) = lifecycle.handle(&raw_request).await? {
        println!("{}", output.to_json()?);
    }

    Ok(())
}
