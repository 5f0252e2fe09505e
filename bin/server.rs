// Skill Tracker - Placeholder Web Server
// Serves GET / with a static greeting

use anyhow::{Context, Result};
use clap::Parser;
use skill_tracker::{logging, server, AppConfig};
use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "skill-server", about = "Skill tracker placeholder backend", version)]
struct Cli {
    /// Config file (defaults to the platform config dir)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Address to bind, overrides the config file
    #[arg(short, long)]
    bind: Option<SocketAddr>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load_or_default(cli.config.as_deref()).context("Failed to load config")?;
    logging::init_stdout_logging(&config, cli.debug);

    let addr = match cli.bind {
        Some(addr) => addr,
        None => config.socket_addr()?,
    };

    server::serve(addr)
        .await
        .with_context(|| format!("Server on {} stopped", addr))
}
