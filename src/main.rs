// Only compile UI module when TUI feature is enabled
#[cfg(feature = "tui")]
mod ui;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use skill_tracker::{logging, AppConfig, WidgetCatalog};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "skill-tracker", about = "Track skills with pinned widgets", version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Config file (defaults to the platform config dir)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive terminal UI (default)
    Tui,

    /// Print the widget catalog
    Catalog {
        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::load_or_default(cli.config.as_deref()).context("Failed to load config")?;

    match cli.command.unwrap_or(Commands::Tui) {
        Commands::Tui => run_ui_mode(&config, cli.debug),
        Commands::Catalog { json } => {
            logging::init_stdout_logging(&config, cli.debug);
            print_catalog(json)
        }
    }
}

fn print_catalog(json: bool) -> Result<()> {
    let templates = WidgetCatalog::templates();

    if json {
        println!("{}", serde_json::to_string_pretty(templates)?);
        return Ok(());
    }

    println!("{:<18} {:<20} {:<10} {:<8} Description", "Id", "Name", "Tag", "Kind");
    for t in templates {
        println!(
            "{:<18} {:<20} {:<10} {:<8} {}",
            t.id,
            t.name,
            t.tag.display_name(),
            format!("{:?}", t.kind),
            t.description
        );
    }
    Ok(())
}

#[cfg(feature = "tui")]
fn run_ui_mode(config: &AppConfig, debug: bool) -> Result<()> {
    use skill_tracker::TrackedWidgetStore;
    use tracing::info;

    let (_guard, log_path) = logging::init_file_logging(config, debug);
    info!(version = skill_tracker::VERSION, "starting terminal UI");

    let mut app = ui::App::new(TrackedWidgetStore::new());
    ui::run_ui(&mut app)?;

    info!(widgets = app.store.len(), "terminal UI closed");
    if debug {
        println!("Log written to {}", log_path.display());
    }
    Ok(())
}

#[cfg(not(feature = "tui"))]
fn run_ui_mode(_config: &AppConfig, _debug: bool) -> Result<()> {
    eprintln!("❌ TUI mode not available!");
    eprintln!("   Rebuild with: cargo build --features tui");
    eprintln!("   Or list widgets with: skill-tracker catalog");
    std::process::exit(1);
}
