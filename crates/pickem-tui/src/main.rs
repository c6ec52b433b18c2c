// Pick'em entry point.
//
// Startup sequence:
// 1. Initialize tracing (log to file, not terminal)
// 2. Parse the command line
// 3. Load config
// 4. Open database
// 5. Run the command

use pickem_core::config;
use pickem_core::db::Database;
use pickem_tui::cli::Cli;
use pickem_tui::commands;

use anyhow::Context;
use clap::Parser;
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Initialize tracing (log to file, not terminal)
    init_tracing()?;

    // 2. Parse the command line
    let cli = Cli::parse();
    info!("pickem starting: {:?}", cli.command);

    // 3. Load config
    let config = config::load_config().context("failed to load configuration")?;
    info!(
        "Config loaded: season={}, classification={}, {} picks per player",
        config.season.year,
        config.season.classification,
        config.schedule.total()
    );

    // 4. Open database
    let db_path = config.database_path()?;
    if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    let db_path_str = db_path.to_string_lossy();
    let db = Database::open(&db_path_str).context("failed to open database")?;
    info!("Database opened at {}", db_path.display());

    // 5. Run the command
    let mut stdout = std::io::stdout();
    if let Err(e) = commands::execute(cli.command, &config, &db, &mut stdout).await {
        error!("command failed: {e:#}");
        return Err(e);
    }

    info!("pickem finished");
    Ok(())
}

/// Initialize tracing to log to a file (not the terminal, which is used by the TUI).
fn init_tracing() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let log_dir = std::env::current_dir()?.join("logs");
    std::fs::create_dir_all(&log_dir)?;

    let log_file = std::fs::File::create(log_dir.join("pickem.log"))?;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("pickem=info,warn")),
        )
        .with_writer(log_file)
        .with_ansi(false)
        .with_target(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}
