use std::fs::{self, OpenOptions};
use std::sync::{Arc, Mutex};

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use current_state::app::App;
use current_state::cli::Cli;
use current_state::core::{HostProbe, SystemMetricProvider};
use current_state::utils::{AppConfig, APP_DIR_NAME, LOG_ENV_VAR, LOG_FILE_NAME};

#[tokio::main]
async fn main() {
    init_logging();

    if let Err(e) = run().await {
        tracing::error!(error = %format!("{:#}", e), "fatal error");
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let _cli = Cli::parse();

    let config = AppConfig::load()?;
    tracing::info!(
        refresh_interval = ?config.refresh_interval,
        disk_path = %config.disk_path.display(),
        "configuration loaded"
    );

    let provider = SystemMetricProvider::new(HostProbe::new(), config.disk_path.clone());
    let mut app = App::new(Arc::new(config), Arc::new(provider));
    app.run().await
}

/// Log to a file under the cache dir; stdout belongs to the terminal UI.
/// Logging stays off if the file cannot be opened.
fn init_logging() {
    let Some(dir) = dirs::cache_dir().map(|d| d.join(APP_DIR_NAME)) else {
        return;
    };
    if fs::create_dir_all(&dir).is_err() {
        return;
    }
    let Ok(file) = OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join(LOG_FILE_NAME))
    else {
        return;
    };

    let filter = EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .try_init();
}
