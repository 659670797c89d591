use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

use crate::application::HabitService;
use crate::config::Config;
use crate::http;

/// Habit Ledger - self-hosted habit tracking
#[derive(Parser)]
#[command(name = "habitledger")]
#[command(about = "A self-hosted habit tracker with a small web UI and JSON API")]
#[command(version)]
pub struct Cli {
    /// Database file path (overrides HABITS_DB_PATH)
    #[arg(short, long)]
    pub database: Option<String>,

    /// Port to listen on (overrides HABITS_PORT)
    #[arg(short, long)]
    pub port: Option<u16>,
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        fmt().with_env_filter(EnvFilter::from_default_env()).init();

        let mut config = Config::load();
        if let Some(database) = self.database {
            config.database_path = database;
        }
        if let Some(port) = self.port {
            config.port = port;
        }

        info!("Opening database at {}", config.database_path);
        let service = HabitService::init(&config.database_path).await?;

        http::serve(Arc::new(service), config.port).await
    }
}
