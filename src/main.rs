//! Command-line entry point for the library mirror.
//!
//! Wires the HTTP client, the remote connector, the SQLite catalog store,
//! and the sync engine together, then dispatches the chosen subcommand.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use core_catalog::{
    create_pool, DatabaseConfig, SqliteSettingsStore, SqliteThumbnailRepository,
    SqliteVideoRepository,
};
use host_reqwest::ReqwestHttpClient;
use host_traits::{SettingsStore, SystemClock};
use provider_bunny::BunnyConnector;
use std::sync::Arc;
use std::time::Duration;
use sync_engine::{keys, spawn_periodic_sync, SyncEngine, DEFAULT_SYNC_INTERVAL};
use tracing::info;

#[derive(Parser)]
#[command(name = "bunny-mirror", version, about = "Mirror a Bunny Stream video library into a local catalog")]
struct Cli {
    /// Path to the SQLite catalog database
    #[arg(long, env = "BUNNY_MIRROR_DB", default_value = "bunny-mirror.db")]
    database: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Store the account API key and library id
    Configure {
        /// Account-level API key
        #[arg(long)]
        api_key: String,
        /// Id of the library to mirror
        #[arg(long)]
        library_id: String,
    },
    /// Run a single sync pass and exit
    Sync,
    /// Sync on a fixed schedule until interrupted
    Daemon {
        /// Minutes between syncs
        #[arg(long, default_value_t = DEFAULT_SYNC_INTERVAL.as_secs() / 60)]
        interval_minutes: u64,
    },
    /// Show catalog counts and the last sync time
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();

    let pool = create_pool(DatabaseConfig::new(&cli.database))
        .await
        .with_context(|| format!("failed to open catalog database at {}", cli.database))?;

    let settings = Arc::new(SqliteSettingsStore::new(pool.clone()));
    let videos = Arc::new(SqliteVideoRepository::new(pool.clone()));
    let thumbnails = Arc::new(SqliteThumbnailRepository::new(pool));
    let http = Arc::new(ReqwestHttpClient::new());
    let catalog = Arc::new(BunnyConnector::new(http));

    let engine = Arc::new(SyncEngine::new(
        catalog,
        settings.clone(),
        videos,
        thumbnails,
        Arc::new(SystemClock),
    ));

    match cli.command {
        Command::Configure {
            api_key,
            library_id,
        } => {
            settings
                .set_string(keys::API_KEY, &api_key)
                .await
                .context("failed to store api key")?;
            settings
                .set_string(keys::LIBRARY_ID, &library_id)
                .await
                .context("failed to store library id")?;
            // A new library means the cached scoped key may be stale;
            // the next run re-resolves it.
            println!("Configured library {}", library_id);
        }
        Command::Sync => {
            let report = engine.run_sync().await.context("sync failed")?;
            println!("{}", report.summary());
            if report.deleted > 0 {
                println!("Deleted: {}", report.deleted);
            }
        }
        Command::Daemon { interval_minutes } => {
            let interval = Duration::from_secs(interval_minutes * 60);
            info!(interval_minutes, "starting sync daemon");
            let handle = spawn_periodic_sync(engine, interval);
            tokio::signal::ctrl_c()
                .await
                .context("failed to listen for shutdown signal")?;
            handle.abort();
            info!("sync daemon stopped");
        }
        Command::Status => {
            let count = engine.record_count().await.context("failed to count records")?;
            let last = engine.last_sync().await.context("failed to read last sync")?;
            println!("Records: {}", count);
            match last {
                Some(ts) => println!("Last sync: {}", ts),
                None => println!("Last sync: never"),
            }
        }
    }

    Ok(())
}
