//! Main entry point for the housekeeper binary
//!
//! Opens the document store and runs the duty rotation scheduler until
//! Ctrl+C, or performs a single rotation tick with `--once`.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tokio::signal;

use housekeeper::{
    DutyScheduler, DutyStore, FileStore, HouseResult, InMemoryStore, ServiceConfig, TickSchedule,
};
use shared::{Component, component_info, component_warn, logging};

/// Background service for shared households
#[derive(Parser)]
#[command(name = "housekeeper")]
#[command(about = "Rotates room duties on schedule over a persistent document store")]
pub struct Args {
    /// Directory holding the JSON snapshot (in-memory only when omitted)
    #[arg(long, env = "HOUSEKEEPER_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "HOUSEKEEPER_LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// UTC time of the daily rotation (HH:MM)
    #[arg(long, env = "HOUSEKEEPER_TICK_AT", default_value = "00:00")]
    pub tick_at: String,

    /// Rotate every N seconds instead of daily
    #[arg(long, env = "HOUSEKEEPER_TICK_EVERY_SECS")]
    pub tick_every_secs: Option<u64>,

    /// Run one rotation tick and exit
    #[arg(long)]
    pub once: bool,
}

#[tokio::main]
async fn main() -> HouseResult<()> {
    dotenv::dotenv().ok();
    let args = Args::parse();

    let config = ServiceConfig::from_parts(
        args.data_dir,
        &args.log_level,
        &args.tick_at,
        args.tick_every_secs,
        args.once,
    )?;
    logging::init_tracing_with_level(Some(&config.log_level));

    match &config.data_dir {
        Some(dir) => {
            let store = FileStore::open(dir).await?;
            component_info!(Component::Store, "📂 Using snapshot {}", store.path().display());
            run(Arc::new(store), &config).await
        }
        None => {
            component_warn!(Component::Store, "No data directory given, documents are kept in memory only");
            run(Arc::new(InMemoryStore::new()), &config).await
        }
    }
}

async fn run<D: DutyStore + 'static>(store: Arc<D>, config: &ServiceConfig) -> HouseResult<()> {
    let mut scheduler = DutyScheduler::new(store, config.schedule);

    if config.run_once {
        let report = scheduler.tick().await?;
        logging::log_success(
            Component::Scheduler,
            &format!("Single tick done, {} room(s) rotated", report.rotated.len()),
        );
        return Ok(());
    }

    match config.schedule {
        TickSchedule::Daily { at } => logging::log_progress(Component::Service, "Schedule", &format!("daily at {at} UTC")),
        TickSchedule::Every(interval) => {
            logging::log_progress(Component::Service, "Schedule", &format!("every {}s", interval.as_secs()))
        }
    }

    // Set up graceful shutdown
    let shutdown_sender = scheduler.get_shutdown_sender();
    tokio::spawn(async move {
        match signal::ctrl_c().await {
            Ok(()) => {
                logging::log_shutdown(Component::Service, "Received Ctrl+C signal");
                let _ = shutdown_sender.send(()).await;
            }
            Err(err) => {
                logging::log_error(Component::Service, "Signal handling", &err);
            }
        }
    });

    scheduler.run().await?;

    logging::log_success(Component::Service, "Housekeeper stopped gracefully");
    Ok(())
}
