//! FleetPulse - Simulated Device Health Monitor
//!
//! Simulates a fleet of network devices, polls their status feed, and
//! serves availability statistics and a system-metrics timeline.

mod config;
mod db;
mod poller;
mod report;
mod sim;
mod web;

use config::ServerConfig;
use db::Store;
use poller::{Poller, PollerConfig};
use web::Server;

use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env()
            .add_directive("fleetpulse=info".parse()?))
        .init();

    // Load configuration
    let cfg = ServerConfig::load();
    tracing::info!("Starting FleetPulse on port {}...", cfg.http_port);
    tracing::info!("Using database at {}", cfg.db_path);

    // Build the simulated fleet. Count and availability come from
    // external input, so they are validated here and a bad value is
    // fatal before anything is spawned.
    let count = sim::parse_count(&cfg.device_count)?;
    let availability = match cfg.availability.as_deref() {
        Some(raw) => sim::parse_availability(raw)?,
        None => None,
    };

    let mut rng = rand::thread_rng();
    let fleet = sim::generate(
        count,
        sim::DEFAULT_NAME_POOL,
        &cfg.address_prefix,
        availability,
        &mut rng,
    )?;
    tracing::info!("Generated fleet of {} devices", fleet.len());
    let fleet = Arc::new(fleet);

    // Initialize database
    let store = Arc::new(Store::new(&cfg.db_path)?);
    tracing::info!("Database initialized successfully");

    // Start the status poller
    let poller = Poller::new(store.clone());
    poller
        .start(PollerConfig {
            url: cfg.device_api_url(),
            interval: Duration::from_secs_f64(cfg.poll_interval_secs),
            timeout: Duration::from_secs_f64(cfg.poll_timeout_secs),
        })
        .await?;

    // Start web server
    let server = Server::new(cfg, store, fleet);
    server.start().await?;

    Ok(())
}
