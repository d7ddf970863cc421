//! Status poller.
//!
//! Periodically fetches the device status feed over HTTP, persists one
//! status record per device through a batched writer, and records one
//! operational log entry per fetch. A failed fetch is never dropped:
//! it is recorded as a failure with the real status code when one is
//! available, or 500 otherwise.

use crate::db::{Store, StatusRecord};
use crate::sim::StatusSample;

use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{broadcast, mpsc, Mutex};

const DEVICES_ENDPOINT: &str = "/devices";
const BATCH_FLUSH_LIMIT: usize = 500;

/// Poller configuration.
#[derive(Debug, Clone)]
pub struct PollerConfig {
    pub url: String,
    pub interval: Duration,
    pub timeout: Duration,
}

/// Background poller for the device status feed.
pub struct Poller {
    store: Arc<Store>,
    record_tx: mpsc::Sender<StatusRecord>,
    stop: Arc<Mutex<Option<broadcast::Sender<()>>>>,
}

impl Poller {
    /// Create a new poller and start its batch writer.
    pub fn new(store: Arc<Store>) -> Self {
        let (tx, rx) = mpsc::channel(1000);

        let store_clone = store.clone();
        tokio::spawn(run_batch_writer(rx, store_clone));

        Self {
            store,
            record_tx: tx,
            stop: Arc::new(Mutex::new(None)),
        }
    }

    /// Start the poll loop as a background task.
    pub async fn start(&self, config: PollerConfig) -> Result<(), reqwest::Error> {
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;

        let (stop_tx, mut stop_rx) = broadcast::channel(1);
        {
            let mut stop = self.stop.lock().await;
            *stop = Some(stop_tx);
        }

        let store = self.store.clone();
        let record_tx = self.record_tx.clone();

        tracing::info!(
            "Polling {} every {:?}",
            config.url,
            config.interval
        );

        tokio::spawn(async move {
            let mut interval = tokio::time::interval(config.interval);
            interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

            loop {
                tokio::select! {
                    _ = stop_rx.recv() => break,
                    _ = interval.tick() => {
                        poll_once(&client, &config.url, &store, &record_tx).await;
                    }
                }
            }
        });

        Ok(())
    }

    /// Stop the poll loop.
    pub async fn stop(&self) {
        let stop = self.stop.lock().await;
        if let Some(tx) = stop.as_ref() {
            let _ = tx.send(());
        }
    }
}

/// Fetch the status feed once and record the outcome.
async fn poll_once(
    client: &reqwest::Client,
    url: &str,
    store: &Store,
    record_tx: &mpsc::Sender<StatusRecord>,
) {
    match client.get(url).send().await {
        Ok(resp) => {
            let code = resp.status().as_u16();
            if resp.status().is_success() {
                match resp.json::<Vec<StatusSample>>().await {
                    Ok(samples) => {
                        let time = Utc::now();
                        for sample in samples {
                            let record = StatusRecord {
                                device_id: sample.id,
                                name: sample.name,
                                address: sample.address,
                                up: sample.up,
                                time,
                            };
                            if record_tx.send(record).await.is_err() {
                                tracing::error!("Batch writer is gone, dropping poll batch");
                                break;
                            }
                        }
                        log_metric(store, code, true);
                    }
                    Err(e) => {
                        tracing::warn!("Status feed returned unparseable body: {}", e);
                        log_metric(store, 500, false);
                    }
                }
            } else {
                tracing::warn!("Status feed answered {}", code);
                log_metric(store, code, false);
            }
        }
        Err(e) => {
            tracing::error!("Status feed unreachable: {}", e);
            // Keep the real code when the error carries one.
            let code = e.status().map(|s| s.as_u16()).unwrap_or(500);
            log_metric(store, code, false);
        }
    }
}

fn log_metric(store: &Store, status_code: u16, success: bool) {
    if let Err(e) = store.log_metric(DEVICES_ENDPOINT, status_code, success) {
        tracing::error!("Failed to record poll metric: {}", e);
    }
}

/// Run the batch writer that accumulates and flushes status records.
async fn run_batch_writer(mut rx: mpsc::Receiver<StatusRecord>, store: Arc<Store>) {
    let mut buffer: Vec<StatusRecord> = Vec::with_capacity(100);
    let mut interval = tokio::time::interval(Duration::from_secs(2));

    loop {
        tokio::select! {
            record = rx.recv() => {
                match record {
                    Some(r) => {
                        buffer.push(r);
                        if buffer.len() >= BATCH_FLUSH_LIMIT {
                            flush_buffer(&store, &mut buffer);
                        }
                    }
                    None => {
                        // Channel closed, flush remaining and exit
                        flush_buffer(&store, &mut buffer);
                        break;
                    }
                }
            }
            _ = interval.tick() => {
                flush_buffer(&store, &mut buffer);
            }
        }
    }
}

fn flush_buffer(store: &Store, buffer: &mut Vec<StatusRecord>) {
    if buffer.is_empty() {
        return;
    }

    if let Err(e) = store.add_status_records(buffer) {
        tracing::error!("Failed to flush status records: {}", e);
    }

    buffer.clear();
}
