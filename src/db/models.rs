//! Database model types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One persisted device status sample from the poller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusRecord {
    pub device_id: u32,
    pub name: String,
    pub address: String,
    pub up: bool,
    pub time: DateTime<Utc>,
}

/// One operational log entry for an externally observed request.
///
/// Written by the poller and the web handlers, read back for the
/// system-metrics timeline. Append-only; never mutated or deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricRecord {
    pub endpoint: String,
    pub status_code: u16,
    pub success: bool,
    pub time: DateTime<Utc>,
}
