//! SQLite database store implementation.

use chrono::{DateTime, NaiveDateTime, Utc};
use rusqlite::{params, Connection, Result as SqlResult};
use std::path::Path;
use std::sync::{Arc, Mutex};
use thiserror::Error;

use super::models::*;

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.9f";

/// Database error types.
#[derive(Error, Debug)]
pub enum DbError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("Migration error: {0}")]
    Migration(String),
}

/// Thread-safe database store.
#[derive(Clone)]
pub struct Store {
    conn: Arc<Mutex<Connection>>,
}

impl Store {
    /// Create a new store with the given database path.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, DbError> {
        let conn = Connection::open(path)?;
        let store = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        store.init()?;
        Ok(store)
    }

    /// Initialize the database with migrations.
    fn init(&self) -> Result<(), DbError> {
        let conn = self.conn.lock().unwrap();
        conn.execute_batch(include_str!("../../migrations/000001_init.up.sql"))
            .map_err(|e| DbError::Migration(format!("Migration 1 failed: {}", e)))?;
        Ok(())
    }

    // --- Device status ---

    /// Add device status records in batch.
    pub fn add_status_records(&self, records: &[StatusRecord]) -> Result<(), DbError> {
        if records.is_empty() {
            return Ok(());
        }

        let conn = self.conn.lock().unwrap();
        let tx = conn.unchecked_transaction()?;

        {
            let mut stmt = tx.prepare(
                "INSERT INTO device_status (device_id, name, address, up, time) VALUES (?1, ?2, ?3, ?4, ?5)"
            )?;

            for r in records {
                stmt.execute(params![
                    r.device_id,
                    r.name,
                    r.address,
                    r.up,
                    r.time.format(TIME_FORMAT).to_string(),
                ])?;
            }
        }

        tx.commit()?;
        Ok(())
    }

    /// Get the full device status history.
    ///
    /// No ordering is guaranteed; the aggregator does its own grouping.
    pub fn get_status_records(&self) -> Result<Vec<StatusRecord>, DbError> {
        let conn = self.conn.lock().unwrap();
        let mut stmt =
            conn.prepare("SELECT device_id, name, address, up, time FROM device_status")?;

        let records = stmt
            .query_map([], |row| {
                let time_str: String = row.get(4)?;
                let time = parse_db_time(&time_str).unwrap_or_else(Utc::now);
                Ok(StatusRecord {
                    device_id: row.get(0)?,
                    name: row.get(1)?,
                    address: row.get(2)?,
                    up: row.get(3)?,
                    time,
                })
            })?
            .collect::<SqlResult<Vec<_>>>()?;

        Ok(records)
    }

    // --- System metrics ---

    /// Record one operational log entry.
    pub fn log_metric(&self, endpoint: &str, status_code: u16, success: bool) -> Result<(), DbError> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO system_metrics (endpoint, status_code, success, time) VALUES (?1, ?2, ?3, ?4)",
            params![
                endpoint,
                status_code,
                success,
                Utc::now().format(TIME_FORMAT).to_string(),
            ],
        )?;
        Ok(())
    }

    /// Get the full system metrics history.
    pub fn get_metrics(&self) -> Result<Vec<MetricRecord>, DbError> {
        let conn = self.conn.lock().unwrap();
        let mut stmt =
            conn.prepare("SELECT endpoint, status_code, success, time FROM system_metrics")?;

        let records = stmt
            .query_map([], |row| {
                let time_str: String = row.get(3)?;
                let time = parse_db_time(&time_str).unwrap_or_else(Utc::now);
                Ok(MetricRecord {
                    endpoint: row.get(0)?,
                    status_code: row.get(1)?,
                    success: row.get(2)?,
                    time,
                })
            })?
            .collect::<SqlResult<Vec<_>>>()?;

        Ok(records)
    }
}

/// Parse a datetime string from the database.
fn parse_db_time(s: &str) -> Option<DateTime<Utc>> {
    let formats = [
        "%Y-%m-%d %H:%M:%S%.9f",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.9fZ",
        "%Y-%m-%dT%H:%M:%SZ",
    ];

    for fmt in &formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(DateTime::from_naive_utc_and_offset(dt, Utc));
        }
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    None
}
