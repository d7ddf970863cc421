//! Database module for FleetPulse.
//!
//! Provides SQLite storage for polled device status and operational
//! request metrics.

mod models;
mod store;

pub use models::*;
pub use store::*;
