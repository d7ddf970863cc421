//! Device simulation module.
//!
//! Models a fleet of fake network devices that report up/down status
//! with a fixed expected availability.

mod device;
mod fleet;

pub use device::*;
pub use fleet::*;

use thiserror::Error;

/// Simulation error types.
#[derive(Error, Debug)]
pub enum SimError {
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
    #[error("device count must be an integer: {0}")]
    InvalidCount(String),
}
