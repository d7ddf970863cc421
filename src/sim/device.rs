//! A simulated network device.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::SimError;

/// A generic network-enabled device.
///
/// Identity fields and `availability` are fixed at construction and
/// never change, so a device can be sampled concurrently from many
/// tasks without locking.
#[derive(Debug, Clone)]
pub struct Device {
    id: u32,
    name: String,
    address: String,
    availability: f64,
}

/// One poll's outcome for one device, as emitted on the status feed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusSample {
    pub id: u32,
    pub name: String,
    pub address: String,
    pub up: bool,
}

impl Device {
    /// Create a new device.
    ///
    /// When `availability` is `None`, a value is drawn uniformly from
    /// [0.8, 1.0]. A supplied value outside [0, 1] is rejected.
    pub fn new(
        id: u32,
        name: impl Into<String>,
        address: impl Into<String>,
        availability: Option<f64>,
        rng: &mut impl Rng,
    ) -> Result<Self, SimError> {
        let availability = match availability {
            Some(avail) => {
                if !(0.0..=1.0).contains(&avail) {
                    return Err(SimError::InvalidParameter(format!(
                        "attempted to create a device with {}% availability",
                        (avail * 100.0).round()
                    )));
                }
                avail
            }
            None => rng.gen_range(0.8..=1.0),
        };

        Ok(Self {
            id,
            name: name.into(),
            address: address.into(),
            availability,
        })
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn availability(&self) -> f64 {
        self.availability
    }

    /// Roll one up/down status for this device.
    ///
    /// Each call is an independent Bernoulli trial: a uniform draw in
    /// [0, 1) compared against the device's expected availability. No
    /// state is carried between polls.
    pub fn sample_status(&self, rng: &mut impl Rng) -> bool {
        let roll: f64 = rng.gen();
        roll <= self.availability
    }

    /// Roll a fresh status and package it with the device's identity,
    /// as if the device had answered a status request.
    pub fn snapshot(&self, rng: &mut impl Rng) -> StatusSample {
        StatusSample {
            id: self.id,
            name: self.name.clone(),
            address: self.address.clone(),
            up: self.sample_status(rng),
        }
    }
}

/// Parse an availability override from external input.
///
/// A numeric value outside [0, 1] is an error. A non-numeric value is
/// treated as unset (`None`), so each device draws its own availability
/// at construction.
pub fn parse_availability(raw: &str) -> Result<Option<f64>, SimError> {
    match raw.trim().parse::<f64>() {
        Ok(avail) if !(0.0..=1.0).contains(&avail) => Err(SimError::InvalidParameter(format!(
            "attempted to create a device with {}% availability",
            (avail * 100.0).round()
        ))),
        Ok(avail) => Ok(Some(avail)),
        Err(_) => Ok(None),
    }
}
