//! Fleet generation.

use rand::seq::SliceRandom;
use rand::Rng;

use super::{Device, SimError};

/// Default name pool for generated devices.
pub const DEFAULT_NAME_POOL: &[&str] = &["Router", "Switch", "Phone", "Firewall", "PC"];

/// Default address range for generated devices.
pub const DEFAULT_ADDRESS_PREFIX: &str = "192.168.0.";

/// Generate a fleet of `count` devices.
///
/// Ids are assigned sequentially from 0. Each device's name is a
/// uniformly random pool entry composed as `{entry}_{id}`, so names
/// are not guaranteed unique across the fleet. Addresses are
/// `{prefix}{id}` with no validation against the prefix.
///
/// When `availability` is `None`, each device draws its own value
/// from [0.8, 1.0].
pub fn generate(
    count: u32,
    name_pool: &[&str],
    address_prefix: &str,
    availability: Option<f64>,
    rng: &mut impl Rng,
) -> Result<Vec<Device>, SimError> {
    if name_pool.is_empty() {
        return Err(SimError::InvalidParameter(
            "device name pool is empty".to_string(),
        ));
    }

    let mut devices = Vec::with_capacity(count as usize);
    for id in 0..count {
        let entry = name_pool
            .choose(&mut *rng)
            .ok_or_else(|| SimError::InvalidParameter("device name pool is empty".to_string()))?;
        let device = Device::new(
            id,
            format!("{}_{}", entry, id),
            format!("{}{}", address_prefix, id),
            availability,
            &mut *rng,
        )?;
        devices.push(device);
    }

    Ok(devices)
}

/// Parse a device count from external input.
///
/// Negative counts are invalid parameters; non-numeric input is a
/// parse error. Zero is a valid, empty fleet.
pub fn parse_count(raw: &str) -> Result<u32, SimError> {
    let raw = raw.trim();
    match raw.parse::<i64>() {
        Ok(n) if n < 0 => Err(SimError::InvalidParameter(format!(
            "device count cannot be negative: {}",
            n
        ))),
        Ok(n) => u32::try_from(n)
            .map_err(|_| SimError::InvalidParameter(format!("device count too large: {}", n))),
        Err(_) => Err(SimError::InvalidCount(raw.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    #[test]
    fn test_generate_assigns_sequential_unique_ids() {
        let mut rng = rng();
        let devices = generate(10, DEFAULT_NAME_POOL, DEFAULT_ADDRESS_PREFIX, None, &mut rng)
            .unwrap();
        assert_eq!(devices.len(), 10);
        for (i, device) in devices.iter().enumerate() {
            assert_eq!(device.id(), i as u32);
            assert_eq!(device.address(), format!("192.168.0.{}", i));
            assert!(device.name().ends_with(&format!("_{}", i)));
        }
    }

    #[test]
    fn test_generate_names_drawn_from_pool() {
        let mut rng = rng();
        let devices = generate(50, &["Camera"], "10.0.0.", None, &mut rng).unwrap();
        for device in &devices {
            assert!(device.name().starts_with("Camera_"));
        }
    }

    #[test]
    fn test_generate_zero_is_empty_not_an_error() {
        let mut rng = rng();
        let devices = generate(0, DEFAULT_NAME_POOL, DEFAULT_ADDRESS_PREFIX, None, &mut rng)
            .unwrap();
        assert!(devices.is_empty());
    }

    #[test]
    fn test_generate_rejects_empty_name_pool() {
        let mut rng = rng();
        assert!(matches!(
            generate(3, &[], DEFAULT_ADDRESS_PREFIX, None, &mut rng),
            Err(SimError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_parse_count() {
        assert_eq!(parse_count("4").unwrap(), 4);
        assert_eq!(parse_count("0").unwrap(), 0);
        assert!(matches!(
            parse_count("-2"),
            Err(SimError::InvalidParameter(_))
        ));
        assert!(matches!(
            parse_count("four"),
            Err(SimError::InvalidCount(_))
        ));
    }
}
