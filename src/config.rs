//! Configuration module for FleetPulse.
//!
//! Loads configuration from environment variables with sensible
//! defaults. Device count and the availability override are kept as
//! raw strings here and validated at the fleet boundary, where a
//! negative count and an out-of-range availability are rejected.

use std::env;

/// Server configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// HTTP port for the web server (default: 8080)
    pub http_port: u16,
    /// Path to the SQLite database file (default: "fleetpulse.db")
    pub db_path: String,
    /// Number of devices to simulate, unparsed (default: "4")
    pub device_count: String,
    /// Address prefix for generated devices (default: "192.168.0.")
    pub address_prefix: String,
    /// Fixed availability for every device, unparsed; unset means each
    /// device draws its own from [0.8, 1.0]
    pub availability: Option<String>,
    /// Poll interval in seconds (default: 5.0)
    pub poll_interval_secs: f64,
    /// Poll fetch timeout in seconds (default: 5.0)
    pub poll_timeout_secs: f64,
    /// Device status feed URL; unset means this process's own feed
    pub device_api_url: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            http_port: 8080,
            db_path: "fleetpulse.db".to_string(),
            device_count: "4".to_string(),
            address_prefix: "192.168.0.".to_string(),
            availability: None,
            poll_interval_secs: 5.0,
            poll_timeout_secs: 5.0,
            device_api_url: None,
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `FLEETPULSE_HTTP_PORT`: HTTP port (default: 8080)
    /// - `FLEETPULSE_DB_PATH`: Database file path (default: "fleetpulse.db")
    /// - `FLEETPULSE_DEVICE_COUNT`: Number of simulated devices (default: 4)
    /// - `FLEETPULSE_ADDRESS_PREFIX`: Device address prefix (default: "192.168.0.")
    /// - `FLEETPULSE_AVAILABILITY`: Fixed availability for every device
    /// - `FLEETPULSE_POLL_INTERVAL_SECS`: Poll interval (default: 5.0)
    /// - `FLEETPULSE_POLL_TIMEOUT_SECS`: Poll fetch timeout (default: 5.0)
    /// - `FLEETPULSE_DEVICE_API_URL`: Status feed URL (default: own feed)
    pub fn load() -> Self {
        let mut cfg = Self::default();

        if let Ok(port_str) = env::var("FLEETPULSE_HTTP_PORT") {
            if let Ok(port) = port_str.parse() {
                cfg.http_port = port;
            }
        }

        if let Ok(db_path) = env::var("FLEETPULSE_DB_PATH") {
            cfg.db_path = db_path;
        }

        if let Ok(count) = env::var("FLEETPULSE_DEVICE_COUNT") {
            cfg.device_count = count;
        }

        if let Ok(prefix) = env::var("FLEETPULSE_ADDRESS_PREFIX") {
            cfg.address_prefix = prefix;
        }

        if let Ok(avail) = env::var("FLEETPULSE_AVAILABILITY") {
            cfg.availability = Some(avail);
        }

        if let Ok(interval_str) = env::var("FLEETPULSE_POLL_INTERVAL_SECS") {
            if let Some(interval) = parse_positive_secs(&interval_str) {
                cfg.poll_interval_secs = interval;
            }
        }

        if let Ok(timeout_str) = env::var("FLEETPULSE_POLL_TIMEOUT_SECS") {
            if let Some(timeout) = parse_positive_secs(&timeout_str) {
                cfg.poll_timeout_secs = timeout;
            }
        }

        if let Ok(url) = env::var("FLEETPULSE_DEVICE_API_URL") {
            cfg.device_api_url = Some(url);
        }

        cfg
    }

    /// The device status feed URL, defaulting to this process's own.
    pub fn device_api_url(&self) -> String {
        self.device_api_url
            .clone()
            .unwrap_or_else(|| format!("http://127.0.0.1:{}/devices", self.http_port))
    }
}

/// Parse a duration in seconds, keeping only finite positive values.
///
/// Zero or negative durations cannot drive a poll loop, so they fall
/// back to the default rather than reaching `Duration::from_secs_f64`.
fn parse_positive_secs(raw: &str) -> Option<f64> {
    match raw.trim().parse::<f64>() {
        Ok(secs) if secs.is_finite() && secs > 0.0 => Some(secs),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let cfg = ServerConfig::default();
        assert_eq!(cfg.http_port, 8080);
        assert_eq!(cfg.db_path, "fleetpulse.db");
        assert_eq!(cfg.device_count, "4");
        assert_eq!(cfg.address_prefix, "192.168.0.");
        assert!(cfg.availability.is_none());
    }

    #[test]
    fn test_device_api_url_defaults_to_own_feed() {
        let cfg = ServerConfig::default();
        assert_eq!(cfg.device_api_url(), "http://127.0.0.1:8080/devices");

        let cfg = ServerConfig {
            device_api_url: Some("http://example.com/devices".to_string()),
            ..Default::default()
        };
        assert_eq!(cfg.device_api_url(), "http://example.com/devices");
    }

    #[test]
    fn test_non_positive_poll_durations_fall_back_to_defaults() {
        // Zero and negative intervals would panic later in
        // Duration::from_secs_f64 / tokio::time::interval, so they
        // never make it into the config.
        assert_eq!(parse_positive_secs("-3"), None);
        assert_eq!(parse_positive_secs("0"), None);
        assert_eq!(parse_positive_secs("0.0"), None);
        assert_eq!(parse_positive_secs("NaN"), None);
        assert_eq!(parse_positive_secs("inf"), None);
        assert_eq!(parse_positive_secs("junk"), None);
        assert_eq!(parse_positive_secs("2.5"), Some(2.5));
    }
}
