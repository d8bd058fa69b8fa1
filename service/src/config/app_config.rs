//! Runtime service configuration loaded from the environment.

use image_processor::EdgeThresholds;
use image_processor::edges::{DEFAULT_HIGH_THRESHOLD, DEFAULT_LOW_THRESHOLD};

use super::validation::validate_config;

/// Default listening port.
pub const DEFAULT_PORT: u16 = 50051;
/// Default number of concurrent transform workers.
pub const DEFAULT_MAX_WORKERS: usize = 10;
/// Default number of calls allowed to wait for a worker.
pub const DEFAULT_QUEUE_CAPACITY: usize = 100;
/// Default request body limit (64 MiB).
pub const DEFAULT_MAX_BODY_BYTES: usize = 64 * 1024 * 1024;

/// Configuration resolved once at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceConfig {
    pub bind_address: String,
    pub port: u16,
    pub max_workers: usize,
    pub queue_capacity: usize,
    pub max_body_bytes: usize,
    pub canny_low: f32,
    pub canny_high: f32,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0".into(),
            port: DEFAULT_PORT,
            max_workers: DEFAULT_MAX_WORKERS,
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            canny_low: DEFAULT_LOW_THRESHOLD,
            canny_high: DEFAULT_HIGH_THRESHOLD,
        }
    }
}

impl ServiceConfig {
    /// Load configuration from environment variables over the defaults.
    pub fn load() -> Result<Self, anyhow::Error> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a configuration from an arbitrary key lookup.
    ///
    /// Unparseable values fall back to the default; the result is validated.
    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self, anyhow::Error> {
        let d = Self::default();
        let g = |key: &str| get(key).unwrap_or_default();

        let config = Self {
            bind_address: {
                let b = g("IMAGE_SERVICE_BIND");
                if b.is_empty() { d.bind_address } else { b }
            },
            port: parse_or(&g("IMAGE_SERVICE_PORT"), d.port),
            max_workers: parse_or(&g("IMAGE_SERVICE_WORKERS"), d.max_workers),
            queue_capacity: parse_or(&g("IMAGE_SERVICE_QUEUE_CAPACITY"), d.queue_capacity),
            max_body_bytes: parse_or(&g("IMAGE_SERVICE_MAX_BODY_BYTES"), d.max_body_bytes),
            canny_low: parse_or(&g("IMAGE_SERVICE_CANNY_LOW"), d.canny_low),
            canny_high: parse_or(&g("IMAGE_SERVICE_CANNY_HIGH"), d.canny_high),
        };
        validate_config(&config)?;
        Ok(config)
    }

    pub fn thresholds(&self) -> EdgeThresholds {
        EdgeThresholds {
            low: self.canny_low,
            high: self.canny_high,
        }
    }

    /// `host:port` to bind.
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.bind_address, self.port)
    }
}

fn parse_or<T: std::str::FromStr>(s: &str, default: T) -> T {
    if s.is_empty() {
        return default;
    }
    s.trim().parse().unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load_from(pairs: &[(&str, &str)]) -> Result<ServiceConfig, anyhow::Error> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServiceConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn empty_environment_gives_defaults() {
        assert_eq!(load_from(&[]).unwrap(), ServiceConfig::default());
    }

    #[test]
    fn defaults_match_reference_deployment() {
        let config = ServiceConfig::default();
        assert_eq!(config.listen_addr(), "0.0.0.0:50051");
        assert_eq!(config.max_workers, 10);
        assert_eq!(config.thresholds(), EdgeThresholds { low: 100.0, high: 200.0 });
    }

    #[test]
    fn overrides_are_applied() {
        let config = load_from(&[
            ("IMAGE_SERVICE_BIND", "127.0.0.1"),
            ("IMAGE_SERVICE_PORT", "6000"),
            ("IMAGE_SERVICE_WORKERS", "4"),
            ("IMAGE_SERVICE_QUEUE_CAPACITY", "8"),
            ("IMAGE_SERVICE_CANNY_LOW", "50"),
            ("IMAGE_SERVICE_CANNY_HIGH", "150.5"),
        ])
        .unwrap();
        assert_eq!(config.listen_addr(), "127.0.0.1:6000");
        assert_eq!(config.max_workers, 4);
        assert_eq!(config.queue_capacity, 8);
        assert_eq!(config.thresholds(), EdgeThresholds { low: 50.0, high: 150.5 });
    }

    #[test]
    fn unparseable_values_fall_back_to_defaults() {
        let config = load_from(&[("IMAGE_SERVICE_PORT", "http"), ("IMAGE_SERVICE_WORKERS", "-1")])
            .unwrap();
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.max_workers, DEFAULT_MAX_WORKERS);
    }

    #[test]
    fn invalid_combination_is_rejected() {
        assert!(load_from(&[("IMAGE_SERVICE_WORKERS", "0")]).is_err());
        assert!(load_from(&[("IMAGE_SERVICE_CANNY_LOW", "300")]).is_err());
    }
}
