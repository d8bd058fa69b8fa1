//! Configuration validation.

use super::ServiceConfig;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("IMAGE_SERVICE_WORKERS must be at least 1")]
    NoWorkers,

    #[error("IMAGE_SERVICE_QUEUE_CAPACITY must be at least 1")]
    NoQueue,

    #[error("IMAGE_SERVICE_MAX_BODY_BYTES must be at least 1")]
    NoBody,

    #[error("Canny thresholds must satisfy 0 <= low <= high (got low={low}, high={high})")]
    Thresholds { low: f32, high: f32 },
}

/// Check a loaded configuration for values the service cannot run with.
pub fn validate_config(config: &ServiceConfig) -> Result<(), ConfigError> {
    if config.max_workers == 0 {
        return Err(ConfigError::NoWorkers);
    }
    if config.queue_capacity == 0 {
        return Err(ConfigError::NoQueue);
    }
    if config.max_body_bytes == 0 {
        return Err(ConfigError::NoBody);
    }
    let (low, high) = (config.canny_low, config.canny_high);
    if !(low >= 0.0 && low <= high) {
        return Err(ConfigError::Thresholds { low, high });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert_eq!(validate_config(&ServiceConfig::default()), Ok(()));
    }

    #[test]
    fn zero_sizes_are_rejected() {
        let mut config = ServiceConfig::default();
        config.max_workers = 0;
        assert_eq!(validate_config(&config), Err(ConfigError::NoWorkers));

        let mut config = ServiceConfig::default();
        config.queue_capacity = 0;
        assert_eq!(validate_config(&config), Err(ConfigError::NoQueue));

        let mut config = ServiceConfig::default();
        config.max_body_bytes = 0;
        assert_eq!(validate_config(&config), Err(ConfigError::NoBody));
    }

    #[test]
    fn thresholds_must_be_ordered() {
        let mut config = ServiceConfig::default();
        config.canny_low = 250.0;
        assert!(matches!(
            validate_config(&config),
            Err(ConfigError::Thresholds { .. })
        ));

        config.canny_low = f32::NAN;
        assert!(validate_config(&config).is_err());

        config.canny_low = 200.0;
        assert_eq!(validate_config(&config), Ok(()));
    }
}
