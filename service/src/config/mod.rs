//! Configuration management: defaults, environment overrides, validation.

pub mod app_config;
pub mod validation;

pub use app_config::ServiceConfig;
pub use validation::{ConfigError, validate_config};
