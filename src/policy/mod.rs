//! Guidance configuration.

pub mod config;

pub use config::{ConfigError, GuidanceConfig};
