//! Configuration management for the combine tracker
//!
//! This module handles configuration loading from TOML files and environment
//! variables, validation, and the default event calibration and weights.

pub mod app;
pub mod scoring;

// Re-export commonly used types
pub use app::{validate_config, weight_env_key, AppConfig, ServiceSettings};
pub use scoring::ScoringConfig;
