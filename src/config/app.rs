//! Main application configuration
//!
//! This module defines the primary configuration structures for the combine
//! tracker, including TOML file loading, environment overrides and validation.

use crate::config::scoring::ScoringConfig;
use crate::types::DrillType;
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;

/// Main application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    #[serde(default)]
    pub service: ServiceSettings,
    #[serde(default)]
    pub scoring: ScoringConfig,
}

/// Service-level settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServiceSettings {
    /// Service name for logging and metrics
    #[serde(default = "default_service_name")]
    pub name: String,
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_service_name() -> String {
    "combine-tracker".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            name: default_service_name(),
            log_level: default_log_level(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables with fallback to defaults
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        config.apply_env_overrides()?;
        validate_config(&config)?;
        Ok(config)
    }

    /// Load configuration from a TOML file, then apply environment overrides
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file at {}", path.display()))?;

        let mut config: AppConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config: invalid TOML in {}", path.display()))?;

        config.apply_env_overrides()?;
        validate_config(&config)?;
        Ok(config)
    }

    fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(name) = env::var("COMBINE_SERVICE_NAME") {
            self.service.name = name;
        }
        if let Ok(log_level) = env::var("COMBINE_LOG_LEVEL") {
            self.service.log_level = log_level;
        }

        for drill in DrillType::ALL {
            let key = weight_env_key(drill);
            if let Ok(value) = env::var(&key) {
                let weight: f64 = value
                    .trim()
                    .parse()
                    .map_err(|_| anyhow!("Invalid {} value: {}", key, value))?;
                self.scoring.weights.set(drill, weight);
            }
        }

        Ok(())
    }
}

/// Environment variable overriding one drill's weight, e.g. `COMBINE_WEIGHT_40M_DASH`
pub fn weight_env_key(drill: DrillType) -> String {
    format!("COMBINE_WEIGHT_{}", drill.as_str().to_uppercase())
}

/// Validate configuration values
pub fn validate_config(config: &AppConfig) -> Result<()> {
    match config.service.log_level.to_lowercase().as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => {}
        _ => return Err(anyhow!("Invalid log level: {}", config.service.log_level)),
    }

    if config.service.name.trim().is_empty() {
        return Err(anyhow!("Service name cannot be empty"));
    }

    config.scoring.validate()?;

    Ok(())
}
