use crate::speed_map::{SpeedMap, DEFAULT_SPEED};
use radius_codec::Dictionary;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Inspector configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InspectConfig {
    /// Shared secret of the captured traffic
    #[serde(default = "default_secret")]
    pub secret: String,

    /// Log filter: "trace", "debug", "info", "warn", "error" or an
    /// `EnvFilter` directive (default: "info")
    #[serde(default)]
    pub log_level: Option<String>,

    /// Attribute carrying the service profile name
    #[serde(default = "default_speed_attribute")]
    pub speed_attribute: String,

    /// Speed reported for profiles without a tier
    #[serde(default = "default_speed")]
    pub default_speed: String,

    /// Extra or replacement profile tiers
    #[serde(default)]
    pub speed_tiers: HashMap<String, String>,
}

fn default_secret() -> String {
    "testing123".to_string()
}

fn default_speed_attribute() -> String {
    "Filter-Id".to_string()
}

fn default_speed() -> String {
    DEFAULT_SPEED.to_string()
}

impl Default for InspectConfig {
    fn default() -> Self {
        InspectConfig {
            secret: default_secret(),
            log_level: None,
            speed_attribute: default_speed_attribute(),
            default_speed: default_speed(),
            speed_tiers: HashMap::new(),
        }
    }
}

impl InspectConfig {
    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        let config: InspectConfig = serde_json::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a JSON file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let contents = serde_json::to_string_pretty(self)?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.secret.is_empty() {
            return Err(ConfigError::Invalid("Secret cannot be empty".to_string()));
        }

        if let Some(ref level) = self.log_level {
            EnvFilter::try_new(level)
                .map_err(|e| ConfigError::Invalid(format!("Invalid log level {}: {}", level, e)))?;
        }

        if Dictionary::builtin().attr_type(&self.speed_attribute).is_none() {
            return Err(ConfigError::Invalid(format!(
                "Unknown speed attribute: {}",
                self.speed_attribute
            )));
        }

        if self.default_speed.is_empty() {
            return Err(ConfigError::Invalid("Default speed cannot be empty".to_string()));
        }

        for (profile, speed) in &self.speed_tiers {
            if speed.is_empty() {
                return Err(ConfigError::Invalid(format!(
                    "Speed tier {} has empty speed",
                    profile
                )));
            }
        }

        Ok(())
    }

    /// Log filter to install when `RUST_LOG` is not set
    pub fn log_filter(&self) -> &str {
        self.log_level.as_deref().unwrap_or("info")
    }

    /// Built-in speed table with this configuration applied
    pub fn speed_map(&self) -> SpeedMap {
        SpeedMap::builtin()
            .with_overrides(self.speed_tiers.clone())
            .with_default(self.default_speed.clone())
    }

    /// Create an example configuration file
    pub fn example() -> Self {
        let mut speed_tiers = HashMap::new();
        speed_tiers.insert("fiber-1000".to_string(), "1024000".to_string());

        InspectConfig {
            secret: "testing123".to_string(),
            log_level: Some("info".to_string()),
            speed_attribute: default_speed_attribute(),
            default_speed: default_speed(),
            speed_tiers,
        }
    }
}
