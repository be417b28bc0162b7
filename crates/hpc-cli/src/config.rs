//! Front-end configuration
//!
//! Resolution order, later wins:
//! 1. built-in defaults
//! 2. TOML file given with `--config`
//! 3. `HPC_API_URL` environment variable
//! 4. command-line flags
//!
//! ```toml
//! api_base_url = "http://127.0.0.1:8000"
//! region = "us-central1"
//! zone = "us-central1-a"
//! debounce_ms = 1000
//! request_timeout_secs = 30
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use hpc_orchestrator::PipelineConfig;
use hpc_services::{DEFAULT_BASE_URL, DEFAULT_REGION, DEFAULT_ZONE};
use serde::{Deserialize, Serialize};

/// Environment variable overriding the service base URL
pub const API_URL_ENV: &str = "HPC_API_URL";

/// Configuration loading failure
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File could not be read
    #[error("cannot read config {path}: {source}")]
    Io {
        /// Config file path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// File is not valid TOML for this schema
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Service and pipeline settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HpcConfig {
    /// Base URL of the validation and cost services
    pub api_base_url: String,
    /// Region sent with every call
    pub region: String,
    /// Zone sent with every call
    pub zone: String,
    /// Quiet period before the shell submits a changed document
    pub debounce_ms: u64,
    /// HTTP request timeout
    pub request_timeout_secs: u64,
}

impl Default for HpcConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_BASE_URL.to_string(),
            region: DEFAULT_REGION.to_string(),
            zone: DEFAULT_ZONE.to_string(),
            debounce_ms: 1000,
            request_timeout_secs: 30,
        }
    }
}

impl HpcConfig {
    /// Parse TOML text; missing keys keep their defaults
    ///
    /// # Errors
    /// `ConfigError::Parse` on malformed TOML or wrongly typed keys
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Load a TOML file
    ///
    /// # Errors
    /// `ConfigError::Io` if unreadable, `ConfigError::Parse` if malformed
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text)?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Apply environment overrides read through `lookup`
    #[must_use]
    pub fn with_env<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(API_URL_ENV).filter(|u| !u.trim().is_empty()) {
            self.api_base_url = url;
        }
        self
    }

    /// With service base URL
    #[inline]
    #[must_use]
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    /// With region
    #[inline]
    #[must_use]
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = region.into();
        self
    }

    /// With zone
    #[inline]
    #[must_use]
    pub fn with_zone(mut self, zone: impl Into<String>) -> Self {
        self.zone = zone.into();
        self
    }

    /// With debounce quiet period in milliseconds
    #[inline]
    #[must_use]
    pub fn with_debounce_ms(mut self, ms: u64) -> Self {
        self.debounce_ms = ms;
        self
    }

    /// HTTP request timeout
    #[inline]
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Pipeline settings derived from this config
    #[must_use]
    pub fn pipeline(&self) -> PipelineConfig {
        PipelineConfig::new()
            .with_debounce(Duration::from_millis(self.debounce_ms))
            .with_location(&self.region, &self.zone)
    }
}
