//! Pipeline configuration

use std::time::Duration;

use hpc_services::{DEFAULT_REGION, DEFAULT_ZONE};

/// Default quiet period before a document is released
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(1000);

/// Orchestrator settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Quiet period before a submitted document is released
    pub debounce: Duration,
    /// Region sent with every call
    pub region: String,
    /// Zone sent with every call
    pub zone: String,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            debounce: DEFAULT_DEBOUNCE,
            region: DEFAULT_REGION.to_string(),
            zone: DEFAULT_ZONE.to_string(),
        }
    }
}

impl PipelineConfig {
    /// Create with default settings
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With debounce quiet period
    #[inline]
    #[must_use]
    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    /// With region and zone
    #[inline]
    #[must_use]
    pub fn with_location(mut self, region: impl Into<String>, zone: impl Into<String>) -> Self {
        self.region = region.into();
        self.zone = zone.into();
        self
    }
}
