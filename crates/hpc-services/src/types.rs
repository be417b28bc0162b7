//! Wire types shared by the service boundaries

use async_trait::async_trait;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::ServiceError;

/// Region sent when none is configured
pub const DEFAULT_REGION: &str = "us-central1";

/// Zone sent when none is configured
pub const DEFAULT_ZONE: &str = "us-central1-a";

/// Fixed cost breakdown labels, in the order the cost service reports them
pub const BREAKDOWN_LABELS: [&str; 5] = [
    "Compute (CPUs)",
    "Compute (RAM)",
    "Accelerators (GPUs)",
    "Accelerators (TPUs)",
    "Storage",
];

/// Payload of a validation or cost call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceRequest {
    /// Rendered blueprint document
    #[serde(rename = "yaml_content")]
    pub document: String,
    /// Deployment region context
    pub region: String,
    /// Deployment zone context
    pub zone: String,
}

impl ServiceRequest {
    /// Request for `document` in the default region and zone
    #[must_use]
    pub fn new(document: impl Into<String>) -> Self {
        Self {
            document: document.into(),
            region: DEFAULT_REGION.to_string(),
            zone: DEFAULT_ZONE.to_string(),
        }
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

/// Answer of the validation service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    /// Whether the document passed
    #[serde(rename = "is_valid")]
    pub valid: bool,
    /// Problems found, in reported order
    #[serde(default)]
    pub errors: Vec<String>,
}

impl ValidationReport {
    /// A passing report
    #[inline]
    #[must_use]
    pub fn valid() -> Self {
        Self {
            valid: true,
            errors: Vec::new(),
        }
    }

    /// A failing report
    #[inline]
    #[must_use]
    pub fn invalid(errors: Vec<String>) -> Self {
        Self {
            valid: false,
            errors,
        }
    }
}

/// Answer of the cost service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostEstimate {
    /// Estimated monthly total
    pub total_cost: f64,
    /// Amount per category label, in reported order
    #[serde(rename = "cost_breakdown")]
    pub breakdown: IndexMap<String, f64>,
}

impl CostEstimate {
    /// Amount for one label, if reported
    #[inline]
    #[must_use]
    pub fn amount(&self, label: &str) -> Option<f64> {
        self.breakdown.get(label).copied()
    }
}

/// Boundary that validates blueprint documents
#[async_trait]
pub trait ValidationService: Send + Sync {
    /// Validate one document
    ///
    /// # Errors
    /// Any transport, status or decoding failure
    async fn validate(&self, request: &ServiceRequest) -> Result<ValidationReport, ServiceError>;
}

/// Boundary that prices blueprint documents
#[async_trait]
pub trait CostService: Send + Sync {
    /// Estimate the cost of one document
    ///
    /// # Errors
    /// Any transport, status or decoding failure
    async fn estimate(&self, request: &ServiceRequest) -> Result<CostEstimate, ServiceError>;
}
