//! HPC Services
//!
//! Boundaries to the external services that judge a rendered blueprint:
//! - [`ValidationService`] / [`CostService`]: async traits the orchestrator calls
//! - [`HttpServiceClient`]: `POST /validate` and `POST /cost` over HTTP
//! - [`LlmValidator`]: prompt-based validation through a [`CompletionBackend`]
//!
//! # Example
//!
//! ```rust
//! use hpc_services::ServiceRequest;
//!
//! let request = ServiceRequest::new("blueprint_name: demo\n")
//!     .with_location("europe-west4", "europe-west4-b");
//! assert_eq!(request.zone, "europe-west4-b");
//! ```

#![warn(unreachable_pub)]

pub mod error;
pub mod http;
pub mod llm;
pub mod types;

pub use error::ServiceError;
pub use http::{HttpServiceClient, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
pub use llm::{CompletionBackend, LlmValidator};
pub use types::{
    CostEstimate, CostService, ServiceRequest, ValidationReport, ValidationService,
    BREAKDOWN_LABELS, DEFAULT_REGION, DEFAULT_ZONE,
};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
