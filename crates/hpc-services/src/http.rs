//! HTTP client for the validation and cost services

use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use crate::error::ServiceError;
use crate::types::{CostEstimate, CostService, ServiceRequest, ValidationReport, ValidationService};

/// Base URL used when none is configured
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

/// Request timeout used when none is configured
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

const VALIDATE_PATH: &str = "/validate";
const COST_PATH: &str = "/cost";

const USER_AGENT_VALUE: &str = concat!("hpc-blueprint/", env!("CARGO_PKG_VERSION"));

/// Client for `POST /validate` and `POST /cost`
#[derive(Debug, Clone)]
pub struct HttpServiceClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpServiceClient {
    /// Create a client for `base_url` with the given request timeout
    ///
    /// # Errors
    /// `ServiceError::Network` if the underlying client cannot be built
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ServiceError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT_VALUE)
            .build()
            .map_err(|e| ServiceError::Network(format!("failed to create HTTP client: {e}")))?;

        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self { client, base_url })
    }

    /// Base URL requests are sent to
    #[inline]
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn post<T: DeserializeOwned>(
        &self,
        path: &str,
        request: &ServiceRequest,
    ) -> Result<T, ServiceError> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(%url, bytes = request.document.len(), "posting blueprint");

        let response = self.client.post(&url).json(request).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            tracing::warn!(%url, status = status.as_u16(), "service call failed");
            return Err(ServiceError::Status {
                status: status.as_u16(),
                body,
            });
        }

        serde_json::from_str(&body).map_err(|e| ServiceError::Decode(e.to_string()))
    }
}

#[async_trait]
impl ValidationService for HttpServiceClient {
    async fn validate(&self, request: &ServiceRequest) -> Result<ValidationReport, ServiceError> {
        self.post(VALIDATE_PATH, request).await
    }
}

#[async_trait]
impl CostService for HttpServiceClient {
    async fn estimate(&self, request: &ServiceRequest) -> Result<CostEstimate, ServiceError> {
        self.post(COST_PATH, request).await
    }
}
