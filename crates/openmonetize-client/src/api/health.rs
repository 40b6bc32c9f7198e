//! Liveness, readiness, and service info.

use crate::client::{decode, ApiClient};
use crate::error::ClientError;
use crate::transport::ApiRequest;
use crate::types::{HealthStatus, Readiness, ServiceInfo};

/// Health API.
#[derive(Debug, Clone)]
pub struct HealthApi {
    api: ApiClient,
}

impl HealthApi {
    /// Create the facade over `api`.
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Basic liveness check.
    ///
    /// # Errors
    ///
    /// Returns a transport error if the request fails.
    pub async fn health(&self) -> Result<HealthStatus, ClientError> {
        self.api.json(ApiRequest::get(["health"])).await
    }

    /// Readiness including dependencies.
    ///
    /// A 503 carries a degraded report and is returned as data; check
    /// [`Readiness::is_ready`].
    ///
    /// # Errors
    ///
    /// Returns a transport error for any other failure.
    pub async fn ready(&self) -> Result<Readiness, ClientError> {
        let response = self
            .api
            .execute_accepting(ApiRequest::get(["ready"]), &[503])
            .await?;
        let readiness: Readiness = decode(&response)?;

        if !readiness.is_ready() {
            tracing::warn!(status = %readiness.status, "OpenMonetize gateway not ready");
        }

        Ok(readiness)
    }

    /// Gateway name, version, and environment.
    ///
    /// # Errors
    ///
    /// Returns a transport error if the request fails.
    pub async fn info(&self) -> Result<ServiceInfo, ClientError> {
        self.api.json(ApiRequest::get(["v1", "info"])).await
    }
}
