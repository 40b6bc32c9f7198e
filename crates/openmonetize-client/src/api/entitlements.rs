//! Entitlement checks and management.

use super::encode_body;
use crate::client::ApiClient;
use crate::error::ClientError;
use crate::transport::ApiRequest;
use crate::types::{
    CreateEntitlementRequest, Entitlement, EntitlementCheckRequest, EntitlementCheckResponse,
    EntitlementSummary, UpdateEntitlementRequest,
};

/// Entitlements API.
#[derive(Debug, Clone)]
pub struct EntitlementsApi {
    api: ApiClient,
}

impl EntitlementsApi {
    /// Create the facade over `api`.
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Check whether a user may perform an action.
    ///
    /// A denial is a successful call with `allowed == false`.
    ///
    /// # Errors
    ///
    /// Returns a transport error if the request fails.
    pub async fn check(
        &self,
        request: &EntitlementCheckRequest,
    ) -> Result<EntitlementCheckResponse, ClientError> {
        let request =
            ApiRequest::post(["v1", "entitlements", "check"]).with_json_body(encode_body(request)?);
        let response: EntitlementCheckResponse = self.api.json(request).await?;

        if !response.allowed {
            tracing::debug!(reason = ?response.reason, "Entitlement denied");
        }

        Ok(response)
    }

    /// List the customer's entitlements with current usage.
    ///
    /// # Errors
    ///
    /// Returns a transport error if the request fails.
    pub async fn list(&self) -> Result<Vec<Entitlement>, ClientError> {
        self.api.data(ApiRequest::get(["v1", "entitlements"])).await
    }

    /// Create an entitlement.
    ///
    /// # Errors
    ///
    /// Returns a transport error if the request fails.
    pub async fn create(
        &self,
        request: &CreateEntitlementRequest,
    ) -> Result<EntitlementSummary, ClientError> {
        let request =
            ApiRequest::post(["v1", "entitlements"]).with_json_body(encode_body(request)?);
        self.api.data(request).await
    }

    /// Update an entitlement; absent fields are left unchanged.
    ///
    /// # Errors
    ///
    /// Returns a transport error if the request fails (404 for an unknown id).
    pub async fn update(
        &self,
        id: &str,
        request: &UpdateEntitlementRequest,
    ) -> Result<EntitlementSummary, ClientError> {
        let request =
            ApiRequest::put(["v1", "entitlements", id]).with_json_body(encode_body(request)?);
        self.api.data(request).await
    }

    /// Delete an entitlement.
    ///
    /// # Errors
    ///
    /// Returns a transport error if the request fails (404 for an unknown id).
    pub async fn delete(&self, id: &str) -> Result<(), ClientError> {
        self.api
            .execute(ApiRequest::delete(["v1", "entitlements", id]))
            .await?;
        Ok(())
    }
}
