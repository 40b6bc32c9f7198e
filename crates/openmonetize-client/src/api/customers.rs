//! Customer registration and profile.

use super::encode_body;
use crate::client::ApiClient;
use crate::error::ClientError;
use crate::transport::ApiRequest;
use crate::types::{CustomerProfile, RegisterCustomerRequest, RegisteredCustomer};

/// Customers API.
#[derive(Debug, Clone)]
pub struct CustomersApi {
    api: ApiClient,
}

impl CustomersApi {
    /// Create the facade over `api`.
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Register a new customer account.
    ///
    /// The returned API key is only ever shown here.
    ///
    /// # Errors
    ///
    /// Returns a transport error if the request fails (409 when the email is
    /// already registered).
    pub async fn register(
        &self,
        request: &RegisterCustomerRequest,
    ) -> Result<RegisteredCustomer, ClientError> {
        let request =
            ApiRequest::post(["v1", "customers", "register"]).with_json_body(encode_body(request)?);
        self.api.data(request).await
    }

    /// Get the authenticated customer's profile.
    ///
    /// # Errors
    ///
    /// Returns a transport error if the request fails.
    pub async fn me(&self) -> Result<CustomerProfile, ClientError> {
        self.api.data(ApiRequest::get(["v1", "customers", "me"])).await
    }
}
