//! Demo-mode completions.

use super::encode_body;
use crate::client::ApiClient;
use crate::error::ClientError;
use crate::transport::ApiRequest;
use crate::types::{DemoCompletion, DemoGenerateRequest};

/// Demo API.
#[derive(Debug, Clone)]
pub struct DemoApi {
    api: ApiClient,
}

impl DemoApi {
    /// Create the facade over `api`.
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Generate a simulated completion.
    ///
    /// The gateway records a `TOKEN_USAGE` event for it on the demo tenant.
    ///
    /// # Errors
    ///
    /// Returns a transport error if the request fails (404 when demo mode is
    /// disabled).
    pub async fn generate(
        &self,
        request: &DemoGenerateRequest,
    ) -> Result<DemoCompletion, ClientError> {
        let request =
            ApiRequest::post(["v1", "demo", "generate"]).with_json_body(encode_body(request)?);
        self.api.json(request).await
    }
}
