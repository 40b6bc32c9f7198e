//! OpenMonetize client and the request dispatcher shared by the facades.

use std::fmt;
use std::sync::Arc;

use serde::de::DeserializeOwned;

use crate::api::{
    AnalyticsApi, CreditsApi, CustomersApi, DemoApi, EntitlementsApi, EventsApi, HealthApi,
};
use crate::error::{ClientError, TransportError};
use crate::transport::{ApiRequest, ApiResponse, HttpTransport, Transport};
use crate::types::{ApiErrorResponse, DataEnvelope};

/// Default API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.openmonetize.io";

/// Environment variable holding the API key.
pub const ENV_API_KEY: &str = "OPENMONETIZE_API_KEY";
/// Environment variable overriding the base URL.
pub const ENV_BASE_URL: &str = "OPENMONETIZE_BASE_URL";
/// Environment variable overriding the request timeout.
pub const ENV_TIMEOUT_SECONDS: &str = "OPENMONETIZE_TIMEOUT_SECONDS";

/// OpenMonetize API client.
///
/// Holds one shared transport and hands out the resource facades. Cloning is
/// cheap.
#[derive(Debug, Clone)]
pub struct OpenMonetizeClient {
    api: ApiClient,
}

impl OpenMonetizeClient {
    /// Create a client for the default endpoint.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(api_key: impl Into<String>) -> Result<Self, ClientError> {
        Self::with_options(api_key, ClientOptions::default())
    }

    /// Create a client with custom options.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Configuration`] if the base URL is invalid or
    /// the timeout is zero.
    pub fn with_options(
        api_key: impl Into<String>,
        options: ClientOptions,
    ) -> Result<Self, ClientError> {
        let transport = HttpTransport::new(api_key, &options)?;
        Ok(Self::with_transport(transport))
    }

    /// Create a client from `OPENMONETIZE_*` environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Configuration`] if `OPENMONETIZE_API_KEY` is
    /// unset or empty.
    pub fn from_env() -> Result<Self, ClientError> {
        let api_key = std::env::var(ENV_API_KEY)
            .ok()
            .filter(|key| !key.is_empty())
            .ok_or_else(|| ClientError::Configuration(format!("{ENV_API_KEY} is not set")))?;
        Self::with_options(api_key, ClientOptions::from_env())
    }

    /// Create a client over an injected transport.
    pub fn with_transport(transport: impl Transport + 'static) -> Self {
        Self {
            api: ApiClient::new(Arc::new(transport)),
        }
    }

    /// Usage event ingestion and history.
    #[must_use]
    pub fn events(&self) -> EventsApi {
        EventsApi::new(self.api.clone())
    }

    /// Customer registration and profile.
    #[must_use]
    pub fn customers(&self) -> CustomersApi {
        CustomersApi::new(self.api.clone())
    }

    /// Credit wallets and transactions.
    #[must_use]
    pub fn credits(&self) -> CreditsApi {
        CreditsApi::new(self.api.clone())
    }

    /// Entitlement checks and management.
    #[must_use]
    pub fn entitlements(&self) -> EntitlementsApi {
        EntitlementsApi::new(self.api.clone())
    }

    /// Usage, cost, and burn-rate analytics.
    #[must_use]
    pub fn analytics(&self) -> AnalyticsApi {
        AnalyticsApi::new(self.api.clone())
    }

    /// Liveness, readiness, and service info.
    #[must_use]
    pub fn health(&self) -> HealthApi {
        HealthApi::new(self.api.clone())
    }

    /// Demo-mode completions.
    #[must_use]
    pub fn demo(&self) -> DemoApi {
        DemoApi::new(self.api.clone())
    }
}

/// Client options for customization.
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// API base URL (default: `https://api.openmonetize.io`).
    pub base_url: String,
    /// Request timeout in seconds (default: 30).
    pub timeout_seconds: u64,
    /// `User-Agent` header value.
    pub user_agent: String,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_seconds: 30,
            user_agent: format!("openmonetize-rust/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ClientOptions {
    /// Load options from environment variables, falling back to defaults.
    ///
    /// A timeout that is not a positive integer is ignored.
    #[must_use]
    pub fn from_env() -> Self {
        let mut options = Self::default();
        if let Ok(base_url) = std::env::var(ENV_BASE_URL) {
            options = options.with_base_url(base_url);
        }
        if let Some(timeout_seconds) = std::env::var(ENV_TIMEOUT_SECONDS)
            .ok()
            .and_then(|s| s.parse().ok())
            .filter(|&seconds| seconds > 0)
        {
            options.timeout_seconds = timeout_seconds;
        }
        options
    }

    /// Set the base URL. Trailing slashes are dropped.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the request timeout. Must be at least one second; building a
    /// client with `0` fails with [`ClientError::Configuration`].
    #[must_use]
    pub fn with_timeout_seconds(mut self, timeout_seconds: u64) -> Self {
        self.timeout_seconds = timeout_seconds;
        self
    }

    /// Set the `User-Agent` header.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

/// Dispatches requests through a transport and classifies responses.
///
/// Every facade wraps one of these. Non-2xx responses become
/// [`TransportError::Status`]; bodies are decoded with serde.
#[derive(Clone)]
pub struct ApiClient {
    transport: Arc<dyn Transport>,
}

impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient").finish_non_exhaustive()
    }
}

impl ApiClient {
    /// Create a dispatcher over `transport`.
    #[must_use]
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Send `request`, failing on any non-2xx status.
    pub(crate) async fn execute(&self, request: ApiRequest) -> Result<ApiResponse, ClientError> {
        self.execute_accepting(request, &[]).await
    }

    /// Send `request`, treating the statuses in `accepted` as successes too.
    pub(crate) async fn execute_accepting(
        &self,
        request: ApiRequest,
        accepted: &[u16],
    ) -> Result<ApiResponse, ClientError> {
        let method = request.method().clone();
        let path = request.path();
        let response = self.transport.send(request).await?;

        if response.is_success() || accepted.contains(&response.status) {
            return Ok(response);
        }

        tracing::warn!(
            %method,
            %path,
            status = response.status,
            "OpenMonetize request failed"
        );
        Err(status_error(&response).into())
    }

    /// Send `request` and decode the whole body.
    pub(crate) async fn json<T: DeserializeOwned>(
        &self,
        request: ApiRequest,
    ) -> Result<T, ClientError> {
        let response = self.execute(request).await?;
        decode(&response)
    }

    /// Send `request` and decode the `data` member of the body.
    pub(crate) async fn data<T: DeserializeOwned>(
        &self,
        request: ApiRequest,
    ) -> Result<T, ClientError> {
        self.json::<DataEnvelope<T>>(request)
            .await
            .map(|envelope| envelope.data)
    }
}

/// Decode a response body; an empty body reads as JSON `null`.
pub(crate) fn decode<T: DeserializeOwned>(response: &ApiResponse) -> Result<T, ClientError> {
    let body = response.body.trim();
    let body = if body.is_empty() { "null" } else { body };
    serde_json::from_str(body).map_err(ClientError::Decode)
}

fn status_error(response: &ApiResponse) -> TransportError {
    let status = response.status;
    match serde_json::from_str::<ApiErrorResponse>(&response.body) {
        Ok(body) => TransportError::Status {
            status,
            error: body.error,
            message: body.message.unwrap_or_else(|| format!("HTTP {status}")),
            details: body.details,
        },
        Err(_) => TransportError::Status {
            status,
            error: None,
            message: format!("HTTP {status}"),
            details: None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_options() {
        let options = ClientOptions::default();
        assert_eq!(options.base_url, "https://api.openmonetize.io");
        assert_eq!(options.timeout_seconds, 30);
        assert!(options.user_agent.starts_with("openmonetize-rust/"));
    }

    #[test]
    fn options_trim_trailing_slash() {
        let options = ClientOptions::default().with_base_url("http://localhost:3000/");
        assert_eq!(options.base_url, "http://localhost:3000");
    }

    #[test]
    fn options_builder() {
        let options = ClientOptions::default()
            .with_timeout_seconds(5)
            .with_user_agent("billing-worker/1.0");
        assert_eq!(options.timeout_seconds, 5);
        assert_eq!(options.user_agent, "billing-worker/1.0");
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let options = ClientOptions::default().with_timeout_seconds(0);
        let err = OpenMonetizeClient::with_options("om_live_test", options).unwrap_err();
        assert!(matches!(err, ClientError::Configuration(_)));
    }

    #[test]
    fn client_creation() {
        assert!(OpenMonetizeClient::new("om_live_test").is_ok());
    }

    #[test]
    fn status_error_uses_gateway_body() {
        let response = ApiResponse {
            status: 403,
            body: r#"{"error":"Forbidden","message":"Access denied to this customer"}"#.into(),
        };
        match status_error(&response) {
            TransportError::Status {
                status,
                error,
                message,
                ..
            } => {
                assert_eq!(status, 403);
                assert_eq!(error.as_deref(), Some("Forbidden"));
                assert_eq!(message, "Access denied to this customer");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn status_error_without_body() {
        let response = ApiResponse {
            status: 502,
            body: "<html>bad gateway</html>".into(),
        };
        let err = status_error(&response);
        assert_eq!(err.to_string(), "API error: 502 - HTTP 502");
    }

    #[test]
    fn empty_body_decodes_as_null() {
        let response = ApiResponse {
            status: 204,
            body: String::new(),
        };
        let value: Option<serde_json::Value> = decode(&response).unwrap();
        assert!(value.is_none());
    }
}
