//! Usage, cost, and burn-rate analytics.

use crate::client::ApiClient;
use crate::error::ClientError;
use crate::transport::ApiRequest;
use crate::types::{AnalyticsQuery, BurnRate, CostAnalytics, GroupBy, UsageAnalytics};

/// Analytics API.
#[derive(Debug, Clone)]
pub struct AnalyticsApi {
    api: ApiClient,
}

impl AnalyticsApi {
    /// Create the facade over `api`.
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Usage broken down by feature, provider, event type, and time.
    ///
    /// # Errors
    ///
    /// Returns a transport error if the request fails.
    pub async fn usage(&self, query: &AnalyticsQuery) -> Result<UsageAnalytics, ClientError> {
        let request = window(ApiRequest::get(["v1", "analytics", "usage"]), query)
            .with_query_opt("groupBy", query.group_by.map(GroupBy::as_str));
        self.api.data(request).await
    }

    /// Revenue, provider cost, and margin by provider.
    ///
    /// # Errors
    ///
    /// Returns a transport error if the request fails.
    pub async fn costs(&self, query: &AnalyticsQuery) -> Result<CostAnalytics, ClientError> {
        let request = window(ApiRequest::get(["v1", "analytics", "costs"]), query);
        self.api.data(request).await
    }

    /// Credit burn rate and run-out projection.
    ///
    /// # Errors
    ///
    /// Returns a transport error if the request fails.
    pub async fn burn_rate(
        &self,
        customer_id: Option<&str>,
        user_id: Option<&str>,
    ) -> Result<BurnRate, ClientError> {
        let request = ApiRequest::get(["v1", "analytics", "burn-rate"])
            .with_query_opt("customerId", customer_id)
            .with_query_opt("userId", user_id);
        self.api.data(request).await
    }
}

fn window(request: ApiRequest, query: &AnalyticsQuery) -> ApiRequest {
    request
        .with_query_opt("customerId", query.customer_id.as_deref())
        .with_query_opt("startDate", query.start_date.as_deref())
        .with_query_opt("endDate", query.end_date.as_deref())
}
