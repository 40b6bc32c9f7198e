//! Credit wallets and transactions.

use super::encode_body;
use crate::client::ApiClient;
use crate::error::ClientError;
use crate::transport::ApiRequest;
use crate::types::{
    CreditBalance, CreditTransaction, GrantCreditsRequest, GrantCreditsResponse, Page, Pagination,
    PurchaseCreditsRequest, PurchaseCreditsResponse, WalletBalance,
};

/// Credits API.
#[derive(Debug, Clone)]
pub struct CreditsApi {
    api: ApiClient,
}

impl CreditsApi {
    /// Create the facade over `api`.
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Balance of the authenticated customer's wallet.
    ///
    /// # Errors
    ///
    /// Returns a transport error if the request fails (404 when the customer
    /// has no wallet).
    pub async fn balance(&self) -> Result<WalletBalance, ClientError> {
        self.api.data(ApiRequest::get(["v1", "credits", "balance"])).await
    }

    /// Balance of an end user's wallet.
    ///
    /// # Errors
    ///
    /// Returns a transport error if the request fails.
    pub async fn user_balance(
        &self,
        customer_id: &str,
        user_id: &str,
    ) -> Result<CreditBalance, ClientError> {
        let request =
            ApiRequest::get(["v1", "customers", customer_id, "users", user_id, "credits"]);
        self.api.data(request).await
    }

    /// Top up an end user's wallet.
    ///
    /// # Errors
    ///
    /// Returns a transport error if the request fails.
    pub async fn purchase(
        &self,
        request: &PurchaseCreditsRequest,
    ) -> Result<PurchaseCreditsResponse, ClientError> {
        let request =
            ApiRequest::post(["v1", "credits", "purchase"]).with_json_body(encode_body(request)?);
        self.api.data(request).await
    }

    /// Grant free credits to a customer, user, or team wallet.
    ///
    /// # Errors
    ///
    /// Returns a transport error if the request fails (409 when the
    /// idempotency key was already used).
    pub async fn grant(
        &self,
        request: &GrantCreditsRequest,
    ) -> Result<GrantCreditsResponse, ClientError> {
        let request =
            ApiRequest::post(["v1", "credits", "grant"]).with_json_body(encode_body(request)?);
        self.api.data(request).await
    }

    /// Ledger entries for an end user, newest first.
    ///
    /// # Errors
    ///
    /// Returns a transport error if the request fails.
    pub async fn transactions(
        &self,
        customer_id: &str,
        user_id: &str,
        pagination: &Pagination,
    ) -> Result<Page<CreditTransaction>, ClientError> {
        let request =
            ApiRequest::get(["v1", "customers", customer_id, "users", user_id, "transactions"])
                .with_query_opt("limit", pagination.limit)
                .with_query_opt("offset", pagination.offset);
        self.api.json(request).await
    }
}
