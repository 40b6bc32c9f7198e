//! Request and response types for the OpenMonetize API.
//!
//! Gateway bodies use camelCase keys. The ingestion response and the demo
//! completion keep the snake_case keys their services emit.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Envelopes
// ---------------------------------------------------------------------------

/// `{ "data": ... }` wrapper used by most gateway responses.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct DataEnvelope<T> {
    pub data: T,
}

/// Error body returned with non-2xx statuses.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiErrorResponse {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub details: Option<serde_json::Value>,
}

/// Offset pagination for list endpoints.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    /// Page size (server default 50, max 100).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    /// Number of records to skip.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,
}

impl Pagination {
    /// Request `limit` records starting at `offset`.
    #[must_use]
    pub fn new(limit: u32, offset: u32) -> Self {
        Self {
            limit: Some(limit),
            offset: Some(offset),
        }
    }
}

/// Pagination metadata echoed by list endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct PageInfo {
    /// Page size used.
    pub limit: u64,
    /// Records skipped.
    pub offset: u64,
    /// Total matching records.
    pub total: u64,
}

/// A page of records plus its pagination metadata.
#[derive(Debug, Clone, Deserialize)]
pub struct Page<T> {
    /// Records on this page.
    pub data: Vec<T>,
    /// Pagination metadata.
    pub pagination: PageInfo,
}

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

/// Processing state reported by the ingestion service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IngestStatus {
    /// New events were queued for rating.
    Processing,
    /// Every event in the batch had been seen before.
    AllDuplicates,
    /// A status this client does not know about.
    #[serde(other)]
    Unknown,
}

/// Result of `POST /v1/events/ingest`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct IngestEventsResponse {
    /// Events accepted for processing.
    pub accepted: u64,
    /// Events rejected by the service.
    #[serde(default)]
    pub rejected: u64,
    /// Events skipped as duplicates of earlier event IDs.
    #[serde(default)]
    pub duplicates: u64,
    /// Batch identifier, absent when nothing was accepted.
    #[serde(default)]
    pub batch_id: Option<String>,
    /// Processing state.
    pub status: IngestStatus,
    /// Server-side processing time.
    #[serde(default)]
    pub processing_time_ms: Option<u64>,
    /// Informational message.
    #[serde(default)]
    pub message: Option<String>,
}

/// Filters for `GET /v1/events`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListEventsQuery {
    /// Customer to list; defaults to the authenticated customer.
    pub customer_id: Option<String>,
    /// Page window.
    pub pagination: Pagination,
}

/// A rated usage event from the event history.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRecord {
    /// Event ID.
    pub id: String,
    /// Event type literal (e.g. `TOKEN_USAGE`).
    pub event_type: String,
    /// Feature identifier.
    pub feature_id: String,
    /// Provider, for AI events.
    #[serde(default)]
    pub provider: Option<String>,
    /// Model, for AI events.
    #[serde(default)]
    pub model: Option<String>,
    /// Input tokens.
    #[serde(default, with = "lenient::option")]
    pub input_tokens: Option<f64>,
    /// Output tokens.
    #[serde(default, with = "lenient::option")]
    pub output_tokens: Option<f64>,
    /// Credits burned by this event.
    #[serde(with = "lenient")]
    pub credits_burned: f64,
    /// Provider cost in USD.
    #[serde(default, with = "lenient::option")]
    pub cost_usd: Option<f64>,
    /// Event timestamp (RFC 3339).
    pub timestamp: String,
    /// Event metadata.
    #[serde(default)]
    pub metadata: Option<serde_json::Map<String, serde_json::Value>>,
}

// ---------------------------------------------------------------------------
// Customers
// ---------------------------------------------------------------------------

/// Customer pricing tier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CustomerTier {
    /// Entry tier.
    #[default]
    Starter,
    /// Mid tier.
    Growth,
    /// Top tier.
    Enterprise,
}

/// Body of `POST /v1/customers/register`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegisterCustomerRequest {
    /// Display name.
    pub name: String,
    /// Contact email; must be unique.
    pub email: String,
    /// Tier (server default `STARTER`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tier: Option<CustomerTier>,
}

/// A newly registered customer.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisteredCustomer {
    /// Customer ID.
    pub customer_id: String,
    /// API key. Returned only once.
    pub api_key: String,
    /// Display name.
    pub name: String,
    /// Contact email.
    pub email: String,
    /// Tier.
    pub tier: String,
    /// Creation time (RFC 3339).
    pub created_at: String,
}

/// The authenticated customer's profile.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerProfile {
    /// Customer ID.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Contact email.
    pub email: String,
    /// Tier.
    pub tier: String,
    /// Account status (e.g. `ACTIVE`).
    pub status: String,
    /// Creation time (RFC 3339).
    pub created_at: String,
}

// ---------------------------------------------------------------------------
// Credits
// ---------------------------------------------------------------------------

/// Balance of the authenticated customer's own wallet.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletBalance {
    /// Total balance.
    #[serde(with = "lenient")]
    pub balance: f64,
    /// Credits reserved by in-flight operations.
    #[serde(with = "lenient")]
    pub reserved_balance: f64,
    /// Spendable credits.
    #[serde(with = "lenient")]
    pub available_balance: f64,
    /// Wallet currency.
    #[serde(default)]
    pub currency: Option<String>,
}

/// Balance of an end user's wallet.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditBalance {
    /// Total balance.
    #[serde(with = "lenient")]
    pub balance: f64,
    /// Reserved credits.
    #[serde(with = "lenient")]
    pub reserved: f64,
    /// Spendable credits.
    #[serde(with = "lenient")]
    pub available: f64,
    /// Expiry of the credits (RFC 3339).
    #[serde(default)]
    pub expires_at: Option<String>,
}

/// Body of `POST /v1/credits/purchase`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseCreditsRequest {
    /// Customer owning the user.
    pub customer_id: String,
    /// End user receiving the credits.
    pub user_id: String,
    /// Credits to add (at least 1).
    pub amount: f64,
    /// Price paid in USD.
    pub purchase_price: f64,
    /// Optional expiry (RFC 3339).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<String>,
}

/// Result of a credit purchase.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseCreditsResponse {
    /// Ledger transaction ID.
    pub transaction_id: String,
    /// Balance after the purchase.
    #[serde(with = "lenient")]
    pub new_balance: f64,
}

/// Body of `POST /v1/credits/grant`.
///
/// Without `user_id` or `team_id` the credits go to the customer wallet.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GrantCreditsRequest {
    /// Customer owning the wallet.
    pub customer_id: String,
    /// End user wallet.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    /// Team wallet.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team_id: Option<String>,
    /// Credits to grant (at least 1).
    pub amount: f64,
    /// Reason recorded on the transaction.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    /// Extra data recorded on the transaction.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Map<String, serde_json::Value>>,
    /// Key that makes repeated grants a conflict instead of a double grant.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub idempotency_key: Option<String>,
    /// Optional expiry (RFC 3339).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<String>,
}

/// Result of a credit grant.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrantCreditsResponse {
    /// Ledger transaction ID.
    pub transaction_id: String,
    /// Wallet credited.
    pub wallet_id: String,
    /// Balance after the grant.
    #[serde(with = "lenient")]
    pub new_balance: f64,
    /// Amount granted.
    #[serde(with = "lenient")]
    pub amount: f64,
}

/// Kind of ledger entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionType {
    /// Paid top-up.
    Purchase,
    /// Consumption.
    Burn,
    /// Refund.
    Refund,
    /// Expired credits.
    Expiration,
    /// Free grant.
    Grant,
    /// A type this client does not know about.
    #[serde(other)]
    Other,
}

/// A credit ledger entry.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditTransaction {
    /// Transaction ID.
    pub id: String,
    /// Entry kind.
    pub transaction_type: TransactionType,
    /// Signed amount.
    #[serde(with = "lenient")]
    pub amount: f64,
    /// Balance before the entry.
    #[serde(with = "lenient")]
    pub balance_before: f64,
    /// Balance after the entry.
    #[serde(with = "lenient")]
    pub balance_after: f64,
    /// Description.
    #[serde(default)]
    pub description: Option<String>,
    /// Creation time (RFC 3339).
    pub created_at: String,
}

// ---------------------------------------------------------------------------
// Entitlements
// ---------------------------------------------------------------------------

/// Kind of action an entitlement check is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionType {
    /// LLM token consumption.
    TokenUsage,
    /// Image generation.
    ImageGeneration,
    /// Plain API call.
    ApiCall,
    /// Anything else.
    Custom,
}

/// The action being checked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntitlementAction {
    /// Action kind.
    #[serde(rename = "type")]
    pub action_type: ActionType,
    /// Provider, for cost estimation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
    /// Model, for cost estimation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// Expected input tokens.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_input_tokens: Option<u64>,
    /// Expected output tokens.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_output_tokens: Option<u64>,
}

impl EntitlementAction {
    /// An action of `action_type` with no estimates.
    #[must_use]
    pub fn new(action_type: ActionType) -> Self {
        Self {
            action_type,
            provider: None,
            model: None,
            estimated_input_tokens: None,
            estimated_output_tokens: None,
        }
    }

    /// A token usage action with estimates for cost calculation.
    #[must_use]
    pub fn token_usage(
        provider: impl Into<String>,
        model: impl Into<String>,
        estimated_input_tokens: u64,
        estimated_output_tokens: u64,
    ) -> Self {
        Self {
            action_type: ActionType::TokenUsage,
            provider: Some(provider.into()),
            model: Some(model.into()),
            estimated_input_tokens: Some(estimated_input_tokens),
            estimated_output_tokens: Some(estimated_output_tokens),
        }
    }
}

/// Body of `POST /v1/entitlements/check`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntitlementCheckRequest {
    /// End user performing the action.
    pub user_id: String,
    /// Feature being used.
    pub feature_id: String,
    /// Action details.
    pub action: EntitlementAction,
}

/// Follow-up the gateway suggests when a check is denied.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SuggestedAction {
    /// Action kind (e.g. `upgrade`, `purchase_credits`).
    #[serde(rename = "type")]
    pub action_type: String,
    /// Label for display.
    pub label: String,
    /// Relative URL.
    pub url: String,
}

/// Result of an entitlement check.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntitlementCheckResponse {
    /// Whether the action may proceed.
    pub allowed: bool,
    /// Reason for a denial.
    #[serde(default)]
    pub reason: Option<String>,
    /// Estimated cost in credits.
    #[serde(default, with = "lenient::option")]
    pub estimated_cost_credits: Option<f64>,
    /// Estimated cost in USD.
    #[serde(default, with = "lenient::option")]
    pub estimated_cost_usd: Option<f64>,
    /// Spendable balance at check time.
    #[serde(default, with = "lenient::option")]
    pub current_balance: Option<f64>,
    /// Suggested follow-ups.
    #[serde(default)]
    pub actions: Vec<SuggestedAction>,
}

/// How a limit is enforced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LimitType {
    /// Requests over the limit are denied.
    Hard,
    /// Requests over the limit are allowed but flagged.
    Soft,
    /// No limit.
    None,
}

/// Window a limit applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LimitPeriod {
    /// Resets every day.
    Daily,
    /// Resets every month.
    Monthly,
    /// Never resets.
    Total,
}

/// An entitlement as listed by the gateway.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entitlement {
    /// Entitlement ID.
    pub id: String,
    /// End user the entitlement is scoped to, if any.
    #[serde(default)]
    pub user_id: Option<String>,
    /// Feature identifier.
    pub feature_id: String,
    /// Enforcement mode.
    pub limit_type: LimitType,
    /// Limit value.
    #[serde(default)]
    pub limit_value: Option<u64>,
    /// Limit window.
    #[serde(default)]
    pub period: Option<LimitPeriod>,
    /// Free-form metadata.
    #[serde(default)]
    pub metadata: Option<serde_json::Value>,
    /// Events counted against the limit in the current window.
    #[serde(default)]
    pub current_usage: Option<u64>,
}

/// Body of `POST /v1/entitlements`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEntitlementRequest {
    /// Scope to one end user; customer-wide when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    /// Feature identifier.
    pub feature_id: String,
    /// Enforcement mode.
    pub limit_type: LimitType,
    /// Limit value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit_value: Option<u64>,
    /// Limit window.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period: Option<LimitPeriod>,
    /// Free-form metadata.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Map<String, serde_json::Value>>,
}

/// Body of `PUT /v1/entitlements/{id}`. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEntitlementRequest {
    /// New enforcement mode.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit_type: Option<LimitType>,
    /// New limit value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit_value: Option<u64>,
    /// New limit window.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period: Option<LimitPeriod>,
    /// Replacement metadata.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Map<String, serde_json::Value>>,
}

/// Entitlement returned by create and update.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntitlementSummary {
    /// Entitlement ID.
    pub id: String,
    /// Feature identifier.
    pub feature_id: String,
    /// Enforcement mode.
    pub limit_type: LimitType,
    /// Limit value.
    #[serde(default)]
    pub limit_value: Option<u64>,
}

// ---------------------------------------------------------------------------
// Analytics
// ---------------------------------------------------------------------------

/// Timeline bucket size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupBy {
    /// One bucket per day.
    Day,
    /// One bucket per week.
    Week,
    /// One bucket per month.
    Month,
}

impl GroupBy {
    /// Query string literal.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Day => "day",
            Self::Week => "week",
            Self::Month => "month",
        }
    }
}

/// Filters for the usage and cost analytics endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnalyticsQuery {
    /// Customer; defaults to the authenticated customer.
    pub customer_id: Option<String>,
    /// Window start (RFC 3339).
    pub start_date: Option<String>,
    /// Window end (RFC 3339).
    pub end_date: Option<String>,
    /// Timeline bucket size. Ignored by the cost endpoint.
    pub group_by: Option<GroupBy>,
}

/// Totals for a usage window.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageSummary {
    /// Event count.
    #[serde(with = "lenient")]
    pub total_events: f64,
    /// Input tokens.
    #[serde(with = "lenient")]
    pub total_input_tokens: f64,
    /// Output tokens.
    #[serde(with = "lenient")]
    pub total_output_tokens: f64,
    /// Credits burned.
    #[serde(with = "lenient")]
    pub total_credits_burned: f64,
    /// Provider cost in USD.
    #[serde(with = "lenient")]
    pub total_cost_usd: f64,
}

/// Usage for one feature.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureUsage {
    /// Feature identifier.
    pub feature_id: String,
    /// Event count.
    pub event_count: u64,
    /// Credits burned.
    #[serde(with = "lenient")]
    pub credits_burned: f64,
    /// Provider cost in USD.
    #[serde(with = "lenient")]
    pub cost_usd: f64,
}

/// Usage for one provider and model.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderUsage {
    /// Provider.
    pub provider: String,
    /// Model.
    pub model: String,
    /// Event count.
    pub event_count: u64,
    /// Input tokens.
    #[serde(with = "lenient")]
    pub input_tokens: f64,
    /// Output tokens.
    #[serde(with = "lenient")]
    pub output_tokens: f64,
}

/// Usage for one event type.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventTypeUsage {
    /// Event type literal.
    pub event_type: String,
    /// Event count.
    pub event_count: u64,
    /// Credits burned.
    #[serde(with = "lenient")]
    pub credits_burned: f64,
    /// Provider cost in USD.
    #[serde(with = "lenient")]
    pub cost_usd: f64,
}

/// One timeline bucket.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelinePoint {
    /// Bucket start date.
    pub date: String,
    /// Event count.
    pub events: u64,
    /// Credits burned.
    #[serde(with = "lenient")]
    pub credits_burned: f64,
}

/// Result of `GET /v1/analytics/usage`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageAnalytics {
    /// Totals.
    pub summary: UsageSummary,
    /// Breakdown by feature.
    #[serde(default)]
    pub by_feature: Vec<FeatureUsage>,
    /// Breakdown by provider and model.
    #[serde(default)]
    pub by_provider: Vec<ProviderUsage>,
    /// Breakdown by event type.
    #[serde(default)]
    pub by_event_type: Vec<EventTypeUsage>,
    /// Usage over time.
    #[serde(default)]
    pub timeline: Vec<TimelinePoint>,
}

/// Revenue and margin totals.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostSummary {
    /// Revenue in USD.
    #[serde(with = "lenient")]
    pub total_revenue: f64,
    /// Provider cost in USD.
    #[serde(with = "lenient")]
    pub total_provider_cost: f64,
    /// Margin in USD.
    #[serde(with = "lenient")]
    pub total_margin: f64,
    /// Margin as a percentage of revenue.
    #[serde(with = "lenient")]
    pub margin_percent: f64,
}

/// Costs for one provider and model.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderCost {
    /// Provider.
    pub provider: String,
    /// Model.
    pub model: String,
    /// Provider cost in USD.
    #[serde(with = "lenient")]
    pub provider_cost: f64,
    /// Revenue in USD.
    #[serde(with = "lenient")]
    pub revenue: f64,
    /// Margin in USD.
    #[serde(with = "lenient")]
    pub margin: f64,
}

/// Result of `GET /v1/analytics/costs`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostAnalytics {
    /// Totals.
    pub summary: CostSummary,
    /// Breakdown by provider and model.
    #[serde(default)]
    pub by_provider: Vec<ProviderCost>,
}

/// Burn over a trailing window.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BurnWindow {
    /// Credits burned in the window.
    #[serde(with = "lenient")]
    pub credits_burned: f64,
    /// Average credits burned per day.
    #[serde(with = "lenient")]
    pub average_per_day: f64,
}

/// When the balance is projected to run out.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectedRunout {
    /// Days left at the current rate; absent when nothing is being burned.
    #[serde(default, with = "lenient::option")]
    pub days_remaining: Option<f64>,
    /// Projected run-out date (RFC 3339).
    #[serde(default)]
    pub estimated_runout_date: Option<String>,
}

/// Advice attached to a burn-rate report.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Recommendation {
    /// Severity or category (e.g. `warning`).
    #[serde(rename = "type")]
    pub kind: String,
    /// Message for display.
    pub message: String,
    /// Suggested action identifier.
    #[serde(default)]
    pub action: Option<String>,
}

/// Result of `GET /v1/analytics/burn-rate`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BurnRate {
    /// Current balance.
    #[serde(with = "lenient")]
    pub current_balance: f64,
    /// Last seven days.
    pub last7_days: BurnWindow,
    /// Last thirty days.
    pub last30_days: BurnWindow,
    /// Run-out projection.
    pub projected_runout: ProjectedRunout,
    /// Advice.
    #[serde(default)]
    pub recommendations: Vec<Recommendation>,
}

// ---------------------------------------------------------------------------
// Health
// ---------------------------------------------------------------------------

/// Result of `GET /health`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HealthStatus {
    /// `ok` when the gateway is up.
    pub status: String,
    /// Server time (RFC 3339).
    #[serde(default)]
    pub timestamp: Option<String>,
}

/// Result of `GET /ready`, returned for both 200 and 503.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Readiness {
    /// `ready` or `degraded`.
    pub status: String,
    /// Per-dependency results.
    #[serde(default)]
    pub checks: BTreeMap<String, bool>,
    /// Server time (RFC 3339).
    #[serde(default)]
    pub timestamp: Option<String>,
}

impl Readiness {
    /// Returns `true` if every dependency check passed.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.status == "ready" && self.checks.values().all(|ok| *ok)
    }
}

/// Result of `GET /v1/info`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ServiceInfo {
    /// Service name.
    pub service: String,
    /// Service version.
    pub version: String,
    /// Deployment environment.
    #[serde(default)]
    pub environment: Option<String>,
    /// Uptime in seconds.
    #[serde(default)]
    pub uptime: Option<f64>,
}

// ---------------------------------------------------------------------------
// Demo
// ---------------------------------------------------------------------------

/// Body of `POST /v1/demo/generate`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DemoGenerateRequest {
    /// Prompt text.
    pub prompt: String,
    /// Model (server default `gpt-4`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// Provider (server default `openai`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
}

/// A chat message in a demo completion.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DemoMessage {
    /// Author role.
    pub role: String,
    /// Message text.
    pub content: String,
}

/// One completion choice.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DemoChoice {
    /// Choice index.
    pub index: u32,
    /// Generated message.
    pub message: DemoMessage,
    /// Why generation stopped.
    pub finish_reason: String,
}

/// Token usage of a demo completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct DemoUsage {
    /// Prompt tokens.
    pub prompt_tokens: u64,
    /// Completion tokens.
    pub completion_tokens: u64,
    /// Sum of both.
    pub total_tokens: u64,
}

/// A simulated chat completion.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DemoCompletion {
    /// Completion ID.
    pub id: String,
    /// Object kind (`chat.completion`).
    pub object: String,
    /// Creation time (Unix seconds).
    pub created: u64,
    /// Model used.
    pub model: String,
    /// Generated choices.
    pub choices: Vec<DemoChoice>,
    /// Token usage.
    pub usage: DemoUsage,
}

/// Numbers the gateway sends either as JSON numbers or as decimal strings.
pub(crate) mod lenient {
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrString {
        Number(f64),
        String(String),
    }

    impl NumberOrString {
        fn into_f64<E: serde::de::Error>(self) -> Result<f64, E> {
            match self {
                Self::Number(n) => Ok(n),
                Self::String(s) => s
                    .trim()
                    .parse()
                    .map_err(|_| E::custom(format!("invalid numeric string: {s:?}"))),
            }
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        NumberOrString::deserialize(deserializer)?.into_f64()
    }

    pub mod option {
        use super::{Deserialize, Deserializer, NumberOrString};

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<f64>, D::Error> {
            Option::<NumberOrString>::deserialize(deserializer)?
                .map(NumberOrString::into_f64)
                .transpose()
        }
    }
}
