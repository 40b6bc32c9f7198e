//! Usage event ingestion and history.

use openmonetize_core::{UsageEvent, ValidationError, ValidationErrorKind, WireModel};
use serde_json::{json, Value};

use super::encode_body;
use crate::client::ApiClient;
use crate::error::ClientError;
use crate::transport::ApiRequest;
use crate::types::{EventRecord, IngestEventsResponse, ListEventsQuery, Page};

/// Events API.
#[derive(Debug, Clone)]
pub struct EventsApi {
    api: ApiClient,
}

impl EventsApi {
    /// Create the facade over `api`.
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Send a batch of usage events.
    ///
    /// Events are encoded with their wire maps, so the body carries exactly
    /// the fields each event has.
    ///
    /// # Errors
    ///
    /// Returns a validation error for an empty batch, or a transport error if
    /// the request fails.
    pub async fn ingest(&self, events: &[UsageEvent]) -> Result<IngestEventsResponse, ClientError> {
        if events.is_empty() {
            return Err(ValidationError::new("events", ValidationErrorKind::Empty).into());
        }

        let body: Vec<Value> = events
            .iter()
            .map(|event| Value::Object(event.to_wire_map()))
            .collect();
        let request = ApiRequest::post(["v1", "events", "ingest"])
            .with_json_body(encode_body(&json!({ "events": body }))?);

        let response: IngestEventsResponse = self.api.json(request).await?;

        tracing::debug!(
            batch_size = events.len(),
            accepted = response.accepted,
            duplicates = response.duplicates,
            batch_id = ?response.batch_id,
            "Events ingested"
        );

        Ok(response)
    }

    /// Send a single usage event.
    ///
    /// # Errors
    ///
    /// Returns a transport error if the request fails.
    pub async fn record(
        &self,
        event: impl Into<UsageEvent>,
    ) -> Result<IngestEventsResponse, ClientError> {
        self.ingest(&[event.into()]).await
    }

    /// Validate an event given as wire JSON, then send it.
    ///
    /// # Errors
    ///
    /// Returns a parse error if `text` is not JSON, a validation error if it
    /// is not a well-formed event, or a transport error if the request fails.
    pub async fn record_json(&self, text: &str) -> Result<IngestEventsResponse, ClientError> {
        let event = UsageEvent::from_json(text)?;
        self.record(event).await
    }

    /// List rated usage events, newest first.
    ///
    /// # Errors
    ///
    /// Returns a transport error if the request fails.
    pub async fn list(&self, query: &ListEventsQuery) -> Result<Page<EventRecord>, ClientError> {
        let request = ApiRequest::get(["v1", "events"])
            .with_query_opt("customerId", query.customer_id.as_deref())
            .with_query_opt("limit", query.pagination.limit)
            .with_query_opt("offset", query.pagination.offset);
        self.api.json(request).await
    }
}
