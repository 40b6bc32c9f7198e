//! OpenMonetize Client SDK.
//!
//! This crate provides a client library for reporting AI usage to
//! OpenMonetize and calling the rest of its API.
//!
//! # Example
//!
//! ```no_run
//! use openmonetize_client::{EventEnvelope, OpenMonetizeClient, TokenUsageEvent};
//!
//! # async fn example() -> Result<(), openmonetize_client::ClientError> {
//! let client = OpenMonetizeClient::new("om_live_your_api_key")?;
//!
//! // Report LLM usage
//! let envelope = EventEnvelope::generate("customer-uuid", "ai-chat")?.with_user_id("user-uuid");
//! let event = TokenUsageEvent::new(envelope, "OPENAI", "gpt-4", 1000, 500);
//! let response = client.events().record(event).await?;
//!
//! println!("Accepted {} event(s)", response.accepted);
//! # Ok(())
//! # }
//! ```
//!
//! Requests go through a [`Transport`]. [`HttpTransport`] is used by default;
//! [`OpenMonetizeClient::with_transport`] accepts any other implementation.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod api;
mod client;
mod error;
mod transport;
mod types;

pub use api::{
    AnalyticsApi, CreditsApi, CustomersApi, DemoApi, EntitlementsApi, EventsApi, HealthApi,
};
pub use client::{ApiClient, ClientOptions, OpenMonetizeClient, DEFAULT_BASE_URL};
pub use error::{ClientError, TransportError};
pub use transport::{ApiRequest, ApiResponse, HttpTransport, Transport};
pub use types::*;

pub use openmonetize_core::{
    normalize_usage, CustomEvent, EventEnvelope, EventType, ImageGenerationEvent, Metadata,
    ModelError, Provider, TokenCounts, TokenUsageEvent, UsageEvent, ValidationError,
    ValidationErrorKind, WireMap, WireModel,
};
