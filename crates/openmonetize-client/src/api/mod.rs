//! Resource facades, one per API area.
//!
//! Each facade holds a clone of the client's [`ApiClient`](crate::ApiClient)
//! and maps its operations onto gateway endpoints one to one.

mod analytics;
mod credits;
mod customers;
mod demo;
mod entitlements;
mod events;
mod health;

pub use analytics::AnalyticsApi;
pub use credits::CreditsApi;
pub use customers::CustomersApi;
pub use demo::DemoApi;
pub use entitlements::EntitlementsApi;
pub use events::EventsApi;
pub use health::HealthApi;

use serde::Serialize;

use crate::error::ClientError;

/// Encode a request body for the transport.
pub(crate) fn encode_body<T: Serialize + ?Sized>(body: &T) -> Result<String, ClientError> {
    serde_json::to_string(body).map_err(ClientError::Encode)
}
