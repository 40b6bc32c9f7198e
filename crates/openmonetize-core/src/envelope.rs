//! Fields shared by every usage event.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, ValidationError, ValidationErrorKind};
use crate::wire::{insert_opt, FieldReader, Metadata, WireMap};

/// Discriminator identifying which usage event variant a payload carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventType {
    /// Outcome-based metering in caller-defined units.
    Custom,
    /// Image generation (DALL-E, Stable Diffusion, ...).
    ImageGeneration,
    /// LLM token consumption.
    TokenUsage,
}

impl EventType {
    /// Wire name of the discriminator field.
    pub const FIELD: &'static str = "event_type";

    /// Get the wire literal for this event type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Custom => "CUSTOM",
            Self::ImageGeneration => "IMAGE_GENERATION",
            Self::TokenUsage => "TOKEN_USAGE",
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventType {
    type Err = ValidationError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "CUSTOM" => Ok(Self::Custom),
            "IMAGE_GENERATION" => Ok(Self::ImageGeneration),
            "TOKEN_USAGE" => Ok(Self::TokenUsage),
            _ => Err(ValidationError::wrong_type(
                Self::FIELD,
                "one of CUSTOM, IMAGE_GENERATION, TOKEN_USAGE",
            )),
        }
    }
}

/// Envelope fields common to all usage events.
///
/// Fields are private so the `customer_id` invariant holds for the lifetime
/// of the value; optional fields are set through the `with_*` builders.
#[derive(Debug, Clone, PartialEq)]
pub struct EventEnvelope {
    event_id: String,
    customer_id: String,
    user_id: Option<String>,
    feature_id: String,
    timestamp: String,
    metadata: Option<Metadata>,
}

impl EventEnvelope {
    pub(crate) const EVENT_ID: &'static str = "event_id";
    pub(crate) const CUSTOMER_ID: &'static str = "customer_id";
    pub(crate) const USER_ID: &'static str = "user_id";
    pub(crate) const FEATURE_ID: &'static str = "feature_id";
    pub(crate) const TIMESTAMP: &'static str = "timestamp";
    pub(crate) const METADATA: &'static str = "metadata";

    /// Create an envelope.
    ///
    /// `event_id` is opaque and used by the server for idempotency.
    /// `timestamp` should be ISO-8601 but is not checked here.
    ///
    /// # Errors
    ///
    /// Returns a validation error if `customer_id` is empty.
    pub fn new(
        event_id: impl Into<String>,
        customer_id: impl Into<String>,
        feature_id: impl Into<String>,
        timestamp: impl Into<String>,
    ) -> Result<Self> {
        let customer_id = customer_id.into();
        check_customer_id(&customer_id)?;
        Ok(Self {
            event_id: event_id.into(),
            customer_id,
            user_id: None,
            feature_id: feature_id.into(),
            timestamp: timestamp.into(),
            metadata: None,
        })
    }

    /// Create an envelope with a fresh UUID v4 event ID stamped with the
    /// current UTC time.
    ///
    /// # Errors
    ///
    /// Returns a validation error if `customer_id` is empty.
    pub fn generate(customer_id: impl Into<String>, feature_id: impl Into<String>) -> Result<Self> {
        Self::new(
            uuid::Uuid::new_v4().to_string(),
            customer_id,
            feature_id,
            chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
        )
    }

    /// Set the end user the event is attributed to.
    #[must_use]
    pub fn with_user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    /// Attach metadata to the event.
    #[must_use]
    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Caller-supplied unique event identifier.
    #[must_use]
    pub fn event_id(&self) -> &str {
        &self.event_id
    }

    /// The billed customer.
    #[must_use]
    pub fn customer_id(&self) -> &str {
        &self.customer_id
    }

    /// The end user, if any.
    #[must_use]
    pub fn user_id(&self) -> Option<&str> {
        self.user_id.as_deref()
    }

    /// The billable feature or SKU.
    #[must_use]
    pub fn feature_id(&self) -> &str {
        &self.feature_id
    }

    /// When the usage occurred.
    #[must_use]
    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    /// Extra attributes.
    #[must_use]
    pub fn metadata(&self) -> Option<&Metadata> {
        self.metadata.as_ref()
    }

    pub(crate) fn read(reader: &FieldReader<'_>) -> Result<Self> {
        let event_id = reader.required_str(Self::EVENT_ID)?;
        let customer_id = reader.required_str(Self::CUSTOMER_ID)?;
        check_customer_id(&customer_id)?;
        Ok(Self {
            event_id,
            customer_id,
            user_id: reader.optional_str(Self::USER_ID)?,
            feature_id: reader.required_str(Self::FEATURE_ID)?,
            timestamp: reader.required_str(Self::TIMESTAMP)?,
            metadata: reader.optional_metadata(Self::METADATA)?,
        })
    }

    /// Write the leading envelope fields and the discriminator.
    pub(crate) fn write_head(&self, map: &mut WireMap, event_type: EventType) {
        map.insert(Self::EVENT_ID.into(), self.event_id.clone().into());
        map.insert(Self::CUSTOMER_ID.into(), self.customer_id.clone().into());
        insert_opt(map, Self::USER_ID, self.user_id.clone());
        map.insert(EventType::FIELD.into(), event_type.as_str().into());
        map.insert(Self::FEATURE_ID.into(), self.feature_id.clone().into());
    }

    /// Write the trailing envelope fields.
    pub(crate) fn write_tail(&self, map: &mut WireMap) {
        map.insert(Self::TIMESTAMP.into(), self.timestamp.clone().into());
        insert_opt(map, Self::METADATA, self.metadata.clone());
    }
}

fn check_customer_id(customer_id: &str) -> Result<()> {
    if customer_id.is_empty() {
        return Err(ValidationError::new(EventEnvelope::CUSTOMER_ID, ValidationErrorKind::Empty).into());
    }
    Ok(())
}
