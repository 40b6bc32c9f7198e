//! Usage event models.
//!
//! Each variant pairs an [`EventEnvelope`] with its own payload and knows its
//! fixed [`EventType`]. [`UsageEvent`] is the closed sum over the variants and
//! dispatches on the `event_type` discriminator.

use serde_json::Value;

use crate::envelope::{EventEnvelope, EventType};
use crate::error::{Result, ValidationError, ValidationErrorKind};
use crate::provider::{normalize_usage, Provider};
use crate::wire::{insert_opt, wire_serde, FieldReader, WireMap, WireModel};

/// Outcome-based usage measured in caller-defined units.
#[derive(Debug, Clone, PartialEq)]
pub struct CustomEvent {
    envelope: EventEnvelope,
    unit_type: String,
    quantity: f64,
}

impl CustomEvent {
    /// The discriminator for this variant.
    pub const EVENT_TYPE: EventType = EventType::Custom;

    /// Wire field names accepted by this variant.
    pub const FIELDS: &'static [&'static str] = &[
        "event_id",
        "customer_id",
        "user_id",
        "event_type",
        "feature_id",
        "unit_type",
        "quantity",
        "timestamp",
        "metadata",
    ];

    /// Create a custom event.
    ///
    /// # Errors
    ///
    /// Returns a validation error if `quantity` is NaN or infinite, which
    /// JSON cannot carry.
    pub fn new(envelope: EventEnvelope, unit_type: impl Into<String>, quantity: f64) -> Result<Self> {
        if !quantity.is_finite() {
            return Err(ValidationError::new("quantity", ValidationErrorKind::NonFinite).into());
        }
        Ok(Self {
            envelope,
            unit_type: unit_type.into(),
            quantity,
        })
    }

    /// Shared envelope fields.
    #[must_use]
    pub fn envelope(&self) -> &EventEnvelope {
        &self.envelope
    }

    /// Unit of measurement (e.g. "images", "documents").
    #[must_use]
    pub fn unit_type(&self) -> &str {
        &self.unit_type
    }

    /// Number of units consumed.
    #[must_use]
    pub fn quantity(&self) -> f64 {
        self.quantity
    }
}

impl WireModel for CustomEvent {
    fn to_wire_map(&self) -> WireMap {
        let mut map = WireMap::new();
        self.envelope.write_head(&mut map, Self::EVENT_TYPE);
        map.insert("unit_type".into(), self.unit_type.clone().into());
        map.insert("quantity".into(), self.quantity.into());
        self.envelope.write_tail(&mut map);
        map
    }

    fn from_wire_map(map: &WireMap) -> Result<Self> {
        let reader = FieldReader::strict(map, Self::FIELDS)?;
        reader.event_type(Self::EVENT_TYPE)?;
        Ok(Self {
            envelope: EventEnvelope::read(&reader)?,
            unit_type: reader.required_str("unit_type")?,
            quantity: reader.required_f64("quantity")?,
        })
    }
}

/// Image generation usage.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageGenerationEvent {
    envelope: EventEnvelope,
    provider: String,
    model: String,
    image_count: u64,
    image_size: Option<String>,
    quality: Option<String>,
}

impl ImageGenerationEvent {
    /// The discriminator for this variant.
    pub const EVENT_TYPE: EventType = EventType::ImageGeneration;

    /// Wire field names accepted by this variant.
    pub const FIELDS: &'static [&'static str] = &[
        "event_id",
        "customer_id",
        "user_id",
        "event_type",
        "feature_id",
        "provider",
        "model",
        "image_count",
        "image_size",
        "quality",
        "timestamp",
        "metadata",
    ];

    /// Create an image generation event.
    ///
    /// On the wire `image_count` must be a non-negative JSON integer.
    #[must_use]
    pub fn new(
        envelope: EventEnvelope,
        provider: impl Into<String>,
        model: impl Into<String>,
        image_count: u64,
    ) -> Self {
        Self {
            envelope,
            provider: provider.into(),
            model: model.into(),
            image_count,
            image_size: None,
            quality: None,
        }
    }

    /// Set the image size (e.g. "1024x1024").
    #[must_use]
    pub fn with_image_size(mut self, image_size: impl Into<String>) -> Self {
        self.image_size = Some(image_size.into());
        self
    }

    /// Set the image quality (e.g. "standard", "hd").
    #[must_use]
    pub fn with_quality(mut self, quality: impl Into<String>) -> Self {
        self.quality = Some(quality.into());
        self
    }

    /// Shared envelope fields.
    #[must_use]
    pub fn envelope(&self) -> &EventEnvelope {
        &self.envelope
    }

    /// Generation backend.
    #[must_use]
    pub fn provider(&self) -> &str {
        &self.provider
    }

    /// Model identifier.
    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Number of images generated (non-negative).
    #[must_use]
    pub fn image_count(&self) -> u64 {
        self.image_count
    }

    /// Image size, if reported.
    #[must_use]
    pub fn image_size(&self) -> Option<&str> {
        self.image_size.as_deref()
    }

    /// Image quality, if reported.
    #[must_use]
    pub fn quality(&self) -> Option<&str> {
        self.quality.as_deref()
    }
}

impl WireModel for ImageGenerationEvent {
    fn to_wire_map(&self) -> WireMap {
        let mut map = WireMap::new();
        self.envelope.write_head(&mut map, Self::EVENT_TYPE);
        map.insert("provider".into(), self.provider.clone().into());
        map.insert("model".into(), self.model.clone().into());
        map.insert("image_count".into(), self.image_count.into());
        insert_opt(&mut map, "image_size", self.image_size.clone());
        insert_opt(&mut map, "quality", self.quality.clone());
        self.envelope.write_tail(&mut map);
        map
    }

    fn from_wire_map(map: &WireMap) -> Result<Self> {
        let reader = FieldReader::strict(map, Self::FIELDS)?;
        reader.event_type(Self::EVENT_TYPE)?;
        Ok(Self {
            envelope: EventEnvelope::read(&reader)?,
            provider: reader.required_str("provider")?,
            model: reader.required_str("model")?,
            image_count: reader.required_u64("image_count")?,
            image_size: reader.optional_str("image_size")?,
            quality: reader.optional_str("quality")?,
        })
    }
}

/// LLM token usage.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenUsageEvent {
    envelope: EventEnvelope,
    provider: String,
    model: String,
    input_tokens: u64,
    output_tokens: u64,
}

impl TokenUsageEvent {
    /// The discriminator for this variant.
    pub const EVENT_TYPE: EventType = EventType::TokenUsage;

    /// Wire field names accepted by this variant.
    pub const FIELDS: &'static [&'static str] = &[
        "event_id",
        "customer_id",
        "user_id",
        "event_type",
        "feature_id",
        "provider",
        "model",
        "input_tokens",
        "output_tokens",
        "timestamp",
        "metadata",
    ];

    /// Create a token usage event.
    ///
    /// On the wire both token counts must be non-negative JSON integers.
    #[must_use]
    pub fn new(
        envelope: EventEnvelope,
        provider: impl Into<String>,
        model: impl Into<String>,
        input_tokens: u64,
        output_tokens: u64,
    ) -> Self {
        Self {
            envelope,
            provider: provider.into(),
            model: model.into(),
            input_tokens,
            output_tokens,
        }
    }

    /// Create a token usage event from a raw provider response body,
    /// extracting token counts with [`normalize_usage`].
    #[must_use]
    pub fn from_provider_response(
        envelope: EventEnvelope,
        provider: &Provider,
        model: impl Into<String>,
        response: &Value,
    ) -> Self {
        let counts = normalize_usage(provider, response);
        Self::new(
            envelope,
            provider.as_str(),
            model,
            counts.input_tokens,
            counts.output_tokens,
        )
    }

    /// Shared envelope fields.
    #[must_use]
    pub fn envelope(&self) -> &EventEnvelope {
        &self.envelope
    }

    /// LLM provider.
    #[must_use]
    pub fn provider(&self) -> &str {
        &self.provider
    }

    /// Model identifier.
    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Prompt tokens consumed (non-negative).
    #[must_use]
    pub fn input_tokens(&self) -> u64 {
        self.input_tokens
    }

    /// Completion tokens generated (non-negative).
    #[must_use]
    pub fn output_tokens(&self) -> u64 {
        self.output_tokens
    }
}

impl WireModel for TokenUsageEvent {
    fn to_wire_map(&self) -> WireMap {
        let mut map = WireMap::new();
        self.envelope.write_head(&mut map, Self::EVENT_TYPE);
        map.insert("provider".into(), self.provider.clone().into());
        map.insert("model".into(), self.model.clone().into());
        map.insert("input_tokens".into(), self.input_tokens.into());
        map.insert("output_tokens".into(), self.output_tokens.into());
        self.envelope.write_tail(&mut map);
        map
    }

    fn from_wire_map(map: &WireMap) -> Result<Self> {
        let reader = FieldReader::strict(map, Self::FIELDS)?;
        reader.event_type(Self::EVENT_TYPE)?;
        Ok(Self {
            envelope: EventEnvelope::read(&reader)?,
            provider: reader.required_str("provider")?,
            model: reader.required_str("model")?,
            input_tokens: reader.required_u64("input_tokens")?,
            output_tokens: reader.required_u64("output_tokens")?,
        })
    }
}

/// Any billable usage event.
#[derive(Debug, Clone, PartialEq)]
pub enum UsageEvent {
    /// See [`CustomEvent`].
    Custom(CustomEvent),
    /// See [`ImageGenerationEvent`].
    ImageGeneration(ImageGenerationEvent),
    /// See [`TokenUsageEvent`].
    TokenUsage(TokenUsageEvent),
}

impl UsageEvent {
    /// The variant's discriminator.
    #[must_use]
    pub fn event_type(&self) -> EventType {
        match self {
            Self::Custom(_) => EventType::Custom,
            Self::ImageGeneration(_) => EventType::ImageGeneration,
            Self::TokenUsage(_) => EventType::TokenUsage,
        }
    }

    /// Shared envelope fields.
    #[must_use]
    pub fn envelope(&self) -> &EventEnvelope {
        match self {
            Self::Custom(event) => event.envelope(),
            Self::ImageGeneration(event) => event.envelope(),
            Self::TokenUsage(event) => event.envelope(),
        }
    }

    /// Shorthand for `self.envelope().event_id()`.
    #[must_use]
    pub fn event_id(&self) -> &str {
        self.envelope().event_id()
    }
}

impl WireModel for UsageEvent {
    fn to_wire_map(&self) -> WireMap {
        match self {
            Self::Custom(event) => event.to_wire_map(),
            Self::ImageGeneration(event) => event.to_wire_map(),
            Self::TokenUsage(event) => event.to_wire_map(),
        }
    }

    /// The discriminator is required here since it selects the variant.
    fn from_wire_map(map: &WireMap) -> Result<Self> {
        let event_type = match map.get(EventType::FIELD) {
            None | Some(Value::Null) => return Err(ValidationError::missing(EventType::FIELD).into()),
            Some(Value::String(literal)) => literal.parse::<EventType>()?,
            Some(_) => return Err(ValidationError::wrong_type(EventType::FIELD, "a string").into()),
        };
        match event_type {
            EventType::Custom => CustomEvent::from_wire_map(map).map(Self::Custom),
            EventType::ImageGeneration => {
                ImageGenerationEvent::from_wire_map(map).map(Self::ImageGeneration)
            }
            EventType::TokenUsage => TokenUsageEvent::from_wire_map(map).map(Self::TokenUsage),
        }
    }
}

impl From<CustomEvent> for UsageEvent {
    fn from(event: CustomEvent) -> Self {
        Self::Custom(event)
    }
}

impl From<ImageGenerationEvent> for UsageEvent {
    fn from(event: ImageGenerationEvent) -> Self {
        Self::ImageGeneration(event)
    }
}

impl From<TokenUsageEvent> for UsageEvent {
    fn from(event: TokenUsageEvent) -> Self {
        Self::TokenUsage(event)
    }
}

wire_serde!(CustomEvent);
wire_serde!(ImageGenerationEvent);
wire_serde!(TokenUsageEvent);
wire_serde!(UsageEvent);
