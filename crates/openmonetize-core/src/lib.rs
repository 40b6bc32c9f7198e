//! Core types for the OpenMonetize SDK.
//!
//! This crate provides the usage event models reported to OpenMonetize and
//! their JSON wire codec:
//!
//! - **Envelope**: `EventEnvelope`, `EventType`
//! - **Events**: `CustomEvent`, `ImageGenerationEvent`, `TokenUsageEvent`,
//!   and the `UsageEvent` sum over them
//! - **Wire**: `WireModel`, `WireMap`, `Metadata`
//! - **Providers**: `Provider`, `normalize_usage`
//!
//! # Wire format
//!
//! Events are flat JSON objects whose keys are the model's field names. Absent
//! optional fields are omitted, and `event_type` always matches the variant:
//!
//! ```
//! use openmonetize_core::{EventEnvelope, TokenUsageEvent, WireModel};
//!
//! let envelope = EventEnvelope::new("e1", "c1", "f1", "2024-01-01T00:00:00Z")?;
//! let event = TokenUsageEvent::new(envelope, "openai", "gpt-4", 100, 50);
//! let map = event.to_wire_map();
//!
//! assert_eq!(map["event_type"], "TOKEN_USAGE");
//! assert!(!map.contains_key("user_id"));
//! # Ok::<(), openmonetize_core::ModelError>(())
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod envelope;
pub mod error;
pub mod provider;
pub mod usage;
pub mod wire;

pub use envelope::{EventEnvelope, EventType};
pub use error::{ModelError, Result, ValidationError, ValidationErrorKind};
pub use provider::{normalize_usage, Provider, TokenCounts};
pub use usage::{CustomEvent, ImageGenerationEvent, TokenUsageEvent, UsageEvent};
pub use wire::{Metadata, WireMap, WireModel};
