//! Wire contract tests for usage event models.
//!
//! Run with: cargo test --package openmonetize-core --test wire_contract

use openmonetize_core::{
    CustomEvent, EventEnvelope, EventType, ImageGenerationEvent, Metadata, TokenUsageEvent,
    UsageEvent, ValidationErrorKind, WireMap, WireModel,
};
use serde_json::{json, Value};

fn object(value: Value) -> WireMap {
    match value {
        Value::Object(map) => map,
        other => panic!("expected object, got {other}"),
    }
}

fn custom_fields() -> Value {
    json!({
        "event_id": "evt-1",
        "customer_id": "cust-123",
        "feature_id": "feat-abc",
        "unit_type": "images",
        "quantity": 1,
        "timestamp": "2023-01-01T00:00:00Z"
    })
}

// ============================================================================
// Round trip
// ============================================================================

#[test]
fn round_trip_custom() {
    let event = CustomEvent::from_value(custom_fields()).unwrap();
    let back = CustomEvent::from_wire_map(&event.to_wire_map()).unwrap();
    assert_eq!(back, event);
}

#[test]
fn round_trip_image_generation_with_optionals() {
    let mut metadata = Metadata::new();
    metadata.insert("prompt_id".into(), json!("p-9"));
    metadata.insert("nested".into(), json!({"a": [1, 2, 3]}));

    let envelope = EventEnvelope::new("e1", "c1", "f1", "2024-01-01T00:00:00Z")
        .unwrap()
        .with_user_id("u1")
        .with_metadata(metadata);
    let event = ImageGenerationEvent::new(envelope, "openai", "dall-e-3", 4)
        .with_image_size("1024x1024")
        .with_quality("hd");

    let back = ImageGenerationEvent::from_json(&event.to_json()).unwrap();
    assert_eq!(back, event);
}

#[test]
fn round_trip_through_usage_event() {
    let envelope = EventEnvelope::new("e1", "c1", "f1", "2024-01-01T00:00:00Z").unwrap();
    let event: UsageEvent = TokenUsageEvent::new(envelope, "openai", "gpt-4", 100, 50).into();
    let back = UsageEvent::from_wire_map(&event.to_wire_map()).unwrap();
    assert_eq!(back, event);
}

/// Deterministic xorshift64 sequence so generated cases are reproducible.
struct Seq(u64);

impl Seq {
    fn next_u64(&mut self) -> u64 {
        self.0 ^= self.0 << 13;
        self.0 ^= self.0 >> 7;
        self.0 ^= self.0 << 17;
        self.0
    }

    fn next_finite_f64(&mut self) -> f64 {
        loop {
            let value = f64::from_bits(self.next_u64());
            if value.is_finite() {
                return value;
            }
        }
    }
}

fn quantities() -> Vec<f64> {
    let mut values = vec![1707.434_300_000_000_1, 10_896.018_100_000_001, 0.1, 1e-300, f64::MAX];
    values.extend((0..5_000).map(|n| f64::from(n) / 1000.0 * 1.1));
    let mut seq = Seq(0x9E37_79B9_7F4A_7C15);
    values.extend((0..5_000).map(|_| seq.next_finite_f64()));
    values
}

fn custom_event(quantity: f64) -> CustomEvent {
    let envelope = EventEnvelope::new("e1", "c1", "f1", "2024-01-01T00:00:00Z").unwrap();
    CustomEvent::new(envelope, "units", quantity).unwrap()
}

#[test]
fn round_trip_fractional_quantities() {
    for quantity in quantities() {
        let event = custom_event(quantity);

        let from_map = CustomEvent::from_wire_map(&event.to_wire_map()).unwrap();
        assert_eq!(from_map, event, "wire map changed quantity {quantity:e}");

        let from_json = CustomEvent::from_json(&event.to_json()).unwrap();
        assert_eq!(
            from_json.quantity().to_bits(),
            quantity.to_bits(),
            "JSON changed quantity {quantity:e}"
        );
        assert_eq!(from_json, event);
    }
}

#[test]
fn round_trip_large_token_counts() {
    let mut seq = Seq(0xD1B5_4A32_D192_ED03);
    let mut counts = vec![0, 1, u64::from(u32::MAX) + 1, (1 << 53) + 1, u64::MAX];
    counts.extend((0..2_000).map(|_| seq.next_u64()));

    for pair in counts.windows(2) {
        let envelope = EventEnvelope::new("e1", "c1", "f1", "2024-01-01T00:00:00Z").unwrap();
        let event: UsageEvent =
            TokenUsageEvent::new(envelope, "openai", "gpt-4", pair[0], pair[1]).into();

        assert_eq!(UsageEvent::from_wire_map(&event.to_wire_map()).unwrap(), event);
        assert_eq!(UsageEvent::from_json(&event.to_json()).unwrap(), event);
    }
}

// ============================================================================
// Discriminator default
// ============================================================================

#[test]
fn event_type_defaults_per_variant() {
    let custom = CustomEvent::from_value(custom_fields()).unwrap();
    assert_eq!(custom.to_wire_map()["event_type"], json!("CUSTOM"));

    let image = ImageGenerationEvent::from_value(json!({
        "event_id": "e1",
        "customer_id": "c1",
        "feature_id": "f1",
        "provider": "openai",
        "model": "dall-e-3",
        "image_count": 1,
        "timestamp": "t"
    }))
    .unwrap();
    assert_eq!(image.to_wire_map()["event_type"], json!("IMAGE_GENERATION"));

    let tokens = TokenUsageEvent::from_value(json!({
        "event_id": "e1",
        "customer_id": "c1",
        "feature_id": "f1",
        "provider": "openai",
        "model": "gpt-4",
        "input_tokens": 1,
        "output_tokens": 2,
        "timestamp": "t"
    }))
    .unwrap();
    assert_eq!(tokens.to_wire_map()["event_type"], json!("TOKEN_USAGE"));
}

#[test]
fn matching_event_type_is_accepted() {
    let mut fields = object(custom_fields());
    fields.insert("event_type".into(), json!("CUSTOM"));
    assert!(CustomEvent::from_wire_map(&fields).is_ok());
}

// ============================================================================
// Omission
// ============================================================================

#[test]
fn absent_optionals_are_omitted() {
    let event = CustomEvent::from_value(custom_fields()).unwrap();
    let map = event.to_wire_map();
    assert!(!map.contains_key("metadata"));
    assert!(!map.contains_key("user_id"));
}

#[test]
fn null_optionals_are_treated_as_absent() {
    let mut fields = object(custom_fields());
    fields.insert("user_id".into(), Value::Null);
    fields.insert("metadata".into(), Value::Null);

    let event = CustomEvent::from_wire_map(&fields).unwrap();
    assert_eq!(event.envelope().user_id(), None);
    assert!(!event.to_wire_map().contains_key("metadata"));
}

// ============================================================================
// Validation
// ============================================================================

#[test]
fn missing_required_field_is_named() {
    let mut fields = object(custom_fields());
    fields.remove("feature_id");

    let err = CustomEvent::from_wire_map(&fields).unwrap_err();
    let validation = err.as_validation().expect("validation error");
    assert_eq!(validation.field(), "feature_id");
    assert_eq!(validation.kind(), &ValidationErrorKind::Missing);
}

#[test]
fn non_numeric_quantity_is_rejected() {
    let mut fields = object(custom_fields());
    fields.insert("quantity".into(), json!("one"));

    let err = CustomEvent::from_wire_map(&fields).unwrap_err();
    let validation = err.as_validation().expect("validation error");
    assert_eq!(validation.field(), "quantity");
    assert!(matches!(validation.kind(), ValidationErrorKind::WrongType { .. }));
}

#[test]
fn metadata_must_be_an_object() {
    let mut fields = object(custom_fields());
    fields.insert("metadata".into(), json!(["not", "a", "map"]));

    let err = CustomEvent::from_wire_map(&fields).unwrap_err();
    assert_eq!(err.as_validation().unwrap().field(), "metadata");
}

#[test]
fn empty_customer_id_is_rejected() {
    let mut fields = object(custom_fields());
    fields.insert("customer_id".into(), json!(""));

    let err = CustomEvent::from_wire_map(&fields).unwrap_err();
    let validation = err.as_validation().unwrap();
    assert_eq!(validation.field(), "customer_id");
    assert_eq!(validation.kind(), &ValidationErrorKind::Empty);
}

#[test]
fn unknown_field_is_rejected() {
    let mut fields = object(custom_fields());
    fields.insert("team_id".into(), json!("t1"));

    let err = CustomEvent::from_wire_map(&fields).unwrap_err();
    assert_eq!(err.as_validation().unwrap().field(), "team_id");
}

#[test]
fn non_object_input_is_rejected() {
    let err = CustomEvent::from_value(json!("evt-1")).unwrap_err();
    assert_eq!(
        err.as_validation().unwrap().kind(),
        &ValidationErrorKind::NotAnObject
    );
}

#[test]
fn invalid_json_is_a_parse_error() {
    let err = CustomEvent::from_json("not json").unwrap_err();
    assert!(err.is_parse());
    assert!(err.as_validation().is_none());
}

#[test]
fn valid_json_with_bad_schema_is_a_validation_error() {
    let err = TokenUsageEvent::from_json(r#"{"event_id": "e1"}"#).unwrap_err();
    assert!(!err.is_parse());
    assert!(err.as_validation().is_some());
}

#[test]
fn mismatched_event_type_is_rejected() {
    let mut fields = object(custom_fields());
    fields.insert("event_type".into(), json!("TOKEN_USAGE"));

    let err = CustomEvent::from_wire_map(&fields).unwrap_err();
    let validation = err.as_validation().unwrap();
    assert_eq!(validation.field(), "event_type");
    assert_eq!(
        validation.kind(),
        &ValidationErrorKind::EventTypeMismatch {
            expected: EventType::Custom,
            found: "TOKEN_USAGE".into(),
        }
    );
}

// ============================================================================
// Equality
// ============================================================================

#[test]
fn equality_covers_every_field() {
    let a = CustomEvent::from_value(custom_fields()).unwrap();
    let b = CustomEvent::from_value(custom_fields()).unwrap();
    assert_eq!(a, b);

    let mut with_metadata = object(custom_fields());
    with_metadata.insert("metadata".into(), json!({"k": "v"}));
    let c = CustomEvent::from_wire_map(&with_metadata).unwrap();
    assert_ne!(a, c);

    let mut other_quantity = object(custom_fields());
    other_quantity.insert("quantity".into(), json!(2.5));
    let d = CustomEvent::from_wire_map(&other_quantity).unwrap();
    assert_ne!(a, d);
}

// ============================================================================
// End to end
// ============================================================================

#[test]
fn token_usage_json_has_exactly_present_fields() {
    let envelope = EventEnvelope::new("e1", "c1", "f1", "2024-01-01T00:00:00Z").unwrap();
    let event = TokenUsageEvent::new(envelope, "openai", "gpt-4", 100, 50);

    let parsed: Value = serde_json::from_str(&event.to_json()).unwrap();
    let map = parsed.as_object().unwrap();

    assert_eq!(map.len(), 9);
    assert_eq!(map["event_id"], json!("e1"));
    assert_eq!(map["customer_id"], json!("c1"));
    assert_eq!(map["event_type"], json!("TOKEN_USAGE"));
    assert_eq!(map["feature_id"], json!("f1"));
    assert_eq!(map["provider"], json!("openai"));
    assert_eq!(map["model"], json!("gpt-4"));
    assert_eq!(map["input_tokens"], json!(100));
    assert_eq!(map["output_tokens"], json!(50));
    assert_eq!(map["timestamp"], json!("2024-01-01T00:00:00Z"));
    assert!(!map.contains_key("user_id"));
    assert!(!map.contains_key("metadata"));
}

#[test]
fn counts_must_be_non_negative_integers() {
    let base = json!({
        "event_id": "e1",
        "customer_id": "c1",
        "feature_id": "f1",
        "provider": "openai",
        "model": "dall-e-3",
        "timestamp": "2024-01-01T00:00:00Z"
    });

    for bad in [json!(-1), json!(100.0), json!("4")] {
        let mut fields = object(base.clone());
        fields.insert("image_count".into(), bad);
        let err = ImageGenerationEvent::from_wire_map(&fields).unwrap_err();
        let validation = err.as_validation().unwrap();
        assert_eq!(validation.field(), "image_count");
        assert_eq!(
            validation.kind(),
            &ValidationErrorKind::WrongType {
                expected: "a non-negative integer"
            }
        );
    }
}
