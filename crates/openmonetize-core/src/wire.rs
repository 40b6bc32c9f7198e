//! Wire codec shared by all event models.
//!
//! Every model converts to and from a [`WireMap`], a JSON object keyed by the
//! model's field names. Field names are never renamed. Absent optional fields
//! are omitted from the map, and an explicit `null` on the way in is treated
//! as absent.

use serde_json::Value;

use crate::error::{ModelError, Result, ValidationError, ValidationErrorKind};
use crate::EventType;

/// An untyped JSON object keyed by wire field name.
pub type WireMap = serde_json::Map<String, Value>;

/// Free-form metadata attached to an event.
pub type Metadata = serde_json::Map<String, Value>;

/// Conversion between a typed model and its JSON wire representation.
pub trait WireModel: Sized {
    /// Build the wire map, omitting absent optional fields.
    fn to_wire_map(&self) -> WireMap;

    /// Validate an untyped map and build the model from it.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::Validation`] if a required field is missing, a
    /// field has the wrong shape, or the map carries a field outside the
    /// schema.
    fn from_wire_map(map: &WireMap) -> Result<Self>;

    /// Serialize the wire map to JSON text.
    fn to_json(&self) -> String {
        Value::Object(self.to_wire_map()).to_string()
    }

    /// Build the model from an arbitrary JSON value.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationErrorKind::NotAnObject`] if `value` is not an
    /// object, otherwise whatever [`WireModel::from_wire_map`] returns.
    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(map) => Self::from_wire_map(&map),
            _ => Err(
                ValidationError::new(ValidationError::ROOT, ValidationErrorKind::NotAnObject).into(),
            ),
        }
    }

    /// Parse JSON text and build the model from it.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::Parse`] if `text` is not valid JSON. Schema
    /// violations are reported as [`ModelError::Validation`].
    fn from_json(text: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(text).map_err(ModelError::Parse)?;
        Self::from_value(value)
    }
}

/// Typed field access over a wire map that has passed the schema check.
pub(crate) struct FieldReader<'a> {
    map: &'a WireMap,
}

impl<'a> FieldReader<'a> {
    /// Reject any key not listed in `fields`.
    pub(crate) fn strict(map: &'a WireMap, fields: &[&str]) -> Result<Self> {
        if let Some(unknown) = map.keys().find(|key| !fields.contains(&key.as_str())) {
            return Err(ValidationError::new(unknown.as_str(), ValidationErrorKind::Unknown).into());
        }
        Ok(Self { map })
    }

    fn present(&self, field: &str) -> Option<&'a Value> {
        self.map.get(field).filter(|value| !value.is_null())
    }

    fn required(&self, field: &str) -> Result<&'a Value> {
        self.present(field)
            .ok_or_else(|| ValidationError::missing(field).into())
    }

    pub(crate) fn required_str(&self, field: &str) -> Result<String> {
        as_string(field, self.required(field)?)
    }

    pub(crate) fn optional_str(&self, field: &str) -> Result<Option<String>> {
        self.present(field).map(|v| as_string(field, v)).transpose()
    }

    pub(crate) fn required_u64(&self, field: &str) -> Result<u64> {
        self.required(field)?
            .as_u64()
            .ok_or_else(|| ValidationError::wrong_type(field, "a non-negative integer").into())
    }

    pub(crate) fn required_f64(&self, field: &str) -> Result<f64> {
        self.required(field)?
            .as_f64()
            .ok_or_else(|| ValidationError::wrong_type(field, "a number").into())
    }

    pub(crate) fn optional_metadata(&self, field: &str) -> Result<Option<Metadata>> {
        match self.present(field) {
            None => Ok(None),
            Some(Value::Object(map)) => Ok(Some(map.clone())),
            Some(_) => Err(ValidationError::wrong_type(field, "an object").into()),
        }
    }

    /// Read the discriminator, defaulting it to `expected` when absent.
    pub(crate) fn event_type(&self, expected: EventType) -> Result<EventType> {
        let Some(found) = self.optional_str(EventType::FIELD)? else {
            return Ok(expected);
        };
        if found == expected.as_str() {
            Ok(expected)
        } else {
            Err(ValidationError::new(
                EventType::FIELD,
                ValidationErrorKind::EventTypeMismatch { expected, found },
            )
            .into())
        }
    }
}

fn as_string(field: &str, value: &Value) -> Result<String> {
    value
        .as_str()
        .map(str::to_owned)
        .ok_or_else(|| ValidationError::wrong_type(field, "a string").into())
}

/// Insert `value` under `field` only when it is present.
pub(crate) fn insert_opt<T: Into<Value>>(map: &mut WireMap, field: &str, value: Option<T>) {
    if let Some(value) = value {
        map.insert(field.to_owned(), value.into());
    }
}

/// Implement `Serialize`/`Deserialize` for a model through its wire map, so
/// typed values can be embedded in larger request bodies.
macro_rules! wire_serde {
    ($name:ty) => {
        impl serde::Serialize for $name {
            fn serialize<S: serde::Serializer>(
                &self,
                serializer: S,
            ) -> std::result::Result<S::Ok, S::Error> {
                serde::Serialize::serialize(&$crate::wire::WireModel::to_wire_map(self), serializer)
            }
        }

        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D: serde::Deserializer<'de>>(
                deserializer: D,
            ) -> std::result::Result<Self, D::Error> {
                let value = <serde_json::Value as serde::Deserialize>::deserialize(deserializer)?;
                <$name as $crate::wire::WireModel>::from_value(value)
                    .map_err(serde::de::Error::custom)
            }
        }
    };
}

pub(crate) use wire_serde;
