//! Extraction schema - the contract for what extraction produces
//!
//! The schema is a JSON Schema document. It is kept verbatim so callers can
//! compare it with the configuration it came from, and validated once on
//! construction so the rest of the system can rely on its feature shape.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use thiserror::Error;

/// Properties every feature item must declare
pub const REQUIRED_FEATURE_FIELDS: [&str; 6] = [
    "feature_id",
    "user_story",
    "priority",
    "acceptance_criteria",
    "dependencies",
    "technical_risks",
];

/// Structural problems found while validating a schema document
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// The document is not a JSON object
    #[error("schema must be a JSON object")]
    NotAnObject,

    /// Root `type` is missing or not `"object"`
    #[error("schema root type must be \"object\", found {0}")]
    RootTypeNotObject(String),

    /// `properties.features` is missing
    #[error("schema is missing properties.features")]
    MissingFeatures,

    /// `properties.features` is declared with a non-array type
    #[error("properties.features must be an array, found {0}")]
    FeaturesNotArray(String),

    /// `properties.features.items.properties` is missing
    #[error("schema is missing properties.features.items.properties")]
    MissingFeatureItems,

    /// A required feature property is not declared
    #[error("feature items are missing required field: {0}")]
    MissingFeatureField(String),
}

/// Validated JSON Schema describing the extracted BRD structure
///
/// Immutable once built. Share it behind an `Arc` rather than cloning.
///
/// # Examples
///
/// ```
/// use brdx_domain::ExtractionSchema;
/// use serde_json::json;
///
/// let doc = json!({
///     "type": "object",
///     "properties": {
///         "features": {
///             "type": "array",
///             "items": {
///                 "type": "object",
///                 "properties": {
///                     "feature_id": {"type": "string"},
///                     "user_story": {"type": "string"},
///                     "priority": {"type": "string", "enum": ["high", "medium", "low"]},
///                     "acceptance_criteria": {"type": "array", "items": {"type": "string"}},
///                     "dependencies": {"type": "array", "items": {"type": "string"}},
///                     "technical_risks": {"type": "array", "items": {"type": "string"}}
///                 }
///             }
///         }
///     }
/// });
///
/// let schema = ExtractionSchema::from_value(doc.clone()).unwrap();
/// assert_eq!(schema.as_value(), &doc);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionSchema(Value);

impl ExtractionSchema {
    /// Validate a raw schema document
    ///
    /// # Errors
    ///
    /// Returns the first structural problem found, walking from the root down
    /// to the feature item properties.
    pub fn from_value(value: Value) -> Result<Self, SchemaError> {
        let root = value.as_object().ok_or(SchemaError::NotAnObject)?;

        match root.get("type") {
            Some(Value::String(t)) if t == "object" => {}
            Some(other) => return Err(SchemaError::RootTypeNotObject(other.to_string())),
            None => return Err(SchemaError::RootTypeNotObject("nothing".to_string())),
        }

        let features = root
            .get("properties")
            .and_then(|p| p.get("features"))
            .ok_or(SchemaError::MissingFeatures)?;

        if let Some(t) = features.get("type") {
            if t != "array" {
                return Err(SchemaError::FeaturesNotArray(t.to_string()));
            }
        }

        let item_props = features
            .get("items")
            .and_then(|i| i.get("properties"))
            .and_then(Value::as_object)
            .ok_or(SchemaError::MissingFeatureItems)?;

        for field in REQUIRED_FEATURE_FIELDS {
            if !item_props.contains_key(field) {
                return Err(SchemaError::MissingFeatureField(field.to_string()));
            }
        }

        Ok(Self(value))
    }

    /// The schema document exactly as configured
    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// The schema for a single feature item
    pub fn feature_item(&self) -> &Value {
        // Presence is guaranteed by from_value
        &self.0["properties"]["features"]["items"]
    }

    /// Names of all properties declared on feature items, in document order
    pub fn feature_fields(&self) -> Vec<&str> {
        self.feature_item()["properties"]
            .as_object()
            .map(|props| props.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }
}

impl PartialEq<Value> for ExtractionSchema {
    fn eq(&self, other: &Value) -> bool {
        &self.0 == other
    }
}

impl Serialize for ExtractionSchema {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ExtractionSchema {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Self::from_value(value).map_err(serde::de::Error::custom)
    }
}
