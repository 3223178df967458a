//! Typed attribute values attached to entities.

use serde::{Deserialize, Serialize};

/// A single typed attribute value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    List(Vec<String>),
    Json(serde_json::Value),
}

impl From<f64> for AttributeValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<i64> for AttributeValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<Vec<String>> for AttributeValue {
    fn from(value: Vec<String>) -> Self {
        Self::List(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_serialize_float_variant_as_number() {
        let json = serde_json::to_string(&AttributeValue::Float(21.5)).unwrap();
        assert_eq!(json, "21.5");
    }

    #[test]
    fn should_serialize_list_variant_as_array() {
        let val = AttributeValue::from(vec!["dhw".to_string(), "heating".to_string()]);
        let json = serde_json::to_string(&val).unwrap();
        assert_eq!(json, r#"["dhw","heating"]"#);
    }

    #[test]
    fn should_deserialize_string_array_as_list_variant() {
        let val: AttributeValue = serde_json::from_str(r#"["standby"]"#).unwrap();
        assert_eq!(val, AttributeValue::List(vec!["standby".to_string()]));
    }

    #[test]
    fn should_deserialize_json_object_as_json_variant() {
        let val: AttributeValue = serde_json::from_str(r#"{"nested": "value"}"#).unwrap();
        assert!(matches!(val, AttributeValue::Json(_)));
    }

    #[test]
    fn should_convert_from_str() {
        assert_eq!(
            AttributeValue::from("comfort"),
            AttributeValue::String("comfort".to_string())
        );
    }
}
