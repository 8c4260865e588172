//! Attribute value types.

use crate::error::Result;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

/// Runtime representation of an attribute (or other state) value.
#[derive(Debug, Clone, PartialEq)]
pub enum AttrValue {
    /// Presence flag
    Bool(bool),

    /// Verbatim text
    Str(String),

    /// Structured value
    Json(Value),

    /// A `String` or `Json` attribute the host has removed.
    ///
    /// Encodes to an absent attribute, so removal round-trips without the
    /// attribute reappearing with placeholder text.
    Missing,
}

impl AttrValue {
    /// Serialize any value into a `Json` attribute value.
    pub fn json<T: Serialize>(value: &T) -> Result<Self> {
        Ok(AttrValue::Json(serde_json::to_value(value)?))
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            AttrValue::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttrValue::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_json(&self) -> Option<&Value> {
        match self {
            AttrValue::Json(v) => Some(v),
            _ => None,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, AttrValue::Missing)
    }

    /// Deserialize a `Json` (or `Str`) value into a concrete type.
    ///
    /// Returns `Ok(None)` for values that carry no structured payload.
    pub fn deserialize<T: DeserializeOwned>(&self) -> Result<Option<T>> {
        match self {
            AttrValue::Json(v) => Ok(Some(serde_json::from_value(v.clone())?)),
            AttrValue::Str(s) => Ok(Some(serde_json::from_value(Value::String(s.clone()))?)),
            AttrValue::Bool(b) => Ok(Some(serde_json::from_value(Value::Bool(*b))?)),
            AttrValue::Missing => Ok(None),
        }
    }
}

impl From<bool> for AttrValue {
    fn from(v: bool) -> Self {
        AttrValue::Bool(v)
    }
}

impl From<&str> for AttrValue {
    fn from(v: &str) -> Self {
        AttrValue::Str(v.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(v: String) -> Self {
        AttrValue::Str(v)
    }
}

impl From<Value> for AttrValue {
    fn from(v: Value) -> Self {
        AttrValue::Json(v)
    }
}

impl From<i64> for AttrValue {
    fn from(v: i64) -> Self {
        AttrValue::Json(Value::from(v))
    }
}

impl From<i32> for AttrValue {
    fn from(v: i32) -> Self {
        AttrValue::Json(Value::from(v))
    }
}

impl From<u64> for AttrValue {
    fn from(v: u64) -> Self {
        AttrValue::Json(Value::from(v))
    }
}

impl From<f64> for AttrValue {
    fn from(v: f64) -> Self {
        AttrValue::Json(Value::from(v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct Point {
        x: i32,
        y: i32,
    }

    #[test]
    fn accessors_extract_matching_variant() {
        assert_eq!(AttrValue::Bool(true).as_bool(), Some(true));
        assert_eq!(AttrValue::Str("a".into()).as_bool(), None);
        assert_eq!(AttrValue::Str("a".into()).as_str(), Some("a"));
        assert_eq!(AttrValue::Json(json!(1)).as_json(), Some(&json!(1)));
        assert!(AttrValue::Missing.is_missing());
        assert!(!AttrValue::Json(Value::Null).is_missing());
    }

    #[test]
    fn numbers_convert_to_json() {
        assert_eq!(AttrValue::from(6), AttrValue::Json(json!(6)));
        assert_eq!(AttrValue::from(1.5), AttrValue::Json(json!(1.5)));
        assert_eq!(AttrValue::from("6"), AttrValue::Str("6".into()));
    }

    #[test]
    fn typed_values_serialize_and_deserialize() {
        let value = AttrValue::json(&Point { x: 1, y: 2 }).unwrap();
        assert_eq!(value, AttrValue::Json(json!({"x": 1, "y": 2})));
        let back: Option<Point> = value.deserialize().unwrap();
        assert_eq!(back, Some(Point { x: 1, y: 2 }));
    }

    #[test]
    fn deserialize_missing_is_none() {
        let back: Option<Point> = AttrValue::Missing.deserialize().unwrap();
        assert_eq!(back, None);
    }

    #[test]
    fn deserialize_wrong_shape_errors() {
        let result: Result<Option<Point>> = AttrValue::Json(json!([1, 2])).deserialize();
        assert!(result.is_err());
    }
}
