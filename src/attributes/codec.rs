//! Translation between attribute text and typed values.

use super::spec::{AttributeKind, AttributeSpec};
use super::value::AttrValue;
use crate::error::{BridgeError, Result};

/// Decode the raw attribute text (`None` = attribute absent) into a typed value.
pub fn decode(spec: &AttributeSpec, raw: Option<&str>) -> Result<AttrValue> {
    match (spec.kind, raw) {
        (AttributeKind::Bool, raw) => Ok(AttrValue::Bool(raw.is_some())),
        (AttributeKind::String, Some(text)) => Ok(AttrValue::Str(text.to_string())),
        (AttributeKind::Json, Some(text)) => serde_json::from_str(text)
            .map(AttrValue::Json)
            .map_err(|source| BridgeError::MalformedAttribute {
                name: spec.name.clone(),
                source,
            }),
        (_, None) => Ok(AttrValue::Missing),
    }
}

/// Encode a value into its canonical attribute text (`None` = attribute absent).
///
/// Values are expected to have passed [`AttributeSpec::coerce`]; anything that
/// does not fit the kind encodes as absent.
pub fn encode(spec: &AttributeSpec, value: &AttrValue) -> Option<String> {
    match (spec.kind, value) {
        (AttributeKind::Bool, AttrValue::Bool(true)) => Some(String::new()),
        (AttributeKind::Bool, _) => None,
        (AttributeKind::String, AttrValue::Str(s)) => Some(s.clone()),
        (AttributeKind::Json, AttrValue::Json(v)) => Some(v.to_string()),
        (_, _) => None,
    }
}
