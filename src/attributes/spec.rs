//! Attribute specifications and schemas.
//!
//! A schema is the fixed list of attributes a component type recognizes. Kinds
//! are always declared, never guessed from the default value.

use super::value::AttrValue;
use crate::error::{BridgeError, Result};
use serde_json::Value;
use std::fmt;

/// The kind of value an attribute holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttributeKind {
    /// Presence flag (e.g. `open`, `disabled`)
    Bool,

    /// Verbatim text (e.g. `label`)
    String,

    /// Arbitrary JSON document (e.g. `count`, `items`)
    Json,
}

impl fmt::Display for AttributeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AttributeKind::Bool => "boolean",
            AttributeKind::String => "string",
            AttributeKind::Json => "JSON",
        };
        f.write_str(name)
    }
}

/// Specification for a single recognized attribute.
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeSpec {
    /// The attribute name as seen by the host (e.g. "open", "count")
    pub name: String,

    /// The kind of value this attribute holds
    pub kind: AttributeKind,

    /// Value used when the host did not supply the attribute
    pub default: AttrValue,
}

impl AttributeSpec {
    pub fn bool(name: impl Into<String>, default: bool) -> Self {
        Self {
            name: name.into(),
            kind: AttributeKind::Bool,
            default: AttrValue::Bool(default),
        }
    }

    pub fn string(name: impl Into<String>, default: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: AttributeKind::String,
            default: AttrValue::Str(default.into()),
        }
    }

    pub fn json(name: impl Into<String>, default: Value) -> Self {
        Self {
            name: name.into(),
            kind: AttributeKind::Json,
            default: AttrValue::Json(default),
        }
    }

    /// Check (and where unambiguous, convert) a value against this attribute's kind.
    ///
    /// - `Bool` accepts `Bool` and `Json(bool)`
    /// - `String` accepts `Str`, `Json(string)` and `Missing`
    /// - `Json` accepts anything but wraps `Str` / `Bool` as JSON
    pub fn coerce(&self, value: AttrValue) -> Result<AttrValue> {
        match (self.kind, value) {
            (AttributeKind::Bool, AttrValue::Bool(b)) => Ok(AttrValue::Bool(b)),
            (AttributeKind::Bool, AttrValue::Json(Value::Bool(b))) => Ok(AttrValue::Bool(b)),
            (AttributeKind::String, AttrValue::Str(s)) => Ok(AttrValue::Str(s)),
            (AttributeKind::String, AttrValue::Json(Value::String(s))) => Ok(AttrValue::Str(s)),
            (AttributeKind::String, AttrValue::Missing) => Ok(AttrValue::Missing),
            (AttributeKind::Json, AttrValue::Json(v)) => Ok(AttrValue::Json(v)),
            (AttributeKind::Json, AttrValue::Str(s)) => Ok(AttrValue::Json(Value::String(s))),
            (AttributeKind::Json, AttrValue::Bool(b)) => Ok(AttrValue::Json(Value::Bool(b))),
            (AttributeKind::Json, AttrValue::Missing) => Ok(AttrValue::Missing),
            (kind, _) => Err(BridgeError::TypeMismatch {
                name: self.name.clone(),
                expected: kind,
            }),
        }
    }
}

/// Ordered, immutable set of attribute specifications for one component type.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Schema {
    attributes: Vec<AttributeSpec>,
}

impl Schema {
    /// Build a schema from specs. A later spec with an already-used name
    /// replaces the earlier one in place.
    pub fn new(specs: impl IntoIterator<Item = AttributeSpec>) -> Self {
        let mut attributes: Vec<AttributeSpec> = Vec::new();
        for spec in specs {
            match attributes.iter_mut().find(|s| s.name == spec.name) {
                Some(existing) => *existing = spec,
                None => attributes.push(spec),
            }
        }
        Self { attributes }
    }

    pub fn builder() -> SchemaBuilder {
        SchemaBuilder::default()
    }

    /// Look up an attribute spec by name.
    pub fn get(&self, name: &str) -> Option<&AttributeSpec> {
        self.attributes.iter().find(|spec| spec.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Attribute names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.attributes.iter().map(|spec| spec.name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &AttributeSpec> {
        self.attributes.iter()
    }

    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }
}

#[derive(Debug, Default)]
pub struct SchemaBuilder {
    specs: Vec<AttributeSpec>,
}

impl SchemaBuilder {
    pub fn bool(mut self, name: impl Into<String>, default: bool) -> Self {
        self.specs.push(AttributeSpec::bool(name, default));
        self
    }

    pub fn string(mut self, name: impl Into<String>, default: impl Into<String>) -> Self {
        self.specs.push(AttributeSpec::string(name, default));
        self
    }

    pub fn json(mut self, name: impl Into<String>, default: Value) -> Self {
        self.specs.push(AttributeSpec::json(name, default));
        self
    }

    pub fn attribute(mut self, spec: AttributeSpec) -> Self {
        self.specs.push(spec);
        self
    }

    pub fn build(self) -> Schema {
        Schema::new(self.specs)
    }
}
