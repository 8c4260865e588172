//! # Component Registry
//!
//! Associates public component names with their definitions. There is no
//! process-wide registry: the application creates one at start-up and passes it
//! to whatever needs to look components up.
//!
//! ## Name Rules
//!
//! With `strict_names` on (the default), a name must be a valid custom element
//! name:
//!
//! - starts with a lowercase ASCII letter,
//! - contains at least one `-`,
//! - contains no uppercase ASCII letters or whitespace,
//! - is not one of the reserved hyphenated names (`font-face`, `missing-glyph`, ...).
//!
//! Registering a name twice is rejected with
//! [`BridgeError::DuplicateRegistration`]; the first definition stays.

use crate::attributes::Schema;
use crate::config::BridgeConfig;
use crate::error::{BridgeError, Result};
use log::info;
use std::any::{type_name, TypeId};
use std::collections::BTreeMap;
use std::rc::Rc;

const RESERVED_NAMES: &[&str] = &[
    "annotation-xml",
    "color-profile",
    "font-face",
    "font-face-src",
    "font-face-uri",
    "font-face-format",
    "font-face-name",
    "missing-glyph",
];

/// A registered component type.
#[derive(Debug, Clone)]
pub struct Definition {
    pub name: String,
    pub schema: Rc<Schema>,
    pub widget_type: &'static str,
    widget_id: TypeId,
}

impl Definition {
    /// Attribute names the host must report changes for.
    pub fn observed_attributes(&self) -> Vec<String> {
        self.schema.names().map(String::from).collect()
    }

    /// Whether this definition was registered for widget type `W`.
    pub fn is<W: 'static>(&self) -> bool {
        self.widget_id == TypeId::of::<W>()
    }
}

#[derive(Debug)]
pub struct Registry {
    definitions: BTreeMap<String, Definition>,
    strict_names: bool,
}

impl Registry {
    pub fn new() -> Self {
        Self::with_config(&BridgeConfig::default())
    }

    pub fn with_config(config: &BridgeConfig) -> Self {
        Self {
            definitions: BTreeMap::new(),
            strict_names: config.strict_names,
        }
    }

    /// Register widget type `W` under `name` with `schema`.
    ///
    /// Returns the shared schema to construct instances with.
    pub fn define<W: 'static>(&mut self, name: &str, schema: Schema) -> Result<Rc<Schema>> {
        if self.strict_names {
            validate_name(name)?;
        }
        if self.definitions.contains_key(name) {
            return Err(BridgeError::DuplicateRegistration(name.to_string()));
        }

        let schema = Rc::new(schema);
        let definition = Definition {
            name: name.to_string(),
            schema: Rc::clone(&schema),
            widget_type: type_name::<W>(),
            widget_id: TypeId::of::<W>(),
        };
        info!("Registered component <{}> ({})", name, definition.widget_type);
        self.definitions.insert(name.to_string(), definition);
        Ok(schema)
    }

    pub fn get(&self, name: &str) -> Option<&Definition> {
        self.definitions.get(name)
    }

    pub fn is_defined(&self, name: &str) -> bool {
        self.definitions.contains_key(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.definitions.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

/// Check that `name` is a valid custom element name.
pub fn validate_name(name: &str) -> Result<()> {
    let invalid = |reason: &str| Err(BridgeError::InvalidName(format!("{name}: {reason}")));

    match name.chars().next() {
        Some(c) if c.is_ascii_lowercase() => {}
        _ => return invalid("must start with a lowercase ASCII letter"),
    }
    if !name.contains('-') {
        return invalid("must contain a hyphen");
    }
    if name.chars().any(|c| c.is_ascii_uppercase()) {
        return invalid("must not contain uppercase letters");
    }
    if name.chars().any(|c| c.is_whitespace() || matches!(c, '/' | '>' | '<' | '=' | '"' | '\'')) {
        return invalid("contains a character not allowed in names");
    }
    if RESERVED_NAMES.contains(&name) {
        return invalid("name is reserved");
    }
    Ok(())
}
