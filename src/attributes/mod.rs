//! # Attribute System
//!
//! Attributes are the host-visible, textual face of a component's state.
//! Each recognized attribute is declared once, in a [`Schema`], with an
//! explicit kind and a default value:
//!
//! | Kind | Text form | Example |
//! |------|-----------|---------|
//! | `Bool` | presence / absence | `<x-menu open>` |
//! | `String` | verbatim text | `label="Save"` |
//! | `Json` | JSON document | `count="5"`, `items='["a","b"]'` |
//!
//! The coercion layer ([`decode`] / [`encode`]) translates between the text
//! stored by the host and the typed [`AttrValue`] held in state. Both
//! directions compare against the current canonical text before writing, which
//! is what keeps attribute → state → attribute propagation loop-free.
//!
//! ## Usage
//!
//! ```ignore
//! let schema = Schema::builder()
//!     .bool("open", false)
//!     .string("label", "")
//!     .json("count", json!(0))
//!     .build();
//!
//! let spec = schema.get("count").unwrap();
//! let value = decode(spec, Some("5"))?;       // AttrValue::Json(5)
//! assert_eq!(encode(spec, &value), Some("5".into()));
//! ```

mod codec;
mod spec;
mod value;

pub use codec::{decode, encode};
pub use spec::{AttributeKind, AttributeSpec, Schema, SchemaBuilder};
pub use value::AttrValue;
