//! # attr-bridge
//!
//! A base abstraction for self-contained UI widgets. A component keeps three
//! things consistent:
//!
//! 1. **Attributes**: textual markers the host can read and change at any time.
//! 2. **State**: the typed record application code reads and updates.
//! 3. **Rendered output**: a stylesheet node and a content node attached to the
//!    component's private rendering root.
//!
//! ## Architecture
//!
//! ```text
//!                 ┌──────────────────────── Component ───────────────────────┐
//! host attrs ◀──▶ │ attributes (decode/encode) ◀──▶ State ──▶ Widget::render │
//!                 │                                              │           │
//!                 │ Lifecycle (connect / disconnect)             ▼           │
//!                 │ Slot<stylesheet>, Slot<content> ──reconcile──▶ RenderRoot │
//!                 └──────────────────────────────────────────────────────────┘
//! ```
//!
//! - [`attributes`]: schema, values and the coercion layer.
//! - [`state`]: the state record and partial updates.
//! - [`host`]: traits the host implements, plus an in-memory host.
//! - [`style`]: turning a widget's `styles` text into a stylesheet node.
//! - [`reconcile`]: the dual-child reconciler.
//! - [`lifecycle`]: attach/detach bookkeeping.
//! - [`widget`]: the author-supplied capabilities.
//! - [`component`]: the instance tying everything together.
//! - [`registry`]: name → component definition.
//! - [`config`]: policy settings.
//!
//! ## Example
//!
//! ```ignore
//! let mut registry = Registry::new();
//! let schema = registry.define::<Menu>("x-menu", Schema::builder().bool("open", false).build())?;
//!
//! let mut menu = Component::new(schema, Menu::new(&doc), host_attrs, shadow_root)?;
//! block_on(menu.connect())?;
//! block_on(menu.update(Patch::new().set("open", true)))?;   // writes `open=""`, re-renders
//! ```
//!
//! ## Logging
//!
//! The crate logs through the [`log`] facade and never installs a logger.

pub mod attributes;
pub mod component;
pub mod config;
pub mod error;
pub mod host;
pub mod lifecycle;
pub mod reconcile;
pub mod registry;
pub mod state;
pub mod style;
pub mod widget;

pub use attributes::{AttrValue, AttributeKind, AttributeSpec, Schema};
pub use component::Component;
pub use config::{BridgeConfig, RenderFailurePolicy};
pub use error::{BridgeError, RenderError, Result};
pub use host::{AttributeStore, RenderRoot};
pub use lifecycle::Phase;
pub use registry::{Definition, Registry};
pub use state::{Patch, State};
pub use widget::{RenderFuture, Widget};
