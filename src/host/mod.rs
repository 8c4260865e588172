//! # Host Layer
//!
//! The bridge never owns documents or nodes. It talks to the host environment
//! through two traits:
//!
//! - [`AttributeStore`]: the textual attributes of the component instance.
//! - [`RenderRoot`]: the instance's private rendering root, where the
//!   stylesheet and content nodes are attached.
//!
//! These handle the "how" of the host (a browser binding, a terminal tree, an
//! in-memory fake), while [`crate::component::Component`] handles the "what"
//! (coercion, lifecycle, reconciliation).
//!
//! Change notifications flow the other way: whenever an attribute's text
//! changes by any means, the host calls
//! [`Component::attribute_changed`](crate::component::Component::attribute_changed).
//!
//! ## Implementations
//!
//! - [`memory::MemoryAttributes`] / [`memory::MemoryRoot`]: in-memory host used
//!   for testing and headless embedding.

use crate::error::Result;
use std::fmt::Debug;

pub mod memory;

/// Textual key/value attributes attached to a component instance.
pub trait AttributeStore {
    /// Current text, or `None` if the attribute is absent.
    fn get_attribute(&self, name: &str) -> Option<String>;

    fn has_attribute(&self, name: &str) -> bool {
        self.get_attribute(name).is_some()
    }

    fn set_attribute(&mut self, name: &str, value: &str) -> Result<()>;

    /// Removing an absent attribute is not an error.
    fn remove_attribute(&mut self, name: &str) -> Result<()>;
}

/// The private rendering root of one component instance.
pub trait RenderRoot {
    /// Handle to a node. Equality is node identity.
    type Node: Clone + PartialEq + Debug;

    fn first_child(&self) -> Option<Self::Node>;

    fn contains(&self, node: &Self::Node) -> bool;

    /// Insert `node` before `reference`, or at the end when `reference` is `None`.
    fn insert_before(&mut self, node: &Self::Node, reference: Option<&Self::Node>) -> Result<()>;

    fn remove(&mut self, node: &Self::Node) -> Result<()>;

    /// Create a detached inline style node.
    fn create_style(&mut self, css: &str) -> Result<Self::Node>;

    /// Create a detached external stylesheet link node.
    fn create_link(&mut self, href: &str) -> Result<Self::Node>;
}
