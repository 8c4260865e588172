use super::{AttributeStore, RenderRoot};
use crate::error::{BridgeError, Result};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

/// A change to one attribute, as the host would report it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeChange {
    pub name: String,
    pub old: Option<String>,
    pub new: Option<String>,
}

/// In-memory attribute store.
///
/// Records every effective write as an [`AttributeChange`], so tests can check
/// how many writes an operation performed and feed the notifications back into
/// the component the way a real host would.
#[derive(Debug, Default)]
pub struct MemoryAttributes {
    values: BTreeMap<String, String>,
    changes: Vec<AttributeChange>,
    simulate_write_error: bool,
}

impl MemoryAttributes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with the given attributes, as if parsed from markup.
    ///
    /// Initial values are not recorded as changes.
    pub fn with<K, V>(attrs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            values: attrs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
            ..Self::default()
        }
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&mut self, simulate: bool) {
        self.simulate_write_error = simulate;
    }

    /// Changes recorded since the last call.
    pub fn take_changes(&mut self) -> Vec<AttributeChange> {
        std::mem::take(&mut self.changes)
    }

    pub fn changes(&self) -> &[AttributeChange] {
        &self.changes
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    fn check_writable(&self) -> Result<()> {
        if self.simulate_write_error {
            return Err(BridgeError::Host("Simulated write error".to_string()));
        }
        Ok(())
    }
}

impl AttributeStore for MemoryAttributes {
    fn get_attribute(&self, name: &str) -> Option<String> {
        self.values.get(name).cloned()
    }

    fn has_attribute(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    fn set_attribute(&mut self, name: &str, value: &str) -> Result<()> {
        self.check_writable()?;
        let old = self.values.insert(name.to_string(), value.to_string());
        if old.as_deref() != Some(value) {
            self.changes.push(AttributeChange {
                name: name.to_string(),
                old,
                new: Some(value.to_string()),
            });
        }
        Ok(())
    }

    fn remove_attribute(&mut self, name: &str) -> Result<()> {
        self.check_writable()?;
        if let Some(old) = self.values.remove(name) {
            self.changes.push(AttributeChange {
                name: name.to_string(),
                old: Some(old),
                new: None,
            });
        }
        Ok(())
    }
}

/// Handle to a node owned by a [`MemoryDocument`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

/// What a memory node represents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// Inline `<style>` with its text
    Style(String),

    /// `<link rel="stylesheet">` with its href
    Link(String),

    /// Rendered content, labelled by whoever created it
    Content(String),
}

/// Node arena shared by roots and widgets.
///
/// Widgets create their content nodes here while the component's root decides
/// where they are attached. Cloning is cheap and shares the arena; `RefCell`
/// is enough since a document is only used from one thread.
#[derive(Debug, Clone, Default)]
pub struct MemoryDocument {
    nodes: Rc<RefCell<Vec<NodeKind>>>,
}

impl MemoryDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create(&self, kind: NodeKind) -> NodeId {
        let mut nodes = self.nodes.borrow_mut();
        nodes.push(kind);
        NodeId(nodes.len() - 1)
    }

    /// Create a detached content node, as a widget's render would.
    pub fn create_content(&self, label: impl Into<String>) -> NodeId {
        self.create(NodeKind::Content(label.into()))
    }

    pub fn kind(&self, node: NodeId) -> Option<NodeKind> {
        self.nodes.borrow().get(node.0).cloned()
    }

    pub fn len(&self) -> usize {
        self.nodes.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.borrow().is_empty()
    }

    fn owns(&self, node: &NodeId) -> bool {
        node.0 < self.len()
    }
}

/// Structural operations performed on a [`MemoryRoot`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RootOp {
    Insert { node: NodeId, index: usize },
    Remove { node: NodeId },
}

/// In-memory private rendering root.
///
/// `children` is the ordered list of attached nodes; every structural change
/// is logged as a [`RootOp`].
#[derive(Debug, Default)]
pub struct MemoryRoot {
    document: MemoryDocument,
    children: Vec<NodeId>,
    ops: Vec<RootOp>,
}

impl MemoryRoot {
    /// A root with its own, fresh document.
    pub fn new() -> Self {
        Self::default()
    }

    /// A root attaching nodes from `document`.
    pub fn in_document(document: &MemoryDocument) -> Self {
        Self {
            document: document.clone(),
            ..Self::default()
        }
    }

    pub fn document(&self) -> &MemoryDocument {
        &self.document
    }

    pub fn create_content(&self, label: impl Into<String>) -> NodeId {
        self.document.create_content(label)
    }

    pub fn kind(&self, node: NodeId) -> Option<NodeKind> {
        self.document.kind(node)
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Kinds of the attached nodes, in order.
    pub fn child_kinds(&self) -> Vec<NodeKind> {
        self.children.iter().filter_map(|id| self.kind(*id)).collect()
    }

    pub fn ops(&self) -> &[RootOp] {
        &self.ops
    }

    pub fn take_ops(&mut self) -> Vec<RootOp> {
        std::mem::take(&mut self.ops)
    }
}

impl RenderRoot for MemoryRoot {
    type Node = NodeId;

    fn first_child(&self) -> Option<NodeId> {
        self.children.first().copied()
    }

    fn contains(&self, node: &NodeId) -> bool {
        self.children.contains(node)
    }

    fn insert_before(&mut self, node: &NodeId, reference: Option<&NodeId>) -> Result<()> {
        if !self.document.owns(node) {
            return Err(BridgeError::Host(format!("Unknown node: {:?}", node)));
        }
        // Inserting an attached node moves it.
        self.children.retain(|child| child != node);
        let index = match reference {
            Some(reference) => self
                .children
                .iter()
                .position(|child| child == reference)
                .ok_or_else(|| {
                    BridgeError::Host(format!("Reference node not attached: {:?}", reference))
                })?,
            None => self.children.len(),
        };
        self.children.insert(index, *node);
        self.ops.push(RootOp::Insert { node: *node, index });
        Ok(())
    }

    fn remove(&mut self, node: &NodeId) -> Result<()> {
        let index = self
            .children
            .iter()
            .position(|child| child == node)
            .ok_or_else(|| BridgeError::Host(format!("Node not attached: {:?}", node)))?;
        self.children.remove(index);
        self.ops.push(RootOp::Remove { node: *node });
        Ok(())
    }

    fn create_style(&mut self, css: &str) -> Result<NodeId> {
        Ok(self.document.create(NodeKind::Style(css.to_string())))
    }

    fn create_link(&mut self, href: &str) -> Result<NodeId> {
        Ok(self.document.create(NodeKind::Link(href.to_string())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attribute_writes_are_recorded_only_on_change() {
        let mut attrs = MemoryAttributes::with([("label", "a")]);
        attrs.set_attribute("label", "a").unwrap();
        assert!(attrs.changes().is_empty());

        attrs.set_attribute("label", "b").unwrap();
        attrs.remove_attribute("label").unwrap();
        attrs.remove_attribute("label").unwrap();

        assert_eq!(
            attrs.take_changes(),
            vec![
                AttributeChange {
                    name: "label".into(),
                    old: Some("a".into()),
                    new: Some("b".into()),
                },
                AttributeChange {
                    name: "label".into(),
                    old: Some("b".into()),
                    new: None,
                },
            ]
        );
        assert!(attrs.changes().is_empty());
    }

    #[test]
    fn simulated_write_error() {
        let mut attrs = MemoryAttributes::new();
        attrs.set_simulate_write_error(true);
        assert!(matches!(
            attrs.set_attribute("x", "1"),
            Err(BridgeError::Host(_))
        ));
        assert!(attrs.remove_attribute("x").is_err());
        assert!(!attrs.has_attribute("x"));
    }

    #[test]
    fn insert_before_first_child_and_append() {
        let mut root = MemoryRoot::new();
        let content = root.create_content("body");
        let style = root.create_style("p {}").unwrap();

        root.insert_before(&content, None).unwrap();
        let first = root.first_child();
        root.insert_before(&style, first.as_ref()).unwrap();

        assert_eq!(root.children(), &[style, content]);
        assert_eq!(
            root.ops(),
            &[
                RootOp::Insert { node: content, index: 0 },
                RootOp::Insert { node: style, index: 0 },
            ]
        );
    }

    #[test]
    fn remove_detaches_node() {
        let mut root = MemoryRoot::new();
        let node = root.create_content("x");
        root.insert_before(&node, None).unwrap();
        assert!(root.contains(&node));

        root.remove(&node).unwrap();
        assert!(!root.contains(&node));
        assert!(root.remove(&node).is_err());
    }

    #[test]
    fn roots_in_one_document_share_nodes() {
        let document = MemoryDocument::new();
        let mut first = MemoryRoot::in_document(&document);
        let mut second = MemoryRoot::in_document(&document);
        let node = document.create_content("shared");

        first.insert_before(&node, None).unwrap();
        second.insert_before(&node, None).unwrap();
        assert_eq!(second.kind(node), Some(NodeKind::Content("shared".into())));
        assert_eq!(document.len(), 1);
    }

    #[test]
    fn foreign_nodes_are_rejected() {
        let other = MemoryDocument::new();
        other.create_content("a");
        let node = other.create_content("b");

        let mut root = MemoryRoot::new();
        assert!(matches!(
            root.insert_before(&node, None),
            Err(BridgeError::Host(_))
        ));
    }

    #[test]
    fn reinserting_moves_instead_of_duplicating() {
        let mut root = MemoryRoot::new();
        let a = root.create_content("a");
        let b = root.create_content("b");
        root.insert_before(&a, None).unwrap();
        root.insert_before(&b, None).unwrap();
        root.insert_before(&a, None).unwrap();
        assert_eq!(root.children(), &[b, a]);
    }
}
