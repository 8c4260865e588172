//! # Component
//!
//! [`Component`] is one widget instance: it owns the typed [`State`], the two
//! child [`Slot`]s, and the host's [`AttributeStore`] and [`RenderRoot`], and it
//! keeps them consistent.
//!
//! ## Entry Points
//!
//! The host drives the instance through four calls:
//!
//! | Call | When |
//! |------|------|
//! | [`Component::new`] | instance creation; state is read from the attributes |
//! | [`Component::connect`] | instance attached to the host tree |
//! | [`Component::disconnect`] | instance detached from the host tree |
//! | [`Component::attribute_changed`] | an observed attribute's text changed |
//!
//! Application code calls [`Component::update`] to change state.
//!
//! ## Propagation
//!
//! ```text
//! host ──attribute_changed──▶ decode ──▶ update ──▶ merge ──▶ render? ──▶ content slot
//! app  ──────────update─────▶ encode ──▶ write attribute (only if text differs)
//! ```
//!
//! Both directions compare against the current canonical text before writing,
//! so a write the host reports back as a change is a no-op.
//!
//! ## Ordering
//!
//! Every mutating call takes `&mut self`, so at most one of them (and at most
//! one render) is in flight per instance. Hosts that receive notifications while
//! a call is suspended queue them and deliver them afterwards.
//!
//! ## Failure
//!
//! Errors are never retried or swallowed. A failed render is reported as
//! [`BridgeError::RenderFailure`]; what happens to the writes that preceded it
//! is decided by [`RenderFailurePolicy`].

use crate::attributes::{decode, encode, AttrValue, AttributeKind, AttributeSpec, Schema};
use crate::config::{BridgeConfig, RenderFailurePolicy};
use crate::error::{BridgeError, Result};
use crate::host::{AttributeStore, RenderRoot};
use crate::lifecycle::{Attach, Lifecycle, Phase};
use crate::reconcile::{Position, ReconcileIntent, Slot};
use crate::state::{Patch, State};
use crate::style::resolve_styles;
use crate::widget::Widget;
use log::{debug, info, trace, warn};
use std::rc::Rc;

pub struct Component<W, A, R>
where
    R: RenderRoot,
{
    schema: Rc<Schema>,
    widget: W,
    attributes: A,
    root: R,
    state: State,
    lifecycle: Lifecycle,
    stylesheet: Slot<R::Node>,
    content: Slot<R::Node>,
    render_failure: RenderFailurePolicy,
}

/// What an update overwrote, for [`RenderFailurePolicy::Rollback`].
struct Undo {
    state: Vec<(String, Option<AttrValue>)>,
    attributes: Vec<(String, Option<String>)>,
}

impl<W, A, R> Component<W, A, R>
where
    W: Widget<R::Node>,
    A: AttributeStore,
    R: RenderRoot,
{
    /// Create an instance with the default configuration.
    pub fn new(schema: Rc<Schema>, widget: W, attributes: A, root: R) -> Result<Self> {
        Self::with_config(schema, widget, attributes, root, &BridgeConfig::default())
    }

    /// Create an instance. Each schema attribute starts from the host's text if
    /// present, else from its default. Malformed JSON text is an error.
    pub fn with_config(
        schema: Rc<Schema>,
        widget: W,
        attributes: A,
        root: R,
        config: &BridgeConfig,
    ) -> Result<Self> {
        let mut state = State::new();
        for spec in schema.iter() {
            let value = match attributes.get_attribute(&spec.name) {
                Some(text) => decode(spec, Some(&text))?,
                None => spec.default.clone(),
            };
            state.insert(spec.name.clone(), value);
        }

        Ok(Self {
            schema,
            widget,
            attributes,
            root,
            state,
            lifecycle: Lifecycle::new(),
            stylesheet: Slot::new("stylesheet", Position::First),
            content: Slot::new("content", Position::Last),
            render_failure: config.render_failure,
        })
    }

    /// Attach to the host. Only the first call initializes; later calls just
    /// mark the instance connected again.
    ///
    /// Initialization writes every state value to the attributes, attaches the
    /// stylesheet and renders the first content.
    pub async fn connect(&mut self) -> Result<()> {
        match self.lifecycle.begin_attach() {
            Attach::Resume => {
                debug!("Component re-attached, already initialized");
                Ok(())
            }
            Attach::Initialize => {
                info!("Initializing component on first attach");
                let result = self.initialize().await;
                self.lifecycle.finish_attach();
                result
            }
        }
    }

    async fn initialize(&mut self) -> Result<()> {
        self.sync_all_attributes()?;

        if self.stylesheet.is_empty() {
            if let Some(source) = self.widget.styles().and_then(resolve_styles) {
                let node = source.create_node(&mut self.root)?;
                self.stylesheet.set(node);
            }
        }
        self.stylesheet
            .apply(&mut self.root, ReconcileIntent::EnsureAttached)?;

        if self.content.is_empty() {
            if let Some(pending) = self.widget.render(&self.state) {
                debug!("Rendering initial content");
                let node = pending.await.map_err(|e| {
                    warn!("Initial render failed: {}", e);
                    BridgeError::RenderFailure(e)
                })?;
                self.content.set(node);
            }
        }
        self.content
            .apply(&mut self.root, ReconcileIntent::EnsureAttached)?;
        Ok(())
    }

    /// Detach from the host. Nothing is torn down.
    pub fn disconnect(&mut self) {
        debug!("Component detached");
        self.lifecycle.detach();
    }

    /// Handle a host notification that `name` changed from `old` to `new`
    /// (`None` = absent). Unobserved names are ignored.
    pub async fn attribute_changed(
        &mut self,
        name: &str,
        old: Option<&str>,
        new: Option<&str>,
    ) -> Result<()> {
        let schema = Rc::clone(&self.schema);
        let Some(spec) = schema.get(name) else {
            trace!("Ignoring change of unobserved attribute `{}`", name);
            return Ok(());
        };
        debug!("Attribute `{}` changed: {:?} -> {:?}", name, old, new);

        let current = self.state.get(name);
        // Compare text first so text we wrote ourselves never hits the parser.
        if spec.kind == AttributeKind::Json
            && current.and_then(|v| encode(spec, v)).as_deref() == new
        {
            return Ok(());
        }

        let value = decode(spec, new)?;
        if let Some(current) = current.filter(|&c| *c == value) {
            trace!("Attribute `{}` already matches state", name);
            // Same value in a different spelling: store the canonical text.
            sync_attribute(&mut self.attributes, spec, current)?;
            return Ok(());
        }
        self.update(Patch::new().set(name, value)).await
    }

    /// Change state. Schema attributes in the patch are written to the host
    /// (only where their text changes), the patch is merged, and if content was
    /// rendered before, it is rendered again and swapped in.
    ///
    /// Before the first attach this only writes and merges; rendering waits
    /// for [`connect`](Self::connect).
    pub async fn update(&mut self, patch: Patch) -> Result<()> {
        let patch = self.coerce(patch)?;
        let undo = match self.render_failure {
            RenderFailurePolicy::Rollback => Some(self.snapshot(&patch)),
            RenderFailurePolicy::Commit => None,
        };

        let schema = Rc::clone(&self.schema);
        for (name, value) in patch.iter() {
            if let Some(spec) = schema.get(name) {
                sync_attribute(&mut self.attributes, spec, value)?;
            }
        }
        self.state.merge(patch);

        if self.content.is_empty() {
            return Ok(());
        }
        let Some(pending) = self.widget.render(&self.state) else {
            return Ok(());
        };
        debug!("Re-rendering content");
        match pending.await {
            Ok(node) => {
                self.content
                    .apply(&mut self.root, ReconcileIntent::Replace(node))?;
                Ok(())
            }
            Err(e) => {
                warn!("Render failed: {}", e);
                if let Some(undo) = undo {
                    warn!("Rolling back update after failed render");
                    self.restore(undo)?;
                }
                Err(BridgeError::RenderFailure(e))
            }
        }
    }

    /// Attribute names the host must report changes for.
    pub fn observed_attributes(&self) -> Vec<String> {
        self.schema.names().map(String::from).collect()
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn widget(&self) -> &W {
        &self.widget
    }

    pub fn attributes(&self) -> &A {
        &self.attributes
    }

    /// Direct access to the host's attributes, e.g. to simulate host edits.
    ///
    /// Writes made here are not seen until reported via `attribute_changed`.
    pub fn attributes_mut(&mut self) -> &mut A {
        &mut self.attributes
    }

    pub fn root(&self) -> &R {
        &self.root
    }

    pub fn root_mut(&mut self) -> &mut R {
        &mut self.root
    }

    pub fn phase(&self) -> Phase {
        self.lifecycle.phase()
    }

    pub fn is_connected(&self) -> bool {
        self.lifecycle.connected()
    }

    /// Whether first-attach initialization has run (or started).
    pub fn is_initialized(&self) -> bool {
        self.lifecycle.initial_connected()
    }

    pub fn stylesheet(&self) -> Option<&R::Node> {
        self.stylesheet.current()
    }

    pub fn content(&self) -> Option<&R::Node> {
        self.content.current()
    }

    pub fn render_failure_policy(&self) -> RenderFailurePolicy {
        self.render_failure
    }

    fn sync_all_attributes(&mut self) -> Result<()> {
        let schema = Rc::clone(&self.schema);
        for spec in schema.iter() {
            if let Some(value) = self.state.get(&spec.name) {
                sync_attribute(&mut self.attributes, spec, value)?;
            }
        }
        Ok(())
    }

    /// Fit schema values to their kinds. Fails before anything is written.
    fn coerce(&self, mut patch: Patch) -> Result<Patch> {
        for (name, value) in patch.iter_mut() {
            if let Some(spec) = self.schema.get(name) {
                let raw = std::mem::replace(value, AttrValue::Missing);
                *value = spec.coerce(raw)?;
            }
        }
        Ok(patch)
    }

    fn snapshot(&self, patch: &Patch) -> Undo {
        let state = patch
            .iter()
            .map(|(name, _)| (name.to_string(), self.state.get(name).cloned()))
            .collect();
        let attributes = patch
            .iter()
            .filter(|(name, _)| self.schema.contains(name))
            .map(|(name, _)| (name.to_string(), self.attributes.get_attribute(name)))
            .collect();
        Undo { state, attributes }
    }

    fn restore(&mut self, undo: Undo) -> Result<()> {
        for (name, value) in undo.state {
            match value {
                Some(value) => self.state.insert(name, value),
                None => self.state.remove(&name),
            };
        }
        for (name, text) in undo.attributes {
            if self.attributes.get_attribute(&name) == text {
                continue;
            }
            match text {
                Some(text) => self.attributes.set_attribute(&name, &text)?,
                None => self.attributes.remove_attribute(&name)?,
            }
        }
        Ok(())
    }
}

/// Write one attribute's canonical text if it differs from what the host holds.
///
/// Returns whether the host was written to.
fn sync_attribute<A: AttributeStore>(
    attributes: &mut A,
    spec: &AttributeSpec,
    value: &AttrValue,
) -> Result<bool> {
    let name = spec.name.as_str();

    if spec.kind == AttributeKind::Bool {
        let present = attributes.has_attribute(name);
        let wanted = value.as_bool() == Some(true);
        return match (present, wanted) {
            (true, false) => {
                debug!("Removing attribute `{}`", name);
                attributes.remove_attribute(name)?;
                Ok(true)
            }
            (false, true) => {
                debug!("Setting attribute `{}`", name);
                attributes.set_attribute(name, "")?;
                Ok(true)
            }
            _ => {
                trace!("Attribute `{}` unchanged", name);
                Ok(false)
            }
        };
    }

    let text = encode(spec, value);
    if attributes.get_attribute(name) == text {
        trace!("Attribute `{}` unchanged", name);
        return Ok(false);
    }
    match text {
        Some(text) => {
            debug!("Setting attribute `{}` = {:?}", name, text);
            attributes.set_attribute(name, &text)?;
        }
        None => {
            debug!("Removing attribute `{}`", name);
            attributes.remove_attribute(name)?;
        }
    }
    Ok(true)
}
