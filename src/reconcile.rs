//! # Dual-Child Reconciler
//!
//! A component owns exactly two child resources on its private root: the
//! stylesheet and the content. Both follow the same protocol, split into a pure
//! decision step and an application step:
//!
//! 1. [`reconcile`] takes the current node, whether it is attached, and the
//!    caller's [`ReconcileIntent`], and returns the new current node plus the
//!    [`SideEffect`]s needed to get there. No I/O.
//! 2. [`Slot::apply`] runs that decision against a [`RenderRoot`], placing
//!    attached nodes at the slot's fixed [`Position`].
//!
//! ## Intents
//!
//! | Intent | Current | Effects |
//! |--------|---------|---------|
//! | `Replace(n)` | none | attach `n` |
//! | `Replace(n)` | `n`, detached | attach `n` |
//! | `Replace(n)` | `n`, attached | none |
//! | `Replace(n)` | other `c` | detach `c` (if attached), attach `n` |
//! | `EnsureAttached` | `c`, detached | attach `c` |
//! | `EnsureAttached` | none, or attached | none |
//! | `Clear` | `c`, attached | detach `c`; current becomes none |
//!
//! `EnsureAttached` never detaches and never swaps; it is the re-entry path.
//! Replacement is a whole-node swap, never a patch of the node's subtree.

use crate::error::Result;
use crate::host::RenderRoot;
use log::trace;

/// What the caller wants done with a slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReconcileIntent<N> {
    /// Make `N` the slot's node, attached.
    Replace(N),

    /// Keep the current node; attach it if it is not attached.
    EnsureAttached,

    /// Drop the current node from the root and the slot.
    Clear,
}

/// A structural change the root must perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SideEffect<N> {
    Detach(N),
    Attach(N),
}

/// Decide the new slot content and the structural changes to reach it.
pub fn reconcile<N: Clone + PartialEq>(
    current: Option<N>,
    attached: bool,
    intent: ReconcileIntent<N>,
) -> (Option<N>, Vec<SideEffect<N>>) {
    match (current, intent) {
        (Some(current), ReconcileIntent::Replace(incoming)) if current == incoming => {
            let effects = if attached {
                Vec::new()
            } else {
                vec![SideEffect::Attach(incoming.clone())]
            };
            (Some(incoming), effects)
        }
        (Some(current), ReconcileIntent::Replace(incoming)) => {
            let mut effects = Vec::with_capacity(2);
            if attached {
                effects.push(SideEffect::Detach(current));
            }
            effects.push(SideEffect::Attach(incoming.clone()));
            (Some(incoming), effects)
        }
        (None, ReconcileIntent::Replace(incoming)) => {
            (Some(incoming.clone()), vec![SideEffect::Attach(incoming)])
        }
        (Some(current), ReconcileIntent::EnsureAttached) => {
            let effects = if attached {
                Vec::new()
            } else {
                vec![SideEffect::Attach(current.clone())]
            };
            (Some(current), effects)
        }
        (Some(current), ReconcileIntent::Clear) => {
            let effects = if attached {
                vec![SideEffect::Detach(current)]
            } else {
                Vec::new()
            };
            (None, effects)
        }
        (None, ReconcileIntent::EnsureAttached | ReconcileIntent::Clear) => (None, Vec::new()),
    }
}

/// Where a slot's node lives among the root's children.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    /// Before the root's current first child
    First,
    /// After every other child
    Last,
}

/// One owned child resource of a component.
#[derive(Debug, Clone)]
pub struct Slot<N> {
    name: &'static str,
    position: Position,
    current: Option<N>,
}

impl<N: Clone + PartialEq + std::fmt::Debug> Slot<N> {
    pub fn new(name: &'static str, position: Position) -> Self {
        Self {
            name,
            position,
            current: None,
        }
    }

    pub fn current(&self) -> Option<&N> {
        self.current.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.current.is_none()
    }

    /// Fill the slot without touching the root; a later `EnsureAttached` attaches it.
    pub fn set(&mut self, node: N) {
        self.current = Some(node);
    }

    /// Reconcile against `root` and perform the resulting side effects.
    pub fn apply<R>(&mut self, root: &mut R, intent: ReconcileIntent<N>) -> Result<Vec<SideEffect<N>>>
    where
        R: RenderRoot<Node = N>,
    {
        let attached = self
            .current
            .as_ref()
            .is_some_and(|node| root.contains(node));
        let (next, effects) = reconcile(self.current.take(), attached, intent);

        // On host failure the slot keeps the node the root may still hold, so a
        // later EnsureAttached can repair it.
        let previous = match effects.first() {
            Some(SideEffect::Detach(node)) => Some(node.clone()),
            _ => next.clone(),
        };
        for effect in &effects {
            trace!("{} slot: {:?}", self.name, effect);
            let outcome = match effect {
                SideEffect::Detach(node) => root.remove(node),
                SideEffect::Attach(node) => match self.position {
                    Position::First => {
                        let first = root.first_child();
                        root.insert_before(node, first.as_ref())
                    }
                    Position::Last => root.insert_before(node, None),
                },
            };
            if let Err(e) = outcome {
                self.current = previous;
                return Err(e);
            }
        }
        self.current = next;
        Ok(effects)
    }
}
