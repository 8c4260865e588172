//! # Widget Capabilities
//!
//! A [`Widget`] is what the author supplies: optional styles and an optional
//! render capability. Both are black boxes to the bridge.
//!
//! Rendering may be synchronous or asynchronous; either way it returns a
//! [`RenderFuture`]. The future is `'static`, so it must copy whatever it
//! needs out of the [`State`] before suspending:
//!
//! ```ignore
//! impl Widget<NodeId> for Counter {
//!     fn render(&self, state: &State) -> Option<RenderFuture<NodeId>> {
//!         let count = state.get_json("count").cloned();
//!         let doc = self.doc.clone();
//!         Some(Box::pin(async move {
//!             Ok(doc.borrow_mut().create_content(format!("count: {count:?}")))
//!         }))
//!     }
//! }
//! ```

use crate::error::RenderError;
use crate::state::State;
use futures::future::{self, FutureExt, LocalBoxFuture};

/// Pending result of a render.
pub type RenderFuture<N> = LocalBoxFuture<'static, Result<N, RenderError>>;

pub trait Widget<N> {
    /// Inline rules or a stylesheet URL. See [`crate::style`].
    fn styles(&self) -> Option<&str> {
        None
    }

    /// Produce a content node for `state`. `None` means the widget has no
    /// render capability and never gets a content node.
    fn render(&self, state: &State) -> Option<RenderFuture<N>> {
        let _ = state;
        None
    }
}

/// Wrap an already-built node as a finished render.
pub fn rendered<N: 'static>(node: N) -> RenderFuture<N> {
    future::ready(Ok(node)).boxed_local()
}

/// A finished, failed render.
pub fn render_failed<N: 'static>(error: impl Into<RenderError>) -> RenderFuture<N> {
    future::ready(Err(error.into())).boxed_local()
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;

    struct Plain;

    impl Widget<u32> for Plain {}

    #[test]
    fn default_widget_has_no_capabilities() {
        assert_eq!(Plain.styles(), None);
        assert!(Plain.render(&State::new()).is_none());
    }

    #[test]
    fn rendered_resolves_to_node() {
        assert_eq!(block_on(rendered(7u32)).unwrap(), 7);
    }

    #[test]
    fn render_failed_resolves_to_error() {
        let err = block_on(render_failed::<u32>("boom")).unwrap_err();
        assert_eq!(err.to_string(), "boom");
    }
}
