#![allow(dead_code)]

use attr_bridge::host::memory::{MemoryAttributes, MemoryDocument, MemoryRoot, NodeId, NodeKind};
use attr_bridge::widget::RenderFuture;
use attr_bridge::{AttrValue, Component, Schema, State, Widget};
use std::cell::Cell;
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll};

pub type TestComponent = Component<Toggle, MemoryAttributes, MemoryRoot>;

/// Widget rendering one content node per call, labelled with the full state.
///
/// Each render suspends once before resolving, like a render waiting on I/O.
pub struct Toggle {
    pub document: MemoryDocument,
    pub renders: Rc<Cell<usize>>,
    pub styles: Option<String>,
}

impl Widget<NodeId> for Toggle {
    fn styles(&self) -> Option<&str> {
        self.styles.as_deref()
    }

    fn render(&self, state: &State) -> Option<RenderFuture<NodeId>> {
        self.renders.set(self.renders.get() + 1);
        let label = state
            .iter()
            .map(|(k, v)| format!("{k}={}", display(v)))
            .collect::<Vec<_>>()
            .join(",");
        let document = self.document.clone();
        Some(Box::pin(async move {
            YieldOnce::default().await;
            Ok(document.create_content(label))
        }))
    }
}

fn display(value: &AttrValue) -> String {
    match value {
        AttrValue::Bool(b) => b.to_string(),
        AttrValue::Str(s) => s.clone(),
        AttrValue::Json(v) => v.to_string(),
        AttrValue::Missing => "-".to_string(),
    }
}

/// Returns `Pending` once, waking itself.
#[derive(Default)]
pub struct YieldOnce {
    yielded: bool,
}

impl Future for YieldOnce {
    type Output = ();

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        if self.yielded {
            return Poll::Ready(());
        }
        self.yielded = true;
        cx.waker().wake_by_ref();
        Poll::Pending
    }
}

pub struct TestEnv {
    pub component: TestComponent,
    pub document: MemoryDocument,
    pub renders: Rc<Cell<usize>>,
}

impl TestEnv {
    pub fn new(schema: Schema, attrs: MemoryAttributes) -> Self {
        Self::with_styles(schema, attrs, None)
    }

    pub fn with_styles(schema: Schema, attrs: MemoryAttributes, styles: Option<&str>) -> Self {
        let document = MemoryDocument::new();
        let renders = Rc::new(Cell::new(0));
        let widget = Toggle {
            document: document.clone(),
            renders: Rc::clone(&renders),
            styles: styles.map(String::from),
        };
        let component = Component::new(
            Rc::new(schema),
            widget,
            attrs,
            MemoryRoot::in_document(&document),
        )
        .expect("component construction failed");
        Self {
            component,
            document,
            renders,
        }
    }

    /// Deliver every recorded attribute change back to the component, as a
    /// host would. Returns how many were delivered.
    pub fn echo_changes(&mut self) -> usize {
        let changes = self.component.attributes_mut().take_changes();
        let count = changes.len();
        for change in changes {
            futures::executor::block_on(self.component.attribute_changed(
                &change.name,
                change.old.as_deref(),
                change.new.as_deref(),
            ))
            .expect("echoed change failed");
        }
        count
    }

    pub fn attached_kinds(&self) -> Vec<NodeKind> {
        self.component.root().child_kinds()
    }
}
