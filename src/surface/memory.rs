use std::cell::{Cell, RefCell};

use super::{GestureSurface, Listeners, NodeId, ScrollMetrics, ScrollTree};

struct Node {
    parent: Option<NodeId>,
    metrics: ScrollMetrics,
}

/// In-memory element tree for headless hosts, demos and tests.
///
/// Node 0 is the sheet root. Listener registration is recorded so that
/// callers can check what the engine currently holds.
pub struct MemorySurface {
    nodes: RefCell<Vec<Node>>,
    listeners: Cell<Listeners>,
    listener_calls: Cell<usize>,
}

impl MemorySurface {
    /// Create a surface whose root has the given metrics.
    pub fn new(root_metrics: ScrollMetrics) -> Self {
        Self {
            nodes: RefCell::new(vec![Node {
                parent: None,
                metrics: root_metrics,
            }]),
            listeners: Cell::new(Listeners::empty()),
            listener_calls: Cell::new(0),
        }
    }

    /// Append a child of `parent` and return its id.
    pub fn add_node(&self, parent: NodeId, metrics: ScrollMetrics) -> NodeId {
        let mut nodes = self.nodes.borrow_mut();
        nodes.push(Node {
            parent: Some(parent),
            metrics,
        });
        nodes.len() - 1
    }

    pub fn set_scroll_top(&self, node: NodeId, scroll_top: f32) {
        if let Some(n) = self.nodes.borrow_mut().get_mut(node) {
            n.metrics.scroll_top = scroll_top;
        }
    }

    pub fn set_metrics(&self, node: NodeId, metrics: ScrollMetrics) {
        if let Some(n) = self.nodes.borrow_mut().get_mut(node) {
            n.metrics = metrics;
        }
    }

    /// Listeners currently installed by the engine
    pub fn attached_listeners(&self) -> Listeners {
        self.listeners.get()
    }

    /// Number of add/remove calls received so far
    pub fn listener_calls(&self) -> usize {
        self.listener_calls.get()
    }
}

impl ScrollTree for MemorySurface {
    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes.borrow().get(node).and_then(|n| n.parent)
    }

    fn scroll_metrics(&self, node: NodeId) -> ScrollMetrics {
        self.nodes
            .borrow()
            .get(node)
            .map(|n| n.metrics)
            .unwrap_or_default()
    }
}

impl GestureSurface for MemorySurface {
    fn root(&self) -> NodeId {
        0
    }

    fn add_listeners(&self, listeners: Listeners) {
        self.listener_calls.set(self.listener_calls.get() + 1);
        self.listeners.set(self.listeners.get() | listeners);
    }

    fn remove_listeners(&self, listeners: Listeners) {
        self.listener_calls.set(self.listener_calls.get() + 1);
        self.listeners.set(self.listeners.get() - listeners);
    }
}
