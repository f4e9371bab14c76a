//! Platform-facing types: pointer samples, listener registration and the
//! element tree the gesture engine inspects for nested scroll regions.
//!
//! The engine never owns the pointer stream. A host implements
//! [`GestureSurface`] on top of its platform (DOM, a native view tree, a
//! headless test harness) and forwards pointer events to the
//! [`SheetHandle`](crate::SheetHandle) while listeners are attached.

mod memory;

pub use memory::MemorySurface;

use bitflags::bitflags;

/// Opaque handle to an element in the host's tree.
pub type NodeId = usize;

/// A single pointer sample as delivered by the host's event source.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerSample {
    /// Vertical position in client coordinates (positive = down)
    pub client_y: f32,
    /// Event time in milliseconds on a monotonic clock
    pub timestamp_ms: f64,
}

impl PointerSample {
    pub fn new(client_y: f32, timestamp_ms: f64) -> Self {
        Self {
            client_y,
            timestamp_ms,
        }
    }

    pub(crate) fn is_finite(&self) -> bool {
        self.client_y.is_finite() && self.timestamp_ms.is_finite()
    }
}

/// How the host should treat a pointer event after the engine saw it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerResponse {
    /// The engine did not act on the event
    Ignored,
    /// The engine recorded the event; platform defaults proceed as usual
    Handled,
    /// The event drives the sheet; the host must suppress native scrolling
    /// and other default behavior for it
    Consumed,
}

impl PointerResponse {
    pub fn prevents_default(&self) -> bool {
        matches!(self, PointerResponse::Consumed)
    }
}

bitflags! {
    /// Pointer listeners the engine asks the host to install on the sheet root.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Listeners: u8 {
        const START = 1 << 0;
        const MOVE = 1 << 1;
        const END = 1 << 2;
        const CANCEL = 1 << 3;
        const ALL = Self::START.bits() | Self::MOVE.bits() | Self::END.bits() | Self::CANCEL.bits();
    }
}

impl Listeners {
    /// Listeners that may return [`PointerResponse::Consumed`] and therefore
    /// must be registered as non-passive.
    pub fn non_passive(self) -> Listeners {
        self & Listeners::MOVE
    }
}

/// Vertical overflow policy of an element, as computed by the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverflowY {
    #[default]
    Visible,
    Hidden,
    Clip,
    Auto,
    Scroll,
}

impl OverflowY {
    /// Returns true if the policy lets the user scroll overflowing content
    pub fn allows_scrolling(&self) -> bool {
        matches!(self, OverflowY::Auto | OverflowY::Scroll)
    }
}

/// Scroll geometry of one element.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollMetrics {
    pub scroll_top: f32,
    pub scroll_height: f32,
    pub client_height: f32,
    pub overflow_y: OverflowY,
}

impl ScrollMetrics {
    /// Metrics for an element whose content fits its box.
    pub fn fixed(height: f32) -> Self {
        Self {
            scroll_top: 0.0,
            scroll_height: height,
            client_height: height,
            overflow_y: OverflowY::Visible,
        }
    }

    /// Metrics for a scroll container with the given viewport and content sizes.
    pub fn scrolling(client_height: f32, scroll_height: f32) -> Self {
        Self {
            scroll_top: 0.0,
            scroll_height,
            client_height,
            overflow_y: OverflowY::Auto,
        }
    }

    pub fn with_scroll_top(mut self, scroll_top: f32) -> Self {
        self.scroll_top = scroll_top;
        self
    }

    pub fn with_overflow(mut self, overflow_y: OverflowY) -> Self {
        self.overflow_y = overflow_y;
        self
    }

    /// Check if content overflows vertically
    pub fn overflows(&self) -> bool {
        self.scroll_height > self.client_height
    }

    /// Content overflows and the overflow policy permits scrolling it
    pub fn is_scrollable(&self) -> bool {
        self.overflows() && self.overflow_y.allows_scrolling()
    }

    pub fn is_at_top(&self) -> bool {
        self.scroll_top <= 0.0
    }
}

/// Read-only queries on the host's element tree.
pub trait ScrollTree {
    /// Parent of `node`, or `None` at the top of the tree
    fn parent(&self, node: NodeId) -> Option<NodeId>;

    /// Current scroll geometry of `node`
    fn scroll_metrics(&self, node: NodeId) -> ScrollMetrics;
}

/// The element a sheet's gesture engine is attached to.
///
/// `add_listeners` and `remove_listeners` are called with the exact set
/// being installed or released; the engine never asks for a listener it
/// already holds and always releases what it installed.
pub trait GestureSurface: ScrollTree {
    /// The sheet root; ancestor walks stop here
    fn root(&self) -> NodeId;

    fn add_listeners(&self, listeners: Listeners);

    fn remove_listeners(&self, listeners: Listeners);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overflow_policy() {
        assert!(OverflowY::Auto.allows_scrolling());
        assert!(OverflowY::Scroll.allows_scrolling());
        assert!(!OverflowY::Hidden.allows_scrolling());
        assert!(!OverflowY::Visible.allows_scrolling());
        assert!(!OverflowY::Clip.allows_scrolling());
    }

    #[test]
    fn test_scrollable_requires_overflow_and_policy() {
        assert!(ScrollMetrics::scrolling(200.0, 800.0).is_scrollable());
        // Fits its box
        assert!(!ScrollMetrics::scrolling(200.0, 200.0).is_scrollable());
        // Overflows but clipped
        assert!(!ScrollMetrics::scrolling(200.0, 800.0)
            .with_overflow(OverflowY::Hidden)
            .is_scrollable());
    }

    #[test]
    fn test_at_top() {
        let metrics = ScrollMetrics::scrolling(200.0, 800.0);
        assert!(metrics.is_at_top());
        assert!(!metrics.with_scroll_top(12.0).is_at_top());
    }

    #[test]
    fn test_only_move_is_non_passive() {
        assert_eq!(Listeners::ALL.non_passive(), Listeners::MOVE);
        assert!((Listeners::START | Listeners::END).non_passive().is_empty());
    }

    #[test]
    fn test_consumed_prevents_default() {
        assert!(PointerResponse::Consumed.prevents_default());
        assert!(!PointerResponse::Handled.prevents_default());
        assert!(!PointerResponse::Ignored.prevents_default());
    }
}
