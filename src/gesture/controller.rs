use super::decision::{decide, DismissDecision};
use super::displacement::resisted_offset;
use super::mode::resolve_mode;
use super::scroll::resolve_scrollable_ancestor;
use super::session::{GestureMode, GestureSession};
use crate::surface::{GestureSurface, Listeners, NodeId, PointerResponse, PointerSample};
use crate::thresholds::Thresholds;

/// What a pointer event changed about the sheet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureUpdate {
    None,
    /// The session just committed to dragging; the sheet follows at `offset_px`
    DragStarted { offset_px: f32 },
    Dragged { offset_px: f32 },
    /// A drag ended and must be settled
    Released(DismissDecision),
}

/// Owns the pointer listeners and the current [`GestureSession`].
///
/// Listeners are installed by [`attach`](Self::attach) and released by
/// [`detach`](Self::detach); both are idempotent. While detached every
/// pointer entry point is a no-op.
#[derive(Debug)]
pub struct GestureController {
    thresholds: Thresholds,
    listeners: Listeners,
    session: Option<GestureSession>,
}

impl GestureController {
    pub fn new(thresholds: Thresholds) -> Self {
        Self {
            thresholds,
            listeners: Listeners::empty(),
            session: None,
        }
    }

    pub fn thresholds(&self) -> &Thresholds {
        &self.thresholds
    }

    pub fn is_attached(&self) -> bool {
        !self.listeners.is_empty()
    }

    pub fn session(&self) -> Option<&GestureSession> {
        self.session.as_ref()
    }

    pub fn attach(&mut self, surface: &dyn GestureSurface) {
        let missing = Listeners::ALL - self.listeners;
        if missing.is_empty() {
            return;
        }
        surface.add_listeners(missing);
        self.listeners |= missing;
        log::debug!("Attached pointer listeners {:?}", missing);
    }

    /// Release every listener and drop any session in progress.
    pub fn detach(&mut self, surface: &dyn GestureSurface) {
        if let Some(session) = self.session.take() {
            log::debug!("Dropping gesture session in {:?} mode", session.mode());
        }
        if self.listeners.is_empty() {
            return;
        }
        surface.remove_listeners(self.listeners);
        log::debug!("Detached pointer listeners {:?}", self.listeners);
        self.listeners = Listeners::empty();
    }

    pub fn pointer_down(
        &mut self,
        surface: &dyn GestureSurface,
        target: NodeId,
        sample: PointerSample,
    ) -> PointerResponse {
        if !self.listeners.contains(Listeners::START) {
            return PointerResponse::Ignored;
        }
        if !sample.is_finite() {
            log::warn!("Ignoring pointer-down with non-finite sample {:?}", sample);
            return PointerResponse::Ignored;
        }
        if self.session.is_some() {
            log::debug!("Pointer-down replaces an unfinished gesture session");
        }

        let scrollable = resolve_scrollable_ancestor(surface, target, surface.root());
        self.session = Some(GestureSession::begin(sample, scrollable));
        PointerResponse::Handled
    }

    pub fn pointer_move(
        &mut self,
        surface: &dyn GestureSurface,
        sample: PointerSample,
    ) -> (PointerResponse, GestureUpdate) {
        if !self.listeners.contains(Listeners::MOVE) {
            return (PointerResponse::Ignored, GestureUpdate::None);
        }
        let Some(session) = self.session.as_mut() else {
            return (PointerResponse::Ignored, GestureUpdate::None);
        };
        if !sample.client_y.is_finite() {
            log::warn!("Ignoring pointer-move with non-finite position {}", sample.client_y);
            return (PointerResponse::Ignored, GestureUpdate::None);
        }

        let delta_y = session.delta_to(sample.client_y);
        session.record_delta(delta_y);
        let offset_px = resisted_offset(delta_y, self.thresholds.resistance_factor);

        match session.mode() {
            GestureMode::Dragging => (PointerResponse::Consumed, GestureUpdate::Dragged { offset_px }),
            GestureMode::NativeScroll => (PointerResponse::Ignored, GestureUpdate::None),
            GestureMode::Undetermined => match resolve_mode(session, delta_y, surface, &self.thresholds) {
                GestureMode::Dragging => (
                    PointerResponse::Consumed,
                    GestureUpdate::DragStarted { offset_px },
                ),
                GestureMode::NativeScroll | GestureMode::Undetermined => {
                    (PointerResponse::Ignored, GestureUpdate::None)
                }
            },
        }
    }

    /// End the session. The release position is not used: the distance is
    /// that of the last move.
    pub fn pointer_up(&mut self, sample: PointerSample) -> GestureUpdate {
        if !self.listeners.contains(Listeners::END) {
            return GestureUpdate::None;
        }
        let Some(session) = self.session.take() else {
            return GestureUpdate::None;
        };
        decide(&session, sample.timestamp_ms, &self.thresholds)
            .map_or(GestureUpdate::None, GestureUpdate::Released)
    }

    /// Abort the session. An interrupted drag always snaps back.
    pub fn pointer_cancel(&mut self) -> GestureUpdate {
        if !self.listeners.contains(Listeners::CANCEL) {
            return GestureUpdate::None;
        }
        match self.session.take() {
            Some(session) if session.mode() == GestureMode::Dragging => {
                log::debug!("Drag cancelled by the platform");
                GestureUpdate::Released(DismissDecision::SnapBack)
            }
            _ => GestureUpdate::None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{MemorySurface, ScrollMetrics};

    fn attached() -> (MemorySurface, GestureController) {
        let surface = MemorySurface::new(ScrollMetrics::fixed(600.0));
        let mut controller = GestureController::new(Thresholds::DEFAULT);
        controller.attach(&surface);
        (surface, controller)
    }

    #[test]
    fn test_attach_and_detach_are_idempotent() {
        let (surface, mut controller) = attached();
        controller.attach(&surface);
        assert_eq!(surface.attached_listeners(), Listeners::ALL);
        assert_eq!(surface.listener_calls(), 1);

        controller.detach(&surface);
        controller.detach(&surface);
        assert!(surface.attached_listeners().is_empty());
        assert_eq!(surface.listener_calls(), 2);
        assert!(!controller.is_attached());
    }

    #[test]
    fn test_detached_controller_ignores_pointer() {
        let surface = MemorySurface::new(ScrollMetrics::fixed(600.0));
        let mut controller = GestureController::new(Thresholds::DEFAULT);
        assert_eq!(
            controller.pointer_down(&surface, 0, PointerSample::new(100.0, 0.0)),
            PointerResponse::Ignored
        );
        assert!(controller.session().is_none());
    }

    #[test]
    fn test_drag_sequence() {
        let (surface, mut controller) = attached();
        controller.pointer_down(&surface, 0, PointerSample::new(100.0, 0.0));

        let (response, update) = controller.pointer_move(&surface, PointerSample::new(102.0, 10.0));
        assert_eq!(response, PointerResponse::Ignored);
        assert_eq!(update, GestureUpdate::None);

        let (response, update) = controller.pointer_move(&surface, PointerSample::new(110.0, 20.0));
        assert_eq!(response, PointerResponse::Consumed);
        assert_eq!(update, GestureUpdate::DragStarted { offset_px: 7.0 });

        let (_, update) = controller.pointer_move(&surface, PointerSample::new(80.0, 30.0));
        assert_eq!(update, GestureUpdate::Dragged { offset_px: 0.0 });

        let (_, update) = controller.pointer_move(&surface, PointerSample::new(300.0, 40.0));
        assert_eq!(update, GestureUpdate::Dragged { offset_px: 140.0 });

        assert_eq!(
            controller.pointer_up(PointerSample::new(300.0, 400.0)),
            GestureUpdate::Released(DismissDecision::Close)
        );
        assert!(controller.session().is_none());
    }

    #[test]
    fn test_scroll_sequence_never_moves_sheet() {
        let (surface, mut controller) = attached();
        let list = surface.add_node(0, ScrollMetrics::scrolling(400.0, 2000.0).with_scroll_top(50.0));
        controller.pointer_down(&surface, list, PointerSample::new(100.0, 0.0));

        for y in [120.0, 200.0, 400.0] {
            let (response, update) = controller.pointer_move(&surface, PointerSample::new(y, 10.0));
            assert_eq!(response, PointerResponse::Ignored);
            assert_eq!(update, GestureUpdate::None);
        }
        assert_eq!(controller.pointer_up(PointerSample::new(400.0, 50.0)), GestureUpdate::None);
    }

    #[test]
    fn test_cancel_mid_drag_snaps_back() {
        let (surface, mut controller) = attached();
        controller.pointer_down(&surface, 0, PointerSample::new(100.0, 0.0));
        controller.pointer_move(&surface, PointerSample::new(400.0, 10.0));
        assert_eq!(
            controller.pointer_cancel(),
            GestureUpdate::Released(DismissDecision::SnapBack)
        );
        assert_eq!(controller.pointer_cancel(), GestureUpdate::None);
    }

    #[test]
    fn test_non_finite_samples_are_dropped() {
        let (surface, mut controller) = attached();
        assert_eq!(
            controller.pointer_down(&surface, 0, PointerSample::new(f32::NAN, 0.0)),
            PointerResponse::Ignored
        );
        controller.pointer_down(&surface, 0, PointerSample::new(100.0, 0.0));
        let (response, _) = controller.pointer_move(&surface, PointerSample::new(f32::INFINITY, 5.0));
        assert_eq!(response, PointerResponse::Ignored);
        assert_eq!(controller.session().map(|s| s.last_delta_y()), Some(0.0));
    }

    #[test]
    fn test_detach_drops_session() {
        let (surface, mut controller) = attached();
        controller.pointer_down(&surface, 0, PointerSample::new(100.0, 0.0));
        controller.pointer_move(&surface, PointerSample::new(200.0, 10.0));
        controller.detach(&surface);
        assert!(controller.session().is_none());
        assert_eq!(controller.pointer_up(PointerSample::new(200.0, 20.0)), GestureUpdate::None);
    }
}
