use super::scroll::is_at_top;
use super::session::{GestureMode, GestureSession};
use crate::surface::ScrollTree;
use crate::thresholds::Thresholds;

/// Decide, once, whether the session drags the sheet or scrolls content.
///
/// Below the drag-start distance nothing is decided. Past it, a downward
/// move with the nested scroll region absent or at its top commits to
/// [`GestureMode::Dragging`]; anything else commits to
/// [`GestureMode::NativeScroll`]. A committed session is returned unchanged.
pub fn resolve_mode<T>(
    session: &mut GestureSession,
    delta_y: f32,
    tree: &T,
    thresholds: &Thresholds,
) -> GestureMode
where
    T: ScrollTree + ?Sized,
{
    if session.mode().is_committed() {
        return session.mode();
    }
    if delta_y.abs() < thresholds.drag_start_distance_px {
        return GestureMode::Undetermined;
    }

    let mode = if delta_y > 0.0 && is_at_top(tree, session.scrollable_ancestor()) {
        GestureMode::Dragging
    } else {
        GestureMode::NativeScroll
    };
    session.commit(mode);
    log::debug!("Gesture committed to {:?} at delta {}", mode, delta_y);
    mode
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{MemorySurface, PointerSample, ScrollMetrics};

    fn surface_with_list(scroll_top: f32) -> (MemorySurface, usize) {
        let surface = MemorySurface::new(ScrollMetrics::fixed(600.0));
        let list = surface.add_node(
            0,
            ScrollMetrics::scrolling(400.0, 1600.0).with_scroll_top(scroll_top),
        );
        (surface, list)
    }

    fn begin(ancestor: Option<usize>) -> GestureSession {
        GestureSession::begin(PointerSample::new(300.0, 0.0), ancestor)
    }

    #[test]
    fn test_small_moves_stay_undetermined() {
        let (surface, _) = surface_with_list(0.0);
        let mut session = begin(None);
        let t = Thresholds::DEFAULT;
        for delta in [0.0, 2.0, -4.9, 4.9] {
            assert_eq!(resolve_mode(&mut session, delta, &surface, &t), GestureMode::Undetermined);
        }
        assert_eq!(session.mode(), GestureMode::Undetermined);
    }

    #[test]
    fn test_downward_without_scroll_region_drags() {
        let (surface, _) = surface_with_list(0.0);
        let mut session = begin(None);
        assert_eq!(
            resolve_mode(&mut session, 5.0, &surface, &Thresholds::DEFAULT),
            GestureMode::Dragging
        );
    }

    #[test]
    fn test_downward_at_top_of_list_drags() {
        let (surface, list) = surface_with_list(0.0);
        let mut session = begin(Some(list));
        assert_eq!(
            resolve_mode(&mut session, 12.0, &surface, &Thresholds::DEFAULT),
            GestureMode::Dragging
        );
    }

    #[test]
    fn test_downward_in_scrolled_list_delegates() {
        let (surface, list) = surface_with_list(40.0);
        let mut session = begin(Some(list));
        assert_eq!(
            resolve_mode(&mut session, 12.0, &surface, &Thresholds::DEFAULT),
            GestureMode::NativeScroll
        );
    }

    #[test]
    fn test_upward_always_delegates() {
        let (surface, _) = surface_with_list(0.0);
        let mut session = begin(None);
        assert_eq!(
            resolve_mode(&mut session, -8.0, &surface, &Thresholds::DEFAULT),
            GestureMode::NativeScroll
        );
    }

    #[test]
    fn test_decision_is_final() {
        let (surface, list) = surface_with_list(40.0);
        let mut session = begin(Some(list));
        let t = Thresholds::DEFAULT;
        assert_eq!(resolve_mode(&mut session, 20.0, &surface, &t), GestureMode::NativeScroll);

        // The list reaching its top later does not turn the gesture into a drag
        surface.set_scroll_top(list, 0.0);
        for delta in [30.0, 120.0, 400.0] {
            assert_eq!(resolve_mode(&mut session, delta, &surface, &t), GestureMode::NativeScroll);
        }
    }
}
