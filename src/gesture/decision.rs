use super::session::{GestureMode, GestureSession};
use crate::thresholds::Thresholds;

/// Outcome of releasing a drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DismissDecision {
    Close,
    SnapBack,
}

/// Average velocity in px/ms; 0 when no time has elapsed.
pub fn release_velocity(delta_y: f32, elapsed_ms: f64) -> f32 {
    if elapsed_ms > 0.0 && elapsed_ms.is_finite() {
        (f64::from(delta_y) / elapsed_ms) as f32
    } else {
        0.0
    }
}

/// Decide how a released session ends.
///
/// Returns `None` for sessions that never became a drag; their release is
/// not a dismiss gesture.
pub fn decide(
    session: &GestureSession,
    end_time_ms: f64,
    thresholds: &Thresholds,
) -> Option<DismissDecision> {
    if session.mode() != GestureMode::Dragging {
        return None;
    }

    let distance = session.last_delta_y();
    let elapsed_ms = end_time_ms - session.start_time_ms();
    let velocity = release_velocity(distance, elapsed_ms);

    let decision = if distance > thresholds.close_distance_px
        || velocity > thresholds.close_velocity_px_per_ms
    {
        DismissDecision::Close
    } else {
        DismissDecision::SnapBack
    };
    log::debug!(
        "Released drag: distance {}px, velocity {:.3}px/ms over {}ms -> {:?}",
        distance,
        velocity,
        elapsed_ms,
        decision
    );
    Some(decision)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::PointerSample;

    fn dragged(delta_y: f32) -> GestureSession {
        let mut session = GestureSession::begin(PointerSample::new(100.0, 1000.0), None);
        session.commit(GestureMode::Dragging);
        session.record_delta(delta_y);
        session
    }

    #[test]
    fn test_long_slow_drag_closes() {
        let session = dragged(150.0);
        assert_eq!(release_velocity(150.0, 500.0), 0.3);
        assert_eq!(
            decide(&session, 1500.0, &Thresholds::DEFAULT),
            Some(DismissDecision::Close)
        );
    }

    #[test]
    fn test_short_fast_flick_closes() {
        let session = dragged(60.0);
        assert_eq!(release_velocity(60.0, 80.0), 0.75);
        assert_eq!(
            decide(&session, 1080.0, &Thresholds::DEFAULT),
            Some(DismissDecision::Close)
        );
    }

    #[test]
    fn test_short_slow_drag_snaps_back() {
        let session = dragged(40.0);
        assert_eq!(
            decide(&session, 1200.0, &Thresholds::DEFAULT),
            Some(DismissDecision::SnapBack)
        );
    }

    #[test]
    fn test_exact_threshold_does_not_close() {
        // Both comparisons are strict
        let session = dragged(100.0);
        assert_eq!(
            decide(&session, 1200.0, &Thresholds::DEFAULT),
            Some(DismissDecision::SnapBack)
        );
    }

    #[test]
    fn test_zero_or_negative_elapsed_has_no_velocity() {
        assert_eq!(release_velocity(60.0, 0.0), 0.0);
        assert_eq!(release_velocity(60.0, -5.0), 0.0);
        let session = dragged(60.0);
        assert_eq!(
            decide(&session, 1000.0, &Thresholds::DEFAULT),
            Some(DismissDecision::SnapBack)
        );
        assert_eq!(
            decide(&session, 900.0, &Thresholds::DEFAULT),
            Some(DismissDecision::SnapBack)
        );
    }

    #[test]
    fn test_dragged_back_up_snaps_back() {
        let session = dragged(-30.0);
        assert_eq!(
            decide(&session, 1010.0, &Thresholds::DEFAULT),
            Some(DismissDecision::SnapBack)
        );
    }

    #[test]
    fn test_non_drag_sessions_are_no_ops() {
        let pending = GestureSession::begin(PointerSample::new(100.0, 0.0), None);
        assert_eq!(decide(&pending, 10.0, &Thresholds::DEFAULT), None);

        let mut scrolling = GestureSession::begin(PointerSample::new(100.0, 0.0), None);
        scrolling.commit(GestureMode::NativeScroll);
        scrolling.record_delta(500.0);
        assert_eq!(decide(&scrolling, 10.0, &Thresholds::DEFAULT), None);
    }
}
