use crate::surface::{NodeId, PointerSample};

/// How a touch sequence is being interpreted.
///
/// Moves out of `Undetermined` at most once per session and never back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GestureMode {
    #[default]
    Undetermined,
    /// The gesture moves the sheet
    Dragging,
    /// The gesture belongs to the platform's native scrolling
    NativeScroll,
}

impl GestureMode {
    pub fn is_committed(&self) -> bool {
        !matches!(self, GestureMode::Undetermined)
    }
}

/// State of one pointer-down..pointer-up sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct GestureSession {
    start_y: f32,
    start_time_ms: f64,
    last_delta_y: f32,
    mode: GestureMode,
    scrollable_ancestor: Option<NodeId>,
}

impl GestureSession {
    pub fn begin(start: PointerSample, scrollable_ancestor: Option<NodeId>) -> Self {
        Self {
            start_y: start.client_y,
            start_time_ms: start.timestamp_ms,
            last_delta_y: 0.0,
            mode: GestureMode::Undetermined,
            scrollable_ancestor,
        }
    }

    pub fn start_y(&self) -> f32 {
        self.start_y
    }

    pub fn start_time_ms(&self) -> f64 {
        self.start_time_ms
    }

    /// Most recent vertical displacement from the start position (positive = down)
    pub fn last_delta_y(&self) -> f32 {
        self.last_delta_y
    }

    pub fn mode(&self) -> GestureMode {
        self.mode
    }

    pub fn scrollable_ancestor(&self) -> Option<NodeId> {
        self.scrollable_ancestor
    }

    /// Displacement of `client_y` from the start position.
    pub fn delta_to(&self, client_y: f32) -> f32 {
        client_y - self.start_y
    }

    pub(crate) fn record_delta(&mut self, delta_y: f32) {
        self.last_delta_y = delta_y;
    }

    /// Commit to `mode`. Returns false if the session was already committed,
    /// in which case nothing changes.
    pub(crate) fn commit(&mut self, mode: GestureMode) -> bool {
        if self.mode.is_committed() || !mode.is_committed() {
            return false;
        }
        self.mode = mode;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> GestureSession {
        GestureSession::begin(PointerSample::new(400.0, 1000.0), None)
    }

    #[test]
    fn test_begin() {
        let s = session();
        assert_eq!(s.start_y(), 400.0);
        assert_eq!(s.start_time_ms(), 1000.0);
        assert_eq!(s.last_delta_y(), 0.0);
        assert_eq!(s.mode(), GestureMode::Undetermined);
        assert_eq!(s.delta_to(460.0), 60.0);
        assert_eq!(s.delta_to(380.0), -20.0);
    }

    #[test]
    fn test_commit_is_final() {
        let mut s = session();
        assert!(s.commit(GestureMode::Dragging));
        assert!(!s.commit(GestureMode::NativeScroll));
        assert!(!s.commit(GestureMode::Dragging));
        assert_eq!(s.mode(), GestureMode::Dragging);
    }

    #[test]
    fn test_commit_to_undetermined_is_rejected() {
        let mut s = session();
        assert!(!s.commit(GestureMode::Undetermined));
        assert!(s.commit(GestureMode::NativeScroll));
        assert_eq!(s.mode(), GestureMode::NativeScroll);
    }
}
