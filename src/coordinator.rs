//! Presentation state machine for a sheet.
//!
//! ```text
//! Idle ──drag commits──▶ Dragging ──Close──▶ Closing ──timer──▶ (on_close) ─▶ Idle
//!                           │
//!                           └──SnapBack──▶ SnappingBack ──timer──▶ Idle
//! ```
//!
//! Any state returns to `Idle` on [`reset`](AnimationCoordinator::reset),
//! which also cancels the pending timer. Every scheduled timer carries a
//! generation number; a completion whose generation is not the pending one
//! is stale and ignored, so a timer can never complete an animation it did
//! not start.

use crate::gesture::DismissDecision;
use crate::thresholds::Thresholds;
use crate::timer::{TimerFacility, TimerHandle};

/// Exactly one of these holds for a sheet at any time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnimationState {
    #[default]
    Idle,
    Dragging,
    SnappingBack,
    Closing,
}

/// A timed animation that has run to completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// The slide-out finished; the caller must invoke the dismissal
    /// callback and then [`finish_close`](AnimationCoordinator::finish_close)
    Closed,
    /// The sheet is back at rest
    SnappedBack,
}

#[derive(Debug, Clone, Copy)]
struct PendingAnimation {
    handle: TimerHandle,
    generation: u64,
}

#[derive(Debug)]
pub struct AnimationCoordinator {
    state: AnimationState,
    offset_px: f32,
    pending: Option<PendingAnimation>,
    generation: u64,
    close_animation_ms: u32,
    snapback_animation_ms: u32,
}

impl AnimationCoordinator {
    pub fn new(thresholds: &Thresholds) -> Self {
        Self {
            state: AnimationState::Idle,
            offset_px: 0.0,
            pending: None,
            generation: 0,
            close_animation_ms: thresholds.close_animation_ms,
            snapback_animation_ms: thresholds.snapback_animation_ms,
        }
    }

    pub fn state(&self) -> AnimationState {
        self.state
    }

    pub fn offset_px(&self) -> f32 {
        self.offset_px
    }

    pub fn has_pending_animation(&self) -> bool {
        self.pending.is_some()
    }

    /// `Idle -> Dragging`. Returns false from any other state.
    pub fn begin_drag(&mut self, offset_px: f32) -> bool {
        if self.state != AnimationState::Idle {
            log::debug!("Drag start ignored in {:?}", self.state);
            return false;
        }
        self.state = AnimationState::Dragging;
        self.offset_px = offset_px.max(0.0);
        true
    }

    /// Follow the finger. Only meaningful while dragging.
    pub fn drag_to(&mut self, offset_px: f32) {
        if self.state == AnimationState::Dragging {
            self.offset_px = offset_px.max(0.0);
        }
    }

    /// Settle a released drag and schedule its completion.
    ///
    /// `on_complete` receives the generation to pass back to
    /// [`complete`](Self::complete) when the timer fires. Returns false (and
    /// schedules nothing) unless the sheet is dragging.
    pub fn settle<F>(&mut self, decision: DismissDecision, timers: &dyn TimerFacility, on_complete: F) -> bool
    where
        F: FnOnce(u64) + 'static,
    {
        if self.state != AnimationState::Dragging {
            log::debug!("Settle {:?} ignored in {:?}", decision, self.state);
            return false;
        }

        let duration_ms = match decision {
            DismissDecision::Close => {
                self.state = AnimationState::Closing;
                self.close_animation_ms
            }
            DismissDecision::SnapBack => {
                self.state = AnimationState::SnappingBack;
                self.offset_px = 0.0;
                self.snapback_animation_ms
            }
        };

        self.generation += 1;
        let generation = self.generation;
        let handle = timers.schedule(duration_ms, Box::new(move || on_complete(generation)));
        self.pending = Some(PendingAnimation { handle, generation });
        true
    }

    /// Handle a timer firing. Returns `None` for stale or cancelled timers.
    pub fn complete(&mut self, generation: u64) -> Option<Completion> {
        match self.pending {
            Some(pending) if pending.generation == generation => {}
            _ => {
                log::debug!("Ignoring stale animation completion {}", generation);
                return None;
            }
        }
        self.pending = None;

        match self.state {
            AnimationState::Closing => Some(Completion::Closed),
            AnimationState::SnappingBack => {
                self.state = AnimationState::Idle;
                self.offset_px = 0.0;
                Some(Completion::SnappedBack)
            }
            AnimationState::Idle | AnimationState::Dragging => None,
        }
    }

    /// `Closing -> Idle` once the dismissal callback has run.
    pub fn finish_close(&mut self) {
        if self.state == AnimationState::Closing {
            self.state = AnimationState::Idle;
            self.offset_px = 0.0;
        }
    }

    /// Cancel any pending animation and return to rest.
    pub fn reset(&mut self, timers: &dyn TimerFacility) {
        if let Some(pending) = self.pending.take() {
            timers.cancel(pending.handle);
            log::debug!("Cancelled pending animation in {:?}", self.state);
        }
        self.state = AnimationState::Idle;
        self.offset_px = 0.0;
    }
}
