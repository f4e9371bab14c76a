//! Mapping from animation state and drag offset to what the host renders.

use crate::animation::Transition;
use crate::coordinator::AnimationState;
use crate::thresholds::Thresholds;

/// Vertical placement of the sheet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SheetTransform {
    /// No transform; the sheet sits at its open position
    Rest,
    /// Translated down by the given number of pixels
    Offset(f32),
    /// Translated down by its own full height
    OffScreen,
}

impl SheetTransform {
    /// Downward translation in pixels for a sheet of `sheet_height_px`.
    pub fn translate_y(&self, sheet_height_px: f32) -> f32 {
        match self {
            SheetTransform::Rest => 0.0,
            SheetTransform::Offset(px) => *px,
            SheetTransform::OffScreen => sheet_height_px,
        }
    }

    /// CSS `transform` value, or `None` when no transform applies.
    pub fn css(&self) -> Option<String> {
        match self {
            SheetTransform::Rest => None,
            SheetTransform::Offset(px) => Some(format!("translateY({}px)", px)),
            SheetTransform::OffScreen => Some("translateY(100%)".to_string()),
        }
    }
}

/// Everything the host needs to draw the sheet and its backdrop.
#[derive(Debug, Clone, PartialEq)]
pub struct SheetStyle {
    pub transform: SheetTransform,
    pub overlay_opacity: f32,
    /// Transition to animate into `transform` with; `None` means apply immediately
    pub transition: Option<Transition>,
}

impl Default for SheetStyle {
    fn default() -> Self {
        Self {
            transform: SheetTransform::Rest,
            overlay_opacity: 1.0,
            transition: None,
        }
    }
}

/// Backdrop opacity for a sheet dragged down by `offset_px`.
///
/// Falls linearly from 1 at rest to 0 at `fade_distance_px`, clamped outside.
pub fn overlay_opacity(offset_px: f32, fade_distance_px: f32) -> f32 {
    if fade_distance_px <= 0.0 {
        return if offset_px > 0.0 { 0.0 } else { 1.0 };
    }
    (1.0 - offset_px / fade_distance_px).clamp(0.0, 1.0)
}

/// Style for the sheet in `state` at `offset_px`.
pub fn present(state: AnimationState, offset_px: f32, thresholds: &Thresholds) -> SheetStyle {
    let offset_px = offset_px.max(0.0);
    match state {
        AnimationState::Idle => SheetStyle::default(),
        AnimationState::Dragging => SheetStyle {
            transform: SheetTransform::Offset(offset_px),
            overlay_opacity: overlay_opacity(offset_px, thresholds.overlay_fade_distance_px),
            transition: None,
        },
        AnimationState::SnappingBack => SheetStyle {
            transform: SheetTransform::Offset(0.0),
            overlay_opacity: overlay_opacity(offset_px, thresholds.overlay_fade_distance_px),
            transition: Some(Transition::ease_out(thresholds.snapback_animation_ms)),
        },
        AnimationState::Closing => SheetStyle {
            transform: SheetTransform::OffScreen,
            overlay_opacity: 0.0,
            transition: Some(Transition::ease_in(thresholds.close_animation_ms)),
        },
    }
}
