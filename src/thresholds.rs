//! Tuning constants for the drag-to-dismiss gesture.
//!
//! The defaults are the values every sheet ships with. Hosts that need a
//! different feel can override individual fields with the builder-style
//! setters:
//!
//! ```
//! use sheet_drag::Thresholds;
//!
//! let thresholds = Thresholds::DEFAULT
//!     .close_distance(140.0)
//!     .close_animation_ms(250);
//! assert_eq!(thresholds.close_distance_px, 140.0);
//! ```

/// Distance and timing thresholds consulted by the gesture engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    /// Downward displacement beyond which a release always closes the sheet
    pub close_distance_px: f32,
    /// Average release velocity (px/ms) beyond which a release closes the sheet
    pub close_velocity_px_per_ms: f32,
    /// Movement required before a gesture commits to drag or native scroll
    pub drag_start_distance_px: f32,
    /// Multiplier applied to finger displacement while dragging
    pub resistance_factor: f32,
    /// Duration of the slide-out animation before `on_close` fires
    pub close_animation_ms: u32,
    /// Duration of the spring-back animation after an aborted dismiss
    pub snapback_animation_ms: u32,
    /// Offset at which the backdrop overlay becomes fully transparent
    pub overlay_fade_distance_px: f32,
}

impl Thresholds {
    pub const DEFAULT: Self = Self {
        close_distance_px: 100.0,
        close_velocity_px_per_ms: 0.5,
        drag_start_distance_px: 5.0,
        resistance_factor: 0.7,
        close_animation_ms: 200,
        snapback_animation_ms: 300,
        overlay_fade_distance_px: 300.0,
    };

    pub fn close_distance(mut self, px: f32) -> Self {
        self.close_distance_px = px;
        self
    }

    pub fn close_velocity(mut self, px_per_ms: f32) -> Self {
        self.close_velocity_px_per_ms = px_per_ms;
        self
    }

    pub fn drag_start_distance(mut self, px: f32) -> Self {
        self.drag_start_distance_px = px;
        self
    }

    pub fn resistance(mut self, factor: f32) -> Self {
        self.resistance_factor = factor;
        self
    }

    pub fn close_animation_ms(mut self, ms: u32) -> Self {
        self.close_animation_ms = ms;
        self
    }

    pub fn snapback_animation_ms(mut self, ms: u32) -> Self {
        self.snapback_animation_ms = ms;
        self
    }

    pub fn overlay_fade_distance(mut self, px: f32) -> Self {
        self.overlay_fade_distance_px = px;
        self
    }

    /// Replace every unusable field with its default.
    ///
    /// Distances and velocities must be finite and non-negative; the
    /// resistance factor and fade distance must additionally be non-zero.
    pub fn sanitized(self) -> Self {
        let d = Self::DEFAULT;
        Self {
            close_distance_px: non_negative(self.close_distance_px, d.close_distance_px, "close_distance_px"),
            close_velocity_px_per_ms: non_negative(
                self.close_velocity_px_per_ms,
                d.close_velocity_px_per_ms,
                "close_velocity_px_per_ms",
            ),
            drag_start_distance_px: non_negative(
                self.drag_start_distance_px,
                d.drag_start_distance_px,
                "drag_start_distance_px",
            ),
            resistance_factor: positive(self.resistance_factor, d.resistance_factor, "resistance_factor"),
            close_animation_ms: self.close_animation_ms,
            snapback_animation_ms: self.snapback_animation_ms,
            overlay_fade_distance_px: positive(
                self.overlay_fade_distance_px,
                d.overlay_fade_distance_px,
                "overlay_fade_distance_px",
            ),
        }
    }
}

impl Default for Thresholds {
    fn default() -> Self {
        Self::DEFAULT
    }
}

fn non_negative(value: f32, fallback: f32, name: &str) -> f32 {
    if value.is_finite() && value >= 0.0 {
        value
    } else {
        log::warn!("Invalid {} ({}), using default {}", name, value, fallback);
        fallback
    }
}

fn positive(value: f32, fallback: f32, name: &str) -> f32 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        log::warn!("Invalid {} ({}), using default {}", name, value, fallback);
        fallback
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let t = Thresholds::default();
        assert_eq!(t.close_distance_px, 100.0);
        assert_eq!(t.close_velocity_px_per_ms, 0.5);
        assert_eq!(t.drag_start_distance_px, 5.0);
        assert_eq!(t.resistance_factor, 0.7);
        assert_eq!(t.close_animation_ms, 200);
        assert_eq!(t.snapback_animation_ms, 300);
        assert_eq!(t.overlay_fade_distance_px, 300.0);
    }

    #[test]
    fn test_builder_overrides_single_field() {
        let t = Thresholds::DEFAULT.resistance(0.5);
        assert_eq!(t.resistance_factor, 0.5);
        assert_eq!(t.close_distance_px, 100.0);
    }

    #[test]
    fn test_sanitized_restores_invalid_fields() {
        let t = Thresholds::DEFAULT
            .close_distance(-1.0)
            .resistance(0.0)
            .close_velocity(f32::NAN)
            .overlay_fade_distance(f32::INFINITY)
            .drag_start_distance(8.0)
            .sanitized();
        assert_eq!(t.close_distance_px, 100.0);
        assert_eq!(t.resistance_factor, 0.7);
        assert_eq!(t.close_velocity_px_per_ms, 0.5);
        assert_eq!(t.overlay_fade_distance_px, 300.0);
        // Valid overrides survive
        assert_eq!(t.drag_start_distance_px, 8.0);
    }
}
