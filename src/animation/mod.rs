mod timing;

pub use timing::TimingFunction;

/// Duration and curve of a presentation transition.
#[derive(Clone, Debug, PartialEq)]
pub struct Transition {
    /// Duration of the animation in milliseconds
    pub duration_ms: u32,
    /// Timing function controlling the animation curve
    pub timing: TimingFunction,
}

impl Transition {
    pub fn new(duration_ms: u32, timing: TimingFunction) -> Self {
        Self {
            duration_ms,
            timing,
        }
    }

    pub fn ease_in(duration_ms: u32) -> Self {
        Self::new(duration_ms, TimingFunction::EaseIn)
    }

    pub fn ease_out(duration_ms: u32) -> Self {
        Self::new(duration_ms, TimingFunction::EaseOut)
    }

    /// Normalized time in [0, 1] after `elapsed_ms`.
    pub fn progress(&self, elapsed_ms: f32) -> f32 {
        if self.duration_ms == 0 {
            return 1.0;
        }
        (elapsed_ms / self.duration_ms as f32).clamp(0.0, 1.0)
    }

    pub fn is_finished(&self, elapsed_ms: f32) -> bool {
        self.progress(elapsed_ms) >= 1.0
    }

    /// Interpolated value between `from` and `to` after `elapsed_ms`.
    ///
    /// For hosts that animate the sheet frame by frame instead of handing
    /// the transition to a compositor.
    pub fn sample(&self, from: f32, to: f32, elapsed_ms: f32) -> f32 {
        let eased = self.timing.evaluate(self.progress(elapsed_ms));
        from + (to - from) * eased
    }

    /// CSS `transition` value for the `transform` property, e.g.
    /// `transform 200ms ease-in`.
    pub fn css(&self) -> String {
        match (&self.timing, self.timing.css_name()) {
            (_, Some(name)) => format!("transform {}ms {}", self.duration_ms, name),
            (TimingFunction::CubicBezier(x1, y1, x2, y2), None) => format!(
                "transform {}ms cubic-bezier({}, {}, {}, {})",
                self.duration_ms, x1, y1, x2, y2
            ),
            (_, None) => format!("transform {}ms linear", self.duration_ms),
        }
    }
}
