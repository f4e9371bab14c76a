/// Visual sheet offset for a raw downward displacement while dragging.
///
/// Upward displacement clamps to 0: the sheet cannot be pulled further open.
pub fn resisted_offset(delta_y: f32, resistance_factor: f32) -> f32 {
    // f32::max discards NaN
    (delta_y * resistance_factor).max(0.0)
}
