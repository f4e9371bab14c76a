use std::cell::Cell;

thread_local! {
    /// Set whenever a signal changes value; cleared by the host's render loop
    static FRAME_REQUESTED: Cell<bool> = const { Cell::new(false) };
}

pub(crate) fn request_frame() {
    FRAME_REQUESTED.with(|flag| flag.set(true));
}

/// Check if a frame has been requested and clear the flag.
///
/// Hosts without their own change tracking poll this once per frame and
/// re-render the sheet when it returns true.
pub fn take_frame_request() -> bool {
    FRAME_REQUESTED.with(|flag| flag.replace(false))
}
