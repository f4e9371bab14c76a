//! Pointer interpretation for drag-to-dismiss.
//!
//! A touch sequence starts [`Undetermined`](GestureMode::Undetermined).
//! On the first move past the drag-start distance it commits, once, to
//! either dragging the sheet or letting nested content scroll natively.
//! While dragging, finger displacement is damped by the resistance factor;
//! on release, distance and average velocity decide between closing and
//! snapping back.

pub mod controller;
pub mod decision;
pub mod displacement;
pub mod mode;
pub mod scroll;
pub mod session;

pub use controller::{GestureController, GestureUpdate};
pub use decision::{decide, release_velocity, DismissDecision};
pub use displacement::resisted_offset;
pub use mode::resolve_mode;
pub use scroll::resolve_scrollable_ancestor;
pub use session::{GestureMode, GestureSession};
