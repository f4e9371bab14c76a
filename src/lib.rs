//! Drag-to-dismiss gesture engine for bottom-sheet modals.
//!
//! A sheet attached with [`attach_gesture`] listens to pointer events on
//! its root element. A downward drag that starts while nested content is
//! scrolled to its top moves the sheet; anything else is left to native
//! scrolling. On release the sheet either slides out and invokes
//! `on_close`, or springs back to rest.
//!
//! The engine is platform-agnostic: hosts implement
//! [`GestureSurface`](surface::GestureSurface) and
//! [`TimerFacility`](timer::TimerFacility) and render from the
//! [`SheetHandle`]'s signals.

pub mod animation;
pub mod coordinator;
pub mod gesture;
pub mod modal;
pub mod presentation;
pub mod reactive;
pub mod sheet;
pub mod surface;
pub mod thresholds;
pub mod timer;

pub use coordinator::AnimationState;
pub use sheet::{attach_gesture, SheetHandle, SheetOptions};
pub use thresholds::Thresholds;

pub mod prelude {
    pub use crate::animation::{TimingFunction, Transition};
    pub use crate::coordinator::AnimationState;
    pub use crate::gesture::{DismissDecision, GestureMode};
    pub use crate::modal::{ModalKey, ModalResponse, ScrollLock, SheetModal};
    pub use crate::presentation::{SheetStyle, SheetTransform};
    pub use crate::reactive::{
        batch, create_effect, create_signal, take_frame_request, Effect, ReadSignal, Signal,
    };
    pub use crate::sheet::{attach_gesture, SheetHandle, SheetOptions};
    pub use crate::surface::{
        GestureSurface, Listeners, MemorySurface, NodeId, OverflowY, PointerResponse,
        PointerSample, ScrollMetrics, ScrollTree,
    };
    pub use crate::thresholds::Thresholds;
    pub use crate::timer::{ManualTimers, TimerFacility, TimerHandle};
}
