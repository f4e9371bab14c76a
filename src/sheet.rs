//! Wiring of the gesture engine to a host surface.
//!
//! [`attach_gesture`] installs pointer listeners on the sheet root and
//! returns a [`SheetHandle`]. The host forwards pointer events to the
//! handle while listeners are attached, and renders from the handle's
//! signals.
//!
//! # Example
//!
//! ```
//! use std::rc::Rc;
//! use sheet_drag::prelude::*;
//!
//! let surface = Rc::new(MemorySurface::new(ScrollMetrics::fixed(640.0)));
//! let timers = ManualTimers::new();
//! let sheet = attach_gesture(
//!     surface.clone(),
//!     SheetOptions::new(|| println!("closed")),
//!     Rc::new(timers.clone()),
//! );
//!
//! sheet.pointer_down(0, PointerSample::new(100.0, 0.0));
//! sheet.pointer_move(PointerSample::new(300.0, 100.0));
//! sheet.pointer_up(PointerSample::new(300.0, 200.0));
//! assert_eq!(sheet.animation_state().get(), AnimationState::Closing);
//!
//! timers.advance(200);
//! assert_eq!(sheet.animation_state().get(), AnimationState::Idle);
//! ```

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::coordinator::{AnimationCoordinator, AnimationState, Completion};
use crate::gesture::{GestureController, GestureUpdate};
use crate::presentation::{present, SheetStyle};
use crate::reactive::{batch, ReadSignal, Signal};
use crate::surface::{GestureSurface, NodeId, PointerResponse, PointerSample};
use crate::thresholds::Thresholds;
use crate::timer::TimerFacility;

/// Options for [`attach_gesture`].
pub struct SheetOptions {
    enabled: bool,
    on_close: Rc<dyn Fn()>,
    thresholds: Thresholds,
}

impl SheetOptions {
    /// Enabled options with default thresholds. `on_close` runs once per
    /// completed dismiss, after the slide-out animation.
    pub fn new<F: Fn() + 'static>(on_close: F) -> Self {
        Self {
            enabled: true,
            on_close: Rc::new(on_close),
            thresholds: Thresholds::DEFAULT,
        }
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn thresholds(mut self, thresholds: Thresholds) -> Self {
        self.thresholds = thresholds;
        self
    }
}

#[derive(Clone)]
struct SheetSignals {
    offset: Signal<f32>,
    overlay_opacity: Signal<f32>,
    state: Signal<AnimationState>,
    style: Signal<SheetStyle>,
}

impl SheetSignals {
    fn new() -> Self {
        let style = SheetStyle::default();
        Self {
            offset: Signal::new(0.0),
            overlay_opacity: Signal::new(style.overlay_opacity),
            state: Signal::new(AnimationState::Idle),
            style: Signal::new(style),
        }
    }

    fn publish(&self, state: AnimationState, offset_px: f32, thresholds: &Thresholds) {
        let style = present(state, offset_px, thresholds);
        batch(|| {
            self.offset.set(offset_px);
            self.overlay_opacity.set(style.overlay_opacity);
            self.state.set(state);
            self.style.set(style);
        });
    }
}

struct SheetEngine {
    surface: Rc<dyn GestureSurface>,
    timers: Rc<dyn TimerFacility>,
    thresholds: Thresholds,
    controller: GestureController,
    coordinator: AnimationCoordinator,
    on_close: Rc<dyn Fn()>,
    enabled: bool,
    torn_down: bool,
}

impl SheetEngine {
    fn snapshot(&self) -> (AnimationState, f32, Thresholds) {
        (
            self.coordinator.state(),
            self.coordinator.offset_px(),
            self.thresholds,
        )
    }

    fn accepts_pointer(&self) -> bool {
        self.enabled && !self.torn_down
    }
}

/// Install the drag-to-dismiss gesture on `surface`.
///
/// Listeners are attached immediately when `options` is enabled. The
/// returned handle owns the gesture; dropping it tears everything down.
pub fn attach_gesture(
    surface: Rc<dyn GestureSurface>,
    options: SheetOptions,
    timers: Rc<dyn TimerFacility>,
) -> SheetHandle {
    let thresholds = options.thresholds.sanitized();
    let mut controller = GestureController::new(thresholds);
    if options.enabled {
        controller.attach(&*surface);
    }
    log::info!(
        "Attached sheet gesture (enabled: {}, close at {}px or {}px/ms)",
        options.enabled,
        thresholds.close_distance_px,
        thresholds.close_velocity_px_per_ms
    );

    let engine = SheetEngine {
        surface,
        timers,
        thresholds,
        controller,
        coordinator: AnimationCoordinator::new(&thresholds),
        on_close: options.on_close,
        enabled: options.enabled,
        torn_down: false,
    };
    SheetHandle {
        engine: Rc::new(RefCell::new(engine)),
        signals: SheetSignals::new(),
    }
}

/// Reactive handle to an attached sheet gesture.
pub struct SheetHandle {
    engine: Rc<RefCell<SheetEngine>>,
    signals: SheetSignals,
}

impl SheetHandle {
    /// Current visual offset of the sheet in pixels, never negative
    pub fn offset(&self) -> ReadSignal<f32> {
        self.signals.offset.read_only()
    }

    pub fn overlay_opacity(&self) -> ReadSignal<f32> {
        self.signals.overlay_opacity.read_only()
    }

    pub fn animation_state(&self) -> ReadSignal<AnimationState> {
        self.signals.state.read_only()
    }

    /// Transform, opacity and transition to render the sheet with
    pub fn style(&self) -> ReadSignal<SheetStyle> {
        self.signals.style.read_only()
    }

    pub fn thresholds(&self) -> Thresholds {
        self.engine.borrow().thresholds
    }

    pub fn is_enabled(&self) -> bool {
        self.engine.borrow().accepts_pointer()
    }

    /// Whether pointer listeners are currently installed on the surface
    pub fn is_attached(&self) -> bool {
        self.engine.borrow().controller.is_attached()
    }

    /// Enable or disable the gesture. Idempotent.
    ///
    /// Disabling releases the listeners, drops the gesture in progress and
    /// cancels any pending animation without invoking `on_close`.
    pub fn set_enabled(&self, enabled: bool) {
        {
            let mut guard = self.engine.borrow_mut();
            let engine = &mut *guard;
            if engine.torn_down {
                log::warn!("set_enabled({}) on a detached sheet gesture", enabled);
                return;
            }
            if engine.enabled == enabled {
                return;
            }
            engine.enabled = enabled;
            if enabled {
                engine.controller.attach(&*engine.surface);
            } else {
                engine.controller.detach(&*engine.surface);
                engine.coordinator.reset(&*engine.timers);
            }
            log::info!("Sheet gesture {}", if enabled { "enabled" } else { "disabled" });
        }
        self.publish();
    }

    pub fn pointer_down(&self, target: NodeId, sample: PointerSample) -> PointerResponse {
        let response = {
            let mut guard = self.engine.borrow_mut();
            let engine = &mut *guard;
            if !engine.accepts_pointer() {
                return PointerResponse::Ignored;
            }
            match engine.coordinator.state() {
                AnimationState::Closing => {
                    log::warn!("Ignoring pointer-down while the sheet is closing");
                    return PointerResponse::Ignored;
                }
                AnimationState::SnappingBack => {
                    log::debug!("Sheet grabbed again during snap-back");
                    engine.coordinator.reset(&*engine.timers);
                }
                AnimationState::Dragging => {
                    log::debug!("Pointer-down during a drag abandons the previous drag");
                    engine.coordinator.reset(&*engine.timers);
                }
                AnimationState::Idle => {}
            }
            engine.controller.pointer_down(&*engine.surface, target, sample)
        };
        self.publish();
        response
    }

    pub fn pointer_move(&self, sample: PointerSample) -> PointerResponse {
        let response = {
            let mut guard = self.engine.borrow_mut();
            let engine = &mut *guard;
            if !engine.accepts_pointer() {
                return PointerResponse::Ignored;
            }
            let (response, update) = engine.controller.pointer_move(&*engine.surface, sample);
            match update {
                GestureUpdate::DragStarted { offset_px } => {
                    if !engine.coordinator.begin_drag(offset_px) {
                        engine.coordinator.drag_to(offset_px);
                    }
                }
                GestureUpdate::Dragged { offset_px } => engine.coordinator.drag_to(offset_px),
                GestureUpdate::None | GestureUpdate::Released(_) => return response,
            }
            response
        };
        self.publish();
        response
    }

    pub fn pointer_up(&self, sample: PointerSample) -> PointerResponse {
        let update = {
            let mut engine = self.engine.borrow_mut();
            if !engine.accepts_pointer() {
                return PointerResponse::Ignored;
            }
            engine.controller.pointer_up(sample)
        };
        self.settle(update)
    }

    /// The platform aborted the pointer sequence (e.g. `touchcancel`).
    pub fn pointer_cancel(&self) -> PointerResponse {
        let update = {
            let mut engine = self.engine.borrow_mut();
            if !engine.accepts_pointer() {
                return PointerResponse::Ignored;
            }
            engine.controller.pointer_cancel()
        };
        self.settle(update)
    }

    /// Tear the gesture down: release listeners, cancel timers, return to
    /// `Idle`. `on_close` never fires afterwards. Idempotent; also run on drop.
    pub fn detach(&self) {
        {
            let mut guard = self.engine.borrow_mut();
            let engine = &mut *guard;
            if engine.torn_down {
                return;
            }
            engine.torn_down = true;
            engine.enabled = false;
            engine.controller.detach(&*engine.surface);
            engine.coordinator.reset(&*engine.timers);
            log::info!("Detached sheet gesture");
        }
        self.publish();
    }

    fn settle(&self, update: GestureUpdate) -> PointerResponse {
        let GestureUpdate::Released(decision) = update else {
            return PointerResponse::Ignored;
        };
        let settled = {
            let mut guard = self.engine.borrow_mut();
            let engine = &mut *guard;
            let weak = Rc::downgrade(&self.engine);
            let signals = self.signals.clone();
            engine.coordinator.settle(decision, &*engine.timers, move |generation| {
                complete_animation(&weak, &signals, generation)
            })
        };
        if settled {
            self.publish();
            PointerResponse::Handled
        } else {
            PointerResponse::Ignored
        }
    }

    fn publish(&self) {
        publish(&self.engine, &self.signals);
    }
}

impl Drop for SheetHandle {
    fn drop(&mut self) {
        self.detach();
    }
}

fn publish(engine: &RefCell<SheetEngine>, signals: &SheetSignals) {
    let (state, offset_px, thresholds) = engine.borrow().snapshot();
    signals.publish(state, offset_px, &thresholds);
}

fn complete_animation(engine: &Weak<RefCell<SheetEngine>>, signals: &SheetSignals, generation: u64) {
    let Some(engine) = engine.upgrade() else {
        return;
    };
    let completion = engine.borrow_mut().coordinator.complete(generation);
    match completion {
        Some(Completion::Closed) => {
            let on_close = engine.borrow().on_close.clone();
            log::info!("Sheet dismissed");
            // No borrow is held: the callback may drop or disable the sheet
            on_close();
            engine.borrow_mut().coordinator.finish_close();
        }
        Some(Completion::SnappedBack) => log::debug!("Snap-back finished"),
        None => return,
    }
    publish(&engine, signals);
}
