//! Headless walkthrough of a sheet being dragged down and dismissed.
//!
//! Run with `RUST_LOG=debug` to see the engine's decisions.

use std::cell::Cell;
use std::rc::Rc;

use sheet_drag::prelude::*;

const SHEET_HEIGHT: f32 = 640.0;
const FRAME_MS: u64 = 16;

/// Stands in for `overflow: hidden` on the page body
struct BodyScroll {
    locked: Cell<bool>,
}

impl ScrollLock for BodyScroll {
    fn lock(&self) {
        self.locked.set(true);
        println!("page scroll locked");
    }

    fn unlock(&self) {
        self.locked.set(false);
        println!("page scroll unlocked");
    }
}

fn main() {
    env_logger::init();

    let body = Rc::new(BodyScroll {
        locked: Cell::new(false),
    });
    let surface = Rc::new(MemorySurface::new(ScrollMetrics::fixed(SHEET_HEIGHT)));
    let timers = ManualTimers::new();

    let dismissed = Rc::new(Cell::new(false));
    let flag = dismissed.clone();
    let modal = SheetModal::new(body.clone(), move || flag.set(true));
    modal.open();

    let flag = dismissed.clone();
    let sheet = attach_gesture(
        surface.clone(),
        SheetOptions::new(move || flag.set(true)),
        Rc::new(timers.clone()),
    );

    let style = sheet.style();
    let _render = create_effect(move || {
        let style = style.get();
        println!(
            "render: translateY {:>6.1}px  overlay {:.2}  transition {}",
            style.transform.translate_y(SHEET_HEIGHT),
            style.overlay_opacity,
            style
                .transition
                .as_ref()
                .map(Transition::css)
                .unwrap_or_else(|| "none".to_string())
        );
    });

    // Finger goes down near the grab handle and pulls 180px in 240ms
    let mut now = 0.0;
    sheet.pointer_down(surface.root(), PointerSample::new(40.0, now));
    for step in 1..=15 {
        now += FRAME_MS as f64;
        let response = sheet.pointer_move(PointerSample::new(40.0 + step as f32 * 12.0, now));
        if step == 1 && response.prevents_default() {
            println!("native scrolling suppressed for this gesture");
        }
    }
    sheet.pointer_up(PointerSample::new(220.0, now));

    // Drive the slide-out frame by frame the way a host without CSS would
    let from = sheet.offset().get_untracked();
    let mut elapsed = 0;
    while sheet.animation_state().get_untracked() == AnimationState::Closing {
        if let Some(transition) = sheet.style().get_untracked().transition {
            let y = transition.sample(from, SHEET_HEIGHT, elapsed as f32);
            println!("frame {:>3}ms: sheet at {:>6.1}px", elapsed, y);
        }
        timers.advance(FRAME_MS);
        elapsed += FRAME_MS;
    }

    if dismissed.get() {
        modal.close();
        drop(sheet);
    }
    println!(
        "dismissed: {}, modal open: {}, page locked: {}",
        dismissed.get(),
        modal.is_open(),
        body.locked.get()
    );
}
