//! A drag inside a scrolled list scrolls the list; the same drag with the
//! list at its top moves the sheet.

use std::rc::Rc;

use sheet_drag::prelude::*;

fn pull(sheet: &SheetHandle, target: NodeId, label: &str) {
    sheet.pointer_down(target, PointerSample::new(200.0, 0.0));
    let response = sheet.pointer_move(PointerSample::new(260.0, 60.0));
    println!(
        "{}: {:?}, sheet offset {:.1}px, state {:?}",
        label,
        response,
        sheet.offset().get_untracked(),
        sheet.animation_state().get_untracked()
    );
    sheet.pointer_up(PointerSample::new(260.0, 400.0));
}

fn main() {
    env_logger::init();

    let surface = Rc::new(MemorySurface::new(ScrollMetrics::fixed(640.0)));
    let list = surface.add_node(0, ScrollMetrics::scrolling(480.0, 2400.0));
    let row = surface.add_node(list, ScrollMetrics::fixed(56.0));
    let timers = ManualTimers::new();

    let sheet = attach_gesture(
        surface.clone(),
        SheetOptions::new(|| println!("sheet closed")),
        Rc::new(timers.clone()),
    );

    surface.set_scroll_top(list, 320.0);
    pull(&sheet, row, "list scrolled");

    surface.set_scroll_top(list, 0.0);
    pull(&sheet, row, "list at top");
    timers.advance(u64::from(sheet.thresholds().snapback_animation_ms));
    println!("settled in {:?}", sheet.animation_state().get_untracked());
}
