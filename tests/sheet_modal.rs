use std::cell::{Cell, RefCell};
use std::rc::Rc;

use sheet_drag::prelude::*;

#[derive(Default)]
struct BodyScroll {
    locked: Cell<bool>,
}

impl ScrollLock for BodyScroll {
    fn lock(&self) {
        self.locked.set(true);
    }

    fn unlock(&self) {
        self.locked.set(false);
    }
}

/// A host that closes the modal and unmounts the sheet when it is dismissed.
struct Host {
    modal: SheetModal,
    sheet: RefCell<Option<SheetHandle>>,
}

#[test]
fn swipe_dismiss_closes_modal_and_unmounts_sheet() {
    let _ = env_logger::builder().is_test(true).try_init();
    let body = Rc::new(BodyScroll::default());
    let surface = Rc::new(MemorySurface::new(ScrollMetrics::fixed(640.0)));
    let timers = ManualTimers::new();

    let host: Rc<RefCell<Option<Rc<Host>>>> = Rc::new(RefCell::new(None));
    let dismiss = {
        let host = host.clone();
        move || {
            let host = host.borrow().clone();
            if let Some(host) = host {
                host.modal.close();
                host.sheet.borrow_mut().take();
            }
        }
    };
    let dismiss = Rc::new(dismiss);

    let modal = {
        let dismiss = dismiss.clone();
        SheetModal::new(body.clone(), move || dismiss())
    };
    let sheet = {
        let dismiss = dismiss.clone();
        attach_gesture(
            surface.clone(),
            SheetOptions::new(move || dismiss()),
            Rc::new(timers.clone()),
        )
    };
    let state = sheet.animation_state();
    let app = Rc::new(Host {
        modal,
        sheet: RefCell::new(Some(sheet)),
    });
    *host.borrow_mut() = Some(app.clone());

    app.modal.open();
    assert!(body.locked.get());

    if let Some(sheet) = app.sheet.borrow().as_ref() {
        sheet.pointer_down(0, PointerSample::new(50.0, 0.0));
        sheet.pointer_move(PointerSample::new(250.0, 100.0));
        sheet.pointer_up(PointerSample::new(250.0, 150.0));
    }
    timers.advance(200);

    assert!(!app.modal.is_open());
    assert!(!body.locked.get());
    assert!(app.sheet.borrow().is_none());
    assert!(surface.attached_listeners().is_empty());
    assert_eq!(state.get(), AnimationState::Idle);

    // Break the host <-> callback cycle
    host.borrow_mut().take();
}

#[test]
fn escape_and_backdrop_request_close() {
    let body = Rc::new(BodyScroll::default());
    let requests = Rc::new(Cell::new(0));
    let counter = requests.clone();
    let modal = SheetModal::new(body, move || counter.set(counter.get() + 1));

    modal.open();
    assert_eq!(modal.key_down(ModalKey::Escape), ModalResponse::Handled);
    assert_eq!(modal.backdrop_tap(), ModalResponse::Handled);
    assert_eq!(requests.get(), 2);

    modal.close();
    assert_eq!(modal.key_down(ModalKey::Escape), ModalResponse::Ignored);
    assert_eq!(requests.get(), 2);
}
