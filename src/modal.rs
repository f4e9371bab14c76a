//! Host-side modal behavior around a bottom sheet.
//!
//! A [`SheetModal`] tracks whether the sheet is open, locks page scrolling
//! while it is, and turns Escape and backdrop taps into close requests.
//! It does not decide what happens on close; the host's `on_close` does,
//! typically by calling [`SheetModal::close`] and dropping the sheet's
//! [`SheetHandle`](crate::SheetHandle).

use std::cell::Cell;
use std::rc::Rc;

use crate::reactive::{ReadSignal, Signal};

/// Page-level scroll lock, e.g. `overflow: hidden` on the document body.
pub trait ScrollLock {
    fn lock(&self);

    fn unlock(&self);
}

/// Keys the modal reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalKey {
    Escape,
    Other,
}

/// Whether the modal acted on an input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalResponse {
    Ignored,
    /// The input was handled; the host should stop propagating it
    Handled,
}

pub struct SheetModal {
    open: Signal<bool>,
    locked: Cell<bool>,
    scroll_lock: Rc<dyn ScrollLock>,
    on_close: Rc<dyn Fn()>,
    on_escape: Option<Rc<dyn Fn()>>,
}

impl SheetModal {
    pub fn new<F: Fn() + 'static>(scroll_lock: Rc<dyn ScrollLock>, on_close: F) -> Self {
        Self {
            open: Signal::new(false),
            locked: Cell::new(false),
            scroll_lock,
            on_close: Rc::new(on_close),
            on_escape: None,
        }
    }

    /// Run `on_escape` instead of `on_close` when Escape is pressed.
    pub fn on_escape<F: Fn() + 'static>(mut self, on_escape: F) -> Self {
        self.on_escape = Some(Rc::new(on_escape));
        self
    }

    pub fn is_open(&self) -> bool {
        self.open.get_untracked()
    }

    pub fn open_signal(&self) -> ReadSignal<bool> {
        self.open.read_only()
    }

    pub fn open(&self) {
        self.set_open(true);
    }

    /// Hide the modal and release the scroll lock. Does not run `on_close`.
    pub fn close(&self) {
        self.set_open(false);
    }

    fn set_open(&self, open: bool) {
        if open && !self.locked.get() {
            self.scroll_lock.lock();
            self.locked.set(true);
        } else if !open && self.locked.get() {
            self.scroll_lock.unlock();
            self.locked.set(false);
        }
        self.open.set(open);
    }

    pub fn key_down(&self, key: ModalKey) -> ModalResponse {
        if !self.is_open() || key != ModalKey::Escape {
            return ModalResponse::Ignored;
        }
        let handler = self.on_escape.clone().unwrap_or_else(|| self.on_close.clone());
        handler();
        ModalResponse::Handled
    }

    pub fn backdrop_tap(&self) -> ModalResponse {
        if !self.is_open() {
            return ModalResponse::Ignored;
        }
        let on_close = self.on_close.clone();
        on_close();
        ModalResponse::Handled
    }
}

impl Drop for SheetModal {
    fn drop(&mut self) {
        if self.locked.get() {
            self.scroll_lock.unlock();
        }
    }
}
