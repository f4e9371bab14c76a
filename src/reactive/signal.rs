use std::cell::RefCell;
use std::rc::Rc;

use super::frame::request_frame;
use super::runtime::{notify_write, release_signal, try_with_runtime, with_runtime, SignalId};

struct SignalInner<T> {
    id: SignalId,
    value: RefCell<T>,
}

impl<T> SignalInner<T> {
    fn track(&self) {
        try_with_runtime(|rt| rt.track_read(self.id));
    }

    fn read<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        let guard = self.value.borrow();
        f(&*guard)
    }
}

impl<T: PartialEq> SignalInner<T> {
    fn write(&self, value: T) {
        let Ok(mut guard) = self.value.try_borrow_mut() else {
            log::warn!("Signal {} written while being read, update skipped", self.id);
            return;
        };
        if *guard != value {
            *guard = value;
            drop(guard);
            notify_write(self.id);
            request_frame();
        }
    }
}

impl<T> Drop for SignalInner<T> {
    fn drop(&mut self) {
        release_signal(self.id);
    }
}

/// A reactive value.
///
/// Reading a signal inside an effect subscribes the effect; writing a
/// different value re-runs subscribers and requests a frame. Writing an
/// equal value is a no-op. Signals belong to the thread that created them:
///
/// ```compile_fail
/// fn assert_send<T: Send>() {}
/// assert_send::<sheet_drag::reactive::Signal<f32>>();
/// ```
pub struct Signal<T> {
    inner: Rc<SignalInner<T>>,
}

impl<T> Clone for Signal<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T> Signal<T> {
    pub fn new(value: T) -> Self {
        let id = with_runtime(|rt| rt.allocate_signal());
        Self {
            inner: Rc::new(SignalInner {
                id,
                value: RefCell::new(value),
            }),
        }
    }

    /// A handle that can observe this signal but not write it.
    pub fn read_only(&self) -> ReadSignal<T> {
        ReadSignal {
            inner: self.inner.clone(),
        }
    }

    pub fn with<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&T) -> R,
    {
        self.inner.track();
        self.inner.read(f)
    }

    pub fn with_untracked<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&T) -> R,
    {
        self.inner.read(f)
    }
}

impl<T: Clone> Signal<T> {
    pub fn get(&self) -> T {
        self.with(T::clone)
    }

    pub fn get_untracked(&self) -> T {
        self.with_untracked(T::clone)
    }
}

impl<T: PartialEq> Signal<T> {
    /// Sets the signal's value, only triggering updates if the value actually changed.
    pub fn set(&self, value: T) {
        self.inner.write(value);
    }
}

impl<T: PartialEq + Clone> Signal<T> {
    /// Updates the signal's value using a closure, only triggering updates if the value changed.
    pub fn update<F>(&self, f: F)
    where
        F: FnOnce(&mut T),
    {
        let mut value = self.get_untracked();
        f(&mut value);
        self.inner.write(value);
    }
}

/// Read-only handle to a signal.
pub struct ReadSignal<T> {
    inner: Rc<SignalInner<T>>,
}

impl<T> Clone for ReadSignal<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T> ReadSignal<T> {
    pub fn with<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&T) -> R,
    {
        self.inner.track();
        self.inner.read(f)
    }

    pub fn with_untracked<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&T) -> R,
    {
        self.inner.read(f)
    }
}

impl<T: Clone> ReadSignal<T> {
    pub fn get(&self) -> T {
        self.with(T::clone)
    }

    pub fn get_untracked(&self) -> T {
        self.with_untracked(T::clone)
    }
}

pub fn create_signal<T>(value: T) -> Signal<T> {
    Signal::new(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_signal_and_get() {
        let signal = create_signal(42);
        assert_eq!(signal.get(), 42);
    }

    #[test]
    fn test_set_updates_value() {
        let signal = create_signal(10.0f32);
        signal.set(20.0);
        assert_eq!(signal.get(), 20.0);
    }

    #[test]
    fn test_update_with_closure() {
        let signal = create_signal(5);
        signal.update(|v| *v += 10);
        assert_eq!(signal.get(), 15);
    }

    #[test]
    fn test_read_only_observes_writes() {
        let signal = create_signal(7);
        let read = signal.read_only();
        signal.set(14);
        assert_eq!(read.get(), 14);
        assert_eq!(read.with_untracked(|v| v * 2), 28);
    }

    #[test]
    fn test_clone_shares_underlying_value() {
        let signal1 = create_signal(50);
        let signal2 = signal1.clone();
        signal1.set(75);
        assert_eq!(signal2.get(), 75);
    }

    #[test]
    fn test_dropping_last_handle_frees_slot() {
        let baseline = crate::reactive::runtime::live_slots().0;
        let signal = create_signal(1);
        let read = signal.read_only();
        drop(signal);
        assert_eq!(crate::reactive::runtime::live_slots().0, baseline + 1);
        drop(read);
        assert_eq!(crate::reactive::runtime::live_slots().0, baseline);
    }

    #[test]
    fn test_write_during_read_is_skipped() {
        let signal = create_signal(1);
        signal.with(|_| signal.set(2));
        assert_eq!(signal.get(), 1);
    }

    #[test]
    fn test_set_same_value_does_not_request_frame() {
        let signal = create_signal(5);
        crate::reactive::take_frame_request();
        signal.set(5);
        assert!(!crate::reactive::take_frame_request());
        signal.set(6);
        assert!(crate::reactive::take_frame_request());
    }
}
