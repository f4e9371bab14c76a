//! Timer facility used to sequence animation completions.
//!
//! Hosts provide a [`TimerFacility`] backed by their platform timers
//! (`setTimeout`, an event-loop timer source, ...). [`ManualTimers`] is a
//! virtual clock that fires callbacks only when [`ManualTimers::advance`]
//! is called, which makes animation timing fully deterministic.

use std::cell::RefCell;
use std::rc::Rc;

/// Handle returned by [`TimerFacility::schedule`], used to cancel the timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(u64);

impl TimerHandle {
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(&self) -> u64 {
        self.0
    }
}

/// Callback run once when a timer fires.
pub type TimerCallback = Box<dyn FnOnce()>;

/// One-shot timers on the UI thread.
///
/// Callbacks must run on the same thread that scheduled them, and never
/// synchronously from inside `schedule`. Cancelling a timer that already
/// fired or was already cancelled is a no-op.
pub trait TimerFacility {
    fn schedule(&self, duration_ms: u32, callback: TimerCallback) -> TimerHandle;

    fn cancel(&self, handle: TimerHandle);
}

struct Scheduled {
    deadline_ms: u64,
    handle: TimerHandle,
    callback: TimerCallback,
}

#[derive(Default)]
struct ManualTimersInner {
    now_ms: u64,
    next_id: u64,
    queue: Vec<Scheduled>,
}

/// Virtual-clock timer facility.
///
/// Clones share the same clock and queue.
#[derive(Clone, Default)]
pub struct ManualTimers {
    inner: Rc<RefCell<ManualTimersInner>>,
}

impl ManualTimers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time in milliseconds
    pub fn now_ms(&self) -> u64 {
        self.inner.borrow().now_ms
    }

    /// Number of timers scheduled and not yet fired or cancelled
    pub fn pending(&self) -> usize {
        self.inner.borrow().queue.len()
    }

    /// Move the clock forward by `ms`, firing every timer that comes due in
    /// deadline order. Callbacks may schedule or cancel further timers;
    /// those due within the same window fire in this call too.
    pub fn advance(&self, ms: u64) {
        let target = self.inner.borrow().now_ms + ms;
        loop {
            let due = {
                let mut inner = self.inner.borrow_mut();
                let next = inner
                    .queue
                    .iter()
                    .enumerate()
                    .filter(|(_, s)| s.deadline_ms <= target)
                    .min_by_key(|(_, s)| (s.deadline_ms, s.handle.raw()))
                    .map(|(i, _)| i);
                match next {
                    Some(index) => {
                        let scheduled = inner.queue.remove(index);
                        inner.now_ms = scheduled.deadline_ms;
                        Some(scheduled)
                    }
                    None => None,
                }
            };
            match due {
                Some(scheduled) => (scheduled.callback)(),
                None => break,
            }
        }
        self.inner.borrow_mut().now_ms = target;
    }
}

impl TimerFacility for ManualTimers {
    fn schedule(&self, duration_ms: u32, callback: TimerCallback) -> TimerHandle {
        let mut inner = self.inner.borrow_mut();
        let handle = TimerHandle(inner.next_id);
        inner.next_id += 1;
        let deadline_ms = inner.now_ms + u64::from(duration_ms);
        inner.queue.push(Scheduled {
            deadline_ms,
            handle,
            callback,
        });
        handle
    }

    fn cancel(&self, handle: TimerHandle) {
        self.inner.borrow_mut().queue.retain(|s| s.handle != handle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_fires_at_deadline() {
        let timers = ManualTimers::new();
        let fired = Rc::new(Cell::new(false));
        let flag = fired.clone();
        timers.schedule(200, Box::new(move || flag.set(true)));

        timers.advance(199);
        assert!(!fired.get());
        timers.advance(1);
        assert!(fired.get());
        assert_eq!(timers.pending(), 0);
        assert_eq!(timers.now_ms(), 200);
    }

    #[test]
    fn test_cancel_prevents_fire() {
        let timers = ManualTimers::new();
        let fired = Rc::new(Cell::new(false));
        let flag = fired.clone();
        let handle = timers.schedule(100, Box::new(move || flag.set(true)));
        timers.cancel(handle);
        // Second cancel is a no-op
        timers.cancel(handle);

        timers.advance(1000);
        assert!(!fired.get());
    }

    #[test]
    fn test_fires_in_deadline_order() {
        let timers = ManualTimers::new();
        let order = Rc::new(RefCell::new(Vec::new()));
        for (ms, tag) in [(300, "late"), (100, "early"), (200, "middle")] {
            let order = order.clone();
            timers.schedule(ms, Box::new(move || order.borrow_mut().push(tag)));
        }
        timers.advance(500);
        assert_eq!(*order.borrow(), vec!["early", "middle", "late"]);
    }

    #[test]
    fn test_callback_can_schedule() {
        let timers = ManualTimers::new();
        let fired = Rc::new(Cell::new(0));
        let (t, f) = (timers.clone(), fired.clone());
        timers.schedule(
            50,
            Box::new(move || {
                f.set(f.get() + 1);
                let f = f.clone();
                t.schedule(50, Box::new(move || f.set(f.get() + 1)));
            }),
        );
        timers.advance(100);
        assert_eq!(fired.get(), 2);
    }
}
