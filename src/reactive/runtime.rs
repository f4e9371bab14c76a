use std::cell::RefCell;
use std::collections::HashSet;

thread_local! {
    static RUNTIME: RefCell<Runtime> = RefCell::new(Runtime::default());
}

pub type SignalId = usize;
pub type EffectId = usize;

type EffectCallback = Box<dyn FnMut()>;

#[derive(Default)]
struct EffectSlot {
    callback: Option<EffectCallback>,
    dependencies: HashSet<SignalId>,
    running: bool,
    disposed: bool,
}

/// Dependency graph between signals and effects on the current thread.
///
/// Effect callbacks always run with the runtime unborrowed so that they
/// may read and write signals, create effects, or drop them. Slots of
/// dropped signals and effects are recycled.
#[derive(Default)]
pub struct Runtime {
    current_effect: Option<EffectId>,
    pending_effects: Vec<EffectId>,
    effects: Vec<EffectSlot>,
    free_effects: Vec<EffectId>,
    signal_subscribers: Vec<HashSet<EffectId>>,
    free_signals: Vec<SignalId>,
    batch_depth: usize,
    flushing: bool,
}

impl Runtime {
    pub fn allocate_signal(&mut self) -> SignalId {
        if let Some(id) = self.free_signals.pop() {
            return id;
        }
        self.signal_subscribers.push(HashSet::new());
        self.signal_subscribers.len() - 1
    }

    /// Unsubscribe every effect from `signal_id` and recycle the slot.
    pub fn dispose_signal(&mut self, signal_id: SignalId) {
        let Some(subscribers) = self.signal_subscribers.get_mut(signal_id) else {
            return;
        };
        for effect_id in std::mem::take(subscribers) {
            if let Some(slot) = self.effects.get_mut(effect_id) {
                slot.dependencies.remove(&signal_id);
            }
        }
        self.free_signals.push(signal_id);
    }

    fn allocate_effect(&mut self, callback: EffectCallback) -> EffectId {
        let slot = EffectSlot {
            callback: Some(callback),
            ..EffectSlot::default()
        };
        if let Some(id) = self.free_effects.pop() {
            self.effects[id] = slot;
            return id;
        }
        self.effects.push(slot);
        self.effects.len() - 1
    }

    pub fn track_read(&mut self, signal_id: SignalId) {
        if signal_id >= self.signal_subscribers.len() {
            return;
        }
        if let Some(effect_id) = self.current_effect {
            self.signal_subscribers[signal_id].insert(effect_id);
            self.effects[effect_id].dependencies.insert(signal_id);
        }
    }

    fn mark_subscribers(&mut self, signal_id: SignalId) {
        if signal_id >= self.signal_subscribers.len() {
            return;
        }
        for &effect_id in &self.signal_subscribers[signal_id] {
            if !self.pending_effects.contains(&effect_id) {
                self.pending_effects.push(effect_id);
            }
        }
    }

    fn clear_dependencies(&mut self, effect_id: EffectId) {
        let deps = std::mem::take(&mut self.effects[effect_id].dependencies);
        for signal_id in deps {
            if let Some(subscribers) = self.signal_subscribers.get_mut(signal_id) {
                subscribers.remove(&effect_id);
            }
        }
    }

    /// Dispose an effect and hand back its callback, which the caller must
    /// drop after releasing the runtime.
    ///
    /// A running effect keeps its slot until the run finishes.
    fn dispose_effect(&mut self, effect_id: EffectId) -> Option<EffectCallback> {
        if self.effects.get(effect_id).map_or(true, |slot| slot.disposed) {
            return None;
        }
        self.clear_dependencies(effect_id);
        self.pending_effects.retain(|&id| id != effect_id);
        let slot = &mut self.effects[effect_id];
        slot.disposed = true;
        let callback = slot.callback.take();
        if !slot.running {
            self.free_effects.push(effect_id);
        }
        callback
    }

    /// Number of signal and effect slots currently in use.
    pub fn live_slots(&self) -> (usize, usize) {
        (
            self.signal_subscribers.len() - self.free_signals.len(),
            self.effects.len() - self.free_effects.len(),
        )
    }
}

pub fn with_runtime<F, R>(f: F) -> R
where
    F: FnOnce(&mut Runtime) -> R,
{
    RUNTIME.with(|rt| f(&mut rt.borrow_mut()))
}

/// Access the runtime if it is alive and not already borrowed on this thread.
pub fn try_with_runtime<F, R>(f: F) -> Option<R>
where
    F: FnOnce(&mut Runtime) -> R,
{
    RUNTIME
        .try_with(|rt| rt.try_borrow_mut().ok().map(|mut runtime| f(&mut *runtime)))
        .ok()
        .flatten()
}

pub(crate) fn create_effect_slot(callback: EffectCallback) -> EffectId {
    let id = with_runtime(|rt| rt.allocate_effect(callback));
    run_effect(id);
    id
}

pub(crate) fn dispose_effect_slot(effect_id: EffectId) {
    let callback = try_with_runtime(|rt| rt.dispose_effect(effect_id)).flatten();
    // Captured signals release their own slots here
    drop(callback);
}

pub(crate) fn release_signal(signal_id: SignalId) {
    try_with_runtime(|rt| rt.dispose_signal(signal_id));
}

fn run_effect(effect_id: EffectId) {
    let started = with_runtime(|rt| {
        let slot = rt.effects.get(effect_id)?;
        if slot.disposed || slot.running {
            return None;
        }
        rt.clear_dependencies(effect_id);
        let slot = &mut rt.effects[effect_id];
        let callback = slot.callback.take()?;
        slot.running = true;
        let previous = rt.current_effect.replace(effect_id);
        Some((callback, previous))
    });
    let Some((mut callback, previous)) = started else {
        return;
    };

    callback();

    let finished = with_runtime(|rt| {
        rt.current_effect = previous;
        let slot = &mut rt.effects[effect_id];
        slot.running = false;
        if !slot.disposed {
            slot.callback = Some(callback);
            return None;
        }
        // Disposed during its own run
        rt.clear_dependencies(effect_id);
        rt.free_effects.push(effect_id);
        Some(callback)
    });
    drop(finished);
}

/// Queue the subscribers of `signal_id` and run them unless inside a batch.
pub(crate) fn notify_write(signal_id: SignalId) {
    let should_flush = with_runtime(|rt| {
        rt.mark_subscribers(signal_id);
        rt.batch_depth == 0 && !rt.flushing
    });
    if should_flush {
        flush_effects();
    }
}

fn flush_effects() {
    with_runtime(|rt| rt.flushing = true);
    loop {
        let next = with_runtime(|rt| {
            if rt.pending_effects.is_empty() {
                None
            } else {
                Some(rt.pending_effects.remove(0))
            }
        });
        match next {
            Some(effect_id) => run_effect(effect_id),
            None => break,
        }
    }
    with_runtime(|rt| rt.flushing = false);
}

/// Run `f` with effect notifications deferred until it returns.
pub fn batch<F, R>(f: F) -> R
where
    F: FnOnce() -> R,
{
    with_runtime(|rt| rt.batch_depth += 1);
    let result = f();
    let should_flush = with_runtime(|rt| {
        rt.batch_depth -= 1;
        rt.batch_depth == 0 && !rt.flushing
    });
    if should_flush {
        flush_effects();
    }
    result
}

/// Signal and effect slots in use on this thread, for leak checks.
pub fn live_slots() -> (usize, usize) {
    with_runtime(|rt| rt.live_slots())
}
