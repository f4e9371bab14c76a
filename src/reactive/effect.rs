use std::marker::PhantomData;

use super::runtime::{create_effect_slot, dispose_effect_slot, EffectId};

/// A callback that re-runs whenever a signal it read changes.
///
/// The effect runs once on creation. Dropping it unsubscribes. Its id
/// indexes the runtime of the creating thread, so it cannot leave it:
///
/// ```compile_fail
/// fn assert_send<T: Send>() {}
/// assert_send::<sheet_drag::reactive::Effect>();
/// ```
pub struct Effect {
    id: EffectId,
    _not_send: PhantomData<*const ()>,
}

impl Effect {
    pub fn new<F>(f: F) -> Self
    where
        F: FnMut() + 'static,
    {
        Self {
            id: create_effect_slot(Box::new(f)),
            _not_send: PhantomData,
        }
    }
}

impl Drop for Effect {
    fn drop(&mut self) {
        dispose_effect_slot(self.id);
    }
}

pub fn create_effect<F>(f: F) -> Effect
where
    F: FnMut() + 'static,
{
    Effect::new(f)
}
