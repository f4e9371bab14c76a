//! Minimal single-threaded reactive primitives.
//!
//! The sheet engine publishes its offset, overlay opacity, animation state
//! and computed style through [`Signal`]s. Hosts read them directly each
//! frame, or subscribe with [`create_effect`].

pub mod effect;
pub mod frame;
pub mod runtime;
pub mod signal;

pub use effect::{create_effect, Effect};
pub use frame::take_frame_request;
pub use runtime::batch;
pub use signal::{create_signal, ReadSignal, Signal};
