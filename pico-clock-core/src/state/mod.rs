//! Clock state and input events
//!
//! The generator state machine is explicit, finite, and deterministic.

pub mod events;
pub mod machine;

pub use events::{Button, InputEvent, TimedEvent};
pub use machine::{ClockError, ClockState, GenerationMode, GeneratorState, Transition};
