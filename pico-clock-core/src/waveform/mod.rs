//! Waveform generation
//!
//! Selects between software-timed toggling and hardware PWM and owns the
//! active generator while the output runs.

pub mod driver;
pub mod pwm;
pub mod shared;

pub use driver::WaveformDriver;
pub use pwm::PwmTiming;
pub use shared::{half_period_us, period_us, SharedFrequency};
