//! Hardware abstraction traits
//!
//! These traits define the interface between the clock logic and the
//! hardware-specific generators. Plain pins and delays use `embedded-hal`.

pub mod generator;

pub use generator::{PwmOutput, SoftwareTimer};
