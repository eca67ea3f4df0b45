//! Waveform generator traits
//!
//! The waveform driver owns one of each and keeps at most one active.

/// Periodic software timer driving the output below the PWM threshold
///
/// Each period the implementation drives the output high for half a period
/// of the *current* frequency, read from the shared frequency cell, then
/// drives it low.
pub trait SoftwareTimer {
    /// Start firing at the given rate
    fn start(&mut self, frequency_hz: u32);

    /// Stop firing and release the timer
    fn stop(&mut self);
}

/// Hardware PWM channel driving the output at or above the threshold
pub trait PwmOutput {
    /// Configure the channel for a frequency and duty, then enable it
    ///
    /// `duty` is in 1/65535 units.
    fn start(&mut self, frequency_hz: u32, duty: u16);

    /// Change the duty cycle without touching the frequency
    fn set_duty(&mut self, duty: u16);

    /// Disable the channel
    fn stop(&mut self);
}
