//! Waveform driver
//!
//! Starts, stops and pulses the clock output. Below the software-timed
//! threshold the output is toggled by a periodic timer; at or above it a
//! hardware PWM channel runs at ~50% duty.
//!
//! # Usage
//!
//! ```ignore
//! let mut driver = WaveformDriver::new(timer, pwm, clock_pin, led);
//! let mode = driver.start(&mut state)?;
//! // ...
//! driver.stop(&mut state);
//! ```

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use crate::state::{ClockError, ClockState, GenerationMode, Transition};
use crate::traits::{PwmOutput, SoftwareTimer};
use crate::waveform::half_period_us;

/// Owns the generators, the clock output and the run LED
pub struct WaveformDriver<T, P, O, L> {
    timer: T,
    pwm: P,
    output: O,
    led: L,
}

impl<T, P, O, L> WaveformDriver<T, P, O, L>
where
    T: SoftwareTimer,
    P: PwmOutput,
    O: OutputPin,
    L: OutputPin,
{
    /// Create a driver with the output and LED off
    pub fn new(timer: T, pwm: P, mut output: O, mut led: L) -> Self {
        output.set_low().ok();
        led.set_low().ok();
        Self {
            timer,
            pwm,
            output,
            led,
        }
    }

    /// Start the output at the clock's effective frequency
    ///
    /// Fails with [`ClockError::ClockBusy`] if already running and with
    /// [`ClockError::FrequencyExceeded`] if the effective frequency is above
    /// the limit; in both cases nothing is acquired.
    pub fn start(&mut self, state: &mut ClockState) -> Result<GenerationMode, ClockError> {
        if state.is_running() {
            return Err(ClockError::ClockBusy);
        }
        if state.exceeds_maximum() {
            return Err(ClockError::FrequencyExceeded);
        }

        let frequency = state.effective_frequency();
        let mode = state.classify(frequency);
        match mode {
            GenerationMode::SoftwareTimed => self.timer.start(frequency),
            GenerationMode::HardwarePwm => self.pwm.start(frequency, state.config().pwm_duty),
        }

        self.led.set_high().ok();
        state.apply(Transition::Started(mode));
        Ok(mode)
    }

    /// Stop the output and release the active generator
    ///
    /// Tears down the generator recorded at start, whatever the frequency
    /// has been changed to since. Returns that mode, or `None` if the output
    /// was not running.
    pub fn stop(&mut self, state: &mut ClockState) -> Option<GenerationMode> {
        let mode = state.generator().mode()?;
        match mode {
            GenerationMode::SoftwareTimed => self.timer.stop(),
            GenerationMode::HardwarePwm => {
                self.pwm.set_duty(0);
                self.pwm.stop();
            }
        }

        self.led.set_low().ok();
        state.apply(Transition::Stopped);
        Some(mode)
    }

    /// Emit one half-cycle pulse at the selected frequency
    ///
    /// Blocks for the length of the pulse. Only allowed while idle.
    pub fn pulse<D: DelayNs>(&mut self, state: &ClockState, delay: &mut D) -> Result<u32, ClockError> {
        if state.is_running() {
            return Err(ClockError::ClockBusy);
        }

        let width_us = half_period_us(state.frequency());
        self.output.set_high().ok();
        self.led.set_high().ok();
        delay.delay_us(width_us);
        self.output.set_low().ok();
        self.led.set_low().ok();

        Ok(width_us)
    }

    /// Turn the run LED off
    pub fn led_off(&mut self) {
        self.led.set_low().ok();
    }
}
