//! Clock output line
//!
//! The clock output pin stays muxed to its PWM slice for the whole run.
//! Constant levels (idle, pulse, software-timed toggling) are produced by
//! holding the compare value at zero and flipping the channel polarity, so
//! the pin never has to be handed back and forth between PWM and GPIO.
//!
//! The line lives in a blocking mutex because two tasks drive it: the
//! controller (PWM start/stop, pulses) and the square wave task (ticks).

use core::cell::RefCell;
use core::convert::Infallible;

use defmt::*;
use embassy_rp::clocks::clk_sys_freq;
use embassy_rp::pwm::{Config as PwmConfig, Pwm};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;
use embedded_hal::digital::{ErrorType, OutputPin};
use fixed::types::U12F4;

use pico_clock_core::traits::{PwmOutput, SoftwareTimer};
use pico_clock_core::waveform::PwmTiming;

use crate::channels::{SquareWaveCommand, SQUARE_WAVE_CMD};

struct ClockLine {
    pwm: Pwm<'static>,
    config: PwmConfig,
    timing: PwmTiming,
}

impl ClockLine {
    fn set_level(&mut self, high: bool) {
        self.config.compare_a = 0;
        self.config.invert_a = high;
        self.config.enable = true;
        self.pwm.set_config(&self.config);
    }

    fn start(&mut self, frequency_hz: u32, duty: u16) {
        let sys_clk = clk_sys_freq();
        let timing = PwmTiming::for_frequency(sys_clk, frequency_hz);
        debug!(
            "PWM {} Hz: divider {}+{}/16, top {} ({} Hz actual)",
            frequency_hz,
            timing.divider_int(),
            timing.divider_frac(),
            timing.top,
            timing.actual_frequency(sys_clk)
        );

        self.timing = timing;
        self.config.divider = U12F4::from_bits(timing.divider_x16);
        self.config.top = timing.top;
        self.config.compare_a = timing.compare_for_duty(duty);
        self.config.invert_a = false;
        self.config.enable = true;
        self.pwm.set_config(&self.config);
    }

    fn set_duty(&mut self, duty: u16) {
        self.config.compare_a = self.timing.compare_for_duty(duty);
        self.pwm.set_config(&self.config);
    }

    fn stop(&mut self) {
        self.config.compare_a = 0;
        self.config.invert_a = false;
        self.config.enable = false;
        self.pwm.set_config(&self.config);
    }
}

static CLOCK_LINE: Mutex<CriticalSectionRawMutex, RefCell<Option<ClockLine>>> =
    Mutex::new(RefCell::new(None));

fn with_line(f: impl FnOnce(&mut ClockLine)) {
    CLOCK_LINE.lock(|cell| {
        if let Some(line) = cell.borrow_mut().as_mut() {
            f(line);
        }
    });
}

/// Take ownership of the clock output PWM and drive the line low
pub fn install(pwm: Pwm<'static>) {
    let mut line = ClockLine {
        pwm,
        config: PwmConfig::default(),
        timing: PwmTiming::for_frequency(clk_sys_freq(), 1),
    };
    line.set_level(false);
    CLOCK_LINE.lock(|cell| {
        cell.replace(Some(line));
    });
}

/// Drive the line to a constant level
pub fn set_level(high: bool) {
    with_line(|line| line.set_level(high));
}

/// The clock line seen as a plain output pin
pub struct ClockPin;

impl ErrorType for ClockPin {
    type Error = Infallible;
}

impl OutputPin for ClockPin {
    fn set_low(&mut self) -> Result<(), Infallible> {
        set_level(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Infallible> {
        set_level(true);
        Ok(())
    }
}

/// The clock line as a free-running PWM channel
pub struct ClockPwm;

impl PwmOutput for ClockPwm {
    fn start(&mut self, frequency_hz: u32, duty: u16) {
        with_line(|line| line.start(frequency_hz, duty));
    }

    fn set_duty(&mut self, duty: u16) {
        with_line(|line| line.set_duty(duty));
    }

    fn stop(&mut self) {
        with_line(|line| line.stop());
    }
}

/// Software timer backed by the square wave task
pub struct SquareWaveTimer;

impl SoftwareTimer for SquareWaveTimer {
    fn start(&mut self, frequency_hz: u32) {
        SQUARE_WAVE_CMD.signal(SquareWaveCommand::Start(frequency_hz));
    }

    fn stop(&mut self) {
        SQUARE_WAVE_CMD.signal(SquareWaveCommand::Stop);
    }
}
