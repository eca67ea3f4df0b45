//! Controller loop
//!
//! Owns the clock state and the waveform driver. Receives input events in
//! arrival order, dispatches them one at a time and shows the resulting
//! status frames. Hold times and pulses block this loop, so events queued
//! meanwhile are handled afterwards, still subject to debounce by their
//! capture timestamps.
//!
//! Embassy tasks cannot be generic, so each binary wraps
//! [`run_controller`] in a task for its own display type.

use defmt::*;
use embassy_rp::gpio::Output;
use embassy_time::Delay;

use pico_clock_core::config::ClockConfig;
use pico_clock_core::controller::Controller;
use pico_clock_core::waveform::WaveformDriver;

use crate::channels::{FREQUENCY, INPUT_CHANNEL};
use crate::clock_line::{ClockPin, ClockPwm, SquareWaveTimer};
use crate::display::{present, StatusDisplay};

/// Run the dispatch loop forever
pub async fn run_controller<D: StatusDisplay>(mut display: D, led: Output<'static>) -> ! {
    info!("Controller task started");

    let driver = WaveformDriver::new(SquareWaveTimer, ClockPwm, ClockPin, led);
    let mut controller = Controller::new(ClockConfig::default(), &FREQUENCY, driver);
    let mut delay = Delay;

    present(&mut display, &controller.splash()).await;
    info!("Ready at {} Hz", controller.state().frequency());

    loop {
        let event = INPUT_CHANNEL.receive().await;
        trace!("Input: {:?}", event);

        let Some(response) = controller.handle(event, &mut delay) else {
            debug!("Input ignored (debounce)");
            continue;
        };

        match response.result {
            Ok(()) => info!(
                "{:?}: {} Hz, {:?}",
                response.action,
                controller.state().frequency(),
                controller.state().generator()
            ),
            Err(e) => warn!("{:?} refused: {:?}", response.action, e),
        }

        present(&mut display, &response.frames).await;
    }
}
