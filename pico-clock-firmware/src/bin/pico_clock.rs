//! Pico Clock - button and 7-segment variant
//!
//! Six push buttons edit and control the clock; a TM1637 module shows the
//! frequency and status.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::gpio::{Input, Level, Output, OutputOpenDrain, Pull};
use embassy_rp::pwm::{Config as PwmConfig, Pwm};
use embassy_time::Delay;
use {defmt_rtt as _, panic_probe as _};

use pico_clock_core::state::Button;
use pico_clock_firmware::clock_line;
use pico_clock_firmware::display::tm1637::{Tm1637, DEFAULT_BRIGHTNESS};
use pico_clock_firmware::tasks::{button_task, run_controller, square_wave_task};

type Display = Tm1637<OutputOpenDrain<'static>, OutputOpenDrain<'static>, Delay>;

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Pico Clock starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    // Clock output: GPIO0 on PWM slice 0, channel A
    let pwm = Pwm::new_output_a(p.PWM_SLICE0, p.PIN_0, PwmConfig::default());
    clock_line::install(pwm);

    // Run LED: on-board LED on GPIO25
    let led = Output::new(p.PIN_25, Level::Low);

    // TM1637: CLK GPIO2, DIO GPIO3 (module has its own pull-ups)
    let mut display: Display = Tm1637::new(
        OutputOpenDrain::new(p.PIN_2, Level::High),
        OutputOpenDrain::new(p.PIN_3, Level::High),
        Delay,
    );
    if let Err(e) = display.set_brightness(DEFAULT_BRIGHTNESS).await {
        warn!("TM1637 not responding: {:?}", e);
    }

    // Buttons: GPIO16-21, pull-down, active high
    let buttons = [
        (Input::new(p.PIN_16, Pull::Down), Button::Reset),
        (Input::new(p.PIN_17, Pull::Down), Button::Cycle),
        (Input::new(p.PIN_18, Pull::Down), Button::Shift),
        (Input::new(p.PIN_19, Pull::Down), Button::Set),
        (Input::new(p.PIN_20, Pull::Down), Button::StartStop),
        (Input::new(p.PIN_21, Pull::Down), Button::Pulse),
    ];
    for (pin, button) in buttons {
        spawner.spawn(button_task(pin, button)).unwrap();
    }

    spawner.spawn(square_wave_task()).unwrap();
    spawner.spawn(controller_task(display, led)).unwrap();

    info!("All tasks spawned");
}

#[embassy_executor::task]
async fn controller_task(display: Display, led: Output<'static>) {
    run_controller(display, led).await
}
