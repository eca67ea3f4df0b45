//! Pico Clock - rotary encoder and OLED variant
//!
//! The encoder sets the frequency directly and its push switch starts and
//! stops the output; an SSD1306 panel shows the frequency and status.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::i2c::{self, Async, I2c};
use embassy_rp::peripherals::I2C0;
use embassy_rp::pwm::{Config as PwmConfig, Pwm};
use {defmt_rtt as _, panic_probe as _};

use pico_clock_core::state::Button;
use pico_clock_firmware::clock_line;
use pico_clock_firmware::display::oled::OledStatus;
use pico_clock_firmware::tasks::{button_task, encoder_task, run_controller, square_wave_task};

bind_interrupts!(struct Irqs {
    I2C0_IRQ => i2c::InterruptHandler<I2C0>;
});

type Display = OledStatus<I2c<'static, I2C0, Async>>;

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Pico Clock (OLED) starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    // Clock output: GPIO0 on PWM slice 0, channel A
    let pwm = Pwm::new_output_a(p.PWM_SLICE0, p.PIN_0, PwmConfig::default());
    clock_line::install(pwm);

    // Run LED: on-board LED on GPIO25
    let led = Output::new(p.PIN_25, Level::Low);

    // OLED: I2C0, SCL GPIO5, SDA GPIO4
    let i2c = I2c::new_async(p.I2C0, p.PIN_5, p.PIN_4, Irqs, i2c::Config::default());
    let display: Display = match OledStatus::new(i2c).await {
        Ok(display) => display,
        Err(e) => {
            error!("{:?}: check the OLED wiring", e);
            return;
        }
    };
    info!("OLED initialized");

    // Encoder: A GPIO6, B GPIO7 (pull-up), switch GPIO20 acts as Start/Stop
    let enc_a = Input::new(p.PIN_6, Pull::Up);
    let enc_b = Input::new(p.PIN_7, Pull::Up);
    let enc_sw = Input::new(p.PIN_20, Pull::Down);

    spawner.spawn(encoder_task(enc_a, enc_b)).unwrap();
    spawner.spawn(button_task(enc_sw, Button::StartStop)).unwrap();
    spawner.spawn(square_wave_task()).unwrap();
    spawner.spawn(controller_task(display, led)).unwrap();

    info!("All tasks spawned");
}

#[embassy_executor::task]
async fn controller_task(display: Display, led: Output<'static>) {
    run_controller(display, led).await
}
