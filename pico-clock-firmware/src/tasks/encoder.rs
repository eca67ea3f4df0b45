//! Rotary encoder task
//!
//! Decodes detents from the A/B lines and turns them into direct frequency
//! sets. The tracked value is re-read from the shared frequency before each
//! step so button edits and resets are picked up.

use defmt::*;
use embassy_futures::select::select;
use embassy_rp::gpio::Input;

use pico_clock_core::input::{EncoderValue, QuadratureDecoder};
use pico_clock_core::state::{InputEvent, TimedEvent};

use crate::channels::{FREQUENCY, INPUT_CHANNEL};
use crate::tasks::buttons::now_ms;

/// Encoder rotation task (pull-up inputs, idle high)
#[embassy_executor::task]
pub async fn encoder_task(mut a: Input<'static>, mut b: Input<'static>) {
    info!("Encoder task started");

    let mut decoder = QuadratureDecoder::new(a.is_high(), b.is_high());
    let mut value = EncoderValue::default();

    loop {
        select(a.wait_for_any_edge(), b.wait_for_any_edge()).await;

        let Some(rotation) = decoder.update(a.is_high(), b.is_high()) else {
            continue;
        };

        value.set(FREQUENCY.load());
        if let Some(frequency) = value.step(rotation) {
            trace!("Encoder {:?} -> {} Hz", rotation, frequency);
            INPUT_CHANNEL
                .send(TimedEvent::new(InputEvent::EncoderChanged(frequency), now_ms()))
                .await;
        }
    }
}
