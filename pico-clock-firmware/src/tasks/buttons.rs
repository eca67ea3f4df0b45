//! Button input task
//!
//! One task instance per button. Each pin is tagged with its logical button
//! when the task is spawned; presses are timestamped on the rising edge and
//! queued for the controller, which does the debouncing.

use defmt::*;
use embassy_rp::gpio::Input;
use embassy_time::Instant;

use pico_clock_core::state::{Button, InputEvent, TimedEvent};

use crate::channels::INPUT_CHANNEL;

/// Milliseconds since boot, wrapping like the debounce filter expects
pub fn now_ms() -> u32 {
    Instant::now().as_millis() as u32
}

/// Button task (pull-down input, active high)
#[embassy_executor::task(pool_size = 6)]
pub async fn button_task(mut pin: Input<'static>, button: Button) {
    info!("Button task started: {:?}", button);

    loop {
        pin.wait_for_rising_edge().await;
        let at_ms = now_ms();
        debug!("{:?} pressed at {} ms", button, at_ms);

        INPUT_CHANNEL
            .send(TimedEvent::new(InputEvent::Pressed(button), at_ms))
            .await;
    }
}
