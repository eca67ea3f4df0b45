//! Status displays
//!
//! Both variants show the same four-character status texts and the
//! selected frequency; only the panel differs.

pub mod oled;
pub mod tm1637;

use embassy_time::Timer;

use pico_clock_core::status::{Status, StatusFrame};

/// A display that can show a short text or a number
///
/// Implementations log and swallow bus errors: a missed refresh is never
/// worth stopping the clock for.
#[allow(async_fn_in_trait)]
pub trait StatusDisplay {
    /// Show a short text
    async fn show(&mut self, text: &str);

    /// Show a number
    async fn show_number(&mut self, value: u32);

    /// Show a status
    async fn show_status(&mut self, status: Status) {
        match status {
            Status::Frequency(value) => self.show_number(value).await,
            other => {
                if let Some(text) = other.text() {
                    self.show(text).await;
                }
            }
        }
    }
}

/// Show frames in order, waiting out each frame's hold time
pub async fn present<D: StatusDisplay>(display: &mut D, frames: &[StatusFrame]) {
    for frame in frames {
        display.show_status(frame.status).await;
        if frame.hold_ms > 0 {
            Timer::after_millis(frame.hold_ms as u64).await;
        }
    }
}
