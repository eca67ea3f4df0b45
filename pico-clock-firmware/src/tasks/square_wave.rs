//! Software-timed square wave task
//!
//! Below the PWM threshold the clock line is toggled from here. Each tick
//! drives the line high for half a period of the *current* selected
//! frequency, read from the shared cell, then low again.

use defmt::*;
use embassy_futures::select::{select, Either};
use embassy_time::{Duration, Ticker, Timer};

use pico_clock_core::waveform::period_us;

use crate::channels::{SquareWaveCommand, FREQUENCY, SQUARE_WAVE_CMD};
use crate::clock_line;

fn ticker_for(frequency_hz: u32) -> Ticker {
    Ticker::every(Duration::from_micros(period_us(frequency_hz) as u64))
}

/// Square wave task
///
/// Idle until started; a new start while running retimes the ticker.
#[embassy_executor::task]
pub async fn square_wave_task() {
    info!("Square wave task started");

    loop {
        let frequency = match SQUARE_WAVE_CMD.wait().await {
            SquareWaveCommand::Start(frequency) => frequency,
            SquareWaveCommand::Stop => continue,
        };

        info!("Square wave running at {} Hz", frequency);
        let mut ticker = ticker_for(frequency);

        loop {
            match select(ticker.next(), SQUARE_WAVE_CMD.wait()).await {
                Either::First(()) => {
                    clock_line::set_level(true);
                    Timer::after_micros(FREQUENCY.half_period_us() as u64).await;
                    clock_line::set_level(false);
                }
                Either::Second(SquareWaveCommand::Start(frequency)) => {
                    debug!("Square wave retimed to {} Hz", frequency);
                    ticker = ticker_for(frequency);
                }
                Either::Second(SquareWaveCommand::Stop) => {
                    clock_line::set_level(false);
                    info!("Square wave stopped");
                    break;
                }
            }
        }
    }
}
