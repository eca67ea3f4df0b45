//! Inter-task communication channels
//!
//! Defines the static channels used for communication between Embassy tasks.
//! Uses embassy-sync primitives for safe async communication.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_sync::signal::Signal;

use pico_clock_core::config::DEFAULT_FREQUENCY_HZ;
use pico_clock_core::state::TimedEvent;
use pico_clock_core::waveform::SharedFrequency;

/// Channel capacity for input events
const INPUT_CHANNEL_SIZE: usize = 8;

/// Timestamped button presses and encoder changes, in arrival order
pub static INPUT_CHANNEL: Channel<CriticalSectionRawMutex, TimedEvent, INPUT_CHANNEL_SIZE> =
    Channel::new();

/// Commands for the software-timed square wave task
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SquareWaveCommand {
    /// Start ticking at the given rate (Hz)
    Start(u32),
    /// Stop ticking and leave the line low
    Stop,
}

/// Square wave command signal (updated by the controller)
pub static SQUARE_WAVE_CMD: Signal<CriticalSectionRawMutex, SquareWaveCommand> = Signal::new();

/// Selected frequency, written by the controller and read by the square
/// wave task on every tick
pub static FREQUENCY: SharedFrequency = SharedFrequency::new(DEFAULT_FREQUENCY_HZ);
