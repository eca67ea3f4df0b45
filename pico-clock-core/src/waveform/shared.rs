//! Frequency cell shared with the software-timed callback
//!
//! The dispatch path is the only writer. The callback reads with relaxed
//! ordering and may see an edit one tick late; no lock is taken so the
//! toggle timing is never delayed by an edit.

use portable_atomic::{AtomicU32, Ordering};

/// Selected frequency in Hz, readable from any execution context
pub struct SharedFrequency(AtomicU32);

impl SharedFrequency {
    /// Create a cell holding `frequency_hz`
    pub const fn new(frequency_hz: u32) -> Self {
        Self(AtomicU32::new(frequency_hz))
    }

    /// Read the current frequency
    pub fn load(&self) -> u32 {
        self.0.load(Ordering::Relaxed)
    }

    /// Publish a new frequency
    pub fn store(&self, frequency_hz: u32) {
        self.0.store(frequency_hz, Ordering::Relaxed);
    }

    /// Half a period of the current frequency (µs)
    pub fn half_period_us(&self) -> u32 {
        half_period_us(self.load())
    }
}

/// Half a period of `frequency_hz` in microseconds
///
/// A zero frequency is treated as 1 Hz.
pub fn half_period_us(frequency_hz: u32) -> u32 {
    500_000 / frequency_hz.max(1)
}

/// A full period of `frequency_hz` in microseconds
pub fn period_us(frequency_hz: u32) -> u32 {
    1_000_000 / frequency_hz.max(1)
}
