//! Status messages
//!
//! What the display should show after an event, and for how long. The
//! firmware owns the actual display; the core only describes frames.

use crate::config::{ERROR_HOLD_MS, SPLASH_HOLD_MS, STATUS_HOLD_MS};

/// One thing to show on the status display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Status {
    /// Boot greeting
    Splash,
    /// Selected frequency (Hz)
    Frequency(u32),
    /// Output started
    Running,
    /// Output stopped
    Stopped,
    /// Frequency returned to default
    Reset,
    /// Frequency above the generator limit
    Error,
    /// Edit refused while running
    Busy,
}

impl Status {
    /// Four-character text for this status, `None` for numbers
    pub fn text(&self) -> Option<&'static str> {
        match self {
            Status::Splash => Some("Helo"),
            Status::Frequency(_) => None,
            Status::Running => Some("Run "),
            Status::Stopped => Some("Stop"),
            Status::Reset => Some("Rst "),
            Status::Error => Some("Err "),
            Status::Busy => Some("Busy"),
        }
    }
}

/// A status plus how long it stays before the next frame (ms)
///
/// The last frame of a response normally has `hold_ms == 0` and stays until
/// something else is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StatusFrame {
    pub status: Status,
    pub hold_ms: u32,
}

impl StatusFrame {
    pub const fn new(status: Status, hold_ms: u32) -> Self {
        Self { status, hold_ms }
    }

    /// Frame that stays until replaced
    pub const fn show(status: Status) -> Self {
        Self::new(status, 0)
    }

    pub const fn splash() -> Self {
        Self::new(Status::Splash, SPLASH_HOLD_MS)
    }

    pub const fn held(status: Status) -> Self {
        Self::new(status, STATUS_HOLD_MS)
    }

    pub const fn error() -> Self {
        Self::new(Status::Error, ERROR_HOLD_MS)
    }
}
