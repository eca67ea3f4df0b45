//! Debounce filter
//!
//! A single window shared by every button: after an accepted press, any
//! press from any button within the window is dropped. Two different
//! buttons pressed in quick succession therefore count as one.

use crate::config::DEBOUNCE_DELAY_MS;

/// Source-agnostic debounce filter
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DebounceFilter {
    /// Window length (ms)
    window_ms: u32,
    /// Capture time of the last accepted event (ms)
    last_event_ms: u32,
}

impl Default for DebounceFilter {
    fn default() -> Self {
        Self::new(DEBOUNCE_DELAY_MS)
    }
}

impl DebounceFilter {
    /// Create a filter with the given window
    ///
    /// The last event time starts at zero, so presses inside the first
    /// window after boot are dropped too.
    pub fn new(window_ms: u32) -> Self {
        Self {
            window_ms,
            last_event_ms: 0,
        }
    }

    /// Decide whether an event captured at `now_ms` is accepted
    ///
    /// Accepts iff more than the window has passed since the last accepted
    /// event, and records `now_ms` on acceptance. Timestamps wrap like the
    /// millisecond tick counter they come from.
    pub fn accept(&mut self, now_ms: u32) -> bool {
        if now_ms.wrapping_sub(self.last_event_ms) > self.window_ms {
            self.last_event_ms = now_ms;
            true
        } else {
            false
        }
    }

    /// Capture time of the last accepted event (ms)
    pub fn last_event_ms(&self) -> u32 {
        self.last_event_ms
    }

    /// Window length (ms)
    pub fn window_ms(&self) -> u32 {
        self.window_ms
    }
}
