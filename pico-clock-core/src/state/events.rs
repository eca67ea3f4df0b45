//! Input events that drive the clock

/// Logical front-panel buttons
///
/// The firmware tags each physical input with one of these when it sets up
/// the pins, so the dispatch path never looks at pin numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Button {
    /// Return the frequency to its default
    Reset,
    /// Step the last decimal digit of the frequency
    Cycle,
    /// Multiply the frequency by ten
    Shift,
    /// Start the output
    Set,
    /// Start the output, or stop it if running
    StartStop,
    /// Emit a single half-cycle pulse
    Pulse,
}

impl Button {
    /// All buttons, in front-panel order
    pub const ALL: [Button; 6] = [
        Button::Reset,
        Button::Cycle,
        Button::Shift,
        Button::Set,
        Button::StartStop,
        Button::Pulse,
    ];
}

/// Events delivered to the dispatch path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InputEvent {
    /// A button was pressed (rising edge)
    Pressed(Button),
    /// The rotary encoder moved to a new value
    EncoderChanged(u32),
}

/// An input event with the time it was captured
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimedEvent {
    /// What happened
    pub event: InputEvent,
    /// Monotonic capture time (ms since boot)
    pub at_ms: u32,
}

impl TimedEvent {
    /// Stamp an event with its capture time
    pub const fn new(event: InputEvent, at_ms: u32) -> Self {
        Self { event, at_ms }
    }

    /// Check if this event passes through the debounce filter
    ///
    /// Encoder values come from a decoder that already rejects bounce, so
    /// they skip it.
    pub fn is_debounced(&self) -> bool {
        matches!(self.event, InputEvent::Pressed(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_buttons_distinct() {
        for (i, a) in Button::ALL.iter().enumerate() {
            for b in &Button::ALL[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_debounced_events() {
        assert!(TimedEvent::new(InputEvent::Pressed(Button::Pulse), 0).is_debounced());
        assert!(!TimedEvent::new(InputEvent::EncoderChanged(42), 0).is_debounced());
    }
}
