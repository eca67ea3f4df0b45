//! Frequency edits
//!
//! Button edits are only allowed while the output is stopped. Cycle and
//! Shift check the *current* effective frequency against the limit before
//! anything else, then the running guard. The encoder's direct set bypasses
//! both.

use crate::state::{ClockError, ClockState};

/// Increment the last decimal digit, wrapping 9 to 1
///
/// `10` becomes `11`, `19` becomes `11`, `9` becomes `1`.
pub fn cycle_last_digit(frequency_hz: u32) -> u32 {
    let digit = frequency_hz % 10;
    let next = if digit >= 9 { 1 } else { digit + 1 };
    frequency_hz - digit + next
}

/// Multiply by ten unless above `limit_hz`
pub fn shift_decade(frequency_hz: u32, limit_hz: u32) -> u32 {
    if frequency_hz > limit_hz {
        frequency_hz
    } else {
        frequency_hz.saturating_mul(10)
    }
}

impl ClockState<'_> {
    /// Return the frequency to its default
    pub fn reset(&mut self) -> Result<u32, ClockError> {
        if self.is_running() {
            return Err(ClockError::ClockBusy);
        }
        let frequency = self.config().default_frequency_hz;
        self.set_frequency(frequency);
        Ok(frequency)
    }

    /// Step the last decimal digit of the frequency
    pub fn cycle_digit(&mut self) -> Result<u32, ClockError> {
        self.check_editable()?;
        let frequency = cycle_last_digit(self.frequency());
        self.set_frequency(frequency);
        Ok(frequency)
    }

    /// Multiply the frequency by ten, up to the shift limit
    pub fn shift(&mut self) -> Result<u32, ClockError> {
        self.check_editable()?;
        let frequency = shift_decade(self.frequency(), self.config().shift_limit_hz);
        self.set_frequency(frequency);
        Ok(frequency)
    }

    /// Set the frequency directly, regardless of the running state
    ///
    /// Zero is raised to 1 Hz so the frequency stays positive.
    pub fn set_direct(&mut self, frequency_hz: u32) -> u32 {
        let frequency = frequency_hz.max(1);
        self.set_frequency(frequency);
        frequency
    }

    fn check_editable(&self) -> Result<(), ClockError> {
        if self.exceeds_maximum() {
            return Err(ClockError::FrequencyExceeded);
        }
        if self.is_running() {
            return Err(ClockError::ClockBusy);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClockConfig;
    use crate::state::{GenerationMode, Transition};
    use crate::waveform::SharedFrequency;

    #[test]
    fn test_cycle_last_digit() {
        assert_eq!(cycle_last_digit(1), 2);
        assert_eq!(cycle_last_digit(8), 9);
        assert_eq!(cycle_last_digit(9), 1);
        assert_eq!(cycle_last_digit(10), 11);
        assert_eq!(cycle_last_digit(19), 11);
        assert_eq!(cycle_last_digit(1000), 1001);
    }

    #[test]
    fn test_cycle_nine_times_returns() {
        let mut frequency = 4;
        for _ in 0..9 {
            frequency = cycle_last_digit(frequency);
        }
        assert_eq!(frequency, 4);
    }

    #[test]
    fn test_shift_decade() {
        assert_eq!(shift_decade(50, 999), 500);
        assert_eq!(shift_decade(999, 999), 9990);
        assert_eq!(shift_decade(1000, 999), 1000);
        assert_eq!(shift_decade(9990, 999), 9990);
    }

    #[test]
    fn test_reset() {
        let cell = SharedFrequency::new(1);
        let mut state = ClockState::new(ClockConfig::default(), &cell);
        state.set_direct(420);
        assert_eq!(state.reset(), Ok(1));
        assert_eq!(state.frequency(), 1);
    }

    #[test]
    fn test_edits_blocked_while_running() {
        let cell = SharedFrequency::new(1);
        let mut state = ClockState::new(ClockConfig::default(), &cell);
        state.set_direct(50);
        state.apply(Transition::Started(GenerationMode::HardwarePwm));

        assert_eq!(state.reset(), Err(ClockError::ClockBusy));
        assert_eq!(state.cycle_digit(), Err(ClockError::ClockBusy));
        assert_eq!(state.shift(), Err(ClockError::ClockBusy));
        assert_eq!(state.frequency(), 50);
    }

    #[test]
    fn test_direct_set_ignores_running() {
        let cell = SharedFrequency::new(1);
        let mut state = ClockState::new(ClockConfig::default(), &cell);
        state.apply(Transition::Started(GenerationMode::SoftwareTimed));

        assert_eq!(state.set_direct(7), 7);
        assert_eq!(cell.load(), 7);
        assert_eq!(state.set_direct(0), 1);
    }

    #[test]
    fn test_exceeded_checked_before_busy() {
        let cell = SharedFrequency::new(1);
        let mut state = ClockState::new(ClockConfig::default(), &cell);
        state.set_direct(200_000_000);
        state.apply(Transition::Started(GenerationMode::HardwarePwm));

        assert_eq!(state.cycle_digit(), Err(ClockError::FrequencyExceeded));
        assert_eq!(state.shift(), Err(ClockError::FrequencyExceeded));
        assert_eq!(state.frequency(), 200_000_000);
    }

    #[test]
    fn test_pre_check_uses_current_frequency() {
        let cell = SharedFrequency::new(1);
        let config = ClockConfig {
            max_frequency_hz: 5000,
            ..Default::default()
        };
        let mut state = ClockState::new(config, &cell);

        // 999 is within the limit, so the shift goes ahead past it
        state.set_direct(999);
        assert_eq!(state.shift(), Ok(9990));

        // Now over the limit: further edits are refused
        assert_eq!(state.cycle_digit(), Err(ClockError::FrequencyExceeded));
        assert_eq!(state.frequency(), 9990);
    }
}
