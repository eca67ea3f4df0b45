//! PWM slice timing
//!
//! The RP2040 PWM counter runs at `clk_sys / divider` and wraps after
//! `top + 1` counts, so the output frequency is
//! `clk_sys * 16 / (divider_x16 * (top + 1))` with the divider in 8.4
//! fixed point. Frequencies the hardware cannot hit exactly are rounded to
//! the nearest achievable setting below the target; the top end saturates
//! at half the system clock.

/// Smallest divider (1.0 in 8.4 fixed point)
pub const MIN_DIVIDER_X16: u16 = 16;

/// Largest divider (255 + 15/16 in 8.4 fixed point)
pub const MAX_DIVIDER_X16: u16 = 4095;

/// Divider and wrap value for one PWM slice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PwmTiming {
    /// Clock divider in 8.4 fixed point
    pub divider_x16: u16,
    /// Counter wrap value
    pub top: u16,
}

impl PwmTiming {
    /// Compute the timing for `frequency_hz` from the system clock
    ///
    /// Uses the smallest divider that fits the period into the 16-bit
    /// counter, keeping duty resolution as high as possible.
    pub fn for_frequency(sys_clk_hz: u32, frequency_hz: u32) -> Self {
        let clk_x16 = sys_clk_hz as u64 * 16;
        let frequency = frequency_hz.max(1) as u64;

        let period_x16 = clk_x16 / frequency;
        let divider_x16 = period_x16
            .div_ceil(1 << 16)
            .clamp(MIN_DIVIDER_X16 as u64, MAX_DIVIDER_X16 as u64);

        let top = (clk_x16 / (divider_x16 * frequency))
            .saturating_sub(1)
            .clamp(1, u16::MAX as u64);

        Self {
            divider_x16: divider_x16 as u16,
            top: top as u16,
        }
    }

    /// Integer part of the divider
    pub fn divider_int(&self) -> u8 {
        (self.divider_x16 >> 4) as u8
    }

    /// Fractional part of the divider (sixteenths)
    pub fn divider_frac(&self) -> u8 {
        (self.divider_x16 & 0x0F) as u8
    }

    /// Frequency this timing actually produces (Hz, truncated)
    pub fn actual_frequency(&self, sys_clk_hz: u32) -> u32 {
        let clk_x16 = sys_clk_hz as u64 * 16;
        (clk_x16 / (self.divider_x16 as u64 * (self.top as u64 + 1))) as u32
    }

    /// Compare value for a duty cycle in 1/65535 units
    ///
    /// Rounded to the nearest count; any non-zero duty keeps at least one
    /// high count so the output never collapses to a flat line.
    pub fn compare_for_duty(&self, duty: u16) -> u16 {
        if duty == 0 {
            return 0;
        }
        let counts = self.top as u64 + 1;
        let max = u16::MAX as u64;
        ((counts * duty as u64 + max / 2) / max).clamp(1, max) as u16
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CLK: u32 = 125_000_000;

    #[test]
    fn test_exact_frequency() {
        let timing = PwmTiming::for_frequency(CLK, 1_000_000);
        assert_eq!(timing.divider_x16, 16);
        assert_eq!(timing.top, 124);
        assert_eq!(timing.actual_frequency(CLK), 1_000_000);
    }

    #[test]
    fn test_low_frequency_needs_divider() {
        let timing = PwmTiming::for_frequency(CLK, 10);
        assert_eq!(timing.divider_x16, 3052);
        assert_eq!(timing.divider_int(), 190);
        assert_eq!(timing.divider_frac(), 12);
        assert_eq!(timing.top, 65529);

        let actual = timing.actual_frequency(CLK);
        assert!(actual == 10 || actual == 9);
    }

    #[test]
    fn test_kilohertz() {
        let timing = PwmTiming::for_frequency(CLK, 1000);
        let actual = timing.actual_frequency(CLK);
        assert!((999..=1001).contains(&actual));
    }

    #[test]
    fn test_top_saturates_at_half_clock() {
        let timing = PwmTiming::for_frequency(CLK, 127_000_000);
        assert_eq!(timing.divider_x16, MIN_DIVIDER_X16);
        assert_eq!(timing.top, 1);
        assert_eq!(timing.actual_frequency(CLK), CLK / 2);
        // two counts per period, one of them high
        assert_eq!(timing.compare_for_duty(32512), 1);
    }

    #[test]
    fn test_compare_never_zero_near_top_end() {
        for frequency in [41_700_000, 50_000_000, 100_000_000, 127_000_000] {
            let timing = PwmTiming::for_frequency(CLK, frequency);
            assert_eq!(timing.compare_for_duty(32512), 1, "{} Hz", frequency);
        }
        let timing = PwmTiming::for_frequency(CLK, 30_000_000);
        assert_eq!(timing.top, 3);
        assert_eq!(timing.compare_for_duty(32512), 2);
        assert_eq!(timing.compare_for_duty(1), 1);
    }

    #[test]
    fn test_half_duty_compare() {
        let timing = PwmTiming::for_frequency(CLK, 1_000_000);
        // 125 counts, ~49.6% duty
        assert_eq!(timing.compare_for_duty(32512), 62);
        assert_eq!(timing.compare_for_duty(0), 0);
        assert_eq!(timing.compare_for_duty(u16::MAX), 125);
    }
}
