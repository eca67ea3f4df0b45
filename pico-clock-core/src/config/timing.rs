//! Frequency limits, debounce window and display timing

/// Minimum time between accepted input events (ms)
pub const DEBOUNCE_DELAY_MS: u32 = 500;

/// Frequency the clock boots with and returns to on reset (Hz)
pub const DEFAULT_FREQUENCY_HZ: u32 = 1;

/// Multiplier applied to the frequency before it reaches the generator
pub const DEFAULT_MULTIPLIER: u32 = 1;

/// Highest effective frequency the generator accepts (Hz)
pub const MAX_FREQUENCY_HZ: u32 = 127_000_000;

/// Effective frequencies below this are generated by a software timer
pub const SOFTWARE_TIMED_THRESHOLD_HZ: u32 = 10;

/// Frequencies above this are not shifted by another decade
pub const SHIFT_LIMIT_HZ: u32 = 999;

/// PWM duty cycle in 1/65535 units (~49.6%)
pub const PWM_DUTY_U16: u16 = 32512;

/// How long a transient status ("Run", "Stop", "Rst", "Busy") stays up (ms)
pub const STATUS_HOLD_MS: u32 = 2000;

/// How long an error status stays up (ms)
pub const ERROR_HOLD_MS: u32 = 3000;

/// How long the boot splash stays up (ms)
pub const SPLASH_HOLD_MS: u32 = 3000;

/// Clock behaviour settings
///
/// Defaults match the constants above; tests build variants of this to
/// exercise, for example, a multiplier other than one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ClockConfig {
    /// Debounce window (ms)
    pub debounce_ms: u32,
    /// Boot and reset frequency (Hz)
    pub default_frequency_hz: u32,
    /// Effective frequency multiplier
    pub multiplier: u32,
    /// Upper bound for the effective frequency (Hz)
    pub max_frequency_hz: u32,
    /// Software-timed / hardware PWM boundary (Hz)
    pub software_threshold_hz: u32,
    /// Shift cap (Hz)
    pub shift_limit_hz: u32,
    /// PWM duty (1/65535 units)
    pub pwm_duty: u16,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            debounce_ms: DEBOUNCE_DELAY_MS,
            default_frequency_hz: DEFAULT_FREQUENCY_HZ,
            multiplier: DEFAULT_MULTIPLIER,
            max_frequency_hz: MAX_FREQUENCY_HZ,
            software_threshold_hz: SOFTWARE_TIMED_THRESHOLD_HZ,
            shift_limit_hz: SHIFT_LIMIT_HZ,
            pwm_duty: PWM_DUTY_U16,
        }
    }
}
