//! Clock state and generator state machine
//!
//! The generator is either idle or running in one of two modes. The mode is
//! decided when the output starts and is never stored anywhere else.

use crate::config::ClockConfig;
use crate::waveform::SharedFrequency;

/// How the output waveform is produced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GenerationMode {
    /// Periodic timer callback toggling a plain output
    SoftwareTimed,
    /// Dedicated PWM hardware
    HardwarePwm,
}

impl GenerationMode {
    /// Pick the mode for a frequency given the software-timed threshold
    pub fn classify(frequency_hz: u32, threshold_hz: u32) -> Self {
        if frequency_hz < threshold_hz {
            GenerationMode::SoftwareTimed
        } else {
            GenerationMode::HardwarePwm
        }
    }
}

/// Generator states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GeneratorState {
    /// No output, frequency may be edited
    #[default]
    Idle,
    /// Output active in the given mode
    Running(GenerationMode),
}

/// Generator transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Transition {
    /// A generator was acquired in the given mode
    Started(GenerationMode),
    /// The active generator was released
    Stopped,
}

impl GeneratorState {
    /// Check if the output is running
    pub fn is_running(&self) -> bool {
        matches!(self, GeneratorState::Running(_))
    }

    /// Get the active generation mode, if running
    pub fn mode(&self) -> Option<GenerationMode> {
        match self {
            GeneratorState::Running(mode) => Some(*mode),
            GeneratorState::Idle => None,
        }
    }

    /// Apply a transition and return the next state
    ///
    /// Starting is only possible from idle; at most one generator is active.
    pub fn transition(self, transition: Transition) -> Self {
        use GeneratorState::*;
        use Transition::*;

        match (self, transition) {
            (Idle, Started(mode)) => Running(mode),
            (Running(_), Stopped) => Idle,
            _ => self,
        }
    }
}

/// Errors surfaced to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ClockError {
    /// Effective frequency is above the generator limit
    FrequencyExceeded,
    /// Operation is not allowed while the output is running
    ClockBusy,
    /// No display answered at start-up
    NoDisplayFound,
}

/// Shared clock state
///
/// Owned by the dispatch path. The frequency itself lives in a
/// [`SharedFrequency`] cell so the software-timed callback can read it
/// without going through this struct.
pub struct ClockState<'a> {
    config: ClockConfig,
    frequency: &'a SharedFrequency,
    generator: GeneratorState,
}

impl<'a> ClockState<'a> {
    /// Create the clock state with the default frequency
    pub fn new(config: ClockConfig, frequency: &'a SharedFrequency) -> Self {
        frequency.store(config.default_frequency_hz);
        Self {
            config,
            frequency,
            generator: GeneratorState::Idle,
        }
    }

    /// Get the configuration
    pub fn config(&self) -> &ClockConfig {
        &self.config
    }

    /// Get the selected frequency (Hz)
    pub fn frequency(&self) -> u32 {
        self.frequency.load()
    }

    /// Get the frequency multiplier
    pub fn multiplier(&self) -> u32 {
        self.config.multiplier
    }

    /// Get the frequency the generator would run at (Hz)
    ///
    /// Saturates instead of wrapping so an overflow always reads as too high.
    pub fn effective_frequency(&self) -> u32 {
        self.frequency().saturating_mul(self.config.multiplier)
    }

    /// Check if the effective frequency is above the generator limit
    pub fn exceeds_maximum(&self) -> bool {
        self.effective_frequency() > self.config.max_frequency_hz
    }

    /// Classify a frequency against the software-timed threshold
    pub fn classify(&self, frequency_hz: u32) -> GenerationMode {
        GenerationMode::classify(frequency_hz, self.config.software_threshold_hz)
    }

    /// Get the generator state
    pub fn generator(&self) -> GeneratorState {
        self.generator
    }

    /// Check if the output is running
    pub fn is_running(&self) -> bool {
        self.generator.is_running()
    }

    pub(crate) fn set_frequency(&mut self, frequency_hz: u32) {
        self.frequency.store(frequency_hz);
    }

    pub(crate) fn apply(&mut self, transition: Transition) {
        self.generator = self.generator.transition(transition);
    }
}
