//! Rotary encoder decoding and value tracking
//!
//! The decoder turns raw A/B samples into detent steps; the tracker turns
//! steps into a bounded frequency value.

/// Direction of one encoder detent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Rotation {
    /// One detent clockwise
    Clockwise,
    /// One detent counter-clockwise
    CounterClockwise,
}

impl Rotation {
    /// Signed step for this rotation
    pub fn delta(&self) -> i32 {
        match self {
            Rotation::Clockwise => 1,
            Rotation::CounterClockwise => -1,
        }
    }
}

/// Decoder states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Idle,
    CwStep1,
    CwStep2,
    CcwStep1,
    CcwStep2,
}

/// Quadrature decoder with bounce rejection
///
/// Quadrature encoding with pull-ups (idle = both high):
/// CW:  A leads B, Idle (1,1) -> (0,1) -> (0,0) -> either high: step
/// CCW: B leads A, Idle (1,1) -> (1,0) -> (0,0) -> either high: step
///
/// A return to (1,1) before both lines are low is treated as bounce.
#[derive(Debug, Clone)]
pub struct QuadratureDecoder {
    phase: Phase,
    last: (bool, bool),
}

impl QuadratureDecoder {
    /// Create a decoder from the current line levels
    pub fn new(a: bool, b: bool) -> Self {
        Self {
            phase: Phase::Idle,
            last: (a, b),
        }
    }

    /// Feed one sample; returns a rotation when a detent completes
    pub fn update(&mut self, a: bool, b: bool) -> Option<Rotation> {
        if (a, b) == self.last {
            return None;
        }
        self.last = (a, b);

        match self.phase {
            Phase::Idle => {
                if !a && b {
                    self.phase = Phase::CwStep1;
                } else if a && !b {
                    self.phase = Phase::CcwStep1;
                }
                None
            }
            Phase::CwStep1 => {
                if !a && !b {
                    self.phase = Phase::CwStep2;
                } else if a && b {
                    self.phase = Phase::Idle;
                }
                None
            }
            Phase::CwStep2 => {
                if a || b {
                    self.phase = Phase::Idle;
                    return Some(Rotation::Clockwise);
                }
                None
            }
            Phase::CcwStep1 => {
                if !a && !b {
                    self.phase = Phase::CcwStep2;
                } else if a && b {
                    self.phase = Phase::Idle;
                }
                None
            }
            Phase::CcwStep2 => {
                if a || b {
                    self.phase = Phase::Idle;
                    return Some(Rotation::CounterClockwise);
                }
                None
            }
        }
    }
}

/// Lowest value the encoder can select (Hz)
pub const ENCODER_MIN: u32 = 1;

/// Highest value the encoder can select (Hz)
pub const ENCODER_MAX: u32 = 9999;

/// Bounded encoder value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EncoderValue {
    value: u32,
    min: u32,
    max: u32,
}

impl Default for EncoderValue {
    fn default() -> Self {
        Self::new(ENCODER_MIN, ENCODER_MIN, ENCODER_MAX)
    }
}

impl EncoderValue {
    /// Create a tracker clamped to `min..=max`
    pub fn new(value: u32, min: u32, max: u32) -> Self {
        Self {
            value: value.clamp(min, max),
            min,
            max,
        }
    }

    /// Current value
    pub fn value(&self) -> u32 {
        self.value
    }

    /// Re-synchronise with a value changed elsewhere (e.g. a reset)
    pub fn set(&mut self, value: u32) {
        self.value = value.clamp(self.min, self.max);
    }

    /// Apply one detent; returns the new value if it changed
    pub fn step(&mut self, rotation: Rotation) -> Option<u32> {
        let next = (self.value as i64 + rotation.delta() as i64)
            .clamp(self.min as i64, self.max as i64) as u32;
        if next == self.value {
            None
        } else {
            self.value = next;
            Some(next)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed(decoder: &mut QuadratureDecoder, samples: &[(bool, bool)]) -> Option<Rotation> {
        let mut result = None;
        for &(a, b) in samples {
            if let Some(r) = decoder.update(a, b) {
                result = Some(r);
            }
        }
        result
    }

    #[test]
    fn test_clockwise_detent() {
        let mut decoder = QuadratureDecoder::new(true, true);
        let result = feed(&mut decoder, &[(false, true), (false, false), (true, false), (true, true)]);
        assert_eq!(result, Some(Rotation::Clockwise));
    }

    #[test]
    fn test_counter_clockwise_detent() {
        let mut decoder = QuadratureDecoder::new(true, true);
        let result = feed(&mut decoder, &[(true, false), (false, false), (false, true), (true, true)]);
        assert_eq!(result, Some(Rotation::CounterClockwise));
    }

    #[test]
    fn test_bounce_is_ignored() {
        let mut decoder = QuadratureDecoder::new(true, true);
        let result = feed(&mut decoder, &[(false, true), (true, true), (false, true), (true, true)]);
        assert_eq!(result, None);
    }

    #[test]
    fn test_repeated_sample_is_ignored() {
        let mut decoder = QuadratureDecoder::new(true, true);
        assert_eq!(decoder.update(true, true), None);
    }

    #[test]
    fn test_value_bounds() {
        let mut value = EncoderValue::default();
        assert_eq!(value.value(), 1);
        assert_eq!(value.step(Rotation::CounterClockwise), None);
        assert_eq!(value.step(Rotation::Clockwise), Some(2));

        value.set(ENCODER_MAX);
        assert_eq!(value.step(Rotation::Clockwise), None);
        assert_eq!(value.step(Rotation::CounterClockwise), Some(ENCODER_MAX - 1));
    }

    #[test]
    fn test_set_clamps() {
        let mut value = EncoderValue::default();
        value.set(0);
        assert_eq!(value.value(), ENCODER_MIN);
        value.set(1_000_000);
        assert_eq!(value.value(), ENCODER_MAX);
    }
}
