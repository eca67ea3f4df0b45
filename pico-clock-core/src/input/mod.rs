//! Input conditioning
//!
//! Debouncing for buttons, decoding and value tracking for the encoder.

pub mod debounce;
pub mod encoder;

pub use debounce::DebounceFilter;
pub use encoder::{EncoderValue, QuadratureDecoder, Rotation, ENCODER_MAX, ENCODER_MIN};
