//! Configuration
//!
//! All settings are compile-time; the clock always boots with defaults.

pub mod timing;

pub use timing::*;
