//! Board-agnostic core logic for the Pico Clock signal generator
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Hardware abstraction traits (software timer, PWM output)
//! - Clock state and the waveform state machine
//! - Input debouncing and rotary encoder tracking
//! - Frequency edit rules
//! - Event dispatch and status reporting
//! - Configuration constants

#![no_std]
#![deny(unsafe_code)]

pub mod config;
pub mod controller;
pub mod editor;
pub mod input;
pub mod state;
pub mod status;
pub mod traits;
pub mod waveform;
