//! Pico Clock firmware support
//!
//! Shared pieces of the two firmware variants: the clock output line, the
//! inter-task channels, the status displays and the Embassy tasks. The
//! binaries under `src/bin` only wire pins to these.
//!
//! Board wiring (Raspberry Pi Pico):
//!
//! | Signal              | GPIO |
//! |---------------------|------|
//! | Clock output        | 0    |
//! | Run LED             | 25   |
//! | Reset / Cycle       | 16 / 17 |
//! | Shift / Set         | 18 / 19 |
//! | Start-Stop / Pulse  | 20 / 21 |
//! | TM1637 CLK / DIO    | 2 / 3 |
//! | OLED SDA / SCL      | 4 / 5 |
//! | Encoder A / B       | 6 / 7 |
//! | Encoder switch      | 20   |

#![no_std]

pub mod channels;
pub mod clock_line;
pub mod display;
pub mod tasks;
