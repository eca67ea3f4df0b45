//! TM1637 4-digit 7-segment display driver
//!
//! Bit-banged two-wire protocol (start, LSB-first bytes with an ACK clock,
//! stop). Both lines are open drain with the module's pull-ups, so DIO can
//! be released and read back for the ACK.

use defmt::*;
use embedded_hal::digital::{InputPin, OutputPin};
use embedded_hal_async::delay::DelayNs;

use super::StatusDisplay;

/// Number of digits on the module
pub const DIGITS: usize = 4;

/// Brightness used at start-up (0-7)
pub const DEFAULT_BRIGHTNESS: u8 = 3;

const MAX_BRIGHTNESS: u8 = 7;

/// Largest number that fits in four digits
const MAX_NUMBER: u32 = 9999;

/// Half a bit time (µs)
const BIT_DELAY_US: u32 = 10;

/// TM1637 commands
mod cmd {
    /// Data write, auto-increment address
    pub const DATA_AUTO: u8 = 0x40;
    /// Set address to digit 0
    pub const ADDRESS: u8 = 0xC0;
    /// Display on, OR'd with brightness
    pub const DISPLAY_ON: u8 = 0x88;
}

/// Segment patterns for 0-9 then A-Z (bit 0 = segment a ... bit 6 = g)
const SEGMENTS: [u8; 36] = [
    0x3F, 0x06, 0x5B, 0x4F, 0x66, 0x6D, 0x7D, 0x07, 0x7F, 0x6F, // 0-9
    0x77, 0x7C, 0x39, 0x5E, 0x79, 0x71, 0x3D, 0x76, 0x06, 0x1E, // A-J
    0x76, 0x38, 0x55, 0x54, 0x3F, 0x73, 0x67, 0x50, 0x6D, 0x78, // K-T
    0x3E, 0x1C, 0x2A, 0x76, 0x6E, 0x5B, // U-Z
];

const BLANK: u8 = 0x00;
const DASH: u8 = 0x40;

/// TM1637 errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Tm1637Error {
    /// The chip did not pull DIO low after a byte
    Nack,
    /// A GPIO operation failed
    Pin,
}

/// Encode one character; letters are case-insensitive, unknown characters
/// are blank
pub fn encode_char(c: char) -> u8 {
    match c {
        '0'..='9' => SEGMENTS[c as usize - '0' as usize],
        'A'..='Z' => SEGMENTS[c as usize - 'A' as usize + 10],
        'a'..='z' => SEGMENTS[c as usize - 'a' as usize + 10],
        '-' => DASH,
        _ => BLANK,
    }
}

/// Encode the first four characters of `text`, padding with blanks
pub fn encode_text(text: &str) -> [u8; DIGITS] {
    let mut segments = [BLANK; DIGITS];
    for (slot, c) in segments.iter_mut().zip(text.chars()) {
        *slot = encode_char(c);
    }
    segments
}

/// Encode a number right-aligned, clamped to four digits
pub fn encode_number(value: u32) -> [u8; DIGITS] {
    let mut value = value.min(MAX_NUMBER);
    let mut segments = [BLANK; DIGITS];
    for slot in segments.iter_mut().rev() {
        *slot = SEGMENTS[(value % 10) as usize];
        value /= 10;
        if value == 0 {
            break;
        }
    }
    segments
}

/// TM1637 driver
pub struct Tm1637<CLK, DIO, D> {
    clk: CLK,
    dio: DIO,
    delay: D,
    brightness: u8,
}

impl<CLK, DIO, D> Tm1637<CLK, DIO, D>
where
    CLK: OutputPin,
    DIO: OutputPin + InputPin,
    D: DelayNs,
{
    /// Create a driver; nothing is sent until the first write
    pub fn new(clk: CLK, dio: DIO, delay: D) -> Self {
        Self {
            clk,
            dio,
            delay,
            brightness: DEFAULT_BRIGHTNESS,
        }
    }

    /// Set brightness (0-7) and switch the display on
    pub async fn set_brightness(&mut self, level: u8) -> Result<(), Tm1637Error> {
        self.brightness = level.min(MAX_BRIGHTNESS);
        self.command(cmd::DISPLAY_ON | self.brightness).await
    }

    /// Write raw segment patterns to all four digits
    pub async fn write_segments(&mut self, segments: &[u8; DIGITS]) -> Result<(), Tm1637Error> {
        self.command(cmd::DATA_AUTO).await?;

        self.start().await?;
        self.write_byte(cmd::ADDRESS).await?;
        for &segment in segments {
            self.write_byte(segment).await?;
        }
        self.stop().await?;

        self.command(cmd::DISPLAY_ON | self.brightness).await
    }

    async fn command(&mut self, command: u8) -> Result<(), Tm1637Error> {
        self.start().await?;
        self.write_byte(command).await?;
        self.stop().await
    }

    async fn start(&mut self) -> Result<(), Tm1637Error> {
        self.dio.set_high().map_err(|_| Tm1637Error::Pin)?;
        self.clk.set_high().map_err(|_| Tm1637Error::Pin)?;
        self.bit_delay().await;
        self.dio.set_low().map_err(|_| Tm1637Error::Pin)?;
        self.bit_delay().await;
        Ok(())
    }

    async fn stop(&mut self) -> Result<(), Tm1637Error> {
        self.clk.set_low().map_err(|_| Tm1637Error::Pin)?;
        self.bit_delay().await;
        self.dio.set_low().map_err(|_| Tm1637Error::Pin)?;
        self.bit_delay().await;
        self.clk.set_high().map_err(|_| Tm1637Error::Pin)?;
        self.bit_delay().await;
        self.dio.set_high().map_err(|_| Tm1637Error::Pin)?;
        self.bit_delay().await;
        Ok(())
    }

    async fn write_byte(&mut self, byte: u8) -> Result<(), Tm1637Error> {
        for bit in 0..8 {
            self.clk.set_low().map_err(|_| Tm1637Error::Pin)?;
            self.bit_delay().await;
            if byte & (1 << bit) != 0 {
                self.dio.set_high().map_err(|_| Tm1637Error::Pin)?;
            } else {
                self.dio.set_low().map_err(|_| Tm1637Error::Pin)?;
            }
            self.bit_delay().await;
            self.clk.set_high().map_err(|_| Tm1637Error::Pin)?;
            self.bit_delay().await;
        }

        // ACK: release DIO and sample it on the ninth clock
        self.clk.set_low().map_err(|_| Tm1637Error::Pin)?;
        self.dio.set_high().map_err(|_| Tm1637Error::Pin)?;
        self.bit_delay().await;
        self.clk.set_high().map_err(|_| Tm1637Error::Pin)?;
        self.bit_delay().await;
        let ack = self.dio.is_low().map_err(|_| Tm1637Error::Pin)?;
        self.clk.set_low().map_err(|_| Tm1637Error::Pin)?;
        self.bit_delay().await;

        if ack {
            Ok(())
        } else {
            Err(Tm1637Error::Nack)
        }
    }

    async fn bit_delay(&mut self) {
        self.delay.delay_us(BIT_DELAY_US).await;
    }
}

impl<CLK, DIO, D> StatusDisplay for Tm1637<CLK, DIO, D>
where
    CLK: OutputPin,
    DIO: OutputPin + InputPin,
    D: DelayNs,
{
    async fn show(&mut self, text: &str) {
        if let Err(e) = self.write_segments(&encode_text(text)).await {
            warn!("TM1637 write failed: {:?}", e);
        }
    }

    async fn show_number(&mut self, value: u32) {
        if let Err(e) = self.write_segments(&encode_number(value)).await {
            warn!("TM1637 write failed: {:?}", e);
        }
    }
}
